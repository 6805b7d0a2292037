use std::error::Error;
use std::sync::Arc;
use bean_brew_barista::{routes, AnswerService, Config};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    let knowledge = match &config.knowledge_file {
        Some(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| format!("failed to read knowledge file {}: {}", path.display(), e))?;
            info!(path = %path.display(), "loaded knowledge file");
            Some(text)
        }
        None => None,
    };

    let service = Arc::new(AnswerService::from_config(&config, knowledge));
    info!(
        online = service.is_online(),
        model = %config.model,
        rate_limit = config.rate_limit,
        window_secs = config.rate_limit_window_secs,
        cache_ttl_secs = config.cache_ttl_secs,
        "barista configured"
    );

    info!("Bean & Brew assistant running on http://{}", config.bind);
    warp::serve(routes(service)).run(config.bind).await;
    Ok(())
}
