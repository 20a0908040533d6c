use anyhow::Context;
use math_kidz::config::SiteConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = SiteConfig::from_env().context("invalid configuration")?;

    eprintln!("🧮 Math Kidz v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Backend: {}", config.backend_api_url);
    eprintln!("   Contact API: http://0.0.0.0:{}/api/contact", config.port);
    eprintln!("   Enquiry API: http://0.0.0.0:{}/api/enquiry", config.port);
    eprintln!("   Chat WS: ws://0.0.0.0:{}/ws/chat", config.port);
    eprintln!(
        "   CORS: {}\n",
        if config.allowed_origins.is_empty() {
            "any origin".to_string()
        } else {
            config.allowed_origins.join(", ")
        }
    );

    math_kidz::server::serve(config).await?;

    Ok(())
}
