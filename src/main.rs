use ai_llm_service::telemetry;
use anyhow::Context;
use api::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if there is one.
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    telemetry::init(config.debug).context("install tracing subscriber")?;

    api::start(config).await?;

    Ok(())
}
