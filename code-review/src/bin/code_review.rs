use ai_llm_service::{ReqwestTransport, error_handler::env_flag, telemetry};
use anyhow::Context;
use code_review::{
    ci_output::CiOutput, collector::GitChangeSet, config::ReviewJobConfig,
    extractor::ContentExtractor, gateway::ReviewApiClient, runner::run_batch,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is normal in CI.
    dotenvy::dotenv().ok();
    telemetry::init(env_flag("DEBUG", false)).context("install tracing subscriber")?;

    let cfg = ReviewJobConfig::from_env()?;
    info!(
        api_url = %cfg.api_url,
        timeout_secs = cfg.timeout.as_secs(),
        workdir = %cfg.workdir.display(),
        apply_ignore_list = cfg.selection.apply_ignore_list,
        "starting code review"
    );

    let changes = GitChangeSet::open(&cfg.workdir);
    let extractor = ContentExtractor::new(changes.content_root());
    let transport = ReqwestTransport::new().context("build HTTP client")?;
    let gateway = ReviewApiClient::new(transport, cfg.api_url.clone(), cfg.timeout);

    let outcome = run_batch(&changes, &extractor, &gateway, cfg.selection).await;

    CiOutput::new(cfg.github_output.clone())
        .publish(&outcome)
        .context("publish CI outputs")?;

    info!(has_review = outcome.has_review(), "code review completed");
    Ok(())
}
