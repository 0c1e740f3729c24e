mod app;
mod effects;
mod input;
pub(crate) mod logging;
mod persistence;
mod prompt;
mod render;

use std::sync::Arc;

use anyhow::Context;
use console_engine::{ensure_state_dir, CredentialStore, EngineHandle, KeyValueStore};
use console_logging::console_info;

use crate::cli::AppConfig;

/// Extra time a single command may wait beyond two request timeouts, to
/// cover answering the login prompt.
const PROMPT_ALLOWANCE: std::time::Duration = std::time::Duration::from_secs(120);

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    ensure_state_dir(&config.state_dir)
        .with_context(|| format!("state directory {:?}", config.state_dir))?;
    logging::initialize(config.log_destination, config.log_level, &config.state_dir);
    console_info!(
        "Starting console against {} (state in {:?})",
        config.transport.base_url,
        config.state_dir
    );

    let store = KeyValueStore::new(&config.state_dir);
    let credentials = Arc::new(CredentialStore::open(store.clone()));
    let wait_limit = config.transport.request_timeout * 2 + PROMPT_ALLOWANCE;
    let engine = EngineHandle::new(
        config.transport,
        credentials.clone(),
        Arc::new(prompt::TerminalPrompt),
    )
    .context("failed to set up the HTTP client")?;

    let runner = effects::EffectRunner::new(engine, store.clone());
    app::Console::new(runner, store, credentials, wait_limit).run()?;
    Ok(())
}
