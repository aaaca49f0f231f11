mod app;
mod config;
mod error;
mod export;
mod ui;

use std::{fs::OpenOptions, process::ExitCode, sync::Mutex};

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let settings = config::load()?;
    init_tracing(&settings.app)?;

    if let Some(path) = settings.export {
        let outcome = export::run(&settings.app, &settings.prefill, &path).await;
        return export::report(outcome, &mut std::io::stderr());
    }

    let mut app = app::App::new(settings.app, settings.prefill)?;
    app.run().await?;
    Ok(ExitCode::SUCCESS)
}

/// The terminal belongs to the UI, so logs go to a file.
fn init_tracing(config: &config::AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "qrplatba_tui={level},engine={level}",
            level = config.log_level
        ))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!(api_url = %config.api_url, "starting qrplatba_tui");
    Ok(())
}
