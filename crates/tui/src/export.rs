//! One-shot generation without the terminal UI.

use std::{io::Write, path::Path, process::ExitCode};

use engine::{FormField, FormInput, FormState, HttpQrApi, RequestErrors, RequestResult, pipeline};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

pub async fn run(config: &AppConfig, input: &FormInput, path: &Path) -> Result<()> {
    let api = HttpQrApi::new(&config.api_url, config.request_timeout())?;
    let state = FormState::from(input);

    match pipeline::run(&api, &state).await {
        RequestResult::Success(image) => {
            std::fs::write(path, image.bytes())?;
            tracing::info!(path = %path.display(), bytes = image.bytes().len(), "QR image exported");
            Ok(())
        }
        RequestResult::Failed(errors) => Err(AppError::Export(describe(&errors))),
        RequestResult::Loading => Err(AppError::Export("no result".to_string())),
    }
}

/// Turns the export outcome into an exit code. A rejected form or request
/// is reported to `out` as plain text; other errors propagate.
pub fn report(outcome: Result<()>, out: &mut impl Write) -> Result<ExitCode> {
    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(AppError::Export(message)) => {
            writeln!(out, "{message}")?;
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err),
    }
}

/// Generic message followed by the field messages, one line each.
fn describe(errors: &RequestErrors) -> String {
    let mut lines: Vec<String> = errors.generic.iter().cloned().collect();
    for field in FormField::ALL {
        if let Some(message) = errors.fields.get(field) {
            lines.push(format!("{}: {message}", field.key()));
        }
    }
    lines.join("\n")
}
