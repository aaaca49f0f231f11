use std::{path::PathBuf, time::Duration};

use clap::Parser;
use engine::{DEFAULT_DEBOUNCE, DEFAULT_ENDPOINT, FormField, FormInput};
use reqwest::Url;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/qrplatba.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub debounce_ms: u64,
    /// Unset means the HTTP client's own defaults apply.
    pub request_timeout_secs: Option<u64>,
    pub image_dir: String,
    pub save_path: String,
    pub log_file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_ENDPOINT.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            request_timeout_secs: None,
            image_dir: std::env::temp_dir()
                .join("qrplatba")
                .to_string_lossy()
                .into_owned(),
            save_path: "qr-platba.png".to_string(),
            log_file: "qrplatba_tui.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Everything resolved at startup.
#[derive(Debug)]
pub struct Settings {
    pub app: AppConfig,
    pub prefill: FormInput,
    pub export: Option<PathBuf>,
}

#[derive(Debug, Default, Parser)]
#[command(name = "qrplatba_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the generator endpoint.
    #[arg(long)]
    api_url: Option<String>,
    /// Override the debounce delay in milliseconds.
    #[arg(long)]
    debounce_ms: Option<u64>,
    /// Pre-fill the form from the query string of this URL
    /// (keys: account, amount, message).
    #[arg(long)]
    prefill: Option<String>,
    /// Pre-fill the account number (e.g. 19-2000145399/0800).
    #[arg(long)]
    account: Option<String>,
    /// Pre-fill the amount.
    #[arg(long)]
    amount: Option<String>,
    /// Pre-fill the message for the recipient.
    #[arg(long)]
    message: Option<String>,
    /// Generate once without the UI and write the image to this path.
    #[arg(long)]
    export: Option<PathBuf>,
}

pub fn load() -> Result<Settings> {
    resolve(Args::parse())
}

fn resolve(args: Args) -> Result<Settings> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("QRPLATBA_TUI"));
    let mut app: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(api_url) = args.api_url {
        app.api_url = api_url;
    }
    if let Some(debounce_ms) = args.debounce_ms {
        app.debounce_ms = debounce_ms;
    }

    let mut prefill = match args.prefill.as_deref() {
        Some(url) => prefill_from_url(url)?,
        None => FormInput::default(),
    };
    if let Some(account) = args.account {
        prefill.account = account;
    }
    if let Some(amount) = args.amount {
        prefill.amount = amount;
    }
    if let Some(message) = args.message {
        prefill.message = message;
    }

    Ok(Settings {
        app,
        prefill,
        export: args.export,
    })
}

/// Reads `account`, `amount` and `message` from a URL query string.
///
/// A bare query string (`account=..&amount=..`) is accepted too. Unknown
/// keys are ignored.
pub fn prefill_from_url(raw: &str) -> Result<FormInput> {
    let url = if raw.contains("://") {
        Url::parse(raw)
    } else {
        Url::parse(&format!("http://localhost/?{}", raw.trim_start_matches('?')))
    }
    .map_err(|err| AppError::InvalidArgument(format!("invalid prefill url: {err}")))?;

    let mut input = FormInput::default();
    for (key, value) in url.query_pairs() {
        if let Some(field) = FormField::from_key(&key) {
            *input.get_mut(field) = value.into_owned();
        }
    }
    Ok(input)
}
