//! Client configuration
//!
//! Command line flags (with environment fallbacks) resolved into validated
//! endpoints and timeouts.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use shared::DEFAULT_EVENT_TITLE;

use crate::error::{ClientError, ClientResult};

/// Live results client for the festival results board
#[derive(Parser, Debug, Clone)]
#[command(name = "results-client")]
#[command(about = "Keeps a live, derived view of festival results in sync with the backend")]
pub struct Args {
    /// Base URL of the results backend
    #[arg(long, env = "RESULTS_API_URL", default_value = "http://127.0.0.1:3006")]
    pub api_url: String,

    /// Change channel URL (defaults to <api-url>/ws with a ws scheme)
    #[arg(long, env = "RESULTS_WS_URL")]
    pub ws_url: Option<String>,

    /// Cache file for the last published state
    #[arg(long, env = "RESULTS_CACHE_FILE")]
    pub cache_file: Option<PathBuf>,

    /// Per-request timeout in milliseconds
    #[arg(long, env = "RESULTS_REQUEST_TIMEOUT_MS", default_value = "10000")]
    pub request_timeout_ms: u64,

    /// Event title used in notification headings
    #[arg(long, env = "RESULTS_EVENT_TITLE", default_value = DEFAULT_EVENT_TITLE)]
    pub event_title: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RESULTS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: Url,
    pub ws_url: Url,
    pub cache_file: Option<PathBuf>,
    pub request_timeout: Duration,
    pub event_title: String,
}

impl ClientConfig {
    pub fn from_args(args: &Args) -> ClientResult<Self> {
        let api_url = parse_url("api_url", &args.api_url)?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(config_error("api_url", &args.api_url));
        }

        let ws_url = match &args.ws_url {
            Some(raw) => parse_url("ws_url", raw)?,
            None => derive_ws_url(&api_url)?,
        };

        if args.request_timeout_ms == 0 {
            return Err(config_error("request_timeout_ms", "0"));
        }

        Ok(Self {
            api_url,
            ws_url,
            cache_file: args.cache_file.clone(),
            request_timeout: Duration::from_millis(args.request_timeout_ms),
            event_title: args.event_title.clone(),
        })
    }
}

/// `http(s)://host/base` becomes `ws(s)://host/base/ws`
pub fn derive_ws_url(api_url: &Url) -> ClientResult<Url> {
    let mut ws_url = api_url.clone();
    let scheme = if api_url.scheme() == "https" { "wss" } else { "ws" };
    ws_url
        .set_scheme(scheme)
        .map_err(|_| config_error("ws_url", api_url.as_str()))?;

    let path = format!("{}/ws", api_url.path().trim_end_matches('/'));
    ws_url.set_path(&path);
    ws_url.set_query(None);
    Ok(ws_url)
}

fn parse_url(field: &str, raw: &str) -> ClientResult<Url> {
    Url::parse(raw.trim()).map_err(|_| config_error(field, raw))
}

fn config_error(field: &str, value: &str) -> ClientError {
    ClientError::ConfigError {
        field: field.to_string(),
        value: value.to_string(),
    }
}
