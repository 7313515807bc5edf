//! CLI command handlers.

pub mod auth;
pub mod config;
pub mod home;
pub mod theme;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use taskdeck_core::api::ApiClient;
use taskdeck_core::config::Config;
use taskdeck_core::session::{SessionCache, TokenStore};
use taskdeck_core::theme::ThemeToggle;

/// Shared state for commands that talk to the backend.
pub struct App {
    pub cache: SessionCache,
    pub store: TokenStore,
    pub theme: ThemeToggle,
    pub api: ApiClient,
}

impl App {
    /// Restores the session from disk and builds the API client.
    pub fn load(config: Config) -> Result<Self> {
        let cache = SessionCache::default();
        let store = cache.restore();
        let api = ApiClient::from_config(&config).context("configure API client")?;
        Ok(Self {
            cache,
            store,
            theme: ThemeToggle::new(config.theme),
            api,
        })
    }
}

/// Returns `value`, or reads one line from stdin after printing `label`.
fn value_or_prompt(value: Option<String>, label: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    print!("{label}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}
