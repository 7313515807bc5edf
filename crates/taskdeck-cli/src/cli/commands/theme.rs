//! Theme command handlers.

use anyhow::{Context, Result};
use taskdeck_core::config::Config;
use taskdeck_core::theme::{Theme, ThemeToggle};

pub fn show(config: &Config) {
    println!("Theme: {}", config.theme);
}

pub fn toggle(config: &Config) -> Result<()> {
    let toggle = ThemeToggle::new(config.theme);
    save(toggle.toggle())
}

pub fn set(config: &Config, theme: Theme) -> Result<()> {
    if config.theme == theme {
        println!("Theme already {theme}");
        return Ok(());
    }
    save(theme)
}

fn save(theme: Theme) -> Result<()> {
    Config::save_theme(theme).context("save theme")?;
    tracing::info!(%theme, "theme changed");
    println!("✓ Theme set to {theme}");
    Ok(())
}
