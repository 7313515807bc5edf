//! Home page: hero section and footer.

use std::io::{self, IsTerminal};

use anyhow::Result;
use taskdeck_core::config::Config;
use taskdeck_core::layout::{Action, Footer, Hero};

pub fn show(config: &Config) -> Result<()> {
    let hero = Hero::new(config.theme);
    let color = io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();

    println!("{}", paint(hero.headline, hero.palette.headline, color));
    println!("{}", paint(hero.body, hero.palette.body, color));
    println!();
    if let Action::Navigate(route) = &hero.call_to_action.action {
        println!("[{}] → {route}", hero.call_to_action.label);
    }
    println!();
    println!("{}", Footer.render());
    Ok(())
}

/// Wraps `text` in a 24-bit ANSI foreground color taken from a `#rrggbb` hex.
fn paint(text: &str, hex: &str, enabled: bool) -> String {
    match (enabled, parse_hex(hex)) {
        (true, Some((r, g, b))) => format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m"),
        _ => text.to_string(),
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
