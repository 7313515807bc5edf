//! Layout chrome: header, footer, and the home page hero.
//!
//! These are view models. They decide which affordances exist and where they
//! lead; drawing them is up to the front end.

use crate::routes::Route;
use crate::session::{TokenPair, TokenStore};
use crate::theme::{Theme, ThemeToggle};

/// What activating an affordance does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(Route),
    Logout,
    /// Switch to the contained theme.
    ToggleTheme(Theme),
}

/// A labelled control in the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affordance {
    pub label: &'static str,
    pub action: Action,
}

impl Affordance {
    fn navigate(label: &'static str, route: Route) -> Self {
        Self {
            label,
            action: Action::Navigate(route),
        }
    }
}

/// Top navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Where the home icon leads.
    pub home: Route,
    /// Affordances in display order; the theme toggle is always last.
    pub items: Vec<Affordance>,
    pub theme: Theme,
}

impl Header {
    /// Builds the header from the shared session and theme.
    pub fn build(store: &TokenStore, theme: &ThemeToggle) -> Self {
        Self::from_parts(store.read().as_ref(), theme.get())
    }

    pub fn from_parts(session: Option<&TokenPair>, theme: Theme) -> Self {
        let mut items = Vec::new();

        let home = match session {
            None => {
                items.push(Affordance::navigate("Login", Route::Login));
                items.push(Affordance::navigate("Sign up", Route::Register));
                Route::Home
            }
            Some(pair) => {
                // Without a decodable subject there is no profile to link to.
                if let Some(subject) = pair.subject() {
                    items.push(Affordance::navigate("Settings", Route::Profile(subject)));
                }
                items.push(Affordance {
                    label: "Logout",
                    action: Action::Logout,
                });
                Route::Dashboard
            }
        };

        items.push(Affordance {
            label: "Toggle theme",
            action: Action::ToggleTheme(theme.toggled()),
        });

        Self { home, items, theme }
    }

    /// Returns the profile route, if the header offers one.
    pub fn profile(&self) -> Option<&Route> {
        self.items.iter().find_map(|item| match &item.action {
            Action::Navigate(route @ Route::Profile(_)) => Some(route),
            _ => None,
        })
    }

    /// Renders the header as a single text line.
    pub fn render(&self) -> String {
        let items = self
            .items
            .iter()
            .map(|item| match &item.action {
                Action::Navigate(route) => format!("{} ({route})", item.label),
                Action::Logout => item.label.to_string(),
                Action::ToggleTheme(next) => format!("{} (→ {next})", item.label),
            })
            .collect::<Vec<_>>()
            .join(" | ");
        format!("Home ({}) · {items}", self.home)
    }
}

/// Bottom credit line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Footer;

impl Footer {
    pub const TEXT: &str = "Challenge for Gamecomm";

    pub fn render(self) -> &'static str {
        Self::TEXT
    }
}

/// Text colors for the hero, as CSS hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroPalette {
    pub headline: &'static str,
    pub body: &'static str,
}

/// Home page marketing section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hero {
    pub headline: &'static str,
    pub body: &'static str,
    pub call_to_action: Affordance,
    pub palette: HeroPalette,
}

impl Hero {
    pub fn new(theme: Theme) -> Self {
        let palette = match theme {
            Theme::Light => HeroPalette {
                headline: "#1e293b",
                body: "#475569",
            },
            Theme::Dark => HeroPalette {
                headline: "#f1f5f9",
                body: "#cbd5e1",
            },
        };
        Self {
            headline: "Organize Your Tasks Efficiently",
            body: "Keep your productivity high by managing all your tasks in one place. \
                   Clean, fast and accessible anywhere.",
            call_to_action: Affordance::navigate("Register / Get Started", Route::Register),
            palette,
        }
    }
}
