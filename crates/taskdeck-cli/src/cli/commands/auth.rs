//! Auth command handlers.

use anyhow::Result;
use taskdeck_core::flows::{LoginFlow, LogoutFlow, Outcome, RegisterFlow};
use taskdeck_core::forms::{FieldName, LoginForm, RegisterForm};
use taskdeck_core::layout::Header;

use super::{App, value_or_prompt};
use crate::cli::interrupt;

pub struct RegisterArgs {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

pub async fn login(app: &App, email: Option<String>, password: Option<String>) -> Result<()> {
    let form = LoginForm::new(
        value_or_prompt(email, "Email")?,
        value_or_prompt(password, "Password")?,
    );

    let flow = LoginFlow::new(app.api.clone(), app.store.clone());
    let route = match interrupt::or_interrupt(flow.submit(&form)).await? {
        Outcome::Navigate(route) => route,
        other => return report_failure(other),
    };

    app.cache.sync(&app.store)?;

    let who = app
        .store
        .subject()
        .unwrap_or_else(|| form.email.trim().to_string());
    println!("✓ Logged in as {who}");
    println!("  Session saved to: {}", app.cache.path().display());
    println!("→ {route}");
    Ok(())
}

pub async fn register(app: &App, args: RegisterArgs) -> Result<()> {
    let form = RegisterForm {
        username: value_or_prompt(args.username, "Username")?,
        email: value_or_prompt(args.email, "Email")?,
        password: value_or_prompt(args.password, "Password")?,
        confirm_password: value_or_prompt(args.confirm_password, "Confirm password")?,
    };

    let flow = RegisterFlow::new(app.api.clone());
    let route = match interrupt::or_interrupt(flow.submit(&form)).await? {
        Outcome::Navigate(route) => route,
        other => return report_failure(other),
    };

    println!("✓ Account created for {}", form.username.trim());
    println!("  Log in with: taskdeck login --email {}", form.email.trim());
    println!("→ {route}");
    Ok(())
}

pub async fn logout(app: &App) -> Result<()> {
    let was_authenticated = app.store.is_authenticated();

    // Local teardown happens before the request, so neither a failed nor an
    // interrupted call leaves the session on disk.
    let removed = app.cache.remove()?;

    let flow = LogoutFlow::new(app.api.clone(), app.store.clone());
    let outcome = interrupt::or_interrupt(flow.submit()).await?;

    if let Some(message) = &outcome.message {
        eprintln!("warning: {message}");
    }
    if was_authenticated || removed {
        println!("✓ Logged out");
    } else {
        println!("Not logged in (no session found).");
    }
    println!("→ {}", outcome.route);
    Ok(())
}

pub fn status(app: &App) {
    let header = Header::build(&app.store, &app.theme);
    println!("{}", header.render());

    match (app.store.is_authenticated(), app.store.subject()) {
        (true, Some(subject)) => println!("Signed in as {subject}"),
        (true, None) => println!("Signed in"),
        (false, _) => println!("Not signed in"),
    }
}

fn report_failure(outcome: Outcome) -> Result<()> {
    match outcome {
        Outcome::Navigate(_) => Ok(()),
        Outcome::Invalid(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("  {}: {message}", FieldName(field));
            }
            anyhow::bail!("Invalid input")
        }
        Outcome::Failed(message) => anyhow::bail!("{message}"),
        Outcome::Busy => anyhow::bail!("A submission is already in progress"),
    }
}
