// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Member portal smoke CLI.
//!
//! Exercises the session/profile client against the configured Supabase
//! project: register, login, logout, session status, profile lookup, and
//! route-guard evaluation.

use member_portal::{config::Config, PortalService, RouteGuard, RouteTable};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env().expect("Failed to load configuration");
    let portal = PortalService::new(&config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("register") => {
            let (email, password) = credentials(&args)?;
            let data = portal.register(email, password).await?;
            match data.session {
                Some(_) => println!("Registered and signed in as {}", email),
                None => println!("Registered {}; confirm the email to sign in", email),
            }
        }
        Some("login") => {
            let (email, password) = credentials(&args)?;
            portal.login(email, password).await?;
            println!("Signed in as {}", email);
        }
        Some("logout") => {
            portal.logout().await?;
            println!("Signed out");
        }
        Some("status") | None => match portal.check_session().await? {
            Some(session) => println!(
                "Active session for {}",
                session.user.email.as_deref().unwrap_or(&session.user.id)
            ),
            None => println!("No active session"),
        },
        Some("profile") => {
            let user = portal.current_user().await?;
            let profile = portal.get_profile(&user.id).await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Some("guard") => {
            let name = args.get(1).map(String::as_str).unwrap_or("home");
            let guard = RouteGuard::new(&portal, RouteTable::default());
            let route = guard
                .table()
                .find(name)
                .cloned()
                .ok_or_else(|| format!("Unknown route: {}", name))?;
            match guard.redirect_for(&route).await? {
                Some(target) => println!("{} -> redirect to {}", route.path, target),
                None => println!("{} -> allow", route.path),
            }
        }
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            eprintln!(
                "Usage: member-portal [status | register <email> <password> | \
                 login <email> <password> | logout | profile | guard [route]]"
            );
            std::process::exit(2);
        }
    }

    Ok(())
}

fn credentials(args: &[String]) -> Result<(&str, &str), Box<dyn std::error::Error>> {
    match (args.get(1), args.get(2)) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => Err("Expected <email> <password>".into()),
    }
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("member_portal=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
