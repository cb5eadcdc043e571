//! Carelink CLI - a terminal driver for the telehealth patient client.
//!
//! Signs in against the Carelink API (or the seeded demo backend with
//! `--demo`), lists the doctor directory with availability, and toggles
//! favorites. All state flows through [`carelink::app::App`].

use std::io::{self, Write};

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use carelink::app::{App, NoticeKind};
use carelink::config::Config;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();
    info!("Carelink starting");

    let args: Vec<String> = std::env::args().collect();
    let demo = args.iter().any(|a| a == "--demo");

    let mut config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };
    if demo {
        config.demo_mode = true;
    }

    let mut app = App::new(config)?;

    loop {
        if !app.sessions.is_authenticated() {
            if !login_flow(&mut app).await? {
                break;
            }
            app.load_doctors().await;
            print_notice(&mut app);
            print_doctors(&app);
        }

        print!("carelink> ");
        io::stdout().flush()?;
        let Some(line) = read_line()? else { break };
        let mut parts = line.split_whitespace();

        match parts.next() {
            Some("list") => {
                app.load_doctors().await;
                print_notice(&mut app);
                print_doctors(&app);
            }
            Some("fav") => {
                let id = parts
                    .next()
                    .and_then(|n| n.parse::<usize>().ok())
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|n| app.doctors.get(n))
                    .map(|d| d.id.clone());
                match id {
                    Some(id) => {
                        app.toggle_favorite(&id).await;
                        print_notice(&mut app);
                    }
                    None => println!("Usage: fav <number from the list>"),
                }
            }
            Some("profile") => print_profile(&app),
            Some("settings") => {
                settings_flow(&mut app)?;
                print_notice(&mut app);
            }
            Some("logout") => {
                app.logout();
                println!("Logged out.");
            }
            Some("quit") | Some("q") | Some("exit") => break,
            Some(_) | None => print_help(),
        }
    }

    info!("Carelink shutting down");
    Ok(())
}

/// Interactive login. Returns `false` when the user quits instead.
async fn login_flow(app: &mut App) -> Result<bool> {
    println!("\n=== Carelink Login ===\n");

    loop {
        let remembered = app.sessions.load_remembered_credentials();
        let default_username = std::env::var("CARELINK_USERNAME")
            .ok()
            .or_else(|| remembered.as_ref().map(|c| c.username.clone()))
            .or_else(|| app.config.last_username.clone())
            .unwrap_or_default();

        if default_username.is_empty() {
            print!("Username: ");
        } else {
            print!("Username [{}]: ", default_username);
        }
        io::stdout().flush()?;
        let Some(input) = read_line()? else {
            return Ok(false);
        };
        let input = input.trim();
        if input == "quit" || input == "q" {
            return Ok(false);
        }
        let username = if input.is_empty() {
            default_username
        } else {
            input.to_string()
        };
        if username.is_empty() {
            continue;
        }

        let password = match remembered {
            Some(ref c) if c.username == username => {
                println!("Using remembered password.");
                c.password.clone()
            }
            _ => match std::env::var("CARELINK_PASSWORD") {
                Ok(p) => p,
                Err(_) => rpassword::prompt_password("Password: ")?,
            },
        };

        print!("Remember me? [y/N]: ");
        io::stdout().flush()?;
        let remember = matches!(
            read_line()?.as_deref().map(str::trim),
            Some("y") | Some("Y") | Some("yes")
        );

        println!("\nAuthenticating...");
        match app.attempt_login(&username, &password, remember).await {
            Ok(()) => {
                if let Err(e) = app.config.save() {
                    tracing::warn!(error = %e, "Failed to save config");
                }
                let name = app
                    .profile()
                    .map(|p| p.display_name.clone())
                    .unwrap_or_default();
                println!("Welcome, {}!\n", name);
                return Ok(true);
            }
            Err(_) => {
                if let Some(ref msg) = app.login_error {
                    println!("  {}\n", msg);
                }
            }
        }
    }
}

fn print_doctors(app: &App) {
    println!("List of Available Doctors\n");
    for (i, doctor) in app.doctors.iter().enumerate() {
        let heart = if app.favorites.contains(&doctor.id) {
            "♥"
        } else {
            "♡"
        };
        println!(
            "{:>3}. {} {}  [{}]",
            i + 1,
            heart,
            doctor.name,
            doctor.primary_specialty()
        );
        match app.slots_for(&doctor.id) {
            Some(slots) if !slots.is_empty() => {
                for slot in slots {
                    println!("       {}: {} - {}", slot.day, slot.start_time, slot.end_time);
                }
            }
            Some(_) => println!("       No available slots"),
            None => println!("       No availability data"),
        }
    }
    println!();
}

fn print_profile(app: &App) {
    match app.profile() {
        Some(profile) => {
            println!("{}", profile.display_name);
            println!("User ID: {}", profile.id);
            if !profile.profile_picture.is_empty() {
                println!("Picture: {}", profile.profile_picture);
            }
        }
        None => println!("Not signed in."),
    }
}

fn settings_flow(app: &mut App) -> Result<()> {
    let mut settings = app.load_settings();
    println!("Contact details (enter to keep current):");
    prompt_field("Country code", &mut settings.country_code)?;
    prompt_field("Country", &mut settings.country)?;
    prompt_field("State", &mut settings.state)?;
    prompt_field("City", &mut settings.city)?;
    prompt_field("Phone", &mut settings.phone)?;
    prompt_field("Alternate phone", &mut settings.alt_phone)?;
    app.save_settings(&settings);
    Ok(())
}

fn prompt_field(label: &str, value: &mut String) -> Result<()> {
    print!("  {} [{}]: ", label, value);
    io::stdout().flush()?;
    if let Some(input) = read_line()? {
        let input = input.trim();
        if !input.is_empty() {
            *value = input.to_string();
        }
    }
    Ok(())
}

fn print_notice(app: &mut App) {
    if let Some(notice) = app.take_notice() {
        match notice.kind {
            NoticeKind::Success | NoticeKind::Info => println!("{}", notice.text),
            NoticeKind::Error => println!("Error: {}", notice.text),
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  list       reload and show the doctor directory");
    println!("  fav <n>    toggle favorite for doctor <n>");
    println!("  profile    show the signed-in profile");
    println!("  settings   edit contact details");
    println!("  logout     sign out");
    println!("  quit       exit");
}

/// Read one line from stdin; `None` on EOF.
fn read_line() -> Result<Option<String>> {
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}
