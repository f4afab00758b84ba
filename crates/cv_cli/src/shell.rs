use std::path::PathBuf;

use cv_core::{Profile, Result};
use cv_render::Resume;
use cv_scraper::{LoginStatus, ProfileScraper, Session};

use crate::prompt;

const SLUG_HINT: &str =
    r#"Set a profile slug first, e.g. "johndoe" from https://linkedin.com/in/johndoe"#;

/// Run the two-stage shell. The browser session is released exactly once on
/// the way out, whatever stage the user leaves from.
pub async fn run(mut session: Session) -> Result<()> {
    if login_stage(&mut session).await? {
        scrape_stage(&mut session).await?;
    }
    session.terminate().await
}

/// Stage one: credential entry. Only a successful login advances; failure
/// and verification re-prompt, EOF aborts.
async fn login_stage(session: &mut Session) -> Result<bool> {
    loop {
        let username = match prompt::read_line("Username: ")? {
            Some(username) if !username.is_empty() => username,
            Some(_) => continue,
            None => return Ok(false),
        };
        let password = match prompt::read_password("Password: ")? {
            Some(password) => password,
            None => return Ok(false),
        };
        match session.login(&username, &password).await? {
            LoginStatus::Success => {
                println!("Login successful");
                return Ok(true);
            }
            LoginStatus::Verify => println!(
                "Verification required: complete the challenge in the browser window, then log in again"
            ),
            LoginStatus::Fail => println!("Login failed"),
        }
    }
}

/// Stage two: slug entry, scrape and export triggers.
async fn scrape_stage(session: &mut Session) -> Result<()> {
    let mut profile: Option<Profile> = None;
    print_help();

    loop {
        let line = match prompt::read_line("> ")? {
            Some(line) => line,
            None => return Ok(()),
        };
        let (command, rest) = split_command(&line);
        match command {
            "" => {}
            "slug" => {
                if rest.is_empty() {
                    println!("usage: slug <slug>");
                } else {
                    let target = Profile::new(rest);
                    println!("Target profile: {}", target.url);
                    profile = Some(target);
                }
            }
            "scrape" => match profile.as_mut() {
                Some(profile) => match ProfileScraper::new(session).scrape(profile).await {
                    Ok(()) => println!(
                        "Successfully scraped profile: {} ({} entries)",
                        profile.name,
                        profile.entries.len()
                    ),
                    Err(e) => println!("Scrape failed: {}", e),
                },
                None => println!("{}", SLUG_HINT),
            },
            "export" => export(profile.as_ref())?,
            "dump" => dump(profile.as_ref(), rest)?,
            "help" => print_help(),
            "quit" | "exit" => return Ok(()),
            other => println!("Unknown command: {} (try help)", other),
        }
    }
}

/// Export prompts for a destination path; an empty path is a user-visible
/// validation failure, not an error.
fn export(profile: Option<&Profile>) -> Result<()> {
    let profile = match profile {
        Some(profile) => profile,
        None => {
            println!("{}", SLUG_HINT);
            return Ok(());
        }
    };
    let path = match prompt::read_line("Save as (.docx): ")? {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => {
            println!("Invalid save path");
            return Ok(());
        }
    };
    match Resume::new(profile).save(&path) {
        Ok(()) => println!("Successfully generated CV at {}", path.display()),
        Err(e) => println!("Failed to generate CV: {}", e),
    }
    Ok(())
}

fn dump(profile: Option<&Profile>, path: &str) -> Result<()> {
    let profile = match profile {
        Some(profile) => profile,
        None => {
            println!("{}", SLUG_HINT);
            return Ok(());
        }
    };
    if path.is_empty() {
        println!("usage: dump <path>");
        return Ok(());
    }
    let json = serde_json::to_string_pretty(profile)?;
    std::fs::write(path, json)?;
    println!("Profile written to {}", path);
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  slug <slug>   set the target profile");
    println!("  scrape        scrape the target profile");
    println!("  export        generate a resume document");
    println!("  dump <path>   write the scraped profile as JSON");
    println!("  help          show this help");
    println!("  quit          release the session and exit");
}

fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    }
}
