//! Session commands: login, logout, whoami.

use storekeep_admin::config::DashboardConfig;
use storekeep_admin::session::SessionStore;

fn session_store() -> Result<SessionStore, Box<dyn std::error::Error>> {
    let config = DashboardConfig::from_env()?;
    Ok(SessionStore::new(&config.data_dir))
}

/// Start a session.
#[allow(clippy::print_stdout)]
pub fn login(username: &str, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let session = session_store()?.login(username, password)?;
    println!(
        "Logged in as {} (session valid until {})",
        session.username,
        session.expires_at.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}

/// End the current session.
#[allow(clippy::print_stdout)]
pub fn logout() -> Result<(), Box<dyn std::error::Error>> {
    session_store()?.logout()?;
    println!("Logged out");
    Ok(())
}

/// Show the current session, if any.
#[allow(clippy::print_stdout)]
pub fn whoami() -> Result<(), Box<dyn std::error::Error>> {
    match session_store()?.current() {
        Some(session) => println!("{}", session.username),
        None => println!("Not logged in"),
    }
    Ok(())
}
