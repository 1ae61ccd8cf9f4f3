use anyhow::{bail, Result};
use intervu_core::session::{AuthState, SessionConfig, SessionManager};
use intervu_core::user::UserRole;
use intervu_infrastructure::{JsonFileSessionStore, SeededUserDirectory};
use std::sync::Arc;

/// Builds the session manager over the on-disk store and demo directory.
pub fn session_manager() -> Result<SessionManager> {
    let store = JsonFileSessionStore::default_location()?;
    Ok(SessionManager::new(
        Arc::new(store),
        Arc::new(SeededUserDirectory::with_demo_accounts()),
        SessionConfig::default(),
    ))
}

pub async fn login(email: &str, password: &str, continue_to: Option<&str>) -> Result<()> {
    let manager = session_manager()?;
    manager.bootstrap().await;

    println!("🔐 Signing in...");
    match manager.login(email, password).await {
        Ok(session) => {
            println!("✅ Welcome back, {}!", session.display_name);
            // Round-trip of the location the access gate remembered.
            if let Some(location) = continue_to {
                println!("➡️  Continue to {}", location);
            }
            Ok(())
        }
        Err(err) if err.is_invalid_credentials() => {
            bail!("Invalid email or password")
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn register(name: &str, email: &str, password: &str) -> Result<()> {
    let manager = session_manager()?;
    manager.bootstrap().await;

    println!("📝 Creating account...");
    match manager.register(name, email, password).await {
        Ok(session) => {
            println!("✅ Account created. Welcome, {}!", session.display_name);
            Ok(())
        }
        Err(err) if err.is_email_taken() => {
            bail!("An account with email '{}' already exists", email)
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn logout() -> Result<()> {
    let manager = session_manager()?;
    manager.bootstrap().await;
    manager.logout().await?;
    println!("👋 Signed out");
    Ok(())
}

pub async fn whoami() -> Result<()> {
    let manager = session_manager()?;
    match manager.bootstrap().await {
        AuthState::Authenticated(session) => {
            println!("👤 {} <{}>", session.display_name, session.email);
            if session.role == UserRole::Admin {
                println!("   role: admin");
            }
        }
        _ => println!("Not signed in. Try: intervu login alex@example.com password123"),
    }
    Ok(())
}
