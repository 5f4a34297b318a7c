//! Session command handlers.

use crate::app::App;
use anyhow::bail;
use portal_gateway::LoginRequest;
use portal_session::SessionError;
use portal_types::{Profile, Role};

fn print_profile(profile: &Profile) {
    println!("Logged in as {} ({})", profile.display_name(), profile.role());
    match profile {
        Profile::User(user) => {
            println!("  IC number:  {}", user.ic_number);
            println!("  Blood type: {}", user.blood_type);
            println!(
                "  Eligible:   {}",
                if user.is_eligible { "yes" } else { "no" }
            );
        }
        Profile::Organiser(organiser) => {
            if let Some(organisation) = &organiser.organisation {
                println!("  Organisation: {organisation}");
            }
            println!("  Email: {}", organiser.email);
        }
        Profile::Facility(facility) => {
            println!("  Address: {}", facility.address);
            println!("  Email:   {}", facility.email);
        }
        Profile::Admin(admin) => {
            println!("  Email: {}", admin.email);
        }
    }
}

/// Handle `hemolink login`.
pub async fn login(
    app: &App,
    role: Role,
    ic: Option<String>,
    email: Option<String>,
    password: String,
) -> anyhow::Result<()> {
    let request = match role {
        Role::User => {
            let Some(ic_number) = ic else {
                bail!("--ic is required for the user role");
            };
            LoginRequest::User { ic_number, password }
        }
        Role::Organiser | Role::Facility | Role::Admin => {
            let Some(email) = email else {
                bail!("--email is required for the {role} role");
            };
            match role {
                Role::Organiser => LoginRequest::Organiser { email, password },
                Role::Facility => LoginRequest::Facility { email, password },
                _ => LoginRequest::Admin { email, password },
            }
        }
    };

    match app.manager.login(request).await {
        Ok(profile) => {
            print_profile(&profile);
            Ok(())
        }
        Err(SessionError::Gateway(err)) if err.is_field_error() => {
            bail!("Login failed: {err}");
        }
        Err(err) => Err(err.into()),
    }
}

/// Handle `hemolink status`.
pub async fn status(app: &App) -> anyhow::Result<()> {
    if let Err(err) = app.manager.bootstrap().await {
        tracing::warn!(error = %err, "Session resolution failed");
    }

    let snapshot = app.manager.snapshot();
    println!("Status: {:?}", snapshot.status);
    if let Some(profile) = &snapshot.profile {
        print_profile(profile);
    }
    if let Some(err) = &snapshot.last_error {
        println!("Last error: {err}");
    }
    Ok(())
}

/// Handle `hemolink refresh`.
pub async fn refresh(app: &App) -> anyhow::Result<()> {
    app.manager.refresh().await?;
    let snapshot = app.manager.snapshot();
    println!("Status: {:?}", snapshot.status);
    if let Some(profile) = &snapshot.profile {
        print_profile(profile);
    }
    Ok(())
}

/// Handle `hemolink logout` / `hemolink logout-all`.
pub async fn logout(app: &App, all_devices: bool) -> anyhow::Result<()> {
    let result = if all_devices {
        app.manager.logout_all().await
    } else {
        app.manager.logout().await
    };

    // Local credentials are cleared either way; a server failure only
    // means the refresh token could not be invalidated remotely.
    match result {
        Ok(()) => println!("Logged out."),
        Err(err) => println!("Logged out locally; server-side logout failed: {err}"),
    }
    Ok(())
}
