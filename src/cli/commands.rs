//! CLI command implementations

use anyhow::{Context, Result};
use dialoguer::Password;
use std::fs;
use std::sync::Arc;

use crate::api::records::Record;
use crate::auth::User;
use crate::cli::{
    error, info, print_record_detail, print_record_table, print_user_detail, print_user_table,
    success, warn, EquipmentAction, OutputFormat, UsersAction,
};
use crate::client::{Dashboard, LogNavigator};
use crate::config::{self, Config};
use crate::error::Error;

/// Initialize a new admindash.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new(config::loader::CONFIG_FILENAME);

    if config_path.exists() {
        warn("admindash.toml already exists");
        return Ok(());
    }

    fs::write(config_path, config::loader::default_config_content())?;

    success("Created admindash.toml");
    info("Add a [[users]] entry (see 'admindash hash-password') and run 'admindash serve'");

    Ok(())
}

/// Start the API server
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = config::load_config_or_default()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting admindash on http://{}:{}", host, port));
    crate::api::run_server(config, &host, port).await?;
    Ok(())
}

/// Print a bcrypt hash for a config-declared account
pub async fn hash_password(password: Option<String>) -> Result<()> {
    let config = config::load_config_or_default()?;
    let password = match password {
        Some(p) => p,
        None => prompt_password(true)?,
    };

    let hash = bcrypt::hash(password, config.auth.bcrypt_cost).context("Failed to hash password")?;
    println!("{}", hash);
    Ok(())
}

pub async fn login(email: &str, password: Option<String>) -> Result<()> {
    let dashboard = dashboard()?;
    let password = match password {
        Some(p) => p,
        None => prompt_password(false)?,
    };

    match dashboard.auth.login(email, &password).await {
        Ok(user) => {
            success(&format!("Signed in as {}", user.email));
            Ok(())
        }
        Err(Error::InvalidCredentials(message)) => {
            error(&message);
            Err(anyhow::anyhow!("login failed"))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn register(fullname: &str, email: &str, password: Option<String>) -> Result<()> {
    let dashboard = dashboard()?;
    let password = match password {
        Some(p) => p,
        None => prompt_password(true)?,
    };

    match dashboard.auth.register(fullname, email, &password, &password).await {
        Ok(user) => {
            success(&format!("Registered and signed in as {}", user.email));
            Ok(())
        }
        Err(Error::Validation(message)) | Err(Error::Conflict(message)) => {
            error(&message);
            Err(anyhow::anyhow!("registration failed"))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn me() -> Result<()> {
    let dashboard = dashboard()?;
    match dashboard.start().await? {
        Some(user) => print_user_detail(&user),
        None => info("Not signed in. Run 'admindash login --email <email>'"),
    }
    Ok(())
}

pub async fn logout() -> Result<()> {
    let dashboard = dashboard()?;
    dashboard.auth.sign_out();
    success("Signed out");
    Ok(())
}

pub async fn equipment(action: EquipmentAction) -> Result<()> {
    let Some(dashboard) = signed_in_dashboard().await? else {
        return Ok(());
    };
    let api = &dashboard.api;

    let outcome = match action {
        EquipmentAction::List { format } => api
            .get_json::<Vec<Record>>("/api/equipment")
            .await
            .and_then(|records| {
                match format {
                    OutputFormat::Table => print_record_table(&records),
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
                }
                Ok(())
            }),
        EquipmentAction::Show { id } => api
            .get_json::<Record>(&format!("/api/equipment/{}", id))
            .await
            .map(|record| print_record_detail(&record)),
        EquipmentAction::Add { data } => {
            let data = parse_object(&data)?;
            api.post_json::<_, Record>("/api/equipment", &data)
                .await
                .map(|record| success(&format!("Created equipment {}", record.id)))
        }
        EquipmentAction::Update { id, data } => {
            let data = parse_object(&data)?;
            api.put_json::<_, Record>(&format!("/api/equipment/{}", id), &data)
                .await
                .map(|record| success(&format!("Updated equipment {}", record.id)))
        }
        EquipmentAction::Remove { id } => api
            .delete_json::<Record>(&format!("/api/equipment/{}", id))
            .await
            .map(|record| success(&format!("Deleted equipment {}", record.id))),
    };

    report(outcome)
}

pub async fn users(action: UsersAction) -> Result<()> {
    let Some(dashboard) = signed_in_dashboard().await? else {
        return Ok(());
    };
    let api = &dashboard.api;

    let outcome = match action {
        UsersAction::List { format } => {
            api.get_json::<Vec<User>>("/api/users")
                .await
                .and_then(|users| {
                    match format {
                        OutputFormat::Table => print_user_table(&users),
                        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&users)?),
                    }
                    Ok(())
                })
        }
        UsersAction::Remove { id } => api
            .delete_json::<User>(&format!("/api/users/{}", id))
            .await
            .map(|user| success(&format!("Deleted user {}", user.email))),
    };

    report(outcome)
}

// Helper functions

fn dashboard() -> Result<Dashboard> {
    let config: Config = config::load_config_or_default()?;
    Ok(Dashboard::from_config(&config.client, Arc::new(LogNavigator)))
}

/// Restore the session and run the route guard before a protected command
async fn signed_in_dashboard() -> Result<Option<Dashboard>> {
    let dashboard = dashboard()?;
    dashboard.start().await?;

    if !dashboard.guard.can_activate() {
        warn("Not signed in. Run 'admindash login --email <email>'");
        return Ok(None);
    }
    Ok(Some(dashboard))
}

/// Print API failures inline; auth failures point back at login
fn report(outcome: crate::error::Result<()>) -> Result<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(e) if e.is_unauthorized() => {
            warn("Session is no longer valid. Run 'admindash login --email <email>'");
            Err(e.into())
        }
        Err(e) => {
            error(&e.to_string());
            Err(e.into())
        }
    }
}

fn parse_object(data: &str) -> Result<serde_json::Value> {
    let value: serde_json::Value = serde_json::from_str(data).context("Data must be valid JSON")?;
    if !value.is_object() {
        anyhow::bail!("Data must be a JSON object");
    }
    Ok(value)
}

fn prompt_password(confirm: bool) -> Result<String> {
    let prompt = Password::new().with_prompt("Password");
    let prompt = if confirm {
        prompt.with_confirmation("Confirm password", "Passwords do not match")
    } else {
        prompt
    };
    Ok(prompt.interact()?)
}
