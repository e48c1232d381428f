//! Startup bootstrapping: the initial admin account.

use std::sync::Arc;

use tracing::{info, warn};

use meeplelog_auth::{User, UserStorage, password::hash_password};

use crate::config::BootstrapConfig;

/// Creates the configured admin user if it does not exist yet.
///
/// A partially-filled bootstrap section is ignored with a warning rather
/// than failing startup.
pub async fn ensure_admin_user(
    users: &Arc<dyn UserStorage>,
    bootstrap: &BootstrapConfig,
) -> anyhow::Result<()> {
    let (Some(name), Some(email), Some(password)) = (
        bootstrap.admin_name.as_deref(),
        bootstrap.admin_email.as_deref(),
        bootstrap.admin_password.as_deref(),
    ) else {
        if bootstrap.admin_name.is_some()
            || bootstrap.admin_email.is_some()
            || bootstrap.admin_password.is_some()
        {
            warn!("Incomplete bootstrap.admin_* configuration; skipping admin creation");
        }
        return Ok(());
    };

    if users.find_by_name(name, true).await?.is_some() {
        return Ok(());
    }

    let mut admin = User::new(name, email, hash_password(password)?);
    admin.is_admin = true;
    users.create(&admin).await?;

    info!(user = %name, "Bootstrap admin user created");
    Ok(())
}
