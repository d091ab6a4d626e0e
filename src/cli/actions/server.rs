use crate::cli::{actions::Action, globals::GlobalArgs};
use crate::foyer;
use anyhow::{anyhow, Result};
use secrecy::ExposeSecret;
use url::Url;

/// Handle the server action
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::Server { port, dsn } => {
            let mut dsn = Url::parse(&dsn)?;

            // Password from the environment wins over the one embedded in the DSN
            if let Some(password) = &globals.db_password {
                dsn.set_password(Some(password.expose_secret()))
                    .map_err(|()| anyhow!("Error setting password"))?;
            }

            foyer::new(port, dsn.to_string()).await?;
        }
    }

    Ok(())
}
