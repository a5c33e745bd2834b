// ABOUTME: Demo walkthrough for gatekeeper-cli
// ABOUTME: Lists users through the admin client, then checks one password if asked to

use anyhow::Result;
use gatekeeper_driver::models::UserId;
use gatekeeper_driver::{DriverConfig, ResilientAdminClient};
use tracing::info;

use crate::helpers::display::display_users;

/// List users, then run a simple authentication for `auth` if given
pub async fn run(config: &DriverConfig, auth: Option<(UserId, String)>) -> Result<()> {
    let admin = ResilientAdminClient::from_config(config)?;

    let users = admin.list_users().await?;
    display_users(&users);

    if let Some((user_id, password)) = auth {
        let authenticated = admin
            .client()
            .simple_authentication(user_id, &password)
            .await?;
        info!(user_id, authenticated, "Simple authentication result");
        println!(
            "User {user_id}: {}",
            if authenticated {
                "authenticated"
            } else {
                "not authenticated"
            }
        );
    }
    Ok(())
}
