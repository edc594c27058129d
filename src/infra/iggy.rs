use anyhow::{Context, Result};
use iggy::clients::client::IggyClient;
use iggy::prelude::*;
use std::sync::Arc;

use crate::app_config::AppConfig;

pub async fn connect_iggy(config: &AppConfig) -> Result<Arc<IggyClient>> {
    let client = IggyClient::from_connection_string(&config.connection_string())
        .context("Invalid Iggy connection string")?;
    client
        .connect()
        .await
        .with_context(|| format!("Failed to connect to Iggy at {}", config.server_address))?;
    client
        .login_user(&config.username, &config.password)
        .await
        .context("Failed to log in to Iggy")?;

    Ok(Arc::new(client))
}
