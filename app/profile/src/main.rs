//! Profile app entry point
//!
//! Wires configuration, logging, and the gateway together, signs in when
//! credentials are supplied, and renders the profile screen to stdout.

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod screen;

use common::config::BackendConfig;
use gateway::{BackendClient, Gateway};
use screen::ProfileScreen;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting profile app");

    let config = BackendConfig::from_env();
    let client = BackendClient::new(config);
    let gateway = Gateway::new(client);

    // Sign in when credentials are supplied; otherwise the screen shows
    // the signed-out state.
    if let (Ok(email), Ok(password)) = (
        std::env::var("REELSHARE_EMAIL"),
        std::env::var("REELSHARE_PASSWORD"),
    ) {
        gateway.sign_in(&email, &password).await?;
    }

    let screen = ProfileScreen::new(gateway);
    screen.load().await?;

    println!("{}", screen::render(&screen.snapshot()));

    Ok(())
}
