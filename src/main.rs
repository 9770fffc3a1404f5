use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};

use rollcall::api::{self, AppState};
use rollcall::auth::StaticTokenProvider;
use rollcall::config::Config;
use rollcall::logger;
use rollcall::service::RollcallService;
use rollcall::storage::Database;

const USAGE: &str = "Usage: rollcall [--config <path>] [--generate-config [<path>]]";

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let mut config_path: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config needs a path")?;
                config_path = Some(PathBuf::from(path));
            }
            "--generate-config" => {
                let path = match args.next() {
                    Some(path) => PathBuf::from(path),
                    None => Config::get_default_config_path()?,
                };
                return Config::generate_default_config(path);
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                return Ok(());
            }
            other => anyhow::bail!("Unknown argument '{}'\n{}", other, USAGE),
        }
    }

    let config = Config::load(config_path.as_deref())?;
    logger::init(&config.logging)?;

    let database = Database::connect(&config.database)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.url))?;
    database.seed_roles(config.rules.default_allowed_absences).await?;

    if config.auth.tokens.is_empty() {
        warn!("No auth tokens configured; every request will be rejected");
    }
    if !database.has_users().await? && config.auth.admin_emails.is_empty() {
        warn!("No users yet and no admin_emails configured; nobody will be able to administer");
    }

    let service = RollcallService::new(database, &config);
    let identity = Arc::new(StaticTokenProvider::from_config(&config.auth));

    info!("Starting Rollcall on {}", config.bind_address());
    api::serve(&config.server, AppState::new(service, identity)).await
}
