//! Token command - Issues a bearer token for an existing account.

use crate::cli::args::TokenArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

/// Execute the token command
pub async fn execute(args: TokenArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let services = Services::from_connection(db.get_connection(), config);
    let token = services.credentials().issue_token(args.account_id).await?;
    tracing::info!(account_id = %args.account_id, "Token issued");

    println!("{}", token.access_token);
    Ok(())
}
