mod bundle;
mod cli;
mod infra;
mod routes;
mod server;

use food_audit::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
