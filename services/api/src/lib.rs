mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use remote_jobs::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
