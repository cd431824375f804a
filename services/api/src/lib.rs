mod cli;
mod infra;
mod render;
mod routes;
mod server;

use roster_desk::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
