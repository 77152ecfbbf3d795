mod cli;
mod commands;
mod infra;
mod render;

use readiness::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
