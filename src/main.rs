//! CLI entry point for the avatar downloader.

use std::process::ExitCode;

use anyhow::Result;

mod app;
mod app_config;
mod cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let exit = app::runtime::run_downloader().await?;
    Ok(exit.into())
}
