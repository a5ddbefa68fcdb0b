//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use avatar_downloader::{CameraMode, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};
use avatar_downloader::avatar::{DEFAULT_BACKGROUND, MAX_RENDER_SIZE};
use clap::{Parser, ValueEnum};

/// Bulk-download avatar models and their rendered pose previews.
///
/// Reads one avatar ID per line from INPUT_FILE and stores, per avatar,
/// the GLB model plus four PNG pose renders under OUTPUT_DIR/<id>/.
/// Files that already exist are skipped, so an interrupted run can simply
/// be repeated.
#[derive(Parser, Debug)]
#[command(name = "avatar-downloader")]
#[command(author, version, about)]
pub struct Args {
    /// Text file with one avatar ID per line (optionally suffixed with .glb)
    pub input_file: PathBuf,

    /// Directory that receives one subdirectory per avatar
    pub output_dir: PathBuf,

    /// Maximum avatars processed concurrently (1-64)
    #[arg(short = 't', long, default_value_t = DEFAULT_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=64))]
    pub threads: u8,

    /// Preview edge length in pixels (clamped to 1-1024)
    #[arg(long, default_value_t = i64::from(MAX_RENDER_SIZE), allow_negative_numbers = true)]
    pub size: i64,

    /// Camera framing for previews
    #[arg(long, value_enum, default_value_t = CameraArg::Portrait)]
    pub camera: CameraArg,

    /// Preview background color as "R,G,B"
    #[arg(long, default_value = DEFAULT_BACKGROUND)]
    pub background: String,

    /// Per-request timeout in seconds (1-3600)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub timeout: u64,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress logs below error and hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored log output
    #[arg(long)]
    pub no_color: bool,

    /// Override the model service base URL
    #[arg(long, hide = true, env = "AVATAR_DOWNLOADER_MODEL_BASE_URL")]
    pub model_base_url: Option<String>,

    /// Override the render service base URL
    #[arg(long, hide = true, env = "AVATAR_DOWNLOADER_RENDER_BASE_URL")]
    pub render_base_url: Option<String>,
}

/// Camera framing accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CameraArg {
    Portrait,
    Fullbody,
    Fit,
}

impl From<CameraArg> for CameraMode {
    fn from(value: CameraArg) -> Self {
        match value {
            CameraArg::Portrait => Self::Portrait,
            CameraArg::Fullbody => Self::Fullbody,
            CameraArg::Fit => Self::Fit,
        }
    }
}

impl From<CameraMode> for CameraArg {
    fn from(value: CameraMode) -> Self {
        match value {
            CameraMode::Portrait => Self::Portrait,
            CameraMode::Fullbody => Self::Fullbody,
            CameraMode::Fit => Self::Fit,
        }
    }
}
