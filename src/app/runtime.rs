use std::io::{self, IsTerminal};
use std::sync::Arc;

use anyhow::{Context, Result};
use avatar_downloader::report::{self, NO_INPUT_MESSAGE};
use avatar_downloader::{AvatarTaskConfig, DownloadEngine, HttpClient, aggregate, parse_input};
use tracing::{debug, info};

use crate::app::config_manager;
use crate::app::exit_handler::{self, ProcessExit};
use crate::app::progress_manager::ProgressReporter;
use crate::app::terminal;

pub(crate) async fn run_downloader() -> Result<ProcessExit> {
    let (args, cli_sources) = config_manager::parse_cli_with_sources();

    let no_color = terminal::is_no_color_requested(&args);
    terminal::init_tracing(terminal::default_log_level(args.quiet, args.verbose), no_color);

    let resolved = config_manager::resolve_config(args, &cli_sources)?;
    let args = &resolved.args;
    debug!(?args, "CLI arguments resolved");
    info!("Avatar downloader starting");

    tokio::fs::create_dir_all(&args.output_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create output directory '{}'",
                args.output_dir.display()
            )
        })?;

    let input_text = tokio::fs::read_to_string(&args.input_file)
        .await
        .with_context(|| format!("Failed to read input file '{}'", args.input_file.display()))?;

    let parsed = parse_input(&input_text);
    if parsed.is_empty() {
        println!("{NO_INPUT_MESSAGE}");
        return Ok(ProcessExit::NoInput);
    }

    let threads = usize::from(args.threads);
    println!(
        "{}",
        report::startup_line(parsed.len(), threads, parsed.bad_lines)
    );

    let engine = DownloadEngine::new(threads)?;
    let config = Arc::new(AvatarTaskConfig {
        output_root: args.output_dir.clone(),
        endpoints: resolved.endpoints.clone(),
        render: resolved.render.clone(),
        timeout: resolved.timeout,
    });

    let show_bar = terminal::should_show_progress(
        io::stderr().is_terminal(),
        args.quiet,
        terminal::is_dumb_terminal(),
    );
    let progress = ProgressReporter::new(show_bar, parsed.len());

    let results = engine.dispatch(parsed.ids, HttpClient::new(), config);
    let summary = aggregate(results, |result| {
        progress.line(&report::progress_line(result));
    })
    .await;
    progress.finish();

    println!();
    println!("{summary}");

    Ok(exit_handler::determine_exit_outcome(summary.status()))
}
