//! Configuration lifecycle: load file config, merge CLI, resolve endpoints and render settings.

use std::time::Duration;

use anyhow::{Context, Result};
use avatar_downloader::avatar::{DEFAULT_MODEL_BASE_URL, DEFAULT_RENDER_BASE_URL};
use avatar_downloader::{RenderParams, ServiceEndpoints};
use clap::{ArgMatches, CommandFactory, FromArgMatches, parser::ValueSource};
use tracing::debug;

use crate::app_config::{FileConfig, load_default_file_config};
use crate::cli::Args;

/// Which settings were given explicitly on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CliValueSources {
    pub(crate) threads: bool,
    pub(crate) size: bool,
    pub(crate) camera: bool,
    pub(crate) background: bool,
    pub(crate) timeout: bool,
    pub(crate) model_base_url: bool,
    pub(crate) render_base_url: bool,
}

/// Resolved configuration bundle handed to the runtime.
pub(crate) struct ResolvedConfig {
    pub(crate) args: Args,
    pub(crate) endpoints: ServiceEndpoints,
    pub(crate) render: RenderParams,
    pub(crate) timeout: Duration,
}

pub(crate) fn parse_cli_with_sources() -> (Args, CliValueSources) {
    let matches = Args::command().get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    let sources = cli_value_sources(&matches);
    (args, sources)
}

fn cli_value_sources(matches: &ArgMatches) -> CliValueSources {
    CliValueSources {
        threads: is_commandline_value(matches, "threads"),
        size: is_commandline_value(matches, "size"),
        camera: is_commandline_value(matches, "camera"),
        background: is_commandline_value(matches, "background"),
        timeout: is_commandline_value(matches, "timeout"),
        // An environment override counts as explicit too.
        model_base_url: is_explicit_value(matches, "model_base_url"),
        render_base_url: is_explicit_value(matches, "render_base_url"),
    }
}

fn is_commandline_value(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

fn is_explicit_value(matches: &ArgMatches, id: &str) -> bool {
    matches!(
        matches.value_source(id),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

/// Fills every setting the user did not pass explicitly from the config file.
pub(crate) fn apply_config_defaults(
    mut args: Args,
    cli_sources: &CliValueSources,
    file_config: Option<&FileConfig>,
) -> Args {
    let Some(file_config) = file_config else {
        return args;
    };

    if !cli_sources.threads
        && let Some(threads) = file_config.threads
    {
        args.threads = threads;
    }

    if !cli_sources.size
        && let Some(size) = file_config.size
    {
        args.size = size;
    }

    if !cli_sources.camera
        && let Some(camera) = file_config.camera
    {
        args.camera = camera.into();
    }

    if !cli_sources.background
        && let Some(background) = &file_config.background
    {
        args.background.clone_from(background);
    }

    if !cli_sources.timeout
        && let Some(timeout) = file_config.timeout
    {
        args.timeout = timeout;
    }

    if !cli_sources.model_base_url
        && let Some(url) = &file_config.model_base_url
    {
        args.model_base_url = Some(url.clone());
    }

    if !cli_sources.render_base_url
        && let Some(url) = &file_config.render_base_url
    {
        args.render_base_url = Some(url.clone());
    }

    args
}

/// Builds the per-run settings from merged arguments.
pub(crate) fn finalize(args: Args) -> Result<ResolvedConfig> {
    let endpoints = ServiceEndpoints::new(
        args.model_base_url.as_deref().unwrap_or(DEFAULT_MODEL_BASE_URL),
        args.render_base_url
            .as_deref()
            .unwrap_or(DEFAULT_RENDER_BASE_URL),
    )
    .context("Invalid service base URL")?;
    let render = RenderParams::new(args.size, args.camera.into(), args.background.clone());
    let timeout = Duration::from_secs(args.timeout);

    Ok(ResolvedConfig {
        args,
        endpoints,
        render,
        timeout,
    })
}

/// Load file config, merge CLI overrides, and resolve run settings.
pub(crate) fn resolve_config(args: Args, cli_sources: &CliValueSources) -> Result<ResolvedConfig> {
    let loaded = load_default_file_config()?;
    if let (Some(path), Some(_)) = (&loaded.path, &loaded.config) {
        debug!(path = %path.display(), "loaded config file");
    }
    let args = apply_config_defaults(args, cli_sources, loaded.config.as_ref());
    finalize(args)
}
