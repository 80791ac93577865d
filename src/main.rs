//! redlog - log stdin lines in Redis log format
//!
//! Usage:
//!   redlog [--level L] [--app C] [--tag C]   Log each stdin line at Notice
//!   redlog --raft                            Parse stdin as Raft library output
//!   redlog --dedup                           Drop identical consecutive lines
//!   redlog colorize                          Color already formatted lines

use anyhow::{Context, Result};
use clap::Parser;
use redlog::cli::{Cli, Command};
use redlog::config::{self, parse_app_tag, Config, FilterKind};
use redlog::diagnostics::init_tracing;
use redlog::{colorize, Logger, RedlogError, Sink};
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Command::Colorize) => run_colorize(),
        None => run_logger(&cli),
    }
}

fn run_colorize() -> Result<()> {
    let mut sink = colorize(Sink::stdout()).map_err(|e| RedlogError::Runtime { source: e })?;
    io::copy(&mut io::stdin().lock(), &mut sink).context("Failed to relay stdin")?;
    sink.flush()?;
    Ok(())
}

fn run_logger(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    tracing::debug!(?config, "Effective configuration");

    let mut sink = Sink::stdout();
    if config.output.colorize {
        sink = colorize(sink).map_err(|e| RedlogError::Runtime { source: e })?;
    }

    let root = Logger::new(sink, config.options()?);
    let log = match &cli.tag {
        Some(tag) => root.child(parse_app_tag(tag)?),
        None => root.clone(),
    };

    let raw = config.logger.filter == FilterKind::Raft;
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        if raw {
            (&log).write_all(line.as_bytes())?;
        } else {
            log.notice(&line);
        }
    }
    (&log).flush()?;
    Ok(())
}

/// Config file (if any) with command-line overrides applied
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => config::load(path)?,
        None => Config::default(),
    };

    if let Some(level) = cli.level {
        config.logger.level = level;
    }
    if let Some(app) = &cli.app {
        config.logger.app = app.clone();
    }
    if cli.raft {
        config.logger.filter = FilterKind::Raft;
    }
    if cli.dedup {
        config.logger.duplicate_suppression = true;
    }
    config.validate()?;
    Ok(config)
}
