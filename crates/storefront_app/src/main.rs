mod cli;
mod commands;
mod config;
mod effects;
mod render;
mod session;

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use engine_logging::engine_info;
use listing_engine::EngineHandle;

use crate::cli::Cli;
use crate::commands::parse_command;
use crate::config::load_config;
use crate::effects::EffectRunner;
use crate::session::{Outcome, Session};

const LOG_FILENAME: &str = "./storefront.log";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (mut config, source) = load_config(&cli.config)?;
    config.apply_env();
    cli.apply_to(&mut config);

    let level = config.level_filter()?;
    engine_logging::initialize(config.log_destination.into(), level, Path::new(LOG_FILENAME));
    source.log();
    engine_info!("Using listings API at {}", config.api_base_url);

    let engine = EngineHandle::new(&config.api_base_url, config.fetch_settings())
        .context("failed to start listing engine")?;
    // Outlasts the request timeout so a hung fetch still reports back.
    let wait = Duration::from_millis(config.request_timeout_ms) + Duration::from_secs(1);
    let mut session = Session::new(
        config.mode.into(),
        config.viewport_width,
        EffectRunner::new(engine),
        wait,
    );

    println!("{}", session.open());
    run_prompt(&mut session)
}

fn run_prompt(session: &mut Session) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(command) => match session.execute(command) {
                Outcome::Continue(text) => println!("{text}"),
                Outcome::Quit => return Ok(()),
            },
            Err(err) => println!("{err}"),
        }
    }
}
