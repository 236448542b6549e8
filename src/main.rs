// #![forbid(unsafe_code)]
// #![deny(non_upper_case_globals)]
// #![deny(non_camel_case_types)]
// #![deny(non_snake_case)]
// #![deny(unused_mut)]
// #![deny(unused_variables)]
// #![deny(dead_code)]
// #![deny(unused_imports)]
//#![deny(missing_docs)]
//#![deny(warnings)]

extern crate chrono;
extern crate derivative;
extern crate serde_derive;

#[macro_use]
extern crate log;

mod app;
mod configuration;
mod reporter;

use log::LevelFilter;
use signal_hook::{iterator::Signals, SIGINT};
use std::io;
use std::{path::PathBuf, process::exit, thread};
use structopt::StructOpt;

use self::app::{
    engine::{CommandEngine, ExecutionEngine, RecordedEngine},
    error::Error,
    profile::{self, default_profiles, Profile, Selection},
    telemetry::SystemTelemetry,
    App,
};
use self::configuration::{
    command_line::{LogLevel, Opt},
    constants::common::SIGINT_EXIT_CODE,
    settings::Settings,
};
use self::reporter::console::ConsoleRenderer;

#[tokio::main]
async fn main() {
    let options = Opt::from_args();

    match Signals::new(&[SIGINT]) {
        Ok(signals) => {
            thread::spawn(move || {
                for sig in signals.forever() {
                    info!("Received signal {:?}, stopping", sig);
                    exit(SIGINT_EXIT_CODE);
                }
            });
        }
        Err(e) => eprintln!("Cannot register signal handler: {}", e),
    }

    init_logging(
        options.logging.unwrap_or(LogLevel::Warn).into(),
        &options.log_output_file,
    );
    if options.no_color {
        colored::control::set_override(false);
    }

    let code = match prepare(&options) {
        Ok((settings, profile)) => match options.results.clone() {
            Some(path) => score(RecordedEngine::new(path), settings, profile).await,
            None => {
                let engine = CommandEngine::new(settings.engine.clone());
                score(engine, settings, profile).await
            }
        },
        Err(e) => {
            error!("{}", e);
            let fallback = &default_profiles()[0];
            let _ = ConsoleRenderer::new(fallback).render_fatal(&mut io::stderr(), &e);
            1
        }
    };
    exit(code);
}

fn prepare(options: &Opt) -> Result<(Settings, Profile), Error> {
    let settings = Settings::load(options.file.clone())?;
    debug!("Initiated configuration {:#?}", settings);

    let interactive =
        !options.no_interactive && console::user_attended() && console::user_attended_stderr();
    let selection = match options.profile.as_deref() {
        Some(name) => Selection::Named(name),
        None if interactive => Selection::Prompt,
        None => Selection::First,
    };
    let profile = profile::select(&settings.profiles, selection)?;
    Ok((settings, profile))
}

async fn score<E: ExecutionEngine>(engine: E, settings: Settings, profile: Profile) -> i32 {
    let app = App::new(engine, settings.policy, profile).with_title_font(settings.title_font);
    if console::user_attended() {
        let _ = console::Term::stdout().clear_screen();
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    app.score(&mut out, &mut io::stderr(), &SystemTelemetry::collect()).await
}

fn init_logging(level: LevelFilter, output: &Option<PathBuf>) {
    let mut dispatcher = fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}:{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record
                    .line()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "".to_owned()),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr());

    if let Some(log_file) = output {
        match fern::log_file(log_file) {
            Ok(file) => dispatcher = dispatcher.chain(file),
            Err(e) => eprintln!("Cannot open log file {}: {}", log_file.display(), e),
        }
    }
    if let Err(e) = dispatcher.apply() {
        eprintln!("Logger already initialized: {}", e);
    }
    info!("Logging level {} enabled", level);
}
