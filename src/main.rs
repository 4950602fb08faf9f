use std::{fs::read_to_string, process::ExitCode, rc::Rc, time::Instant};

use clap::Parser;
use frontend::{
    display_error, lexer::lexer::tokenize, parser::parser::parse, type_checker::type_checker::check,
};
use tracing::{debug, info, level_filters::LevelFilter};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, TreeFormat};

mod config;

fn main() -> ExitCode {
    let config = Config::parse();

    // RUST_LOG takes precedence over --log-level
    fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(config.log_level).into())
                .from_env_lossy(),
        )
        .init();

    if run(&config) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run(config: &Config) -> bool {
    let path = config.file.to_string_lossy().into_owned();
    let file_name = config.file_name();

    let source = match read_to_string(&config.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: failed to read {}: {}", path, error);
            return false;
        }
    };

    let start = Instant::now();
    let tokens = match tokenize(source.clone(), Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(&error, &path, &source);
            return false;
        }
    };
    debug!(elapsed = ?start.elapsed(), "tokenized");

    if config.tokens {
        for token in &tokens {
            println!("{}", token);
        }
    }

    let parse_start = Instant::now();
    let program = match parse(tokens, Rc::new(file_name)) {
        Ok(program) => program,
        Err(error) => {
            display_error(&error, &path, &source);
            return false;
        }
    };
    debug!(elapsed = ?parse_start.elapsed(), "parsed");

    match config.tree {
        Some(TreeFormat::Source) => print!("{}", program),
        Some(TreeFormat::Debug) => println!("{:#?}", program),
        None => {}
    }

    let check_start = Instant::now();
    let passed = check(&program);
    debug!(elapsed = ?check_start.elapsed(), "type checked");

    info!(file = %path, passed, total = ?start.elapsed(), "finished");
    passed
}
