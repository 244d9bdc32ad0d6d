use std::{
    error::Error,
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
};

use cartmut::{parse_line, Reply, Session};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Shop and cart demo driven by one command per line.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Read commands from this file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Log every cart mutation
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "cartmut=debug"
    } else {
        "cartmut=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logger(args.verbose);

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };

    let session = Session::new();
    println!("{session}");
    for line in input.lines() {
        let line = line?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        match session.dispatch(command) {
            Ok(Reply::Quit) => break,
            Ok(reply @ (Reply::Added(_) | Reply::Removed(_))) => {
                println!("{reply}");
                println!("{session}");
            }
            Ok(reply) => println!("{reply}"),
            Err(e) => {
                tracing::warn!("{e}");
                eprintln!("{e}");
            }
        }
    }
    tracing::info!("session ended");
    Ok(())
}
