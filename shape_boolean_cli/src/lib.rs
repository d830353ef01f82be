//! Command line front end: reads a combine request as JSON and prints the resulting descriptor.
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use shape_boolean::{CombineOptions, CombineRequest, Operation};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// JSON combine request file, `-` reads standard input
    #[clap(short, long, default_value = "-")]
    pub input: PathBuf,

    /// Operation overriding the one in the request
    #[clap(short, long)]
    pub operation: Option<Operation>,

    /// Pretty print the output JSON
    #[clap(long)]
    pub pretty: bool,

    /// Byte ceiling of every output path
    #[clap(long)]
    pub max_path_bytes: Option<usize>,

    /// Fail with an error instead of emitting a minimal rectangle when no subpath can be recovered
    #[clap(long)]
    pub no_rectangle_fallback: bool,

    /// Log at debug level regardless of RUST_LOG
    #[clap(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn combine_options(&self) -> CombineOptions {
        let mut options = CombineOptions::new();
        if let Some(max) = self.max_path_bytes {
            options.sanitize.max_path_bytes = max;
        }
        if self.no_rectangle_fallback {
            options.sanitize.rectangle_fallback = false;
        }
        options
    }

    fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}

pub fn parse_request(json: &str) -> Result<CombineRequest> {
    serde_json::from_str(json).context("invalid combine request")
}

pub fn read_request(args: &Args) -> Result<CombineRequest> {
    let json = if args.reads_stdin() {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read standard input")?;
        buf
    } else {
        fs::read_to_string(&args.input)
            .with_context(|| format!("failed to read '{}'", args.input.display()))?
    };

    parse_request(&json)
}

/// Run `request` with the options selected by `args` and serialize the result.
pub fn run_request(args: &Args, mut request: CombineRequest) -> Result<String> {
    if let Some(op) = args.operation {
        request.operation = op;
    }

    log::debug!(
        "{} of {} shapes",
        request.operation,
        request.shapes.len()
    );

    let descriptor = request
        .run(&args.combine_options())
        .with_context(|| format!("{} failed", request.operation))?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&descriptor)?
    } else {
        serde_json::to_string(&descriptor)?
    };

    Ok(json)
}

pub fn run(args: &Args) -> Result<String> {
    let request = read_request(args)?;
    run_request(args, request)
}
