use anyhow::Result;
use clap::Parser;
use shape_boolean_cli::{run, Args};

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let output = run(&args)?;
    println!("{output}");
    Ok(())
}
