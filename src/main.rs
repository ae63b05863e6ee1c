use clap::Parser;
use tracing_subscriber::EnvFilter;

use bgc_assess::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("bgc_assess=debug,info")
    } else {
        EnvFilter::new("bgc_assess=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config = cli::load_config(cli.config.as_deref())?;

    match cli.command {
        cli::Commands::Summary(args) => {
            cli::summary::run(args, config, cli.format)?;
        }
        cli::Commands::CompareTools(args) => {
            cli::compare_tools::run(args, config, cli.format)?;
        }
        cli::Commands::CompareRef(args) => {
            cli::compare_ref::run(args, config, cli.format)?;
        }
    }

    Ok(())
}
