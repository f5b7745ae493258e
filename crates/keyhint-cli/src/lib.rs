mod advise;
pub use advise::AdviseCommand;

mod check_config;
pub use check_config::CheckConfigCommand;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Parse and execute CLI commands from command-line arguments
pub async fn parse_and_run() -> Result<()> {
    run(Cli::parse()).await
}

/// Parse and execute CLI commands from an iterator of arguments
pub async fn parse_from<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    run(Cli::parse_from(args)).await
}

async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Command::Advise(cmd) => cmd.run().await,
        Command::CheckConfig(cmd) => cmd.run(),
    }
}

/// Logs go to stderr so suggestions on stdout stay pipeable. `RUST_LOG`
/// overrides the level picked by `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "keyhint={level},keyhint_driver_mysql={level},keyhint_cli={level},warn"
        ))
    });

    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(name = "keyhint")]
#[command(about = "keyhint - index recommendations for MySQL statements")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Suggest indexes for a file of query shapes
    Advise(AdviseCommand),

    /// Validate a configuration file
    CheckConfig(CheckConfigCommand),
}
