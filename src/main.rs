// shopsplit - who owes what for an online shop order

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use shopsplit::{resolve_receipt, run, Config, Interrupt, NoopStore};
use tracing::Level;
use tracing_subscriber::fmt::time::ChronoLocal;

#[derive(Parser)]
#[command(name = "shopsplit")]
#[command(about = "Split an online shop order between the people who bought each item")]
#[command(version)]
struct Cli {
    /// Order confirmation to split (defaults to the newest file in the receipts directory)
    #[arg(long = "receipt", short = 'i', value_name = "PATH")]
    receipt: Option<PathBuf>,

    /// Config file (defaults to <config dir>/shopsplit/config.toml)
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory searched for the newest receipt, overriding the config file
    #[arg(long, value_name = "DIR")]
    receipts_dir: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

/// The first Ctrl-C stops the prompts once the current line is entered, a second one exits.
fn install_interrupt_handler() -> anyhow::Result<Interrupt> {
    let interrupt = Interrupt::new();
    let flag = interrupt.clone();
    ctrlc::set_handler(move || {
        if flag.trigger() {
            std::process::exit(130);
        }
        eprintln!("\nStopping, press Enter to print the bill so far (Ctrl-C again to quit).");
    })?;
    Ok(interrupt)
}

fn try_main(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(dir) = cli.receipts_dir {
        config.receipts_dir = dir;
    }
    tracing::debug!("config: {:?}", config);

    let receipt = resolve_receipt(&config, cli.receipt.as_deref())?;
    let interrupt = install_interrupt_handler()?;
    let mut store = NoopStore;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&receipt, stdin.lock(), stdout.lock(), interrupt, &mut store)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match try_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
