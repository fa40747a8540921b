use std::io;

use anyhow::Result;
use cellsweep_core::Session;
use clap::Parser;

mod command;
mod driver;
mod render;
mod settings;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    board: settings::BoardArgs,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = args.board.resolve()?;
    log::debug!("config: {:?}", config);

    let mut session = Session::from_config(&config)?;
    if let Some(seed) = session.board().seed() {
        log::info!("Playing with seed {}, pass --seed {} to replay", seed, seed);
    }

    let state = driver::play(
        &mut session,
        io::stdin().lock(),
        io::stdout().lock(),
        args.board.cell_size(),
    )?;
    log::debug!("Session over: {:?}", state);
    Ok(())
}
