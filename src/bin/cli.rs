// src/bin/cli.rs
use seoul_market::{ cli, log };

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    log::init();

    // Stage errors are already logged at the runner boundary.
    if cli::run().is_err() {
        std::process::exit(1);
    }
    Ok(())
}
