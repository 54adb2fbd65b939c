use anyhow::{Result, bail};
use clap::Parser;
use sharpen_helper::{Cli, init_logger, run};

fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse();
    let summary = run(&cli)?;

    if !summary.failed.is_empty() {
        bail!(
            "{} of {} file(s) failed: {}",
            summary.failed.len(),
            summary.total(),
            summary.failed.join(", ")
        );
    }

    log::info!("done, {} file(s) written", summary.written.len());
    Ok(())
}
