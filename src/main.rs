//! Roto Lathe entry point
//!
//! Usage: `roto-lathe [settings.json] [out_dir]`
//!
//! Without a settings file the defaults are used. Without an output
//! directory frames are rendered and discarded (useful for timing).

use std::process::ExitCode;

use roto_lathe::export::{FrameSink, PngSequence, drain_into};
use roto_lathe::{LatheResult, LogProgress, Settings, run};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Roto Lathe starting...");

    match render(std::env::args().skip(1).collect()) {
        Ok(frames) => {
            log::info!("Done: {frames} frames");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn render(args: Vec<String>) -> LatheResult<u64> {
    let settings = match args.first() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let driver = run(settings)?.with_observer(LogProgress);

    match args.get(1) {
        Some(dir) => {
            let mut sink = PngSequence::create(dir)?;
            drain_into(driver, &mut sink)
        }
        None => drain_into(driver, &mut Discard),
    }
}

/// Sink that drops every frame
struct Discard;

impl FrameSink for Discard {
    fn write_frame(&mut self, _frame: &roto_lathe::Frame) -> LatheResult<()> {
        Ok(())
    }
}
