use anyhow::Context;
use chrono::Local;
use clap::Parser;
use console::style;
use tidesync::config::Cli;
use tidesync::schedule::Scheduler;
use tidesync::{run_once, Settings};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", style("error").red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Convert CLI args to Settings - this validates immediately
    let settings = Settings::try_from(cli)?;

    if let Err(e) = tidesync::logging::init(settings.verbose) {
        eprintln!("warning: diagnostics disabled: {}", e);
    }
    tracing::debug!("tidesync v{}", tidesync::VERSION);

    let run_settings = settings.run.clone();

    if settings.once {
        run_once(&run_settings, Local::now()).context("sync run failed")?;
        return Ok(());
    }

    let scheduler = Scheduler::new(settings.interval)?;
    tracing::info!(
        interval_secs = settings.interval.as_secs(),
        "scheduler started"
    );

    let runs = scheduler
        .run(move || run_once(&run_settings, Local::now()).map(|_| ()))
        .context("sync run failed")?;

    tracing::info!(runs, "scheduler stopped");
    Ok(())
}
