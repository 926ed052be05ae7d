use std::process::ExitCode;
use steps_plot::chart;
use steps_plot::fetch::load;
use steps_plot::steps_plot::{parse_cli, Config};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn run(config: &Config) -> steps_plot::error::Result<()> {
    let series = load(&config.loader)?;
    if !series.is_ordered() {
        debug!("rows are not ordered by date, the date axis orders them");
    }
    let artifact = chart::render(&series, &config.chart)?;
    artifact.write(&config.output)?;
    if config.show {
        artifact.show();
    }
    Ok(())
}

fn main() -> ExitCode {
    let config = parse_cli();

    let level = if config.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("steps_plot={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("{:?}", config);
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("steps_plot: {:?} error: {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}
