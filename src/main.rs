use std::error::Error;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bandplot::cli::Args;
use bandplot::config::StudyConfig;
use bandplot::study::run_study;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bandplot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut cfg = match StudyConfig::load_or_default(&args.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!("{err}");
            return Err(err.into());
        }
    };
    args.apply(&mut cfg);

    match run_study(&cfg) {
        Ok(written) => {
            info!("Saved {} figure(s) to {}", written.len(), cfg.paths.out_dir.display());
            Ok(())
        }
        Err(err) => {
            error!("{err}");
            Err(err.into())
        }
    }
}
