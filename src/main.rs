use anyhow::Context;
use log::error;

use sphray::{app::App, config::Config, logging::init_logging};

fn main() {
    let config = Config::default();
    init_logging(config.logging.clone());

    if let Err(error) = run(&config) {
        error!("{error:#}");
        std::process::exit(-1);
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    let app = App::new(config).context("Startup failed")?;
    app.run();
    Ok(())
}
