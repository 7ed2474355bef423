mod app;
mod auth;
mod cli;
mod config;
mod consts;
mod error;
mod http;
mod output;
mod report;
mod utils;

use clap::Parser;

use cli::Cli;
use config::Config;
use http::UreqTransport;

fn main() {
    let cli = Cli::parse();
    utils::init_logging(cli.debug);

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let cli = cli.with_config(&config);

    let transport = UreqTransport::new();
    match app::run(&cli, &transport) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
