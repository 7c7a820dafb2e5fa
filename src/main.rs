use anyhow::Result;
use clap::Parser;

use flappy_term::app;
use flappy_term::config::{Args, Settings};

fn main() -> Result<()> {
    // stderr shares the terminal with the game, so stay quiet unless asked.
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "off".to_string());
    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();

    let settings = Settings::from(Args::parse());
    app::run(settings)
}
