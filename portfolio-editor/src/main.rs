use std::path::PathBuf;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod app;
mod dialog;
mod model;

use app::PortfolioApp;
use model::PortfolioData;

/// Edit a portfolio and reorder its entries by drag and drop.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file to start from, in the same shape the portfolio is stored in.
    #[arg(long)]
    seed: Option<PathBuf>,

    #[arg(long, default_value = "Portfolio Editor")]
    title: String,
}

fn load_portfolio(seed: Option<&PathBuf>) -> (PortfolioData, Option<String>) {
    let Some(path) = seed else {
        return (PortfolioData::sample(), None);
    };
    match PortfolioData::load(path) {
        Ok(data) => (data, None),
        Err(err) => {
            warn!("falling back to sample data: {err:#}");
            (PortfolioData::sample(), Some(format!("{err:#}")))
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let (portfolio, load_error) = load_portfolio(args.seed.as_ref());

    let options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(900.0, 760.0)),
        ..Default::default()
    };
    eframe::run_native(
        &args.title,
        options,
        Box::new(move |_cc| Box::new(PortfolioApp::new(portfolio, load_error))),
    )
}
