use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use polar_plot::app::run_viewer;
use polar_plot::cli::Cli;
use polar_plot::data::{export::export_dataset, load_file};
use polar_plot::render::{save_figure, FigureOptions};
use polar_plot::state::AppState;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let dataset = load_file(&cli.data)
        .with_context(|| format!("loading polar data from {}", cli.data.display()))?;

    let figure = FigureOptions {
        title: cli.figure_title(&dataset),
        dpi: cli.dpi,
    };

    if let Some(path) = &cli.export {
        export_dataset(&dataset, path)
            .with_context(|| format!("exporting data to {}", path.display()))?;
    }

    if let Some(path) = &cli.output {
        save_figure(&dataset, path, &figure)
            .with_context(|| format!("saving figure to {}", path.display()))?;
    }

    if cli.no_show {
        return Ok(());
    }

    let window_title = figure.title.clone();
    let mut state = AppState::default();
    state.figure = figure;
    state.set_dataset(dataset, Some(cli.data.clone()));

    run_viewer(state, &window_title).map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
