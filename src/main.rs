mod app;
mod archive;
mod graph;
mod util;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::graph::Viewport;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON file holding the accepted artifacts. Starts empty when omitted.
    #[arg(long)]
    artifacts: Option<PathBuf>,

    /// Where the selected persona and onboarding state are kept.
    #[arg(long, default_value = "archive-graph-state.json")]
    state_file: PathBuf,

    #[arg(long, default_value_t = tracing::Level::INFO)]
    log_level: tracing::Level,

    #[arg(long, default_value_t = 1440.0)]
    width: f32,

    #[arg(long, default_value_t = 920.0)]
    height: f32,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_target(false)
        .init();

    info!(
        artifacts = ?args.artifacts,
        state_file = %args.state_file.display(),
        "starting archive graph"
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([args.width, args.height]),
        ..Default::default()
    };
    let config = app::AppConfig {
        artifacts_path: args.artifacts,
        state_path: args.state_file,
        initial_viewport: Viewport {
            width: args.width,
            height: args.height,
        },
    };

    eframe::run_native(
        "Archive Graph",
        options,
        Box::new(move |cc| Ok(Box::new(app::ArchiveGraphApp::new(cc, config)))),
    )
}
