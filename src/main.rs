//! Gobang desktop front-end
//!
//! Play five-in-a-row against the engine on a 15x15 board.

use clap::{Parser, ValueEnum};
use log::{error, info};

use gobang::ui::GobangApp;
use gobang::{EngineConfig, Stone};

/// Colour the human plays
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Side {
    Black,
    White,
}

impl From<Side> for Stone {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Stone::Black,
            Side::White => Stone::White,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search depth in plies
    #[arg(short, long, default_value_t = EngineConfig::default().max_depth)]
    depth: u8,

    /// Colour you play; Black moves first
    #[arg(long, value_enum, default_value_t = Side::Black)]
    human: Side,

    /// Transposition table size in megabytes
    #[arg(long, default_value_t = EngineConfig::default().tt_size_mb)]
    tt_mb: usize,

    /// Disable the transposition table
    #[arg(long)]
    no_cache: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> eframe::Result {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, &args.log_level),
    )
    .init();

    let config = EngineConfig {
        max_depth: args.depth,
        tt_size_mb: args.tt_mb,
        use_transposition: !args.no_cache,
        ..EngineConfig::default()
    };
    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(2);
    }
    let human = Stone::from(args.human);
    info!("starting: human={} depth={} tt={}MB", human, config.max_depth, config.tt_size_mb);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 720.0])
            .with_min_inner_size([720.0, 560.0])
            .with_title("Gobang"),
        ..Default::default()
    };

    eframe::run_native(
        "Gobang",
        options,
        Box::new(move |cc| Ok(Box::new(GobangApp::new(cc, config, human)?))),
    )
}
