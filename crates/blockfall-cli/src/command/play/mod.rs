use std::path::PathBuf;

use blockfall_engine::{GameSession, PieceSeed};

use crate::{command::play::app::PlayApp, tui::Tui, util};

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Engine configuration file (JSON); missing fields keep their defaults
    #[clap(long)]
    pub(crate) config: Option<PathBuf>,
    /// Seed for the piece sequence, as 32 hexadecimal characters
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// Frames per second of the game loop
    #[clap(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub(crate) fps: u32,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            config: None,
            seed: None,
            fps: 60,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { config, seed, fps } = arg;

    let config = util::read_config_file(config.as_ref())?;
    let session = GameSession::with_config(config, *seed)?;
    let mut app = PlayApp::new(session, *fps);

    Tui::new().run(&mut app)
}
