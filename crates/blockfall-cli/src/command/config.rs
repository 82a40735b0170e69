use std::path::PathBuf;

use crate::util;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PrintConfigArg {
    /// Configuration file to merge over the defaults
    #[clap(long)]
    config: Option<PathBuf>,
}

pub(crate) fn run(arg: &PrintConfigArg) -> anyhow::Result<()> {
    let PrintConfigArg { config } = arg;
    let config = util::read_config_file(config.as_ref())?;
    util::write_json_stdout(&config)
}
