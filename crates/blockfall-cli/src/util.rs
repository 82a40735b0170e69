use std::{
    fs::File,
    io::{self, Write as _},
    path::Path,
};

use anyhow::Context;
use blockfall_engine::EngineConfig;

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Reads an engine configuration, falling back to the defaults when no path is given.
///
/// The configuration is validated before it is returned.
pub fn read_config_file<P>(path: Option<P>) -> anyhow::Result<EngineConfig>
where
    P: AsRef<Path>,
{
    let config = match path {
        Some(path) => read_json_file::<EngineConfig, _>("config", path)?,
        None => EngineConfig::default(),
    };
    config.validate().context("Invalid engine configuration")?;
    Ok(config)
}

pub fn write_json_stdout<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("Failed to write JSON to stdout")?;
    writeln!(stdout).context("Failed to write newline to stdout")?;
    Ok(())
}
