use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::dry::Thresholds;

/// Name of the optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = ".dryad.toml";

/// On-disk configuration: a `[thresholds]` table overriding the
/// built-in 50/25 severity thresholds.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    thresholds: ThresholdOverrides,
}

#[derive(Debug, Default, Deserialize)]
struct ThresholdOverrides {
    high: Option<i64>,
    normal: Option<i64>,
}

/// Resolve the severity thresholds for a run: built-in defaults, then
/// `.dryad.toml` in `dir` (if present), then explicit CLI flags.
pub fn resolve(
    dir: &Path,
    cli_high: Option<i64>,
    cli_normal: Option<i64>,
) -> Result<Thresholds, Box<dyn Error>> {
    let mut thresholds = Thresholds::default();

    let path = dir.join(CONFIG_FILE);
    if path.exists() {
        let raw = fs::read_to_string(&path)?;
        let config: ConfigFile = toml::from_str(&raw)
            .map_err(|err| format!("{}: {err}", path.display()))?;
        if let Some(high) = config.thresholds.high {
            thresholds.high = high;
        }
        if let Some(normal) = config.thresholds.normal {
            thresholds.normal = normal;
        }
    }

    if let Some(high) = cli_high {
        thresholds.high = high;
    }
    if let Some(normal) = cli_normal {
        thresholds.normal = normal;
    }

    Ok(thresholds)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
