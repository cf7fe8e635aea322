//! Load `.flowkit.toml` from a directory (CLI only). The library never reads it; callers pass limits directly.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct FlowkitToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsSection {
    limit: Option<usize>,
    above: Option<i64>,
    serial: Option<bool>,
    json: Option<bool>,
    verbose: Option<bool>,
}

/// Parse settings file contents.
pub fn parse_flowkit_toml(contents: &str) -> Result<FlowkitToml> {
    Ok(toml::from_str(contents)?)
}

/// Load the settings file from `dir`. `Ok(None)` when the file does not exist.
pub fn load_flowkit_toml(dir: &Path) -> Result<Option<FlowkitToml>> {
    let path = dir.join(PackagePaths::get().config_filename());
    if !path.exists() {
        return Ok(None);
    }
    let contents =
        std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    parse_flowkit_toml(&contents)
        .with_context(|| format!("parse {}", path.display()))
        .map(Some)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $opts:expr, $field:ident) => {
        if let Some(v) = $section.$field {
            $opts.$field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI flags.
pub fn apply_file_to_opts(file: &FlowkitToml, opts: &mut Opts) {
    let settings = &file.settings;
    if settings.limit.is_some() {
        opts.limit = settings.limit;
    }
    if settings.above.is_some() {
        opts.above = settings.above;
    }
    apply_file_opt!(settings, opts, serial);
    apply_file_opt!(settings, opts, json);
    apply_file_opt!(settings, opts, verbose);
}
