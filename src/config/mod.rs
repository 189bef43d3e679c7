use std::env;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConfigFile {
    pub search: Option<String>,
    #[serde(alias = "type")]
    pub type_filter: Option<String>,
    pub sort: Option<String>,
    pub output: Option<String>,
    pub output_format: Option<String>,
    pub no_color: Option<bool>,
    pub quiet: Option<bool>,
    pub default_color: Option<String>,
    pub type_colors: Option<IndexMap<String, String>>,
}

fn home_dir() -> Option<PathBuf> {
    ["HOME", "USERPROFILE"]
        .iter()
        .find_map(|key| env::var_os(key))
        .map(PathBuf::from)
}

/// `~/.pokedex/config.yml`
pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".pokedex").join("config.yml"))
}

/// Resolves a leading `~` against the home directory. `~name` forms are kept as is.
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => {
            rest.trim_start_matches(['/', '\\'])
        }
        _ => return PathBuf::from(path),
    };
    match home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

pub fn expand_tilde_string(path: &str) -> String {
    expand_tilde(path).to_string_lossy().to_string()
}

pub fn load_config(path: &Path, allow_missing: bool) -> Result<ConfigFile, String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents)
            .map_err(|e| format!("failed to parse config '{}': {e}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(format!("config file not found '{}'", path.display()))
        }
        Err(e) => Err(format!("failed to read config '{}': {e}", path.display())),
    }
}

pub fn parse_config(contents: &str) -> Result<ConfigFile, serde_yaml::Error> {
    // serde_yaml rejects an empty document for a struct
    if contents.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str::<ConfigFile>(contents)
}

fn default_config_yaml() -> String {
    r##"# Pokedex config
#
# Location (default):
#   ~/.pokedex/config.yml

# Initial view (CLI flags override these)
search: ""
type_filter: ""
# name-asc, name-desc, level-asc, level-desc, or empty for catalog order
sort: ""

# Output (optional)
# output: ./pokedex.html
# output_format: page

# Diagnostics
quiet: false
no_color: false

# Colours
# default_color: "#ccc"
# type_colors:
#   Dragon: "#7038F8"
#   Eau: "#3399FF"
"##
    .to_string()
}

/// Returns `true` when a new file was written.
pub fn ensure_default_config_file(path: &Path) -> Result<bool, String> {
    if path.exists() {
        return Ok(false);
    }
    let parent = path
        .parent()
        .ok_or_else(|| format!("invalid config path '{}'", path.display()))?;
    std::fs::create_dir_all(parent).map_err(|e| {
        format!(
            "failed to create config directory '{}': {e}",
            parent.display()
        )
    })?;
    let contents = default_config_yaml();
    std::fs::write(path, contents)
        .map_err(|e| format!("failed to write config file '{}': {e}", path.display()))?;
    Ok(true)
}
