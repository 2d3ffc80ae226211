//! Configuration: analysis thresholds, loadable from `.patternmap.toml`.
//!
//! The detector and advisor cutoffs all read from here; a partial
//! config file keeps the defaults for any field it omits.

use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Thresholds driving the refactoring advisor and pattern detectors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisThresholds {
    /// Lines above which a function should be split
    #[serde(default = "default_max_function_length")]
    pub max_function_length: usize,

    /// Cyclomatic complexity above which a function is flagged
    #[serde(default = "default_max_cyclomatic_complexity")]
    pub max_cyclomatic_complexity: u32,

    /// Parameter count above which a parameter object is suggested
    #[serde(default = "default_max_parameter_count")]
    pub max_parameter_count: usize,

    /// Stricter, separate parameter-list cutoff
    #[serde(default = "default_long_parameter_list")]
    pub long_parameter_list: usize,

    /// Method count above which a class should be split
    #[serde(default = "default_max_class_methods")]
    pub max_class_methods: usize,

    /// Base-class count above which coupling is flagged
    #[serde(default = "default_max_inheritance_depth")]
    pub max_inheritance_depth: usize,

    /// Nesting depth above which flattening is suggested
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: u32,

    /// Method count above which a class is a god object
    #[serde(default = "default_god_object_methods")]
    pub god_object_methods: usize,

    /// Return statements a factory-named function needs
    #[serde(default = "default_factory_min_returns")]
    pub factory_min_returns: usize,

    /// Minimum attribute accesses for a feature-envy finding
    #[serde(default = "default_feature_envy_min_accesses")]
    pub feature_envy_min_accesses: usize,

    /// Non-self `__init__` parameters indicating injected dependencies
    #[serde(default = "default_injected_dependency_params")]
    pub injected_dependency_params: usize,

    /// Third-party import count above which fan-out is flagged
    #[serde(default = "default_max_third_party_imports")]
    pub max_third_party_imports: usize,

    /// Minimum try-blocks-per-function ratio before warning
    #[serde(default = "default_min_error_handling_ratio")]
    pub min_error_handling_ratio: f64,

    /// Jaccard similarity at or above which two bodies are duplicates
    #[serde(default = "default_duplication_similarity")]
    pub duplication_similarity: f64,

    /// Minimum dump length for a body to enter duplicate comparison
    #[serde(default = "default_min_duplicate_body_chars")]
    pub min_duplicate_body_chars: usize,
}

impl Default for AnalysisThresholds {
    fn default() -> Self {
        Self {
            max_function_length: default_max_function_length(),
            max_cyclomatic_complexity: default_max_cyclomatic_complexity(),
            max_parameter_count: default_max_parameter_count(),
            long_parameter_list: default_long_parameter_list(),
            max_class_methods: default_max_class_methods(),
            max_inheritance_depth: default_max_inheritance_depth(),
            max_nesting_depth: default_max_nesting_depth(),
            god_object_methods: default_god_object_methods(),
            factory_min_returns: default_factory_min_returns(),
            feature_envy_min_accesses: default_feature_envy_min_accesses(),
            injected_dependency_params: default_injected_dependency_params(),
            max_third_party_imports: default_max_third_party_imports(),
            min_error_handling_ratio: default_min_error_handling_ratio(),
            duplication_similarity: default_duplication_similarity(),
            min_duplicate_body_chars: default_min_duplicate_body_chars(),
        }
    }
}

fn default_max_function_length() -> usize {
    50
}
fn default_max_cyclomatic_complexity() -> u32 {
    10
}
fn default_max_parameter_count() -> usize {
    5
}
fn default_long_parameter_list() -> usize {
    7
}
fn default_max_class_methods() -> usize {
    20
}
fn default_max_inheritance_depth() -> usize {
    5
}
fn default_max_nesting_depth() -> u32 {
    4
}
fn default_god_object_methods() -> usize {
    20
}
fn default_factory_min_returns() -> usize {
    2
}
fn default_feature_envy_min_accesses() -> usize {
    3
}
fn default_injected_dependency_params() -> usize {
    4
}
fn default_max_third_party_imports() -> usize {
    10
}
fn default_min_error_handling_ratio() -> f64 {
    0.3
}
fn default_duplication_similarity() -> f64 {
    0.8
}
fn default_min_duplicate_body_chars() -> usize {
    100
}

/// Top-level configuration file shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternmapConfig {
    #[serde(default)]
    pub thresholds: AnalysisThresholds,
}

const CONFIG_FILE_NAME: &str = ".patternmap.toml";

fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse a TOML config string
pub fn parse_config(contents: &str) -> Result<PatternmapConfig, String> {
    toml::from_str::<PatternmapConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
}

fn try_load_config_from_path(config_path: &Path) -> Option<PatternmapConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            eprintln!("Warning: {}. Using defaults.", e);
            None
        }
    }
}

fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Load configuration from the nearest `.patternmap.toml`, walking up
/// the directory tree, falling back to defaults
pub fn load_config() -> PatternmapConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return PatternmapConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!("No config file found. Using default config.");
            PatternmapConfig::default()
        })
}

/// Render the default configuration as TOML, for `patternmap init`
pub fn default_config_toml() -> String {
    toml::to_string_pretty(&PatternmapConfig::default())
        .unwrap_or_else(|_| String::from("[thresholds]\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let t = AnalysisThresholds::default();
        assert_eq!(t.max_function_length, 50);
        assert_eq!(t.max_cyclomatic_complexity, 10);
        assert_eq!(t.max_parameter_count, 5);
        assert_eq!(t.long_parameter_list, 7);
        assert_eq!(t.max_class_methods, 20);
        assert_eq!(t.max_inheritance_depth, 5);
        assert_eq!(t.max_nesting_depth, 4);
        assert_eq!(t.god_object_methods, 20);
        assert_eq!(t.duplication_similarity, 0.8);
        assert_eq!(t.min_duplicate_body_chars, 100);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config = parse_config("[thresholds]\nmax_function_length = 30\n").unwrap();
        assert_eq!(config.thresholds.max_function_length, 30);
        assert_eq!(config.thresholds.max_cyclomatic_complexity, 10);
    }

    #[test]
    fn empty_config_is_valid() {
        let config = parse_config("").unwrap();
        assert_eq!(config.thresholds.max_class_methods, 20);
    }

    #[test]
    fn default_toml_round_trips() {
        let rendered = default_config_toml();
        let parsed = parse_config(&rendered).unwrap();
        assert_eq!(parsed.thresholds.max_function_length, 50);
    }
}
