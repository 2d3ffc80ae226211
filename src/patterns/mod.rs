//! Pattern detector: a fixed, ordered battery of independent heuristics.
//!
//! Detectors share no state and never short-circuit each other; every
//! detector always runs and appends zero or more findings.

pub mod design;
pub mod smells;

use crate::analyzers::ast_walk::ModuleSource;
use crate::config::AnalysisThresholds;
use crate::core::CodePattern;

pub type PatternDetector = fn(&ModuleSource, &AnalysisThresholds) -> Vec<CodePattern>;

/// The detector battery, in execution order
pub fn detectors() -> &'static [(&'static str, PatternDetector)] {
    &[
        ("singleton", design::detect_singleton),
        ("factory", design::detect_factory),
        ("god_object", smells::detect_god_object),
        ("feature_envy", smells::detect_feature_envy),
        ("dead_code", smells::detect_dead_code),
    ]
}

/// Run every detector and concatenate the findings
pub fn run_detectors(module: &ModuleSource, thresholds: &AnalysisThresholds) -> Vec<CodePattern> {
    let mut patterns = Vec::new();
    for (name, detector) in detectors() {
        let found = detector(module, thresholds);
        if !found.is_empty() {
            log::debug!("detector '{}' produced {} finding(s)", name, found.len());
        }
        patterns.extend(found);
    }
    patterns
}
