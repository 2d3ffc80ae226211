// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod metrics;
pub mod organization;
pub mod patterns;
pub mod refactoring;

// Re-export commonly used types
pub use crate::core::{
    AnalysisReport, AnalyzeError, ArchitecturalInsight, ClassMetrics, CodePattern, Effort,
    FunctionMetrics, ImpactArea, Language, MetricsMap, PatternCategory, PatternLocation, Priority,
    RefactoringSuggestion, Severity,
};

pub use crate::analyzers::{analyze, analyze_with_thresholds, get_analyzer, Analyzer};

pub use crate::config::{load_config, AnalysisThresholds, PatternmapConfig};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::patterns::run_detectors;

pub use crate::refactoring::generate_suggestions;
