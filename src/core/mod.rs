pub mod errors;
pub mod metrics;
pub mod types;

pub use errors::AnalyzeError;
pub use metrics::{ClassMetrics, FunctionMetrics, MetricsMap};
pub use types::{
    AnalysisReport, ArchitecturalInsight, CodePattern, Effort, ImpactArea, Language,
    PatternCategory, PatternLocation, Priority, RefactoringSuggestion, Severity,
};
