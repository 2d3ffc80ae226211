//! Common type definitions for analysis results

use serde::{Deserialize, Serialize};

use crate::core::metrics::{ClassMetrics, FunctionMetrics, MetricsMap};

/// Language enumeration for all supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Python,
}

impl Language {
    /// Get file extensions for this language
    pub fn extensions(&self) -> &[&str] {
        match self {
            Language::Python => &["py", "pyw"],
        }
    }

    /// Get the display name for this language
    pub fn display_name(&self) -> &str {
        match self {
            Language::Python => "Python",
        }
    }

    /// Resolve a language from a user-supplied name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Language> {
        if name.eq_ignore_ascii_case("python") {
            Some(Language::Python)
        } else {
            None
        }
    }

    /// Guess a language from a file extension
    pub fn from_extension(ext: &str) -> Option<Language> {
        match ext {
            "py" | "pyw" => Some(Language::Python),
            _ => None,
        }
    }
}

/// Priority levels for refactoring suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Estimated effort to apply a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Small,
    Medium,
    Large,
}

/// Which quality dimension a suggestion improves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactArea {
    Performance,
    Maintainability,
    Readability,
}

/// Severity levels for architectural insights
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// Categories of detected code patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    DesignPattern,
    AntiPattern,
    CodeSmell,
}

impl PatternCategory {
    /// Get display name for this category
    pub fn display_name(&self) -> &str {
        match self {
            PatternCategory::DesignPattern => "Design Pattern",
            PatternCategory::AntiPattern => "Anti-pattern",
            PatternCategory::CodeSmell => "Code Smell",
        }
    }
}

/// A threshold-driven refactoring suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefactoringSuggestion {
    /// Suggestion kind, e.g. "extract_method", "reduce_complexity"
    #[serde(rename = "type")]
    pub kind: String,
    /// "name:line" of the offending definition
    pub location: String,
    pub description: String,
    pub reasoning: String,
    pub priority: Priority,
    pub estimated_effort: Effort,
    pub impact: ImpactArea,
}

/// An architectural-level observation spanning multiple entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitecturalInsight {
    /// Insight kind, e.g. "dependency", "coupling", "pattern"
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub components: Vec<String>,
    pub severity: Severity,
    pub recommendation: String,
}

/// Where a pattern was observed. Fields are optional because different
/// detectors report different granularity (class vs function, with or
/// without a line).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternLocation {
    #[serde(rename = "class", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envied_object: Option<String>,
}

impl PatternLocation {
    pub fn class_at(name: impl Into<String>, line: usize) -> Self {
        Self {
            class_name: Some(name.into()),
            line: Some(line),
            ..Default::default()
        }
    }

    pub fn function_at(name: impl Into<String>, line: usize) -> Self {
        Self {
            function: Some(name.into()),
            line: Some(line),
            ..Default::default()
        }
    }

    pub fn with_envied_object(mut self, object: impl Into<String>) -> Self {
        self.envied_object = Some(object.into());
        self
    }
}

/// A detected design pattern, anti-pattern, or code smell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodePattern {
    pub name: String,
    #[serde(rename = "type")]
    pub category: PatternCategory,
    /// Fixed heuristic constant per detector, not a computed statistic
    pub confidence: f64,
    pub locations: Vec<PatternLocation>,
    pub description: String,
}

/// Aggregated result of one analysis invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub refactoring_suggestions: Vec<RefactoringSuggestion>,
    pub architectural_insights: Vec<ArchitecturalInsight>,
    pub detected_patterns: Vec<CodePattern>,
    pub function_metrics: MetricsMap<FunctionMetrics>,
    pub class_metrics: MetricsMap<ClassMetrics>,
}

impl AnalysisReport {
    /// Total number of findings across all three result lists
    pub fn finding_count(&self) -> usize {
        self.refactoring_suggestions.len()
            + self.architectural_insights.len()
            + self.detected_patterns.len()
    }
}
