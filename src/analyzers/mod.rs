//! Analyzer seam: parse source to a syntax tree, then derive a report.

pub mod ast_walk;
pub mod python;

use crate::config::AnalysisThresholds;
use crate::core::{AnalysisReport, AnalyzeError, Language};

pub use python::{PythonAnalyzer, PythonAst};

/// Parsed syntax tree for one source file
#[derive(Debug)]
pub enum Ast {
    Python(PythonAst),
}

/// A language-specific analyzer: parse, then analyze the parsed tree
pub trait Analyzer {
    fn parse(&self, source: &str) -> Result<Ast, AnalyzeError>;
    fn analyze(&self, ast: &Ast) -> AnalysisReport;
    fn language(&self) -> Language;
}

/// Get the analyzer for a language
pub fn get_analyzer(language: Language) -> Box<dyn Analyzer> {
    match language {
        Language::Python => Box::new(PythonAnalyzer::new()),
    }
}

/// Analyze one source file with default thresholds.
///
/// The sole public operation: deterministic, stateless, and safe to
/// call concurrently since every invocation builds its own tree and
/// metric maps.
pub fn analyze(source: &str, language: &str) -> Result<AnalysisReport, AnalyzeError> {
    analyze_with_thresholds(source, language, &AnalysisThresholds::default())
}

/// Analyze one source file with explicit thresholds
pub fn analyze_with_thresholds(
    source: &str,
    language: &str,
    thresholds: &AnalysisThresholds,
) -> Result<AnalysisReport, AnalyzeError> {
    // Unsupported languages are rejected before any parsing happens
    let Some(Language::Python) = Language::from_name(language) else {
        return Err(AnalyzeError::UnsupportedLanguage);
    };

    let analyzer = PythonAnalyzer::with_thresholds(thresholds.clone());
    let ast = analyzer.parse(source)?;
    Ok(analyzer.analyze(&ast))
}
