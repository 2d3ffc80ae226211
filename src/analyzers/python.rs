//! Python analyzer: parse with rustpython, then run the metric
//! calculator, refactoring advisor, pattern detectors, and
//! architectural analyses over the tree and assemble one report.

use rustpython_parser::ast;

use crate::analyzers::ast_walk::{LineIndex, ModuleSource};
use crate::analyzers::{Analyzer, Ast};
use crate::config::AnalysisThresholds;
use crate::core::{AnalysisReport, AnalyzeError, Language};
use crate::{metrics, organization, patterns, refactoring};

/// Parsed Python module plus the source it came from (needed to map
/// byte offsets back to line numbers)
#[derive(Debug)]
pub struct PythonAst {
    pub module: ast::Mod,
    pub source: String,
}

pub struct PythonAnalyzer {
    thresholds: AnalysisThresholds,
}

impl PythonAnalyzer {
    pub fn new() -> Self {
        Self {
            thresholds: AnalysisThresholds::default(),
        }
    }

    pub fn with_thresholds(thresholds: AnalysisThresholds) -> Self {
        Self { thresholds }
    }
}

impl Default for PythonAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for PythonAnalyzer {
    fn parse(&self, source: &str) -> Result<Ast, AnalyzeError> {
        let module = rustpython_parser::parse(source, rustpython_parser::Mode::Module, "<source>")
            .map_err(|e| AnalyzeError::syntax(e.to_string()))?;
        Ok(Ast::Python(PythonAst {
            module,
            source: source.to_string(),
        }))
    }

    fn analyze(&self, ast: &Ast) -> AnalysisReport {
        let Ast::Python(python_ast) = ast;
        analyze_python_module(python_ast, &self.thresholds)
    }

    fn language(&self) -> Language {
        Language::Python
    }
}

/// Aggregate the pipeline's outputs into one report. No filtering,
/// deduplication, or ranking beyond each component's own output; the
/// advisor and detectors may report overlapping observations about the
/// same location.
fn analyze_python_module(ast: &PythonAst, thresholds: &AnalysisThresholds) -> AnalysisReport {
    let ast::Mod::Module(module) = &ast.module else {
        return AnalysisReport::default();
    };

    let lines = LineIndex::new(&ast.source);
    let source = ModuleSource {
        body: &module.body,
        lines: &lines,
    };

    let (function_metrics, class_metrics) = metrics::collect_metrics(&source);
    let refactoring_suggestions = refactoring::generate_suggestions(
        &source,
        &function_metrics,
        &class_metrics,
        thresholds,
    );
    let detected_patterns = patterns::run_detectors(&source, thresholds);
    let architectural_insights = organization::analyze_architecture(&source, thresholds);

    log::debug!(
        "analyzed {} function(s), {} class(es): {} suggestion(s), {} pattern(s), {} insight(s)",
        function_metrics.len(),
        class_metrics.len(),
        refactoring_suggestions.len(),
        detected_patterns.len(),
        architectural_insights.len(),
    );

    AnalysisReport {
        refactoring_suggestions,
        architectural_insights,
        detected_patterns,
        function_metrics,
        class_metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_invalid_syntax() {
        let analyzer = PythonAnalyzer::new();
        let err = analyzer.parse("def broken(:\n    pass\n").unwrap_err();
        assert!(matches!(err, AnalyzeError::Syntax(_)));
        assert!(err.to_string().starts_with("Syntax error: "));
    }

    #[test]
    fn empty_module_yields_empty_report() {
        let analyzer = PythonAnalyzer::new();
        let ast = analyzer.parse("").unwrap();
        let report = analyzer.analyze(&ast);
        assert!(report.refactoring_suggestions.is_empty());
        assert!(report.architectural_insights.is_empty());
        assert!(report.detected_patterns.is_empty());
        assert!(report.function_metrics.is_empty());
        assert!(report.class_metrics.is_empty());
    }
}
