//! Refactoring advisor: threshold-driven suggestions derived from the
//! metric maps plus two separate structural checks (nesting depth and
//! duplicate bodies).

pub mod duplication;

use rustpython_parser::ast;

use crate::analyzers::ast_walk::{as_func_def, walk_body, ModuleSource, Node};
use crate::config::AnalysisThresholds;
use crate::core::{
    ClassMetrics, Effort, FunctionMetrics, ImpactArea, MetricsMap, Priority,
    RefactoringSuggestion,
};

/// Produce every suggestion for the module, in a stable order: metric
/// checks per function, then per class, then duplicate bodies, then the
/// strict parameter-list check, then nesting depth.
pub fn generate_suggestions(
    module: &ModuleSource,
    functions: &MetricsMap<FunctionMetrics>,
    classes: &MetricsMap<ClassMetrics>,
    thresholds: &AnalysisThresholds,
) -> Vec<RefactoringSuggestion> {
    let mut suggestions = Vec::new();

    for (name, metrics) in functions.iter() {
        suggestions.extend(detect_long_function(name, metrics, thresholds));
        suggestions.extend(detect_complex_function(name, metrics, thresholds));
        suggestions.extend(detect_many_parameters(name, metrics, thresholds));
    }

    for (name, metrics) in classes.iter() {
        suggestions.extend(detect_large_class(name, metrics, thresholds));
        suggestions.extend(detect_deep_inheritance(name, metrics, thresholds));
    }

    suggestions.extend(duplication::detect_duplicate_bodies(module, thresholds));
    suggestions.extend(detect_long_parameter_lists(functions, thresholds));
    suggestions.extend(detect_deep_nesting(module, thresholds));

    suggestions
}

/// Functions longer than the line threshold should be split up
pub fn detect_long_function(
    name: &str,
    metrics: &FunctionMetrics,
    thresholds: &AnalysisThresholds,
) -> Option<RefactoringSuggestion> {
    if metrics.lines_of_code <= thresholds.max_function_length {
        return None;
    }
    Some(RefactoringSuggestion {
        kind: "extract_method".to_string(),
        location: format!("{}:{}", name, metrics.line_number),
        description: format!(
            "Function '{}' is too long ({} lines)",
            name, metrics.lines_of_code
        ),
        reasoning: "Long functions are harder to understand, test, and maintain".to_string(),
        priority: Priority::Medium,
        estimated_effort: Effort::Medium,
        impact: ImpactArea::Maintainability,
    })
}

pub fn detect_complex_function(
    name: &str,
    metrics: &FunctionMetrics,
    thresholds: &AnalysisThresholds,
) -> Option<RefactoringSuggestion> {
    if !metrics.is_complex(thresholds.max_cyclomatic_complexity) {
        return None;
    }
    Some(RefactoringSuggestion {
        kind: "reduce_complexity".to_string(),
        location: format!("{}:{}", name, metrics.line_number),
        description: format!(
            "Function '{}' has high complexity ({})",
            name, metrics.cyclomatic_complexity
        ),
        reasoning: "High complexity increases the likelihood of bugs and makes testing difficult"
            .to_string(),
        priority: Priority::High,
        estimated_effort: Effort::Large,
        impact: ImpactArea::Maintainability,
    })
}

pub fn detect_many_parameters(
    name: &str,
    metrics: &FunctionMetrics,
    thresholds: &AnalysisThresholds,
) -> Option<RefactoringSuggestion> {
    if metrics.parameter_count <= thresholds.max_parameter_count {
        return None;
    }
    Some(RefactoringSuggestion {
        kind: "parameter_object".to_string(),
        location: format!("{}:{}", name, metrics.line_number),
        description: format!(
            "Function '{}' has too many parameters ({})",
            name, metrics.parameter_count
        ),
        reasoning: "Too many parameters suggest the function may be doing too much".to_string(),
        priority: Priority::Medium,
        estimated_effort: Effort::Medium,
        impact: ImpactArea::Readability,
    })
}

pub fn detect_large_class(
    name: &str,
    metrics: &ClassMetrics,
    thresholds: &AnalysisThresholds,
) -> Option<RefactoringSuggestion> {
    if metrics.method_count <= thresholds.max_class_methods {
        return None;
    }
    Some(RefactoringSuggestion {
        kind: "split_class".to_string(),
        location: format!("{}:{}", name, metrics.line_number),
        description: format!(
            "Class '{}' has too many methods ({})",
            name, metrics.method_count
        ),
        reasoning: "Large classes violate the Single Responsibility Principle".to_string(),
        priority: Priority::High,
        estimated_effort: Effort::Large,
        impact: ImpactArea::Maintainability,
    })
}

pub fn detect_deep_inheritance(
    name: &str,
    metrics: &ClassMetrics,
    thresholds: &AnalysisThresholds,
) -> Option<RefactoringSuggestion> {
    if metrics.inheritance_depth <= thresholds.max_inheritance_depth {
        return None;
    }
    Some(RefactoringSuggestion {
        kind: "reduce_coupling".to_string(),
        location: format!("{}:{}", name, metrics.line_number),
        description: format!(
            "Class '{}' lists {} base classes",
            name, metrics.inheritance_depth
        ),
        reasoning: "Deep inheritance hierarchies couple subclasses to many ancestors".to_string(),
        priority: Priority::Medium,
        estimated_effort: Effort::Medium,
        impact: ImpactArea::Maintainability,
    })
}

/// Stricter, separate check for extreme parameter lists
fn detect_long_parameter_lists(
    functions: &MetricsMap<FunctionMetrics>,
    thresholds: &AnalysisThresholds,
) -> Vec<RefactoringSuggestion> {
    functions
        .iter()
        .filter(|(_, m)| m.parameter_count > thresholds.long_parameter_list)
        .map(|(name, m)| RefactoringSuggestion {
            kind: "introduce_parameter_object".to_string(),
            location: format!("{}:{}", name, m.line_number),
            description: format!("Function '{}' has {} parameters", name, m.parameter_count),
            reasoning: "Long parameter lists are hard to remember and use".to_string(),
            priority: Priority::Medium,
            estimated_effort: Effort::Medium,
            impact: ImpactArea::Readability,
        })
        .collect()
}

/// Walk nested control blocks to find each function's maximum depth
fn detect_deep_nesting(
    module: &ModuleSource,
    thresholds: &AnalysisThresholds,
) -> Vec<RefactoringSuggestion> {
    let mut suggestions = Vec::new();

    walk_body(module.body, &mut |node| {
        let Node::Stmt(stmt) = node else { return };
        let Some(func) = as_func_def(stmt) else { return };

        let depth = nesting_depth(func.body, 0);
        if depth > thresholds.max_nesting_depth {
            suggestions.push(RefactoringSuggestion {
                kind: "reduce_nesting".to_string(),
                location: format!("{}:{}", func.name, module.lines.line_of(func.start)),
                description: format!(
                    "Function '{}' has deep nesting (depth {})",
                    func.name, depth
                ),
                reasoning: "Deep nesting makes code hard to follow and understand".to_string(),
                priority: Priority::Medium,
                estimated_effort: Effort::Medium,
                impact: ImpactArea::Readability,
            });
        }
    });

    suggestions
}

/// Maximum depth of nested control blocks (if/while/for/with/try)
pub fn nesting_depth(body: &[ast::Stmt], current: u32) -> u32 {
    let mut max_depth = current;
    for stmt in body {
        let depth = match stmt {
            ast::Stmt::If(s) => {
                nesting_blocks(&[s.body.as_slice(), s.orelse.as_slice()], current + 1)
            }
            ast::Stmt::While(s) => {
                nesting_blocks(&[s.body.as_slice(), s.orelse.as_slice()], current + 1)
            }
            ast::Stmt::For(s) => {
                nesting_blocks(&[s.body.as_slice(), s.orelse.as_slice()], current + 1)
            }
            ast::Stmt::AsyncFor(s) => {
                nesting_blocks(&[s.body.as_slice(), s.orelse.as_slice()], current + 1)
            }
            ast::Stmt::With(s) => nesting_depth(&s.body, current + 1),
            ast::Stmt::AsyncWith(s) => nesting_depth(&s.body, current + 1),
            ast::Stmt::Try(s) => {
                let mut d = nesting_blocks(
                    &[s.body.as_slice(), s.orelse.as_slice(), s.finalbody.as_slice()],
                    current + 1,
                );
                for handler in &s.handlers {
                    let ast::ExceptHandler::ExceptHandler(h) = handler;
                    d = d.max(nesting_depth(&h.body, current + 1));
                }
                d
            }
            ast::Stmt::FunctionDef(s) => nesting_depth(&s.body, current),
            ast::Stmt::AsyncFunctionDef(s) => nesting_depth(&s.body, current),
            ast::Stmt::ClassDef(s) => nesting_depth(&s.body, current),
            _ => current,
        };
        max_depth = max_depth.max(depth);
    }
    max_depth
}

fn nesting_blocks(blocks: &[&[ast::Stmt]], current: u32) -> u32 {
    blocks
        .iter()
        .map(|block| nesting_depth(block, current))
        .max()
        .unwrap_or(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use rustpython_parser::{parse, Mode};

    fn body_of(source: &str) -> Vec<ast::Stmt> {
        match parse(source, Mode::Module, "<test>").unwrap() {
            ast::Mod::Module(m) => m.body,
            _ => unreachable!(),
        }
    }

    #[test]
    fn nesting_depth_counts_control_blocks_only() {
        let body = body_of(indoc! {"
            def f(x):
                if x:
                    for i in x:
                        while i:
                            with open('f'):
                                try:
                                    pass
                                except ValueError:
                                    pass
        "});
        assert_eq!(nesting_depth(&body, 0), 5);
    }

    #[test]
    fn flat_function_has_zero_nesting() {
        let body = body_of(indoc! {"
            def f(x):
                y = x + 1
                return y
        "});
        assert_eq!(nesting_depth(&body, 0), 0);
    }
}
