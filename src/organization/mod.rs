//! Cross-entity architectural analyses: dependency fan-out, MVC naming,
//! constructor-injected dependencies, error-handling coverage.

use rustpython_parser::ast;

use crate::analyzers::ast_walk::{as_func_def, walk_body, ModuleSource, Node};
use crate::config::AnalysisThresholds;
use crate::core::{ArchitecturalInsight, Severity};

const STDLIB_PREFIXES: &[&str] = &["os", "sys", "re", "json", "math", "datetime"];
const MVC_TERMS: &[&str] = &["model", "view", "controller"];

/// Run every architectural analysis in a fixed order
pub fn analyze_architecture(
    module: &ModuleSource,
    thresholds: &AnalysisThresholds,
) -> Vec<ArchitecturalInsight> {
    let mut insights = Vec::new();
    insights.extend(dependency_fan_out(module, thresholds));
    insights.extend(detect_mvc(module));
    insights.extend(detect_dependency_injection(module, thresholds));
    insights.extend(error_handling_coverage(module, thresholds));
    insights
}

/// Classify imports and flag heavy third-party fan-out
fn dependency_fan_out(
    module: &ModuleSource,
    thresholds: &AnalysisThresholds,
) -> Option<ArchitecturalInsight> {
    let mut imports: Vec<String> = Vec::new();
    walk_body(module.body, &mut |node| {
        let Node::Stmt(stmt) = node else { return };
        match stmt {
            ast::Stmt::Import(import) => {
                for alias in &import.names {
                    imports.push(alias.name.to_string());
                }
            }
            ast::Stmt::ImportFrom(import_from) => {
                if let Some(from_module) = &import_from.module {
                    for alias in &import_from.names {
                        imports.push(format!("{}.{}", from_module, alias.name));
                    }
                }
            }
            _ => {}
        }
    });

    let third_party: Vec<&String> = imports
        .iter()
        .filter(|import| {
            !STDLIB_PREFIXES
                .iter()
                .any(|prefix| import.starts_with(prefix))
                && import.contains('.')
                && !import.starts_with('.')
        })
        .collect();

    if third_party.len() > thresholds.max_third_party_imports {
        Some(ArchitecturalInsight {
            kind: "dependency".to_string(),
            description: format!(
                "High number of third-party dependencies ({})",
                third_party.len()
            ),
            components: third_party.iter().take(5).map(|s| s.to_string()).collect(),
            severity: Severity::Warning,
            recommendation: "Consider reducing dependencies to improve maintainability"
                .to_string(),
        })
    } else {
        None
    }
}

/// Class names covering model, view, and controller indicate MVC
fn detect_mvc(module: &ModuleSource) -> Option<ArchitecturalInsight> {
    let mut class_names: Vec<String> = Vec::new();
    walk_body(module.body, &mut |node| {
        if let Node::Stmt(ast::Stmt::ClassDef(class_def)) = node {
            class_names.push(class_def.name.to_lowercase());
        }
    });

    let covers_all = MVC_TERMS
        .iter()
        .all(|term| class_names.iter().any(|name| name.contains(term)));
    if !covers_all {
        return None;
    }

    let components: Vec<String> = class_names
        .iter()
        .filter(|name| MVC_TERMS.iter().any(|term| name.contains(term)))
        .cloned()
        .collect();

    Some(ArchitecturalInsight {
        kind: "pattern".to_string(),
        description: "MVC architectural pattern detected".to_string(),
        components,
        severity: Severity::Info,
        recommendation: "Ensure clear separation of concerns between MVC components".to_string(),
    })
}

/// An `__init__` accepting several non-self parameters suggests
/// constructor-injected dependencies
fn detect_dependency_injection(
    module: &ModuleSource,
    thresholds: &AnalysisThresholds,
) -> Vec<ArchitecturalInsight> {
    let mut insights = Vec::new();

    walk_body(module.body, &mut |node| {
        let Node::Stmt(stmt) = node else { return };
        let Some(func) = as_func_def(stmt) else { return };
        if func.name != "__init__" {
            return;
        }

        let injected: Vec<String> = func
            .args
            .posonlyargs
            .iter()
            .chain(func.args.args.iter())
            .map(|arg| arg.def.arg.to_string())
            .filter(|name| name != "self")
            .collect();

        if injected.len() >= thresholds.injected_dependency_params {
            insights.push(ArchitecturalInsight {
                kind: "pattern".to_string(),
                description: "Dependency injection pattern detected".to_string(),
                components: injected,
                severity: Severity::Info,
                recommendation: "Good use of dependency injection for testability".to_string(),
            });
        }
    });

    insights
}

/// Warn when markedly fewer try blocks exist than functions
fn error_handling_coverage(
    module: &ModuleSource,
    thresholds: &AnalysisThresholds,
) -> Option<ArchitecturalInsight> {
    let mut try_blocks = 0usize;
    let mut functions = 0usize;
    walk_body(module.body, &mut |node| {
        let Node::Stmt(stmt) = node else { return };
        match stmt {
            ast::Stmt::Try(_) | ast::Stmt::TryStar(_) => try_blocks += 1,
            ast::Stmt::FunctionDef(_) | ast::Stmt::AsyncFunctionDef(_) => functions += 1,
            _ => {}
        }
    });

    if functions == 0 {
        return None;
    }
    let ratio = try_blocks as f64 / functions as f64;
    if ratio >= thresholds.min_error_handling_ratio {
        return None;
    }

    Some(ArchitecturalInsight {
        kind: "pattern".to_string(),
        description: "Low error handling coverage".to_string(),
        components: vec![format!(
            "{} try blocks in {} functions",
            try_blocks, functions
        )],
        severity: Severity::Warning,
        recommendation: "Consider adding more comprehensive error handling".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::ast_walk::LineIndex;
    use indoc::indoc;
    use rustpython_parser::{parse, Mode};

    fn insights_for(source: &str) -> Vec<ArchitecturalInsight> {
        let module = match parse(source, Mode::Module, "<test>").unwrap() {
            ast::Mod::Module(m) => m,
            _ => unreachable!(),
        };
        let lines = LineIndex::new(source);
        analyze_architecture(
            &ModuleSource {
                body: &module.body,
                lines: &lines,
            },
            &AnalysisThresholds::default(),
        )
    }

    #[test]
    fn mvc_requires_all_three_roles() {
        let insights = insights_for(indoc! {"
            class UserModel:
                pass

            class UserView:
                pass
        "});
        assert!(!insights
            .iter()
            .any(|i| i.description.contains("MVC")));

        let insights = insights_for(indoc! {"
            class UserModel:
                pass

            class UserView:
                pass

            class UserController:
                pass
        "});
        let mvc = insights
            .iter()
            .find(|i| i.description.contains("MVC"))
            .unwrap();
        assert_eq!(mvc.severity, Severity::Info);
        assert_eq!(
            mvc.components,
            vec!["usermodel", "userview", "usercontroller"]
        );
    }

    #[test]
    fn dependency_injection_needs_four_non_self_params() {
        let below = insights_for(indoc! {"
            class Service:
                def __init__(self, db, cache, logger):
                    pass
        "});
        assert!(!below
            .iter()
            .any(|i| i.description.contains("Dependency injection")));

        let at = insights_for(indoc! {"
            class Service:
                def __init__(self, db, cache, logger, mailer):
                    pass
        "});
        let di = at
            .iter()
            .find(|i| i.description.contains("Dependency injection"))
            .unwrap();
        assert_eq!(di.components, vec!["db", "cache", "logger", "mailer"]);
    }

    #[test]
    fn low_error_handling_coverage_is_flagged() {
        let insights = insights_for(indoc! {"
            def a():
                pass

            def b():
                pass

            def c():
                pass
        "});
        let coverage = insights
            .iter()
            .find(|i| i.description.contains("error handling"))
            .unwrap();
        assert_eq!(coverage.severity, Severity::Warning);
        assert_eq!(coverage.components, vec!["0 try blocks in 3 functions"]);
    }

    #[test]
    fn well_covered_code_gets_no_error_handling_insight() {
        let insights = insights_for(indoc! {"
            def a():
                try:
                    pass
                except ValueError:
                    pass
        "});
        assert!(!insights
            .iter()
            .any(|i| i.description.contains("error handling")));
    }
}
