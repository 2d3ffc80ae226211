//! Anti-pattern and code smell detectors: god object, feature envy,
//! dead code

use std::collections::HashSet;

use rustpython_parser::ast;

use crate::analyzers::ast_walk::{as_func_def, walk_body, ModuleSource, Node};
use crate::config::AnalysisThresholds;
use crate::core::{CodePattern, PatternCategory, PatternLocation};

const GOD_OBJECT_CONFIDENCE: f64 = 0.7;
const FEATURE_ENVY_CONFIDENCE: f64 = 0.6;
const DEAD_CODE_CONFIDENCE: f64 = 0.5;

/// A class with more methods than the threshold is doing too much
pub fn detect_god_object(module: &ModuleSource, thresholds: &AnalysisThresholds) -> Vec<CodePattern> {
    let mut patterns = Vec::new();

    walk_body(module.body, &mut |node| {
        let Node::Stmt(ast::Stmt::ClassDef(class_def)) = node else {
            return;
        };
        let method_count = class_def
            .body
            .iter()
            .filter(|stmt| matches!(stmt, ast::Stmt::FunctionDef(_)))
            .count();

        if method_count > thresholds.god_object_methods {
            patterns.push(CodePattern {
                name: "God Object".to_string(),
                category: PatternCategory::AntiPattern,
                confidence: GOD_OBJECT_CONFIDENCE,
                locations: vec![PatternLocation::class_at(
                    class_def.name.as_str(),
                    module.lines.line_of(class_def.range.start().to_usize()),
                )],
                description: format!(
                    "Class '{}' has {} methods, suggesting God Object anti-pattern",
                    class_def.name, method_count
                ),
            });
        }
    });

    patterns
}

/// A method more interested in another object's attributes than its own.
/// Counts `<name>.<attr>` accesses per base identifier inside each method
/// body; a non-self identifier beating self's count (and reaching the
/// minimum) flags the method.
pub fn detect_feature_envy(
    module: &ModuleSource,
    thresholds: &AnalysisThresholds,
) -> Vec<CodePattern> {
    let mut patterns = Vec::new();

    walk_body(module.body, &mut |node| {
        let Node::Stmt(ast::Stmt::ClassDef(class_def)) = node else {
            return;
        };

        for stmt in &class_def.body {
            let Some(method) = as_func_def(stmt) else {
                continue;
            };

            let mut self_accesses = 0usize;
            // first-seen insertion order keeps output deterministic
            let mut external: Vec<(String, usize)> = Vec::new();

            walk_body(method.body, &mut |inner| {
                let Node::Expr(ast::Expr::Attribute(attribute)) = inner else {
                    return;
                };
                let ast::Expr::Name(name) = attribute.value.as_ref() else {
                    return;
                };
                if name.id.as_str() == "self" {
                    self_accesses += 1;
                } else {
                    match external.iter_mut().find(|(id, _)| id == name.id.as_str()) {
                        Some(entry) => entry.1 += 1,
                        None => external.push((name.id.to_string(), 1)),
                    }
                }
            });

            for (object, count) in &external {
                if *count > self_accesses && *count >= thresholds.feature_envy_min_accesses {
                    patterns.push(CodePattern {
                        name: "Feature Envy".to_string(),
                        category: PatternCategory::CodeSmell,
                        confidence: FEATURE_ENVY_CONFIDENCE,
                        locations: vec![PatternLocation::function_at(
                            method.name,
                            module.lines.line_of(method.start),
                        )
                        .with_envied_object(object.clone())],
                        description: format!(
                            "Function '{}' accesses '{}' more than self",
                            method.name, object
                        ),
                    });
                }
            }
        }
    });

    patterns
}

/// Top-level functions never called anywhere in the file, by bare name
/// or attribute name. Private helpers (`_`-prefixed), `main`, and
/// `test_`-prefixed functions are excluded. Findings come out in
/// definition order.
pub fn detect_dead_code(module: &ModuleSource, _thresholds: &AnalysisThresholds) -> Vec<CodePattern> {
    let mut called: HashSet<&str> = HashSet::new();
    walk_body(module.body, &mut |node| {
        let Node::Expr(ast::Expr::Call(call)) = node else {
            return;
        };
        match call.func.as_ref() {
            ast::Expr::Name(name) => {
                called.insert(name.id.as_str());
            }
            ast::Expr::Attribute(attribute) => {
                called.insert(attribute.attr.as_str());
            }
            _ => {}
        }
    });

    module
        .body
        .iter()
        .filter_map(as_func_def)
        .filter(|func| {
            !called.contains(func.name)
                && !func.name.starts_with('_')
                && func.name != "main"
                && !func.name.starts_with("test_")
        })
        .map(|func| CodePattern {
            name: "Dead Code".to_string(),
            category: PatternCategory::CodeSmell,
            confidence: DEAD_CODE_CONFIDENCE,
            locations: vec![PatternLocation::function_at(
                func.name,
                module.lines.line_of(func.start),
            )],
            description: format!("Function '{}' appears to be unused", func.name),
        })
        .collect()
}
