//! Design pattern detectors: singleton and factory

use rustpython_parser::ast;

use crate::analyzers::ast_walk::{as_func_def, walk_body, ModuleSource, Node};
use crate::config::AnalysisThresholds;
use crate::core::{CodePattern, PatternCategory, PatternLocation};

const SINGLETON_CONFIDENCE: f64 = 0.8;
const FACTORY_CONFIDENCE: f64 = 0.6;

const FACTORY_NAME_HINTS: &[&str] = &["create", "make", "build", "factory"];

/// A class defining `__new__` whose method bodies reference an attribute
/// named `_instance` is an implementation of the Singleton pattern.
pub fn detect_singleton(module: &ModuleSource, _thresholds: &AnalysisThresholds) -> Vec<CodePattern> {
    let mut patterns = Vec::new();

    walk_body(module.body, &mut |node| {
        let Node::Stmt(ast::Stmt::ClassDef(class_def)) = node else {
            return;
        };

        let mut has_new_method = false;
        let mut references_instance = false;

        for stmt in &class_def.body {
            let Some(method) = as_func_def(stmt) else {
                continue;
            };
            if method.name == "__new__" {
                has_new_method = true;
            }
            walk_body(method.body, &mut |inner| {
                if let Node::Expr(ast::Expr::Attribute(attribute)) = inner {
                    if attribute.attr.as_str() == "_instance" {
                        references_instance = true;
                    }
                }
            });
        }

        if has_new_method && references_instance {
            patterns.push(CodePattern {
                name: "Singleton Pattern".to_string(),
                category: PatternCategory::DesignPattern,
                confidence: SINGLETON_CONFIDENCE,
                locations: vec![PatternLocation::class_at(
                    class_def.name.as_str(),
                    module.lines.line_of(class_def.range.start().to_usize()),
                )],
                description: "Implementation of Singleton design pattern detected".to_string(),
            });
        }
    });

    patterns
}

/// A top-level function named like a constructor (create/make/build/
/// factory) with multiple return statements looks like a Factory.
pub fn detect_factory(module: &ModuleSource, thresholds: &AnalysisThresholds) -> Vec<CodePattern> {
    let mut patterns = Vec::new();

    for stmt in module.body {
        let Some(func) = as_func_def(stmt) else {
            continue;
        };
        let lowered = func.name.to_lowercase();
        if !FACTORY_NAME_HINTS.iter().any(|hint| lowered.contains(hint)) {
            continue;
        }

        let returns = crate::metrics::count_returns(func.body);
        if returns >= thresholds.factory_min_returns {
            patterns.push(CodePattern {
                name: "Factory Pattern".to_string(),
                category: PatternCategory::DesignPattern,
                confidence: FACTORY_CONFIDENCE,
                locations: vec![PatternLocation::function_at(
                    func.name,
                    module.lines.line_of(func.start),
                )],
                description: "Possible Factory pattern implementation detected".to_string(),
            });
        }
    }

    patterns
}
