//! Duplicate-body detection: render each function body to a normalized
//! structural token dump (no source offsets), then compare all pairs
//! with Jaccard similarity over whitespace-split tokens. O(n²) in
//! function count per file; fine for single-file analysis.

use std::collections::HashSet;

use rustpython_parser::ast;

use crate::analyzers::ast_walk::{as_func_def, walk_body, ModuleSource, Node};
use crate::config::AnalysisThresholds;
use crate::core::{Effort, ImpactArea, Priority, RefactoringSuggestion};

pub fn detect_duplicate_bodies(
    module: &ModuleSource,
    thresholds: &AnalysisThresholds,
) -> Vec<RefactoringSuggestion> {
    let mut bodies: Vec<(String, String, usize)> = Vec::new();
    walk_body(module.body, &mut |node| {
        let Node::Stmt(stmt) = node else { return };
        if let Some(func) = as_func_def(stmt) {
            bodies.push((
                func.name.to_string(),
                structural_dump(func.body),
                module.lines.line_of(func.start),
            ));
        }
    });

    let mut suggestions = Vec::new();
    for (i, (name1, dump1, line1)) in bodies.iter().enumerate() {
        for (name2, dump2, line2) in bodies.iter().skip(i + 1) {
            if dump1.len() <= thresholds.min_duplicate_body_chars
                || dump2.len() <= thresholds.min_duplicate_body_chars
            {
                continue;
            }
            if token_set_similarity(dump1, dump2) >= thresholds.duplication_similarity {
                suggestions.push(RefactoringSuggestion {
                    kind: "extract_common_code".to_string(),
                    location: format!("{}:{}, {}:{}", name1, line1, name2, line2),
                    description: format!(
                        "Functions '{}' and '{}' have similar implementations",
                        name1, name2
                    ),
                    reasoning: "Duplicate code increases maintenance burden".to_string(),
                    priority: Priority::Medium,
                    estimated_effort: Effort::Medium,
                    impact: ImpactArea::Maintainability,
                });
            }
        }
    }
    suggestions
}

/// Jaccard similarity over whitespace-split tokens
pub fn token_set_similarity(a: &str, b: &str) -> f64 {
    let set_a: HashSet<&str> = a.split_whitespace().collect();
    let set_b: HashSet<&str> = b.split_whitespace().collect();

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();

    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Render a statement body as a whitespace-separated stream of node
/// kinds, identifiers, attribute names, operators, and constants.
/// Source offsets are deliberately absent so identical structures at
/// different file positions compare equal.
pub fn structural_dump(body: &[ast::Stmt]) -> String {
    let mut tokens: Vec<String> = Vec::new();
    walk_body(body, &mut |node| match node {
        Node::Stmt(stmt) => tokens.push(stmt_tag(stmt).to_string()),
        Node::Handler(_) => tokens.push("ExceptHandler".to_string()),
        Node::Expr(expr) => push_expr_tokens(expr, &mut tokens),
    });
    tokens.join(" ")
}

fn stmt_tag(stmt: &ast::Stmt) -> &'static str {
    use ast::Stmt::*;
    match stmt {
        FunctionDef(_) => "FunctionDef",
        AsyncFunctionDef(_) => "AsyncFunctionDef",
        ClassDef(_) => "ClassDef",
        Return(_) => "Return",
        Delete(_) => "Delete",
        Assign(_) => "Assign",
        AugAssign(_) => "AugAssign",
        AnnAssign(_) => "AnnAssign",
        For(_) => "For",
        AsyncFor(_) => "AsyncFor",
        While(_) => "While",
        If(_) => "If",
        With(_) => "With",
        AsyncWith(_) => "AsyncWith",
        Match(_) => "Match",
        Raise(_) => "Raise",
        Try(_) => "Try",
        TryStar(_) => "TryStar",
        Assert(_) => "Assert",
        Import(_) => "Import",
        ImportFrom(_) => "ImportFrom",
        Global(_) => "Global",
        Nonlocal(_) => "Nonlocal",
        Expr(_) => "Expr",
        Pass(_) => "Pass",
        Break(_) => "Break",
        Continue(_) => "Continue",
        _ => "Stmt",
    }
}

fn push_expr_tokens(expr: &ast::Expr, tokens: &mut Vec<String>) {
    use ast::Expr::*;
    match expr {
        Name(name) => {
            tokens.push("Name".to_string());
            tokens.push(name.id.to_string());
        }
        Attribute(attribute) => {
            tokens.push("Attribute".to_string());
            tokens.push(attribute.attr.to_string());
        }
        Constant(constant) => {
            tokens.push("Constant".to_string());
            tokens.push(constant_token(&constant.value));
        }
        BoolOp(b) => tokens.push(format!("BoolOp:{:?}", b.op)),
        BinOp(b) => tokens.push(format!("BinOp:{:?}", b.op)),
        UnaryOp(u) => tokens.push(format!("UnaryOp:{:?}", u.op)),
        Compare(c) => {
            tokens.push("Compare".to_string());
            for op in &c.ops {
                tokens.push(format!("{:?}", op));
            }
        }
        NamedExpr(_) => tokens.push("NamedExpr".to_string()),
        Lambda(_) => tokens.push("Lambda".to_string()),
        IfExp(_) => tokens.push("IfExp".to_string()),
        Dict(_) => tokens.push("Dict".to_string()),
        Set(_) => tokens.push("Set".to_string()),
        ListComp(_) => tokens.push("ListComp".to_string()),
        SetComp(_) => tokens.push("SetComp".to_string()),
        DictComp(_) => tokens.push("DictComp".to_string()),
        GeneratorExp(_) => tokens.push("GeneratorExp".to_string()),
        Await(_) => tokens.push("Await".to_string()),
        Yield(_) => tokens.push("Yield".to_string()),
        YieldFrom(_) => tokens.push("YieldFrom".to_string()),
        Call(_) => tokens.push("Call".to_string()),
        FormattedValue(_) => tokens.push("FormattedValue".to_string()),
        JoinedStr(_) => tokens.push("JoinedStr".to_string()),
        Subscript(_) => tokens.push("Subscript".to_string()),
        Starred(_) => tokens.push("Starred".to_string()),
        List(_) => tokens.push("List".to_string()),
        Tuple(_) => tokens.push("Tuple".to_string()),
        Slice(_) => tokens.push("Slice".to_string()),
    }
}

fn constant_token(constant: &ast::Constant) -> String {
    use ast::Constant;
    match constant {
        Constant::None => "None".to_string(),
        Constant::Bool(b) => b.to_string(),
        Constant::Str(s) => format!("'{}'", s),
        Constant::Bytes(_) => "bytes".to_string(),
        Constant::Int(i) => i.to_string(),
        Constant::Float(f) => f.to_string(),
        Constant::Complex { real, imag } => format!("complex({},{})", real, imag),
        Constant::Tuple(_) => "tuple".to_string(),
        Constant::Ellipsis => "...".to_string(),
    }
}
