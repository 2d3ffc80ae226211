//! Metric calculator: one pre-order pass over the tree producing
//! name-keyed function and class metric maps in definition order.

use rustpython_parser::ast;

use crate::analyzers::ast_walk::{as_func_def, walk_body, FuncDef, LineIndex, ModuleSource, Node};
use crate::core::{ClassMetrics, FunctionMetrics, MetricsMap};

/// Collect metrics for every function and class definition in the module.
///
/// Definitions are keyed by name; a later definition with the same name
/// replaces the earlier entry (last write wins).
pub fn collect_metrics(
    module: &ModuleSource,
) -> (MetricsMap<FunctionMetrics>, MetricsMap<ClassMetrics>) {
    let mut functions = MetricsMap::new();
    let mut classes = MetricsMap::new();

    walk_body(module.body, &mut |node| {
        if let Node::Stmt(stmt) = node {
            if let Some(func) = as_func_def(stmt) {
                functions.insert(func.name, function_metrics(&func, module.lines));
            } else if let ast::Stmt::ClassDef(class_def) = stmt {
                classes.insert(class_def.name.as_str(), class_metrics(class_def, module.lines));
            }
        }
    });

    (functions, classes)
}

pub fn function_metrics(func: &FuncDef, lines: &LineIndex) -> FunctionMetrics {
    FunctionMetrics {
        lines_of_code: lines.line_span(func.start, func.end),
        parameter_count: parameter_count(func.args),
        cyclomatic_complexity: cyclomatic_complexity(func.body),
        return_statements: count_returns(func.body),
        nested_functions: count_nested_definitions(func.body),
        has_docstring: has_docstring(func.body),
        line_number: lines.line_of(func.start),
    }
}

pub fn class_metrics(class_def: &ast::StmtClassDef, lines: &LineIndex) -> ClassMetrics {
    let methods: Vec<&str> = class_def
        .body
        .iter()
        .filter_map(|stmt| match stmt {
            ast::Stmt::FunctionDef(f) => Some(f.name.as_str()),
            _ => None,
        })
        .collect();
    let properties = class_def
        .body
        .iter()
        .filter(|stmt| matches!(stmt, ast::Stmt::AsyncFunctionDef(_)))
        .count();

    let magic = methods
        .iter()
        .filter(|name| name.starts_with("__") && name.ends_with("__"))
        .count();
    let private = methods
        .iter()
        .filter(|name| name.starts_with('_') && !name.starts_with("__"))
        .count();
    let public = methods.iter().filter(|name| !name.starts_with('_')).count();

    ClassMetrics {
        method_count: methods.len(),
        property_count: properties,
        public_methods: public,
        private_methods: private,
        magic_methods: magic,
        inheritance_depth: class_def.bases.len(),
        has_docstring: has_docstring(&class_def.body),
        line_number: lines.line_of(class_def.range.start().to_usize()),
    }
}

/// All parameter slots: positional-only, positional, *args, keyword-only,
/// **kwargs.
pub fn parameter_count(args: &ast::Arguments) -> usize {
    let mut count = args.posonlyargs.len() + args.args.len() + args.kwonlyargs.len();
    if args.vararg.is_some() {
        count += 1;
    }
    if args.kwarg.is_some() {
        count += 1;
    }
    count
}

/// Simplified McCabe approximation: 1 + one per branching construct
/// (if/elif, loops, except handler clauses, with blocks, asserts,
/// boolean-operator chains) anywhere in the subtree. Not the canonical
/// control-flow-graph computation.
pub fn cyclomatic_complexity(body: &[ast::Stmt]) -> u32 {
    let mut complexity = 1;
    walk_body(body, &mut |node| match node {
        Node::Stmt(stmt) => match stmt {
            ast::Stmt::If(_)
            | ast::Stmt::While(_)
            | ast::Stmt::For(_)
            | ast::Stmt::AsyncFor(_)
            | ast::Stmt::With(_)
            | ast::Stmt::AsyncWith(_)
            | ast::Stmt::Assert(_) => complexity += 1,
            _ => {}
        },
        Node::Handler(_) => complexity += 1,
        Node::Expr(ast::Expr::BoolOp(_)) => complexity += 1,
        Node::Expr(_) => {}
    });
    complexity
}

pub fn count_returns(body: &[ast::Stmt]) -> usize {
    let mut returns = 0;
    walk_body(body, &mut |node| {
        if matches!(node, Node::Stmt(ast::Stmt::Return(_))) {
            returns += 1;
        }
    });
    returns
}

fn count_nested_definitions(body: &[ast::Stmt]) -> usize {
    let mut nested = 0;
    walk_body(body, &mut |node| {
        if matches!(
            node,
            Node::Stmt(
                ast::Stmt::FunctionDef(_)
                    | ast::Stmt::AsyncFunctionDef(_)
                    | ast::Stmt::ClassDef(_)
            )
        ) {
            nested += 1;
        }
    });
    nested
}

/// A definition has a docstring iff its first body statement is an
/// expression statement holding a string constant.
pub fn has_docstring(body: &[ast::Stmt]) -> bool {
    body.first().is_some_and(|stmt| {
        if let ast::Stmt::Expr(expr) = stmt {
            if let ast::Expr::Constant(constant) = expr.value.as_ref() {
                return matches!(constant.value, ast::Constant::Str(_));
            }
        }
        false
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use rustpython_parser::{parse, Mode};

    fn metrics_for(source: &str) -> (MetricsMap<FunctionMetrics>, MetricsMap<ClassMetrics>) {
        let module = match parse(source, Mode::Module, "<test>").unwrap() {
            ast::Mod::Module(m) => m,
            _ => unreachable!(),
        };
        let lines = LineIndex::new(source);
        collect_metrics(&ModuleSource {
            body: &module.body,
            lines: &lines,
        })
    }

    #[test]
    fn straight_line_function_has_base_complexity() {
        let (functions, _) = metrics_for(indoc! {"
            def f(a, b):
                x = a + b
                return x
        "});
        let m = functions.get("f").unwrap();
        assert_eq!(m.cyclomatic_complexity, 1);
        assert_eq!(m.parameter_count, 2);
        assert_eq!(m.return_statements, 1);
        assert_eq!(m.lines_of_code, 3);
        assert_eq!(m.line_number, 1);
        assert!(!m.has_docstring);
    }

    #[test]
    fn branching_constructs_each_add_one() {
        let (functions, _) = metrics_for(indoc! {"
            def f(x):
                assert x
                if x > 0:
                    for i in range(x):
                        pass
                while x:
                    x -= 1
                try:
                    with open('f') as fh:
                        pass
                except ValueError:
                    pass
                except KeyError:
                    pass
                return x and x > 1
        "});
        // 1 + assert + if + for + while + with + 2 handlers + bool op
        assert_eq!(functions.get("f").unwrap().cyclomatic_complexity, 9);
    }

    #[test]
    fn docstring_requires_leading_string_expression() {
        let (functions, _) = metrics_for(indoc! {r#"
            def documented():
                """Does things."""
                return 1

            def undocumented():
                x = "not a docstring"
                return x
        "#});
        assert!(functions.get("documented").unwrap().has_docstring);
        assert!(!functions.get("undocumented").unwrap().has_docstring);
    }

    #[test]
    fn nested_definitions_are_counted_and_collected() {
        let (functions, _) = metrics_for(indoc! {"
            def outer():
                def inner():
                    pass
                return inner
        "});
        assert_eq!(functions.get("outer").unwrap().nested_functions, 1);
        // the nested definition gets its own entry too
        assert!(functions.contains("inner"));
    }

    #[test]
    fn class_method_kinds_are_split() {
        let (_, classes) = metrics_for(indoc! {r#"
            class Widget(Base, Mixin):
                """A widget."""

                def __init__(self):
                    pass

                def render(self):
                    pass

                def _validate(self):
                    pass

                async def fetch(self):
                    pass
        "#});
        let m = classes.get("Widget").unwrap();
        assert_eq!(m.method_count, 3);
        assert_eq!(m.property_count, 1);
        assert_eq!(m.public_methods, 1);
        assert_eq!(m.private_methods, 1);
        assert_eq!(m.magic_methods, 1);
        assert_eq!(m.inheritance_depth, 2);
        assert!(m.has_docstring);
    }

    #[test]
    fn metric_collection_is_idempotent() {
        let source = indoc! {"
            def f(x):
                if x:
                    return 1
                return 0

            class C:
                def m(self):
                    pass
        "};
        let first = metrics_for(source);
        let second = metrics_for(source);
        assert_eq!(first, second);
    }

    #[test]
    fn duplicate_names_last_write_wins() {
        let (functions, _) = metrics_for(indoc! {"
            def f():
                return 1

            def f(x, y):
                return x + y
        "});
        assert_eq!(functions.len(), 1);
        assert_eq!(functions.get("f").unwrap().parameter_count, 2);
    }
}
