//! Generic pre-order traversal over a parsed Python module.
//!
//! The metric calculator, pattern detectors, and refactoring advisor all
//! need the same "every node, once, in source order" walk, so it lives
//! here instead of being re-implemented per feature.

use rustpython_parser::ast;

/// One visited node. Except handlers are surfaced separately because the
/// cyclomatic approximation counts each handler clause.
pub enum Node<'a> {
    Stmt(&'a ast::Stmt),
    Expr(&'a ast::Expr),
    Handler(&'a ast::ExceptHandler),
}

/// A parsed module plus the line index for its source text
pub struct ModuleSource<'a> {
    pub body: &'a [ast::Stmt],
    pub lines: &'a LineIndex,
}

/// Uniform view over sync and async function definitions
pub struct FuncDef<'a> {
    pub name: &'a str,
    pub args: &'a ast::Arguments,
    pub body: &'a [ast::Stmt],
    pub start: usize,
    pub end: usize,
    pub is_async: bool,
}

/// View a statement as a function definition, if it is one
pub fn as_func_def(stmt: &ast::Stmt) -> Option<FuncDef<'_>> {
    match stmt {
        ast::Stmt::FunctionDef(f) => Some(FuncDef {
            name: f.name.as_str(),
            args: &f.args,
            body: &f.body,
            start: f.range.start().to_usize(),
            end: f.range.end().to_usize(),
            is_async: false,
        }),
        ast::Stmt::AsyncFunctionDef(f) => Some(FuncDef {
            name: f.name.as_str(),
            args: &f.args,
            body: &f.body,
            start: f.range.start().to_usize(),
            end: f.range.end().to_usize(),
            is_async: true,
        }),
        _ => None,
    }
}

/// Walk every statement in a body, depth-first pre-order
pub fn walk_body<'a>(body: &'a [ast::Stmt], visit: &mut dyn FnMut(Node<'a>)) {
    for stmt in body {
        walk_stmt(stmt, visit);
    }
}

pub fn walk_stmt<'a>(stmt: &'a ast::Stmt, visit: &mut dyn FnMut(Node<'a>)) {
    visit(Node::Stmt(stmt));

    use ast::Stmt::*;
    match stmt {
        FunctionDef(f) => {
            for dec in &f.decorator_list {
                walk_expr(dec, visit);
            }
            walk_body(&f.body, visit);
        }
        AsyncFunctionDef(f) => {
            for dec in &f.decorator_list {
                walk_expr(dec, visit);
            }
            walk_body(&f.body, visit);
        }
        ClassDef(c) => {
            for dec in &c.decorator_list {
                walk_expr(dec, visit);
            }
            for base in &c.bases {
                walk_expr(base, visit);
            }
            for keyword in &c.keywords {
                walk_expr(&keyword.value, visit);
            }
            walk_body(&c.body, visit);
        }
        Return(r) => {
            if let Some(value) = &r.value {
                walk_expr(value, visit);
            }
        }
        Delete(d) => {
            for target in &d.targets {
                walk_expr(target, visit);
            }
        }
        Assign(a) => {
            for target in &a.targets {
                walk_expr(target, visit);
            }
            walk_expr(&a.value, visit);
        }
        AugAssign(a) => {
            walk_expr(&a.target, visit);
            walk_expr(&a.value, visit);
        }
        AnnAssign(a) => {
            walk_expr(&a.target, visit);
            walk_expr(&a.annotation, visit);
            if let Some(value) = &a.value {
                walk_expr(value, visit);
            }
        }
        For(f) => {
            walk_expr(&f.target, visit);
            walk_expr(&f.iter, visit);
            walk_body(&f.body, visit);
            walk_body(&f.orelse, visit);
        }
        AsyncFor(f) => {
            walk_expr(&f.target, visit);
            walk_expr(&f.iter, visit);
            walk_body(&f.body, visit);
            walk_body(&f.orelse, visit);
        }
        While(w) => {
            walk_expr(&w.test, visit);
            walk_body(&w.body, visit);
            walk_body(&w.orelse, visit);
        }
        If(i) => {
            walk_expr(&i.test, visit);
            walk_body(&i.body, visit);
            walk_body(&i.orelse, visit);
        }
        With(w) => {
            for item in &w.items {
                walk_expr(&item.context_expr, visit);
                if let Some(vars) = &item.optional_vars {
                    walk_expr(vars, visit);
                }
            }
            walk_body(&w.body, visit);
        }
        AsyncWith(w) => {
            for item in &w.items {
                walk_expr(&item.context_expr, visit);
                if let Some(vars) = &item.optional_vars {
                    walk_expr(vars, visit);
                }
            }
            walk_body(&w.body, visit);
        }
        Match(m) => {
            walk_expr(&m.subject, visit);
            for case in &m.cases {
                if let Some(guard) = &case.guard {
                    walk_expr(guard, visit);
                }
                walk_body(&case.body, visit);
            }
        }
        Raise(r) => {
            if let Some(exc) = &r.exc {
                walk_expr(exc, visit);
            }
            if let Some(cause) = &r.cause {
                walk_expr(cause, visit);
            }
        }
        Try(t) => {
            walk_body(&t.body, visit);
            for handler in &t.handlers {
                walk_handler(handler, visit);
            }
            walk_body(&t.orelse, visit);
            walk_body(&t.finalbody, visit);
        }
        TryStar(t) => {
            walk_body(&t.body, visit);
            for handler in &t.handlers {
                walk_handler(handler, visit);
            }
            walk_body(&t.orelse, visit);
            walk_body(&t.finalbody, visit);
        }
        Assert(a) => {
            walk_expr(&a.test, visit);
            if let Some(msg) = &a.msg {
                walk_expr(msg, visit);
            }
        }
        Expr(e) => walk_expr(&e.value, visit),
        // Import, ImportFrom, Global, Nonlocal, Pass, Break, Continue
        // and any future statement kinds carry no nested nodes we visit.
        _ => {}
    }
}

fn walk_handler<'a>(handler: &'a ast::ExceptHandler, visit: &mut dyn FnMut(Node<'a>)) {
    visit(Node::Handler(handler));
    let ast::ExceptHandler::ExceptHandler(h) = handler;
    if let Some(type_) = &h.type_ {
        walk_expr(type_, visit);
    }
    walk_body(&h.body, visit);
}

pub fn walk_expr<'a>(expr: &'a ast::Expr, visit: &mut dyn FnMut(Node<'a>)) {
    visit(Node::Expr(expr));

    use ast::Expr::*;
    match expr {
        BoolOp(b) => {
            for value in &b.values {
                walk_expr(value, visit);
            }
        }
        NamedExpr(n) => {
            walk_expr(&n.target, visit);
            walk_expr(&n.value, visit);
        }
        BinOp(b) => {
            walk_expr(&b.left, visit);
            walk_expr(&b.right, visit);
        }
        UnaryOp(u) => walk_expr(&u.operand, visit),
        Lambda(l) => walk_expr(&l.body, visit),
        IfExp(i) => {
            walk_expr(&i.test, visit);
            walk_expr(&i.body, visit);
            walk_expr(&i.orelse, visit);
        }
        Dict(d) => {
            for key in d.keys.iter().flatten() {
                walk_expr(key, visit);
            }
            for value in &d.values {
                walk_expr(value, visit);
            }
        }
        Set(s) => {
            for elt in &s.elts {
                walk_expr(elt, visit);
            }
        }
        ListComp(c) => {
            walk_expr(&c.elt, visit);
            walk_comprehensions(&c.generators, visit);
        }
        SetComp(c) => {
            walk_expr(&c.elt, visit);
            walk_comprehensions(&c.generators, visit);
        }
        DictComp(c) => {
            walk_expr(&c.key, visit);
            walk_expr(&c.value, visit);
            walk_comprehensions(&c.generators, visit);
        }
        GeneratorExp(g) => {
            walk_expr(&g.elt, visit);
            walk_comprehensions(&g.generators, visit);
        }
        Await(a) => walk_expr(&a.value, visit),
        Yield(y) => {
            if let Some(value) = &y.value {
                walk_expr(value, visit);
            }
        }
        YieldFrom(y) => walk_expr(&y.value, visit),
        Compare(c) => {
            walk_expr(&c.left, visit);
            for comparator in &c.comparators {
                walk_expr(comparator, visit);
            }
        }
        Call(c) => {
            walk_expr(&c.func, visit);
            for arg in &c.args {
                walk_expr(arg, visit);
            }
            for keyword in &c.keywords {
                walk_expr(&keyword.value, visit);
            }
        }
        FormattedValue(f) => {
            walk_expr(&f.value, visit);
            if let Some(spec) = &f.format_spec {
                walk_expr(spec, visit);
            }
        }
        JoinedStr(j) => {
            for value in &j.values {
                walk_expr(value, visit);
            }
        }
        Attribute(a) => walk_expr(&a.value, visit),
        Subscript(s) => {
            walk_expr(&s.value, visit);
            walk_expr(&s.slice, visit);
        }
        Starred(s) => walk_expr(&s.value, visit),
        List(l) => {
            for elt in &l.elts {
                walk_expr(elt, visit);
            }
        }
        Tuple(t) => {
            for elt in &t.elts {
                walk_expr(elt, visit);
            }
        }
        Slice(s) => {
            if let Some(lower) = &s.lower {
                walk_expr(lower, visit);
            }
            if let Some(upper) = &s.upper {
                walk_expr(upper, visit);
            }
            if let Some(step) = &s.step {
                walk_expr(step, visit);
            }
        }
        // Constant, Name: leaves
        _ => {}
    }
}

fn walk_comprehensions<'a>(
    generators: &'a [ast::Comprehension],
    visit: &mut dyn FnMut(Node<'a>),
) {
    for generator in generators {
        walk_expr(&generator.target, visit);
        walk_expr(&generator.iter, visit);
        for if_clause in &generator.ifs {
            walk_expr(if_clause, visit);
        }
    }
}

/// Maps byte offsets from the parser to 1-based line numbers
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// 1-based line containing the given byte offset
    pub fn line_of(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset)
    }

    /// Number of source lines covered by a [start, end) byte range
    pub fn line_span(&self, start: usize, end: usize) -> usize {
        let end_line = self.line_of(end.saturating_sub(1).max(start));
        end_line - self.line_of(start) + 1
    }
}
