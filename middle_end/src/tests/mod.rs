//! Tests for the structural AST checks
//!
//! Each file builds small sessions through the same construction API the
//! compiler passes use, then corrupts them the way a buggy pass would.

mod duplicate_uses_tests;
mod registry_tests;

use front_end::ast::{Ast, Callee, Expr};
use front_end::ids::{CallId, DefId, SymExprId, SymbolId, UnresolvedId};
use front_end::primitive::PrimitiveTag;
use front_end::source_location::Span;
use front_end::symbol_table::SymbolKind;

use crate::check_ast::{CheckKind, InternalError, VerificationContext};

/// A session under construction
pub(crate) struct Fixture {
    pub ast: Ast,
    pub ctx: VerificationContext,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            ast: Ast::new(),
            ctx: VerificationContext::default(),
        }
    }

    /// Declare a variable on `line`
    pub fn variable(&mut self, name: &str, line: usize) -> (SymbolId, DefId) {
        let sym = self.ast.new_symbol(name, SymbolKind::Variable, Span::point(line, 5));
        let def = self.ast.declare(sym, Span::point(line, 1), &mut self.ctx).unwrap();
        (sym, def)
    }

    pub fn reference(&mut self, sym: SymbolId, line: usize) -> SymExprId {
        self.ast.new_sym_expr(sym, Span::point(line, 9), &mut self.ctx).unwrap()
    }

    pub fn unresolved(&mut self, name: &str, line: usize) -> UnresolvedId {
        self.ast.new_unresolved(name, Span::point(line, 9), &mut self.ctx)
    }

    /// Declare a function with freshly declared formals
    pub fn function(&mut self, name: &str, formals: &[&str], line: usize) -> (SymbolId, Vec<SymbolId>) {
        let formals: Vec<SymbolId> = formals
            .iter()
            .enumerate()
            .map(|(i, formal)| {
                let sym = self.ast.new_formal(*formal, Span::point(line, 10 + 3 * i));
                self.ast.declare(sym, Span::point(line, 10 + 3 * i), &mut self.ctx).unwrap();
                sym
            })
            .collect();
        let fn_sym = self.function_with(name, formals.clone(), line);
        (fn_sym, formals)
    }

    /// Declare a function owning exactly the given formal symbols
    pub fn function_with(&mut self, name: &str, formals: Vec<SymbolId>, line: usize) -> SymbolId {
        let fn_sym = self
            .ast
            .new_function(name, formals, Span::point(line, 4), &mut self.ctx)
            .unwrap();
        self.ast.declare(fn_sym, Span::point(line, 1), &mut self.ctx).unwrap();
        fn_sym
    }

    pub fn primitive(&mut self, tag: PrimitiveTag, line: usize) -> CallId {
        self.ast
            .new_call(Callee::Primitive(tag), Vec::new(), Span::point(line, 1), &mut self.ctx)
            .unwrap()
    }

    pub fn check(&self, check: CheckKind) -> Result<(), InternalError> {
        self.ctx.checker(&self.ast).run(check)
    }

    pub fn run_all(&self) -> Result<(), InternalError> {
        self.ctx.checker(&self.ast).run_all()
    }
}

/// A small well-formed program:
///
/// ```text
/// var total;
/// proc add(a, b) { return a + b; }
/// total = add(total, 1);
/// ```
pub(crate) fn well_formed() -> Fixture {
    let mut fx = Fixture::new();

    let (total, _) = fx.variable("total", 1);
    let (add, formals) = fx.function("add", &["a", "b"], 2);

    let a = fx.reference(formals[0], 2);
    let b = fx.reference(formals[1], 2);
    let sum = fx
        .ast
        .new_call(
            Callee::Primitive(PrimitiveTag::Add),
            vec![Expr::Sym(a), Expr::Sym(b)],
            Span::point(2, 20),
            &mut fx.ctx,
        )
        .unwrap();
    fx.ast
        .new_call(
            Callee::Primitive(PrimitiveTag::Return),
            vec![Expr::Call(sum)],
            Span::point(2, 13),
            &mut fx.ctx,
        )
        .unwrap();

    let arg = fx.reference(total, 3);
    let call = fx
        .ast
        .new_call(Callee::Routine(add), vec![Expr::Sym(arg)], Span::point(3, 9), &mut fx.ctx)
        .unwrap();
    let lhs = fx.reference(total, 3);
    fx.ast
        .new_call(
            Callee::Primitive(PrimitiveTag::Move),
            vec![Expr::Sym(lhs), Expr::Call(call)],
            Span::point(3, 1),
            &mut fx.ctx,
        )
        .unwrap();

    fx
}
