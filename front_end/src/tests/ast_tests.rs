use crate::ast::{Ast, Callee, Expr, NodeHandle, NodeKind};
use crate::error::AstError;
use crate::primitive::PrimitiveTag;
use crate::source_location::Span;
use crate::symbol_table::{DefPoint, SymbolKind};

#[test]
fn test_declare_binds_def_point_and_registers() {
    let mut ast = Ast::new();
    let mut registered = Vec::new();

    let x = ast.new_symbol("x", SymbolKind::Variable, Span::point(1, 5));
    let def = ast.declare(x, Span::point(1, 1), &mut registered).unwrap();

    assert_eq!(ast.symbol(x).unwrap().def_point, DefPoint::Decl(def));
    assert_eq!(ast.def(def).unwrap().sym, x);
    assert_eq!(registered, vec![NodeHandle::DefExpr(def)]);
}

#[test]
fn test_def_point_is_bound_at_most_once() {
    let mut ast = Ast::new();
    let mut registered = Vec::new();

    let x = ast.new_symbol("x", SymbolKind::Variable, Span::point(1, 5));
    let first = ast.declare(x, Span::point(1, 1), &mut registered).unwrap();

    match ast.declare(x, Span::point(2, 1), &mut registered) {
        Err(AstError::DefPointAlreadySet { symbol, existing }) => {
            assert_eq!(symbol, x);
            assert_eq!(existing, first);
        }
        other => panic!("Expected DefPointAlreadySet, got {:?}", other),
    }

    // the failed declaration must not leave a registered node behind
    assert_eq!(registered.len(), 1);

    let detached = ast.alloc_def(x, Span::point(3, 1)).unwrap();
    assert!(ast.bind_def_point(x, detached).is_err());
    assert_eq!(ast.symbol(x).unwrap().def_point, DefPoint::Decl(first));
}

#[test]
fn test_alloc_def_leaves_symbol_unbound() {
    let mut ast = Ast::new();
    let x = ast.new_symbol("x", SymbolKind::Variable, Span::point(1, 5));

    let def = ast.alloc_def(x, Span::point(1, 1)).unwrap();

    assert_eq!(ast.symbol(x).unwrap().def_point, DefPoint::Unbound);
    assert!(ast.def(def).unwrap().live);
}

#[test]
fn test_root_symbol_is_exempt_from_declaration() {
    let mut ast = Ast::new();
    let root = ast.new_root("_root");

    let sym = ast.symbol(root).unwrap();
    assert_eq!(sym.def_point, DefPoint::Root);
    assert_eq!(sym.def_point.decl(), None);
    assert!(sym.span.is_synthesized());
}

#[test]
fn test_root_symbol_cannot_be_declared() {
    let mut ast = Ast::new();
    let mut registered = Vec::new();
    let root = ast.new_root("_root");

    assert_eq!(ast.declare(root, Span::point(1, 1), &mut registered), Err(AstError::RootSymbol(root)));
    assert!(registered.is_empty());

    let def = ast.alloc_def(root, Span::point(1, 1)).unwrap();
    assert_eq!(ast.bind_def_point(root, def), Err(AstError::RootSymbol(root)));
    assert_eq!(ast.symbol(root).unwrap().def_point, DefPoint::Root);
}

#[test]
fn test_function_symbols_are_not_removable() {
    let mut ast = Ast::new();
    let mut registered = Vec::new();
    let f = ast.new_function("f", Vec::new(), Span::point(1, 6), &mut registered).unwrap();
    let handle = NodeHandle::FnSymbol(f);

    assert_eq!(ast.remove(handle), Err(AstError::NotRemovable(handle)));
    assert_eq!(ast.is_live(handle), Some(true));

    let stray = crate::ids::SymbolId::from_raw(9);
    assert_eq!(ast.remove(NodeHandle::FnSymbol(stray)), Err(AstError::UnknownSymbol(stray)));
}

#[test]
fn test_function_owns_formals_in_order() {
    let mut ast = Ast::new();
    let mut registered = Vec::new();

    let a = ast.new_formal("a", Span::point(1, 8));
    let b = ast.new_formal("b", Span::point(1, 11));
    let f = ast.new_function("f", vec![a, b], Span::point(1, 1), &mut registered).unwrap();

    assert_eq!(ast.symbol(f).unwrap().formals(), &[a, b]);
    assert_eq!(registered, vec![NodeHandle::FnSymbol(f)]);
    assert_eq!(registered[0].kind(), NodeKind::FnSymbol);
}

#[test]
fn test_function_rejects_non_formal_parameters() {
    let mut ast = Ast::new();
    let mut registered = Vec::new();

    let x = ast.new_symbol("x", SymbolKind::Variable, Span::point(1, 1));
    let result = ast.new_function("f", vec![x], Span::point(2, 1), &mut registered);

    assert_eq!(result, Err(AstError::NotAFormal(x)));
    assert!(registered.is_empty(), "Rejected function must not be registered");
}

#[test]
fn test_resolve_unresolved_redirects_call_arguments() {
    let mut ast = Ast::new();
    let mut registered = Vec::new();

    let x = ast.new_symbol("x", SymbolKind::Variable, Span::point(1, 5));
    ast.declare(x, Span::point(1, 1), &mut registered).unwrap();

    let use_x = ast.new_unresolved("x", Span::point(2, 7), &mut registered);
    let call = ast
        .new_call(
            Callee::Primitive(PrimitiveTag::Return),
            vec![Expr::Unresolved(use_x)],
            Span::point(2, 1),
            &mut registered,
        )
        .unwrap();

    let resolved = ast.resolve_unresolved(use_x, x, &mut registered).unwrap();

    assert!(!ast.unresolved(use_x).unwrap().live);
    assert_eq!(ast.sym_expr(resolved).unwrap().target, x);
    assert_eq!(ast.sym_expr(resolved).unwrap().span, Span::point(2, 7));
    assert_eq!(ast.call(call).unwrap().args, vec![Expr::Sym(resolved)]);
    assert_eq!(registered.last(), Some(&NodeHandle::SymExpr(resolved)));

    match ast.resolve_unresolved(use_x, x, &mut registered) {
        Err(AstError::AlreadyRemoved(node)) => assert_eq!(node, NodeHandle::UnresolvedSymExpr(use_x)),
        other => panic!("Expected AlreadyRemoved, got {:?}", other),
    }
}

#[test]
fn test_set_callee_rewrites_in_place() {
    let mut ast = Ast::new();
    let mut registered = Vec::new();

    let call = ast
        .new_call(Callee::Primitive(PrimitiveTag::ActualsList), Vec::new(), Span::point(1, 1), &mut registered)
        .unwrap();
    ast.set_callee(call, Callee::Primitive(PrimitiveTag::Noop)).unwrap();

    assert_eq!(ast.call(call).unwrap().primitive(), Some(PrimitiveTag::Noop));
    assert_eq!(registered, vec![NodeHandle::CallExpr(call)]);
}

#[test]
fn test_set_args_replaces_arguments() {
    let mut ast = Ast::new();
    let mut registered = Vec::new();

    let name = ast.new_unresolved("f", Span::point(1, 1), &mut registered);
    let arg = ast.new_unresolved("x", Span::point(1, 3), &mut registered);
    let call = ast
        .new_call(
            Callee::Primitive(PrimitiveTag::ActualsList),
            vec![Expr::Unresolved(name), Expr::Unresolved(arg)],
            Span::point(1, 2),
            &mut registered,
        )
        .unwrap();

    ast.set_args(call, vec![Expr::Unresolved(arg)]).unwrap();
    assert_eq!(ast.call(call).unwrap().args, vec![Expr::Unresolved(arg)]);

    let stray = crate::ids::CallId::from_raw(5);
    assert_eq!(
        ast.set_args(stray, Vec::new()),
        Err(AstError::UnknownNode(NodeHandle::CallExpr(stray)))
    );
}

#[test]
fn test_remove_marks_node_dead_once() {
    let mut ast = Ast::new();
    let mut registered = Vec::new();

    let u = ast.new_unresolved("y", Span::point(1, 1), &mut registered);
    let handle = NodeHandle::UnresolvedSymExpr(u);

    assert_eq!(ast.is_live(handle), Some(true));
    ast.remove(handle).unwrap();
    assert_eq!(ast.is_live(handle), Some(false));
    assert_eq!(ast.remove(handle), Err(AstError::AlreadyRemoved(handle)));
}

#[test]
fn test_lookups_outside_the_arena_fail_softly() {
    let mut ast = Ast::new();
    let mut registered = Vec::new();
    let stray = crate::ids::SymbolId::from_raw(42);

    assert!(ast.symbol(stray).is_none());
    assert_eq!(ast.is_live(NodeHandle::FnSymbol(stray)), None);
    assert_eq!(ast.new_sym_expr(stray, Span::point(1, 1), &mut registered), Err(AstError::UnknownSymbol(stray)));
}

#[test]
fn test_span_display() {
    assert_eq!(Span::new(2, 4, 2, 9).with_file("main.chpl").to_string(), "main.chpl:2:4");

    assert_eq!(Span::point(4, 2).to_string(), "line 4:2");
    assert_eq!(Span::synthesized().to_string(), "<compiler-generated>");
}
