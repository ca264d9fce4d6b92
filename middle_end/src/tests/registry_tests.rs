use front_end::ast::{NodeHandle, NodeKind, NodeSink};
use front_end::ids::{CallId, DefId, SymExprId};

use crate::check_ast::NodeRegistry;

use super::{well_formed, Fixture};

#[test]
fn test_registration_partitions_by_kind() {
    let fx = well_formed();
    let registry = &fx.ctx.registry;

    // total, a, b, add
    assert_eq!(registry.len(NodeKind::DefExpr), 4);
    assert_eq!(registry.len(NodeKind::FnSymbol), 1);
    assert_eq!(registry.len(NodeKind::SymExpr), 4);
    assert_eq!(registry.len(NodeKind::UnresolvedSymExpr), 0);
    assert_eq!(registry.len(NodeKind::CallExpr), 4);
}

#[test]
fn test_all_of_preserves_registration_order() {
    let mut registry = NodeRegistry::new();
    registry.register(NodeHandle::CallExpr(CallId::from_raw(2)));
    registry.register(NodeHandle::DefExpr(DefId::from_raw(7)));
    registry.register(NodeHandle::CallExpr(CallId::from_raw(0)));
    registry.register(NodeHandle::CallExpr(CallId::from_raw(2)));

    let calls: Vec<NodeHandle> = registry.all_of(NodeKind::CallExpr).collect();
    assert_eq!(
        calls,
        vec![
            NodeHandle::CallExpr(CallId::from_raw(2)),
            NodeHandle::CallExpr(CallId::from_raw(0)),
            NodeHandle::CallExpr(CallId::from_raw(2)),
        ],
        "Registration performs no deduplication or validation"
    );
    assert_eq!(registry.def_exprs(), &[DefId::from_raw(7)]);
    assert!(registry.all_of(NodeKind::SymExpr).next().is_none());
}

#[test]
fn test_prune_dead_keeps_live_and_unknown_nodes() {
    let mut fx = Fixture::new();
    let (x, _) = fx.variable("x", 1);
    let kept = fx.reference(x, 2);
    let removed = fx.reference(x, 3);
    fx.ast.remove(NodeHandle::SymExpr(removed)).unwrap();

    let unknown = SymExprId::from_raw(99);
    fx.ctx.registry.register(NodeHandle::SymExpr(unknown));

    let pruned = fx.ctx.registry.prune_dead(&fx.ast);
    assert_eq!(pruned, 1);
    assert_eq!(fx.ctx.registry.sym_exprs(), &[kept, unknown]);
}

#[test]
fn test_empty_registry() {
    let registry = NodeRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(NodeKind::FnSymbol), 0);
}
