//! Registry of every node created during a session, partitioned by kind.

use front_end::ast::{Ast, NodeHandle, NodeKind, NodeSink};
use front_end::ids::{CallId, DefId, SymExprId, SymbolId, UnresolvedId};
use tracing::{debug, trace};

/// Observation handles for the five node kinds the checks sweep. Nothing is
/// validated on registration; every collection keeps registration order.
#[derive(Debug, Default, Clone)]
pub struct NodeRegistry {
    fn_symbols: Vec<SymbolId>,
    def_exprs: Vec<DefId>,
    sym_exprs: Vec<SymExprId>,
    unresolveds: Vec<UnresolvedId>,
    calls: Vec<CallId>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fn_symbols(&self) -> &[SymbolId] {
        &self.fn_symbols
    }

    pub fn def_exprs(&self) -> &[DefId] {
        &self.def_exprs
    }

    pub fn sym_exprs(&self) -> &[SymExprId] {
        &self.sym_exprs
    }

    pub fn unresolveds(&self) -> &[UnresolvedId] {
        &self.unresolveds
    }

    pub fn calls(&self) -> &[CallId] {
        &self.calls
    }

    pub fn all_of(&self, kind: NodeKind) -> Box<dyn Iterator<Item = NodeHandle> + '_> {
        match kind {
            NodeKind::FnSymbol => Box::new(self.fn_symbols.iter().copied().map(NodeHandle::FnSymbol)),
            NodeKind::DefExpr => Box::new(self.def_exprs.iter().copied().map(NodeHandle::DefExpr)),
            NodeKind::SymExpr => Box::new(self.sym_exprs.iter().copied().map(NodeHandle::SymExpr)),
            NodeKind::UnresolvedSymExpr => {
                Box::new(self.unresolveds.iter().copied().map(NodeHandle::UnresolvedSymExpr))
            }
            NodeKind::CallExpr => Box::new(self.calls.iter().copied().map(NodeHandle::CallExpr)),
        }
    }

    pub fn len(&self, kind: NodeKind) -> usize {
        match kind {
            NodeKind::FnSymbol => self.fn_symbols.len(),
            NodeKind::DefExpr => self.def_exprs.len(),
            NodeKind::SymExpr => self.sym_exprs.len(),
            NodeKind::UnresolvedSymExpr => self.unresolveds.len(),
            NodeKind::CallExpr => self.calls.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fn_symbols.is_empty()
            && self.def_exprs.is_empty()
            && self.sym_exprs.is_empty()
            && self.unresolveds.is_empty()
            && self.calls.is_empty()
    }

    /// Drop handles of nodes a pass has taken out of the tree. Handles the
    /// AST does not know about are kept so the checks can report them.
    /// Returns how many handles were dropped.
    pub fn prune_dead(&mut self, ast: &Ast) -> usize {
        let before = self.total();
        let dead = |node: NodeHandle| ast.is_live(node) == Some(false);

        self.fn_symbols.retain(|&id| !dead(NodeHandle::FnSymbol(id)));
        self.def_exprs.retain(|&id| !dead(NodeHandle::DefExpr(id)));
        self.sym_exprs.retain(|&id| !dead(NodeHandle::SymExpr(id)));
        self.unresolveds.retain(|&id| !dead(NodeHandle::UnresolvedSymExpr(id)));
        self.calls.retain(|&id| !dead(NodeHandle::CallExpr(id)));

        let pruned = before - self.total();
        debug!(pruned, "pruned dead nodes from registry");
        pruned
    }

    fn total(&self) -> usize {
        self.fn_symbols.len() + self.def_exprs.len() + self.sym_exprs.len() + self.unresolveds.len() + self.calls.len()
    }
}

impl NodeSink for NodeRegistry {
    fn register(&mut self, node: NodeHandle) {
        trace!(?node, "registered node");
        match node {
            NodeHandle::FnSymbol(id) => self.fn_symbols.push(id),
            NodeHandle::DefExpr(id) => self.def_exprs.push(id),
            NodeHandle::SymExpr(id) => self.sym_exprs.push(id),
            NodeHandle::UnresolvedSymExpr(id) => self.unresolveds.push(id),
            NodeHandle::CallExpr(id) => self.calls.push(id),
        }
    }
}
