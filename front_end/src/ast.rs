//! AST nodes and the construction API used by parsing and resolution passes.
//!
//! Nodes live in per-kind arenas owned by [`Ast`]. Passes never free a node;
//! replacing one marks the old node dead and leaves its id valid. Every
//! constructor that takes a [`NodeSink`] reports the new node to it, which is
//! how verification learns about every node created during a session.

use tracing::trace;

use crate::error::AstError;
use crate::ids::{CallId, DefId, SymExprId, SymbolId, UnresolvedId};
use crate::primitive::PrimitiveTag;
use crate::source_location::{HasSourceLocation, Span};
use crate::symbol_table::{DefPoint, Symbol, SymbolKind, SymbolTable};

/// The node kinds reported to a [`NodeSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    FnSymbol,
    DefExpr,
    SymExpr,
    UnresolvedSymExpr,
    CallExpr,
}

/// Kind-tagged node identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeHandle {
    FnSymbol(SymbolId),
    DefExpr(DefId),
    SymExpr(SymExprId),
    UnresolvedSymExpr(UnresolvedId),
    CallExpr(CallId),
}

impl NodeHandle {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeHandle::FnSymbol(_) => NodeKind::FnSymbol,
            NodeHandle::DefExpr(_) => NodeKind::DefExpr,
            NodeHandle::SymExpr(_) => NodeKind::SymExpr,
            NodeHandle::UnresolvedSymExpr(_) => NodeKind::UnresolvedSymExpr,
            NodeHandle::CallExpr(_) => NodeKind::CallExpr,
        }
    }
}

/// Receives every node created through the construction API
pub trait NodeSink {
    fn register(&mut self, node: NodeHandle);
}

impl NodeSink for Vec<NodeHandle> {
    fn register(&mut self, node: NodeHandle) {
        self.push(node);
    }
}

/// Declaration of a symbol
#[derive(Debug, Clone)]
pub struct DefExpr {
    pub sym: SymbolId,
    pub span: Span,
    pub live: bool,
}

/// Use of a resolved symbol
#[derive(Debug, Clone)]
pub struct SymExpr {
    pub target: SymbolId,
    pub span: Span,
    pub live: bool,
}

/// Use of a name that has not been bound to a symbol yet
#[derive(Debug, Clone)]
pub struct UnresolvedSymExpr {
    pub name: String,
    pub span: Span,
    pub live: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callee {
    Routine(SymbolId),
    Primitive(PrimitiveTag),
}

/// Actual argument of a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expr {
    Sym(SymExprId),
    Unresolved(UnresolvedId),
    Call(CallId),
}

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: Callee,
    pub args: Vec<Expr>,
    pub span: Span,
    pub live: bool,
}

impl CallExpr {
    pub fn primitive(&self) -> Option<PrimitiveTag> {
        match self.callee {
            Callee::Primitive(tag) => Some(tag),
            Callee::Routine(_) => None,
        }
    }
}

macro_rules! impl_has_span {
    ($($node:ty),*) => {
        $(impl HasSourceLocation for $node {
            fn span(&self) -> &Span {
                &self.span
            }
        })*
    };
}

impl_has_span!(DefExpr, SymExpr, UnresolvedSymExpr, CallExpr);

/// Owner of every symbol and node of one compilation session
#[derive(Debug, Default)]
pub struct Ast {
    symbols: SymbolTable,
    defs: Vec<DefExpr>,
    sym_exprs: Vec<SymExpr>,
    unresolveds: Vec<UnresolvedSymExpr>,
    calls: Vec<CallExpr>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    pub fn def(&self, id: DefId) -> Option<&DefExpr> {
        self.defs.get(id.index())
    }

    pub fn sym_expr(&self, id: SymExprId) -> Option<&SymExpr> {
        self.sym_exprs.get(id.index())
    }

    pub fn unresolved(&self, id: UnresolvedId) -> Option<&UnresolvedSymExpr> {
        self.unresolveds.get(id.index())
    }

    pub fn call(&self, id: CallId) -> Option<&CallExpr> {
        self.calls.get(id.index())
    }

    /// Iterate over every call ever allocated, dead or alive
    pub fn calls(&self) -> impl Iterator<Item = (CallId, &CallExpr)> {
        self.calls
            .iter()
            .enumerate()
            .map(|(index, call)| (CallId::from_raw(index as u32), call))
    }

    /// Iterate over every unresolved reference ever allocated, dead or alive
    pub fn unresolveds(&self) -> impl Iterator<Item = (UnresolvedId, &UnresolvedSymExpr)> {
        self.unresolveds
            .iter()
            .enumerate()
            .map(|(index, node)| (UnresolvedId::from_raw(index as u32), node))
    }

    /// `None` when the handle does not belong to this AST. Symbols are never
    /// removed, so a function handle is live whenever it exists.
    pub fn is_live(&self, node: NodeHandle) -> Option<bool> {
        match node {
            NodeHandle::FnSymbol(id) => self.symbol(id).map(|_| true),
            NodeHandle::DefExpr(id) => self.def(id).map(|def| def.live),
            NodeHandle::SymExpr(id) => self.sym_expr(id).map(|se| se.live),
            NodeHandle::UnresolvedSymExpr(id) => self.unresolved(id).map(|u| u.live),
            NodeHandle::CallExpr(id) => self.call(id).map(|call| call.live),
        }
    }

    pub fn span_of(&self, node: NodeHandle) -> Option<&Span> {
        match node {
            NodeHandle::FnSymbol(id) => self.symbol(id).map(|sym| sym.span()),
            NodeHandle::DefExpr(id) => self.def(id).map(|def| def.span()),
            NodeHandle::SymExpr(id) => self.sym_expr(id).map(|se| se.span()),
            NodeHandle::UnresolvedSymExpr(id) => self.unresolved(id).map(|u| u.span()),
            NodeHandle::CallExpr(id) => self.call(id).map(|call| call.span()),
        }
    }

    /// Create a symbol. Symbols are registered only when they are functions,
    /// which go through [`Ast::new_function`].
    pub fn new_symbol(&mut self, name: impl Into<String>, kind: SymbolKind, span: Span) -> SymbolId {
        let id = self.symbols.insert(Symbol::new(name, kind, span));
        trace!(symbol = %id, "created symbol");
        id
    }

    pub fn new_formal(&mut self, name: impl Into<String>, span: Span) -> SymbolId {
        self.new_symbol(name, SymbolKind::Formal, span)
    }

    /// Create an implicit root symbol. Roots carry [`DefPoint::Root`] and are
    /// never declared.
    pub fn new_root(&mut self, name: impl Into<String>) -> SymbolId {
        let id = self.new_symbol(name, SymbolKind::Module, Span::synthesized());
        if let Some(sym) = self.symbols.get_mut(id) {
            sym.def_point = DefPoint::Root;
        }
        id
    }

    /// Create a function symbol owning `formals` and register it
    pub fn new_function(
        &mut self,
        name: impl Into<String>,
        formals: Vec<SymbolId>,
        span: Span,
        sink: &mut impl NodeSink,
    ) -> Result<SymbolId, AstError> {
        for &formal in &formals {
            let sym = self.symbol(formal).ok_or(AstError::UnknownSymbol(formal))?;
            if !sym.is_formal() {
                return Err(AstError::NotAFormal(formal));
            }
        }

        let id = self.new_symbol(name, SymbolKind::Function { formals }, span);
        sink.register(NodeHandle::FnSymbol(id));
        Ok(id)
    }

    /// Allocate a declaration node without registering it or touching the
    /// symbol's defPoint. Passes that assemble detached subtrees use this and
    /// register the node once it is inserted.
    pub fn alloc_def(&mut self, sym: SymbolId, span: Span) -> Result<DefId, AstError> {
        self.symbol(sym).ok_or(AstError::UnknownSymbol(sym))?;
        let id = DefId::from_raw(self.defs.len() as u32);
        self.defs.push(DefExpr { sym, span, live: true });
        Ok(id)
    }

    /// Declare `sym`: allocate its declaration, bind the symbol's defPoint to
    /// it and register it, all or nothing.
    pub fn declare(&mut self, sym: SymbolId, span: Span, sink: &mut impl NodeSink) -> Result<DefId, AstError> {
        let symbol = self.symbol(sym).ok_or(AstError::UnknownSymbol(sym))?;
        match symbol.def_point {
            DefPoint::Unbound => {}
            DefPoint::Root => return Err(AstError::RootSymbol(sym)),
            DefPoint::Decl(existing) => return Err(AstError::DefPointAlreadySet { symbol: sym, existing }),
        }

        let def = self.alloc_def(sym, span)?;
        self.bind_def_point(sym, def)?;
        sink.register(NodeHandle::DefExpr(def));
        Ok(def)
    }

    /// Record `def` as the declaration of `sym`. A defPoint is bound at most
    /// once, and never for a root.
    pub fn bind_def_point(&mut self, sym: SymbolId, def: DefId) -> Result<(), AstError> {
        self.def(def).ok_or(AstError::UnknownNode(NodeHandle::DefExpr(def)))?;
        let symbol = self.symbols.get_mut(sym).ok_or(AstError::UnknownSymbol(sym))?;
        match symbol.def_point {
            DefPoint::Unbound => {}
            DefPoint::Root => return Err(AstError::RootSymbol(sym)),
            DefPoint::Decl(existing) => return Err(AstError::DefPointAlreadySet { symbol: sym, existing }),
        }
        symbol.def_point = DefPoint::Decl(def);
        trace!(symbol = %sym, def = %def, "bound defPoint");
        Ok(())
    }

    pub fn new_sym_expr(&mut self, target: SymbolId, span: Span, sink: &mut impl NodeSink) -> Result<SymExprId, AstError> {
        self.symbol(target).ok_or(AstError::UnknownSymbol(target))?;
        let id = SymExprId::from_raw(self.sym_exprs.len() as u32);
        self.sym_exprs.push(SymExpr { target, span, live: true });
        sink.register(NodeHandle::SymExpr(id));
        Ok(id)
    }

    pub fn new_unresolved(&mut self, name: impl Into<String>, span: Span, sink: &mut impl NodeSink) -> UnresolvedId {
        let id = UnresolvedId::from_raw(self.unresolveds.len() as u32);
        self.unresolveds.push(UnresolvedSymExpr { name: name.into(), span, live: true });
        sink.register(NodeHandle::UnresolvedSymExpr(id));
        id
    }

    pub fn new_call(
        &mut self,
        callee: Callee,
        args: Vec<Expr>,
        span: Span,
        sink: &mut impl NodeSink,
    ) -> Result<CallId, AstError> {
        if let Callee::Routine(fn_sym) = callee {
            self.symbol(fn_sym).ok_or(AstError::UnknownSymbol(fn_sym))?;
        }
        let id = CallId::from_raw(self.calls.len() as u32);
        self.calls.push(CallExpr { callee, args, span, live: true });
        sink.register(NodeHandle::CallExpr(id));
        Ok(id)
    }

    /// Replace an unresolved reference with a reference to `target`. The old
    /// node is marked dead and call arguments naming it are redirected.
    pub fn resolve_unresolved(
        &mut self,
        id: UnresolvedId,
        target: SymbolId,
        sink: &mut impl NodeSink,
    ) -> Result<SymExprId, AstError> {
        let handle = NodeHandle::UnresolvedSymExpr(id);
        let node = self.unresolveds.get(id.index()).ok_or(AstError::UnknownNode(handle))?;
        if !node.live {
            return Err(AstError::AlreadyRemoved(handle));
        }

        let span = node.span.clone();
        let replacement = self.new_sym_expr(target, span, sink)?;
        self.unresolveds[id.index()].live = false;

        for call in &mut self.calls {
            for arg in &mut call.args {
                if *arg == Expr::Unresolved(id) {
                    *arg = Expr::Sym(replacement);
                }
            }
        }

        trace!(unresolved = %id, symbol = %target, "resolved name");
        Ok(replacement)
    }

    /// Rewrite what a call invokes, keeping the node in place
    pub fn set_callee(&mut self, id: CallId, callee: Callee) -> Result<(), AstError> {
        let call = self
            .calls
            .get_mut(id.index())
            .ok_or(AstError::UnknownNode(NodeHandle::CallExpr(id)))?;
        call.callee = callee;
        Ok(())
    }

    /// Replace the actual arguments of a call
    pub fn set_args(&mut self, id: CallId, args: Vec<Expr>) -> Result<(), AstError> {
        let call = self
            .calls
            .get_mut(id.index())
            .ok_or(AstError::UnknownNode(NodeHandle::CallExpr(id)))?;
        call.args = args;
        Ok(())
    }

    /// Take a node out of the tree. Function symbols cannot be removed.
    pub fn remove(&mut self, node: NodeHandle) -> Result<(), AstError> {
        let live = match node {
            NodeHandle::FnSymbol(id) => {
                self.symbol(id).ok_or(AstError::UnknownSymbol(id))?;
                return Err(AstError::NotRemovable(node));
            }
            NodeHandle::DefExpr(id) => self.defs.get_mut(id.index()).map(|n| &mut n.live),
            NodeHandle::SymExpr(id) => self.sym_exprs.get_mut(id.index()).map(|n| &mut n.live),
            NodeHandle::UnresolvedSymExpr(id) => self.unresolveds.get_mut(id.index()).map(|n| &mut n.live),
            NodeHandle::CallExpr(id) => self.calls.get_mut(id.index()).map(|n| &mut n.live),
        };

        let live = live.ok_or(AstError::UnknownNode(node))?;
        if !*live {
            return Err(AstError::AlreadyRemoved(node));
        }
        *live = false;
        Ok(())
    }
}
