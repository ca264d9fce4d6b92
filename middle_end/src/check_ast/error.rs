use front_end::ast::NodeHandle;
use front_end::ids::{CallId, DefId, SymExprId, SymbolId, UnresolvedId};
use front_end::primitive::PrimitiveTag;
use thiserror::Error;

/// A structural invariant of the AST does not hold.
///
/// Every variant is a bug in the compiler, never in the program being
/// compiled. Nothing recovers from one of these; the driver reports it and
/// stops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalError {
    #[error("argument used in multiple function definitions")]
    DuplicateFormal {
        formal: SymbolId,
        first_owner: SymbolId,
        second_owner: SymbolId,
    },

    #[error("multiple definitions for symbol")]
    MultipleDefinitions {
        symbol: SymbolId,
        first: DefId,
        second: DefId,
    },

    #[error("symbol has no associated declaration")]
    MissingDef {
        symbol: SymbolId,
        reference: SymExprId,
        def_point: DefId,
    },

    #[error("defPoint of symbol does not match its declaration")]
    DefPointMismatch {
        symbol: SymbolId,
        reference: SymExprId,
        def_point: DefId,
        declared: DefId,
    },

    #[error("structural error: at this point, the AST should not contain any unresolved symbols ({count} remain, at most {tolerance} tolerated)")]
    ExcessUnresolved {
        count: usize,
        tolerance: usize,
        remaining: Vec<UnresolvedId>,
    },

    #[error("primitive {tag} should not appear after parsing is complete")]
    PrimitiveAfterParse { call: CallId, tag: PrimitiveTag },

    #[error("primitive {tag} should not appear after resolution is complete")]
    PrimitiveAfterResolution { call: CallId, tag: PrimitiveTag },

    #[error("registered node {0:?} is not allocated in the AST")]
    DanglingNode(NodeHandle),

    #[error("symbol {0} is referenced but not allocated in the AST")]
    DanglingSymbol(SymbolId),
}
