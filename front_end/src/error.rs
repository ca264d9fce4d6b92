use thiserror::Error;

use crate::ast::NodeHandle;
use crate::ids::{DefId, SymbolId};

/// Errors raised while constructing or rewriting the AST
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstError {
    #[error("symbol {0} is not allocated in this AST")]
    UnknownSymbol(SymbolId),

    #[error("node {0:?} is not allocated in this AST")]
    UnknownNode(NodeHandle),

    #[error("symbol {0} is not a formal parameter")]
    NotAFormal(SymbolId),

    #[error("defPoint of symbol {symbol} is already bound to {existing}")]
    DefPointAlreadySet { symbol: SymbolId, existing: DefId },

    #[error("node {0:?} has already been removed from the tree")]
    AlreadyRemoved(NodeHandle),

    #[error("symbol {0} is an implicit root and cannot be declared")]
    RootSymbol(SymbolId),

    #[error("node {0:?} cannot be removed from the tree")]
    NotRemovable(NodeHandle),
}
