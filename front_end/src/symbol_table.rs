use crate::ids::{DefId, SymbolId};
use crate::source_location::{HasSourceLocation, Span};

/// Where a symbol is declared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefPoint {
    /// No declaration has been bound to the symbol yet
    Unbound,
    /// Implicit root symbol the compiler synthesizes; it never has a declaration
    Root,
    /// Declared by this node
    Decl(DefId),
}

impl DefPoint {
    /// The declaring node, if one has been bound
    pub fn decl(self) -> Option<DefId> {
        match self {
            DefPoint::Decl(def) => Some(def),
            DefPoint::Unbound | DefPoint::Root => None,
        }
    }
}

/// Different kinds of symbols
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    Variable,
    /// Formal parameter; owned by exactly one function
    Formal,
    /// Function owning its formal parameters in declaration order
    Function { formals: Vec<SymbolId> },
    Type,
    Module,
}

/// A named entity of the program. Identity is its [`SymbolId`].
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub def_point: DefPoint,
    pub span: Span,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, span: Span) -> Self {
        Self {
            name: name.into(),
            kind,
            def_point: DefPoint::Unbound,
            span,
        }
    }

    pub fn is_formal(&self) -> bool {
        matches!(self.kind, SymbolKind::Formal)
    }

    pub fn is_function(&self) -> bool {
        matches!(self.kind, SymbolKind::Function { .. })
    }

    /// Formals of a function symbol; empty for every other kind
    pub fn formals(&self) -> &[SymbolId] {
        match &self.kind {
            SymbolKind::Function { formals } => formals,
            _ => &[],
        }
    }
}

impl HasSourceLocation for Symbol {
    fn span(&self) -> &Span {
        &self.span
    }
}

/// Arena of every symbol created during a compilation session
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId::from_raw(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.index())
    }

    /// Find the first symbol created with the given name
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.symbols
            .iter()
            .position(|sym| sym.name == name)
            .map(|index| SymbolId::from_raw(index as u32))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(index, sym)| (SymbolId::from_raw(index as u32), sym))
    }
}
