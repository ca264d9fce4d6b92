//! Internal-error diagnostics
//!
//! Turns a failed structural check into a message that points at the nodes
//! involved, and provides the fatal reporting path that ends compilation.

use std::fmt;
use std::io::IsTerminal;

use colored::Colorize;
use front_end::ast::{Ast, NodeHandle};
use front_end::ids::{DefId, SymbolId};
use front_end::source_location::Span;
use tracing::error;

use crate::check_ast::InternalError;

/// Exit status for a compiler that caught itself in an inconsistent state
/// (`EX_SOFTWARE` from sysexits.h)
pub const INTERNAL_ERROR_EXIT_CODE: i32 = 70;

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    /// Compiler bug; compilation cannot continue
    InternalError,
    /// Additional information attached to another diagnostic
    Note,
}

/// A diagnostic message with source information
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    pub location: Option<Span>,
    pub details: Option<String>,
    pub notes: Vec<Diagnostic>,
}

impl Diagnostic {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::InternalError,
            message: message.into(),
            location: None,
            details: None,
            notes: Vec::new(),
        }
    }

    pub fn note(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Note,
            ..Self::internal(message)
        }
    }

    /// Attach a location if one is known
    pub fn with_span(mut self, location: Option<&Span>) -> Self {
        self.location = location.cloned();
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_note(mut self, note: Diagnostic) -> Self {
        self.notes.push(note);
        self
    }

    /// Build the report for a failed check, naming and locating the nodes
    /// the failure is about
    pub fn from_internal(err: &InternalError, ast: &Ast) -> Self {
        let diag = Diagnostic::internal(err.to_string());

        match err {
            InternalError::DuplicateFormal { formal, first_owner, second_owner } => diag
                .with_span(symbol_span(ast, *formal))
                .with_details(format!("formal {} is shared", describe_symbol(ast, *formal)))
                .with_note(
                    Diagnostic::note(format!("listed by function {}", describe_symbol(ast, *first_owner)))
                        .with_span(symbol_span(ast, *first_owner)),
                )
                .with_note(
                    Diagnostic::note(format!("and again by function {}", describe_symbol(ast, *second_owner)))
                        .with_span(symbol_span(ast, *second_owner)),
                ),

            InternalError::MultipleDefinitions { symbol, first, second } => diag
                .with_span(def_span(ast, *second))
                .with_details(format!("symbol {} is declared twice", describe_symbol(ast, *symbol)))
                .with_note(Diagnostic::note(format!("first declared by {}", first)).with_span(def_span(ast, *first))),

            InternalError::MissingDef { symbol, reference, def_point } => diag
                .with_span(ast.span_of(NodeHandle::SymExpr(*reference)))
                .with_details(format!(
                    "symbol {} claims declaration {} but no such declaration is registered",
                    describe_symbol(ast, *symbol),
                    def_point
                ))
                .with_note(Diagnostic::note("defPoint refers to this node").with_span(def_span(ast, *def_point))),

            InternalError::DefPointMismatch { symbol, reference, def_point, declared } => diag
                .with_span(ast.span_of(NodeHandle::SymExpr(*reference)))
                .with_details(format!(
                    "symbol {} has defPoint {} but is declared by {}",
                    describe_symbol(ast, *symbol),
                    def_point,
                    declared
                ))
                .with_note(Diagnostic::note("defPoint refers to this node").with_span(def_span(ast, *def_point)))
                .with_note(Diagnostic::note("registered declaration").with_span(def_span(ast, *declared))),

            InternalError::ExcessUnresolved { remaining, .. } => {
                let first = remaining.first().map(|&id| NodeHandle::UnresolvedSymExpr(id));
                let names: Vec<String> = remaining
                    .iter()
                    .filter_map(|&id| ast.unresolved(id))
                    .map(|node| format!("`{}` at {}", node.name, node.span))
                    .collect();

                diag.with_span(first.and_then(|node| ast.span_of(node)))
                    .with_details(format!("unresolved: {}", names.join(", ")))
            }

            InternalError::PrimitiveAfterParse { call, .. } | InternalError::PrimitiveAfterResolution { call, .. } => {
                diag.with_span(ast.span_of(NodeHandle::CallExpr(*call)))
            }

            InternalError::DanglingNode(node) => diag.with_details(format!("{:?} was registered with this session", node)),

            InternalError::DanglingSymbol(symbol) => diag.with_details(format!("symbol {} is out of range", symbol)),
        }
    }

    /// Render with terminal colours when `color` is set, plainly otherwise
    pub fn render(&self, color: bool) -> String {
        let mut output = String::new();
        self.render_into(&mut output, color);
        output
    }

    fn render_into(&self, output: &mut String, color: bool) {
        let prefix = match self.level {
            DiagnosticLevel::InternalError => "internal error:",
            DiagnosticLevel::Note => "note:",
        };
        let prefix = match (color, self.level) {
            (false, _) => prefix.normal(),
            (true, DiagnosticLevel::InternalError) => prefix.red().bold(),
            (true, DiagnosticLevel::Note) => prefix.cyan().bold(),
        };
        output.push_str(&format!("{} {}\n", prefix, self.message));

        if let Some(loc) = &self.location {
            let arrow = if color { " -->".blue().bold() } else { " -->".normal() };
            output.push_str(&format!("{} {}\n", arrow, loc));
        }

        if let Some(details) = &self.details {
            output.push_str(&format!("    {}\n", details));
        }

        for note in &self.notes {
            note.render_into(output, color);
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

/// Print the diagnostic and terminate the process. This is the only way a
/// failed structural check ends; compilation never continues past it.
pub fn report_fatal(diagnostic: &Diagnostic) -> ! {
    error!(message = %diagnostic.message, "internal compiler error");
    eprint!("{}", diagnostic.render(std::io::stderr().is_terminal()));
    std::process::exit(INTERNAL_ERROR_EXIT_CODE)
}

fn describe_symbol(ast: &Ast, id: SymbolId) -> String {
    match ast.symbol(id) {
        Some(sym) => format!("`{}` ({})", sym.name, id),
        None => format!("{}", id),
    }
}

fn symbol_span(ast: &Ast, id: SymbolId) -> Option<&Span> {
    ast.symbol(id).map(|sym| &sym.span)
}

fn def_span(ast: &Ast, id: DefId) -> Option<&Span> {
    ast.span_of(NodeHandle::DefExpr(id))
}
