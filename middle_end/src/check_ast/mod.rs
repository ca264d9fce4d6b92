//! Structural checks on the health of the AST
//!
//! Each check is a read-only sweep over the nodes registered during the
//! session. A check either finds nothing or stops at the first violated
//! invariant and returns it as an [`InternalError`]; there is no partial
//! result and no attempt to keep going.

pub mod config;
pub mod error;
pub mod phase;
pub mod registry;

mod duplicate_uses;
mod missing_defs;
mod primitives;
mod unresolveds;

pub use config::{CheckKind, VerifyConfig};
pub use error::InternalError;
pub use phase::{Milestone, Phase, PhaseError, PhaseState};
pub use primitives::{classify, Legality};
pub use registry::NodeRegistry;
pub use unresolveds::UNRESOLVED_TOLERANCE;

use front_end::ast::{Ast, NodeHandle, NodeSink};
use tracing::{debug, trace};

/// Verification state owned by a compilation session: the registry of
/// created nodes, the phase flags and the check configuration.
#[derive(Debug, Default, Clone)]
pub struct VerificationContext {
    pub registry: NodeRegistry,
    pub phase: PhaseState,
    pub config: VerifyConfig,
}

impl VerificationContext {
    pub fn new(config: VerifyConfig) -> Self {
        Self {
            registry: NodeRegistry::new(),
            phase: PhaseState::new(),
            config,
        }
    }

    pub fn checker<'a>(&'a self, ast: &'a Ast) -> AstChecker<'a> {
        AstChecker::new(ast, self)
    }
}

impl NodeSink for VerificationContext {
    fn register(&mut self, node: NodeHandle) {
        self.registry.register(node);
    }
}

/// Runs the structural checks against one AST and its verification context
pub struct AstChecker<'a> {
    ast: &'a Ast,
    ctx: &'a VerificationContext,
}

impl<'a> AstChecker<'a> {
    pub fn new(ast: &'a Ast, ctx: &'a VerificationContext) -> Self {
        Self { ast, ctx }
    }

    pub fn run(&self, check: CheckKind) -> Result<(), InternalError> {
        match check {
            CheckKind::DuplicateUses => self.check_for_duplicate_uses(),
            CheckKind::MissingDefs => self.check_for_missing_defs(),
            CheckKind::Unresolveds => self.check_no_unresolveds(),
            CheckKind::Primitives => self.check_primitives(),
        }
    }

    /// Run every check the configuration enables, stopping at the first failure
    pub fn run_all(&self) -> Result<(), InternalError> {
        debug!(phase = ?self.ctx.phase.current(), "verifying AST");
        for check in CheckKind::ALL {
            if !self.ctx.config.runs(check) {
                trace!(%check, "check disabled");
                continue;
            }
            self.run(check)?;
        }
        Ok(())
    }
}
