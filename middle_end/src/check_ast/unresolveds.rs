use front_end::ast::NodeKind;
use tracing::debug;

use super::{AstChecker, InternalError};

/// Unresolved references tolerated once resolution is complete.
///
/// This should be 0. The tuple constructor helper synthesized for tuple
/// literals can still be unresolved after resolution, and until that is
/// fixed where the helper is generated, one leftover is accepted.
pub const UNRESOLVED_TOLERANCE: usize = 1;

impl AstChecker<'_> {
    /// No unresolved names survive resolution. Cheap enough to run after
    /// every pass that follows resolution; before it, there is nothing to
    /// check.
    pub fn check_no_unresolveds(&self) -> Result<(), InternalError> {
        if !self.ctx.phase.is_resolved() {
            debug!("resolution not complete, skipping unresolved reference check");
            return Ok(());
        }

        let registry = &self.ctx.registry;
        let count = registry.len(NodeKind::UnresolvedSymExpr);
        debug!(count, "checking for unresolved references");

        if count > UNRESOLVED_TOLERANCE {
            return Err(InternalError::ExcessUnresolved {
                count,
                tolerance: UNRESOLVED_TOLERANCE,
                remaining: registry.unresolveds().to_vec(),
            });
        }
        Ok(())
    }
}
