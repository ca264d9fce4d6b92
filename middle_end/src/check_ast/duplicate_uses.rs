use std::collections::HashMap;

use front_end::ast::NodeHandle;
use tracing::debug;

use super::{AstChecker, InternalError};

impl AstChecker<'_> {
    /// Every formal parameter belongs to exactly one function. Functions are
    /// visited in registration order and formals in declaration order, so
    /// the reported pair is the first duplicate a reader of the program
    /// would meet.
    pub fn check_for_duplicate_uses(&self) -> Result<(), InternalError> {
        let functions = self.ctx.registry.fn_symbols();
        debug!(functions = functions.len(), "checking for formals shared between functions");

        let mut owners = HashMap::new();
        for &fn_id in functions {
            let function = self
                .ast
                .symbol(fn_id)
                .ok_or(InternalError::DanglingNode(NodeHandle::FnSymbol(fn_id)))?;

            for &formal in function.formals() {
                if let Some(&first_owner) = owners.get(&formal) {
                    return Err(InternalError::DuplicateFormal {
                        formal,
                        first_owner,
                        second_owner: fn_id,
                    });
                }
                owners.insert(formal, fn_id);
            }
        }

        Ok(())
    }
}
