use std::collections::HashMap;

use front_end::ast::NodeHandle;
use tracing::debug;

use super::{AstChecker, InternalError};

impl AstChecker<'_> {
    /// Every reference to a declared symbol agrees with exactly one live
    /// declaration, and the symbol's defPoint is that declaration. Symbols
    /// without a defPoint (unbound, or implicit roots) are exempt.
    pub fn check_for_missing_defs(&self) -> Result<(), InternalError> {
        let registry = &self.ctx.registry;
        debug!(
            defs = registry.def_exprs().len(),
            references = registry.sym_exprs().len(),
            "checking references against declarations"
        );

        let mut defs = HashMap::with_capacity(registry.def_exprs().len());
        for &def_id in registry.def_exprs() {
            let def = self
                .ast
                .def(def_id)
                .ok_or(InternalError::DanglingNode(NodeHandle::DefExpr(def_id)))?;

            if let Some(&first) = defs.get(&def.sym) {
                return Err(InternalError::MultipleDefinitions {
                    symbol: def.sym,
                    first,
                    second: def_id,
                });
            }
            defs.insert(def.sym, def_id);
        }

        for &se_id in registry.sym_exprs() {
            let reference = self
                .ast
                .sym_expr(se_id)
                .ok_or(InternalError::DanglingNode(NodeHandle::SymExpr(se_id)))?;
            let symbol = reference.target;
            let sym = self.ast.symbol(symbol).ok_or(InternalError::DanglingSymbol(symbol))?;

            let Some(def_point) = sym.def_point.decl() else {
                continue;
            };

            match defs.get(&symbol) {
                None => {
                    return Err(InternalError::MissingDef {
                        symbol,
                        reference: se_id,
                        def_point,
                    })
                }
                Some(&declared) if declared != def_point => {
                    return Err(InternalError::DefPointMismatch {
                        symbol,
                        reference: se_id,
                        def_point,
                        declared,
                    })
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}
