//! The passes the driver sequences before and between verification points.
//!
//! There is no parser in this workspace, so `build` constructs the tree a
//! parser would have produced for the program below. `normalize` and
//! `resolve` then rewrite it the way the real passes do, leaving the tree in
//! the shape each verification point expects.
//!
//! ```text
//! proc add(a, b) { return a + b; }
//! var total;            // default-initialized
//! total = add(total);   // argument list still detached after parsing
//! var pair = (total, total);
//! ```

use front_end::ast::{Callee, Expr, NodeHandle};
use front_end::primitive::PrimitiveTag;
use front_end::source_location::Span;
use front_end::symbol_table::SymbolKind;
use tracing::{debug, info};

use crate::pipeline::{DriverError, Session};

/// Name of the helper synthesized for tuple literals. Resolution does not
/// bind it yet, which is why one unresolved reference is tolerated.
pub const TUPLE_CONSTRUCTOR: &str = "_construct__tuple";

const FILE: &str = "demo.chpl";

fn at(line: usize, column: usize) -> Span {
    Span::point(line, column).with_file(FILE)
}

pub fn build(session: &mut Session) -> Result<(), DriverError> {
    let Session { ast, ctx } = session;

    let root = ast.new_root("_root");
    ast.new_sym_expr(root, Span::synthesized(), ctx)?;

    // proc add(a, b) { return a + b; }
    let a = ast.new_formal("a", at(1, 10));
    let b = ast.new_formal("b", at(1, 13));
    ast.declare(a, at(1, 10), ctx)?;
    ast.declare(b, at(1, 13), ctx)?;
    let add = ast.new_function("add", vec![a, b], at(1, 6), ctx)?;
    ast.declare(add, at(1, 1), ctx)?;

    let use_a = ast.new_unresolved("a", at(1, 25), ctx);
    let use_b = ast.new_unresolved("b", at(1, 29), ctx);
    let sum = ast.new_call(
        Callee::Primitive(PrimitiveTag::Add),
        vec![Expr::Unresolved(use_a), Expr::Unresolved(use_b)],
        at(1, 25),
        ctx,
    )?;
    ast.new_call(Callee::Primitive(PrimitiveTag::Return), vec![Expr::Call(sum)], at(1, 18), ctx)?;

    // var total;
    let total = ast.new_symbol("total", SymbolKind::Variable, at(2, 5));
    ast.declare(total, at(2, 1), ctx)?;
    let init_target = ast.new_sym_expr(total, at(2, 5), ctx)?;
    ast.new_call(Callee::Primitive(PrimitiveTag::Init), vec![Expr::Sym(init_target)], at(2, 1), ctx)?;

    // total = add(total);
    let callee = ast.new_unresolved("add", at(3, 9), ctx);
    let actual = ast.new_unresolved("total", at(3, 13), ctx);
    let actuals = ast.new_call(
        Callee::Primitive(PrimitiveTag::ActualsList),
        vec![Expr::Unresolved(callee), Expr::Unresolved(actual)],
        at(3, 12),
        ctx,
    )?;
    let lhs = ast.new_unresolved("total", at(3, 1), ctx);
    ast.new_call(
        Callee::Primitive(PrimitiveTag::Move),
        vec![Expr::Unresolved(lhs), Expr::Call(actuals)],
        at(3, 1),
        ctx,
    )?;

    // var pair = (total, total);
    let pair = ast.new_symbol("pair", SymbolKind::Variable, at(4, 5));
    ast.declare(pair, at(4, 1), ctx)?;
    let pair_ref = ast.new_sym_expr(pair, at(4, 5), ctx)?;
    let tuple = ast.new_unresolved(TUPLE_CONSTRUCTOR, at(4, 12), ctx);
    let first = ast.new_unresolved("total", at(4, 13), ctx);
    let second = ast.new_unresolved("total", at(4, 20), ctx);
    ast.new_call(
        Callee::Primitive(PrimitiveTag::Move),
        vec![Expr::Sym(pair_ref), Expr::Unresolved(tuple), Expr::Unresolved(first), Expr::Unresolved(second)],
        at(4, 1),
        ctx,
    )?;

    info!(symbols = ast.symbols().len(), "built program");
    Ok(())
}

/// Attach detached argument lists to the routine they call. The first
/// actual of an argument list names the callee. Completes parsing.
pub fn normalize(session: &mut Session) -> Result<(), DriverError> {
    let Session { ast, ctx } = session;

    let lists: Vec<_> = ast
        .calls()
        .filter(|(_, call)| call.live && call.primitive() == Some(PrimitiveTag::ActualsList))
        .map(|(id, call)| (id, call.args.clone()))
        .collect();

    for (id, args) in lists {
        let Some((&Expr::Unresolved(callee), actuals)) = args.split_first() else {
            return Err(DriverError::MalformedActuals(id));
        };
        let name = ast
            .unresolved(callee)
            .map(|node| node.name.clone())
            .ok_or(DriverError::MalformedActuals(id))?;
        let routine = ast
            .symbols()
            .iter()
            .find(|(_, sym)| sym.is_function() && sym.name == name)
            .map(|(fn_id, _)| fn_id)
            .ok_or(DriverError::UnknownRoutine(name.clone()))?;

        ast.set_callee(id, Callee::Routine(routine))?;
        ast.set_args(id, actuals.to_vec())?;
        ast.remove(NodeHandle::UnresolvedSymExpr(callee))?;
        debug!(call = %id, routine = %name, "attached argument list");
    }

    ctx.registry.prune_dead(ast);
    ctx.phase.mark_parsed()?;
    Ok(())
}

/// Bind every unresolved name that has a symbol and replace default
/// initialization placeholders. Completes resolution.
pub fn resolve(session: &mut Session) -> Result<(), DriverError> {
    let Session { ast, ctx } = session;

    let pending: Vec<_> = ast
        .unresolveds()
        .filter(|(_, node)| node.live)
        .map(|(id, node)| (id, node.name.clone()))
        .collect();

    for (id, name) in pending {
        match ast.symbols().lookup(&name) {
            Some(target) => {
                ast.resolve_unresolved(id, target, ctx)?;
            }
            None => debug!(unresolved = %id, %name, "name left unresolved"),
        }
    }

    let inits: Vec<_> = ast
        .calls()
        .filter(|(_, call)| call.live && call.primitive() == Some(PrimitiveTag::Init))
        .map(|(id, _)| id)
        .collect();
    for id in inits {
        ast.set_callee(id, Callee::Primitive(PrimitiveTag::Move))?;
    }

    ctx.registry.prune_dead(ast);
    ctx.phase.mark_resolved()?;
    Ok(())
}
