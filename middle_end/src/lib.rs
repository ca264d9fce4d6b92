pub mod check_ast;
pub mod diagnostics;

#[cfg(test)]
mod tests;
