pub mod ast;
pub mod error;
pub mod ids;
pub mod primitive;
pub mod source_location;
pub mod symbol_table;

#[cfg(test)]
mod tests;
