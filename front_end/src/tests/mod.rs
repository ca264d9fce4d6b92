//! Tests for the AST model and primitive vocabulary

mod ast_tests;
