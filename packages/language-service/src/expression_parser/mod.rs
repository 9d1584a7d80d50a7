/**
 * Expression Parser Module
 *
 * Parsed binding expressions consumed by the language service.
 */
pub mod ast;

pub use ast::*;
