//! Sieve Core Types
//!
//! This crate provides the foundational types used throughout Sieve:
//! - Value types (the dynamic `Value` enum handed to and returned by types)
//! - Metadata and option maps (`Meta`, `Options`)
//! - The structural AST (`Node`) every type and rule serializes to

mod ast;
mod value;

pub use ast::*;
pub use value::*;
