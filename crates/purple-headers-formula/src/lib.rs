//! # purple-headers-formula
//!
//! Formula text handling for purple-headers.
//!
//! This crate provides:
//! - A span-preserving formula lexer ([`tokenize`])
//! - Relative reference adjustment for copied formulas ([`offset_formula`])
//!
//! Formulas are never evaluated here. Copying `=A5*2` one row down yields
//! `=A6*2`; `$`-anchored components stay where they are.
//!
//! ## Example
//!
//! ```rust
//! use purple_headers_formula::offset_formula;
//!
//! let moved = offset_formula("=SUM($A$1:A5)*B5", 3, 0).unwrap();
//! assert_eq!(moved, "=SUM($A$1:A8)*B8");
//! ```

pub mod error;
pub mod lexer;
pub mod offset;

pub use error::{FormulaError, FormulaResult};
pub use lexer::{tokenize, Token, TokenKind};
pub use offset::offset_formula;
