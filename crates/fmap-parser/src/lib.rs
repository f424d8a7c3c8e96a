//! # fmap-parser
//!
//! ast-grep-based Java method extraction for fmap.
//!
//! Turns one Java compilation unit into an ordered list of
//! [`MethodRecord`](fmap_core::MethodRecord)s:
//! - [`classify`]: numeric-type check for candidate variables
//! - [`span`]: balanced-brace recovery of a method's source text
//! - [`parser`]: tree construction and syntax-error detection
//! - [`java`]: the method walker ([`JavaParser`])

pub mod classify;
pub mod java;
pub mod parser;
pub mod span;

pub use classify::is_numeric;
pub use java::{JavaParser, ParseOptions, parse};
pub use span::extract_body;
