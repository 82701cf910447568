#![doc = include_str!("../README.md")]
//! Document tree representation for JSON-lite.
//!
//! Parsing lives in `jsonlite-parse`; this crate only holds the owned tree
//! and its accessors.

mod value;

pub use value::{Document, Iter, Value};
