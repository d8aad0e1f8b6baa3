//! Core conversion modules
//!
//! This module contains the conversion engine:
//! - `wiki2latex`: wiki table markup to LaTeX `tabularx` converter

pub mod wiki2latex;

// Re-export main types and functions from wiki2latex
pub use wiki2latex::{
    build_table, wiki_to_latex, wiki_to_latex_with_options, TableBuilder, TableEvent, W2LOptions,
    WikiConverter,
};
