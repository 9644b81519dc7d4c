//! Fontvariant CLI library.

pub mod cli;
pub mod generate;
mod io;

pub use generate::{GenerateArgs, generate_variants};
