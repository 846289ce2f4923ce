//! # Reading the Schema Definition Language
//!
//! Type definitions written in SDL are read into a [Schema](crate::schema::Schema) using the
//! [ParseSdl](parser::ParseSdl) trait. Only what's needed to describe fields and their arguments
//! is kept; descriptions, default values and directives are read and discarded.

mod lexer;

#[cfg(test)]
mod tests;

pub mod error;
pub mod parser;
