//! This crate implements the Knuth-Plass total-fit line-breaking
//! algorithm: turning a paragraph of text into a sequence of justified
//! lines with minimal total "badness".

#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub mod config;
pub mod error;
pub mod items;
pub mod optimizer;
pub mod tokenizer;
pub mod units;

pub use crate::error::{Error, Result};
