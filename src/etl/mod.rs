//! Core ETL (Extract, Transform, Load) abstractions
//!
//! This module provides the stage traits and the [`Pipeline`] that runs them
//! once, in order, over a single in-memory dataset.

mod extract;
mod load;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::{Pipeline, RunOutcome};
pub use transform::Transformer;
