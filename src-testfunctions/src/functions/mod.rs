//! Benchmark objectives, split by landscape
//!
//! - `unimodal`: one basin, used for convergence checks
//! - `multimodal`: many local minima, used for robustness checks

pub mod multimodal;
pub mod unimodal;

pub use multimodal::*;
pub use unimodal::*;
