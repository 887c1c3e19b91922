//! Data layer: core types and the load → filter → sort → summarize → export
//! pipeline stages.
//!
//! Architecture:
//! ```text
//!  .csv bytes / demo constant
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse bytes → Table (per-column dtype inference)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Table    │  named typed columns, positionally aligned rows
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐   ┌──────────┐   ┌───────────┐   ┌──────────┐
//!   │  filter   │ → │  sort     │ → │ summarize │   │  export   │
//!   └──────────┘   └──────────┘   └───────────┘   └──────────┘
//! ```
//!
//! Every stage returns a fresh value and never mutates its input.

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sort;
pub mod summary;

use thiserror::Error;

/// Errors produced by the data pipeline. Only parsing can actually fail; every
/// other stage degrades (bad filter values fall back to "All", unknown sort
/// columns leave the table untouched).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The uploaded bytes are not valid delimited text.
    #[error("could not parse file as CSV: {0}")]
    Parse(String),
}
