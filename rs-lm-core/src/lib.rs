//! Character-level window language model.
//!
//! This crate provides:
//! - Training of "next character given the previous k characters" tables
//! - Conversion of counts into cumulative probability distributions
//! - Seedable, stochastic text generation one character at a time
//! - A multi-corpus generator and I/O utilities for the binaries
//!
//! Models live in memory only; nothing is persisted.

/// Core window model, frequency tables and generation logic.
pub mod model;

/// Abstract character sources consumed by training.
pub mod source;

/// I/O utilities (corpus loading, path helpers).
pub mod io;

/// Error type shared by the whole crate.
pub mod error;

pub use error::ModelError;
pub use model::frequency_table::{CharCount, FrequencyTable};
pub use model::generator::Generator;
pub use model::language_model::LanguageModel;
pub use model::model_config::ModelConfig;
pub use source::{CharSource, FileSource, TextSource};
