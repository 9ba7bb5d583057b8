//! Top-level module for the window language model.
//!
//! This module provides:
//! - The ordered per-window frequency table (`FrequencyTable`)
//! - The sliding-window model itself (`LanguageModel`)
//! - Validated construction parameters (`ModelConfig`)
//! - A multi-corpus front end (`Generator`)

/// Ordered record of next characters and their counts for one window.
///
/// Entries also carry the probability and cumulative probability filled in
/// when the owning model finalizes its tables.
pub mod frequency_table;

/// Fixed-window character model.
///
/// Handles training from a character stream, probability finalization,
/// inverse-CDF sampling and text generation.
pub mod language_model;

/// Window length and seed used to build models.
pub mod model_config;

/// High-level interface training one model per corpus file.
pub mod generator;
