use std::io;

use thiserror::Error;

/// Errors produced by the language model and its helpers.
///
/// Only contract violations and I/O failures are errors. An unseen window
/// during generation or an initial text shorter than the window are defined
/// terminal conditions and never surface here.
#[derive(Debug, Error)]
pub enum ModelError {
	/// Indexed access past the end of a frequency table.
	#[error("index {index} out of bounds for table of size {len}")]
	IndexOutOfBounds { index: usize, len: usize },

	#[error("window length must be >= 1, got {0}")]
	InvalidWindowLength(usize),

	/// A model can only be trained once; a second pass would finalize its
	/// probabilities twice.
	#[error("model has already been trained")]
	AlreadyTrained,

	#[error("model {0} not found")]
	UnknownModel(String),

	#[error("model {0} already loaded")]
	DuplicateModel(String),

	#[error("invalid path: {0}")]
	InvalidPath(String),

	#[error(transparent)]
	Io(#[from] io::Error),
}
