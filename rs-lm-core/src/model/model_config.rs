use serde::Deserialize;

use crate::error::ModelError;

/// Construction parameters for a [`LanguageModel`](super::language_model::LanguageModel).
///
/// # Invariants
/// - `window_length` is always >= 1
/// - `seed == None` means the random source is seeded from the OS
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawModelConfig")]
pub struct ModelConfig {
	window_length: usize,
	seed: Option<u64>,
}

/// Unvalidated form used for deserialization.
#[derive(Deserialize)]
struct RawModelConfig {
	window_length: usize,
	seed: Option<u64>,
}

impl TryFrom<RawModelConfig> for ModelConfig {
	type Error = ModelError;

	fn try_from(raw: RawModelConfig) -> Result<Self, Self::Error> {
		let mut config = ModelConfig::new(raw.window_length)?;
		config.set_seed(raw.seed);
		Ok(config)
	}
}

impl ModelConfig {
	/// Creates an unseeded configuration.
	///
	/// # Errors
	/// Returns `ModelError::InvalidWindowLength` if `window_length` is 0.
	pub fn new(window_length: usize) -> Result<Self, ModelError> {
		if window_length == 0 {
			return Err(ModelError::InvalidWindowLength(window_length));
		}
		Ok(Self { window_length, seed: None })
	}

	/// Returns the configuration with a fixed seed.
	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	pub fn window_length(&self) -> usize {
		self.window_length
	}

	pub fn seed(&self) -> Option<u64> {
		self.seed
	}

	pub fn set_seed(&mut self, seed: Option<u64>) {
		self.seed = seed;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_empty_window() {
		assert!(matches!(ModelConfig::new(0), Err(ModelError::InvalidWindowLength(0))));
	}

	#[test]
	fn seed_setters() {
		let mut config = ModelConfig::new(3).unwrap();
		assert_eq!(config.seed(), None);
		config = config.with_seed(7);
		assert_eq!(config.seed(), Some(7));
		config.set_seed(None);
		assert_eq!(config.seed(), None);
		assert_eq!(config.window_length(), 3);
	}
}
