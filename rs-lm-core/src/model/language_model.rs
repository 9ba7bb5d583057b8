use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::path::Path;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::frequency_table::{CharCount, FrequencyTable};
use super::model_config::ModelConfig;
use crate::error::ModelError;
use crate::source::{CharSource, FileSource};

/// Character-level language model over a fixed-width sliding window.
///
/// The `LanguageModel` maps every window of `window_length` characters seen
/// in the training corpus to the [`FrequencyTable`] of characters that
/// followed it, and samples from those tables to generate text.
///
/// # Responsibilities
/// - Build the window tables from a character stream (one pass)
/// - Turn counts into cumulative probabilities once training is over
/// - Generate text by inverse-CDF sampling, one draw per character
///
/// # Invariants
/// - `window_length` is always >= 1
/// - Every key of `tables` is exactly `window_length` characters long
/// - Once `trained` is set, tables are finalized and never mutated again
///
/// A model is not synchronized. Share it behind a lock or use one instance
/// per task.
#[derive(Debug)]
pub struct LanguageModel {
	window_length: usize,
	tables: HashMap<String, FrequencyTable>,
	rng: StdRng,
	trained: bool,
}

impl LanguageModel {
	/// Creates a model whose random source is seeded from the OS.
	///
	/// # Errors
	/// Returns an error if `window_length` is 0.
	pub fn new(window_length: usize) -> Result<Self, ModelError> {
		Ok(Self::from_config(&ModelConfig::new(window_length)?))
	}

	/// Creates a model with a deterministic random source.
	///
	/// # Errors
	/// Returns an error if `window_length` is 0.
	pub fn with_seed(window_length: usize, seed: u64) -> Result<Self, ModelError> {
		Ok(Self::from_config(&ModelConfig::new(window_length)?.with_seed(seed)))
	}

	/// Creates a model from a validated configuration.
	pub fn from_config(config: &ModelConfig) -> Self {
		let rng = match config.seed() {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		};
		Self {
			window_length: config.window_length(),
			tables: HashMap::new(),
			rng,
			trained: false,
		}
	}

	pub fn window_length(&self) -> usize {
		self.window_length
	}

	/// Number of distinct windows learned.
	pub fn window_count(&self) -> usize {
		self.tables.len()
	}

	pub fn is_trained(&self) -> bool {
		self.trained
	}

	/// Returns the table learned for `window`, if that window was seen.
	pub fn table(&self, window: &str) -> Option<&FrequencyTable> {
		self.tables.get(window)
	}

	/// Iterates over the learned windows, in no particular order.
	pub fn windows(&self) -> impl Iterator<Item = &str> {
		self.tables.keys().map(String::as_str)
	}

	/// Trains the model on a character stream.
	///
	/// The first `window_length` characters form the initial window; every
	/// following character is recorded in the table of the current window,
	/// which then slides by one. All tables are finalized at the end.
	///
	/// A source shorter than the window leaves the model empty.
	///
	/// # Errors
	/// Returns `ModelError::AlreadyTrained` on a second call.
	pub fn train<I: IntoIterator<Item = char>>(&mut self, source: I) -> Result<(), ModelError> {
		if self.trained {
			return Err(ModelError::AlreadyTrained);
		}

		let mut chars = source.into_iter();
		let mut window: VecDeque<char> = VecDeque::new();
		while window.len() < self.window_length {
			match chars.next() {
				Some(c) => window.push_back(c),
				None => break,
			}
		}

		let mut observed = 0usize;
		if window.len() == self.window_length {
			let mut key: String = window.iter().collect();
			for c in chars {
				match self.tables.get_mut(&key) {
					Some(table) => table.update(c),
					None => {
						let mut table = FrequencyTable::new();
						table.update(c);
						self.tables.insert(key, table);
					}
				}
				observed += 1;

				window.pop_front();
				window.push_back(c);
				key = window.iter().collect();
			}
		}

		for table in self.tables.values_mut() {
			Self::calculate_probabilities(table);
		}
		self.trained = true;

		debug!(
			"trained window length {} on {} transitions, {} windows",
			self.window_length,
			observed,
			self.tables.len()
		);
		Ok(())
	}

	/// Trains the model from a [`CharSource`].
	pub fn train_source<S: CharSource>(&mut self, source: S) -> Result<(), ModelError> {
		self.train(source.chars())
	}

	/// Trains the model on the contents of a text file.
	///
	/// # Errors
	/// Returns `ModelError::Io` if the file cannot be read, or
	/// `ModelError::AlreadyTrained` on a second call.
	pub fn train_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ModelError> {
		if self.trained {
			return Err(ModelError::AlreadyTrained);
		}
		self.train_source(FileSource::open(path)?)
	}

	/// Computes the probability distribution of a table.
	///
	/// Each entry gets `count / total` as probability and the running sum of
	/// probabilities, in table order, as cumulative probability. An empty
	/// table is left untouched.
	pub fn calculate_probabilities(table: &mut FrequencyTable) {
		let total: usize = table.iter().map(CharCount::count).sum();
		if total == 0 {
			return;
		}

		let mut cumulative = 0.0;
		for entry in table.iter_mut() {
			let probability = entry.count() as f64 / total as f64;
			cumulative += probability;
			entry.set_probabilities(probability, cumulative);
		}
	}

	/// Draws a character from a finalized table.
	///
	/// Returns `None` only for an empty table.
	pub fn get_random_char(&mut self, table: &FrequencyTable) -> Option<char> {
		Self::sample(&mut self.rng, table)
	}

	/// Inverse-CDF sampling: the first entry whose cumulative probability
	/// exceeds `r` wins. Rounding can leave the last cumulative value just
	/// under `r`; the last entry is returned in that case.
	fn sample(rng: &mut StdRng, table: &FrequencyTable) -> Option<char> {
		let r: f64 = rng.random();
		table
			.iter()
			.find(|entry| entry.cumulative_probability() > r)
			.or_else(|| table.iter().last())
			.map(CharCount::character)
	}

	/// Generates text from the learned distributions.
	///
	/// Starts from the last `window_length` characters of `initial_text` and
	/// appends sampled characters until the result is `target_length`
	/// characters long or the current window was never seen in training.
	///
	/// # Notes
	/// - Lengths are counted in characters, not bytes.
	/// - An `initial_text` shorter than the window is returned unchanged.
	pub fn generate(&mut self, initial_text: &str, target_length: usize) -> String {
		let mut length = initial_text.chars().count();
		if length < self.window_length {
			return initial_text.to_owned();
		}

		let mut window: VecDeque<char> = initial_text
			.chars()
			.skip(length - self.window_length)
			.collect();
		let mut key: String = window.iter().collect();
		let mut result = initial_text.to_owned();

		while length < target_length {
			let Some(table) = self.tables.get(&key) else {
				trace!("window {key:?} never seen, stopping at {length} characters");
				break;
			};
			let Some(c) = Self::sample(&mut self.rng, table) else {
				break;
			};

			result.push(c);
			length += 1;

			window.pop_front();
			window.push_back(c);
			key = window.iter().collect();
		}

		result
	}
}

impl fmt::Display for LanguageModel {
	/// One line per window, sorted by window.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut windows: Vec<&String> = self.tables.keys().collect();
		windows.sort();
		for window in windows {
			writeln!(f, "{window:?} : {}", self.tables[window])?;
		}
		Ok(())
	}
}
