use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use log::{info, warn};

use super::language_model::LanguageModel;
use super::model_config::ModelConfig;
use crate::error::ModelError;
use crate::io;

/// Extension of the corpus files picked up by [`Generator::new`].
pub const CORPUS_EXTENSION: &str = "txt";

/// High-level generator managing one language model per corpus.
///
/// # Responsibilities
/// - Train a `LanguageModel` for every corpus file of a directory
/// - Keep the trained models under the corpus name (file stem)
/// - Route generation requests to the named model
///
/// All models share the same window length and seed.
#[derive(Debug)]
pub struct Generator {
	config: ModelConfig,
	models: HashMap<String, LanguageModel>,
}

impl Generator {
	/// Creates an empty generator.
	pub fn empty(config: ModelConfig) -> Self {
		Self { config, models: HashMap::new() }
	}

	/// Creates a generator by training on all `.txt` corpora of a directory.
	///
	/// # Parameters
	/// - `folder`: Path to a directory containing corpus files.
	///   Both `"folder"` and `"folder/"` are accepted.
	/// - `config`: Window length and seed applied to every model.
	///
	/// # Behavior
	/// - Corpora are split into chunks (based on CPU cores) and trained on
	///   worker threads. Each model is built by a single worker and moved
	///   back once trained.
	/// - The model name is derived from the file name (without extension).
	///
	/// # Errors
	/// - Returns an error if the path does not exist or is not a directory.
	/// - Returns an error if a corpus fails to load.
	pub fn new<P: AsRef<Path>>(folder: P, config: &ModelConfig) -> Result<Self, ModelError> {
		let string_path = folder
			.as_ref()
			.to_str()
			.ok_or_else(|| ModelError::InvalidPath(folder.as_ref().display().to_string()))?;
		let folder = io::resolve_corpus_folder(string_path);

		if !folder.is_dir() {
			return Err(ModelError::InvalidPath(format!(
				"Expected a directory, got: {}",
				folder.display()
			)));
		}

		let mut corpora = Vec::new();
		for file in io::list_files(&folder, CORPUS_EXTENSION)? {
			let path = folder.join(&file);
			corpora.push((io::corpus_name(&path)?, path));
		}

		let mut generator = Self::empty(config.clone());
		if corpora.is_empty() {
			warn!("no .{CORPUS_EXTENSION} corpus found in {}", folder.display());
			return Ok(generator);
		}

		for (name, model) in Self::train_all(corpora, config)? {
			generator.add_model(&name, model)?;
		}

		info!(
			"loaded {} models with window length {}",
			generator.models.len(),
			config.window_length()
		);
		Ok(generator)
	}

	/// Trains every corpus on worker threads.
	///
	/// # Notes
	/// - Uses MPSC channels to collect models from threads.
	/// - The first failure is reported once all workers are done.
	fn train_all(
		corpora: Vec<(String, PathBuf)>,
		config: &ModelConfig,
	) -> Result<Vec<(String, LanguageModel)>, ModelError> {
		let chunk_size = corpora.len().div_ceil(num_cpus::get().max(1));

		let (tx, rx) = mpsc::channel();
		for chunk in corpora.chunks(chunk_size) {
			let tx = tx.clone();
			let chunk = chunk.to_vec();
			let config = config.clone();

			thread::spawn(move || {
				for (name, path) in chunk {
					let mut model = LanguageModel::from_config(&config);
					let trained = model.train_file(&path).map(|()| (name, model));
					// The receiver outlives every worker
					let _ = tx.send(trained);
				}
			});
		}
		drop(tx);

		let mut models = Vec::with_capacity(corpora.len());
		let mut failure = None;
		for trained in rx.iter() {
			match trained {
				Ok(entry) => models.push(entry),
				Err(e) => {
					failure.get_or_insert(e);
				}
			}
		}

		match failure {
			Some(e) => Err(e),
			None => Ok(models),
		}
	}

	/// Adds an already trained model.
	///
	/// # Errors
	/// Returns an error if a model with this name is already loaded.
	pub fn add_model(&mut self, name: &str, model: LanguageModel) -> Result<(), ModelError> {
		if self.models.contains_key(name) {
			return Err(ModelError::DuplicateModel(name.to_owned()));
		}
		self.models.insert(name.to_owned(), model);
		Ok(())
	}

	/// Returns the list of loaded model names, sorted.
	pub fn get_model_names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.models.keys().cloned().collect();
		names.sort();
		names
	}

	pub fn config(&self) -> &ModelConfig {
		&self.config
	}

	pub fn window_length(&self) -> usize {
		self.config.window_length()
	}

	/// Returns the named model, if loaded.
	pub fn model(&self, name: &str) -> Option<&LanguageModel> {
		self.models.get(name)
	}

	/// Generates text with the named model.
	///
	/// # Errors
	/// Returns `ModelError::UnknownModel` if no model has this name.
	pub fn generate(&mut self, name: &str, initial_text: &str, target_length: usize) -> Result<String, ModelError> {
		let model = self
			.models
			.get_mut(name)
			.ok_or_else(|| ModelError::UnknownModel(name.to_owned()))?;
		Ok(model.generate(initial_text, target_length))
	}
}
