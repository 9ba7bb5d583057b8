use rs_lm_core::{CharSource, LanguageModel, ModelConfig, TextSource};

const CORPUS: &str = "It was the best of times, it was the worst of times, \
it was the age of wisdom, it was the age of foolishness, \
it was the epoch of belief, it was the epoch of incredulity.";

fn train(config: &ModelConfig) -> LanguageModel {
	let mut model = LanguageModel::from_config(config);
	model.train_source(TextSource::new(CORPUS)).unwrap();
	model
}

#[test]
fn every_table_is_a_distribution() {
	let model = train(&ModelConfig::new(3).unwrap().with_seed(20));
	for window in model.windows() {
		let table = model.table(window).unwrap();
		let sum: f64 = table.iter().map(|entry| entry.probability()).sum();
		assert!((sum - 1.0).abs() < 1e-9);

		let cumulative: Vec<f64> = table.iter().map(|entry| entry.cumulative_probability()).collect();
		assert!(cumulative.windows(2).all(|pair| pair[0] <= pair[1]));
		assert!((cumulative[cumulative.len() - 1] - 1.0).abs() < 1e-9);
	}
}

#[test]
fn generated_text_only_uses_learned_transitions() {
	let mut model = train(&ModelConfig::new(4).unwrap().with_seed(7));
	let text: Vec<char> = model.generate("it w", 300).chars().collect();

	for i in 4..text.len() {
		let window: String = text[i - 4..i].iter().collect();
		let table = model.table(&window).unwrap();
		assert!(table.index_of(text[i]).is_some());
	}
}

#[test]
fn seeds_drive_determinism() {
	let config = ModelConfig::new(2).unwrap().with_seed(20);
	let a = train(&config).generate("it", 500);
	let b = train(&config).generate("it", 500);
	assert_eq!(a, b);
}

#[test]
fn training_from_any_char_source() {
	struct Repeat {
		left: usize,
	}

	impl CharSource for Repeat {
		fn has_more(&mut self) -> bool {
			self.left > 0
		}

		fn read_char(&mut self) -> Option<char> {
			self.left = self.left.checked_sub(1)?;
			Some(if self.left % 2 == 0 { 'o' } else { 'x' })
		}
	}

	let mut model = LanguageModel::with_seed(1, 3).unwrap();
	model.train_source(Repeat { left: 10 }).unwrap();
	assert_eq!(model.window_count(), 2);
	assert_eq!(model.generate("x", 6), "xoxoxo");
}
