use std::collections::VecDeque;
use std::collections::vec_deque;
use std::fmt;

use crate::error::ModelError;

/// One character observed after a given window.
///
/// `count` is accumulated during training. `probability` and
/// `cumulative_probability` stay at `0.0` until the owning model finalizes
/// its tables, and are read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct CharCount {
	character: char,
	count: usize,
	probability: f64,
	cumulative_probability: f64,
}

impl CharCount {
	/// Creates the entry for a first observation (count = 1).
	pub fn new(character: char) -> Self {
		Self {
			character,
			count: 1,
			probability: 0.0,
			cumulative_probability: 0.0,
		}
	}

	pub fn character(&self) -> char {
		self.character
	}

	pub fn count(&self) -> usize {
		self.count
	}

	pub fn probability(&self) -> f64 {
		self.probability
	}

	pub fn cumulative_probability(&self) -> f64 {
		self.cumulative_probability
	}

	/// Sets both probability fields at once.
	///
	/// Only the language model calls this, when it finalizes a table.
	pub(crate) fn set_probabilities(&mut self, probability: f64, cumulative_probability: f64) {
		self.probability = probability;
		self.cumulative_probability = cumulative_probability;
	}
}

impl fmt::Display for CharCount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"({} {} {} {})",
			self.character, self.count, self.probability, self.cumulative_probability
		)
	}
}

/// Ordered record of the characters observed after one window.
///
/// ## Responsibilities:
/// - Accumulate occurrences of next characters during training
/// - Expose a stable iteration order shared by finalization and sampling
///
/// ## Invariants
/// - At most one entry per distinct character
/// - New characters are inserted at the front; known characters keep their position
/// - Every entry created by `update` has a count >= 1
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrequencyTable {
	entries: VecDeque<CharCount>,
}

impl FrequencyTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self { entries: VecDeque::new() }
	}

	/// Number of distinct characters recorded.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns the front entry, if any.
	pub fn first(&self) -> Option<&CharCount> {
		self.entries.front()
	}

	/// Returns the position of `character` in iteration order.
	pub fn index_of(&self, character: char) -> Option<usize> {
		self.entries.iter().position(|entry| entry.character == character)
	}

	/// Records one occurrence of `character`.
	///
	/// - If the character is already present, its count is increased.
	/// - Otherwise a new entry with a count of 1 is pushed at the front.
	pub fn update(&mut self, character: char) {
		match self.entries.iter_mut().find(|entry| entry.character == character) {
			Some(entry) => entry.count += 1,
			None => self.entries.push_front(CharCount::new(character)),
		}
	}

	/// Returns the entry at `index`.
	///
	/// # Errors
	/// Returns `ModelError::IndexOutOfBounds` if `index >= len()`.
	pub fn get(&self, index: usize) -> Result<&CharCount, ModelError> {
		self.entries.get(index).ok_or(ModelError::IndexOutOfBounds {
			index,
			len: self.entries.len(),
		})
	}

	/// Removes the entry for `character`.
	///
	/// Returns `true` if an entry was removed.
	pub fn remove(&mut self, character: char) -> bool {
		match self.index_of(character) {
			Some(index) => self.entries.remove(index).is_some(),
			None => false,
		}
	}

	/// Iterates over the entries in table order.
	pub fn iter(&self) -> vec_deque::Iter<'_, CharCount> {
		self.entries.iter()
	}

	/// Iterates over the entries starting at `index`.
	///
	/// An `index` past the end yields an empty iterator.
	pub fn iter_from(&self, index: usize) -> impl Iterator<Item = &CharCount> {
		self.entries.iter().skip(index)
	}

	pub(crate) fn iter_mut(&mut self) -> vec_deque::IterMut<'_, CharCount> {
		self.entries.iter_mut()
	}

	/// Copies the entries into a vector, in table order.
	pub fn to_vec(&self) -> Vec<CharCount> {
		self.entries.iter().cloned().collect()
	}
}

impl<'a> IntoIterator for &'a FrequencyTable {
	type Item = &'a CharCount;
	type IntoIter = vec_deque::Iter<'a, CharCount>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl fmt::Display for FrequencyTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "(")?;
		for (i, entry) in self.entries.iter().enumerate() {
			if i > 0 {
				write!(f, " ")?;
			}
			write!(f, "{entry}")?;
		}
		write!(f, ")")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn table_of(text: &str) -> FrequencyTable {
		let mut table = FrequencyTable::new();
		for c in text.chars() {
			table.update(c);
		}
		table
	}

	#[test]
	fn update_same_character_twice_counts_two() {
		let table = table_of("aa");
		assert_eq!(table.len(), 1);
		assert_eq!(table.get(0).unwrap().count(), 2);
	}

	#[test]
	fn update_distinct_characters_most_recent_first() {
		let table = table_of("ab");
		assert_eq!(table.len(), 2);
		assert_eq!(table.get(0).unwrap().character(), 'b');
		assert_eq!(table.get(1).unwrap().character(), 'a');
	}

	#[test]
	fn existing_characters_keep_their_position() {
		// "committee " is the usual textbook case
		let table = table_of("committee ");
		let order: String = table.iter().map(CharCount::character).collect();
		assert_eq!(order, " etimoc");
		assert_eq!(table.get(table.index_of('m').unwrap()).unwrap().count(), 2);
		assert_eq!(table.get(table.index_of('t').unwrap()).unwrap().count(), 2);
		assert_eq!(table.get(table.index_of('e').unwrap()).unwrap().count(), 2);
	}

	#[test]
	fn index_of_missing_character() {
		let table = table_of("xyz");
		assert_eq!(table.index_of('z'), Some(0));
		assert_eq!(table.index_of('x'), Some(2));
		assert_eq!(table.index_of('q'), None);
	}

	#[test]
	fn get_out_of_bounds() {
		let empty = FrequencyTable::new();
		assert!(matches!(
			empty.get(0),
			Err(ModelError::IndexOutOfBounds { index: 0, len: 0 })
		));

		let table = table_of("ab");
		assert!(table.get(1).is_ok());
		assert!(matches!(
			table.get(2),
			Err(ModelError::IndexOutOfBounds { index: 2, len: 2 })
		));
		assert!(table.get(usize::MAX).is_err());
	}

	#[test]
	fn remove_reports_whether_something_was_removed() {
		let mut table = table_of("abc");
		assert!(table.remove('b'));
		assert!(!table.remove('b'));
		assert!(!table.remove('q'));
		let order: String = table.iter().map(CharCount::character).collect();
		assert_eq!(order, "ca");
	}

	#[test]
	fn first_and_iter_from() {
		assert!(FrequencyTable::new().first().is_none());

		let table = table_of("abc");
		assert_eq!(table.first().map(CharCount::character), Some('c'));
		let tail: String = table.iter_from(1).map(CharCount::character).collect();
		assert_eq!(tail, "ba");
		assert_eq!(table.iter_from(10).count(), 0);
	}

	#[test]
	fn to_vec_is_restartable_snapshot() {
		let table = table_of("aab");
		let first = table.to_vec();
		let second = table.to_vec();
		assert_eq!(first, second);
		assert_eq!(first.len(), 2);
		assert_eq!((&table).into_iter().count(), 2);
	}

	#[test]
	fn display() {
		assert_eq!(FrequencyTable::new().to_string(), "()");
		assert_eq!(table_of("aab").to_string(), "((b 1 0 0) (a 2 0 0))");
	}
}
