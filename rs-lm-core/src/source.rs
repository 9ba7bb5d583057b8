use std::path::Path;

use crate::error::ModelError;
use crate::io::read_corpus;

/// A stream of characters consumed once, front to back.
///
/// Encoding and line-ending handling belong to the implementor; the model
/// only sees `char`s.
pub trait CharSource {
	/// Returns `true` while at least one character remains.
	fn has_more(&mut self) -> bool;

	/// Reads the next character, or `None` once the source is exhausted.
	fn read_char(&mut self) -> Option<char>;

	/// Adapts the source into an iterator.
	fn chars(self) -> SourceChars<Self>
	where
		Self: Sized,
	{
		SourceChars { source: self }
	}
}

/// Iterator over the remaining characters of a [`CharSource`].
pub struct SourceChars<S> {
	source: S,
}

impl<S: CharSource> Iterator for SourceChars<S> {
	type Item = char;

	fn next(&mut self) -> Option<char> {
		if self.source.has_more() {
			self.source.read_char()
		} else {
			None
		}
	}
}

/// In-memory character source.
#[derive(Clone, Debug)]
pub struct TextSource {
	text: String,
	// Byte offset of the next character.
	position: usize,
}

impl TextSource {
	pub fn new(text: impl Into<String>) -> Self {
		Self { text: text.into(), position: 0 }
	}
}

impl CharSource for TextSource {
	fn has_more(&mut self) -> bool {
		self.position < self.text.len()
	}

	fn read_char(&mut self) -> Option<char> {
		let c = self.text[self.position..].chars().next()?;
		self.position += c.len_utf8();
		Some(c)
	}
}

/// Character source backed by a UTF-8 text file.
///
/// The file is read entirely on open; reads are then served from memory.
#[derive(Clone, Debug)]
pub struct FileSource {
	inner: TextSource,
}

impl FileSource {
	/// Opens and reads `path`.
	///
	/// # Errors
	/// Returns `ModelError::Io` if the file cannot be read or is not valid UTF-8.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
		Ok(Self { inner: TextSource::new(read_corpus(path)?) })
	}
}

impl CharSource for FileSource {
	fn has_more(&mut self) -> bool {
		self.inner.has_more()
	}

	fn read_char(&mut self) -> Option<char> {
		self.inner.read_char()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn text_source_reads_in_order() {
		let mut source = TextSource::new("hé!");
		assert!(source.has_more());
		assert_eq!(source.read_char(), Some('h'));
		assert_eq!(source.read_char(), Some('é'));
		assert_eq!(source.read_char(), Some('!'));
		assert!(!source.has_more());
		assert_eq!(source.read_char(), None);
	}

	#[test]
	fn chars_adapter() {
		let collected: String = TextSource::new("a\nb").chars().collect();
		assert_eq!(collected, "a\nb");
		assert_eq!(TextSource::new("").chars().count(), 0);
	}

	#[test]
	fn file_source() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("corpus.txt");
		std::fs::write(&path, "xyz").unwrap();

		let collected: String = FileSource::open(&path).unwrap().chars().collect();
		assert_eq!(collected, "xyz");

		assert!(matches!(
			FileSource::open(dir.path().join("missing.txt")),
			Err(ModelError::Io(_))
		));
	}

	#[test]
	fn file_source_rejects_invalid_utf8() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("bad.txt");
		std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
		assert!(matches!(FileSource::open(&path), Err(ModelError::Io(_))));
	}
}
