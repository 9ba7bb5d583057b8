use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Reads a whole corpus file as text.
///
/// Line endings are kept as-is: newlines are characters the model learns.
pub fn read_corpus<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Name under which a corpus file is registered: its file stem.
///
/// `corpora/dickens.txt` is registered as `dickens`.
pub fn corpus_name<P: AsRef<Path>>(corpus_path: P) -> io::Result<String> {
	match corpus_path.as_ref().file_stem() {
		Some(stem) => Ok(stem.to_string_lossy().into_owned()),
		None => Err(io::Error::new(
			io::ErrorKind::InvalidInput,
			format!("{} does not name a corpus file", corpus_path.as_ref().display()),
		)),
	}
}

/// Resolves the folder holding the corpora.
///
/// The current directory (`"."`, `"./"` or an empty string) is made
/// absolute so that log lines show where corpora were looked up; any other
/// path is kept relative.
pub fn resolve_corpus_folder(folder: &str) -> PathBuf {
	match folder {
		"" | "." | "./" => env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
		other => PathBuf::from(other),
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn corpus_name_is_the_file_stem() {
		assert_eq!(corpus_name("corpora/dickens.txt").unwrap(), "dickens");
		assert_eq!(corpus_name("dickens").unwrap(), "dickens");
		assert!(corpus_name("").is_err());
	}

	#[test]
	fn current_folder_is_made_absolute() {
		assert_eq!(resolve_corpus_folder("corpora"), PathBuf::from("corpora"));
		assert!(resolve_corpus_folder("./").is_absolute());
		assert!(resolve_corpus_folder("").is_absolute());
	}

	#[test]
	fn list_and_read_corpora() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("b.txt"), "bbb\r\n").unwrap();
		fs::write(dir.path().join("a.txt"), "aaa").unwrap();
		fs::write(dir.path().join("notes.md"), "skip").unwrap();
		fs::create_dir(dir.path().join("sub.txt")).unwrap();

		assert_eq!(list_files(dir.path(), "txt").unwrap(), vec!["a.txt", "b.txt"]);
		assert_eq!(read_corpus(dir.path().join("b.txt")).unwrap(), "bbb\r\n");
		assert!(read_corpus(dir.path().join("missing.txt")).is_err());
	}
}
