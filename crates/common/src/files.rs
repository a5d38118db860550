use std::{cmp::Ordering, ops::Range};

pub use camino::{Utf8Path, Utf8PathBuf};
use codespan_reporting::files::{self, Files};
use cranelift_entity::{entity_impl, PrimaryMap};

use crate::TextSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(u32);
entity_impl!(FileId);

// NOTE: all file paths are stored as utf8 strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: Utf8PathBuf,
    pub text: String,
    line_starts: Vec<usize>,
}

impl InputFile {
    pub fn new(path: impl Into<Utf8PathBuf>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = files::line_starts(&text).collect();
        Self {
            path: path.into(),
            text,
            line_starts,
        }
    }

    /// Returns the zero-based line containing `byte_index`.
    pub fn line_index(&self, byte_index: usize) -> usize {
        self.line_starts
            .binary_search(&byte_index)
            .unwrap_or_else(|next_line| next_line - 1)
    }

    /// Returns the one-based `(line, column)` of the given offset. Columns
    /// count characters, which for ASCII sources is the byte column.
    pub fn line_col(&self, offset: TextSize) -> (usize, usize) {
        let byte_index = usize::from(offset).min(self.text.len());
        let line = self.line_index(byte_index);
        let line_start = self.line_starts[line];
        let column = self
            .text
            .get(line_start..byte_index)
            .map_or(0, |prefix| prefix.chars().count());
        (line + 1, column + 1)
    }

    fn line_start(&self, line_index: usize) -> Result<usize, files::Error> {
        match line_index.cmp(&self.line_starts.len()) {
            Ordering::Less => Ok(self.line_starts[line_index]),
            Ordering::Equal => Ok(self.text.len()),
            Ordering::Greater => Err(files::Error::LineTooLarge {
                given: line_index,
                max: self.line_starts.len() - 1,
            }),
        }
    }
}

/// All source files known to a program, addressable by [`FileId`].
#[derive(Debug, Clone, Default)]
pub struct FileStore {
    files: PrimaryMap<FileId, InputFile>,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, file: InputFile) -> FileId {
        self.files.push(file)
    }

    pub fn get(&self, id: FileId) -> Option<&InputFile> {
        self.files.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FileId, &InputFile)> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn file(&self, id: FileId) -> Result<&InputFile, files::Error> {
        self.files.get(id).ok_or(files::Error::FileMissing)
    }
}

impl<'a> Files<'a> for FileStore {
    type FileId = FileId;
    type Name = &'a Utf8Path;
    type Source = &'a str;

    fn name(&'a self, id: FileId) -> Result<Self::Name, files::Error> {
        Ok(self.file(id)?.path.as_path())
    }

    fn source(&'a self, id: FileId) -> Result<Self::Source, files::Error> {
        Ok(self.file(id)?.text.as_str())
    }

    fn line_index(&'a self, id: FileId, byte_index: usize) -> Result<usize, files::Error> {
        Ok(self.file(id)?.line_index(byte_index))
    }

    fn line_range(&'a self, id: FileId, line_index: usize) -> Result<Range<usize>, files::Error> {
        let file = self.file(id)?;
        let start = file.line_start(line_index)?;
        let next = file.line_start(line_index + 1)?;
        Ok(start..next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_is_one_based() {
        let file = InputFile::new("a.go", "package a\n\tswitch x {\n");
        assert_eq!(file.line_col(TextSize::from(0)), (1, 1));
        assert_eq!(file.line_col(TextSize::from(11)), (2, 2));
    }

    #[test]
    fn store_implements_files() {
        let mut store = FileStore::new();
        let id = store.add(InputFile::new("a.go", "one\ntwo\n"));
        assert_eq!(store.name(id).unwrap(), Utf8Path::new("a.go"));
        assert_eq!(store.line_range(id, 1).unwrap(), 4..8);
        assert_eq!(store.line_index(id, 5).unwrap(), 1);
    }

    #[test]
    fn file_ids_are_dense_keys() {
        let mut store = FileStore::new();
        let a = store.add(InputFile::new("a.go", ""));
        let b = store.add(InputFile::new("b.go", ""));
        assert!(a < b);
        assert_eq!(format!("{a:?} {b:?}"), "FileId(0) FileId(1)");
        assert_eq!(store.iter().map(|(id, _)| id).collect::<Vec<_>>(), vec![a, b]);
    }
}
