//! Line-oriented text sources
//!
//! Counting and conversion both consume text one line at a time. A
//! [`TextSource`] gives in-memory text, files and arbitrary readers the same
//! line interface.

use crate::error::{CoreError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Split a line into tokens on runs of ASCII whitespace
///
/// Vertical tab (`\x0B`) counts as whitespace too.
pub fn tokenize(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_ascii_whitespace() || c == '\x0B')
        .filter(|token| !token.is_empty())
}

/// A source of text lines
pub enum TextSource {
    /// Text held in memory
    Text(String),
    /// File path to read from
    File(PathBuf),
    /// Buffered reader (stdin, network, etc.)
    Reader {
        /// Name used in logs and errors
        name: String,
        /// The underlying reader
        reader: Box<dyn BufRead + Send>,
    },
}

impl std::fmt::Debug for TextSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextSource::Text(text) => f
                .debug_tuple("Text")
                .field(&format!("<{} bytes>", text.len()))
                .finish(),
            TextSource::File(path) => f.debug_tuple("File").field(path).finish(),
            TextSource::Reader { name, .. } => f
                .debug_struct("Reader")
                .field("name", name)
                .finish_non_exhaustive(),
        }
    }
}

impl TextSource {
    /// Source from in-memory text
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        TextSource::Text(text.into())
    }

    /// Source from a file path; the file is opened lazily
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        TextSource::File(path.into())
    }

    /// Source from a buffered reader
    pub fn from_reader<R: BufRead + Send + 'static>(name: impl Into<String>, reader: R) -> Self {
        TextSource::Reader {
            name: name.into(),
            reader: Box::new(reader),
        }
    }

    /// Display name for logs and errors
    pub fn name(&self) -> String {
        match self {
            TextSource::Text(_) => "<text>".to_string(),
            TextSource::File(path) => path.display().to_string(),
            TextSource::Reader { name, .. } => name.clone(),
        }
    }

    /// Path of a file source
    pub fn path(&self) -> Option<&Path> {
        match self {
            TextSource::File(path) => Some(path),
            _ => None,
        }
    }

    /// Feed every line, without its line terminator, to `f`
    ///
    /// Read failures are returned as [`CoreError::Io`]; errors from `f` are
    /// passed through unchanged.
    pub fn for_each_line<F>(self, mut f: F) -> Result<()>
    where
        F: FnMut(&str) -> Result<()>,
    {
        let name = self.name();
        match self {
            TextSource::Text(text) => {
                for line in text.lines() {
                    f(line)?;
                }
                Ok(())
            }
            TextSource::File(path) => {
                let file = File::open(&path)
                    .map_err(|e| CoreError::io(format!("failed to open {name}"), e))?;
                read_lines(BufReader::new(file), &name, f)
            }
            TextSource::Reader { reader, .. } => read_lines(reader, &name, f),
        }
    }
}

fn read_lines<R, F>(mut reader: R, name: &str, mut f: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(&str) -> Result<()>,
{
    // Invalid UTF-8 is decoded with replacement characters, never dropped.
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| CoreError::io(format!("failed to read {name}"), e))?;
        if read == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        f(line.trim_end_matches(['\n', '\r']))?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn collect(source: TextSource) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        source.for_each_line(|line| {
            lines.push(line.to_string());
            Ok(())
        })?;
        Ok(lines)
    }

    #[test]
    fn test_tokenize_runs_of_whitespace() {
        let tokens: Vec<&str> = tokenize("  the\tcat   sat \r").collect();
        assert_eq!(tokens, vec!["the", "cat", "sat"]);
        assert_eq!(tokenize("   ").count(), 0);
    }

    #[test]
    fn test_tokenize_vertical_tab() {
        let tokens: Vec<&str> = tokenize("a\x0Bb\x0C c").collect();
        assert_eq!(tokens, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("latin1.txt");
        fs::write(&path, b"the caf\xe9 dog\r\nthe cat\n").unwrap();

        let lines = collect(TextSource::from_file(&path)).unwrap();
        assert_eq!(lines, vec!["the caf\u{FFFD} dog", "the cat"]);

        let source = TextSource::from_reader("mem", Cursor::new(b"\xff\xfe x".to_vec()));
        assert_eq!(collect(source).unwrap(), vec!["\u{FFFD}\u{FFFD} x"]);
    }

    #[test]
    fn test_text_lines() {
        let lines = collect(TextSource::from_text("a b\nc\n\nd")).unwrap();
        assert_eq!(lines, vec!["a b", "c", "", "d"]);
    }

    #[test]
    fn test_reader_strips_crlf() {
        let source = TextSource::from_reader("mem", Cursor::new("one\r\ntwo\n"));
        assert_eq!(source.name(), "mem");
        assert_eq!(collect(source).unwrap(), vec!["one", "two"]);
    }

    #[test]
    fn test_file_source() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("input.txt");
        fs::write(&path, "x y\nz\n").unwrap();

        let source = TextSource::from_file(&path);
        assert_eq!(source.path(), Some(path.as_path()));
        assert_eq!(collect(source).unwrap(), vec!["x y", "z"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = collect(TextSource::from_file("/nonexistent/input.txt")).unwrap_err();
        assert!(err.is_io());
        assert!(err.to_string().contains("failed to open"));
    }

    #[test]
    fn test_callback_error_passes_through() {
        let err = TextSource::from_text("a\nb")
            .for_each_line(|_| Err(CoreError::UnknownSortOrder("x".to_string())))
            .unwrap_err();
        assert!(matches!(err, CoreError::UnknownSortOrder(_)));
    }
}
