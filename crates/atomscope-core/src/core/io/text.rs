use super::bounded::read_with_limit;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Highlighting class of one displayed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Starts with `#` or `!` after leading whitespace.
    Comment,
    /// A short `KEY = value` line or an all-uppercase line.
    Header,
    /// Anything else; carries the byte ranges of numeric tokens.
    Plain { numbers: Vec<Range<usize>> },
}

pub fn classify_line(line: &str) -> LineClass {
    let trimmed = line.trim();

    if trimmed.starts_with('#') || trimmed.starts_with('!') {
        return LineClass::Comment;
    }
    if trimmed.contains('=') && trimmed.split_whitespace().count() <= 3 {
        return LineClass::Header;
    }
    if is_uppercase_line(trimmed) {
        return LineClass::Header;
    }

    LineClass::Plain {
        numbers: numeric_token_ranges(line),
    }
}

// At least one cased character and no lowercase ones.
fn is_uppercase_line(line: &str) -> bool {
    line.chars().any(|c| c.is_uppercase()) && !line.chars().any(|c| c.is_lowercase())
}

fn numeric_token_ranges(line: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = None;

    for (idx, ch) in line.char_indices().chain(std::iter::once((line.len(), ' '))) {
        match (ch.is_whitespace(), start) {
            (false, None) => start = Some(idx),
            (true, Some(s)) => {
                if line[s..idx].parse::<f64>().is_ok() {
                    ranges.push(s..idx);
                }
                start = None;
            }
            _ => {}
        }
    }
    ranges
}

/// The content of one text viewer window.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDocument {
    path: PathBuf,
    content: String,
    truncated: bool,
    binary: bool,
    file_len: u64,
}

impl TextDocument {
    /// Loads `path` for display, reading at most `limit` bytes when a limit is given.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; a NUL byte marks the
    /// document as binary so that viewers can warn about raw content.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn load(path: &Path, limit: Option<usize>) -> io::Result<Self> {
        let read = read_with_limit(path, limit)?;
        let binary = read.bytes.contains(&0);
        Ok(Self {
            path: path.to_path_buf(),
            content: String::from_utf8_lossy(&read.bytes).into_owned(),
            truncated: read.truncated,
            binary,
            file_len: read.file_len,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file name, used as the window title.
    pub fn title(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn is_binary(&self) -> bool {
        self.binary
    }

    pub fn file_len(&self) -> u64 {
        self.file_len
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }

    pub fn highlighted_lines(&self) -> impl Iterator<Item = (&str, LineClass)> {
        self.content.lines().map(|line| (line, classify_line(line)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn comments_are_recognized_after_whitespace() {
        assert_eq!(classify_line("# relaxation"), LineClass::Comment);
        assert_eq!(classify_line("   ! note"), LineClass::Comment);
    }

    #[test]
    fn short_assignments_and_uppercase_lines_are_headers() {
        assert_eq!(classify_line("ENCUT = 520"), LineClass::Header);
        assert_eq!(classify_line("ISMEAR=0"), LineClass::Header);
        assert_eq!(classify_line("Direct"), LineClass::Plain { numbers: vec![] });
        assert_eq!(classify_line("GAMMA POINT ONLY"), LineClass::Header);
    }

    #[test]
    fn long_assignments_are_plain() {
        let line = "magmom = 2*1.0 4*0.0 1";
        assert_eq!(
            classify_line(line),
            LineClass::Plain {
                numbers: vec![21..22]
            }
        );
    }

    #[test]
    fn numeric_tokens_are_located_by_byte_range() {
        let line = "  5.43 0.0  x -1e-3";
        match classify_line(line) {
            LineClass::Plain { numbers } => {
                let tokens: Vec<&str> = numbers.iter().map(|r| &line[r.clone()]).collect();
                assert_eq!(tokens, vec!["5.43", "0.0", "-1e-3"]);
            }
            other => panic!("expected plain line, got {:?}", other),
        }
    }

    #[test]
    fn blank_line_is_plain_without_numbers() {
        assert_eq!(classify_line(""), LineClass::Plain { numbers: vec![] });
    }

    #[test]
    fn loads_document_and_flags_truncation() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "line one\nline two\n").unwrap();

        let full = TextDocument::load(file.path(), None).unwrap();
        let capped = TextDocument::load(file.path(), Some(4)).unwrap();

        assert_eq!(full.lines().count(), 2);
        assert!(!full.is_truncated());
        assert_eq!(capped.content(), "line");
        assert!(capped.is_truncated());
        assert_eq!(capped.file_len(), 18);
    }

    #[test]
    fn nul_bytes_mark_the_document_binary() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x43, 0x48, 0x00, 0xff, 0x0a]).unwrap();

        let doc = TextDocument::load(file.path(), None).unwrap();

        assert!(doc.is_binary());
        assert!(doc.content().contains('\u{FFFD}'));
    }

    #[test]
    fn title_is_the_file_name() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "x").unwrap();

        let doc = TextDocument::load(file.path(), None).unwrap();

        assert_eq!(
            doc.title(),
            file.path().file_name().unwrap().to_string_lossy()
        );
    }
}
