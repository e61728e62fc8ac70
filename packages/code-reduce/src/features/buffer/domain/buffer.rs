//! Line-oriented text buffer for one file
//!
//! Every mutation returns the reversal record (applied range + prior text), so
//! replaying `replace(applied, prior)` restores the previous content exactly.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::errors::{ReduceError, Result};
use crate::shared::models::Span;

/// Reversal record for one buffer edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub file: PathBuf,
    /// Range now occupied by the replacement
    pub applied: Span,
    /// Text the replacement displaced
    pub prior: Vec<String>,
}

/// In-memory content of one file
#[derive(Debug, Clone)]
pub struct Buffer {
    path: PathBuf,
    /// Lines without terminators (never empty: an empty file is one empty line)
    lines: Vec<String>,
    trailing_newline: bool,
    dirty: bool,
}

impl Buffer {
    /// Read a file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ReduceError::io(path, e))?;
        let mut buffer = Self::from_text(path, &text);
        buffer.dirty = false;
        Ok(buffer)
    }

    /// Build a buffer from text; it is dirty until saved
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        let trailing_newline = text.ends_with('\n');
        if trailing_newline {
            lines.pop();
        }
        Self {
            path: path.into(),
            lines,
            trailing_newline,
            dirty: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Has in-memory content not yet written to disk
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Full text, byte-identical to the loaded file when unmodified
    pub fn text(&self) -> String {
        let mut text = self.lines.join("\n");
        if self.trailing_newline {
            text.push('\n');
        }
        text
    }

    /// Non-whitespace bytes; placeholders do not count
    pub fn content_size(&self) -> usize {
        self.lines
            .iter()
            .map(|l| l.bytes().filter(|b| !b.is_ascii_whitespace()).count())
            .sum()
    }

    /// Span covering the whole buffer
    pub fn full_span(&self) -> Span {
        let last = self.lines.len() as u32;
        let last_len = self.lines.last().map(|l| l.len()).unwrap_or(0) as u32;
        Span::new(1, 0, last, last_len)
    }

    /// Replace the text in `span` with `new_lines`.
    ///
    /// An empty `new_lines` deletes the range. Returns the range the
    /// replacement now occupies and the lines it displaced.
    pub fn replace(&mut self, span: Span, new_lines: Vec<String>) -> Result<(Span, Vec<String>)> {
        self.check_span(&span)?;

        let new_lines = if new_lines.is_empty() {
            vec![String::new()]
        } else {
            new_lines
        };

        let s = (span.start_line - 1) as usize;
        let e = (span.end_line - 1) as usize;
        let sc = span.start_col as usize;
        let ec = span.end_col as usize;

        let prior: Vec<String> = if s == e {
            vec![self.lines[s][sc..ec].to_string()]
        } else {
            let mut prior = Vec::with_capacity(e - s + 1);
            prior.push(self.lines[s][sc..].to_string());
            prior.extend(self.lines[s + 1..e].iter().cloned());
            prior.push(self.lines[e][..ec].to_string());
            prior
        };

        let prefix = self.lines[s][..sc].to_string();
        let suffix = self.lines[e][ec..].to_string();

        let k = new_lines.len();
        let last_len = new_lines[k - 1].len();
        let mut composed = new_lines;
        composed[0].insert_str(0, &prefix);
        composed[k - 1].push_str(&suffix);

        self.lines.splice(s..=e, composed);
        self.dirty = true;

        let applied_end_col = if k == 1 { sc + last_len } else { last_len };
        let applied = Span::new(
            span.start_line,
            span.start_col,
            span.start_line + k as u32 - 1,
            applied_end_col as u32,
        );

        trace!(file = %self.path.display(), %span, %applied, "buffer replace");
        Ok((applied, prior))
    }

    /// Overwrite `span` with whitespace of identical shape.
    ///
    /// Line count and every line length are preserved, so any range that was
    /// valid in this buffer before the call is still valid after it.
    pub fn blank(&mut self, span: Span) -> Result<(Span, Vec<String>)> {
        self.check_span(&span)?;

        let s = (span.start_line - 1) as usize;
        let e = (span.end_line - 1) as usize;
        let sc = span.start_col as usize;
        let ec = span.end_col as usize;

        let placeholder: Vec<String> = if s == e {
            vec![" ".repeat(ec - sc)]
        } else {
            let mut lines = Vec::with_capacity(e - s + 1);
            lines.push(blank_tail(&self.lines[s], sc));
            lines.extend(self.lines[s + 1..e].iter().map(|l| blank_tail(l, 0)));
            lines.push(" ".repeat(ec));
            lines
        };

        self.replace(span, placeholder)
    }

    /// Write current content to disk (no-op when clean)
    pub fn save(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        fs::write(&self.path, self.text()).map_err(|e| ReduceError::io(&self.path, e))?;
        self.dirty = false;
        Ok(())
    }

    fn check_span(&self, span: &Span) -> Result<()> {
        let fail = |reason: String| Err(ReduceError::range(&self.path, *span, reason));

        if !span.is_well_formed() {
            return fail("start after end".to_string());
        }
        if span.start_line == 0 || span.end_line as usize > self.lines.len() {
            return fail(format!("lines outside 1..={}", self.lines.len()));
        }

        let start_line = &self.lines[(span.start_line - 1) as usize];
        let end_line = &self.lines[(span.end_line - 1) as usize];
        let sc = span.start_col as usize;
        let ec = span.end_col as usize;

        if sc > start_line.len() || !start_line.is_char_boundary(sc) {
            return fail(format!("start column {} invalid on a {}-byte line", sc, start_line.len()));
        }
        if ec > end_line.len() || !end_line.is_char_boundary(ec) {
            return fail(format!("end column {} invalid on a {}-byte line", ec, end_line.len()));
        }
        Ok(())
    }
}

/// Spaces for `line[from..]`, keeping a CRLF line's `\r`
fn blank_tail(line: &str, from: usize) -> String {
    match line.strip_suffix('\r') {
        Some(body) if from <= body.len() => format!("{}\r", " ".repeat(body.len() - from)),
        _ => " ".repeat(line.len() - from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_text_roundtrip_preserves_trailing_newline() {
        for text in ["", "\n", "a", "a\n", "a\nb", "a\r\nb\r\n", "\n\n"] {
            assert_eq!(Buffer::from_text("t.py", text).text(), text);
        }
    }

    #[test]
    fn test_replace_single_line() {
        let mut buf = Buffer::from_text("t.py", "x = foo(1)\n");
        let (applied, prior) = buf
            .replace(Span::new(1, 4, 1, 10), lines(&["bar"]))
            .unwrap();

        assert_eq!(buf.text(), "x = bar\n");
        assert_eq!(prior, lines(&["foo(1)"]));
        assert_eq!(applied, Span::new(1, 4, 1, 7));
    }

    #[test]
    fn test_replace_is_undone_by_replaying_record() {
        let original = "def f():\n    a = 1\n    b = 2\n    return a\n";
        let mut buf = Buffer::from_text("t.py", original);

        let (applied, prior) = buf
            .replace(Span::new(2, 4, 3, 9), lines(&["pass"]))
            .unwrap();
        assert_eq!(buf.text(), "def f():\n    pass\n    return a\n");

        buf.replace(applied, prior).unwrap();
        assert_eq!(buf.text(), original);
    }

    #[test]
    fn test_empty_replacement_deletes() {
        let mut buf = Buffer::from_text("t.py", "one\ntwo\nthree\n");
        let (applied, prior) = buf.replace(Span::new(1, 3, 2, 3), Vec::new()).unwrap();

        assert_eq!(buf.text(), "one\nthree\n");
        assert_eq!(applied, Span::new(1, 3, 1, 3));
        assert_eq!(prior, lines(&["", "two"]));

        buf.replace(applied, prior).unwrap();
        assert_eq!(buf.text(), "one\ntwo\nthree\n");
    }

    #[test]
    fn test_blank_preserves_shape() {
        let mut buf = Buffer::from_text("t.py", "a = [1,\n     2]; b = 3\n");
        let before: Vec<usize> = buf.lines().iter().map(|l| l.len()).collect();

        let (applied, prior) = buf.blank(Span::new(1, 0, 2, 8)).unwrap();

        let after: Vec<usize> = buf.lines().iter().map(|l| l.len()).collect();
        assert_eq!(before, after);
        assert_eq!(applied, Span::new(1, 0, 2, 8));
        assert_eq!(buf.lines()[1].trim(), "b = 3");
        assert_eq!(prior, lines(&["a = [1,", "     2];"]));
    }

    #[test]
    fn test_blank_keeps_crlf_line_endings() {
        let mut buf = Buffer::from_text("t.py", "def f():\r\n    x = 1\r\n    y = 2\r\nz = 3\r\n");
        buf.blank(Span::new(1, 0, 3, 9)).unwrap();

        assert_eq!(buf.text(), "        \r\n         \r\n         \r\nz = 3\r\n");
        assert_eq!(buf.content_size(), 3);
    }

    #[test]
    fn test_range_outside_buffer_is_rejected() {
        let mut buf = Buffer::from_text("t.py", "short\n");
        let err = buf.replace(Span::new(1, 0, 2, 0), Vec::new()).unwrap_err();
        assert!(err.is_invariant_violation());

        let err = buf.replace(Span::new(1, 2, 1, 99), Vec::new()).unwrap_err();
        assert!(err.is_invariant_violation());

        let err = buf.blank(Span::new(1, 4, 1, 2)).unwrap_err();
        assert!(err.is_invariant_violation());
        assert_eq!(buf.text(), "short\n");
    }

    #[test]
    fn test_column_inside_multibyte_char_is_rejected() {
        let mut buf = Buffer::from_text("t.py", "s = \"é\"\n");
        assert!(buf.replace(Span::new(1, 6, 1, 7), Vec::new()).is_err());
    }

    #[test]
    fn test_content_size_ignores_placeholders() {
        let mut buf = Buffer::from_text("t.py", "ab\ncd\n");
        assert_eq!(buf.content_size(), 4);
        buf.blank(Span::new(2, 0, 2, 2)).unwrap();
        assert_eq!(buf.content_size(), 2);
        assert_eq!(buf.line_count(), 2);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.py");
        fs::write(&path, "x = 1\ny = 2\n").unwrap();

        let mut buf = Buffer::load(&path).unwrap();
        assert!(!buf.is_dirty());
        buf.blank(Span::new(2, 0, 2, 5)).unwrap();
        assert!(buf.is_dirty());
        buf.save().unwrap();
        assert!(!buf.is_dirty());

        assert_eq!(fs::read_to_string(&path).unwrap(), "x = 1\n     \n");
    }

    #[test]
    fn test_save_to_missing_directory_fails_with_io() {
        let dir = tempfile::tempdir().unwrap();
        let mut buf = Buffer::from_text(dir.path().join("gone/m.py"), "x\n");
        let err = buf.save().unwrap_err();
        assert!(matches!(err, ReduceError::Io { .. }));
    }
}
