//! Line filter applied to file content before it is emitted.

use regex::bytes::Regex;

/// Drops every line whose text (without its terminator) matches the regex.
///
/// Works on raw bytes, so content that is not valid UTF-8 passes through
/// untouched apart from the removed lines.
#[derive(Debug, Clone)]
pub struct LineFilter {
    re: Regex,
}

impl LineFilter {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self { re: Regex::new(pattern)? })
    }

    /// Keep non-matching lines with their original terminators.
    pub fn apply(&self, content: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(content.len());
        for line in content.split_inclusive(|&b| b == b'\n') {
            let text = line.strip_suffix(b"\n").unwrap_or(line);
            let text = text.strip_suffix(b"\r").unwrap_or(text);
            if !self.re.is_match(text) {
                out.extend_from_slice(line);
            }
        }
        out
    }
}
