// ── File filters ──────────────────────────────────────────────────────────────
//
// The native picker takes its filters as one string of NUL-separated
// `label\0pattern\0` pairs closed by an extra NUL:
// "Display\0*.ext\0Display2\0*.ext2\0\0"

use crate::error::{DialogError, Result};

/// Ordered `(label, pattern)` pairs offered by a file picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    filters: Vec<(String, String)>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter, builder style.
    pub fn with(mut self, label: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.push(label, pattern);
        self
    }

    pub fn push(&mut self, label: impl Into<String>, pattern: impl Into<String>) {
        self.filters.push((label.into(), pattern.into()));
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters.iter().map(|(l, p)| (l.as_str(), p.as_str()))
    }

    /// Encode into the native double-NUL-terminated form.
    pub fn encode(&self) -> Vec<u16> {
        let mut out = Vec::new();
        for (label, pattern) in &self.filters {
            out.extend(label.encode_utf16());
            out.push(0);
            out.extend(pattern.encode_utf16());
            out.push(0);
        }
        out.push(0);
        out
    }

    /// Parse the native form.  Parsing stops at the first empty segment (the
    /// double NUL) or at the end of the slice.
    pub fn parse(native: &[u16]) -> Result<Self> {
        let mut segments = Vec::new();
        for seg in native.split(|&c| c == 0) {
            if seg.is_empty() {
                break;
            }
            segments.push(String::from_utf16_lossy(seg));
        }

        if segments.is_empty() {
            return Err(DialogError::InvalidFilter("no filters".to_owned()));
        }
        if segments.len() % 2 != 0 {
            return Err(DialogError::InvalidFilter(format!(
                "label {:?} has no pattern",
                segments[segments.len() - 1]
            )));
        }

        let mut spec = Self::new();
        let mut it = segments.into_iter();
        while let (Some(label), Some(pattern)) = (it.next(), it.next()) {
            spec.push(label, pattern);
        }
        Ok(spec)
    }

    /// Parse a filter kept as Rust text with embedded NULs, as the string
    /// table stores it.
    pub fn parse_str(native: &str) -> Result<Self> {
        let units: Vec<u16> = native.encode_utf16().collect();
        Self::parse(&units)
    }
}
