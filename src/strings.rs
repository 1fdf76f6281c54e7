// ── String table & text encodings ─────────────────────────────────────────────
//
// The localized string table is owned by the host application; this crate only
// looks rows up.  Pure safe Rust, no Win32 imports.

use std::collections::HashMap;

use crate::error::Result;

// ── Well-known rows ───────────────────────────────────────────────────────────

/// Application name, used as the dialog caption and the default heading.
pub const IDS_APP_NAME: u32 = 2048;
/// "Error" heading.
pub const IDS_ERROR: u32 = 2049;
/// "Fatal Error" heading.
pub const IDS_FATAL_ERROR: u32 = 2050;

// ── Lookup service ────────────────────────────────────────────────────────────

/// Localized string lookup.
///
/// Treated as a pure function: a missing row yields an empty string, never an
/// error.  Filter strings stored in the table use the native NUL-separated form.
pub trait StringTable {
    fn get(&self, id: u32) -> String;
}

impl<T: StringTable + ?Sized> StringTable for &T {
    fn get(&self, id: u32) -> String {
        (**self).get(id)
    }
}

/// In-memory string table keyed by row id.
#[derive(Debug, Default, Clone)]
pub struct MapStringTable {
    rows: HashMap<u32, String>,
}

impl MapStringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a row, builder style.
    pub fn with(mut self, id: u32, text: impl Into<String>) -> Self {
        self.rows.insert(id, text.into());
        self
    }

    pub fn insert(&mut self, id: u32, text: impl Into<String>) {
        self.rows.insert(id, text.into());
    }

    /// Parse a JSON object of `"id": "text"` rows, e.g. `{"2048": "86Box"}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let rows: HashMap<u32, String> = serde_json::from_str(json)?;
        Ok(Self { rows })
    }
}

impl StringTable for MapStringTable {
    fn get(&self, id: u32) -> String {
        self.rows.get(&id).cloned().unwrap_or_default()
    }
}

// ── Encoding helpers ──────────────────────────────────────────────────────────

/// Encode `s` as NUL-terminated UTF-16 for a `PCWSTR` argument.
pub fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Decode UTF-16 up to the first NUL (or the whole slice if there is none).
pub fn from_wide(units: &[u16]) -> String {
    String::from_utf16_lossy(&units[..wide_len(units)])
}

/// Number of units before the first NUL.
pub fn wide_len(units: &[u16]) -> usize {
    units.iter().position(|&c| c == 0).unwrap_or(units.len())
}

/// Transcode narrow (single-byte code page) text to UTF-16, stopping at NUL.
///
/// Narrow text is interpreted as Latin-1, so every byte maps to exactly one
/// unit and the length in units equals the length in bytes.
pub fn narrow_to_wide(bytes: &[u8]) -> Vec<u16> {
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    bytes[..len].iter().map(|&b| u16::from(b)).collect()
}

/// Transcode UTF-16 to narrow text, stopping at NUL.
///
/// Units outside Latin-1 have no narrow form and become `?`.
pub fn wide_to_narrow(units: &[u16]) -> Vec<u8> {
    units[..wide_len(units)]
        .iter()
        .map(|&u| u8::try_from(u).unwrap_or(b'?'))
        .collect()
}
