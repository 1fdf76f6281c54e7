// ── Central error type ────────────────────────────────────────────────────────
//
// Fallible operations in this crate return `error::Result<T>`.  Note that the
// two adapters deliberately swallow native failures at their public boundary
// (see `message` and `file_dialog`); what reaches callers as `Err` is either a
// precondition violation or a configuration problem.

/// Every error that the dialog layer can produce.
#[derive(Debug)]
pub enum DialogError {
    /// A Win32 API call returned a failure code.
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code, HRESULT or `CommDlgExtendedError()` value.
        code: u32,
    },

    /// A standard I/O error (config file, working-directory change, …).
    Io(std::io::Error),

    /// A configuration or string-table file could not be parsed.
    Config(serde_json::Error),

    /// A configuration file written by an unknown format version.
    UnsupportedVersion(u32),

    /// The initial path does not fit the fixed native path buffer.
    PathTooLong {
        /// Length of the rejected path in UTF-16 units, including the terminator.
        len: usize,
        /// Capacity of the path buffer in UTF-16 units.
        capacity: usize,
    },

    /// A filter string that does not consist of `(label, pattern)` pairs.
    InvalidFilter(String),
}

impl std::fmt::Display for DialogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Win32 { function, code } => {
                write!(f, "{function} failed (error {code:#010x})")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::UnsupportedVersion(v) => write!(f, "unsupported configuration version {v}"),
            Self::PathTooLong { len, capacity } => write!(
                f,
                "path of {len} units (with terminator) exceeds the {capacity}-unit dialog buffer"
            ),
            Self::InvalidFilter(why) => write!(f, "invalid file filter: {why}"),
        }
    }
}

impl std::error::Error for DialogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Win32 { .. }
            | Self::UnsupportedVersion(_)
            | Self::PathTooLong { .. }
            | Self::InvalidFilter(_) => None,
        }
    }
}

impl From<std::io::Error> for DialogError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for DialogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e)
    }
}

// Convert a windows-crate error (HRESULT) directly into a DialogError so that
// `?` can be used on `windows::core::Result<T>` inside the Win32 backend.
#[cfg(windows)]
impl From<windows::core::Error> for DialogError {
    fn from(e: windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        Self::Win32 {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DialogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win32_display_is_hex() {
        let e = DialogError::Win32 {
            function: "GetOpenFileNameW",
            code: 0x3003,
        };
        assert_eq!(e.to_string(), "GetOpenFileNameW failed (error 0x00003003)");
    }

    #[test]
    fn path_too_long_display() {
        let e = DialogError::PathTooLong {
            len: 300,
            capacity: 260,
        };
        assert_eq!(
            e.to_string(),
            "path of 300 units (with terminator) exceeds the 260-unit dialog buffer"
        );
    }

    #[test]
    fn unsupported_version_is_not_io() {
        use std::error::Error as _;
        let e = DialogError::UnsupportedVersion(7);
        assert_eq!(e.to_string(), "unsupported configuration version 7");
        assert!(e.source().is_none());
    }

    #[test]
    fn io_error_has_source() {
        use std::error::Error as _;
        let e = DialogError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(e.source().is_some());
    }
}
