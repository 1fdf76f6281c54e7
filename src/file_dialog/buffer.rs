// ── Path buffer ───────────────────────────────────────────────────────────────

use crate::error::{DialogError, Result};
use crate::strings::{from_wide, wide_len};

/// Size of the picker's path buffer in UTF-16 units, including the
/// terminator (`MAX_PATH`).
pub const PATH_BUF_LEN: usize = 260;

/// Capacity declared to the native picker (`nMaxFile`).  One unit short of
/// the buffer so the picker can never touch the last slot.
pub const PATH_MAX_FILE: u32 = (PATH_BUF_LEN - 1) as u32;

/// Fixed-size wide path buffer handed to the native picker.
///
/// Construction is the only place the length precondition is checked: an
/// initial path that does not leave room for its terminator is rejected.
#[derive(Clone)]
pub struct PathBuffer {
    units: [u16; PATH_BUF_LEN],
}

impl PathBuffer {
    /// Copy `initial` (up to its first NUL, if any) into a fresh buffer.
    pub fn with_initial(initial: &[u16]) -> Result<Self> {
        let len = wide_len(initial);
        if len + 1 > PATH_BUF_LEN {
            return Err(DialogError::PathTooLong {
                len: len + 1,
                capacity: PATH_BUF_LEN,
            });
        }
        let mut units = [0u16; PATH_BUF_LEN];
        units[..len].copy_from_slice(&initial[..len]);
        Ok(Self { units })
    }

    /// The whole buffer, for the native call.
    pub fn as_mut_slice(&mut self) -> &mut [u16] {
        &mut self.units
    }

    /// The path currently held, without terminator.
    pub fn path_units(&self) -> &[u16] {
        &self.units[..wide_len(&self.units)]
    }

    pub fn to_string_lossy(&self) -> String {
        from_wide(&self.units)
    }
}

impl std::fmt::Debug for PathBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PathBuffer").field(&self.to_string_lossy()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn copies_initial_path() {
        let buf = PathBuffer::with_initial(&units("out.img")).expect("fits");
        assert_eq!(buf.to_string_lossy(), "out.img");
        assert_eq!(buf.path_units().len(), 7);
    }

    #[test]
    fn stops_at_embedded_terminator() {
        let mut init = units("a.img");
        init.push(0);
        init.extend(units("ignored"));
        let buf = PathBuffer::with_initial(&init).expect("fits");
        assert_eq!(buf.to_string_lossy(), "a.img");
    }

    #[test]
    fn longest_path_that_fits() {
        let init = vec![u16::from(b'x'); PATH_BUF_LEN - 1];
        let mut buf = PathBuffer::with_initial(&init).expect("259 units + NUL fits");
        assert_eq!(buf.as_mut_slice().len(), PATH_BUF_LEN);
        assert_eq!(buf.as_mut_slice()[PATH_BUF_LEN - 1], 0);
    }

    #[test]
    fn rejects_path_without_room_for_terminator() {
        let init = vec![u16::from(b'x'); PATH_BUF_LEN];
        match PathBuffer::with_initial(&init) {
            Err(DialogError::PathTooLong { len, capacity }) => {
                assert_eq!(len, PATH_BUF_LEN + 1);
                assert_eq!(capacity, PATH_BUF_LEN);
            }
            other => panic!("expected PathTooLong, got {other:?}"),
        }
    }

    #[test]
    fn declared_capacity_is_below_buffer() {
        assert_eq!(PATH_MAX_FILE, 259);
    }
}
