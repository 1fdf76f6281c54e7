// ── Win32 platform implementation ─────────────────────────────────────────────
//
// One of exactly two modules in the crate where `unsafe` code is permitted
// (the other is `platform::compat`).  Every `unsafe` block MUST carry a
// `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.
//
// Nothing in this module is `pub` beyond what callers genuinely need; keep the
// unsafe surface as small as possible.

#![allow(unsafe_code)]

use windows::Win32::Foundation::HWND;

use super::WindowHandle;

// ── Sub-modules ───────────────────────────────────────────────────────────────

pub mod dialogs; // GetOpenFileNameW / GetSaveFileNameW picker
pub mod task_dialog; // TaskDialog message boxes

pub use dialogs::Win32FilePicker;
pub use task_dialog::Win32TaskDialog;

impl WindowHandle {
    /// Wrap a native window handle.
    pub fn from_hwnd(hwnd: HWND) -> Self {
        Self(hwnd.0 as isize)
    }

    pub(crate) fn hwnd(self) -> HWND {
        HWND(self.0 as *mut core::ffi::c_void)
    }
}
