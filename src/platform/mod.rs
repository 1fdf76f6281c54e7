// ── Platform abstraction layer ────────────────────────────────────────────────
//
// This module defines the seams between the portable adapters and the OS: the
// native confirmation dialog, the native file picker and the process working
// directory.  No `unsafe` lives here; all Win32 FFI is confined to the `win32`
// sub-module and never leaks outward.

use std::path::Path;

use crate::error::Result;

#[cfg(feature = "legacy-compat")]
pub mod compat;
#[cfg(windows)]
pub mod win32;

// ── Window handles ────────────────────────────────────────────────────────────

/// Opaque owner window for a modal dialog.
///
/// Holds the raw `HWND` value on Windows; `WindowHandle::NONE` means the
/// dialog has no owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    pub const NONE: Self = Self(0);
}

// ── Confirmation dialog ───────────────────────────────────────────────────────

/// Icon shown next to the main instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogIcon {
    Information,
    Warning,
    Error,
}

/// The common-button set offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSet {
    /// Single acknowledgement button.
    Ok,
    YesNo,
    YesNoCancel,
}

/// Button identifier returned by the native dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeButton {
    Ok,
    Yes,
    No,
    Cancel,
    /// Any identifier the adapters do not name (e.g. `IDCLOSE`).
    Other(i32),
}

/// Everything the native confirmation dialog needs for one presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest<'a> {
    pub owner: WindowHandle,
    /// Window caption.
    pub caption: &'a str,
    /// Main instruction; `None` shows the body alone.
    pub heading: Option<&'a str>,
    pub body: &'a str,
    pub icon: Option<DialogIcon>,
    pub buttons: ButtonSet,
}

/// Native modal message dialog.  Blocks until the user dismisses it.
pub trait ConfirmDialog {
    fn confirm(&mut self, request: &ConfirmRequest<'_>) -> Result<NativeButton>;
}

// ── File picker ───────────────────────────────────────────────────────────────

/// Whether the picker selects an existing file or a save target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogMode {
    #[default]
    Open,
    Save,
}

/// Existence constraints enforced by the native picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PickerFlags {
    pub path_must_exist: bool,
    pub file_must_exist: bool,
}

/// One native picker invocation.  `file` is both the initial path and the
/// output buffer; the picker must not write past `max_file` units.
#[derive(Debug)]
pub struct PickerRequest<'a> {
    pub owner: WindowHandle,
    /// NUL-separated, double-NUL-terminated filter string.
    pub filter: &'a [u16],
    /// 1-based index of the filter selected when the dialog opens.
    pub filter_index: u32,
    pub file: &'a mut [u16],
    pub max_file: u32,
    pub flags: PickerFlags,
    pub mode: DialogMode,
}

/// Native open/save picker.
///
/// Returns `Ok(Some(filter_index))` when the user confirmed a path (the path
/// is left in `request.file`), `Ok(None)` on cancel.
pub trait FilePicker {
    fn pick(&mut self, request: &mut PickerRequest<'_>) -> Result<Option<u32>>;
}

// ── Working directory ─────────────────────────────────────────────────────────

/// Process working-directory control, used to undo the picker's `chdir`.
pub trait WorkingDirectory {
    fn change_directory(&self, path: &Path) -> Result<()>;
}

/// The real process working directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessWorkingDirectory;

impl WorkingDirectory for ProcessWorkingDirectory {
    fn change_directory(&self, path: &Path) -> Result<()> {
        std::env::set_current_dir(path)?;
        Ok(())
    }
}
