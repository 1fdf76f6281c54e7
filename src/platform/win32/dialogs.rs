// ── Common file dialogs ───────────────────────────────────────────────────────
//
// `FilePicker` backed by the Win32 common-dialog APIs.  The adapter owns the
// buffers; this file only fills in `OPENFILENAMEW` and reports the result.
//
// This is inside `platform::win32` so `unsafe` is permitted per crate policy.

#![allow(unsafe_code)]

use windows::{
    core::{PCWSTR, PWSTR},
    Win32::UI::Controls::Dialogs::{
        CommDlgExtendedError, GetOpenFileNameW, GetSaveFileNameW, COMMON_DLG_ERRORS,
        OFN_FILEMUSTEXIST, OFN_PATHMUSTEXIST, OPENFILENAMEW, OPEN_FILENAME_FLAGS,
    },
};

use crate::error::{DialogError, Result};
use crate::platform::{DialogMode, FilePicker, PickerFlags, PickerRequest};

/// The native open/save picker.
///
/// No initial-directory override is passed, so the picker starts from the
/// process working directory, and `OFN_NOCHANGEDIR` is not set: the picker
/// moves the working directory and the adapter moves it back.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32FilePicker;

fn ofn_flags(flags: PickerFlags) -> OPEN_FILENAME_FLAGS {
    let mut out = OPEN_FILENAME_FLAGS(0);
    if flags.path_must_exist {
        out = out | OFN_PATHMUSTEXIST;
    }
    if flags.file_must_exist {
        out = out | OFN_FILEMUSTEXIST;
    }
    out
}

impl FilePicker for Win32FilePicker {
    fn pick(&mut self, request: &mut PickerRequest<'_>) -> Result<Option<u32>> {
        // Never declare more room than the slice really has.
        let max_file = request.max_file.min(request.file.len() as u32);

        let mut ofn = OPENFILENAMEW {
            lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
            hwndOwner: request.owner.hwnd(),
            lpstrFilter: PCWSTR(request.filter.as_ptr()),
            nFilterIndex: request.filter_index,
            lpstrFile: PWSTR(request.file.as_mut_ptr()),
            nMaxFile: max_file,
            lpstrInitialDir: PCWSTR::null(),
            Flags: ofn_flags(request.flags),
            ..Default::default()
        };

        // SAFETY: `ofn` is fully initialised; the filter (double-NUL
        // terminated) and the path buffer are borrowed from `request` and
        // outlive this call.  The picker writes at most `nMaxFile` units, which
        // never exceeds the buffer length.  Called on the UI thread (required
        // for modal dialogs).
        let ok = unsafe {
            match request.mode {
                DialogMode::Open => GetOpenFileNameW(&mut ofn),
                DialogMode::Save => GetSaveFileNameW(&mut ofn),
            }
        };

        if ok.as_bool() {
            return Ok(Some(ofn.nFilterIndex));
        }

        // SAFETY: CommDlgExtendedError reads the thread's last common-dialog
        // error; it has no preconditions.
        let code = unsafe { CommDlgExtendedError() };
        if code == COMMON_DLG_ERRORS(0) {
            Ok(None)
        } else {
            Err(DialogError::Win32 {
                function: match request.mode {
                    DialogMode::Open => "GetOpenFileNameW",
                    DialogMode::Save => "GetSaveFileNameW",
                },
                code: code.0,
            })
        }
    }
}
