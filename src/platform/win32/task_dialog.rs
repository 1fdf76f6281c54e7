// ── Task dialogs ──────────────────────────────────────────────────────────────
//
// `ConfirmDialog` backed by `TaskDialog` (Common Controls v6; see build.rs for
// the manifest dependency).

#![allow(unsafe_code)]

use windows::{
    core::PCWSTR,
    Win32::{
        Foundation::HINSTANCE,
        UI::{
            Controls::{
                TaskDialog, TASKDIALOG_COMMON_BUTTON_FLAGS, TDCBF_CANCEL_BUTTON, TDCBF_NO_BUTTON,
                TDCBF_OK_BUTTON, TDCBF_YES_BUTTON, TD_ERROR_ICON, TD_INFORMATION_ICON,
                TD_WARNING_ICON,
            },
            WindowsAndMessaging::{IDCANCEL, IDNO, IDOK, IDYES},
        },
    },
};

use crate::error::Result;
use crate::platform::{ButtonSet, ConfirmDialog, ConfirmRequest, DialogIcon, NativeButton};
use crate::strings::to_wide;

/// The native task dialog.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32TaskDialog;

fn common_buttons(buttons: ButtonSet) -> TASKDIALOG_COMMON_BUTTON_FLAGS {
    match buttons {
        ButtonSet::Ok => TDCBF_OK_BUTTON,
        ButtonSet::YesNo => TDCBF_YES_BUTTON | TDCBF_NO_BUTTON,
        ButtonSet::YesNoCancel => TDCBF_YES_BUTTON | TDCBF_NO_BUTTON | TDCBF_CANCEL_BUTTON,
    }
}

fn icon_resource(icon: Option<DialogIcon>) -> PCWSTR {
    match icon {
        Some(DialogIcon::Information) => TD_INFORMATION_ICON,
        Some(DialogIcon::Warning) => TD_WARNING_ICON,
        Some(DialogIcon::Error) => TD_ERROR_ICON,
        None => PCWSTR::null(),
    }
}

fn native_button(id: i32) -> NativeButton {
    match id {
        x if x == IDOK.0 => NativeButton::Ok,
        x if x == IDYES.0 => NativeButton::Yes,
        x if x == IDNO.0 => NativeButton::No,
        x if x == IDCANCEL.0 => NativeButton::Cancel,
        other => NativeButton::Other(other),
    }
}

impl ConfirmDialog for Win32TaskDialog {
    fn confirm(&mut self, request: &ConfirmRequest<'_>) -> Result<NativeButton> {
        let caption = to_wide(request.caption);
        let heading = request.heading.map(to_wide);
        let body = to_wide(request.body);
        let mut pressed = 0i32;

        // SAFETY: every string is a NUL-terminated UTF-16 buffer that stays
        // alive for the duration of the call; `heading` falls back to NULL,
        // which TaskDialog accepts.  The icon is either NULL or one of the
        // predefined TD_*_ICON resource ordinals, which TaskDialog resolves
        // from comctl32 since we pass no HINSTANCE.  `pressed` is a valid i32
        // out-pointer.
        unsafe {
            TaskDialog(
                request.owner.hwnd(),
                HINSTANCE::default(),
                PCWSTR(caption.as_ptr()),
                heading
                    .as_ref()
                    .map_or(PCWSTR::null(), |h| PCWSTR(h.as_ptr())),
                PCWSTR(body.as_ptr()),
                common_buttons(request.buttons),
                icon_resource(request.icon),
                Some(&mut pressed as *mut i32),
            )?;
        }

        Ok(native_button(pressed))
    }
}
