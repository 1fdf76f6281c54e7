// ── Test doubles ──────────────────────────────────────────────────────────────
//
// Recording stand-ins for the native dialogs and the working directory, so the
// adapters can be exercised without a desktop session.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use crate::error::{DialogError, Result};
use crate::platform::{
    ButtonSet, ConfirmDialog, ConfirmRequest, DialogIcon, DialogMode, FilePicker, NativeButton,
    PickerFlags, PickerRequest, WindowHandle, WorkingDirectory,
};
use crate::strings::from_wide;

// ── Confirmation dialog ───────────────────────────────────────────────────────

/// Owned copy of a `ConfirmRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SeenConfirm {
    pub(crate) owner: WindowHandle,
    pub(crate) caption: String,
    pub(crate) heading: Option<String>,
    pub(crate) body: String,
    pub(crate) icon: Option<DialogIcon>,
    pub(crate) buttons: ButtonSet,
}

pub(crate) struct FakeConfirm {
    reply: Option<NativeButton>,
    seen: Vec<SeenConfirm>,
}

impl FakeConfirm {
    pub(crate) fn answering(button: NativeButton) -> Self {
        Self {
            reply: Some(button),
            seen: Vec::new(),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            reply: None,
            seen: Vec::new(),
        }
    }

    pub(crate) fn last(&self) -> Option<&SeenConfirm> {
        self.seen.last()
    }
}

impl ConfirmDialog for FakeConfirm {
    fn confirm(&mut self, request: &ConfirmRequest<'_>) -> Result<NativeButton> {
        self.seen.push(SeenConfirm {
            owner: request.owner,
            caption: request.caption.to_owned(),
            heading: request.heading.map(str::to_owned),
            body: request.body.to_owned(),
            icon: request.icon,
            buttons: request.buttons,
        });
        self.reply.ok_or(DialogError::Win32 {
            function: "TaskDialog",
            code: 0x8007_0057,
        })
    }
}

// ── File picker ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PickerReply {
    Choose { path: String, filter_index: u32 },
    Cancel,
    Fail,
}

/// What the picker was handed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SeenPicker {
    pub(crate) owner: WindowHandle,
    pub(crate) filter: Vec<u16>,
    pub(crate) filter_index: u32,
    pub(crate) initial: String,
    pub(crate) buffer_len: usize,
    pub(crate) max_file: u32,
    pub(crate) flags: PickerFlags,
    pub(crate) mode: DialogMode,
}

pub(crate) struct FakePicker {
    reply: PickerReply,
    seen: Vec<SeenPicker>,
}

impl FakePicker {
    pub(crate) fn replying(reply: PickerReply) -> Self {
        Self {
            reply,
            seen: Vec::new(),
        }
    }

    pub(crate) fn set_reply(&mut self, reply: PickerReply) {
        self.reply = reply;
    }

    pub(crate) fn last(&self) -> Option<&SeenPicker> {
        self.seen.last()
    }
}

impl FilePicker for FakePicker {
    fn pick(&mut self, request: &mut PickerRequest<'_>) -> Result<Option<u32>> {
        self.seen.push(SeenPicker {
            owner: request.owner,
            filter: request.filter.to_vec(),
            filter_index: request.filter_index,
            initial: from_wide(request.file),
            buffer_len: request.file.len(),
            max_file: request.max_file,
            flags: request.flags,
            mode: request.mode,
        });
        match &self.reply {
            PickerReply::Choose { path, filter_index } => {
                let units: Vec<u16> = path.encode_utf16().collect();
                assert!(
                    units.len() < request.max_file as usize,
                    "fake picker path does not fit"
                );
                request.file[..units.len()].copy_from_slice(&units);
                request.file[units.len()] = 0;
                Ok(Some(*filter_index))
            }
            PickerReply::Cancel => Ok(None),
            PickerReply::Fail => Err(DialogError::Win32 {
                function: "GetOpenFileNameW",
                code: 0x3003,
            }),
        }
    }
}

// ── Working directory ─────────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct FakeCwd {
    current: RefCell<Option<PathBuf>>,
    calls: Cell<usize>,
}

impl FakeCwd {
    pub(crate) fn current(&self) -> Option<PathBuf> {
        self.current.borrow().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl WorkingDirectory for FakeCwd {
    fn change_directory(&self, path: &Path) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        *self.current.borrow_mut() = Some(path.to_path_buf());
        Ok(())
    }
}
