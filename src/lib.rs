// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except:
//   • `platform::win32`  – Win32 FFI (TaskDialog, common file dialogs)
//   • `platform::compat` – raw-pointer message arguments (`legacy-compat`)
// Each unsafe block in those modules MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

//! Modal message boxes and open/save file dialogs.
//!
//! [`message::MessageBoxAdapter`] turns a message request into one native
//! confirmation dialog and the pressed button into a [`message::MessageOutcome`].
//! [`file_dialog::FileDialogAdapter`] drives the native open/save picker and
//! returns a [`file_dialog::FileDialogResult`].  Both block until the dialog
//! closes; only one dialog may be in flight at a time.
//!
//! The native services sit behind the traits in [`platform`]; the Win32
//! implementations live in `platform::win32`.

pub mod config;
pub mod error;
pub mod file_dialog;
pub mod message;
pub mod platform;
pub mod strings;

#[cfg(test)]
mod testing;

pub use error::{DialogError, Result};
