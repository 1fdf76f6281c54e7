// ── Untagged message arguments ────────────────────────────────────────────────
//
// Entry point for old callers that pass a message body as a bare pointer that
// may really be a small string-table id.  Only built with `legacy-compat`.

#![allow(unsafe_code)]

use std::ffi::{c_void, CStr};

use crate::message::{classify_legacy_arg, LegacyArg, MessageFlags, MessagePayload};

/// Turn a raw message argument into a tagged payload.
///
/// Classification is `classify_legacy_arg` on the pointer's numeric value,
/// so only values below `LEGACY_ID_THRESHOLD` are taken as ids.
///
/// # Safety
///
/// Unless the argument classifies as a string id, `arg` must point at a
/// NUL-terminated string (narrow when `flags` has `ANSI`, UTF-16 otherwise)
/// that stays valid for the duration of the call.
pub unsafe fn payload_from_raw(flags: MessageFlags, arg: *const c_void) -> MessagePayload {
    match classify_legacy_arg(flags, arg as usize) {
        LegacyArg::StringId(id) => MessagePayload::StringId(id),
        LegacyArg::NarrowText => {
            // SAFETY: caller guarantees a NUL-terminated narrow string.
            let bytes = unsafe { CStr::from_ptr(arg.cast()) }.to_bytes();
            MessagePayload::Narrow(bytes.to_vec())
        }
        LegacyArg::WideText => {
            let p: *const u16 = arg.cast();
            let mut len = 0usize;
            // SAFETY: caller guarantees a NUL-terminated UTF-16 string, so
            // every unit up to and including the terminator is readable.
            let units = unsafe {
                while *p.add(len) != 0 {
                    len += 1;
                }
                std::slice::from_raw_parts(p, len)
            };
            MessagePayload::Text(String::from_utf16_lossy(units))
        }
    }
}
