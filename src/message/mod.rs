// ── Message boxes ─────────────────────────────────────────────────────────────
//
// Maps an application-level message request (kind flags + payload) onto one
// native confirmation dialog and maps the pressed button back onto a
// tri-state outcome.  No Win32 imports; the native dialog is a `ConfirmDialog`.

use crate::config::DialogConfig;
use crate::platform::{
    ButtonSet, ConfirmDialog, ConfirmRequest, DialogIcon, NativeButton, WindowHandle,
};
use crate::strings::{narrow_to_wide, StringTable};

// ── Flags ─────────────────────────────────────────────────────────────────────

/// Legacy message flag word.  The low five bits select the kind; the
/// remaining bits are modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessageFlags(pub u32);

impl MessageFlags {
    pub const INFO: Self = Self(0x01);
    pub const ERROR: Self = Self(0x02);
    pub const QUESTION: Self = Self(0x03);
    pub const QUESTION_YN: Self = Self(0x04);
    /// Refines `ERROR` into a fatal error.
    pub const FATAL: Self = Self(0x20);
    /// The payload is narrow (single-byte) text.
    pub const ANSI: Self = Self(0x80);

    const KIND_MASK: u32 = 0x1f;

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// The kind selected by the low five bits, or `None` for unknown values.
    pub fn kind(self) -> Option<MessageKind> {
        match self.0 & Self::KIND_MASK {
            0x01 => Some(MessageKind::Info),
            0x02 => Some(MessageKind::Error),
            0x03 => Some(MessageKind::Question),
            0x04 => Some(MessageKind::QuestionYesNo),
            _ => None,
        }
    }
}

impl std::ops::BitOr for MessageFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
    Question,
    QuestionYesNo,
}

// ── Payload ───────────────────────────────────────────────────────────────────

/// The message body, tagged by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagePayload {
    /// Literal text.
    Text(String),
    /// Literal narrow (single-byte code page) text, transcoded before display.
    Narrow(Vec<u8>),
    /// A row in the localized string table.
    StringId(u32),
}

impl From<&str> for MessagePayload {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for MessagePayload {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl MessagePayload {
    /// Resolve to displayable text.
    pub fn resolve(&self, strings: &dyn StringTable) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Narrow(bytes) => String::from_utf16_lossy(&narrow_to_wide(bytes)),
            Self::StringId(id) => strings.get(*id),
        }
    }
}

/// How an untagged legacy argument is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyArg {
    /// Pointer to narrow, NUL-terminated text.
    NarrowText,
    /// Pointer to wide, NUL-terminated text.
    WideText,
    /// String-table row id.
    StringId(u32),
}

/// Untagged wide arguments below this value are string-table ids.
pub const LEGACY_ID_THRESHOLD: u32 = 65636;

/// Legacy guess for untagged message arguments: string-table ids are small
/// integers and real text addresses are large, so a wide "pointer" below
/// `LEGACY_ID_THRESHOLD` is taken to be an id.  Narrow text is never looked up.
///
/// Kept bit-for-bit for old callers; new code passes a `MessagePayload`.
pub fn classify_legacy_arg(flags: MessageFlags, value: usize) -> LegacyArg {
    if flags.contains(MessageFlags::ANSI) {
        return LegacyArg::NarrowText;
    }
    match u32::try_from(value) {
        Ok(id) if id < LEGACY_ID_THRESHOLD => LegacyArg::StringId(id),
        _ => LegacyArg::WideText,
    }
}

// ── Request / outcome ─────────────────────────────────────────────────────────

/// A message to show.
///
/// The `ANSI` bit always agrees with the payload: it is set exactly when the
/// payload is `MessagePayload::Narrow`, whatever the caller passed in `flags`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRequest {
    flags: MessageFlags,
    payload: MessagePayload,
}

impl MessageRequest {
    pub fn new(flags: MessageFlags, payload: impl Into<MessagePayload>) -> Self {
        let payload = payload.into();
        let mut bits = flags.0 & !MessageFlags::ANSI.0;
        if matches!(payload, MessagePayload::Narrow(_)) {
            bits |= MessageFlags::ANSI.0;
        }
        Self {
            flags: MessageFlags(bits),
            payload,
        }
    }

    pub fn flags(&self) -> MessageFlags {
        self.flags
    }

    pub fn payload(&self) -> &MessagePayload {
        &self.payload
    }

    pub fn info(payload: impl Into<MessagePayload>) -> Self {
        Self::new(MessageFlags::INFO, payload)
    }

    pub fn error(payload: impl Into<MessagePayload>, fatal: bool) -> Self {
        let flags = if fatal {
            MessageFlags::ERROR | MessageFlags::FATAL
        } else {
            MessageFlags::ERROR
        };
        Self::new(flags, payload)
    }

    pub fn question(payload: impl Into<MessagePayload>) -> Self {
        Self::new(MessageFlags::QUESTION, payload)
    }

    pub fn question_yes_no(payload: impl Into<MessagePayload>) -> Self {
        Self::new(MessageFlags::QUESTION_YN, payload)
    }
}

/// What the user answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    Affirmative,
    Negative,
    Cancelled,
}

impl MessageOutcome {
    /// Generic integer form: 0, 1 or -1.
    pub fn code(self) -> i32 {
        match self {
            Self::Affirmative => 0,
            Self::Negative => 1,
            Self::Cancelled => -1,
        }
    }

    /// "No" is negative, "Cancel" is cancelled, everything else (OK, Yes,
    /// unnamed identifiers) is affirmative.
    pub fn from_native(button: NativeButton) -> Self {
        match button {
            NativeButton::No => Self::Negative,
            NativeButton::Cancel => Self::Cancelled,
            _ => Self::Affirmative,
        }
    }
}

// ── Dialog configuration ──────────────────────────────────────────────────────

/// Which string-table row supplies the main instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingSource {
    AppName,
    Error,
    FatalError,
}

/// Icon, heading and buttons for one set of flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxStyle {
    pub heading: Option<HeadingSource>,
    pub icon: Option<DialogIcon>,
    pub buttons: ButtonSet,
}

impl BoxStyle {
    /// | kind | heading | icon | buttons |
    /// |---|---|---|---|
    /// | Info | app name | information | OK |
    /// | Error | "Error" | warning | OK |
    /// | Error + FATAL | "Fatal Error" | error | OK |
    /// | Question | app name | – | Yes / No / Cancel |
    /// | QuestionYesNo | app name | – | Yes / No |
    /// | unknown | – | – | OK |
    pub fn for_flags(flags: MessageFlags) -> Self {
        let (heading, icon, buttons) = match flags.kind() {
            Some(MessageKind::Info) => (
                Some(HeadingSource::AppName),
                Some(DialogIcon::Information),
                ButtonSet::Ok,
            ),
            Some(MessageKind::Error) if flags.contains(MessageFlags::FATAL) => (
                Some(HeadingSource::FatalError),
                Some(DialogIcon::Error),
                ButtonSet::Ok,
            ),
            Some(MessageKind::Error) => (
                Some(HeadingSource::Error),
                Some(DialogIcon::Warning),
                ButtonSet::Ok,
            ),
            Some(MessageKind::Question) => {
                (Some(HeadingSource::AppName), None, ButtonSet::YesNoCancel)
            }
            Some(MessageKind::QuestionYesNo) => {
                (Some(HeadingSource::AppName), None, ButtonSet::YesNo)
            }
            None => (None, None, ButtonSet::Ok),
        };
        Self {
            heading,
            icon,
            buttons,
        }
    }
}

// ── Adapter ───────────────────────────────────────────────────────────────────

/// Presents message boxes through a native `ConfirmDialog`.
///
/// Each call blocks until the dialog is dismissed; at most one dialog may be
/// in flight.
pub struct MessageBoxAdapter<D, S> {
    dialog: D,
    strings: S,
    owner: WindowHandle,
    config: DialogConfig,
}

impl<D: ConfirmDialog, S: StringTable> MessageBoxAdapter<D, S> {
    pub fn new(dialog: D, strings: S, owner: WindowHandle, config: DialogConfig) -> Self {
        Self {
            dialog,
            strings,
            owner,
            config,
        }
    }

    /// Show `request` and return the user's answer.
    ///
    /// A failing native dialog is reported as `Affirmative`; callers cannot
    /// tell it apart from an OK.
    pub fn show(&mut self, request: &MessageRequest) -> MessageOutcome {
        let style = BoxStyle::for_flags(request.flags);
        let caption = self.strings.get(self.config.app_name_id);
        let heading = style.heading.map(|h| self.strings.get(self.heading_id(h)));
        let body = request.payload.resolve(&self.strings);

        log::debug!(
            "MessageBox: flags={:#x} icon={:?} buttons={:?}",
            request.flags.0,
            style.icon,
            style.buttons
        );

        let native = ConfirmRequest {
            owner: self.owner,
            caption: &caption,
            heading: heading.as_deref(),
            body: &body,
            icon: style.icon,
            buttons: style.buttons,
        };

        let outcome = match self.dialog.confirm(&native) {
            Ok(button) => MessageOutcome::from_native(button),
            Err(e) => {
                log::warn!("MessageBox: native dialog failed ({e}); reporting affirmative");
                MessageOutcome::Affirmative
            }
        };
        log::debug!("MessageBox: outcome {:?}", outcome);
        outcome
    }

    /// Legacy entry point: flags word plus an untagged argument that was
    /// already classified with `classify_legacy_arg`.  Returns 0, 1 or -1.
    pub fn show_flags(&mut self, flags: MessageFlags, payload: MessagePayload) -> i32 {
        self.show(&MessageRequest::new(flags, payload)).code()
    }

    fn heading_id(&self, source: HeadingSource) -> u32 {
        match source {
            HeadingSource::AppName => self.config.app_name_id,
            HeadingSource::Error => self.config.error_id,
            HeadingSource::FatalError => self.config.fatal_error_id,
        }
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    pub fn dialog(&self) -> &D {
        &self.dialog
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
