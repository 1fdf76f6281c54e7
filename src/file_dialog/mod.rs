// ── File dialogs ──────────────────────────────────────────────────────────────
//
// Maps an open/save request onto one native picker call.  The adapter owns the
// path buffer, remembers the last result (`DialogState`) and always puts the
// process working directory back afterwards, because the native picker moves
// it as a side effect.

use std::path::{Path, PathBuf};

use crate::config::DialogConfig;
use crate::error::{DialogError, Result};
use crate::platform::{
    DialogMode, FilePicker, PickerFlags, PickerRequest, WindowHandle, WorkingDirectory,
};
use crate::strings::{from_wide, narrow_to_wide, wide_to_narrow, StringTable};

mod buffer;
mod filter;

pub use buffer::{PathBuffer, PATH_BUF_LEN, PATH_MAX_FILE};
pub use filter::FilterSpec;

// ── Request / result ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDialogRequest {
    pub filter: FilterSpec,
    /// Pre-filled file name; may be empty.
    pub initial_path: String,
    pub mode: DialogMode,
    /// Owner window; the adapter's default owner when `None`.
    pub owner: Option<WindowHandle>,
}

impl FileDialogRequest {
    pub fn open(filter: FilterSpec) -> Self {
        Self {
            filter,
            initial_path: String::new(),
            mode: DialogMode::Open,
            owner: None,
        }
    }

    pub fn save(filter: FilterSpec, initial_path: impl Into<String>) -> Self {
        Self {
            filter,
            initial_path: initial_path.into(),
            mode: DialogMode::Save,
            owner: None,
        }
    }

    pub fn owned_by(mut self, owner: WindowHandle) -> Self {
        self.owner = Some(owner);
        self
    }
}

/// A confirmed selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection {
    pub path: PathBuf,
    /// The same path in narrow (single-byte) form.
    pub narrow_path: Vec<u8>,
    /// 1-based index of the filter that was active, within `1..=filters`.
    pub filter_index: u32,
}

/// Outcome of one picker call.
///
/// `NotChosen` covers both a user cancel and a native failure; the two are
/// not distinguishable here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileDialogResult {
    Chosen(FileSelection),
    NotChosen,
}

impl FileDialogResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Chosen(_))
    }

    pub fn selection(&self) -> Option<&FileSelection> {
        match self {
            Self::Chosen(sel) => Some(sel),
            Self::NotChosen => None,
        }
    }
}

// ── Remembered state ──────────────────────────────────────────────────────────

/// The last successful selection.  Untouched by cancelled or failed calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogState {
    wide_path: Vec<u16>,
    narrow_path: Vec<u8>,
    filter_index: u32,
}

impl DialogState {
    pub fn wide_path(&self) -> &[u16] {
        &self.wide_path
    }

    pub fn narrow_path(&self) -> &[u8] {
        &self.narrow_path
    }

    /// 1-based filter index of the last selection; 0 before the first one.
    pub fn filter_index(&self) -> u32 {
        self.filter_index
    }
}

// ── Working-directory guard ───────────────────────────────────────────────────

/// Returns the process to `dir` when dropped, on every exit path.
struct RestoreDirGuard<'a, W: WorkingDirectory> {
    cwd: &'a W,
    dir: &'a Path,
}

impl<W: WorkingDirectory> Drop for RestoreDirGuard<'_, W> {
    fn drop(&mut self) {
        if let Err(e) = self.cwd.change_directory(self.dir) {
            log::warn!(
                "FileDialog: could not restore working directory {}: {e}",
                self.dir.display()
            );
        }
    }
}

// ── Adapter ───────────────────────────────────────────────────────────────────

/// Presents open/save pickers through a native `FilePicker`.
///
/// Calls block until the picker closes.  Only one call may be in flight, and
/// `state()` reflects the most recent successful one.
pub struct FileDialogAdapter<P, W, S> {
    picker: P,
    cwd: W,
    strings: S,
    owner: WindowHandle,
    config: DialogConfig,
    state: DialogState,
}

impl<P: FilePicker, W: WorkingDirectory, S: StringTable> FileDialogAdapter<P, W, S> {
    pub fn new(picker: P, cwd: W, strings: S, owner: WindowHandle, config: DialogConfig) -> Self {
        Self {
            picker,
            cwd,
            strings,
            owner,
            config,
            state: DialogState::default(),
        }
    }

    /// Typed entry point.
    ///
    /// Returns `Err` only for caller errors (empty filter, path too long);
    /// the picker is not shown in that case.
    pub fn choose_file(&mut self, request: &FileDialogRequest) -> Result<FileDialogResult> {
        let initial: Vec<u16> = request.initial_path.encode_utf16().collect();
        let owner = request.owner.unwrap_or(self.owner);
        self.run(owner, &request.filter, &initial, request.mode)
    }

    /// Wide filter (native form) and wide initial path.
    ///
    /// `owner` of `None` uses the adapter's default owner, as in the other
    /// variants below.
    pub fn choose_file_wide(
        &mut self,
        owner: Option<WindowHandle>,
        filter: &[u16],
        initial: &[u16],
        mode: DialogMode,
    ) -> Result<FileDialogResult> {
        let spec = FilterSpec::parse(filter)?;
        self.run(owner.unwrap_or(self.owner), &spec, initial, mode)
    }

    /// Narrow filter and narrow initial path; both are transcoded first.
    pub fn choose_file_narrow(
        &mut self,
        owner: Option<WindowHandle>,
        filter: &[u8],
        initial: &[u8],
        mode: DialogMode,
    ) -> Result<FileDialogResult> {
        // Keep the embedded NULs: the filter is several strings in one.
        let filter: Vec<u16> = filter.iter().map(|&b| u16::from(b)).collect();
        self.choose_file_wide(owner, &filter, &narrow_to_wide(initial), mode)
    }

    /// Wide filter with a narrow initial path.
    pub fn choose_file_narrow_path(
        &mut self,
        owner: Option<WindowHandle>,
        filter: &[u16],
        initial: &[u8],
        mode: DialogMode,
    ) -> Result<FileDialogResult> {
        self.choose_file_wide(owner, filter, &narrow_to_wide(initial), mode)
    }

    /// Filter from the string table, wide initial path.
    pub fn choose_file_wide_id(
        &mut self,
        owner: Option<WindowHandle>,
        filter_id: u32,
        initial: &[u16],
        mode: DialogMode,
    ) -> Result<FileDialogResult> {
        let spec = FilterSpec::parse_str(&self.strings.get(filter_id))?;
        self.run(owner.unwrap_or(self.owner), &spec, initial, mode)
    }

    /// Filter from the string table, narrow initial path.
    pub fn choose_file_id(
        &mut self,
        owner: Option<WindowHandle>,
        filter_id: u32,
        initial: &[u8],
        mode: DialogMode,
    ) -> Result<FileDialogResult> {
        self.choose_file_wide_id(owner, filter_id, &narrow_to_wide(initial), mode)
    }

    pub fn state(&self) -> &DialogState {
        &self.state
    }

    pub fn picker(&self) -> &P {
        &self.picker
    }

    pub fn working_directory(&self) -> &W {
        &self.cwd
    }

    fn run(
        &mut self,
        owner: WindowHandle,
        filter: &FilterSpec,
        initial: &[u16],
        mode: DialogMode,
    ) -> Result<FileDialogResult> {
        if filter.is_empty() {
            return Err(DialogError::InvalidFilter("no filters".to_owned()));
        }
        let mut buf = PathBuffer::with_initial(initial)?;
        let native_filter = filter.encode();

        let mut request = PickerRequest {
            owner,
            filter: &native_filter,
            filter_index: 1,
            file: buf.as_mut_slice(),
            max_file: PATH_MAX_FILE,
            flags: PickerFlags {
                path_must_exist: true,
                file_must_exist: mode == DialogMode::Open,
            },
            mode,
        };

        log::debug!(
            "FileDialog: {:?} with {} filter(s), initial {:?}",
            mode,
            filter.len(),
            from_wide(initial)
        );

        let picked = {
            let _restore = RestoreDirGuard {
                cwd: &self.cwd,
                dir: &self.config.user_data_dir,
            };
            self.picker.pick(&mut request)
        };

        let native_index = match picked {
            Ok(Some(index)) => index,
            Ok(None) => {
                log::debug!("FileDialog: cancelled by user");
                return Ok(FileDialogResult::NotChosen);
            }
            Err(e) => {
                log::warn!("FileDialog: picker failed: {e}");
                return Ok(FileDialogResult::NotChosen);
            }
        };

        let filter_index = clamp_filter_index(native_index, filter.len());
        let wide = buf.path_units().to_vec();
        let selection = FileSelection {
            path: PathBuf::from(from_wide(&wide)),
            narrow_path: wide_to_narrow(&wide),
            filter_index,
        };

        self.state = DialogState {
            wide_path: wide,
            narrow_path: selection.narrow_path.clone(),
            filter_index,
        };

        log::debug!(
            "FileDialog: chose {} (filter {})",
            selection.path.display(),
            filter_index
        );
        Ok(FileDialogResult::Chosen(selection))
    }
}

/// Keep a picker-reported index within `1..=count`.
fn clamp_filter_index(index: u32, count: usize) -> u32 {
    let max = u32::try_from(count).unwrap_or(u32::MAX).max(1);
    let clamped = index.clamp(1, max);
    if clamped != index {
        log::warn!("FileDialog: picker reported filter {index} of {count}; using {clamped}");
    }
    clamped
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strings::MapStringTable;
    use crate::testing::{FakeCwd, FakePicker, PickerReply};

    const USER_DIR: &str = "/home/vm/86box";
    const IDS_IMAGE_FILTER: u32 = 2100;

    type Adapter = FileDialogAdapter<FakePicker, FakeCwd, MapStringTable>;

    fn adapter(reply: PickerReply) -> Adapter {
        let strings = MapStringTable::new().with(
            IDS_IMAGE_FILTER,
            "All Files (*.*)\0*.*\0Floppy Images (*.img)\0*.img\0\0",
        );
        FileDialogAdapter::new(
            FakePicker::replying(reply),
            FakeCwd::default(),
            strings,
            WindowHandle(0x77),
            DialogConfig::with_user_data_dir(USER_DIR),
        )
    }

    fn images() -> FilterSpec {
        FilterSpec::new()
            .with("All Files (*.*)", "*.*")
            .with("Disk Images (*.img)", "*.img")
    }

    #[test]
    fn save_end_to_end() {
        let mut dlg = adapter(PickerReply::Choose {
            path: r"C:\vms\out.img".to_owned(),
            filter_index: 2,
        });
        let result = dlg
            .choose_file(&FileDialogRequest::save(images(), "out.img"))
            .expect("valid request");

        let sel = result.selection().expect("chosen");
        assert_eq!(sel.path, PathBuf::from(r"C:\vms\out.img"));
        assert_eq!(sel.narrow_path, br"C:\vms\out.img".to_vec());
        assert_eq!(sel.filter_index, 2);
        assert_eq!(dlg.working_directory().current(), Some(PathBuf::from(USER_DIR)));

        let seen = dlg.picker().last().expect("picker shown");
        assert_eq!(seen.initial, "out.img");
        assert_eq!(seen.mode, DialogMode::Save);
        assert_eq!(seen.filter_index, 1);
        assert_eq!(seen.max_file, 259);
        assert_eq!(seen.buffer_len, PATH_BUF_LEN);
        assert_eq!(seen.owner, WindowHandle(0x77));
        assert!(seen.flags.path_must_exist);
        assert!(!seen.flags.file_must_exist);
    }

    #[test]
    fn open_requires_existing_file() {
        let mut dlg = adapter(PickerReply::Cancel);
        dlg.choose_file(&FileDialogRequest::open(images()))
            .expect("valid request");
        let seen = dlg.picker().last().expect("picker shown");
        assert_eq!(seen.mode, DialogMode::Open);
        assert!(seen.flags.path_must_exist);
        assert!(seen.flags.file_must_exist);
        assert_eq!(seen.filter, images().encode());
    }

    #[test]
    fn explicit_owner_overrides_default() {
        let mut dlg = adapter(PickerReply::Cancel);
        dlg.choose_file(&FileDialogRequest::open(images()).owned_by(WindowHandle(5)))
            .expect("valid request");
        assert_eq!(dlg.picker().last().unwrap().owner, WindowHandle(5));
    }

    #[test]
    fn directory_restored_on_cancel_and_failure() {
        for reply in [PickerReply::Cancel, PickerReply::Fail] {
            let mut dlg = adapter(reply);
            let result = dlg
                .choose_file(&FileDialogRequest::open(images()))
                .expect("valid request");
            assert!(!result.is_success());
            assert_eq!(dlg.working_directory().calls(), 1);
            assert_eq!(dlg.working_directory().current(), Some(PathBuf::from(USER_DIR)));
        }
    }

    #[test]
    fn failure_keeps_previous_state() {
        let mut dlg = adapter(PickerReply::Choose {
            path: "first.img".to_owned(),
            filter_index: 2,
        });
        dlg.choose_file(&FileDialogRequest::open(images()))
            .expect("valid request");
        let before = dlg.state().clone();
        assert_eq!(before.narrow_path(), b"first.img");
        assert_eq!(before.filter_index(), 2);

        for reply in [PickerReply::Cancel, PickerReply::Fail] {
            dlg.picker_mut_for_test().set_reply(reply);
            let result = dlg
                .choose_file(&FileDialogRequest::open(images()))
                .expect("valid request");
            assert_eq!(result, FileDialogResult::NotChosen);
            assert_eq!(dlg.state(), &before);
        }
    }

    #[test]
    fn state_starts_empty() {
        let dlg = adapter(PickerReply::Cancel);
        assert_eq!(dlg.state().filter_index(), 0);
        assert!(dlg.state().wide_path().is_empty());
    }

    #[test]
    fn overlong_initial_path_never_reaches_picker() {
        let mut dlg = adapter(PickerReply::Cancel);
        let long = "x".repeat(PATH_BUF_LEN);
        let err = dlg
            .choose_file(&FileDialogRequest::save(images(), long))
            .unwrap_err();
        assert!(matches!(err, DialogError::PathTooLong { .. }));
        assert!(dlg.picker().last().is_none());
        assert_eq!(dlg.working_directory().calls(), 0);
    }

    #[test]
    fn longest_initial_path_is_accepted() {
        let mut dlg = adapter(PickerReply::Cancel);
        let longest = "x".repeat(PATH_BUF_LEN - 1);
        dlg.choose_file(&FileDialogRequest::save(images(), longest.clone()))
            .expect("fits");
        assert_eq!(dlg.picker().last().unwrap().initial, longest);
    }

    #[test]
    fn empty_filter_is_rejected() {
        let mut dlg = adapter(PickerReply::Cancel);
        let err = dlg
            .choose_file(&FileDialogRequest::open(FilterSpec::new()))
            .unwrap_err();
        assert!(matches!(err, DialogError::InvalidFilter(_)));
        assert!(dlg.picker().last().is_none());
    }

    #[test]
    fn filter_index_is_clamped_to_filter_count() {
        for (native, expected) in [(0, 1), (2, 2), (9, 2)] {
            let mut dlg = adapter(PickerReply::Choose {
                path: "a.img".to_owned(),
                filter_index: native,
            });
            let result = dlg
                .choose_file(&FileDialogRequest::open(images()))
                .expect("valid request");
            assert_eq!(result.selection().unwrap().filter_index, expected);
        }
    }

    #[test]
    fn narrow_variant_transcodes_both_arguments() {
        let mut dlg = adapter(PickerReply::Choose {
            path: "caf\u{e9}.img".to_owned(),
            filter_index: 1,
        });
        let result = dlg
            .choose_file_narrow(None, b"Images\0*.img\0\0", b"d\xe9j\xe0.img", DialogMode::Open)
            .expect("valid request");

        let seen = dlg.picker().last().unwrap();
        assert_eq!(seen.initial, "d\u{e9}j\u{e0}.img");
        assert_eq!(seen.filter, FilterSpec::new().with("Images", "*.img").encode());
        assert_eq!(result.selection().unwrap().narrow_path, b"caf\xe9.img".to_vec());
    }

    #[test]
    fn string_table_filter_variants() {
        let mut dlg = adapter(PickerReply::Choose {
            path: "disk.img".to_owned(),
            filter_index: 2,
        });
        let initial: Vec<u16> = "disk.img".encode_utf16().collect();
        dlg.choose_file_wide_id(None, IDS_IMAGE_FILTER, &initial, DialogMode::Open)
            .expect("valid request");
        let first = dlg.picker().last().unwrap().filter.clone();

        dlg.choose_file_id(None, IDS_IMAGE_FILTER, b"disk.img", DialogMode::Open)
            .expect("valid request");
        let second = dlg.picker().last().unwrap();
        assert_eq!(first, second.filter);
        assert_eq!(second.initial, "disk.img");
        assert_eq!(FilterSpec::parse(&first).expect("parse").len(), 2);
    }

    #[test]
    fn missing_string_table_filter_is_rejected() {
        let mut dlg = adapter(PickerReply::Cancel);
        assert!(dlg.choose_file_id(None, 9999, b"", DialogMode::Open).is_err());
        assert!(dlg.picker().last().is_none());
    }

    #[test]
    fn wide_filter_with_narrow_path() {
        let mut dlg = adapter(PickerReply::Cancel);
        let filter = images().encode();
        dlg.choose_file_narrow_path(None, &filter, b"a.cfg", DialogMode::Save)
            .expect("valid request");
        assert_eq!(dlg.picker().last().unwrap().initial, "a.cfg");
    }

    #[test]
    fn every_variant_takes_a_per_call_owner() {
        let mut dlg = adapter(PickerReply::Cancel);
        let filter = images().encode();
        let initial: Vec<u16> = "a.img".encode_utf16().collect();
        let owner = Some(WindowHandle(42));

        dlg.choose_file_wide(owner, &filter, &initial, DialogMode::Open)
            .expect("valid request");
        assert_eq!(dlg.picker().last().unwrap().owner, WindowHandle(42));

        dlg.choose_file_narrow(owner, b"Images\0*.img\0\0", b"a.img", DialogMode::Open)
            .expect("valid request");
        assert_eq!(dlg.picker().last().unwrap().owner, WindowHandle(42));

        dlg.choose_file_narrow_path(owner, &filter, b"a.img", DialogMode::Save)
            .expect("valid request");
        assert_eq!(dlg.picker().last().unwrap().owner, WindowHandle(42));

        dlg.choose_file_wide_id(owner, IDS_IMAGE_FILTER, &initial, DialogMode::Open)
            .expect("valid request");
        assert_eq!(dlg.picker().last().unwrap().owner, WindowHandle(42));

        dlg.choose_file_id(owner, IDS_IMAGE_FILTER, b"a.img", DialogMode::Open)
            .expect("valid request");
        assert_eq!(dlg.picker().last().unwrap().owner, WindowHandle(42));

        dlg.choose_file_id(None, IDS_IMAGE_FILTER, b"a.img", DialogMode::Open)
            .expect("valid request");
        assert_eq!(dlg.picker().last().unwrap().owner, WindowHandle(0x77));
    }

    impl Adapter {
        fn picker_mut_for_test(&mut self) -> &mut FakePicker {
            &mut self.picker
        }
    }
}
