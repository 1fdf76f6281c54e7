// Release builds run as a GUI application (no console window).
// Debug builds keep the console so that log output is visible.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(windows)]
mod demo {
    use plat_dialogs::{
        config,
        file_dialog::{FileDialogAdapter, FileDialogRequest, FilterSpec},
        message::{MessageBoxAdapter, MessagePayload, MessageRequest},
        platform::{
            win32::{Win32FilePicker, Win32TaskDialog},
            ProcessWorkingDirectory, WindowHandle,
        },
        strings::{MapStringTable, IDS_APP_NAME, IDS_ERROR, IDS_FATAL_ERROR},
        Result,
    };

    const APP_DIR: &str = "PlatDialogs";
    const IDS_READY: u32 = 100;

    pub(crate) fn run() -> Result<()> {
        let cfg = config::load(APP_DIR);
        let strings = MapStringTable::new()
            .with(IDS_APP_NAME, "Dialog Demo")
            .with(IDS_ERROR, "Error")
            .with(IDS_FATAL_ERROR, "Fatal Error")
            .with(IDS_READY, "Operation complete");

        let mut mb = MessageBoxAdapter::new(
            Win32TaskDialog,
            &strings,
            WindowHandle::NONE,
            cfg.clone(),
        );
        mb.show(&MessageRequest::info(MessagePayload::StringId(IDS_READY)));
        let answer = mb.show(&MessageRequest::question_yes_no("Pick a disk image now?"));
        log::info!("question answered {:?} ({})", answer, answer.code());
        if answer.code() != 0 {
            return Ok(());
        }

        let mut fd = FileDialogAdapter::new(
            Win32FilePicker,
            ProcessWorkingDirectory,
            &strings,
            WindowHandle::NONE,
            cfg,
        );
        let filter = FilterSpec::new()
            .with("Floppy Images (*.img)", "*.img")
            .with("All Files (*.*)", "*.*");
        let result = fd.choose_file(&FileDialogRequest::open(filter))?;
        let body = match result.selection() {
            Some(sel) => format!("{} (filter {})", sel.path.display(), sel.filter_index),
            None => "No file chosen.".to_owned(),
        };
        mb.show(&MessageRequest::info(body));
        Ok(())
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Stderr logger, installed in debug builds only.
#[cfg(debug_assertions)]
struct StderrLog;

#[cfg(debug_assertions)]
impl log::Log for StderrLog {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        eprintln!("[dialogs] {:<5} {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

fn init_logging() {
    #[cfg(debug_assertions)]
    {
        static LOGGER: StderrLog = StderrLog;
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Debug);
        }
    }
}

fn main() {
    init_logging();

    #[cfg(windows)]
    if let Err(e) = demo::run() {
        eprintln!("dialog-demo: {e}");
        std::process::exit(1);
    }

    #[cfg(not(windows))]
    {
        eprintln!("dialog-demo: no native dialog backend on this platform");
        std::process::exit(1);
    }
}
