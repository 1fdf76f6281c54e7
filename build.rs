/// plat-dialogs build script.
///
/// `TaskDialog` lives in Common Controls v6, which is only bound when the
/// executable carries a manifest dependency on it.  On MSVC we ask the linker
/// to emit that dependency for our binaries; on other toolchains and targets
/// there is nothing to do (the portable core has no native requirements).
fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let target_env = std::env::var("CARGO_CFG_TARGET_ENV").unwrap_or_default();
    if target_os != "windows" || target_env != "msvc" {
        return;
    }

    // ── Common Controls v6 manifest dependency ───────────────────────────────
    // Without this, TaskDialog fails with "entry point not found" at load time.
    println!(
        "cargo:rustc-link-arg-bins=/MANIFEST:EMBED"
    );
    println!(
        "cargo:rustc-link-arg-bins=/MANIFESTDEPENDENCY:type='win32' \
         name='Microsoft.Windows.Common-Controls' version='6.0.0.0' \
         processorArchitecture='*' publicKeyToken='6595b64144ccf1df' language='*'"
    );
}
