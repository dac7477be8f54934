#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the covgate binary with the gate's
/// environment variables cleared.
#[macro_export]
macro_rules! covgate {
    () => {{
        let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("covgate"));
        for var in [
            "LCOV_FILE",
            "COVERAGE_THRESHOLD",
            "COVERAGE_INCLUDE",
            "COVERAGE_EXCLUDE",
            "COVERAGE_TOP",
            "COVERAGE_STRICT_RECORDS",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }};
}

/// Path to a checked-in LCOV fixture.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Write `content` as `lcov.info` into a fresh temp directory.
/// The caller must hold onto `TempDir` to keep the file alive.
pub fn write_report(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lcov.info");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

/// One LCOV record with all six summary counters.
pub fn record(path: &str, lf: u64, lh: u64, fnf: u64, fnh: u64, brf: u64, brh: u64) -> String {
    format!(
        "TN:\nSF:{path}\nFNF:{fnf}\nFNH:{fnh}\nLF:{lf}\nLH:{lh}\nBRF:{brf}\nBRH:{brh}\nend_of_record\n"
    )
}

pub fn config_for(path: &Path) -> covgate::config::GateConfig {
    covgate::config::GateConfig {
        report_path: path.to_path_buf(),
        ..Default::default()
    }
}
