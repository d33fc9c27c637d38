// Shared test helpers for building URL list files and paced-run configs.

use std::io::Write;
use std::path::PathBuf;

use request_pacer::Config;
use tempfile::NamedTempFile;

/// Writes `lines` to a temporary URL list file.
/// The file is deleted when the returned handle is dropped.
pub fn write_url_file(lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for line in lines {
        writeln!(file, "{line}").expect("Failed to write URL");
    }
    file.flush().expect("Failed to flush URL file");
    file
}

/// Config with millisecond ticks so paced runs finish quickly.
pub fn fast_config(file: PathBuf) -> Config {
    Config {
        file,
        start_interval: 1,
        minimum_floor: 1,
        interval_unit_ms: 1,
        timeout_seconds: 5,
        ..Default::default()
    }
}
