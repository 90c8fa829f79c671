//! Tracing subscriber setup.
//!
//! The interactive board owns stdout, so log lines can only go to stderr or a
//! file.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Installs the global subscriber for `destination` (`0`/`off`, `2`/`stderr`,
/// or a file path opened in append mode).
pub fn init(destination: &str, verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    match destination {
        "0" | "off" => {}
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)
                .with_context(|| format!("could not open log file {}", filename))?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn off_installs_nothing() {
        assert!(init("off", false).is_ok());
        assert!(init("0", true).is_ok());
    }

    #[test]
    fn unopenable_log_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("tasklist.log");
        let err = init(path.to_str().unwrap(), false).unwrap_err();
        assert!(err.to_string().contains("could not open log file"));
    }

    #[test]
    fn file_destination_is_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasklist.log");
        init(path.to_str().unwrap(), true).unwrap();
        assert!(path.exists());
    }
}
