use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing::Level;

/// Environment variable naming a log file. Overridden by an explicit path.
pub const LOG_ENV: &str = "PANE_WM_LOG";

static LOG_FILE: OnceLock<Arc<Mutex<File>>> = OnceLock::new();

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<Mutex<File>>),
    Stderr(io::Stderr),
}

impl DelegatingWriter {
    fn new() -> Self {
        match LOG_FILE.get() {
            Some(file) => DelegatingWriter {
                inner: DelegatingInner::File(Arc::clone(file)),
            },
            None => DelegatingWriter {
                inner: DelegatingInner::Stderr(io::stderr()),
            },
        }
    }
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(f) => f
                .lock()
                .map_err(|_| io::Error::other("log file lock poisoned"))?
                .write(buf),
            DelegatingInner::Stderr(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(f) => f
                .lock()
                .map_err(|_| io::Error::other("log file lock poisoned"))?
                .flush(),
            DelegatingInner::Stderr(s) => s.flush(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SubscriberMakeWriter;

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        DelegatingWriter::new()
    }
}

/// Path logs should go to: `explicit` if given, else `$PANE_WM_LOG`.
pub fn log_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(LOG_ENV).map(PathBuf::from))
}

fn open_log(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Route log output to `path` (appending). The first successful call wins.
pub fn set_log_file(path: &Path) -> io::Result<()> {
    let file = open_log(path)?;
    let _ = LOG_FILE.set(Arc::new(Mutex::new(file)));
    Ok(())
}

/// Install the global subscriber. Logs go to the file from [`log_path`]
/// when one is configured, otherwise to stderr. While the demo owns the
/// screen, stderr output would corrupt it, so the binary always passes a
/// path or keeps logging off. Later calls are no-ops.
pub fn init_default(explicit: Option<&Path>) -> io::Result<()> {
    if let Some(path) = log_path(explicit) {
        set_log_file(&path)?;
    }
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(SubscriberMakeWriter)
        .with_target(false)
        .with_thread_names(false)
        .with_ansi(LOG_FILE.get().is_none())
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wm.log");
        assert_eq!(log_path(Some(&path)), Some(path.clone()));
    }

    #[test]
    fn writer_appends_to_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wm.log");
        let mut file = open_log(&path).unwrap();
        file.write_all(b"first\n").unwrap();
        let mut writer = DelegatingWriter {
            inner: DelegatingInner::File(Arc::new(Mutex::new(open_log(&path).unwrap()))),
        };
        writer.write_all(b"second\n").unwrap();
        writer.flush().unwrap();

        let mut contents = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }
}
