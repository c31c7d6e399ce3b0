//! Process-wide log setup.
//!
//! One `tracing` subscriber with two outputs: stderr and an append-mode
//! log file, each filtered at its own level. Levels are numbered
//! 0 (errors only) to 4 (trace).
//!
//! The subscriber is installed on first use and never replaced. Both
//! outputs sit behind reloadable level filters and the file behind a
//! swappable slot, so logging can be shut down and started again with new
//! settings any number of times.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt, reload};

pub const MAX_LEVEL: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub console: bool,
    pub file: Option<PathBuf>,
    pub console_level: u8,
    pub file_level: u8,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console: true,
            file: None,
            console_level: 1,
            file_level: 2,
        }
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LogError {
    #[error("log level {0} is outside 0..={MAX_LEVEL}")]
    InvalidLevel(u8),
    #[error("cannot open log file {path:?}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("another global subscriber is installed: {0}")]
    ForeignSubscriber(String),
    #[error("cannot change log level: {0}")]
    Reload(String),
}

/// Map a numeric level to a filter.
pub fn level_filter(level: u8) -> Result<LevelFilter, LogError> {
    match level {
        0 => Ok(LevelFilter::ERROR),
        1 => Ok(LevelFilter::WARN),
        2 => Ok(LevelFilter::INFO),
        3 => Ok(LevelFilter::DEBUG),
        4 => Ok(LevelFilter::TRACE),
        other => Err(LogError::InvalidLevel(other)),
    }
}

/// Shared, swappable log file. Writes are dropped while it is empty.
#[derive(Debug, Clone, Default)]
struct FileSlot(Arc<Mutex<Option<File>>>);

impl FileSlot {
    fn lock(&self) -> MutexGuard<'_, Option<File>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn replace(&self, file: Option<File>) -> Option<File> {
        std::mem::replace(&mut *self.lock(), file)
    }
}

struct SlotWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for SlotWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.0.as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.0.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = SlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SlotWriter(self.lock())
    }
}

type SetLevel = Box<dyn Fn(LevelFilter) -> Result<(), reload::Error> + Send + Sync>;

/// Handles into the installed subscriber.
struct Sinks {
    console_level: SetLevel,
    file_level: SetLevel,
    file: FileSlot,
    /// Bumped by every successful init; only the newest guard shuts down.
    generation: AtomicU64,
}

static SINKS: OnceCell<Sinks> = OnceCell::new();

impl Sinks {
    /// Install the subscriber with both outputs switched off.
    fn install() -> Result<Self, LogError> {
        let (console_filter, console_handle) = reload::Layer::new(LevelFilter::OFF);
        let (file_filter, file_handle) = reload::Layer::new(LevelFilter::OFF);
        let file = FileSlot::default();

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_filter(console_filter),
            )
            .with(
                fmt::layer()
                    .with_writer(file.clone())
                    .with_ansi(false)
                    .with_filter(file_filter),
            )
            .try_init()
            .map_err(|e| LogError::ForeignSubscriber(e.to_string()))?;

        Ok(Self {
            console_level: Box::new(move |level: LevelFilter| console_handle.reload(level)),
            file_level: Box::new(move |level: LevelFilter| file_handle.reload(level)),
            file,
            generation: AtomicU64::new(0),
        })
    }

    fn set_levels(&self, console: LevelFilter, file: LevelFilter) -> Result<(), LogError> {
        (self.console_level)(console).map_err(|e| LogError::Reload(e.to_string()))?;
        (self.file_level)(file).map_err(|e| LogError::Reload(e.to_string()))
    }

    fn sync_file(file: &File) {
        if let Err(e) = file.sync_all() {
            warn!(error = %e, "log file sync failed");
        }
    }

    /// Detach and close the file, then silence both outputs.
    fn shut_down(&self) {
        info!("logging shut down");
        if let Some(file) = self.file.replace(None) {
            Self::sync_file(&file);
        }
        if let Err(e) = self.set_levels(LevelFilter::OFF, LevelFilter::OFF) {
            eprintln!("coo logging: {e}");
        }
    }
}

fn open_log_file(path: &Path) -> Result<File, LogError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LogError::File {
            path: path.to_path_buf(),
            source,
        })
}

/// Keeps logging active. Dropping it syncs and closes the log file and
/// silences both outputs, unless a later [`init_logging`] has already
/// taken over.
#[derive(Debug)]
#[must_use = "dropping the guard shuts logging down"]
pub struct LoggingGuard {
    generation: u64,
}

impl LoggingGuard {
    fn is_current(&self, sinks: &Sinks) -> bool {
        sinks.generation.load(Ordering::Acquire) == self.generation
    }

    /// Sync the log file to disk.
    pub fn flush(&self) {
        let Some(sinks) = SINKS.get() else {
            return;
        };
        if !self.is_current(sinks) {
            return;
        }
        let slot = sinks.file.lock();
        let result = slot.as_ref().map(File::sync_all);
        drop(slot);
        if let Some(Err(e)) = result {
            warn!(error = %e, "log file sync failed");
        }
    }
}

impl Drop for LoggingGuard {
    fn drop(&mut self) {
        if let Some(sinks) = SINKS.get()
            && self.is_current(sinks)
        {
            sinks.shut_down();
        }
    }
}

/// Start logging as described by `config`.
///
/// Levels are checked and the file opened before anything changes. The
/// subscriber is installed on the first call; later calls shut down the
/// current outputs and switch to the new ones. Fails if some other global
/// subscriber was installed first.
pub fn init_logging(config: &LogConfig) -> Result<LoggingGuard, LogError> {
    let console_level = level_filter(config.console_level)?;
    let file_level = level_filter(config.file_level)?;
    let file = config.file.as_deref().map(open_log_file).transpose()?;

    let sinks = SINKS.get_or_try_init(Sinks::install)?;
    if let Some(previous) = sinks.file.replace(None) {
        Sinks::sync_file(&previous);
    }
    let generation = sinks.generation.fetch_add(1, Ordering::AcqRel) + 1;

    let file_level = if file.is_some() {
        file_level
    } else {
        LevelFilter::OFF
    };
    let console_level = if config.console {
        console_level
    } else {
        LevelFilter::OFF
    };
    sinks.file.replace(file);
    sinks.set_levels(console_level, file_level)?;

    info!(
        console = config.console,
        file = ?config.file,
        "logging initialized"
    );
    Ok(LoggingGuard { generation })
}
