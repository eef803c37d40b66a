//! Append-only JSON lines outbox.
//!
//! Each forwarded envelope becomes one line of `events.jsonl` inside a
//! directory opened through `cap-std`. A relay process can ship the file to
//! a managed bus.

use std::io::{self, Write as _};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

use crate::error::poisoned;
use crate::events::{
    domain::EventEnvelope,
    ports::{EventSink, SinkError},
};

/// Name of the file envelopes are appended to.
pub const OUTBOX_FILE_NAME: &str = "events.jsonl";

/// [`EventSink`] writing envelopes to a local outbox file.
#[derive(Debug, Clone)]
pub struct OutboxEventSink {
    dir: Arc<Dir>,
    path: Utf8PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl OutboxEventSink {
    /// Opens (creating if needed) the outbox directory.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when the directory cannot be created or opened.
    pub fn open(directory: &Utf8Path) -> Result<Self, SinkError> {
        Dir::create_ambient_dir_all(directory, ambient_authority()).map_err(SinkError::new)?;
        let dir = Dir::open_ambient_dir(directory, ambient_authority()).map_err(SinkError::new)?;
        Ok(Self {
            dir: Arc::new(dir),
            path: directory.to_owned(),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Returns the outbox directory.
    #[must_use]
    pub fn directory(&self) -> &Utf8Path {
        &self.path
    }

    /// Reads back every envelope written so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when the file cannot be read or a line is not
    /// a valid envelope.
    pub async fn read_all(&self) -> Result<Vec<EventEnvelope>, SinkError> {
        let dir = Arc::clone(&self.dir);
        run_blocking(move || {
            let text = match dir.read_to_string(OUTBOX_FILE_NAME) {
                Ok(text) => text,
                Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
                Err(err) => return Err(SinkError::new(err)),
            };
            text.lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| serde_json::from_str(line).map_err(SinkError::new))
                .collect()
        })
        .await
    }
}

async fn run_blocking<F, T>(f: F) -> Result<T, SinkError>
where
    F: FnOnce() -> Result<T, SinkError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(SinkError::new)?
}

#[async_trait]
impl EventSink for OutboxEventSink {
    async fn put(&self, envelope: &EventEnvelope) -> Result<(), SinkError> {
        let mut line = serde_json::to_vec(envelope).map_err(SinkError::new)?;
        line.push(b'\n');
        let dir = Arc::clone(&self.dir);
        let write_lock = Arc::clone(&self.write_lock);
        run_blocking(move || {
            let _guard = write_lock
                .lock()
                .map_err(|err| SinkError::new(poisoned(&err)))?;
            let mut options = OpenOptions::new();
            options.create(true).append(true);
            let mut file = dir
                .open_with(OUTBOX_FILE_NAME, &options)
                .map_err(SinkError::new)?;
            file.write_all(&line).map_err(SinkError::new)?;
            file.flush().map_err(SinkError::new)
        })
        .await
    }
}
