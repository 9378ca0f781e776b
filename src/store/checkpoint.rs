//! Append-only JSON Lines checkpoint log
//!
//! One record per line. `append` performs a single write of the encoded line
//! followed by a flush and fsync, so a record is durable before the caller
//! moves on. The store never deduplicates; callers build their seen-set from
//! `load_all`.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{DataError, SwapScopeError};
use crate::logger::{self, LogTag};

pub struct CheckpointedStore<T> {
    path: PathBuf,
    writer: Option<File>,
    _record: PhantomData<fn() -> T>,
}

impl<T> CheckpointedStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: None,
            _record: PhantomData,
        }
    }

    /// Read every persisted record in append order
    ///
    /// A missing file is an empty store. An unterminated last line (crash in
    /// the middle of an append) is repaired: kept if it still decodes,
    /// otherwise dropped and truncated away with a warning. Any other line
    /// that fails to decode is a corrupt checkpoint.
    pub fn load_all(&self) -> Result<Vec<T>, SwapScopeError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(SwapScopeError::io_error(&self.path, e)),
        };

        let (complete, tail) = match contents.rfind('\n') {
            Some(idx) => contents.split_at(idx + 1),
            None => ("", contents.as_str()),
        };

        let mut records = Vec::new();
        for (idx, line) in complete.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str::<T>(line).map_err(|e| {
                SwapScopeError::Data(DataError::CorruptCheckpoint {
                    path: self.path.display().to_string(),
                    line: idx + 1,
                    error: e.to_string(),
                })
            })?;
            records.push(record);
        }

        if !tail.trim().is_empty() {
            match serde_json::from_str::<T>(tail) {
                Ok(record) => {
                    self.repair_tail(None)?;
                    records.push(record);
                }
                Err(e) => {
                    logger::warning(
                        LogTag::Store,
                        &format!(
                            "Dropping partial record at end of {} ({} bytes): {}",
                            self.path.display(),
                            tail.len(),
                            e
                        ),
                    );
                    self.repair_tail(Some(complete.len() as u64))?;
                }
            }
        }

        logger::debug(
            LogTag::Store,
            &format!("Loaded {} records from {}", records.len(), self.path.display()),
        );

        Ok(records)
    }

    /// Append one record as a single line and make it durable
    pub fn append(&mut self, record: &T) -> Result<(), SwapScopeError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let path = self.path.clone();
        let file = self.writer()?;
        write_durable(file, line.as_bytes()).map_err(|e| SwapScopeError::io_error(&path, e))
    }

    fn writer(&mut self) -> Result<&mut File, SwapScopeError> {
        if self.writer.is_none() {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| SwapScopeError::io_error(parent, e))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .map_err(|e| SwapScopeError::io_error(&self.path, e))?;
            self.writer = Some(file);
        }
        match self.writer.as_mut() {
            Some(file) => Ok(file),
            None => Err(SwapScopeError::io_error(&self.path, "writer unavailable")),
        }
    }

    /// Truncate to `keep_len` bytes, or terminate the last line when `None`
    fn repair_tail(&self, keep_len: Option<u64>) -> Result<(), SwapScopeError> {
        let mut file = OpenOptions::new()
            .write(true)
            .append(keep_len.is_none())
            .open(&self.path)
            .map_err(|e| SwapScopeError::io_error(&self.path, e))?;

        let result = match keep_len {
            Some(len) => file.set_len(len).and_then(|_| file.sync_data()),
            None => write_durable(&mut file, b"\n"),
        };
        result.map_err(|e| SwapScopeError::io_error(&self.path, e))
    }
}

fn write_durable(file: &mut File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes)?;
    file.flush()?;
    file.sync_data()
}
