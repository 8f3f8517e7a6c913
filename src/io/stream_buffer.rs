use std::io::Read;
use std::sync::Mutex;

use bytes::Bytes;

use super::RangeReader;
use crate::error::IoError;

/// Initial capacity of the backfill buffer.
const INITIAL_CAPACITY: usize = 6 * 1024;

/// Random access over a plain forward-only stream.
///
/// Bytes are pulled from the stream on demand and kept in a growable buffer,
/// so a read at any absolute offset can be served as long as the stream holds
/// that many bytes. Nothing is read up front.
pub struct StreamBuffer<R> {
    state: Mutex<StreamState<R>>,
    identifier: String,
}

struct StreamState<R> {
    reader: R,
    buf: Vec<u8>,
    eof: bool,
}

impl<R: Read> StreamState<R> {
    /// Pull from the stream until the buffer holds at least `end` bytes or the
    /// stream is exhausted.
    fn fill(&mut self, end: u64, offset: u64) -> Result<(), IoError> {
        let have = self.buf.len() as u64;
        if end <= have || self.eof {
            return Ok(());
        }

        let wanted = end - have;
        let read = (&mut self.reader)
            .take(wanted)
            .read_to_end(&mut self.buf)
            .map_err(|e| IoError::Source {
                offset,
                message: e.to_string(),
            })?;
        if (read as u64) < wanted {
            self.eof = true;
        }
        Ok(())
    }
}

impl<R: Read> StreamBuffer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            state: Mutex::new(StreamState {
                reader,
                buf: Vec::with_capacity(INITIAL_CAPACITY),
                eof: false,
            }),
            identifier: "stream".to_string(),
        }
    }

    /// Set the identifier used in log messages.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Number of bytes pulled from the stream so far.
    pub fn buffered_len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .buf
            .len()
    }
}

impl<R: Read + Send> RangeReader for StreamBuffer<R> {
    fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        let end = offset.checked_add(len as u64).ok_or(IoError::RangeOutOfBounds {
            offset,
            requested: len as u64,
            size: state.buf.len() as u64,
        })?;
        state.fill(end, offset)?;

        let size = state.buf.len() as u64;
        if end > size {
            return Err(IoError::RangeOutOfBounds {
                offset,
                requested: len as u64,
                size,
            });
        }
        Ok(Bytes::copy_from_slice(
            &state.buf[offset as usize..end as usize],
        ))
    }

    fn size(&self) -> Option<u64> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.eof.then_some(state.buf.len() as u64)
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}
