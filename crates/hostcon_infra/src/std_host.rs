//! Host primitive backed by the process's own stdout/stderr.
//!
//! Each stream sits behind its own mutex, so a byte on one channel never waits
//! on the other channel.

use std::io::{self, Stderr, Stdout, Write};
use std::sync::{Arc, Mutex};

use hostcon_domain::{Channel, Console, HostBoundaryError, HostWrite};

/// Writes each byte straight to the stream for its channel.
///
/// Generic over writer types `O` (stdout) and `E` (stderr) so embedders can
/// route the console into pipes, files or buffers.
#[derive(Debug)]
pub struct StdHost<O = Stdout, E = Stderr> {
    stdout: Arc<Mutex<O>>,
    stderr: Arc<Mutex<E>>,
    autoflush: bool,
}

impl<O, E> Clone for StdHost<O, E> {
    fn clone(&self) -> Self {
        Self {
            stdout: self.stdout.clone(),
            stderr: self.stderr.clone(),
            autoflush: self.autoflush,
        }
    }
}

impl Default for StdHost<Stdout, Stderr> {
    fn default() -> Self {
        Self::with_writers(io::stdout(), io::stderr())
    }
}

impl<O, E> StdHost<O, E> {
    /// Creates a host over custom writers.
    pub fn with_writers(stdout: O, stderr: E) -> Self {
        Self {
            stdout: Arc::new(Mutex::new(stdout)),
            stderr: Arc::new(Mutex::new(stderr)),
            autoflush: false,
        }
    }

    /// Flush the target stream after every byte.
    pub fn autoflush(mut self, autoflush: bool) -> Self {
        self.autoflush = autoflush;
        self
    }

    /// Runs `f` on the stdout writer.
    pub fn with_stdout<R>(&self, f: impl FnOnce(&mut O) -> R) -> R {
        let mut guard = self.stdout.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }

    /// Runs `f` on the stderr writer.
    pub fn with_stderr<R>(&self, f: impl FnOnce(&mut E) -> R) -> R {
        let mut guard = self.stderr.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }
}

fn put<W: Write>(writer: &Mutex<W>, byte: u8, flush: bool) -> io::Result<()> {
    let mut guard = writer.lock().unwrap_or_else(|e| e.into_inner());
    guard.write_all(&[byte])?;
    if flush {
        guard.flush()?;
    }
    Ok(())
}

impl<O: Write + Send, E: Write + Send> HostWrite for StdHost<O, E> {
    fn host_write(&self, channel: Channel, byte: u8) -> Result<(), HostBoundaryError> {
        let result = match channel {
            Channel::Normal => put(&self.stdout, byte, self.autoflush),
            Channel::Error => put(&self.stderr, byte, self.autoflush),
        };
        result.map_err(|source| HostBoundaryError::faulted(channel, source))
    }
}

/// Console pair over the process streams.
pub fn stdio_console(autoflush: bool) -> Console<StdHost> {
    Console::new(StdHost::default().autoflush(autoflush))
}
