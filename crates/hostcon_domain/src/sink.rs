use std::fmt;
use std::io;
use std::sync::{Mutex, MutexGuard};

use crate::{Channel, HostBoundaryError, HostWrite, PartialWrite};

/// Byte sink permanently bound to one console channel.
///
/// Every byte is handed to the host primitive as soon as it is received, in
/// call order. The sink keeps no buffer and has no terminal state: a host
/// failure fails the call that hit it and nothing else.
///
/// The internal lock only serializes callers of the same sink, so that a bulk
/// write from one thread is never split by bytes from another. Sinks never
/// share it, not even when they alias the same host.
pub struct ConsoleSink<H> {
    channel: Channel,
    host: H,
    lock: Mutex<()>,
}

impl<H> ConsoleSink<H> {
    /// Creates a sink for `channel`. Performs no I/O.
    pub fn new(channel: Channel, host: H) -> Self {
        Self { channel, host, lock: Mutex::new(()) }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<H: HostWrite> ConsoleSink<H> {
    /// Hands exactly one byte to the host for this sink's channel.
    pub fn write_byte(&self, value: u8) -> Result<(), HostBoundaryError> {
        let _guard = self.guard();
        self.host.host_write(self.channel, value)
    }

    /// Entry point for managed code that passes bytes as `int`. Only the low
    /// eight bits are delivered.
    pub fn write_int(&self, value: i32) -> Result<(), HostBoundaryError> {
        self.write_byte((value & 0xFF) as u8)
    }

    /// Same as calling [`Self::write_byte`] for each byte in order, except that
    /// no other caller of this sink can slip in between. Stops at the first
    /// failure.
    pub fn write_bytes(&self, bytes: &[u8]) -> Result<(), PartialWrite> {
        let _guard = self.guard();
        self.dispatch_all(bytes)
            .map_err(|(written, source)| PartialWrite { written, source })
    }

    fn dispatch_all(&self, bytes: &[u8]) -> Result<(), (usize, HostBoundaryError)> {
        for (written, byte) in bytes.iter().enumerate() {
            self.host
                .host_write(self.channel, *byte)
                .map_err(|error| (written, error))?;
        }
        Ok(())
    }
}

impl<H> fmt::Debug for ConsoleSink<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleSink")
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}

impl<H: HostWrite> io::Write for &ConsoleSink<H> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let _guard = self.guard();
        match self.dispatch_all(buf) {
            Ok(()) => Ok(buf.len()),
            Err((0, error)) => Err(error.into()),
            // Any failure is an `Err`. Bytes already delivered are counted in
            // `PartialWrite`.
            Err((written, source)) => Err(PartialWrite { written, source }.into()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<H: HostWrite> io::Write for ConsoleSink<H> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (&*self).flush()
    }
}
