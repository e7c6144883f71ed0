use std::sync::{Arc, Mutex, MutexGuard};

use hostcon_domain::{Channel, HostBoundaryError, HostWrite};

/// In-memory host that records every `(channel, byte)` call in arrival order.
///
/// Cloning yields another handle to the same record, so the embedder can keep
/// one while the sinks own the others.
#[derive(Debug, Clone, Default)]
pub struct CaptureHost {
    calls: Arc<Mutex<Vec<(Channel, u8)>>>,
}

impl CaptureHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self) -> MutexGuard<'_, Vec<(Channel, u8)>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Every call seen so far, interleaved across channels.
    pub fn calls(&self) -> Vec<(Channel, u8)> {
        self.record().clone()
    }

    /// Bytes seen on one channel.
    pub fn bytes(&self, channel: Channel) -> Vec<u8> {
        self.record()
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, b)| *b)
            .collect()
    }

    /// Bytes seen on one channel decoded as UTF-8, replacing invalid
    /// sequences.
    pub fn text(&self, channel: Channel) -> String {
        String::from_utf8_lossy(&self.bytes(channel)).into_owned()
    }

    pub fn len(&self) -> usize {
        self.record().len()
    }

    pub fn is_empty(&self) -> bool {
        self.record().is_empty()
    }

    /// Drains the record.
    pub fn take(&self) -> Vec<(Channel, u8)> {
        std::mem::take(&mut *self.record())
    }
}

impl HostWrite for CaptureHost {
    fn host_write(&self, channel: Channel, byte: u8) -> Result<(), HostBoundaryError> {
        self.record().push((channel, byte));
        Ok(())
    }
}
