use std::sync::{Arc, RwLock};

use hostcon_domain::{Channel, HostBoundaryError, HostFn, HostWrite};
use tracing::debug;

type Slot = Option<Arc<dyn HostWrite>>;

/// Callback table with one slot per channel.
///
/// The embedder binds a primitive per channel and may tear it down at any
/// time. Writes addressed to an empty slot fail with
/// [`HostBoundaryError::Unavailable`]; rebinding makes the channel usable again
/// for the same sinks.
#[derive(Clone, Default)]
pub struct HostTable {
    slots: Arc<RwLock<[Slot; 2]>>,
}

fn index(channel: Channel) -> usize {
    usize::from(channel.is_error())
}

impl HostTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `host` for `channel`, replacing any previous binding.
    pub fn bind(&self, channel: Channel, host: impl HostWrite + 'static) {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        let replaced = slots[index(channel)].replace(Arc::new(host)).is_some();
        debug!(%channel, replaced, "Host primitive bound");
    }

    /// Installs a closure for `channel`.
    pub fn bind_fn<F>(&self, channel: Channel, f: F)
    where
        F: Fn(Channel, u8) -> Result<(), HostBoundaryError> + Send + Sync + 'static,
    {
        self.bind(channel, HostFn::new(f));
    }

    /// Tears down the binding for `channel`. Returns whether one existed.
    pub fn unbind(&self, channel: Channel) -> bool {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        let existed = slots[index(channel)].take().is_some();
        debug!(%channel, existed, "Host primitive unbound");
        existed
    }

    pub fn is_bound(&self, channel: Channel) -> bool {
        self.slot(channel).is_some()
    }

    fn slot(&self, channel: Channel) -> Slot {
        let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
        slots[index(channel)].clone()
    }
}

impl std::fmt::Debug for HostTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostTable")
            .field("normal", &self.is_bound(Channel::Normal))
            .field("error", &self.is_bound(Channel::Error))
            .finish()
    }
}

impl HostWrite for HostTable {
    fn host_write(&self, channel: Channel, byte: u8) -> Result<(), HostBoundaryError> {
        // The lock is released before calling out so a slow host cannot block
        // rebinding.
        let host = self
            .slot(channel)
            .ok_or_else(|| HostBoundaryError::unavailable(channel))?;
        host.host_write(channel, byte)
    }
}
