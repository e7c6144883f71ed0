use std::sync::Arc;

use derive_more::From;

use crate::{Channel, HostBoundaryError};

/// The host-side write primitive a sink forwards to.
///
/// One call hands over one byte for one channel. How the byte is rendered,
/// buffered or flushed is up to the implementor. Implementors must be
/// shareable across threads because both sinks of a console usually alias the
/// same host.
pub trait HostWrite: Send + Sync {
    fn host_write(&self, channel: Channel, byte: u8) -> Result<(), HostBoundaryError>;
}

impl<T: HostWrite + ?Sized> HostWrite for &T {
    fn host_write(&self, channel: Channel, byte: u8) -> Result<(), HostBoundaryError> {
        (**self).host_write(channel, byte)
    }
}

impl<T: HostWrite + ?Sized> HostWrite for Arc<T> {
    fn host_write(&self, channel: Channel, byte: u8) -> Result<(), HostBoundaryError> {
        (**self).host_write(channel, byte)
    }
}

impl<T: HostWrite + ?Sized> HostWrite for Box<T> {
    fn host_write(&self, channel: Channel, byte: u8) -> Result<(), HostBoundaryError> {
        (**self).host_write(channel, byte)
    }
}

/// Adapts a plain function or closure into a [`HostWrite`].
#[derive(Debug, Clone, Copy, From)]
pub struct HostFn<F>(F);

impl<F> HostFn<F>
where
    F: Fn(Channel, u8) -> Result<(), HostBoundaryError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> HostWrite for HostFn<F>
where
    F: Fn(Channel, u8) -> Result<(), HostBoundaryError> + Send + Sync,
{
    fn host_write(&self, channel: Channel, byte: u8) -> Result<(), HostBoundaryError> {
        (self.0)(channel, byte)
    }
}
