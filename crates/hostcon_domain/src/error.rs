use std::io;

use thiserror::Error;

use crate::Channel;

/// The host could not accept a byte. Every variant carries the channel the
/// byte was addressed to; none of them is retried by the sink.
#[derive(Debug, Error)]
pub enum HostBoundaryError {
    #[error("No host primitive is bound for the {channel} channel")]
    Unavailable { channel: Channel },

    #[error("Host rejected a write on the {channel} channel: {reason}")]
    Rejected { channel: Channel, reason: String },

    #[error("Host boundary faulted on the {channel} channel")]
    Faulted { channel: Channel, source: io::Error },
}

impl HostBoundaryError {
    pub fn unavailable(channel: Channel) -> Self {
        Self::Unavailable { channel }
    }

    pub fn rejected(channel: Channel, reason: impl Into<String>) -> Self {
        Self::Rejected { channel, reason: reason.into() }
    }

    pub fn faulted(channel: Channel, source: io::Error) -> Self {
        Self::Faulted { channel, source }
    }

    pub fn channel(&self) -> Channel {
        match self {
            Self::Unavailable { channel }
            | Self::Rejected { channel, .. }
            | Self::Faulted { channel, .. } => *channel,
        }
    }

    /// Kind reported when this error crosses into `io`. Never `Interrupted`,
    /// which `write_all` would silently retry.
    pub fn io_kind(&self) -> io::ErrorKind {
        match self {
            Self::Unavailable { .. } => io::ErrorKind::NotConnected,
            Self::Rejected { .. } => io::ErrorKind::Other,
            Self::Faulted { source, .. } if source.kind() == io::ErrorKind::Interrupted => {
                io::ErrorKind::Other
            }
            Self::Faulted { source, .. } => source.kind(),
        }
    }
}

impl From<HostBoundaryError> for io::Error {
    fn from(error: HostBoundaryError) -> Self {
        io::Error::new(error.io_kind(), error)
    }
}

/// A bulk write stopped early. `written` bytes reached the host before
/// `source` failed; nothing after it was attempted.
#[derive(Debug, Error)]
#[error("Wrote {written} byte(s) before the host failed")]
pub struct PartialWrite {
    pub written: usize,
    #[source]
    pub source: HostBoundaryError,
}

impl From<PartialWrite> for io::Error {
    fn from(error: PartialWrite) -> Self {
        io::Error::new(error.source.io_kind(), error)
    }
}

pub type Result<A> = std::result::Result<A, HostBoundaryError>;
