//! Byte sinks that forward managed-code console output to a host.
//!
//! A [`ConsoleSink`] is bound to one [`Channel`] and hands every byte it
//! receives to a [`HostWrite`] primitive supplied by the embedder.

mod channel;
mod console;
mod error;
mod host;
mod sink;

pub use channel::*;
pub use console::*;
pub use error::*;
pub use host::*;
pub use sink::*;
