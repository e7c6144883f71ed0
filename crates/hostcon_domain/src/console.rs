use std::io::{self, Write};

use crate::{Channel, ConsoleSink, HostWrite};

/// Trait for two-channel output writing.
/// Provides two output channels (primary and error) with flush support.
/// Implementors must ensure thread-safe writes.
pub trait ConsoleWriter: Send + Sync {
    /// Writes bytes to primary output.
    fn write(&self, buf: &[u8]) -> io::Result<usize>;
    /// Writes bytes to error output.
    fn write_err(&self, buf: &[u8]) -> io::Result<usize>;
    /// Flushes primary output.
    fn flush(&self) -> io::Result<()>;
    /// Flushes error output.
    fn flush_err(&self) -> io::Result<()>;
}

/// The NORMAL and ERROR sinks of one host, created together.
#[derive(Debug)]
pub struct Console<H> {
    out: ConsoleSink<H>,
    err: ConsoleSink<H>,
}

impl<H: Clone> Console<H> {
    pub fn new(host: H) -> Self {
        Self {
            out: ConsoleSink::new(Channel::Normal, host.clone()),
            err: ConsoleSink::new(Channel::Error, host),
        }
    }
}

impl<H> Console<H> {
    pub fn out(&self) -> &ConsoleSink<H> {
        &self.out
    }

    pub fn err(&self) -> &ConsoleSink<H> {
        &self.err
    }

    pub fn sink(&self, channel: Channel) -> &ConsoleSink<H> {
        match channel {
            Channel::Normal => &self.out,
            Channel::Error => &self.err,
        }
    }
}

impl<H: HostWrite> ConsoleWriter for Console<H> {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        self.out().write(buf)
    }

    fn write_err(&self, buf: &[u8]) -> io::Result<usize> {
        self.err().write(buf)
    }

    fn flush(&self) -> io::Result<()> {
        self.out().flush()
    }

    fn flush_err(&self) -> io::Result<()> {
        self.err().flush()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::HostFn;

    type Calls = Arc<Mutex<Vec<(Channel, u8)>>>;

    fn fixture_console() -> (Console<Arc<dyn HostWrite>>, Calls) {
        let calls: Calls = Default::default();
        let recorded = calls.clone();
        let host: Arc<dyn HostWrite> = Arc::new(HostFn::new(move |channel, byte| {
            recorded.lock().unwrap().push((channel, byte));
            Ok(())
        }));
        (Console::new(host), calls)
    }

    #[test]
    fn test_sinks_are_bound_to_their_channels() {
        let (console, _) = fixture_console();

        let actual = [
            console.out().channel(),
            console.err().channel(),
            console.sink(Channel::Error).channel(),
        ];
        let expected = [Channel::Normal, Channel::Error, Channel::Error];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_console_writer_routes_by_channel() {
        let (console, calls) = fixture_console();

        ConsoleWriter::write(&console, b"ok").unwrap();
        console.write_err(b"!").unwrap();
        ConsoleWriter::flush(&console).unwrap();
        console.flush_err().unwrap();

        let actual = calls.lock().unwrap().clone();
        let expected = vec![
            (Channel::Normal, b'o'),
            (Channel::Normal, b'k'),
            (Channel::Error, b'!'),
        ];
        assert_eq!(actual, expected);
    }
}
