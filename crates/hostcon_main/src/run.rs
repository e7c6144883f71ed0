use std::io::{Read, Write};

use anyhow::{Context, Result};
use hostcon_config::{HostKind, HostconConfig};
use hostcon_domain::{Channel, Console, ConsoleSink, HostBoundaryError, HostWrite};
use hostcon_infra::{CaptureHost, StdHost};
use tracing::{debug, info};

use crate::Cli;

/// Sends `payload` through `sink`, one `write_byte` per byte. Returns how many
/// bytes the host accepted.
pub fn pipe<H: HostWrite>(
    sink: &ConsoleSink<H>,
    payload: &[u8],
) -> Result<usize, HostBoundaryError> {
    for byte in payload {
        sink.write_byte(*byte)?;
    }
    Ok(payload.len())
}

/// Runs one invocation against the host selected by `config`.
pub fn run(cli: &Cli, config: &HostconConfig, input: impl Read) -> Result<()> {
    let channel = cli.target()?;
    let payload = cli.payload(input)?;
    debug!(%channel, bytes = payload.len(), host = ?config.host, "Sending payload");

    match config.host {
        HostKind::Stdio => {
            let host = StdHost::default().autoflush(config.autoflush);
            let console = Console::new(host.clone());
            let sent = send(&console, channel, &payload);
            settle(&host, sent)?;
        }
        HostKind::Capture => {
            let capture = CaptureHost::new();
            let console = Console::new(capture.clone());
            send(&console, channel, &payload)?;
            info!(
                %channel,
                bytes = capture.len(),
                text = %capture.text(channel),
                "Captured console output"
            );
        }
    }

    Ok(())
}

fn send<H: HostWrite>(console: &Console<H>, channel: Channel, payload: &[u8]) -> Result<()> {
    let sent = pipe(console.sink(channel), payload)
        .with_context(|| format!("Failed writing to the {channel} channel"))?;
    debug!(%channel, sent, "Payload delivered");
    Ok(())
}

/// Flushes both host streams once the payload is through. A failed send is
/// reported ahead of a failed flush.
fn settle<O: Write, E: Write>(host: &StdHost<O, E>, sent: Result<()>) -> Result<()> {
    let flushed = host
        .with_stdout(|w| w.flush())
        .context("Failed to flush stdout")
        .and_then(|()| host.with_stderr(|w| w.flush()).context("Failed to flush stderr"));
    sent?;
    flushed
}
