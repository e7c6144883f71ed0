use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use hostcon_domain::Channel;

/// Pipe bytes into a host console channel, one byte per host call.
#[derive(Parser, Debug)]
#[command(name = "hostcon", version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Text to send, joined with spaces and terminated by a newline.
    ///
    /// When omitted, all of stdin is sent as is.
    pub text: Vec<String>,

    /// Channel to write to.
    #[arg(long, short = 'c', default_value = "normal", conflicts_with = "fd")]
    pub channel: Channel,

    /// Managed runtime descriptor to write to (1 = normal, 2 = error).
    #[arg(long)]
    pub fd: Option<i32>,

    /// Path to a TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Resolves the target channel, routing `--fd` when given.
    pub fn target(&self) -> Result<Channel> {
        match self.fd {
            Some(fd) => match Channel::from_fd(fd) {
                Some(channel) => Ok(channel),
                None => bail!("Descriptor {fd} is not a console channel"),
            },
            None => Ok(self.channel),
        }
    }

    /// Bytes to send: the text arguments, or everything `input` yields.
    pub fn payload(&self, mut input: impl Read) -> Result<Vec<u8>> {
        if !self.text.is_empty() {
            let mut line = self.text.join(" ");
            line.push('\n');
            return Ok(line.into_bytes());
        }

        let mut buf = Vec::new();
        input.read_to_end(&mut buf).context("Failed to read stdin")?;
        Ok(buf)
    }
}
