mod capture;
mod std_host;
mod table;

pub use capture::CaptureHost;
pub use std_host::{StdHost, stdio_console};
pub use table::HostTable;
