mod cli;
pub mod logging;
mod run;

pub use cli::Cli;
pub use run::{pipe, run};
