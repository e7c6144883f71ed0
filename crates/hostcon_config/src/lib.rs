mod error;
mod loader;
mod settings;

pub use error::*;
pub use loader::*;
pub use settings::*;
