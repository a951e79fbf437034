//! Global `tracing` subscriber with a filter that can be swapped once the
//! settings file has been read.

mod logger;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
