//! Line-oriented front end that drives one service instance.

mod command;
mod runner;

pub use command::*;
pub use runner::*;
