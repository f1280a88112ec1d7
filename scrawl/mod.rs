//! Word-wrapped, indented and styled terminal output that stays correct when
//! a line is built from many partial writes.

#![allow(unstable_name_collisions)] // Itertools::intersperse

mod config;
pub use config::Config;

mod console;
pub use console::Console;

mod error;
pub use error::{
   Error,
   Result,
};

pub mod sink;
pub use sink::Sink;

pub mod style;

pub mod wrap;
pub use wrap::Wrapper;
