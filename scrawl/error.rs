use std::{
   io,
   path::PathBuf,
   result,
};

/// A type alias for concise use of [`Error`].
pub type Result<T> = result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
   #[error("invalid style descriptor '{descriptor}': {reason}")]
   InvalidStyle {
      descriptor: String,
      reason:     &'static str,
   },

   #[error("failed to write output")]
   Write(#[from] io::Error),

   #[error("failed to read input")]
   Read(#[source] io::Error),

   #[error("failed to read config from '{path}'", path = .path.display())]
   ConfigRead {
      path:   PathBuf,
      #[source]
      source: io::Error,
   },

   #[error("failed to parse config")]
   Config(#[from] toml::de::Error),
}
