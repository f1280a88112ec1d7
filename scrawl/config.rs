use std::{
   fs,
   path::Path,
};

use crate::{
   Error,
   Result,
};

/// Output settings, usually read from a TOML file.
///
/// ```toml
/// wrap-column     = 72
/// indent          = 2
/// margin          = 2
/// default-columns = 78
/// force-tty       = false
/// ```
#[derive(serde::Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
   /// Fixed wrap column. Taken from the sink when absent.
   pub wrap_column: Option<usize>,

   pub indent: Option<usize>,

   /// Columns subtracted from a terminal's width.
   pub margin: Option<usize>,

   /// Width used when the destination is not a terminal.
   pub default_columns: Option<usize>,

   pub force_tty: bool,
}

impl Config {
   pub fn from_toml(source: &str) -> Result<Self> {
      Ok(toml::from_str(source)?)
   }

   pub fn read(path: impl AsRef<Path>) -> Result<Self> {
      let path = path.as_ref();

      let source = fs::read_to_string(path).map_err(|source| {
         Error::ConfigRead {
            path: path.to_owned(),
            source,
         }
      })?;

      tracing::debug!(path = %path.display(), "read config");

      Self::from_toml(&source)
   }
}
