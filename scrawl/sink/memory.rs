use std::io;

use super::{
   DEFAULT_COLUMNS,
   Sink,
};

/// Records every write in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
   columns: usize,
   colors:  bool,
   writes:  Vec<String>,
}

impl MemorySink {
   #[must_use]
   pub fn new(columns: usize) -> Self {
      Self {
         columns,
         colors: false,
         writes: Vec::new(),
      }
   }

   #[must_use]
   pub fn with_colors(mut self, colors: bool) -> Self {
      self.colors = colors;
      self
   }

   /// Each write in order, as it was received.
   #[must_use]
   pub fn writes(&self) -> &[String] {
      &self.writes
   }

   /// Everything written so far.
   #[must_use]
   pub fn contents(&self) -> String {
      self.writes.concat()
   }
}

impl Sink for MemorySink {
   fn columns_hint(&self) -> usize {
      self.columns
   }

   fn supports_colors(&self) -> bool {
      self.colors
   }

   fn write_partial_line(&mut self, text: &str) -> io::Result<()> {
      self.writes.push(text.to_owned());
      Ok(())
   }

   fn force_tty(&mut self) {
      self.colors = true;
   }
}

/// Discards everything written to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullSink {
   tty: bool,
}

impl NullSink {
   #[must_use]
   pub fn new() -> Self {
      Self::default()
   }
}

impl Sink for NullSink {
   fn columns_hint(&self) -> usize {
      DEFAULT_COLUMNS
   }

   fn supports_colors(&self) -> bool {
      self.tty
   }

   fn write_partial_line(&mut self, _text: &str) -> io::Result<()> {
      Ok(())
   }

   fn force_tty(&mut self) {
      self.tty = true;
   }
}
