//! Destinations for finished output.

use std::io;

mod memory;
pub use memory::{
   MemorySink,
   NullSink,
};

mod stream;
pub use stream::{
   StreamSink,
   Target,
};

/// Width used when the destination is not a terminal or reports no size.
pub const DEFAULT_COLUMNS: usize = 78;

/// Columns left free on the right of a terminal.
pub const DEFAULT_MARGIN: usize = 2;

/// The capabilities a [`crate::Console`] needs from its destination.
pub trait Sink {
   /// Best-effort line width of the destination.
   fn columns_hint(&self) -> usize;

   /// Whether escape sequences should be emitted.
   fn supports_colors(&self) -> bool;

   /// Appends the text as-is, without a trailing newline.
   fn write_partial_line(&mut self, text: &str) -> io::Result<()>;

   fn write_empty_lines(&mut self, count: usize) -> io::Result<()> {
      self.write_partial_line(&"\n".repeat(count))
   }

   /// Makes the sink behave as if it were writing to a terminal.
   fn force_tty(&mut self);
}

impl<S: Sink + ?Sized> Sink for &mut S {
   fn columns_hint(&self) -> usize {
      (**self).columns_hint()
   }

   fn supports_colors(&self) -> bool {
      (**self).supports_colors()
   }

   fn write_partial_line(&mut self, text: &str) -> io::Result<()> {
      (**self).write_partial_line(text)
   }

   fn write_empty_lines(&mut self, count: usize) -> io::Result<()> {
      (**self).write_empty_lines(count)
   }

   fn force_tty(&mut self) {
      (**self).force_tty();
   }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
   fn columns_hint(&self) -> usize {
      (**self).columns_hint()
   }

   fn supports_colors(&self) -> bool {
      (**self).supports_colors()
   }

   fn write_partial_line(&mut self, text: &str) -> io::Result<()> {
      (**self).write_partial_line(text)
   }

   fn write_empty_lines(&mut self, count: usize) -> io::Result<()> {
      (**self).write_empty_lines(count)
   }

   fn force_tty(&mut self) {
      (**self).force_tty();
   }
}

/// Subtracts the margin from a reported width, unless the width is too
/// small to spare it.
#[must_use]
pub fn with_margin(columns: usize, margin: usize) -> usize {
   if columns > margin {
      columns - margin
   } else {
      columns
   }
}
