use crate::{
   Config,
   Result,
   Sink,
   Wrapper,
   style::{
      self,
      Codes,
   },
};

/// Writes wrapped, indented and optionally styled text to a [`Sink`].
///
/// Partial lines written with [`Console::output`] continue where the previous
/// write stopped, so a line can be assembled from several calls without
/// changing where it wraps.
#[derive(Debug)]
pub struct Console<S: Sink> {
   sink:    S,
   wrapper: Wrapper,
}

impl<S: Sink> Console<S> {
   /// Creates a console wrapping at the sink's column hint.
   pub fn new(sink: S) -> Self {
      let wrapper = Wrapper::new(sink.columns_hint());

      tracing::debug!(wrap_column = wrapper.wrap_column(), "created console");

      Self { sink, wrapper }
   }

   /// Applies the wrap column and indent of a config, leaving the current
   /// values in place for absent fields.
   pub fn configure(&mut self, config: &Config) {
      if let Some(wrap_column) = config.wrap_column {
         self.set_wrap_column(wrap_column);
      }

      if let Some(indent) = config.indent {
         self.set_indent(indent);
      }

      if config.force_tty {
         self.sink.force_tty();
      }
   }

   pub fn sink(&self) -> &S {
      &self.sink
   }

   pub fn sink_mut(&mut self) -> &mut S {
      &mut self.sink
   }

   pub fn into_sink(self) -> S {
      self.sink
   }

   #[must_use]
   pub fn wrap_column(&self) -> usize {
      self.wrapper.wrap_column()
   }

   pub fn set_wrap_column(&mut self, wrap_column: usize) {
      self.wrapper.set_wrap_column(wrap_column);
   }

   /// Re-reads the wrap column from the sink, for example after a resize.
   pub fn set_wrap_from_sink(&mut self) {
      self.wrapper.set_wrap_column(self.sink.columns_hint());
   }

   #[must_use]
   pub fn indent(&self) -> usize {
      self.wrapper.indent()
   }

   pub fn set_indent(&mut self, indent: usize) {
      self.wrapper.set_indent(indent);
   }

   /// Changes the indent by `delta`, stopping at zero.
   pub fn add_indent(&mut self, delta: isize) {
      self.wrapper.set_indent(self.wrapper.indent().saturating_add_signed(delta));
   }

   /// The column the next character will be placed at.
   #[must_use]
   pub fn column(&self) -> usize {
      self.wrapper.column()
   }

   /// Writes text without ending the line.
   pub fn output(&mut self, text: &str) -> Result<()> {
      let rendered = self.render(None, text);
      self.write(&rendered)
   }

   /// Writes styled text without ending the line.
   pub fn output_styled(&mut self, style: impl Into<Codes>, text: &str) -> Result<()> {
      let rendered = self.render(Some(&style.into()), text);
      self.write(&rendered)
   }

   /// Writes text and ends the line.
   pub fn output_line(&mut self, text: &str) -> Result<()> {
      let rendered = self.render(None, text) + "\n";
      self.write_line(&rendered)
   }

   /// Writes styled text and ends the line. The newline is placed after the
   /// style reset.
   pub fn output_line_styled(&mut self, style: impl Into<Codes>, text: &str) -> Result<()> {
      let rendered = self.render(Some(&style.into()), text) + "\n";
      self.write_line(&rendered)
   }

   /// Ends the current line if one is in progress, then writes an empty line.
   pub fn output_blank_line(&mut self) -> Result<()> {
      let count = if self.wrapper.column() == 0 { 1 } else { 2 };
      self.wrapper.reset_column();

      tracing::trace!(count, "writing blank line");

      self.sink.write_empty_lines(count)?;
      Ok(())
   }

   fn render(&mut self, codes: Option<&Codes>, text: &str) -> String {
      let wrapped = self.wrapper.wrap(text);

      match codes {
         Some(codes) if self.sink.supports_colors() => {
            let mut rendered = codes.escape();
            rendered.push_str(&wrapped);
            rendered.push_str(style::reset());
            rendered
         },

         _ => wrapped,
      }
   }

   fn write(&mut self, rendered: &str) -> Result<()> {
      tracing::trace!(bytes = rendered.len(), column = self.wrapper.column(), "writing");

      self.sink.write_partial_line(rendered)?;
      Ok(())
   }

   fn write_line(&mut self, rendered: &str) -> Result<()> {
      let result = self.write(rendered);
      self.wrapper.reset_column();
      result
   }
}
