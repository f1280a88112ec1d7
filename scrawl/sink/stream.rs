use std::{
   cell::OnceCell,
   env,
   fs,
   io::{
      self,
      IsTerminal as _,
      Write as _,
   },
   path::{
      Path,
      PathBuf,
   },
};

use super::{
   DEFAULT_COLUMNS,
   DEFAULT_MARGIN,
   Sink,
   with_margin,
};
use crate::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
   Stdout,
   Stderr,
   /// A file that is opened in append mode for every write.
   File(PathBuf),
}

/// A sink writing to a standard stream or a file.
#[derive(Debug)]
pub struct StreamSink {
   target: Target,

   tty:    OnceCell<bool>,
   forced: bool,

   margin:          usize,
   default_columns: usize,
}

impl StreamSink {
   #[must_use]
   pub fn new(target: Target) -> Self {
      Self {
         target,

         tty: OnceCell::new(),
         forced: false,

         margin: DEFAULT_MARGIN,
         default_columns: DEFAULT_COLUMNS,
      }
   }

   /// Constructs a new [`StreamSink`] to the standard output of the current
   /// process.
   #[must_use]
   pub fn stdout() -> Self {
      Self::new(Target::Stdout)
   }

   /// Constructs a new [`StreamSink`] to the standard error of the current
   /// process.
   #[must_use]
   pub fn stderr() -> Self {
      Self::new(Target::Stderr)
   }

   #[must_use]
   pub fn file(path: impl Into<PathBuf>) -> Self {
      Self::new(Target::File(path.into()))
   }

   #[must_use]
   pub fn target(&self) -> &Target {
      &self.target
   }

   pub fn configure(&mut self, config: &Config) {
      if let Some(margin) = config.margin {
         self.margin = margin;
      }

      if let Some(default_columns) = config.default_columns {
         self.default_columns = default_columns;
      }

      if config.force_tty {
         self.force_tty();
      }
   }

   fn open(path: &Path) -> io::Result<fs::File> {
      fs::OpenOptions::new().create(true).append(true).open(path)
   }

   fn is_tty(&self) -> bool {
      self.forced || *self.tty.get_or_init(|| self.probe_tty())
   }

   fn probe_tty(&self) -> bool {
      let tty = match self.target {
         Target::Stdout => io::stdout().is_terminal(),
         Target::Stderr => io::stderr().is_terminal(),
         Target::File(ref path) => Self::open(path).is_ok_and(|file| file.is_terminal()),
      };

      tracing::debug!(destination = ?self.target, tty, "probed terminal");
      tty
   }

   fn terminal_columns(&self) -> Option<usize> {
      let size = match self.target {
         Target::Stdout => terminal_size::terminal_size_of(io::stdout()),
         Target::Stderr => terminal_size::terminal_size_of(io::stderr()),
         Target::File(ref path) => {
            Self::open(path)
               .ok()
               .and_then(|file| terminal_size::terminal_size_of(&file))
         },
      };

      size.map(|(width, _)| usize::from(width.0))
   }
}

impl Sink for StreamSink {
   fn columns_hint(&self) -> usize {
      if !self.is_tty() {
         return self.default_columns;
      }

      if let Some(columns) = self.terminal_columns() {
         return with_margin(columns, self.margin);
      }

      match env::var("COLUMNS").ok().and_then(|columns| columns.trim().parse().ok()) {
         Some(columns) => with_margin(columns, self.margin),

         None => {
            tracing::debug!(
               default = self.default_columns,
               "no terminal width available, using default"
            );
            self.default_columns
         },
      }
   }

   fn supports_colors(&self) -> bool {
      self.is_tty()
   }

   fn write_partial_line(&mut self, text: &str) -> io::Result<()> {
      match self.target {
         Target::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()
         },

         Target::Stderr => {
            let mut stderr = io::stderr().lock();
            stderr.write_all(text.as_bytes())?;
            stderr.flush()
         },

         Target::File(ref path) => Self::open(path)?.write_all(text.as_bytes()),
      }
   }

   fn force_tty(&mut self) {
      self.forced = true;
   }
}
