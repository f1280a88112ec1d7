use std::{
   error,
   io,
   path::PathBuf,
   process::ExitCode,
};

use clap::Parser as _;
use scrawl::{
   Config,
   Console,
   Sink,
   sink::StreamSink,
   style::{
      Codes,
      Style,
   },
};
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
#[command(version, about)]
struct Cli {
   /// Text to print. Read from standard input when omitted.
   text: Vec<String>,

   /// SGR codes to style the text with, like "1;31".
   #[arg(long)]
   style: Option<Codes>,

   /// Spaces to indent every line with.
   #[arg(long)]
   indent: Option<usize>,

   /// Column to wrap at. Defaults to the terminal width.
   #[arg(long)]
   width: Option<usize>,

   /// Path to a TOML configuration file.
   #[arg(long)]
   config: Option<PathBuf>,

   /// Emit styles even when not writing to a terminal.
   #[arg(long)]
   force_tty: bool,

   /// Do not end the output with a newline.
   #[arg(long, short = 'n')]
   no_newline: bool,
}

fn run(cli: Cli) -> scrawl::Result<()> {
   let config = match cli.config {
      Some(ref path) => Config::read(path)?,
      None => Config::default(),
   };

   let mut sink = StreamSink::stdout();
   sink.configure(&config);

   print(cli, &config, sink, io::stdin())?;
   Ok(())
}

/// Prints the text of the command line, or the input when there is none, to
/// the sink and hands the sink back.
fn print<S: Sink>(
   cli: Cli,
   config: &Config,
   mut sink: S,
   input: impl io::Read,
) -> scrawl::Result<S> {
   if cli.force_tty {
      sink.force_tty();
   }

   let mut console = Console::new(sink);
   console.configure(config);

   if let Some(width) = cli.width {
      console.set_wrap_column(width);
   }

   if let Some(indent) = cli.indent {
      console.set_indent(indent);
   }

   let text = if cli.text.is_empty() {
      io::read_to_string(input).map_err(scrawl::Error::Read)?
   } else {
      cli.text.join(" ")
   };

   let text = text.strip_suffix('\n').unwrap_or(&text);

   match (cli.style, cli.no_newline) {
      (Some(style), false) => console.output_line_styled(style, text)?,
      (Some(style), true) => console.output_styled(style, text)?,
      (None, false) => console.output_line(text)?,
      (None, true) => console.output(text)?,
   }

   Ok(console.into_sink())
}

fn report(error: &scrawl::Error) -> scrawl::Result<()> {
   let mut err = Console::new(StreamSink::stderr());

   err.output_styled(Style::new().red().bold(), "error:")?;
   err.output_line(&format!(" {error}"))?;

   let mut source = error::Error::source(error);
   while let Some(cause) = source {
      err.set_indent(3);
      err.output_styled(Style::new().red(), "cause:")?;
      err.output_line(&format!(" {cause}"))?;

      source = cause.source();
   }

   Ok(())
}

fn main() -> ExitCode {
   let filter = EnvFilter::try_from_env("SCRAWL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

   tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_writer(io::stderr)
      .init();

   let Err(error) = run(Cli::parse()) else {
      return ExitCode::SUCCESS;
   };

   tracing::debug!(?error, "failed");

   if report(&error).is_err() {
      eprintln!("error: {error}");
   }

   ExitCode::FAILURE
}
