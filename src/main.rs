mod checks;
mod commands;
mod core;
mod golang;
mod graph;
mod utils;

use clap::Parser;
use commands::TestArgs;
use crate::core::error::{AffectedError, print_error};
use std::path::PathBuf;

/// Run `go test` only for packages affected by changes since a branch
#[derive(Parser, Debug)]
#[command(name = "go-affected")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Branch to compare against; changes are taken since HEAD forked from it
  #[arg(long)]
  head: Option<String>,

  /// Entrypoint packages (file, directory or import path); comma separated, repeatable
  #[arg(long, value_delimiter = ',')]
  entrypoints: Vec<String>,

  /// Flags passed to go test, split on whitespace
  #[arg(long, allow_hyphen_values = true)]
  go_test_flags: Option<String>,

  /// Namespace filter for the import walk: contains (default), prefix
  #[arg(long)]
  namespace: Option<String>,

  /// Show the plan and the go test command without executing it
  #[arg(long)]
  dry_run: bool,

  /// Plan output format: text (default), json, names. json and names never run tests
  #[arg(long, default_value = "text")]
  format: String,

  /// Config file (default: go-affected.toml discovery in the working directory)
  #[arg(long)]
  config: Option<PathBuf>,

  /// Additional arguments passed to go test as-is (after `--`)
  #[arg(last = true, allow_hyphen_values = true)]
  go_test_args: Vec<String>,
}

impl Cli {
  fn into_parts(self) -> (Option<PathBuf>, TestArgs) {
    let args = TestArgs {
      head: self.head,
      entrypoints: self.entrypoints,
      go_test_flags: self.go_test_flags,
      namespace: self.namespace,
      dry_run: self.dry_run,
      format: self.format,
      go_test_args: self.go_test_args,
    };
    (self.config, args)
  }
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let (config_path, args) = Cli::parse().into_parts();

  let root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  let ctx = match crate::core::context::RunContext::build(&root, config_path.as_deref()) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  match commands::run_test(&ctx, args) {
    Ok(Some(outcome)) if !outcome.success() => {
      // Killed by a signal: no code to forward
      std::process::exit(outcome.code.unwrap_or(1));
    }
    Ok(_) => {}
    Err(err) => handle_error(err),
  }
}

fn handle_error(err: AffectedError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
