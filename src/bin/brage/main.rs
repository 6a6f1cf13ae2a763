mod args;
mod build;
mod debug;
mod error;
mod new;
mod serve;

use std::io::Write as _;

use clap::Parser as _;
use clap_verbosity_flag::InfoLevel;

use crate::error::Result;

/// A simple static site generator
#[derive(Debug, clap::Parser)]
#[command(name = "brage", about, version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<InfoLevel>,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    New(new::NewArgs),
    Build(build::BuildArgs),
    Serve(serve::ServeArgs),
    #[command(subcommand)]
    Debug(debug::DebugCommands),
}

impl Command {
    fn run(&self) -> Result<()> {
        match self {
            Self::New(cmd) => cmd.run(),
            Self::Build(cmd) => cmd.run(),
            Self::Serve(cmd) => cmd.run(),
            Self::Debug(cmd) => cmd.run(),
        }
    }
}

fn main() {
    human_panic::setup_panic!();
    let result = run();
    proc_exit::exit(result);
}

fn run() -> proc_exit::ExitResult {
    let cli = Cli::parse();

    cli.color.write_global();
    let colored = anstream::AutoStream::choice(&std::io::stderr());
    init_logging(cli.verbose.log_level_filter(), colored);

    match cli.command.run() {
        Ok(()) => Ok(()),
        Err(err) => {
            log::error!("{err:#}");
            Err(proc_exit::Exit::new(error::exit_code(&err)))
        }
    }
}

fn init_logging(level: log::LevelFilter, colored: anstream::ColorChoice) {
    let write_style = match colored {
        anstream::ColorChoice::Never => env_logger::WriteStyle::Never,
        anstream::ColorChoice::Always | anstream::ColorChoice::AlwaysAnsi => {
            env_logger::WriteStyle::Always
        }
        anstream::ColorChoice::Auto => env_logger::WriteStyle::Auto,
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    builder.write_style(write_style);
    builder.format(|buf, record| {
        let style = level_style(record.level());
        let level = format!("[{}]", record.level()).to_lowercase();
        writeln!(buf, "{style}{level:8}{style:#} {}", record.args())
    });
    builder.init();
}

fn level_style(level: log::Level) -> anstyle::Style {
    match level {
        log::Level::Error => anstyle::AnsiColor::Red.on_default().bold(),
        log::Level::Warn => anstyle::AnsiColor::Yellow.on_default(),
        log::Level::Info => anstyle::AnsiColor::Green.on_default(),
        log::Level::Debug | log::Level::Trace => anstyle::Style::new().dimmed(),
    }
}
