use std::{error::Error, io, path::PathBuf, process};

use clap::{command, Parser, Subcommand, ValueHint};
use log::{debug, error, info, LevelFilter};
use tokio::io::BufReader;

use genum::{
    clipboard::{Controller, Osc52},
    config::{Config, Settings},
    features::Features,
    options::{Range, WordLength},
    pipeline::Pipeline,
    render::Terminal,
    session::{Command, Session, Widget},
    signal,
};

/// Profile to display when not built in release mode.
#[cfg(debug_assertions)]
const BUILD_PROFILE: &str = "debug";
/// Profile to display when not built release mode.
#[cfg(not(debug_assertions))]
const BUILD_PROFILE: &str = "release";

/// Group name for mutually exclusive logging options.
const ARGS_GROUP_LOGGING: &str = "logging";

/// Command line arguments as parsed by `clap`.
#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    widget: WidgetArgs,

    /// Configuration file
    ///
    /// TOML file with endpoint URLs, the request timeout, the copy icon
    /// reset delay and the part-of-speech setting. See
    /// `genum.toml.example`.
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Feature cards file
    ///
    /// JSON file replacing the built-in description shown by the
    /// `features` command.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    features: Option<PathBuf>,

    /// Generate once, print the result and exit
    #[arg(long, default_value_t = false)]
    once: bool,

    /// Copy the generated value to the clipboard (with --once)
    #[arg(long, default_value_t = false, requires = "once")]
    copy: bool,

    /// Suppresses all output except warnings and errors.
    #[arg(short, long, default_value_t = false, group = ARGS_GROUP_LOGGING)]
    quiet: bool,

    /// Enable verbose logging
    ///
    /// Specify twice for trace logging.
    #[arg(short, long, action = clap::ArgAction::Count, group = ARGS_GROUP_LOGGING)]
    verbose: u8,
}

#[derive(Clone, Debug, Subcommand)]
enum WidgetArgs {
    /// Random numbers with trivia
    Number {
        /// Smallest number to draw [default: 1]
        #[arg(long, allow_hyphen_values = true)]
        min: Option<String>,

        /// Largest number to draw [default: 999]
        #[arg(long, allow_hyphen_values = true)]
        max: Option<String>,
    },

    /// Random words with definitions
    Word {
        /// Number of letters, from 3 to 9 [default: 5]
        #[arg(short, long)]
        length: Option<String>,

        /// Show definitions without their part of speech
        #[arg(long, default_value_t = false)]
        no_part_of_speech: bool,
    },
}

/// Initializes the logger facade.
///
/// The logging level is determined as follows, in order of precedence from
/// highest to lowest:
/// 1. Command line arguments
/// 2. `RUST_LOG` environment variable
/// 3. Hard coded default
///
/// # Panics
///
/// Panics when a logger facade is already initialized.
fn init_logger(config: &Args) {
    let mut logger = env_logger::Builder::from_env(
        // Note: if you change the default logging level here, then you should
        // probably also change the verbosity levels below.
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    if config.quiet || config.verbose > 0 {
        let level = match config.verbose {
            0 => {
                // Quiet and verbose are mutually exclusive, and `verbose` is 0
                // by default. So this arm means: quiet mode.
                LevelFilter::Warn
            }
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        // Filter log messages of external crates.
        logger.filter_module("genum", level);
    }

    logger.init();
}

/// Main application loop.
///
/// # Errors
///
/// This function returns an error when the configuration or feature cards
/// cannot be loaded, or when the terminal cannot be read or written.
async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut settings = match args.config {
        Some(ref path) => Settings::from_file(path)?,
        None => Settings::default(),
    };

    let (widget, range, length) = match args.widget {
        WidgetArgs::Number { min, max } => {
            // Missing bounds take their defaults, like empty answers would.
            let range = Range::from_input(
                min.as_deref().unwrap_or_default(),
                max.as_deref().unwrap_or_default(),
            );
            (Widget::Number, range.value, WordLength::default())
        }
        WidgetArgs::Word {
            length,
            no_part_of_speech,
        } => {
            if no_part_of_speech {
                settings.part_of_speech = false;
            }
            let length = length
                .as_deref()
                .map_or_else(WordLength::default, |input| WordLength::from_input(input).value);
            (Widget::Word, Range::default(), length)
        }
    };

    let config = Config::new(settings);
    let pipeline = Pipeline::new(&config)?;
    let controller = Controller::new(Osc52::new(io::stdout()), config.copy_reset);
    let features = match args.features {
        Some(ref path) => Features::from_file(path)?,
        None => Features::builtin(widget)?,
    };
    let renderer = Terminal::new(io::stdout());

    let mut session = Session::new(widget, pipeline, controller, features, renderer)
        .with_range(range)
        .with_length(length);
    debug!("{widget} session with {:?}", session.request());

    if args.once {
        session.generate().await?;
        if args.copy {
            session.execute(Command::Copy)?;
        }
        return Ok(());
    }

    session.execute(Command::Help)?;

    let mut signals = signal::Handler::new()?;
    let shutdown = async move {
        let signal = signals.recv().await;
        info!("received {signal}, shutting down");
    };

    session
        .run(BufReader::new(tokio::io::stdin()), shutdown)
        .await?;

    Ok(())
}

/// Main entry point of the application.
///
/// This function initializes the logger facade, parses the command line
/// arguments, and starts the main application loop.
#[tokio::main]
async fn main() {
    // `clap` handles our command line arguments and help text.
    let args = Args::parse();
    init_logger(&args);

    // Dump command line arguments before we do anything more.
    // This aids in debugging of whatever comes next.
    debug!("Command {:#?}", args);

    let cmd = command!();
    let name = cmd.get_name().to_string();
    let version = cmd.get_version().unwrap_or("UNKNOWN").to_string();
    let lang = String::from("en");

    info!("starting {name}/{version}; {BUILD_PROFILE}; {lang}");

    if let Err(e) = run(args).await {
        error!("{e}");
        process::exit(1);
    }

    // A pending read on stdin would otherwise keep the runtime from shutting
    // down.
    process::exit(0);
}
