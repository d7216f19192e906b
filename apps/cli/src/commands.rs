//! Command vocabulary and dispatch
//!
//! The same commands are available as single-shot subcommands
//! (`tunectl play chill lofi`) and inside the interactive REPL. Both forms
//! are turned into a [`Command`] and run by [`execute`].

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::catalog::Catalog;
use crate::console::{Console, Interrupt, Prompt};
use crate::devices::show_devices;
use crate::enhancer::TextGenerator;
use crate::resolver::Resolver;
use crate::transport;

/// Help line listing the interactive vocabulary
pub const COMMAND_HELP: &str = "Commands: play <song>, quickplay <song>, pause, resume, next, prev, current, devices, volume <level>, quit";

/// Terminal Spotify controller
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run one command and exit; start the interactive prompt when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Search, pick from the top results, and play
    Play {
        /// What to search for
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },
    /// Play the best match for an enhanced query without asking
    Quickplay {
        /// What to search for
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },
    /// Pause playback
    Pause,
    /// Resume playback
    Resume,
    /// Skip to the next track
    Next,
    /// Go back to the previous track
    Prev,
    /// Show the currently playing track
    Current,
    /// List available Spotify devices
    Devices,
    /// Set the volume (0-100)
    Volume {
        /// Volume level; values outside 0-100 are clamped
        #[arg(allow_hyphen_values = true)]
        level: Option<String>,
    },
}

/// A command ready to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(String),
    Quickplay(String),
    Pause,
    Resume,
    Next,
    Prev,
    Current,
    Devices,
    /// The raw level argument, parsed when run
    Volume(String),
}

/// What one line typed at the interactive prompt means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Blank line
    Empty,
    /// `quit`, `exit` or `q`
    Quit,
    Run(Command),
    /// Unknown command or a command missing its argument
    Unknown,
}

/// Interpret one line typed at the interactive prompt
pub fn parse_line(line: &str) -> Line {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((first, args)) = words.split_first() else {
        return Line::Empty;
    };

    let command = match (first.to_lowercase().as_str(), args) {
        ("quit" | "exit" | "q", _) => return Line::Quit,
        ("play", [_, ..]) => Command::Play(args.join(" ")),
        ("quickplay", [_, ..]) => Command::Quickplay(args.join(" ")),
        ("pause", _) => Command::Pause,
        ("resume", _) => Command::Resume,
        ("next", _) => Command::Next,
        ("prev", _) => Command::Prev,
        ("current", _) => Command::Current,
        ("devices", _) => Command::Devices,
        ("volume", [level, ..]) => Command::Volume(level.to_string()),
        _ => return Line::Unknown,
    };
    Line::Run(command)
}

impl From<Commands> for Command {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Play { query } => Command::Play(query.join(" ")),
            Commands::Quickplay { query } => Command::Quickplay(query.join(" ")),
            Commands::Pause => Command::Pause,
            Commands::Resume => Command::Resume,
            Commands::Next => Command::Next,
            Commands::Prev => Command::Prev,
            Commands::Current => Command::Current,
            Commands::Devices => Command::Devices,
            Commands::Volume { level } => Command::Volume(level.unwrap_or_default()),
        }
    }
}

/// Run one command to completion. Every outcome is printed; nothing is returned.
pub async fn execute<C, G, P>(
    resolver: &Resolver<C, G>,
    command: Command,
    prompt: &mut P,
    console: &mut Console,
) where
    C: Catalog,
    G: TextGenerator,
    P: Prompt + ?Sized,
{
    debug!(command = ?command, "Executing command");
    let catalog = resolver.catalog();

    match command {
        Command::Play(query) if query.trim().is_empty() => {
            console.line("Please provide a search query");
        }
        Command::Play(query) => {
            resolver.search_and_play(query.trim(), prompt, console).await;
        }
        Command::Quickplay(query) if query.trim().is_empty() => {
            console.line("Please provide a search query");
        }
        Command::Quickplay(query) => {
            let enhanced = resolver.enhance_query(query.trim(), console).await;
            resolver.play_best_match(&enhanced, console).await;
        }
        Command::Pause => {
            transport::pause(catalog, console).await;
        }
        Command::Resume => {
            transport::resume(catalog, console).await;
        }
        Command::Next => {
            transport::next(catalog, console).await;
        }
        Command::Prev => {
            transport::previous(catalog, console).await;
        }
        Command::Current => {
            transport::current(catalog, console).await;
        }
        Command::Devices => show_devices(catalog, console).await,
        Command::Volume(level) if level.trim().is_empty() => {
            console.line("Please provide a volume level (0-100)");
        }
        Command::Volume(level) => match level.trim().parse::<i64>() {
            Ok(level) => {
                transport::set_volume(catalog, level, console).await;
            }
            Err(_) => console.line("Invalid volume level"),
        },
    }
}

/// Run one command unless an interrupt arrives first.
///
/// Returns `false` when the command was abandoned. The command is polled
/// first, so a Ctrl-C already answered by the selection prompt only cancels
/// that selection.
pub async fn execute_until_interrupted<C, G, P, I>(
    resolver: &Resolver<C, G>,
    command: Command,
    prompt: &mut P,
    interrupt: &I,
    console: &mut Console,
) -> bool
where
    C: Catalog,
    G: TextGenerator,
    P: Prompt + ?Sized,
    I: Interrupt + ?Sized,
{
    tokio::select! {
        biased;
        _ = execute(resolver, command, prompt, console) => true,
        _ = interrupt.interrupted() => {
            debug!("Command interrupted");
            false
        }
    }
}
