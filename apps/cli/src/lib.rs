//! tunectl: a terminal controller for Spotify
//!
//! The core is the search-to-playback pipeline in [`resolver`]: free text is
//! optionally rewritten by a local model ([`enhancer`]), searched, narrowed to
//! one track, and played once a device is available ([`devices`]).
//! Collaborators are reached through the [`Catalog`] and [`TextGenerator`]
//! capabilities so the pipeline can run against fakes.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod console;
pub mod devices;
pub mod enhancer;
pub mod error;
pub mod login;
pub mod repl;
pub mod resolver;
pub mod transport;

pub use catalog::Catalog;
pub use commands::{execute, execute_until_interrupted, parse_line, Cli, Command, Commands, Line};
pub use config::Config;
pub use console::{Captured, Console, CtrlC, Interrupt, Prompt, PromptInput, StdinPrompt};
pub use devices::{has_ready_device, show_devices};
pub use enhancer::{QueryEnhancer, TextGenerator};
pub use error::{CliError, CliResult, ErrorSeverity};
pub use resolver::{parse_selection, Resolution, Resolver, ResolverSettings};
