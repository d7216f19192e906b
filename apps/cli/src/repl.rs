//! Interactive prompt
//!
//! Reads one command per line and runs it to completion before reading the
//! next. Ctrl-C, at the prompt or while a command runs, or end of input
//! leaves the loop.

use tracing::debug;

use crate::catalog::Catalog;
use crate::commands::{execute_until_interrupted, parse_line, Line, COMMAND_HELP};
use crate::console::{Console, Interrupt, Prompt, PromptInput};
use crate::enhancer::TextGenerator;
use crate::resolver::Resolver;

pub const REPL_PROMPT: &str = "\ntunectl> ";

/// Run the interactive loop until the user quits
pub async fn run<C, G, P, I>(
    resolver: &Resolver<C, G>,
    prompt: &mut P,
    interrupt: &I,
    console: &mut Console,
) where
    C: Catalog,
    G: TextGenerator,
    P: Prompt + ?Sized,
    I: Interrupt + ?Sized,
{
    console.line("tunectl - Spotify from your terminal");
    console.line(COMMAND_HELP);

    loop {
        console.prompt(REPL_PROMPT);
        let line = match prompt.read_line().await {
            PromptInput::Line(line) => line,
            PromptInput::Interrupted => {
                console.line("\nGoodbye!");
                break;
            }
            PromptInput::Closed => {
                console.line("");
                console.line("Goodbye!");
                break;
            }
        };

        match parse_line(&line) {
            Line::Empty => continue,
            Line::Quit => {
                console.line("Goodbye!");
                break;
            }
            Line::Unknown => console.line("Unknown command or missing arguments"),
            Line::Run(command) => {
                if !execute_until_interrupted(resolver, command, prompt, interrupt, console).await {
                    console.line("\nGoodbye!");
                    break;
                }
            }
        }
    }

    debug!("Interactive session ended");
}
