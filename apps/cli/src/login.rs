//! First-run Spotify sign-in
//!
//! Without a cached token the user is sent to the Spotify consent page and
//! pastes back the address the browser was redirected to.

use tracing::info;
use tunectl_spotify_client::SpotifyClient;

use crate::console::{Console, Prompt, PromptInput};
use crate::error::CliError;

/// Make sure the client holds a token, running the sign-in flow if needed.
///
/// Returns whether the client is authorized afterwards. A failed sign-in is
/// reported but not fatal; commands will report it individually.
pub async fn ensure_authorized<P: Prompt + ?Sized>(
    client: &SpotifyClient,
    prompt: &mut P,
    console: &mut Console,
) -> bool {
    if client.is_authorized().await {
        return true;
    }

    let url = match client.authorize_url() {
        Ok(url) => url,
        Err(e) => {
            let e = CliError::from(e);
            e.log();
            console.line(format!("Error starting Spotify sign-in: {}", e));
            return false;
        }
    };

    console.line("Sign in to Spotify by opening this address in your browser:");
    console.line(format!("  {}", url));
    console.prompt("\nPaste the address you were redirected to: ");

    let redirected = match prompt.read_line().await {
        PromptInput::Line(line) => line,
        PromptInput::Interrupted | PromptInput::Closed => {
            console.line("\nSign-in cancelled");
            return false;
        }
    };

    match client.authorize_with_redirect(&redirected).await {
        Ok(()) => {
            info!(cache = %client.config().token_cache_path.display(), "Signed in to Spotify");
            console.line("Signed in to Spotify");
            true
        }
        Err(e) => {
            let e = CliError::from(e);
            e.log();
            console.line(format!("Error signing in: {}", e));
            false
        }
    }
}
