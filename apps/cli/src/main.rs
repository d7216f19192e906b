use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tunectl::{
    execute_until_interrupted, login, repl, Cli, CliError, Config, Console, CtrlC, QueryEnhancer,
    Resolver, StdinPrompt,
};
use tunectl_ollama_client::OllamaClient;
use tunectl_shared_config::{log_filter, DEFAULT_LOG_FILTER};
use tunectl_spotify_client::SpotifyClient;

/// Log a startup failure, tell the user, and exit with status 1
fn exit_on_startup_error(console: &mut Console, message: String, err: CliError) -> ! {
    err.log();
    console.line(format!("Error: {}", message));
    std::process::exit(1)
}

#[tokio::main]
async fn main() {
    // Load environment variables first so RUST_LOG from .env applies
    dotenvy::dotenv().ok();

    // Initialize tracing; stdout is reserved for user-facing output
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(log_filter()).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut console = Console::stdout();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            let message = format!("{:#}", e);
            exit_on_startup_error(&mut console, message, e.into())
        }
    };

    tracing::info!("Starting tunectl");

    let spotify = match SpotifyClient::new(config.spotify()) {
        Ok(client) => client,
        Err(e) => exit_on_startup_error(&mut console, e.to_string(), e.into()),
    };
    let enhancer = if config.common.has_enhancement() {
        match OllamaClient::new(config.ollama()) {
            // One bounded attempt; a slow or missing model degrades to passthrough
            Ok(client) => QueryEnhancer::new(client.with_retry_config(1, 0)),
            Err(e) => exit_on_startup_error(&mut console, e.to_string(), e.into()),
        }
    } else {
        QueryEnhancer::disabled()
    };

    let mut prompt = StdinPrompt::new();
    login::ensure_authorized(&spotify, &mut prompt, &mut console).await;

    let resolver = Resolver::new(spotify, enhancer, config.resolver_settings());

    match cli.command {
        Some(command) => {
            let completed =
                execute_until_interrupted(&resolver, command.into(), &mut prompt, &CtrlC, &mut console)
                    .await;
            if !completed {
                console.line("\nCancelled");
            }
        }
        None => repl::run(&resolver, &mut prompt, &CtrlC, &mut console).await,
    }
}
