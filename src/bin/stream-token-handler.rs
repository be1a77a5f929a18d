use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use reqwest::Client;
use serde_json::json;
use stream_token_handler::cache::token_cache::TokenCache;
use stream_token_handler::config::secrets::EnvSecretResolver;
use stream_token_handler::config::settings::{environment_name, LogFormat, ServerConfig, SettingsConfig};
use stream_token_handler::handler::{handler, HandlerContext, Outcome};
use stream_token_handler::records::loader;
use stream_token_handler::server;
use stream_token_handler::utils::logging::{self, LogLevel};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Deployment environment; `production` resolves credentials through decryption.
    /// Falls back to `NODE_ENV`, then `development`
    #[arg(long, env = "APP_ENV")]
    app_env: Option<String>,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// Falls back to `LOG_FORMAT` (json, compact or text)
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a single invocation with an event read from a JSON file (`-` for stdin)
    Invoke {
        #[arg(short, long, default_value = loader::STDIN_MARKER)]
        event: String,
    },
    /// Accept invocations over HTTP, sharing one token cache between them
    Serve {
        #[arg(long, env = "HOST", default_value = "127.0.0.1")]
        host: String,
        #[arg(long, env = "PORT", default_value_t = 9000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read settings, start logging
    // -------------------------------

    let args = Args::parse();
    let logging_config = logging::resolve_logging_config(args.log_level, args.log_format);
    logging::init_logging(&logging_config);
    let settings = SettingsConfig::new(&environment_name(args.app_env), logging_config);

    // -------------------------------
    // 2. Process-wide collaborators
    // -------------------------------

    let cache = TokenCache::new(settings.environment);
    let ctx = HandlerContext::new(cache, Client::new(), EnvSecretResolver);
    info!("environment: {:?}", settings.environment);

    // -------------------------------
    // 3. Invoke once, or serve
    // -------------------------------

    match args.command {
        Command::Invoke { event } => {
            let event = loader::run(&event).await?;
            match handler(event, &ctx).await {
                Outcome::Succeeded(message) => {
                    println!("{}", json!({ "status": "succeeded", "message": message }));
                    Ok(())
                }
                Outcome::Recovered(_) => {
                    println!("false");
                    Ok(())
                }
                Outcome::Fault(message) => Err(anyhow!(message)),
            }
        }
        Command::Serve { host, port } => {
            info!("Service starting...");
            server::server::start(&ServerConfig { host, port }, ctx).await
        }
    }
}
