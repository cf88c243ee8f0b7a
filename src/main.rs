mod client;
mod commands;
mod config;
mod error;
mod output;
mod request;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use commands::{
    channel::ChannelCommand, config_cmd::ConfigCommand, graph::GraphCommand,
    notification::NotificationCommand, pixel::PixelCommand, user::UserCommand,
    webhook::WebhookCommand,
};

/// pi: command line client for Pixela, the pixelation graph service.
///
/// Every action maps to one Pixela API call. The response body is printed to
/// stdout exactly as returned; failures go to stderr and exit with status 1.
///
/// Quick reference:
///   pi users create --help      # register a user
///   pi graphs create --help     # define a graph
///   pi pixel post --help        # record a quantity
///
/// Setup:
///   pi config set username c-know
///   pi config set user_token thisissecret
///
/// Or via environment variables:
///   export PIXELA_USER_NAME=c-know
///   export PIXELA_USER_TOKEN=thisissecret
///   export PIXELA_API_BASE=pixe.la
///
/// Resolution order: flags, then environment variables, then ~/.pi/config.json.
///
/// Commands that only build a URL (graphs svg, graphs detail, graphs list)
/// print it without contacting the service.
#[derive(Parser, Debug)]
#[command(name = "pi", version, about, long_about)]
struct Cli {
    /// Pixela host, e.g. pixe.la
    #[arg(long, global = true, env = "PIXELA_API_BASE")]
    api_base: Option<String>,

    /// Token sent as X-USER-TOKEN
    #[arg(long, global = true, env = "PIXELA_USER_TOKEN", hide_env_values = true)]
    user_token: Option<String>,

    #[command(flatten)]
    verbosity: Verbosity,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage users: create, update token, delete
    Users {
        #[command(subcommand)]
        cmd: UserCommand,
    },
    /// Manage graphs: definitions, SVG and detail URLs, stats
    Graphs {
        #[command(subcommand)]
        cmd: GraphCommand,
    },
    /// Record and edit pixels
    Pixel {
        #[command(subcommand)]
        cmd: PixelCommand,
    },
    /// Manage webhooks
    Webhooks {
        #[command(subcommand)]
        cmd: WebhookCommand,
    },
    /// Manage notification channels
    Channels {
        #[command(subcommand)]
        cmd: ChannelCommand,
    },
    /// Manage notification rules of a graph
    #[command(alias = "ntf")]
    Notifications {
        #[command(subcommand)]
        cmd: NotificationCommand,
    },
    /// Print the pi version
    Version,
    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommand,
    },
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .init();

    let resolved = config::Config::resolve(cli.api_base.as_deref(), cli.user_token.as_deref());
    log::debug!("api base: {}", resolved.api_base);

    let client = client::PixelaClient::new(resolved.clone());

    let result = match cli.command {
        Command::Users { cmd } => commands::user::handle(cmd, &client).await,
        Command::Graphs { cmd } => commands::graph::handle(cmd, &client).await,
        Command::Pixel { cmd } => commands::pixel::handle(cmd, &client).await,
        Command::Webhooks { cmd } => commands::webhook::handle(cmd, &client).await,
        Command::Channels { cmd } => commands::channel::handle(cmd, &client).await,
        Command::Notifications { cmd } => commands::notification::handle(cmd, &client).await,
        Command::Version => {
            println!("pi version: {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Config { cmd } => commands::config_cmd::handle(cmd, &resolved),
    };

    if let Err(e) = result {
        match &e {
            error::CliError::Remote { body, .. } => output::print_error_body(body),
            _ => output::print_error(&e.to_string()),
        }
        std::process::exit(1);
    }
}
