use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotscreen_auth::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the OAuth redirect endpoint and print the captured code
    Listen(ListenOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ListenOptions {
    /// Port to listen on (defaults to CALLBACK_PORT or 8080)
    #[clap(long)]
    pub port: Option<u16>,

    /// Seconds to wait for the redirect (defaults to AUTH_TIMEOUT_SECS or 300)
    #[clap(long)]
    pub timeout: Option<u64>,

    /// Keep serving and print every code as it arrives
    #[clap(long, conflicts_with = "timeout")]
    pub follow: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Listen(opt) => {
            let port = match opt.port {
                Some(port) => port,
                None => config::callback_port().unwrap_or_else(|e| error!("{}", e)),
            };
            let interval = config::poll_interval().unwrap_or_else(|e| error!("{}", e));

            if opt.follow {
                cli::follow(port, interval).await;
            } else {
                let max_wait = match opt.timeout {
                    Some(secs) => std::time::Duration::from_secs(secs),
                    None => config::auth_timeout().unwrap_or_else(|e| error!("{}", e)),
                };
                cli::listen(port, max_wait, interval).await;
            }
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
