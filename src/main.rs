use clap::Parser;
use kanri::cli::commands::Cli;
use kanri::cli::handlers;
use kanri::config::Config;
use kanri::store::RemoteStore;
use kanri::tui::theme::Theme;
use kanri::{logging, tui};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            let _log_guard = logging::init_tui();
            if let Err(e) = run_tui(cli.base_url).await {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            logging::init_cli();
            if let Err(e) = handlers::dispatch(cli).await {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

async fn run_tui(base_url: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    if let Some(url) = base_url {
        config.base_url = url;
    }
    let theme = Theme::from_config(&config.ui);
    let store = RemoteStore::new(config.base_url.as_str(), config.timeout())?;
    tui::run(&store, theme).await
}
