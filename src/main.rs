use clap::Parser;
use pdf_extract_client::{browse, cli, commands, config, display, error, remote};
use cli::{Cli, Commands};
use commands::{Client, DeleteOutcome};
use config::Config;
use error::Result;
use pdf_extract_common::{Controller, DocumentStore};
use remote::HttpStore;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Markdownプレビューの既定行数
const PREVIEW_LINES: usize = 20;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::debug!("exiting with error: {:?}", e);
            eprintln!("✖ {}", e);
            std::process::exit(1);
        }
    }
}

/// `-v` でdebug、それ以外はwarn。RUST_LOG があればそちらを優先
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn connect(config: &Config, server_override: Option<&str>) -> Result<Client> {
    let server = config.resolve_server(server_override);
    tracing::debug!("server: {}", server);
    let store = HttpStore::new(&server, Duration::from_secs(config.timeout_seconds))?;
    Ok(Controller::new(store))
}

/// 失敗を表示済みのときは Ok(false)
async fn run(cli: Cli) -> Result<bool> {
    let mut config = Config::load()?;
    let server = cli.server.as_deref();

    match cli.command {
        Commands::Device => {
            let controller = connect(&config, server)?;
            let device = controller.store().fetch_device_info().await;
            println!("{}", display::device_line(&device));
        }

        Commands::List => {
            let mut controller = connect(&config, server)?;
            commands::start(&mut controller).await;
            commands::print_list(&controller);
        }

        Commands::Show { stem, preview_lines } => {
            let mut controller = connect(&config, server)?;
            commands::start(&mut controller).await;
            commands::show(&mut controller, &stem, preview_lines).await;
        }

        Commands::Upload { files, mode } => {
            let files = commands::read_files(&files).await?;
            let mut controller = connect(&config, server)?;
            commands::start(&mut controller).await;
            let mode = mode.unwrap_or(config.default_mode);
            return Ok(commands::upload(&mut controller, &files, mode, PREVIEW_LINES).await);
        }

        Commands::Delete { stem, yes } => {
            let mut controller = connect(&config, server)?;
            commands::start(&mut controller).await;
            match commands::delete(&mut controller, &stem, yes).await? {
                DeleteOutcome::Deleted => commands::print_list(&controller),
                DeleteOutcome::Cancelled => println!("キャンセルしました"),
                DeleteOutcome::Failed => return Ok(false),
            }
        }

        Commands::Browse => {
            let mut controller = connect(&config, server)?;
            browse::run(&mut controller, config.default_mode, PREVIEW_LINES).await?;
        }

        Commands::Config { set_server, show } => {
            if let Some(url) = &set_server {
                config.set_server_url(url.clone())?;
                println!("✔ サーバーURLを設定しました: {}", url);
            }

            if show || set_server.is_none() {
                println!("設定:");
                println!("  サーバー: {}", config.resolve_server(server));
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  抽出モード: {}", config.default_mode);
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(true)
}
