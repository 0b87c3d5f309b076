use clap::Parser;
use colored::Colorize;

use shortly::cli::{Cli, Commands};
use shortly::config::{get_config, init_config};
use shortly::runtime::modes;
use shortly::system::logging::init_logging;

#[actix_web::main]
async fn main() {
    // 加载 .env（如果存在）
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if let Err(e) = init_config(cli.config.as_deref()) {
        eprintln!("{} Failed to load configuration: {}", "[ERROR]".red().bold(), e);
        std::process::exit(1);
    }
    let config = get_config();

    let command = cli.command.unwrap_or(Commands::Serve);

    // config generate 只写文件，不需要日志
    let _guard = if matches!(command, Commands::Config { .. }) {
        None
    } else {
        match init_logging(&config) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("{} {:#}", "[ERROR]".red().bold(), e);
                std::process::exit(1);
            }
        }
    };

    if let Err(e) = modes::run_cli(&config, command).await {
        tracing::error!("{:#}", e);
        eprintln!("{} {:#}", "[ERROR]".red().bold(), e);
        std::process::exit(1);
    }
}
