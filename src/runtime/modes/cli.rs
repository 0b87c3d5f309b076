//! CLI mode
//!
//! One-shot commands that share the server's storage and services.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::runtime::lifetime;

/// Run a non-server command
pub async fn run_cli(config: &StaticConfig, command: Commands) -> Result<()> {
    match command {
        Commands::Serve => super::run_server(config).await,
        Commands::Config {
            action: ConfigCommands::Generate { output_path },
        } => generate_config(output_path),
        Commands::List => list_links(config).await,
        Commands::Add { url } => add_link(config, &url).await,
    }
}

fn generate_config(output_path: Option<String>) -> Result<()> {
    match output_path {
        Some(path) => {
            StaticConfig::default()
                .save_to_file(&path)
                .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path, e))?;
            println!("{} Sample configuration written to {}", "✓".bold().green(), path);
        }
        None => print!("{}", StaticConfig::generate_sample_config()),
    }
    Ok(())
}

async fn list_links(config: &StaticConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_startup(config).await?;
    let links = startup
        .link_service
        .list_links()
        .await
        .context("Failed to load links")?;

    if links.is_empty() {
        println!("{} No short links found", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Short link list:".bold().green());
    println!();
    for link in &links {
        let mut info_parts = vec![format!(
            "{} -> {}",
            link.short_url().cyan(),
            link.url.blue().underline()
        )];
        if !link.title.is_empty() {
            info_parts.push(format!("\"{}\"", link.title).dimmed().to_string());
        }
        info_parts.push(format!("(visits: {})", link.visits).dimmed().yellow().to_string());
        println!("  {}", info_parts.join(" "));
    }
    println!();
    println!("{} {} link(s)", "ℹ".bold().blue(), links.len());
    Ok(())
}

async fn add_link(config: &StaticConfig, url: &str) -> Result<()> {
    let startup = lifetime::startup::prepare_startup(config).await?;
    let base_url = startup
        .route_settings
        .base_url
        .clone()
        .unwrap_or_else(|| format!("http://{}:{}", config.server.host, config.server.port));

    let result = startup
        .link_service
        .create_or_get_link(url, &base_url)
        .await
        .map_err(|e| anyhow::anyhow!(e.format_simple()))?;

    let verb = if result.created { "Added" } else { "Already shortened" };
    println!(
        "{} {}: {} -> {}",
        "✓".bold().green(),
        verb,
        result.link.short_url().cyan(),
        result.link.url.blue().underline()
    );
    Ok(())
}
