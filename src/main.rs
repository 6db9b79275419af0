mod calendar;
mod cli;
mod config;
mod db;
mod models;
mod prayer_times;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Setup(args)) => {
            let (conn, mut config) = open_state()?;
            handlers::handle_setup(&conn, &mut config, &args)?;
        }
        Some(Commands::Today { json }) => {
            let config = AppConfig::load().context("Loading config")?;
            handlers::handle_today(&config, json)?;
        }
        // Pure date conversion needs neither config nor database
        Some(Commands::Persian { date, json }) => {
            handlers::handle_persian(date.as_deref(), json)?;
        }
        Some(Commands::Times { date, json }) => {
            let (conn, config) = open_state()?;
            handlers::handle_times(&conn, &config, date.as_deref(), json)?;
        }
        Some(Commands::Next { at, json }) => {
            let (conn, config) = open_state()?;
            handlers::handle_next(&conn, &config, at.as_deref(), json)?;
        }
        Some(Commands::Cache { action }) => {
            let (conn, config) = open_state()?;
            handlers::handle_cache(&conn, &config, &action)?;
        }

        // No subcommand → launch the board
        None => {
            let (conn, config) = open_state()?;
            if let Err(e) = handlers::warm_cache_for_board(&conn, &config) {
                log::warn!("Could not warm prayer-times cache: {:#}", e);
            }
            tui::app::run(conn, config)?;
        }
    }

    Ok(())
}

/// Load the config and open the migrated cache database.
fn open_state() -> Result<(Connection, AppConfig)> {
    let config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    // Enable WAL mode for better concurrent access
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;

    Ok((conn, config))
}
