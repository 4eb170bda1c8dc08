//! Hive CLI - your notes from the terminal
//!
//! Same notes, drafts and list helpers as the desktop app.

mod auth;
mod cli;
mod commands;
mod error;

#[cfg(test)]
mod tests;

use std::io;

use clap::{CommandFactory, Parser};
use hive_core::Category;

use crate::auth::connect;
use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::auth_cmd::run_auth;
use crate::commands::common::open_drafts;
use crate::commands::completions::run_completions;
use crate::commands::delete::run_delete;
use crate::commands::draft::run_draft;
use crate::commands::edit::run_edit;
use crate::commands::list::run_list;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hive=info".parse().expect("valid log directive")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Add {
            content,
            category,
            attach,
        }) => {
            run_add(&connect()?, open_drafts()?, &content, category, attach.as_deref()).await?;
        }
        Some(Commands::List { search, full, json }) => {
            run_list(&connect()?, search.as_deref(), full, json).await?;
        }
        Some(Commands::Edit { id, category }) => run_edit(&connect()?, &id, category).await?,
        Some(Commands::Delete { id, yes }) => {
            let backend = connect()?;
            run_delete(&backend, &id, yes, &mut io::stdin().lock(), &mut io::stdout()).await?;
        }
        Some(Commands::Draft { command }) => {
            run_draft(
                command,
                open_drafts()?,
                &mut io::stdin().lock(),
                &mut io::stdout(),
            )?;
        }
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        Some(Commands::Auth { command }) => run_auth(command, &connect()?).await?,
        None => {
            // Quick capture mode: hive "my thought"
            if cli.note.is_empty() {
                Cli::command().print_help().map_err(CliError::Io)?;
                println!();
            } else {
                run_add(
                    &connect()?,
                    open_drafts()?,
                    &cli.note,
                    Category::default(),
                    None,
                )
                .await?;
            }
        }
    }

    Ok(())
}
