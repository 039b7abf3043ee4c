mod config;
mod views;

use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    AdminListController, AttachedFile, Field, HttpGateway, LoadOutcome, SubmissionController,
    SubmitOutcome,
};
use tracing::info;

use crate::views::{ConsoleAdminView, ConsoleSubmissionView};

#[derive(Parser, Debug)]
#[command(name = "console", about = "Console client for the résumé submission service")]
struct Cli {
    /// Base URL of the backend; overrides console.toml and environment.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit one résumé with contact fields.
    Submit {
        #[arg(long)]
        nome: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        telefone: String,
        #[arg(long)]
        cargo: String,
        #[arg(long)]
        escolaridade: String,
        #[arg(long, default_value = "")]
        observacoes: String,
        /// Path of the résumé file (.pdf, .doc or .docx, at most 1MB).
        #[arg(long)]
        arquivo: PathBuf,
    },
    /// Load and print the token-gated submission listing.
    Admin {
        /// Admin token; overrides console.toml and environment.
        #[arg(long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = config::load_settings();
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }
    info!(server_url = %settings.server_url, "console starting");

    let gateway = Arc::new(HttpGateway::new(settings.server_url.clone()));

    match cli.command {
        Command::Submit {
            nome,
            email,
            telefone,
            cargo,
            escolaridade,
            observacoes,
            arquivo,
        } => {
            let bytes = std::fs::read(&arquivo)
                .with_context(|| format!("failed to read file '{}'", arquivo.display()))?;
            let filename = arquivo
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            let controller = SubmissionController::new(gateway, Arc::new(ConsoleSubmissionView));
            controller.set_field(Field::Nome, nome).await;
            controller.set_field(Field::Email, email).await;
            controller.set_field(Field::Telefone, telefone).await;
            controller.set_field(Field::Cargo, cargo).await;
            controller.set_field(Field::Escolaridade, escolaridade).await;
            controller.set_field(Field::Observacoes, observacoes).await;
            controller.attach_file(AttachedFile { filename, bytes }).await;

            match controller.submit().await {
                SubmitOutcome::Sent => Ok(()),
                SubmitOutcome::Invalid => bail!("formulário inválido; corrija os campos acima"),
                SubmitOutcome::Failed => bail!("envio não confirmado pelo servidor"),
                SubmitOutcome::Busy => bail!("já existe um envio em andamento"),
            }
        }
        Command::Admin { token } => {
            let token = token.or(settings.admin_token).unwrap_or_default();
            let controller = AdminListController::new(gateway, Arc::new(ConsoleAdminView));
            match controller.load(&token).await {
                LoadOutcome::Loaded(_) => Ok(()),
                LoadOutcome::MissingToken => {
                    bail!("token não informado; use --token ou CURRICULOS_ADMIN_TOKEN")
                }
                LoadOutcome::Failed => bail!("não foi possível carregar as candidaturas"),
                LoadOutcome::Busy => bail!("já existe uma consulta em andamento"),
            }
        }
    }
}
