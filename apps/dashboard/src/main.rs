use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dashboard_core::{
    config::{load_settings, normalize_api_base},
    AssumeYes, ConfirmPrompt, CreationForm, Dashboard, HttpCatsTransport, ReconciliationPolicy,
    RowEditor,
};
use shared::domain::CatId;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod prompt;
mod render;
mod shell;

use prompt::StdinConfirm;

#[derive(Parser, Debug)]
#[command(name = "cats-dashboard", about = "Spy cats dashboard")]
struct Cli {
    /// Cats service address; overrides dashboard.toml and API_BASE.
    #[arg(long)]
    api_base: Option<String>,
    /// Answer yes to delete confirmations.
    #[arg(long)]
    yes: bool,
    /// Refetch the collection after deletes instead of pruning locally.
    #[arg(long)]
    reconcile_deletes: bool,
    /// Ignore list responses from reloads that a newer reload superseded.
    #[arg(long)]
    discard_stale_reloads: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show all cats.
    List,
    /// Add a cat. Numbers are sent as typed; the service validates them.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        years: String,
        #[arg(long)]
        breed: String,
        #[arg(long)]
        salary: String,
    },
    /// Change a cat's salary.
    Salary { id: i64, salary: String },
    /// Delete a cat.
    Delete { id: i64 },
    /// Interactive session (the default).
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let api_base = match &cli.api_base {
        Some(raw) => normalize_api_base(raw).context("invalid --api-base")?,
        None => {
            load_settings()
                .context("failed to load dashboard settings")?
                .api_base
        }
    };
    info!("dashboard: using api_base={api_base}");

    let mut policy = ReconciliationPolicy::default();
    if cli.reconcile_deletes {
        policy = policy.with_reconciled_deletes();
    }
    if cli.discard_stale_reloads {
        policy = policy.with_stale_reload_guard();
    }

    let confirm: Arc<dyn ConfirmPrompt> = if cli.yes {
        Arc::new(AssumeYes)
    } else {
        Arc::new(StdinConfirm)
    };
    let dashboard =
        Dashboard::new_with_policy(Arc::new(HttpCatsTransport::new(api_base)), confirm, policy);
    let editor = RowEditor::new();

    dashboard.reload().await;

    match cli.command.unwrap_or(Command::Shell) {
        Command::List => {}
        Command::Create {
            name,
            years,
            breed,
            salary,
        } => {
            let mut form = CreationForm::new();
            form.set_name(&name);
            form.set_years_of_experience(years);
            form.set_breed(breed);
            form.set_salary(salary);
            form.submit(&dashboard).await;
        }
        Command::Salary { id, salary } => {
            let id = CatId(id);
            let cat = dashboard
                .record(id)
                .await
                .with_context(|| format!("no cat with id {id}"))?;
            editor.begin_edit(&cat).await;
            editor.set_draft(id, salary).await;
            editor.save(id, &dashboard).await;
        }
        Command::Delete { id } => {
            dashboard.delete(CatId(id)).await;
        }
        Command::Shell => return shell::run(&dashboard, &editor).await,
    }

    render::print_dashboard(&dashboard, &editor).await;
    if dashboard.error().is_some() {
        std::process::exit(1);
    }
    Ok(())
}
