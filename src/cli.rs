use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;
use crate::gateway::RecordGateway;
use crate::orchestrator::{ActionOutcome, LoadState, Orchestrator};
use crate::record::RecordId;

/// Manage users of a remote REST collection from the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "userdesk", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "USERDESK_CONFIG", default_value = "userdesk.toml")]
    pub config: PathBuf,

    /// Collection endpoint, overrides `api.base_url`
    #[arg(long, env = "USERDESK_API_URL")]
    pub api_url: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print every user
    List {
        /// One block per user instead of a table
        #[arg(long)]
        cards: bool,
    },
    /// Print the form fields
    Fields,
    /// Create a user
    Add {
        /// Field value, e.g. --set firstName=Jo
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment, required = true)]
        set: Vec<(String, String)>,
    },
    /// Change fields of an existing user
    Edit {
        id: String,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment, required = true)]
        set: Vec<(String, String)>,
    },
    /// Delete a user after confirmation
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the effective settings
    Config,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected FIELD=VALUE, got '{s}'")),
    }
}

/// Runs one command. `Ok(false)` means the command ran but did not succeed
/// (validation, remote failure, unknown id); the notifications queued along
/// the way are written to `out` either way.
pub async fn run<G: RecordGateway + ?Sized>(
    command: &Command,
    settings: &Settings,
    app: &mut Orchestrator,
    gateway: &G,
    out: &mut dyn Write,
    input: &mut dyn BufRead,
) -> anyhow::Result<bool> {
    let ok = match command {
        Command::List { cards } => {
            if load(app, gateway, out).await? {
                let table = app.table();
                if *cards {
                    write!(out, "{}", table.render_cards_text())?;
                } else {
                    write!(out, "{}", table.render_text())?;
                }
                true
            } else {
                false
            }
        }
        Command::Fields => {
            for field in app.schema().iter() {
                let required = if field.required { "required" } else { "optional" };
                writeln!(
                    out,
                    "{:<12} {:<16} {:<6} {}",
                    field.name,
                    field.label,
                    field.input_kind.as_html(),
                    required
                )?;
            }
            true
        }
        Command::Add { set } => {
            let form = app.create_form_mut();
            for (name, value) in set {
                form.change(name, value.as_str());
                form.blur(name);
            }
            report(app.create(gateway).await, out)?
        }
        Command::Edit { id, set } => {
            let id = RecordId::new(id.as_str());
            if !load(app, gateway, out).await? {
                false
            } else if !app.open_edit(&id) {
                writeln!(out, "No {} with id {id}", app.schema().names().singular)?;
                false
            } else {
                if let Some(form) = app.edit_form_mut() {
                    for (name, value) in set {
                        form.change(name, value.as_str());
                        form.blur(name);
                    }
                }
                report(app.update(gateway).await, out)?
            }
        }
        Command::Delete { id, yes } => {
            let id = RecordId::new(id.as_str());
            if !load(app, gateway, out).await? {
                false
            } else if !app.open_delete(&id) {
                writeln!(out, "No {} with id {id}", app.schema().names().singular)?;
                false
            } else if *yes || confirm(app, out, input)? {
                report(app.delete(gateway).await, out)?
            } else {
                app.cancel_delete();
                writeln!(out, "Cancelled")?;
                true
            }
        }
        Command::Config => {
            write!(out, "{}", settings.to_toml()?)?;
            true
        }
    };

    for notification in app.drain_notifications() {
        writeln!(out, "[{}] {}", notification.kind, notification.text)?;
    }
    Ok(ok)
}

async fn load<G: RecordGateway + ?Sized>(
    app: &mut Orchestrator,
    gateway: &G,
    out: &mut dyn Write,
) -> anyhow::Result<bool> {
    app.load(gateway).await;
    if let LoadState::Failed { message } = app.load_state() {
        writeln!(out, "{message}. Run the command again to retry.")?;
        return Ok(false);
    }
    Ok(true)
}

fn confirm(app: &Orchestrator, out: &mut dyn Write, input: &mut dyn BufRead) -> anyhow::Result<bool> {
    if let Some(prompt) = app.delete_prompt() {
        write!(out, "{prompt} [y/N] ")?;
        out.flush()?;
    }
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn report(outcome: ActionOutcome, out: &mut dyn Write) -> anyhow::Result<bool> {
    match outcome {
        ActionOutcome::Succeeded => Ok(true),
        ActionOutcome::Rejected(errors) => {
            for error in errors {
                writeln!(out, "{}: {}", error.field, error.message)?;
            }
            Ok(false)
        }
        ActionOutcome::Skipped | ActionOutcome::Failed => Ok(false),
    }
}
