//! Terminal frontend for the contact book.
//!
//! Each subcommand drives one view against the REST API and prints what it
//! renders.

use anyhow::{bail, Result};
use clap::{Arg, ArgMatches, Command};
use contact_book::client::{AsyncContactClient, AsyncContactClientImpl, ContactClient};
use contact_book::views::{
    AllContactsView, DeleteContactView, NewContactView, SearchContactView, UpdateContactView,
};
use contact_book::Config;
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn build_cli() -> Command {
    Command::new("contact-cli")
        .about("Terminal frontend for the Contact Book API")
        .subcommand_required(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("API base URL (default: CONTACT_API_URL or http://localhost:3001)")
                .global(true),
        )
        .subcommand(Command::new("list").about("List all contacts"))
        .subcommand(
            Command::new("search")
                .about("Show one contact")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("new")
                .about("Create a contact")
                .arg(Arg::new("id").long("id").help("Caller-assigned ID"))
                .arg(Arg::new("first-name").long("first-name").required(true))
                .arg(Arg::new("last-name").long("last-name").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("phone").long("phone").required(true))
                .arg(
                    Arg::new("picture-url")
                        .long("picture-url")
                        .help("data:image/...;base64,... URL"),
                ),
        )
        .subcommand(
            Command::new("update")
                .about("Change one property of a contact")
                .arg(Arg::new("id").required(true))
                .arg(
                    Arg::new("property")
                        .required(true)
                        .help("FirstName, LastName, Email, Phone or PictureUrl"),
                )
                .arg(Arg::new("value").required(true)),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a contact")
                .arg(Arg::new("id").required(true))
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .help("Delete without asking for confirmation")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}

fn string_arg(matches: &ArgMatches, name: &str) -> String {
    matches.get_one::<String>(name).cloned().unwrap_or_default()
}

/// A delete prompt answer counts as yes only when it says so.
fn confirmed(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Print a view and fail the process if it ended in an error.
fn finish(rendered: String, error: Option<&String>) -> Result<()> {
    print!("{}", rendered);
    match error {
        Some(e) => bail!("{}", e),
        None => Ok(()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();

    let mut config = Config::from_env()?;
    if let Some(url) = matches.get_one::<String>("api-url") {
        Config::check_url("--api-url", url)?;
        config.api_url = url.clone();
    }

    let client: Arc<dyn AsyncContactClient> =
        Arc::new(AsyncContactClientImpl::new(ContactClient::new(&config)));

    match matches.subcommand() {
        Some(("list", _)) => {
            let mut view = AllContactsView::new(client);
            view.load().await;
            finish(view.render(), view.contacts.error.as_ref())
        }
        Some(("search", m)) => {
            let mut view = SearchContactView::new(client);
            view.id = string_arg(m, "id");
            view.submit().await;
            finish(view.render(), view.state.error.as_ref())
        }
        Some(("new", m)) => {
            let mut view = NewContactView::new(client);
            view.id = string_arg(m, "id");
            view.first_name = string_arg(m, "first-name");
            view.last_name = string_arg(m, "last-name");
            view.email = string_arg(m, "email");
            view.phone = string_arg(m, "phone");
            view.picture_url = string_arg(m, "picture-url");
            view.submit().await;
            finish(view.render(), view.state.error.as_ref())
        }
        Some(("update", m)) => {
            let mut view = UpdateContactView::new(client);
            view.id = string_arg(m, "id");
            view.property_name = string_arg(m, "property");
            view.property_value = string_arg(m, "value");
            view.submit().await;
            finish(view.render(), view.state.error.as_ref())
        }
        Some(("delete", m)) => {
            let mut view = DeleteContactView::new(client);
            view.id = string_arg(m, "id");
            view.fetch().await;
            if view.state.error.is_none() && !m.get_flag("yes") {
                print!("{}[y/N] ", view.render());
                io::stdout().flush()?;
                let answer = tokio::task::spawn_blocking(|| {
                    let mut line = String::new();
                    io::stdin().read_line(&mut line).map(|_| line)
                })
                .await??;
                if !confirmed(&answer) {
                    view.cancel();
                    println!("Cancelled");
                    return Ok(());
                }
            }
            view.confirm().await;
            finish(view.render(), view.state.error.as_ref())
        }
        _ => bail!("Unknown command"),
    }
}
