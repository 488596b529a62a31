//! Interactive browsing loop.
//!
//! Reads commands from stdin while also reacting to committed search
//! queries and to logins/logouts made by other evdir processes.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use evdir_core::directory::Directory;
use evdir_core::error::EvdirError;
use evdir_core::event::EventId;
use evdir_core::selection::{AccessFilter, CategoryFilter, SortMode};
use evdir_core::store::LoadState;
use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::DirectoryContext;
use super::list::print_view;
use crate::render::render_detail;
use crate::utils::tui::create_spinner;

/// How often to check for logins/logouts from other processes.
const SESSION_POLL: Duration = Duration::from_secs(1);

#[derive(Debug, PartialEq)]
enum BrowseCommand {
    Search(String),
    Category(CategoryFilter),
    Access(AccessFilter),
    Sort(SortMode),
    Open(EventId),
    Close,
    Login { username: String, password: String },
    Logout,
    Refresh,
    List,
    Help,
    Quit,
}

impl BrowseCommand {
    fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match word {
            "" | "list" | "ls" => Ok(BrowseCommand::List),
            "search" | "/" => Ok(BrowseCommand::Search(rest.to_string())),
            "category" | "cat" => rest.parse().map(BrowseCommand::Category),
            "access" => rest.parse().map(BrowseCommand::Access),
            "sort" => rest.parse().map(BrowseCommand::Sort),
            "open" => rest
                .parse()
                .map(BrowseCommand::Open)
                .map_err(|_| format!("'{rest}' is not an event id")),
            "close" => Ok(BrowseCommand::Close),
            "login" => match rest.split_whitespace().collect::<Vec<_>>()[..] {
                [username, password] => Ok(BrowseCommand::Login {
                    username: username.to_string(),
                    password: password.to_string(),
                }),
                _ => Err("usage: login <username> <password>".into()),
            },
            "logout" => Ok(BrowseCommand::Logout),
            "refresh" | "retry" => Ok(BrowseCommand::Refresh),
            "help" | "?" => Ok(BrowseCommand::Help),
            "quit" | "exit" | "q" => Ok(BrowseCommand::Quit),
            other if other.starts_with('/') => {
                Ok(BrowseCommand::Search(line[1..].trim().to_string()))
            }
            other => Err(format!("unknown command '{other}', type `help`")),
        }
    }
}

pub async fn run(ctx: &DirectoryContext) -> Result<()> {
    let mut directory = Directory::new(
        Arc::clone(&ctx.store),
        Arc::clone(&ctx.session),
        ctx.config.debounce(),
    );

    let session_watcher = ctx.session.watch_store(SESSION_POLL);
    let mut session_rx = ctx.session.subscribe();
    let mut search_rx = directory.search_debouncer().subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_help();
    refresh(&directory).await;
    render(&directory);

    loop {
        prompt()?;

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                let command = match BrowseCommand::parse(&line) {
                    Ok(command) => command,
                    Err(message) => {
                        println!("{}", message.red());
                        continue;
                    }
                };

                match command {
                    BrowseCommand::Quit => break,
                    BrowseCommand::Help => print_help(),
                    BrowseCommand::List => render(&directory),
                    BrowseCommand::Search(query) => {
                        directory.set_search(query);
                        let note = format!("Searching for '{}'...", directory.search_draft());
                        println!("{}", note.dimmed());
                    }
                    BrowseCommand::Category(category) => {
                        directory.set_category(category);
                        render(&directory);
                    }
                    BrowseCommand::Access(access) => {
                        directory.set_access(access);
                        render(&directory);
                    }
                    BrowseCommand::Sort(sort) => {
                        directory.set_sort(sort);
                        render(&directory);
                    }
                    BrowseCommand::Open(id) => match directory.select(id) {
                        Ok(()) => render(&directory),
                        Err(EvdirError::EventNotFound(_)) => {
                            println!("{}", format!("Event {id} not found").red())
                        }
                        Err(e) => println!("{}", e.to_string().red()),
                    },
                    BrowseCommand::Close => {
                        directory.clear_selection();
                        render(&directory);
                    }
                    BrowseCommand::Login { username, password } => {
                        if directory.login(&username, &password) {
                            session_rx.borrow_and_update();
                            println!("{}", "Logged in.".green());
                            render(&directory);
                        } else {
                            println!("{}", "Invalid username or password.".red());
                        }
                    }
                    BrowseCommand::Logout => {
                        directory.logout();
                        session_rx.borrow_and_update();
                        println!("Logged out.");
                        render(&directory);
                    }
                    BrowseCommand::Refresh => {
                        refresh(&directory).await;
                        render(&directory);
                    }
                }
            }
            Ok(()) = search_rx.changed() => {
                search_rx.borrow_and_update();
                println!();
                render(&directory);
            }
            Ok(()) = session_rx.changed() => {
                let signed_in = *session_rx.borrow_and_update();
                let message = if signed_in {
                    "Logged in from another window."
                } else {
                    "Logged out from another window."
                };
                println!();
                println!("{}", message.yellow());
                render(&directory);
            }
        }
    }

    session_watcher.abort();
    Ok(())
}

async fn refresh(directory: &Directory) {
    let spinner = create_spinner("Loading events".to_string());
    directory.refetch().await;
    spinner.finish_and_clear();
}

fn render(directory: &Directory) {
    let view = match directory.view() {
        Ok(view) => view,
        Err(_) => {
            match directory.status() {
                LoadState::Errored(message) => {
                    println!("{}", format!("Failed to load events: {message}").red());
                    println!("{}", "Type `refresh` to retry.".dimmed());
                }
                _ => println!("{}", "Loading events...".dimmed()),
            }
            return;
        }
    };

    let is_authenticated = directory.is_authenticated();
    print_view(&view, &directory.selection(), is_authenticated);

    if let Some(event) = directory.selected_event() {
        println!();
        println!("{}", render_detail(&event, &view.visible, is_authenticated));
    }
}

fn prompt() -> Result<()> {
    print!("{} ", ">".bold());
    std::io::stdout().flush()?;
    Ok(())
}

fn print_help() {
    println!(
        "{}",
        "\
Commands:
  search <text> | /<text>     filter by text (empty clears)
  category <all|workshop|tech_talk|activity>
  access <all|public|private>
  sort <start|name|speakers>
  open <id> / close           show or hide an event's details
  login <user> <pass> / logout
  refresh                     reload events
  list, help, quit"
            .dimmed()
    );
}
