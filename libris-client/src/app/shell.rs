//! Line-oriented front end
//!
//! Parses one command per line, runs it against [`AppState`] and renders the
//! result as plain text. Rendering only reads what the view-models expose.

use std::fmt::Write as _;

use libris_model::{MediaId, MediaItem};
use log::debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::app::state::{AppState, DashboardTab};
use crate::domains::catalog::{ApplyStatus, SnapshotKind, SortDirection, SortKey};
use crate::error::ClientError;

const HELP: &str = "\
Commands:
  login <id> <password>   sign in
  logout                  sign out and clear the catalog
  list                    fetch the full listing
  search [text]           search by name (empty text lists everything)
  sort <field>            sort by id, type, name, borrowable, vendor or renter
  select <id>             toggle an item for checkout
  batch                   show the items selected for checkout
  checkout                reserve the selected items
  show <id>               show one item in detail
  tab <search|full>       switch dashboard tab
  menu                    show the navigation menu for your rank
  status                  show session details
  help                    show this text
  quit                    leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Login { id: String, password: String },
    Logout,
    List,
    Search(String),
    Sort(SortKey),
    Select(MediaId),
    Batch,
    Checkout,
    Show(MediaId),
    Tab(DashboardTab),
    Menu,
    Status,
    Help,
    Quit,
}

impl ShellCommand {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "login" => {
                let (id, password) = rest
                    .split_once(char::is_whitespace)
                    .ok_or("usage: login <id> <password>")?;
                ShellCommand::Login {
                    id: id.to_string(),
                    password: password.trim().to_string(),
                }
            }
            "logout" => ShellCommand::Logout,
            "list" => ShellCommand::List,
            "search" => ShellCommand::Search(rest.to_string()),
            "sort" => ShellCommand::Sort(rest.parse()?),
            "select" => ShellCommand::Select(parse_media_id(rest)?),
            "batch" => ShellCommand::Batch,
            "checkout" => ShellCommand::Checkout,
            "show" => ShellCommand::Show(parse_media_id(rest)?),
            "tab" => ShellCommand::Tab(rest.parse()?),
            "menu" => ShellCommand::Menu,
            "status" | "whoami" => ShellCommand::Status,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => return Err(format!("unknown command `{other}`, try `help`")),
        };
        Ok(Some(command))
    }
}

fn parse_media_id(raw: &str) -> Result<MediaId, String> {
    raw.parse()
        .map_err(|_| format!("expected a media id, got {raw:?}"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    Continue(String),
    Quit,
}

#[derive(Debug)]
pub struct Shell {
    state: AppState,
}

impl Shell {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Read commands until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        output.write_all(b"libris> ").await?;
        output.flush().await?;

        while let Some(line) = lines.next_line().await? {
            let reply = match ShellCommand::parse(&line) {
                Ok(None) => String::new(),
                Ok(Some(command)) => match self.execute(command).await {
                    ShellOutcome::Continue(text) => text,
                    ShellOutcome::Quit => break,
                },
                Err(message) => message,
            };
            if !reply.is_empty() {
                output.write_all(reply.as_bytes()).await?;
                output.write_all(b"\n").await?;
            }
            output.write_all(b"libris> ").await?;
            output.flush().await?;
        }
        output.write_all(b"\n").await?;
        output.flush().await
    }

    pub async fn execute(&mut self, command: ShellCommand) -> ShellOutcome {
        debug!("[Shell] {:?}", redacted(&command));
        let result = match command {
            ShellCommand::Quit => return ShellOutcome::Quit,
            ShellCommand::Help => Ok(HELP.to_string()),
            ShellCommand::Login { id, password } => self.login(&id, &password).await,
            ShellCommand::Logout => {
                self.state.logout();
                Ok("Signed out.".to_string())
            }
            ShellCommand::List => self.list().await,
            ShellCommand::Search(text) => self.search(&text).await,
            ShellCommand::Sort(key) => self.state.set_sort(key).map(|spec| {
                let arrow = match spec.direction {
                    SortDirection::Ascending => "ascending",
                    SortDirection::Descending => "descending",
                };
                format!("Sorted by {} ({arrow}).\n{}", spec.key, self.render_items())
            }),
            ShellCommand::Select(id) => self
                .state
                .toggle_select(id)
                .map(|checked| {
                    let verb = if checked { "Selected" } else { "Deselected" };
                    format!("{verb} {id}.")
                }),
            ShellCommand::Batch => Ok(self.render_batch()),
            ShellCommand::Checkout => self.checkout().await,
            ShellCommand::Show(id) => Ok(match self.state.catalog().item(id) {
                Some(item) => item.to_string(),
                None => format!("Item {id} is not on display."),
            }),
            ShellCommand::Tab(tab) => {
                self.state.set_tab(tab);
                Ok(format!("Switched to {tab}."))
            }
            ShellCommand::Menu => Ok(self.render_menu()),
            ShellCommand::Status => Ok(self.render_status()),
        };

        ShellOutcome::Continue(result.unwrap_or_else(|err| format!("Error: {err}")))
    }

    async fn login(&mut self, id: &str, password: &str) -> Result<String, ClientError> {
        if self.state.auth().is_authenticated() {
            self.state.logout();
        }
        if !self.state.login(id, password).await? {
            return Ok("Invalid credentials.".to_string());
        }
        let rank = self.state.permissions().rank();
        Ok(format!("Signed in as {id} ({rank}).\n{}", self.render_menu()))
    }

    async fn list(&mut self) -> Result<String, ClientError> {
        self.state.set_tab(DashboardTab::FullView);
        let status = self.state.load_all().await?;
        Ok(self.after_load(status))
    }

    async fn search(&mut self, text: &str) -> Result<String, ClientError> {
        self.state.set_tab(DashboardTab::Search);
        let status = self.state.search(text).await?;
        Ok(self.after_load(status))
    }

    async fn checkout(&mut self) -> Result<String, ClientError> {
        let receipt = self.state.submit_checkout().await?;
        let ids: Vec<String> = receipt.submitted.iter().map(ToString::to_string).collect();
        let mut text = format!("Reserved {} item(s): {}.", ids.len(), ids.join(", "));
        if receipt.status == ApplyStatus::Applied {
            text.push('\n');
            text.push_str(&self.render_items());
        }
        Ok(text)
    }

    fn after_load(&self, status: ApplyStatus) -> String {
        match status {
            ApplyStatus::Applied => self.render_items(),
            ApplyStatus::Stale => "A newer result is already on display.".to_string(),
        }
    }

    fn render_items(&self) -> String {
        let catalog = self.state.catalog();
        let mut out = String::new();
        match catalog.snapshot().map(|snapshot| &snapshot.kind) {
            None => return "Nothing loaded yet.".to_string(),
            Some(SnapshotKind::Search { query }) => {
                let _ = writeln!(out, "Search results for {query:?}:");
            }
            Some(_) => {
                let _ = writeln!(out, "Full listing:");
            }
        }

        let _ = writeln!(
            out,
            "{:3} {:>6}  {:<10} {:<24} {:<5} {:<20} {}",
            "", "ID", "Type", "Name", "Avail", "Vendor", "Renter"
        );
        for item in catalog.sorted_view() {
            let id = item.id();
            let selectable = catalog.selection().contains(id);
            let _ = writeln!(out, "{}", render_row(item, selectable, catalog.is_selected(id)));
        }
        let _ = write!(out, "{} item(s)", catalog.items().len());
        out
    }

    fn render_batch(&self) -> String {
        let batch = self.state.checkout().current_batch(self.state.catalog());
        if batch.is_empty() {
            return "No items selected.".to_string();
        }
        let mut out = String::from("Selected for checkout:");
        for item in batch {
            let _ = write!(out, "\n  {} {}", item.id(), item.name());
        }
        out
    }

    fn render_menu(&self) -> String {
        let menu = self.state.menu();
        if menu.is_empty() {
            return "No navigation entries available.".to_string();
        }
        let mut out = String::new();
        for category in menu {
            let _ = writeln!(out, "{}: {}", category.title, category.entries.join(", "));
        }
        out.pop();
        out
    }

    fn render_status(&self) -> String {
        let auth = self.state.auth();
        let flags = self.state.visibility();
        let mut out = match auth.state().user_id() {
            Some(id) if auth.is_authenticated() => format!(
                "Signed in as {id}, rank {}",
                auth.rank().map_or("pending".to_string(), |rank| rank.to_string())
            ),
            _ => "Signed out".to_string(),
        };
        let _ = write!(
            out,
            "\nTab: {}\nButtons: media={} employees={} settings={}",
            self.state.tab(),
            flags.media_button,
            flags.employees_button,
            flags.settings_button
        );
        if let Some(receipt) = self.state.checkout().last_receipt() {
            let _ = write!(out, "\nLast checkout: {} item(s)", receipt.submitted.len());
        }
        out
    }
}

fn render_row(item: &MediaItem, selectable: bool, selected: bool) -> String {
    let marker = match (selectable && item.borrowable(), selected) {
        (_, true) => "[x]",
        (true, false) => "[ ]",
        (false, false) => "",
    };
    format!(
        "{:3} {:>6}  {:<10} {:<24} {:<5} {:<20} {}",
        marker,
        item.id(),
        item.media_type().to_string(),
        item.name(),
        if item.borrowable() { "yes" } else { "no" },
        item.vendor(),
        item.renter()
    )
}

fn redacted(command: &ShellCommand) -> ShellCommand {
    match command {
        ShellCommand::Login { id, .. } => ShellCommand::Login {
            id: id.clone(),
            password: "<redacted>".to_string(),
        },
        other => other.clone(),
    }
}
