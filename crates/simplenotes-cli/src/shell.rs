//! Interactive shell over a [`NotesController`].
//!
//! Each input line is one command. Store failures land in the controller's
//! status and the loop keeps going.

use std::io::Write;

use chrono::Local;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use simplenotes_core::{Error, NoteId, NoteStore, NoteTag, Result};
use simplenotes_view::{NotesController, SortOrder, TagFilter};

use crate::render;

pub const HELP: &str = "\
Commands:
  search [TEXT]        filter by text in title or content (empty clears)
  tag all|TAG          filter by tag; while composing, set the draft tag
  sort fetch|date      order by fetch order reversed or by date
  refresh              reload notes from the server
  add                  start a new note
  title TEXT           set the draft title
  content TEXT         set the draft content
  delete ID            ask to delete a note
  confirm              save the draft or delete the pending note
  cancel               close the open dialog
  help                 show this help
  quit                 leave the shell";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    Tag(String),
    Sort(SortOrder),
    Refresh,
    Add,
    Title(String),
    Content(String),
    Delete(NoteId),
    Confirm,
    Cancel,
    Help,
    Quit,
}

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "search" | "s" => Self::Search(rest.to_string()),
            "tag" | "t" => Self::Tag(required(rest, "tag")?.to_string()),
            "sort" => Self::Sort(match required(rest, "sort")?.to_lowercase().as_str() {
                "fetch" => SortOrder::FetchOrderReversed,
                "date" => SortOrder::DateDescending,
                other => {
                    return Err(Error::InvalidInput(format!(
                        "Unknown ordering: {} (expected fetch or date)",
                        other
                    )))
                }
            }),
            "refresh" | "r" => Self::Refresh,
            "add" | "a" => Self::Add,
            "title" => Self::Title(rest.to_string()),
            "content" => Self::Content(rest.to_string()),
            "delete" | "d" => Self::Delete(required(rest, "delete")?.parse()?),
            "confirm" | "y" => Self::Confirm,
            "cancel" | "n" => Self::Cancel,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => {
                return Err(Error::InvalidInput(format!(
                    "Unknown command: {} (type help)",
                    other
                )))
            }
        };
        Ok(Some(command))
    }
}

fn required<'a>(rest: &'a str, command: &str) -> Result<&'a str> {
    if rest.is_empty() {
        Err(Error::InvalidInput(format!("{} needs an argument", command)))
    } else {
        Ok(rest)
    }
}

/// Shell session writing to `out`.
pub struct Shell<S, W> {
    controller: NotesController<S>,
    out: W,
}

impl<S: NoteStore, W: Write> Shell<S, W> {
    pub fn new(controller: NotesController<S>, out: W) -> Self {
        Self { controller, out }
    }

    pub fn controller(&self) -> &NotesController<S> {
        &self.controller
    }

    pub fn into_parts(self) -> (NotesController<S>, W) {
        (self.controller, self.out)
    }

    /// Load the notes, then run commands from `input` until quit or EOF.
    pub async fn run<R>(&mut self, input: R) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let _ = self.controller.refresh().await;
        self.show()?;

        let mut lines = input.lines();
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            if self.execute(&line).await? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Run one input line.
    pub async fn execute(&mut self, line: &str) -> anyhow::Result<Flow> {
        let command = match ShellCommand::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                writeln!(self.out, "Error: {}", e)?;
                return Ok(Flow::Continue);
            }
        };
        debug!(subsystem = "cli", component = "shell", command = ?command, "Shell command");

        self.controller.dismiss_status();
        let result = self.apply(command).await;
        match result {
            Ok(Flow::Quit) => return Ok(Flow::Quit),
            Ok(Flow::Continue) => {}
            // store failures are already in the status
            Err(e) if !self.controller.status().is_error() => {
                writeln!(self.out, "Error: {}", e)?;
            }
            Err(_) => {}
        }
        self.show()?;
        Ok(Flow::Continue)
    }

    async fn apply(&mut self, command: ShellCommand) -> Result<Flow> {
        let controller = &mut self.controller;
        match command {
            ShellCommand::Search(text) => controller.set_search_text(text),
            ShellCommand::Tag(value) => {
                if controller.state().is_composing() {
                    controller.draft_mut().tag = value.parse::<NoteTag>()?;
                } else {
                    controller.set_tag_filter(value.parse::<TagFilter>()?);
                }
            }
            ShellCommand::Sort(order) => controller.set_sort_order(order),
            ShellCommand::Refresh => {
                controller.refresh().await?;
            }
            ShellCommand::Add => controller.open_compose()?,
            ShellCommand::Title(text) => {
                composing(controller)?;
                controller.draft_mut().title = text;
            }
            ShellCommand::Content(text) => {
                composing(controller)?;
                controller.draft_mut().content = text;
            }
            ShellCommand::Delete(id) => controller.request_delete(id)?,
            ShellCommand::Confirm => {
                if controller.state().is_composing() {
                    controller.submit_draft().await?;
                } else {
                    controller.confirm_delete().await?;
                }
            }
            ShellCommand::Cancel => {
                if controller.state().is_composing() {
                    controller.cancel_compose();
                } else {
                    controller.cancel_delete();
                }
            }
            ShellCommand::Help => {
                let _ = writeln!(self.out, "{}", HELP);
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn show(&mut self) -> std::io::Result<()> {
        let state = self.controller.state();
        if let Some(modal) = render::render_modal(state) {
            writeln!(self.out, "{}", modal)?;
        } else {
            let view = self.controller.visible();
            writeln!(
                self.out,
                "{}",
                render::render_header(state, view.len(), self.controller.notes().len())
            )?;
            write!(self.out, "{}", render::render_list(&view, &Local))?;
        }
        if let Some(status) = render::render_status(self.controller.status()) {
            writeln!(self.out, "{}", status)?;
        }
        Ok(())
    }
}

fn composing<S: NoteStore>(controller: &NotesController<S>) -> Result<()> {
    if controller.state().is_composing() {
        Ok(())
    } else {
        Err(Error::InvalidInput(
            "no note is being composed (use add)".to_string(),
        ))
    }
}
