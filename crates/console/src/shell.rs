//! The interactive read-eval-print loop.

use std::io::{BufRead, Write};

use hbnb_core::{Argument, DomainError};
use hbnb_storage::{StorageError, StorageResult, Store};

use crate::command::Command;
use crate::config::{ConsoleConfig, PROMPT};
use crate::error::{ShellError, ShellResult};

/// Whether the session continues after a command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

const HELP_TOPICS: &[(&str, &str)] = &[
    ("create", "Create a new record of <Class>, save it and print its id.\n  create <Class>"),
    ("show", "Print one record.\n  show <Class> <id>  |  <Class>.show(\"<id>\")"),
    ("destroy", "Delete one record and save.\n  destroy <Class> <id>  |  <Class>.destroy(\"<id>\")"),
    ("all", "Print every record, or every record of <Class>.\n  all [<Class>]  |  <Class>.all()"),
    ("count", "Print the number of records of <Class>.\n  count <Class>  |  <Class>.count()"),
    (
        "update",
        "Set attributes on a record and save.\n  update <Class> <id> <attr> \"<value>\"\n  <Class>.update(\"<id>\", \"<attr>\", \"<value>\")\n  <Class>.update(\"<id>\", {\"<attr>\": <value>, ...})",
    ),
    ("help", "List commands, or describe one.\n  help [<command>]"),
    ("quit", "Quit command to exit the program"),
    ("EOF", "EOF command to exit the program"),
];

/// Command shell bound to one store and one output stream.
pub struct Console<W: Write> {
    store: Store,
    config: ConsoleConfig,
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(store: Store, config: ConsoleConfig, out: W) -> Self {
        Self { store, config, out }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_parts(self) -> (Store, W) {
        (self.store, self.out)
    }

    /// Read and execute lines until `quit`, `EOF` or end of input.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> ShellResult<()> {
        let mut line = String::new();
        loop {
            if self.config.show_prompt {
                write!(self.out, "{PROMPT}")?;
                self.out.flush()?;
            }

            line.clear();
            if input.read_line(&mut line)? == 0 {
                tracing::debug!("end of input");
                return self.execute("EOF").map(|_| ());
            }

            if self.execute(line.trim_end_matches(['\r', '\n']))? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Execute one line. Record errors are printed; only output failures
    /// are returned.
    pub fn execute(&mut self, line: &str) -> ShellResult<Flow> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(ShellError::UnknownSyntax(text)) => {
                writeln!(self.out, "*** Unknown syntax: {text}")?;
                return Ok(Flow::Continue);
            }
            Err(ShellError::Io(e)) => return Err(ShellError::Io(e)),
            Err(e) => {
                writeln!(self.out, "** {e} **")?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Empty => {}
            Command::Quit => return Ok(Flow::Exit),
            Command::Eof => {
                writeln!(self.out)?;
                return Ok(Flow::Exit);
            }
            Command::Help { topic } => self.help(topic.as_deref())?,
            command => match self.apply(command) {
                Ok(Some(text)) => writeln!(self.out, "{text}")?,
                Ok(None) => {}
                Err(e) => writeln!(self.out, "{}", render_error(&e))?,
            },
        }
        Ok(Flow::Continue)
    }

    fn apply(&mut self, command: Command) -> StorageResult<Option<String>> {
        let store = &mut self.store;
        match command {
            Command::Create { type_name } => {
                let id = store.create(type_name.as_deref(), Default::default())?;
                Ok(Some(id.to_string()))
            }
            Command::Show { type_name, id } => {
                let record = store.show(type_name.as_deref(), id.as_deref())?;
                Ok(Some(record.describe()))
            }
            Command::Destroy { type_name, id } => {
                store.destroy(type_name.as_deref(), id.as_deref())?;
                Ok(None)
            }
            Command::All { type_name } => {
                let rendered = store.list(type_name.as_deref())?;
                Ok(Some(format!("[{}]", rendered.join(", "))))
            }
            Command::Count { type_name } => {
                if type_name.is_none() {
                    return Err(DomainError::missing(Argument::TypeName).into());
                }
                Ok(Some(store.count(type_name.as_deref())?.to_string()))
            }
            Command::Update {
                type_name,
                id,
                field,
                value,
            } => {
                store.update(type_name.as_deref(), id.as_deref(), field.as_deref(), value)?;
                Ok(None)
            }
            Command::UpdateMany {
                type_name,
                id,
                fields,
            } => {
                store.update_many(type_name.as_deref(), id.as_deref(), fields)?;
                Ok(None)
            }
            Command::Empty | Command::Help { .. } | Command::Quit | Command::Eof => Ok(None),
        }
    }

    fn help(&mut self, topic: Option<&str>) -> ShellResult<()> {
        match topic {
            None => {
                writeln!(self.out)?;
                writeln!(self.out, "Documented commands (type help <topic>):")?;
                writeln!(self.out, "========================================")?;
                let names: Vec<&str> = HELP_TOPICS.iter().map(|(name, _)| *name).collect();
                writeln!(self.out, "{}", names.join("  "))?;
                writeln!(self.out)?;
            }
            Some(topic) => match HELP_TOPICS.iter().find(|(name, _)| *name == topic) {
                Some((_, text)) => writeln!(self.out, "{text}")?,
                None => writeln!(self.out, "*** No help on {topic}")?,
            },
        }
        Ok(())
    }
}

/// The user-facing line for a failed record operation.
pub fn render_error(error: &StorageError) -> String {
    match error.domain() {
        Some(DomainError::UnknownType(_)) => "** class doesn't exist **".to_string(),
        Some(DomainError::NotFound { .. }) => "** no instance found **".to_string(),
        Some(other) => format!("** {other} **"),
        None => {
            tracing::error!(error = %error, "storage failure");
            format!("** {error} **")
        }
    }
}
