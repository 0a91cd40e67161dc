//! Commands understood by the interactive shell.
//!
//! Each line typed in `book-bound shell` parses into one [`ShellCommand`],
//! which maps onto one [`ListManager`](crate::manager::ListManager) intent.

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Search for a title; an empty query lists the whole catalog
    Search(String),
    /// Clear the results and the query
    Clear,
    /// Add the nth result (1-based) to the TBR list
    Add(usize),
    /// Add a free-text entry
    Note(String),
    /// Toggle an entry's completed flag
    Toggle(i64),
    /// Delete an entry
    Delete(i64),
    /// Show the TBR list
    List,
    /// Show the current results again
    Results,
    Help,
    Quit,
}

/// Why a shell line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShellError {
    #[error("Unknown command: {0} (type 'help')")]
    Unknown(String),

    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("Not a valid {expected}: {value}")]
    InvalidArgument {
        expected: &'static str,
        value: String,
    },
}

/// Help text listing every command
pub const HELP: &str = "\
Commands:
  search <title>   search for books (remote first, catalog fallback)
  results          show the current results
  clear            clear results and query
  add <n>          add result number n to your TBR list
  note <text>      add a free-text entry
  toggle <id>      mark an entry read / unread
  delete <id>      remove an entry
  list             show your TBR list
  help             show this help
  quit             leave the shell";

impl ShellCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, ShellError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "search" | "s" => ShellCommand::Search(rest.to_string()),
            "clear" | "c" => ShellCommand::Clear,
            "add" | "a" => ShellCommand::Add(parse_position(rest)?),
            "note" | "n" => {
                if rest.is_empty() {
                    return Err(ShellError::MissingArgument {
                        command: "note",
                        expected: "some text",
                    });
                }
                ShellCommand::Note(rest.to_string())
            }
            "toggle" | "t" | "done" => ShellCommand::Toggle(parse_id("toggle", rest)?),
            "delete" | "d" | "rm" => ShellCommand::Delete(parse_id("delete", rest)?),
            "list" | "ls" | "l" => ShellCommand::List,
            "results" | "r" => ShellCommand::Results,
            "help" | "h" | "?" => ShellCommand::Help,
            "quit" | "q" | "exit" => ShellCommand::Quit,
            other => return Err(ShellError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_position(value: &str) -> Result<usize, ShellError> {
    if value.is_empty() {
        return Err(ShellError::MissingArgument {
            command: "add",
            expected: "a result number",
        });
    }

    match value.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(ShellError::InvalidArgument {
            expected: "result number",
            value: value.to_string(),
        }),
    }
}

fn parse_id(command: &'static str, value: &str) -> Result<i64, ShellError> {
    if value.is_empty() {
        return Err(ShellError::MissingArgument {
            command,
            expected: "an entry id",
        });
    }

    value.parse::<i64>().map_err(|_| ShellError::InvalidArgument {
        expected: "entry id",
        value: value.to_string(),
    })
}
