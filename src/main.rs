use anyhow::{Context, Result};
use book_bound::config::{
    find_config_file, get_config, load_config, user_config_path, Config, ConfigFile, LogFormat,
};
use book_bound::manager::{ListManager, Snapshot};
use book_bound::models::{ListItem, ReferenceBook, SearchResults};
use book_bound::search::SearchEngine;
use book_bound::sources::StaticCatalog;
use book_bound::shell::{ShellCommand, HELP};
use book_bound::ui::{self, print_status, SearchSpinner, Status};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Book Bound - search for books and keep a to-be-read list
#[derive(Parser, Debug)]
#[command(name = "book-bound")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search for books and keep a to-be-read list", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Lookup timeout in seconds (0 = none), overrides the config file
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Only search the built-in reference catalog
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

impl OutputFormat {
    fn resolve(self) -> Self {
        match self {
            OutputFormat::Auto if std::io::stdout().is_terminal() => OutputFormat::Table,
            OutputFormat::Auto => OutputFormat::Json,
            other => other,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for books by title
    #[command(alias = "s")]
    Search {
        /// Title, or part of one
        query: String,
    },

    /// List the built-in reference catalog
    Catalog,

    /// Interactive session with a TBR list (default)
    Shell,

    /// Write a config file with the default settings
    InitConfig {
        /// Where to write (default: user config directory)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

fn load_settings(cli: &Cli) -> Result<(Config, Option<PathBuf>)> {
    let path = cli.config.clone().or_else(find_config_file);
    let mut config = match &path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => get_config().context("Failed to read configuration from environment")?,
    };

    if let Some(timeout) = cli.timeout {
        config.lookup.timeout_seconds = timeout;
    }
    if cli.offline {
        config.lookup.enabled = false;
    }

    Ok((config, path))
}

fn init_tracing(cli: &Cli, config: &Config) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => config.logging.level.as_str(),
        (false, 1) => "debug",
        (false, _) => "trace",
    };

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("book_bound={}", level)),
    );
    let json = config.logging.format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, config_path) = load_settings(&cli)?;

    init_tracing(&cli, &config);
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    let format = cli.output.resolve();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Search { query } => {
            let engine = SearchEngine::from_config(&config)?;
            let spinner = SearchSpinner::start(&query);
            let results = engine.search(&query).await;
            spinner.finish();
            output_results(&results, format)?;
        }

        Commands::Catalog => {
            output_books(StaticCatalog::seeded().books(), format)?;
        }

        Commands::Shell => {
            let manager = ListManager::from_config(&config)?;
            run_shell(manager, format).await?;
        }

        Commands::InitConfig { path, force } => {
            let path = path
                .or_else(user_config_path)
                .context("Could not determine a config directory; pass a path")?;
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            ConfigFile::default().save(&path)?;
            print_status(Status::Success, &format!("Wrote {}", path.display()));
        }
    }

    Ok(())
}

/// One read from the shell's input
#[derive(Debug)]
enum Input {
    Line(String),
    /// The line was not valid UTF-8 and has been skipped
    Unreadable(std::io::Error),
    Eof,
}

async fn next_input<R>(lines: &mut Lines<R>) -> std::io::Result<Input>
where
    R: AsyncBufRead + Unpin,
{
    match lines.next_line().await {
        Ok(Some(line)) => Ok(Input::Line(line)),
        Ok(None) => Ok(Input::Eof),
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => Ok(Input::Unreadable(e)),
        Err(e) => Err(e),
    }
}

async fn run_shell(mut manager: ListManager, format: OutputFormat) -> Result<()> {
    let interactive = std::io::stdin().is_terminal();
    if interactive {
        ui::print_banner();
        if !manager.engine().is_online() {
            print_status(Status::Info, "Offline: searching the reference catalog only");
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if interactive {
            print!("book-bound> ");
            std::io::stdout().flush()?;
        }

        let line = match next_input(&mut lines).await? {
            Input::Line(line) => line,
            Input::Eof => break,
            Input::Unreadable(e) => {
                print_status(Status::Error, &format!("Could not read that line: {}", e));
                continue;
            }
        };

        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                print_status(Status::Error, &e.to_string());
                continue;
            }
        };

        match command {
            ShellCommand::Search(query) => {
                manager.set_query(query);
                let pending = manager.start_search();
                let spinner = SearchSpinner::for_snapshot(&manager.snapshot());
                let done = pending.run().await;
                manager.finish_search(done);
                if let Some(spinner) = spinner {
                    spinner.finish();
                }
                show_results(&manager.snapshot(), format)?;
            }
            ShellCommand::Results => show_results(&manager.snapshot(), format)?,
            ShellCommand::Clear => {
                manager.clear_search();
                print_status(Status::Info, "Search cleared");
            }
            ShellCommand::Add(position) => match manager.add_result(position - 1) {
                Some(item) => {
                    let msg = format!("Added \"{}\" (id {})", item.display_text, item.id);
                    print_status(Status::Success, &msg);
                }
                None => match manager.snapshot().results.get(position - 1) {
                    None => print_status(
                        Status::Error,
                        &format!("There is no result number {}", position),
                    ),
                    Some(book) if book.is_no_results() => {
                        print_status(Status::Error, "Nothing to add")
                    }
                    Some(book) => print_status(
                        Status::Warning,
                        &format!("\"{}\" is already on your list", book.display_text()),
                    ),
                },
            },
            ShellCommand::Note(text) => {
                let item = manager.add_text(text);
                let msg = format!("Added \"{}\" (id {})", item.display_text, item.id);
                print_status(Status::Success, &msg);
            }
            ShellCommand::Toggle(id) => {
                if manager.toggle_completed(id) {
                    show_items(&manager.snapshot().items, format)?;
                } else {
                    print_status(Status::Error, &format!("No entry with id {}", id));
                }
            }
            ShellCommand::Delete(id) => {
                if manager.delete(id) {
                    print_status(Status::Success, &format!("Deleted entry {}", id));
                } else {
                    print_status(Status::Error, &format!("No entry with id {}", id));
                }
            }
            ShellCommand::List => show_items(&manager.snapshot().items, format)?,
            ShellCommand::Help => println!("{}", HELP),
            ShellCommand::Quit => break,
        }
    }

    Ok(())
}

fn show_results(view: &Snapshot, format: OutputFormat) -> Result<()> {
    match &view.last_outcome {
        Some(outcome) => {
            let results =
                SearchResults::new(view.query.clone(), view.results.clone(), outcome.clone());
            output_results(&results, format)
        }
        None => {
            print_status(Status::Info, "No search yet");
            Ok(())
        }
    }
}

fn output_results(results: &SearchResults, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(results)?),
        _ => {
            let count = if results.is_empty_placeholder() {
                0
            } else {
                results.books.len()
            };
            ui::print_search_header(&results.query, count, &results.outcome);
            output_books(&results.books, format)?;
        }
    }
    Ok(())
}

fn output_books(books: &[ReferenceBook], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(books)?),
        OutputFormat::Plain => {
            for (i, book) in books.iter().enumerate() {
                if book.is_no_results() {
                    println!("{}", book.title);
                } else {
                    println!("{}. {}", i + 1, book.display_text());
                }
            }
        }
        _ => println!("{}", ui::results_table(books)),
    }
    Ok(())
}

fn show_items(items: &[ListItem], format: OutputFormat) -> Result<()> {
    if items.is_empty() && format != OutputFormat::Json {
        print_status(Status::Info, "Your TBR list is empty");
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(items)?),
        OutputFormat::Plain => {
            for item in items {
                let mark = if item.completed { "x" } else { " " };
                println!("[{}] {} {}", mark, item.id, item.display_text);
            }
        }
        _ => println!("{}", ui::items_table(items)),
    }
    Ok(())
}
