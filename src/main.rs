//! Spanpath CLI - dot-path search over JSON-like files

use std::io::Write;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use serde::Serialize;
use tokio::sync::mpsc;

use spanpath::{
    offset_to_position, FileSource, FixSuggestion, LiveEvent, LiveSearch, Position, ResolveError,
    Resolver, SelectionSink, Span,
};

#[derive(Parser)]
#[command(name = "spanpath")]
#[command(about = "Locate values in JSON-like text by dot path")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a dot path once and print the matched span
    Search {
        /// Document to search
        file: String,

        /// Dot notation path (e.g. page.inventory.definitions.title)
        path: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Search interactively: the selection follows as you type
    SearchLive {
        /// Document to search
        file: String,

        /// Debounce delay in milliseconds between keystrokes and resolution
        #[arg(long, default_value_t = 150)]
        debounce_ms: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Search { file, path, format } => search(&file, &path, format).await,
        Commands::SearchLive { file, debounce_ms } => search_live(&file, debounce_ms).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e
            .downcast_ref::<ResolveError>()
            .and_then(|r| r.fix_suggestion())
        {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

#[derive(Serialize)]
struct SearchReport<'a> {
    path: &'a str,
    span: Span,
    start: Position,
    end: Position,
    value: &'a str,
}

async fn search(file: &str, path: &str, format: Format) -> anyhow::Result<()> {
    let text = tokio::fs::read_to_string(file).await?;

    let resolver = Resolver::new();
    let span = resolver.resolve(&text, path.trim())?;
    let start = offset_to_position(&text, span.start);
    let end = offset_to_position(&text, span.end);
    let value = span.slice(&text).unwrap_or_default();

    match format {
        Format::Text => {
            println!(
                "{} {} matched at {}-{}",
                "✓".green(),
                path.trim().cyan().bold(),
                start,
                end
            );
            println!("{value}");
        }
        Format::Json => {
            let report = SearchReport {
                path: path.trim(),
                span,
                start,
                end,
                value,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Prints each new selection above the prompt. Re-reads the file for the
/// snippet since the sink only receives the span.
struct TerminalSink {
    file: String,
}

impl SelectionSink for TerminalSink {
    fn select(&mut self, span: Span, start: Position, end: Position) {
        let snippet: String = std::fs::read_to_string(&self.file)
            .ok()
            .and_then(|text| span.slice(&text).map(str::to_string))
            .unwrap_or_default()
            .lines()
            .next()
            .unwrap_or("")
            .chars()
            .take(60)
            .collect();
        // Raw mode needs explicit carriage returns.
        print!("\r\n{} {}-{} {}\r\n", "✓".green(), start, end, snippet);
        let _ = std::io::stdout().flush();
    }
}

async fn search_live(file: &str, debounce_ms: u64) -> anyhow::Result<()> {
    let source = FileSource::new(file);
    let sink = TerminalSink {
        file: file.to_string(),
    };
    let (tx, rx) = mpsc::channel(32);
    let session = LiveSearch::new(source, sink, rx)
        .with_debounce(Duration::from_millis(debounce_ms));
    let session = tokio::spawn(session.run());

    println!(
        "{} type a dot path; {} accepts, {} cancels",
        "→".cyan(),
        "enter".bold(),
        "esc".bold()
    );

    enable_raw_mode()?;
    let result = input_loop(&tx).await;
    disable_raw_mode()?;
    println!();

    drop(tx);
    let _sink = session.await?;
    result
}

/// Raw-mode key loop: every change to the input buffer is sent to the live
/// session as an edit; enter accepts, esc (or ctrl-c) cancels.
async fn input_loop(tx: &mpsc::Sender<LiveEvent>) -> anyhow::Result<()> {
    let mut input = String::new();
    redraw(&input)?;
    loop {
        let Some(key) = poll_key(Duration::from_millis(50))? else {
            continue;
        };
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Esc) => {
                tx.send(LiveEvent::Cancel).await?;
                return Ok(());
            }
            (_, KeyCode::Enter) => {
                tx.send(LiveEvent::Accept(input.clone())).await?;
                return Ok(());
            }
            (_, KeyCode::Backspace) => {
                input.pop();
                redraw(&input)?;
                tx.send(LiveEvent::Edit(input.clone())).await?;
            }
            (_, KeyCode::Char(c)) => {
                input.push(c);
                redraw(&input)?;
                tx.send(LiveEvent::Edit(input.clone())).await?;
            }
            _ => {}
        }
    }
}

/// Poll for a key press with a timeout
fn poll_key(timeout: Duration) -> std::io::Result<Option<KeyEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}

fn redraw(input: &str) -> std::io::Result<()> {
    use crossterm::{cursor, execute, terminal};
    let mut out = std::io::stdout();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(terminal::ClearType::CurrentLine)
    )?;
    print!("> {input}");
    out.flush()
}
