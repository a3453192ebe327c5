//! CLI binary for pdf2cards.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `GenerationConfig` and prints or exports the resulting deck.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2cards::{
    export_pdf, export_txt, format_txt, generate, CardStore, GenerationConfig,
    GenerationProgressCallback, GenerationStage, JsonFileStore, ProgressCallback,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one spinner whose message follows the
/// pipeline stage currently running.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Generating");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl GenerationProgressCallback for CliProgressCallback {
    fn on_stage(&self, stage: GenerationStage) {
        let msg = match stage {
            GenerationStage::Extracting => "Extracting text from the PDF…",
            GenerationStage::Truncating => "Preparing input…",
            GenerationStage::Requesting => "Asking the AI for flashcards…",
            GenerationStage::Parsing => "Reading the AI response…",
            GenerationStage::Mapping => "Building the deck…",
        };
        self.bar.set_message(msg);
    }

    fn on_complete(&self, card_count: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} flashcards generated",
            green("✔"),
            bold(&card_count.to_string())
        );
    }

    fn on_error(&self, stage: GenerationStage, error: &str) {
        self.bar.finish_and_clear();
        eprintln!("{} {} failed: {}", red("✘"), stage, red(error));
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Generate flashcards and print them (numbered Q/A text)
  pdf2cards notes.pdf

  # Export to a file; the extension picks the format (.txt, .pdf, .json)
  pdf2cards notes.pdf -o flashcards.txt
  pdf2cards notes.pdf -o flashcards.pdf

  # Structured JSON on stdout (cards, warning, stats)
  pdf2cards --json notes.pdf > deck.json

  # Keep the deck for later runs
  pdf2cards --save notes.pdf
  pdf2cards --load -o flashcards.txt

  # Fewer cards, smaller input budget
  pdf2cards --max-cards 10 --max-chars 4000 chapter.pdf

ENVIRONMENT VARIABLES:
  PDF2CARDS_API_KEY    Bearer credential for the AI endpoint
  PDF2CARDS_MODEL      Override the model ID (default: openai)
  PDF2CARDS_ENDPOINT   Override the chat-completion endpoint URL

NOTES:
  Only PDFs with selectable text work; scanned or image-only PDFs have no
  extractable text and are rejected. Long documents are truncated to the
  input budget (default 7000 characters) with a warning.
"#;

/// Generate study flashcards from a PDF using an AI model.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2cards",
    version,
    about = "Generate study flashcards from a PDF using an AI model",
    long_about = "Extract the text of a PDF document, send it to a chat-completion endpoint, \
and turn the response into question/answer flashcards. The deck can be printed, exported \
as text or a printable PDF, or saved for later study sessions.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file to generate flashcards from. Optional with --load.
    input: Option<PathBuf>,

    /// Write the deck to this file; format chosen by extension
    /// (.txt, .pdf, .json).
    #[arg(short, long, env = "PDF2CARDS_OUTPUT")]
    output: Option<PathBuf>,

    /// Model ID placed in the request payload.
    #[arg(long, env = "PDF2CARDS_MODEL")]
    model: Option<String>,

    /// Chat-completion endpoint URL.
    #[arg(long, env = "PDF2CARDS_ENDPOINT")]
    endpoint: Option<String>,

    /// Bearer credential for the endpoint.
    #[arg(long, env = "PDF2CARDS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Input character budget; longer documents are truncated.
    #[arg(long, env = "PDF2CARDS_MAX_CHARS", default_value_t = 7000)]
    max_chars: usize,

    /// Response-length ceiling requested from the model.
    #[arg(long, env = "PDF2CARDS_MAX_TOKENS", default_value_t = 1000)]
    max_tokens: usize,

    /// Maximum number of cards to keep (1–25).
    #[arg(long, env = "PDF2CARDS_MAX_CARDS", default_value_t = 25,
          value_parser = clap::value_parser!(usize))]
    max_cards: usize,

    /// Save the generated deck to the local deck file.
    #[arg(long)]
    save: bool,

    /// Load the previously saved deck instead of generating.
    #[arg(long, conflicts_with_all = ["save", "model", "endpoint"])]
    load: bool,

    /// Output structured JSON (cards, warning, stats) instead of text.
    #[arg(long, env = "PDF2CARDS_JSON")]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long, env = "PDF2CARDS_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2CARDS_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the deck itself.
    #[arg(short, long, env = "PDF2CARDS_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner provides the user feedback; keep library logs at error
    // level while it is active so they don't tear the terminal.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Load-only mode ───────────────────────────────────────────────────
    if cli.load {
        let store = JsonFileStore::default_location()
            .context("Cannot determine a data directory for the saved deck")?;
        let cards = store.load();
        if cards.is_empty() && !cli.quiet {
            eprintln!("{} no saved deck at {}", cyan("◆"), store.path().display());
        }
        emit_cards(&cli, &cards)?;
        return Ok(());
    }

    let input = cli
        .input
        .as_deref()
        .context("An input PDF is required (or use --load)")?;

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn GenerationProgressCallback>)
    } else {
        None
    };

    let mut builder = GenerationConfig::builder()
        .max_input_chars(cli.max_chars)
        .max_tokens(cli.max_tokens)
        .max_cards(cli.max_cards);
    if let Some(ref model) = cli.model {
        builder = builder.model(model);
    }
    if let Some(ref endpoint) = cli.endpoint {
        builder = builder.endpoint(endpoint);
    }
    if let Some(ref key) = cli.api_key {
        builder = builder.api_key(key);
    }
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Generate ─────────────────────────────────────────────────────────
    let output = generate(input, &config)
        .await
        .context("Flashcard generation failed")?;

    if let Some(ref warning) = output.warning {
        eprintln!("{} {}", cyan("⚠"), warning);
    }

    if cli.save {
        let store = JsonFileStore::default_location()
            .context("Cannot determine a data directory for the saved deck")?;
        store.save(&output.cards);
        if !cli.quiet {
            eprintln!("{} deck saved to {}", dim("→"), store.path().display());
        }
    }

    if cli.json {
        emit_json(&output, cli.output.as_deref())?;
        if let Some(ref path) = cli.output {
            if !cli.quiet {
                eprintln!(
                    "{} {} cards  →  {}",
                    green("✔"),
                    output.cards.len(),
                    bold(&path.display().to_string())
                );
            }
        }
        return Ok(());
    }

    emit_cards(&cli, &output.cards)?;

    if !cli.quiet && !show_progress {
        eprintln!(
            "Generated {} cards in {}ms {}",
            output.stats.card_count,
            output.stats.total_duration_ms,
            dim(&format!("({}ms remote)", output.stats.request_duration_ms)),
        );
    }

    Ok(())
}

/// Print the deck to stdout, or export it to `--output` by extension.
fn emit_cards(cli: &Cli, cards: &[pdf2cards::Flashcard]) -> Result<()> {
    match cli.output {
        Some(ref path) => {
            match extension_of(path) {
                Some("pdf") => export_pdf(cards, path).context("PDF export failed")?,
                Some("json") => {
                    let json = serde_json::to_string_pretty(cards)
                        .context("Failed to serialise the deck")?;
                    std::fs::write(path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                }
                // .txt and anything else gets the plain-text format.
                _ => export_txt(cards, path).context("Text export failed")?,
            }
            if !cli.quiet {
                eprintln!(
                    "{} {} cards  →  {}",
                    green("✔"),
                    cards.len(),
                    bold(&path.display().to_string())
                );
            }
        }
        None => {
            if cli.json {
                let json = serde_json::to_string_pretty(cards)
                    .context("Failed to serialise the deck")?;
                println!("{json}");
            } else {
                let text = format_txt(cards);
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                handle
                    .write_all(text.as_bytes())
                    .context("Failed to write to stdout")?;
                if !text.is_empty() && !text.ends_with('\n') {
                    handle.write_all(b"\n").ok();
                }
            }
        }
    }
    Ok(())
}

/// Emit the full run output (cards, warning, stats) as pretty JSON, to the
/// output path when one was given, otherwise to stdout.
fn emit_json(output: &pdf2cards::GenerationOutput, path: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(output).context("Failed to serialise output")?;
    match path {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}
