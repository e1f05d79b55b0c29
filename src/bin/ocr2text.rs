//! CLI binary for edgequake-ocr.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ExtractionConfig` and prints the recognised text.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_ocr::{
    ExtractionConfig, ExtractionProgressCallback, ProgressCallback, TesseractEngine, TextExtractor,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
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

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a bar anchored at the bottom of stderr plus
/// one log line per recognised page.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    /// Start with a spinner; the bar length is set once the page count is known.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Rendering…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }
}

impl ExtractionProgressCallback for CliProgressCallback {
    fn on_extraction_start(&self, total_pages: usize) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} pages  \
             ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        self.bar.set_length(total_pages as u64);
        self.bar.set_style(style);
        self.bar.set_prefix("Recognising");
    }

    fn on_page_start(&self, page_num: usize, _total: usize) {
        self.bar.set_message(format!("page {page_num}"));
    }

    fn on_page_complete(&self, page_num: usize, total: usize, chars: usize) {
        let note = if chars == 0 {
            dim("blank")
        } else {
            dim(&format!("{chars:>5} chars"))
        };
        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {}",
            green("✓"),
            page_num,
            total,
            note
        ));
        self.bar.inc(1);
    }

    fn on_page_error(&self, page_num: usize, total: usize, error: &str) {
        let first_line = red(error.lines().next().unwrap_or(error));
        if page_num == 0 {
            self.bar.println(format!("  {} {}", red("✗"), first_line));
        } else {
            self.bar.println(format!(
                "  {} Page {:>3}/{:<3}  {}",
                red("✗"),
                page_num,
                total,
                first_line,
            ));
        }
        self.bar.finish_and_clear();
    }

    fn on_extraction_complete(&self, total_pages: usize, non_empty_pages: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} pages recognised ({} with text)",
            green("✔"),
            bold(&total_pages.to_string()),
            non_empty_pages
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Image to stdout
  ocr2text receipt.jpg

  # Scanned PDF to a file
  ocr2text scan.pdf -o scan.txt

  # Declared type overrides the extension
  ocr2text upload.bin --file-type pdf

  # Reject unknown --file-type values instead of treating them as images
  ocr2text upload.bin --file-type pdg --strict

  # Custom engine locations
  ocr2text --tesseract-cmd /opt/tesseract/bin/tesseract \
           --pdfium-lib /opt/pdfium/lib scan.pdf

  # Per-page JSON
  ocr2text --json scan.pdf > scan.json

  # Check the OCR engine
  ocr2text --check

ENVIRONMENT VARIABLES:
  OCR2TEXT_TESSERACT_CMD  Tesseract executable (default: tesseract)
  OCR2TEXT_TESSDATA_DIR   Directory with *.traineddata files
  OCR2TEXT_LANG           Tesseract language(s), e.g. eng+deu
  OCR2TEXT_PDFIUM_LIB     libpdfium file or directory
  RUST_LOG                Overrides the log filter (e.g. edgequake_ocr=debug)
"#;

/// Extract text from images and scanned PDFs with Tesseract OCR.
#[derive(Parser, Debug)]
#[command(
    name = "ocr2text",
    version,
    about = "Extract text from images and scanned PDFs with Tesseract OCR",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Image or PDF file.
    #[arg(required_unless_present = "check")]
    input: Option<PathBuf>,

    /// Declared file type: "pdf" or anything else for image. Inferred from
    /// the extension when omitted.
    #[arg(short = 't', long, env = "OCR2TEXT_FILE_TYPE")]
    file_type: Option<String>,

    /// Write text to this file instead of stdout.
    #[arg(short, long, env = "OCR2TEXT_OUTPUT")]
    output: Option<PathBuf>,

    /// Tesseract language code(s).
    #[arg(short, long = "lang", env = "OCR2TEXT_LANG", default_value = "eng")]
    language: String,

    /// Tesseract executable.
    #[arg(long, env = "OCR2TEXT_TESSERACT_CMD", default_value = "tesseract")]
    tesseract_cmd: PathBuf,

    /// Directory containing Tesseract language data.
    #[arg(long, env = "OCR2TEXT_TESSDATA_DIR")]
    tessdata_dir: Option<PathBuf>,

    /// Tesseract page segmentation mode (0–13).
    #[arg(long, env = "OCR2TEXT_PSM",
          value_parser = clap::value_parser!(u8).range(0..=13))]
    psm: Option<u8>,

    /// libpdfium file or the directory containing it.
    #[arg(long, env = "OCR2TEXT_PDFIUM_LIB")]
    pdfium_lib: Option<PathBuf>,

    /// PDF rendering DPI (72–600).
    #[arg(long, env = "OCR2TEXT_DPI", default_value_t = 200,
          value_parser = clap::value_parser!(u32).range(72..=600))]
    dpi: u32,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "OCR2TEXT_PASSWORD")]
    password: Option<String>,

    /// Fail on unknown --file-type values.
    #[arg(long, env = "OCR2TEXT_STRICT")]
    strict: bool,

    /// Output structured JSON (text, pages, stats) instead of plain text.
    #[arg(long)]
    json: bool,

    /// Print the Tesseract version and exit.
    #[arg(long)]
    check: bool,

    /// Disable progress bar.
    #[arg(long, env = "OCR2TEXT_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "OCR2TEXT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "OCR2TEXT_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
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

    // ── Engine check ─────────────────────────────────────────────────────
    if cli.check {
        let version = TesseractEngine::new(&cli.tesseract_cmd)
            .version()
            .context("Tesseract check failed")?;
        println!("{version}");
        return Ok(());
    }

    let input = cli
        .input
        .clone()
        .context("An input file is required")?;

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new_dynamic() as Arc<dyn ExtractionProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;
    let extractor = TextExtractor::new(config);

    // ── Run extraction ───────────────────────────────────────────────────
    let extraction = extractor
        .extract_file(&input, cli.file_type.as_deref())
        .with_context(|| format!("Failed to extract text from {}", input.display()))?;

    let rendered = if cli.json {
        serde_json::to_string_pretty(&extraction).context("Failed to serialise output")?
    } else {
        extraction.text.clone()
    };

    match cli.output {
        Some(ref path) => {
            std::fs::write(path, ensure_trailing_newline(rendered))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !cli.quiet {
                eprintln!(
                    "{}  {} pages  {}ms  →  {}",
                    green("✔"),
                    extraction.stats.total_pages,
                    extraction.stats.total_duration_ms,
                    bold(&path.display().to_string()),
                );
            }
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(ensure_trailing_newline(rendered).as_bytes())
                .context("Failed to write to stdout")?;
        }
    }

    if !cli.quiet && !show_progress && !cli.json {
        eprintln!(
            "Recognised {} pages ({} blank) in {}ms",
            extraction.stats.total_pages,
            extraction.stats.blank_pages,
            extraction.stats.total_duration_ms
        );
    }

    Ok(())
}

/// Map CLI args to `ExtractionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ExtractionConfig> {
    let mut builder = ExtractionConfig::builder()
        .tesseract_cmd(&cli.tesseract_cmd)
        .language(&cli.language)
        .dpi(cli.dpi)
        .strict_file_type(cli.strict);

    if let Some(ref dir) = cli.tessdata_dir {
        builder = builder.tessdata_dir(dir);
    }
    if let Some(psm) = cli.psm {
        builder = builder.page_segmentation_mode(psm);
    }
    if let Some(ref lib) = cli.pdfium_lib {
        builder = builder.pdfium_lib_path(lib);
    }
    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

fn ensure_trailing_newline(mut s: String) -> String {
    if !s.is_empty() && !s.ends_with('\n') {
        s.push('\n');
    }
    s
}
