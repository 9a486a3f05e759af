//! Subcommand implementations

use anyhow::{bail, Context, Result};
use clap::Args;
use deck_source::{live_counts, load_deck, validate_cards, LoadedDeck};
use layout_engine::DuplexMode;
use render_model::{FooterTemplate, RenderConfig};
use std::path::{Path, PathBuf};
use store::pdf::{export_flashcards_pdf, PdfExportOptions};
use store::{AppSettings, SettingsManager};

/// Options for `flashdeck render`
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Deck file: .txt, .csv, .tsv or .xlsx
    #[arg(long, short)]
    pub input: PathBuf,

    /// PDF file to write
    #[arg(long, short)]
    pub output: PathBuf,

    /// Settings JSON providing defaults for every other option
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// long-edge-mirrored, long-edge-non-mirrored or short-edge
    #[arg(long)]
    pub duplex: Option<DuplexMode>,

    /// Horizontal back-page correction in millimeters
    #[arg(long, allow_hyphen_values = true)]
    pub offset_x_mm: Option<f64>,

    /// Vertical back-page correction in millimeters
    #[arg(long, allow_hyphen_values = true)]
    pub offset_y_mm: Option<f64>,

    /// Draw corner registration marks
    #[arg(long)]
    pub corner_markers: bool,

    /// Leave out the dashed cut lines
    #[arg(long)]
    pub no_cut_lines: bool,

    /// Print a subject/lesson footer on every card
    #[arg(long)]
    pub footer: bool,

    /// subject-lesson or lesson-subject
    #[arg(long)]
    pub footer_template: Option<FooterTemplate>,

    #[arg(long)]
    pub subject: Option<String>,

    #[arg(long)]
    pub lesson: Option<String>,

    /// Starting font size for terms
    #[arg(long)]
    pub front_size: Option<f64>,

    /// Starting font size for definitions
    #[arg(long)]
    pub back_size: Option<f64>,

    /// Table column holding the terms
    #[arg(long)]
    pub front_column: Option<String>,

    /// Table column holding the definitions
    #[arg(long)]
    pub back_column: Option<String>,

    /// Document title stored in the PDF
    #[arg(long)]
    pub title: Option<String>,

    /// Write uncompressed content streams
    #[arg(long)]
    pub no_compress: bool,
}

/// Options for `flashdeck check`
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Deck file: .txt, .csv, .tsv or .xlsx
    #[arg(long, short)]
    pub input: PathBuf,

    #[arg(long)]
    pub front_column: Option<String>,

    #[arg(long)]
    pub back_column: Option<String>,
}

impl RenderArgs {
    /// Settings file contents with command-line flags applied on top
    pub fn effective_settings(&self) -> Result<AppSettings> {
        let mut settings = match &self.settings {
            Some(path) => {
                let mut manager = SettingsManager::new(path);
                manager
                    .load_required()
                    .with_context(|| format!("failed to load settings from {}", path.display()))?
                    .clone()
            }
            None => AppSettings::default(),
        };

        let render = &mut settings.render;
        if let Some(mode) = self.duplex {
            render.duplex_mode = mode;
        }
        if let Some(x) = self.offset_x_mm {
            render.offset_x_mm = x;
        }
        if let Some(y) = self.offset_y_mm {
            render.offset_y_mm = y;
        }
        if self.corner_markers {
            render.show_corner_markers = true;
        }
        if self.no_cut_lines {
            render.show_cut_lines = false;
        }
        if self.footer || self.subject.is_some() || self.lesson.is_some() {
            render.show_footer = true;
        }
        if let Some(template) = self.footer_template {
            render.footer_template = template;
        }
        if let Some(subject) = &self.subject {
            render.subject = subject.clone();
        }
        if let Some(lesson) = &self.lesson {
            render.lesson = lesson.clone();
        }
        if let Some(size) = self.front_size {
            render.front_font_size = size;
        }
        if let Some(size) = self.back_size {
            render.back_font_size = size;
        }

        if self.front_column.is_some() {
            settings.input.front_column = self.front_column.clone();
        }
        if self.back_column.is_some() {
            settings.input.back_column = self.back_column.clone();
        }
        if self.title.is_some() {
            settings.pdf.title = self.title.clone();
        }
        if self.no_compress {
            settings.pdf.compress = false;
        }

        Ok(settings)
    }
}

fn load(input: &Path, front_column: Option<&str>, back_column: Option<&str>) -> Result<LoadedDeck> {
    let loaded = load_deck(input, front_column, back_column)
        .with_context(|| format!("failed to load deck from {}", input.display()))?;
    for warning in &loaded.warnings {
        tracing::warn!("{}", warning);
    }
    Ok(loaded)
}

/// `flashdeck render`
pub fn render(args: &RenderArgs) -> Result<()> {
    let settings = args.effective_settings()?;
    let loaded = load(
        &args.input,
        settings.input.front_column.as_deref(),
        settings.input.back_column.as_deref(),
    )?;

    if loaded.deck.is_empty() {
        bail!("no cards found in {}", args.input.display());
    }

    let invalid = validate_cards(loaded.deck.cards());
    if !invalid.is_empty() {
        tracing::warn!(
            count = invalid.len(),
            "cards with an empty side will print blank on that side"
        );
    }

    let config: &RenderConfig = &settings.render;
    let options: &PdfExportOptions = &settings.pdf;
    export_flashcards_pdf(&loaded.deck, config, options, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    tracing::info!(
        cards = loaded.deck.len(),
        sheets = loaded.deck.sheet_count(),
        output = %args.output.display(),
        "done"
    );
    Ok(())
}

/// `flashdeck check`
pub fn check(args: &CheckArgs) -> Result<()> {
    let loaded = load(
        &args.input,
        args.front_column.as_deref(),
        args.back_column.as_deref(),
    )?;
    let cards = loaded.deck.cards();
    let (count, sheets) = live_counts(cards);

    println!("cards: {count}");
    println!("sheets: {sheets}");
    for index in validate_cards(cards) {
        let side = if cards[index].front.trim().is_empty() { "front" } else { "back" };
        println!("row {}: empty {}", index + 1, side);
    }
    Ok(())
}

/// `flashdeck settings init`
pub fn settings_init(path: &Path, force: bool) -> Result<()> {
    SettingsManager::new(path)
        .init(force)
        .with_context(|| format!("failed to write settings to {}", path.display()))
}

/// `flashdeck settings show`
pub fn settings_show(path: &Path) -> Result<()> {
    let mut manager = SettingsManager::new(path);
    let settings = manager
        .load()
        .with_context(|| format!("failed to load settings from {}", path.display()))?;
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}
