pub mod report;

use colored::Colorize;
use itertools::Itertools;
use serde::Serialize;

use crate::catalog::Pokemon;
use crate::controller::DiagnosticSink;
use crate::palette::{self, TypeColors};

/// Shown in place of the card list when nothing matches.
pub const EMPTY_MESSAGE: &str =
    "Dracaufeu a tout brûlé, aucun Pokémon ne correspond à ta recherche !";

pub const TYPE_SEPARATOR: &str = " / ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
    Page,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "fragment" => Some(Self::Html),
            "page" | "document" => Some(Self::Page),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Page);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Background {
    Solid(String),
    /// Hard-stop bands, left to right, equal widths.
    Split(Vec<String>),
}

impl Background {
    pub fn for_types(types: &[&str], colors: &TypeColors) -> Self {
        match types {
            [] => Self::Solid(colors.default_color().to_string()),
            [single] => Self::Solid(colors.color_for(single).to_string()),
            many => Self::Split(
                many.iter()
                    .map(|t| colors.color_for(t).to_string())
                    .collect(),
            ),
        }
    }

    pub fn colors(&self) -> Vec<&str> {
        match self {
            Self::Solid(color) => vec![color.as_str()],
            Self::Split(colors) => colors.iter().map(String::as_str).collect(),
        }
    }

    pub fn css(&self) -> String {
        match self {
            Self::Solid(color) => color.clone(),
            Self::Split(colors) => {
                let n = colors.len() as f64;
                let stops = colors
                    .iter()
                    .enumerate()
                    .map(|(i, color)| {
                        let start = format_percent(i as f64 * 100.0 / n);
                        let end = format_percent((i + 1) as f64 * 100.0 / n);
                        format!("{color} {start}% {end}%")
                    })
                    .join(", ");
                format!("linear-gradient(to right, {stops})")
            }
        }
    }
}

fn format_percent(value: f64) -> String {
    let s = format!("{value:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub name: String,
    pub types: Vec<String>,
    pub level: u32,
    pub image: String,
    pub background: Background,
}

impl Card {
    /// `None` for incomplete records.
    pub fn from_pokemon(pokemon: &Pokemon, colors: &TypeColors) -> Option<Self> {
        if !pokemon.is_complete() {
            return None;
        }
        let types = pokemon.types();
        Some(Self {
            name: pokemon.name.clone(),
            background: Background::for_types(&types, colors),
            types: types.iter().map(|t| t.to_string()).collect(),
            level: pokemon.level?,
            image: pokemon.image_path(),
        })
    }

    pub fn type_line(&self) -> String {
        self.types.join(TYPE_SEPARATOR)
    }

    pub fn to_html(&self) -> String {
        let style = format!("background: {};", self.background.css());
        format!(
            r#"
        <div class="pokemon-card" style="{style}">
            <img src="{src}" alt="{alt}">
            <h2>{name}</h2>
            <div>Type: {types}</div>
            <div>Niveau: {level}</div>
        </div>
    "#,
            style = html_escape::encode_double_quoted_attribute(&style),
            src = html_escape::encode_double_quoted_attribute(&self.image),
            alt = html_escape::encode_double_quoted_attribute(&self.name),
            name = html_escape::encode_text(&self.name),
            types = html_escape::encode_text(&self.type_line()),
            level = self.level,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayOutput {
    Empty,
    Cards(Vec<Card>),
}

impl DisplayOutput {
    pub fn cards(&self) -> &[Card] {
        match self {
            Self::Empty => &[],
            Self::Cards(cards) => cards,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Builds the card list for an already filtered and sorted view.
/// Incomplete records are reported to `sink` and skipped.
pub fn render(view: &[&Pokemon], colors: &TypeColors, sink: &dyn DiagnosticSink) -> DisplayOutput {
    if view.is_empty() {
        return DisplayOutput::Empty;
    }
    let mut cards = Vec::with_capacity(view.len());
    for pokemon in view {
        match Card::from_pokemon(pokemon, colors) {
            Some(card) => cards.push(card),
            None => sink.warn(&format!(
                "Pokémon data is incomplete: '{}' (missing {})",
                pokemon.name,
                pokemon.missing_fields().join(", ")
            )),
        }
    }
    DisplayOutput::Cards(cards)
}

pub fn encode(output: &DisplayOutput, format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(output),
        OutputFormat::Json => render_json(output),
        OutputFormat::Html => render_html(output),
        OutputFormat::Page => report::render_page(output),
    }
}

pub fn render_html(output: &DisplayOutput) -> Vec<u8> {
    render_fragment(output).into_bytes()
}

pub fn render_fragment(output: &DisplayOutput) -> String {
    match output {
        DisplayOutput::Empty => format!("<p>{}</p>", html_escape::encode_text(EMPTY_MESSAGE)),
        DisplayOutput::Cards(cards) => cards.iter().map(Card::to_html).collect(),
    }
}

pub fn render_text(output: &DisplayOutput) -> Vec<u8> {
    let mut out = String::new();
    match output {
        DisplayOutput::Empty => {
            out.push_str(EMPTY_MESSAGE);
            out.push('\n');
        }
        DisplayOutput::Cards(cards) => {
            for card in cards {
                out.push_str(&format!(
                    "{} {} {:<18} Niveau {:>3}  {}\n",
                    swatch(&card.background),
                    format!("{:<12}", card.name).bold(),
                    card.type_line(),
                    card.level,
                    card.image.as_str().dimmed(),
                ));
            }
        }
    }
    out.into_bytes()
}

fn swatch(background: &Background) -> String {
    background.colors().iter().map(|c| color_swatch(c)).collect()
}

/// Two-cell colour block; plain `[]` when the colour is not hex.
pub fn color_swatch(color: &str) -> String {
    match palette::parse_hex_color(color) {
        Some((r, g, b)) => "  ".on_truecolor(r, g, b).to_string(),
        None => "[]".to_string(),
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct OutputRecord {
    pub name: String,
    pub types: Vec<String>,
    pub level: u32,
    pub image: String,
    pub alt: String,
    pub background: String,
}

pub fn build_records(output: &DisplayOutput) -> Vec<OutputRecord> {
    output
        .cards()
        .iter()
        .map(|c| OutputRecord {
            name: c.name.clone(),
            types: c.types.clone(),
            level: c.level,
            image: c.image.clone(),
            alt: c.name.clone(),
            background: c.background.css(),
        })
        .collect()
}

pub fn render_json(output: &DisplayOutput) -> Vec<u8> {
    let records = build_records(output);
    serde_json::to_vec_pretty(&records).unwrap_or_else(|_| b"[]\n".to_vec())
}
