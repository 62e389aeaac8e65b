//! Style tokens and style-similarity scoring (made by FontLab https://www.fontlab.com/)

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Weight assumed when a name carries no weight token.
pub const REGULAR_WEIGHT: u16 = 400;
/// Width class assumed when a name carries no width token (1 = ultra-condensed, 9 = ultra-expanded).
pub const NORMAL_WIDTH: u8 = 5;

const WEIGHT_FACTOR: f64 = 2.0;
const SLANT_FACTOR: f64 = 2.0;
const WIDTH_FACTOR: f64 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slant {
    #[default]
    Upright,
    Italic,
    Oblique,
}

/// Weight, slant and width of a face, as far as its name tells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Style {
    pub weight: u16,
    pub slant: Slant,
    pub width: u8,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            weight: REGULAR_WEIGHT,
            slant: Slant::Upright,
            width: NORMAL_WIDTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleToken {
    Weight(u16),
    Slant(Slant),
    Width(u8),
    /// Recognized but meaningless for matching ("Regular", "Book", "MT").
    Neutral,
}

/// One entry of the style vocabulary: compact spelling, meaning, display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleWord {
    pub word: &'static str,
    pub token: StyleToken,
    pub label: &'static str,
}

const fn w(word: &'static str, token: StyleToken, label: &'static str) -> StyleWord {
    StyleWord { word, token, label }
}

use StyleToken::{Neutral, Slant as S, Weight as Wt, Width as Wd};

static VOCABULARY: &[StyleWord] = &[
    w("regular", Neutral, ""),
    w("normal", Neutral, ""),
    w("book", Neutral, ""),
    w("roman", Neutral, ""),
    w("plain", Neutral, ""),
    w("regu", Neutral, ""),
    w("upright", Neutral, ""),
    w("psmt", Neutral, ""),
    w("mt", Neutral, ""),
    w("thin", Wt(100), "Thin"),
    w("hairline", Wt(100), "Hairline"),
    w("extralight", Wt(200), "ExtraLight"),
    w("ultralight", Wt(200), "UltraLight"),
    w("light", Wt(300), "Light"),
    w("medium", Wt(500), "Medium"),
    w("semibold", Wt(600), "SemiBold"),
    w("demibold", Wt(600), "DemiBold"),
    w("demi", Wt(600), "Demi"),
    w("bold", Wt(700), "Bold"),
    w("extrabold", Wt(800), "ExtraBold"),
    w("ultrabold", Wt(800), "UltraBold"),
    w("heavy", Wt(900), "Heavy"),
    w("black", Wt(900), "Black"),
    w("italic", S(Slant::Italic), "Italic"),
    w("oblique", S(Slant::Oblique), "Oblique"),
    w("ital", S(Slant::Italic), "Italic"),
    w("obli", S(Slant::Oblique), "Oblique"),
    w("slanted", S(Slant::Oblique), "Slanted"),
    w("inclined", S(Slant::Oblique), "Inclined"),
    w("ultracondensed", Wd(1), "UltraCondensed"),
    w("extracondensed", Wd(2), "ExtraCondensed"),
    w("condensed", Wd(3), "Condensed"),
    w("narrow", Wd(3), "Narrow"),
    w("semicondensed", Wd(4), "SemiCondensed"),
    w("semiexpanded", Wd(6), "SemiExpanded"),
    w("expanded", Wd(7), "Expanded"),
    w("extended", Wd(7), "Extended"),
    w("extraexpanded", Wd(8), "ExtraExpanded"),
    w("ultraexpanded", Wd(9), "UltraExpanded"),
];

/// Prefixes written as separate words in names like "Extra Bold" or "Semi Condensed".
const MODIFIERS: &[&str] = &["extra", "ultra", "semi", "demi"];

/// Lowercase alphanumerics with every separator removed.
///
/// `"Helvetica-Bold Oblique"` and `"helvetica_boldoblique"` share the compact
/// form `"helveticaboldoblique"`.
pub fn compact(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Decompose a compact string entirely into style vocabulary.
///
/// Returns `None` as soon as any part of the input is not a style word.
/// The empty string decomposes into nothing.
pub fn decompose(compact: &str) -> Option<Vec<&'static StyleWord>> {
    let mut dead = vec![false; compact.len() + 1];
    let mut words = Vec::new();
    decompose_from(compact, 0, &mut dead, &mut words).then_some(words)
}

/// Depth-first split of `text[start..]`; offsets known to fail are marked in `dead`.
fn decompose_from(
    text: &str,
    start: usize,
    dead: &mut [bool],
    words: &mut Vec<&'static StyleWord>,
) -> bool {
    if start == text.len() {
        return true;
    }
    if dead[start] {
        return false;
    }

    // Longest words first so "semibold" wins over "semi" + "bold".
    let rest = &text[start..];
    let mut candidates: Vec<&'static StyleWord> = VOCABULARY
        .iter()
        .filter(|entry| rest.starts_with(entry.word))
        .collect();
    candidates.sort_by(|a, b| b.word.len().cmp(&a.word.len()));

    for entry in candidates {
        words.push(entry);
        if decompose_from(text, start + entry.word.len(), dead, words) {
            return true;
        }
        words.pop();
    }

    dead[start] = true;
    false
}

/// Result of splitting a free-text name into style tokens and family words.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedStyle {
    pub style: Style,
    /// Recognized style words, in order of appearance.
    pub words: Vec<&'static StyleWord>,
    /// Everything that is not a style word, in order of appearance.
    pub rest: Vec<String>,
}

impl ParsedStyle {
    /// Display labels of the non-neutral style words, deduplicated.
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels: Vec<&'static str> = Vec::new();
        for word in &self.words {
            if !word.label.is_empty() && !labels.contains(&word.label) {
                labels.push(word.label);
            }
        }
        labels
    }

    /// True when the text contained nothing besides style words.
    pub fn is_style_only(&self) -> bool {
        self.rest.is_empty()
    }
}

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\p{L}\p{N}]+").expect("valid word regex"))
}

fn camel_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[A-Z]*[a-z0-9]+|[A-Z]+|[^A-Za-z0-9]+").expect("valid camel-case regex")
    })
}

/// Parse weight, slant and width tokens out of a name or query.
///
/// Words such as `"BoldOblique"` decompose directly; words like `"ArialBold"`
/// are split on camel-case boundaries first. Conflicting tokens combine
/// without regard to order: the heaviest weight, italic over oblique, and the
/// width furthest from normal win.
pub fn parse_style(text: &str) -> ParsedStyle {
    let raw: Vec<&str> = word_regex().find_iter(text).map(|m| m.as_str()).collect();
    let mut parsed = ParsedStyle::default();

    let mut i = 0;
    while i < raw.len() {
        let word = raw[i];
        let lowered = compact(word);

        if MODIFIERS.contains(&lowered.as_str()) {
            if let Some(next) = raw.get(i + 1) {
                let joined = format!("{lowered}{}", compact(next));
                if let Some(found) = decompose(&joined) {
                    parsed.words.extend(found);
                    i += 2;
                    continue;
                }
            }
        }

        if let Some(found) = decompose(&lowered) {
            parsed.words.extend(found);
        } else {
            // Pieces that are not style words stay glued: "MyFontBold" -> "MyFont" + Bold.
            let mut pending = String::new();
            for piece in camel_regex().find_iter(word).map(|m| m.as_str()) {
                match decompose(&compact(piece)) {
                    Some(found) => {
                        if !pending.is_empty() {
                            parsed.rest.push(std::mem::take(&mut pending));
                        }
                        parsed.words.extend(found);
                    }
                    None => pending.push_str(piece),
                }
            }
            if !pending.is_empty() {
                parsed.rest.push(pending);
            }
        }
        i += 1;
    }

    parsed.style = combine(&parsed.words);
    parsed
}

pub(crate) fn combine(words: &[&'static StyleWord]) -> Style {
    let mut weight: Option<u16> = None;
    let mut slant = Slant::Upright;
    let mut width: Option<u8> = None;

    for word in words {
        match word.token {
            StyleToken::Weight(value) => {
                weight = Some(weight.map_or(value, |w| w.max(value)));
            }
            StyleToken::Slant(Slant::Italic) => slant = Slant::Italic,
            StyleToken::Slant(Slant::Oblique) if slant == Slant::Upright => {
                slant = Slant::Oblique;
            }
            StyleToken::Slant(_) => {}
            StyleToken::Width(value) => {
                width = Some(match width {
                    None => value,
                    Some(current) => {
                        let dist = |v: u8| (i16::from(v) - i16::from(NORMAL_WIDTH)).abs();
                        if dist(value) > dist(current)
                            || (dist(value) == dist(current) && value < current)
                        {
                            value
                        } else {
                            current
                        }
                    }
                });
            }
            StyleToken::Neutral => {}
        }
    }

    Style {
        weight: weight.unwrap_or(REGULAR_WEIGHT),
        slant,
        width: width.unwrap_or(NORMAL_WIDTH),
    }
}

fn slant_similarity(a: Slant, b: Slant) -> f64 {
    match (a, b) {
        _ if a == b => 1.0,
        (Slant::Italic, Slant::Oblique) | (Slant::Oblique, Slant::Italic) => 0.5,
        _ => 0.0,
    }
}

/// Similarity between two parsed styles; higher is closer, never negative.
pub fn style_similarity(query: &Style, candidate: &Style) -> f64 {
    let weight_gap = f64::from(query.weight.abs_diff(candidate.weight)).min(800.0);
    let width_gap = f64::from(query.width.abs_diff(candidate.width)).min(8.0);

    WEIGHT_FACTOR * (1.0 - weight_gap / 800.0)
        + SLANT_FACTOR * slant_similarity(query.slant, candidate.slant)
        + WIDTH_FACTOR * (1.0 - width_gap / 8.0)
}

/// Score how well the style requested by `query` fits the face named `candidate_name`.
///
/// A blank candidate name scores `0.0`; unknown words in either string carry no weight.
pub fn font_style_score(query: &str, candidate_name: &str) -> f64 {
    if candidate_name.trim().is_empty() {
        return 0.0;
    }

    let wanted = parse_style(query).style;
    let offered = parse_style(candidate_name).style;
    style_similarity(&wanted, &offered)
}
