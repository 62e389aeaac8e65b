/// The name registry: what font names, files and families exist
///
/// Fonts announce themselves through their filenames long before anyone
/// opens them. `arialbd.ttf` is Arial Bold, `Helvetica.ttc` is six faces of
/// Helvetica, and `DejaVuSansMono-BoldOblique.ttf` spells its identity out
/// loud. The registry keeps the table of those conventions, plus the
/// families that may stand in for one another when the requested one is not
/// installed (Helvetica ~ Arial ~ Liberation Sans).
///
/// The table is an ordinary value: build one with [`RegistryTable`], hand it
/// to [`NameRegistry::new`], or take the bundled one from
/// [`NameRegistry::builtin`].
///
/// Made with care at FontLab https://www.fontlab.com/
use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::catalog::{file_stem, FontEntry};
use crate::style::{combine, compact, decompose, parse_style, Style, StyleWord};

/// A family and the other spellings it goes by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilySpec {
    pub name: String,
    pub aliases: Vec<String>,
}

/// One face stored in a known file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceSpec {
    pub family: String,
    /// Style words as displayed, empty for the regular face.
    pub style: String,
}

impl FaceSpec {
    pub fn display_name(&self) -> String {
        if self.style.trim().is_empty() {
            self.family.clone()
        } else {
            format!("{} {}", self.family, self.style.trim())
        }
    }
}

/// A filename whose faces are known up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRule {
    /// File stem; compared in compact form.
    pub stem: String,
    /// Lowercase extension without the dot; `None` applies to any extension.
    pub extension: Option<String>,
    pub faces: Vec<FaceSpec>,
}

impl FileRule {
    fn is_collection(&self) -> bool {
        self.faces.len() > 1
    }
}

/// Raw registry contents, assembled with builder calls.
#[derive(Debug, Clone, Default)]
pub struct RegistryTable {
    families: Vec<FamilySpec>,
    files: Vec<FileRule>,
    substitutes: Vec<Vec<String>>,
}

impl RegistryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn family(mut self, name: &str, aliases: &[&str]) -> Self {
        self.families.push(FamilySpec {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        });
        self
    }

    /// A single-face file, e.g. `file("arialbd", "Arial", "Bold")`.
    pub fn file(self, stem: &str, family: &str, style: &str) -> Self {
        self.collection(stem, None, &[(family, style)])
    }

    /// A file holding several faces, listed in face-index order.
    pub fn collection(
        mut self,
        stem: &str,
        extension: Option<&str>,
        faces: &[(&str, &str)],
    ) -> Self {
        self.files.push(FileRule {
            stem: stem.to_string(),
            extension: extension.map(normalize_extension),
            faces: faces
                .iter()
                .map(|(family, style)| FaceSpec {
                    family: family.to_string(),
                    style: style.to_string(),
                })
                .collect(),
        });
        self
    }

    /// Families that may replace one another when one of them is missing.
    pub fn substitutes(mut self, families: &[&str]) -> Self {
        self.substitutes
            .push(families.iter().map(|f| f.to_string()).collect());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// The family is in the registry and nothing but style words follow it.
    Known,
    /// Best effort: an unknown family, or a known one followed by unrecognized words.
    Guessed,
}

/// Family implied by a free-text query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMatch {
    pub family: String,
    pub confidence: Confidence,
    pub style: Style,
}

impl FamilyMatch {
    pub fn is_known(&self) -> bool {
        self.confidence == Confidence::Known
    }
}

/// Immutable lookup structure built from a [`RegistryTable`].
#[derive(Debug, Clone)]
pub struct NameRegistry {
    families: Vec<FamilySpec>,
    /// Compact family names and aliases, longest first.
    keys: Vec<(String, usize)>,
    lookup: HashMap<String, usize>,
    files: HashMap<(String, Option<String>), FileRule>,
    class_of: HashMap<usize, usize>,
    classes: Vec<Vec<usize>>,
}

impl NameRegistry {
    pub fn new(table: RegistryTable) -> Self {
        let mut registry = Self {
            families: Vec::new(),
            keys: Vec::new(),
            lookup: HashMap::new(),
            files: HashMap::new(),
            class_of: HashMap::new(),
            classes: Vec::new(),
        };

        for spec in table.families {
            registry.declare(&spec.name, &spec.aliases);
        }

        for rule in table.files {
            for face in &rule.faces {
                registry.declare(&face.family, &[]);
            }
            registry
                .files
                .insert((compact(&rule.stem), rule.extension.clone()), rule);
        }

        for group in table.substitutes {
            let members: Vec<usize> = group
                .iter()
                .map(|name| registry.declare(name, &[]))
                .collect();
            let class = registry.classes.len();
            for &member in &members {
                registry.class_of.entry(member).or_insert(class);
            }
            registry.classes.push(members);
        }

        registry
            .keys
            .sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        registry
    }

    /// The bundled table of common desktop font families.
    pub fn builtin() -> Self {
        Self::new(crate::builtin::table())
    }

    fn declare(&mut self, name: &str, aliases: &[String]) -> usize {
        let key = compact(name);
        let idx = match self.lookup.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.families.len();
                self.families.push(FamilySpec {
                    name: name.to_string(),
                    aliases: Vec::new(),
                });
                self.lookup.insert(key.clone(), idx);
                self.keys.push((key, idx));
                idx
            }
        };

        for alias in aliases {
            let alias_key = compact(alias);
            if alias_key.is_empty() || self.lookup.contains_key(&alias_key) {
                continue;
            }
            self.families[idx].aliases.push(alias.clone());
            self.lookup.insert(alias_key.clone(), idx);
            self.keys.push((alias_key, idx));
        }

        idx
    }

    /// Canonical family names, in declaration order.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.iter().map(|f| f.name.as_str())
    }

    /// Canonical name for a family name or alias.
    pub fn canonical_family(&self, name: &str) -> Option<&str> {
        self.lookup
            .get(&compact(name))
            .map(|&idx| self.families[idx].name.as_str())
    }

    /// Other families registered as substitutes for `family`.
    pub fn substitutes_for(&self, family: &str) -> Vec<&str> {
        let Some(&idx) = self.lookup.get(&compact(family)) else {
            return Vec::new();
        };
        match self.class_of.get(&idx) {
            Some(&class) => self.classes[class]
                .iter()
                .filter(|&&member| member != idx)
                .map(|&member| self.families[member].name.as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Longest known family key prefixing `compact_text` whose remainder is
    /// made of style words only.
    fn known_prefix(&self, compact_text: &str) -> Option<(usize, Vec<&'static StyleWord>)> {
        self.keys.iter().find_map(|(key, idx)| {
            if key.is_empty() {
                return None;
            }
            compact_text
                .strip_prefix(key.as_str())
                .and_then(decompose)
                .map(|words| (*idx, words))
        })
    }

    /// Recognize the faces a file holds from its name alone.
    ///
    /// Known files (`arialbd.ttf`, `Helvetica.ttc`) come from the explicit
    /// rules; anything else is decomposed as `<family><style words>`. An
    /// empty result means the filename says nothing the registry understands.
    pub fn match_fonts_by_filename(&self, path: &Path) -> Vec<FontEntry> {
        let stem = compact(&file_stem(path));
        if stem.is_empty() {
            return Vec::new();
        }

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());
        let rule = extension
            .clone()
            .and_then(|ext| self.files.get(&(stem.clone(), Some(ext))))
            .or_else(|| self.files.get(&(stem.clone(), None)));

        if let Some(rule) = rule {
            trace!(path = %path.display(), faces = rule.faces.len(), "matched filename rule");
            let collection = rule.is_collection();
            return rule
                .faces
                .iter()
                .enumerate()
                .map(|(idx, face)| {
                    let family = self
                        .canonical_family(&face.family)
                        .unwrap_or(&face.family)
                        .to_string();
                    let entry = FontEntry::named(path, family, face.display_name());
                    if collection {
                        entry.with_face_index(idx as u32)
                    } else {
                        entry
                    }
                })
                .collect();
        }

        match self.known_prefix(&stem) {
            Some((idx, words)) => {
                let family = &self.families[idx].name;
                let mut name = family.clone();
                let mut seen: Vec<&str> = Vec::new();
                for word in words.iter().filter(|w| !w.label.is_empty()) {
                    if !seen.contains(&word.label) {
                        seen.push(word.label);
                        name.push(' ');
                        name.push_str(word.label);
                    }
                }
                trace!(path = %path.display(), %name, "matched filename convention");
                vec![FontEntry::named(path, family.clone(), name)]
            }
            None => Vec::new(),
        }
    }

    /// Family implied by a query, ignoring weight and style words.
    ///
    /// `"Helvetica-BoldOblique"` gives Helvetica with [`Confidence::Known`].
    /// A known family followed by unrecognized words (`"Arial Rounded Bold"`)
    /// or an unknown family (`"Foo Bold"` -> `"Foo"`) comes back as
    /// [`Confidence::Guessed`]. A style-only query guesses an empty family.
    pub fn match_family(&self, query: &str) -> FamilyMatch {
        if let Some((idx, words)) = self.known_prefix(&compact(query)) {
            return FamilyMatch {
                family: self.families[idx].name.clone(),
                confidence: Confidence::Known,
                style: combine(&words),
            };
        }

        let parsed = parse_style(query);

        // A known family spelled by the leading words of the query.
        let words: Vec<String> = query
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(compact)
            .collect();
        for take in (1..=words.len()).rev() {
            if let Some(&idx) = self.lookup.get(&words[..take].concat()) {
                return FamilyMatch {
                    family: self.families[idx].name.clone(),
                    confidence: Confidence::Guessed,
                    style: parsed.style,
                };
            }
        }

        FamilyMatch {
            family: parsed.rest.join(" "),
            confidence: Confidence::Guessed,
            style: parsed.style,
        }
    }

    /// Compact canonical family of an entry, guessing from the label for bare entries.
    fn family_key(&self, entry: &FontEntry) -> String {
        let family = match &entry.family {
            Some(family) => family.clone(),
            None => self.match_family(&entry.label()).family,
        };
        match self.lookup.get(&compact(&family)) {
            Some(&idx) => compact(&self.families[idx].name),
            None => compact(&family),
        }
    }

    /// Exact match for `query` among `candidates`; never guesses.
    ///
    /// The first candidate whose label equals the query in compact form wins.
    /// Failing that, a query naming a known family plus style words matches
    /// the first candidate of that family with the same parsed style, so
    /// `"Arial Italic Bold"` finds `"Arial Bold Italic"`.
    pub fn match_font(&self, query: &str, candidates: &[FontEntry]) -> Option<FontEntry> {
        let wanted = compact(query);
        if wanted.is_empty() {
            return None;
        }

        if let Some(found) = candidates.iter().find(|c| compact(&c.label()) == wanted) {
            return Some(found.clone());
        }

        let family = self.match_family(query);
        if !family.is_known() {
            return None;
        }
        let family_key = compact(&family.family);

        candidates
            .iter()
            .find(|c| self.family_key(c) == family_key && c.style() == family.style)
            .cloned()
    }

    /// Installed fonts that can stand in for `family`.
    ///
    /// Members of the family itself come first; only when none is installed
    /// are members of its substitution class returned. Both keep catalog order.
    pub fn alternatives(&self, family: &str, candidates: &[FontEntry]) -> Vec<FontEntry> {
        let wanted = compact(family);
        if wanted.is_empty() {
            return Vec::new();
        }

        let Some(&idx) = self.lookup.get(&wanted) else {
            return candidates
                .iter()
                .filter(|c| self.family_key(c) == wanted)
                .cloned()
                .collect();
        };

        let own = compact(&self.families[idx].name);
        let members: Vec<FontEntry> = candidates
            .iter()
            .filter(|c| self.family_key(c) == own)
            .cloned()
            .collect();
        if !members.is_empty() {
            return members;
        }

        let substitutes: Vec<String> = self
            .substitutes_for(&self.families[idx].name)
            .into_iter()
            .map(compact)
            .collect();
        candidates
            .iter()
            .filter(|c| substitutes.contains(&self.family_key(c)))
            .cloned()
            .collect()
    }
}

pub(crate) fn normalize_extension(raw: &str) -> String {
    raw.trim().trim_start_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> NameRegistry {
        NameRegistry::new(
            RegistryTable::new()
                .family("Arial", &["ArialMT"])
                .family("Helvetica", &[])
                .family("Helvetica Neue", &[])
                .file("arialbd", "Arial", "Bold")
                .collection(
                    "Helvetica",
                    Some("ttc"),
                    &[("Helvetica", ""), ("Helvetica", "Bold")],
                )
                .substitutes(&["Helvetica", "Arial"]),
        )
    }

    #[test]
    fn keys_prefer_longest_family() {
        let registry = small();
        let found = registry.match_family("HelveticaNeue-Light");
        assert_eq!(found.family, "Helvetica Neue");
        assert!(found.is_known());
        assert_eq!(found.style.weight, 300);
    }

    #[test]
    fn aliases_resolve_to_canonical_name() {
        let registry = small();
        assert_eq!(registry.canonical_family("arial mt"), Some("Arial"));
        assert_eq!(registry.match_family("ArialMT").family, "Arial");
    }

    #[test]
    fn collection_rule_only_applies_to_its_extension() {
        let registry = small();
        let ttc = registry.match_fonts_by_filename(Path::new("/f/Helvetica.ttc"));
        assert_eq!(ttc.len(), 2);
        assert_eq!(ttc[1].face_index, Some(1));

        let ttf = registry.match_fonts_by_filename(Path::new("/f/Helvetica.ttf"));
        assert_eq!(ttf.len(), 1);
        assert_eq!(ttf[0].face_index, None);
        assert_eq!(ttf[0].name.as_deref(), Some("Helvetica"));
    }

    #[test]
    fn substitutes_exclude_the_family_itself() {
        let registry = small();
        assert_eq!(registry.substitutes_for("helvetica"), vec!["Arial"]);
        assert!(registry.substitutes_for("Helvetica Neue").is_empty());
    }

    #[test]
    fn normalizes_extensions() {
        assert_eq!(normalize_extension(".TTF"), "ttf");
        assert_eq!(normalize_extension("otf"), "otf");
    }
}
