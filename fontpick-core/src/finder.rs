//! Catalog construction and query resolution (made by FontLab https://www.fontlab.com/)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::catalog::FontEntry;
use crate::discovery::{
    system_font_dirs, FontDiscovery, PathDiscovery, SkippedEntry, DEFAULT_EXTENSIONS,
};
use crate::registry::NameRegistry;
use crate::style::font_style_score;

/// Where to look and what to accept while building the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinderOptions {
    /// Accepted extensions (`.ttf`, `otf`...); empty disables filtering.
    pub extensions: Vec<String>,
    /// Directories to walk.
    pub roots: Vec<PathBuf>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for FinderOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            roots: system_font_dirs(),
            follow_symlinks: false,
        }
    }
}

impl FinderOptions {
    /// Default extensions over explicit roots, skipping the platform lookup.
    pub fn with_roots<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            roots: roots.into_iter().map(Into::into).collect(),
            follow_symlinks: false,
        }
    }

    pub fn extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = extensions.iter().map(|e| e.as_ref().to_string()).collect();
        self
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    fn discovery(&self) -> PathDiscovery {
        PathDiscovery::new(self.roots.iter().cloned())
            .extensions(&self.extensions)
            .follow_symlinks(self.follow_symlinks)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResolutionKind {
    /// The catalog holds the requested font itself.
    Exact,
    /// Best-scoring installed font of the requested (or a substitute) family.
    Alternative { family: String, score: f64 },
}

/// A resolved query: the chosen entry and how it was chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub entry: FontEntry,
    #[serde(flatten)]
    pub kind: ResolutionKind,
}

impl Resolution {
    pub fn is_exact(&self) -> bool {
        self.kind == ResolutionKind::Exact
    }
}

/// Catalog of installed fonts, built once and read-only afterwards.
///
/// Every accessor hands out owned copies, so a `Finder` can be shared
/// between threads freely once constructed.
#[derive(Debug, Clone)]
pub struct Finder {
    fonts: Vec<FontEntry>,
    registry: NameRegistry,
}

impl Finder {
    /// Walk the configured roots with the bundled registry.
    ///
    /// Never fails: unreadable directories and files are skipped.
    pub fn new(opts: &FinderOptions) -> Self {
        Self::scan(opts, NameRegistry::builtin(), |_| {})
    }

    /// Walk the configured roots, reporting every skipped entry to `on_skip`.
    pub fn scan(
        opts: &FinderOptions,
        registry: NameRegistry,
        mut on_skip: impl FnMut(&SkippedEntry),
    ) -> Self {
        Self::from_source(&opts.discovery(), registry, &mut on_skip)
    }

    /// Classify every file a discovery source yields.
    pub fn from_source(
        source: &dyn FontDiscovery,
        registry: NameRegistry,
        on_skip: &mut dyn FnMut(&SkippedEntry),
    ) -> Self {
        let mut fonts = Vec::new();
        let sources = source.discover(on_skip);

        for candidate in &sources {
            let mut matches = registry.match_fonts_by_filename(&candidate.path);
            if matches.is_empty() {
                trace!(path = %candidate.path.display(), "unrecognized font file");
                matches.push(FontEntry::bare(&candidate.path));
            }
            fonts.extend(matches);
        }

        debug!(
            files = sources.len(),
            faces = fonts.len(),
            "font catalog built"
        );
        Self { fonts, registry }
    }

    /// Wrap an existing catalog, e.g. one restored from JSON.
    pub fn from_entries(fonts: Vec<FontEntry>, registry: NameRegistry) -> Self {
        Self { fonts, registry }
    }

    pub fn registry(&self) -> &NameRegistry {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Copy of the full catalog, in discovery order.
    pub fn list(&self) -> Vec<FontEntry> {
        self.fonts.clone()
    }

    /// Best installed font for `query`, or `None` when nothing fits.
    pub fn find(&self, query: &str) -> Option<FontEntry> {
        self.resolve(query).map(|resolution| resolution.entry)
    }

    /// Like [`Finder::find`], but also reports how the font was chosen.
    pub fn resolve(&self, query: &str) -> Option<Resolution> {
        if let Some(entry) = self.registry.match_font(query, &self.fonts) {
            debug!(query, name = %entry.label(), "exact match");
            return Some(Resolution {
                entry,
                kind: ResolutionKind::Exact,
            });
        }

        self.find_alternative(query)
    }

    fn find_alternative(&self, query: &str) -> Option<Resolution> {
        let family = self.registry.match_family(query);
        let alternatives = self.registry.alternatives(&family.family, &self.fonts);
        if alternatives.is_empty() {
            return self.find_default(query, &family.family);
        }

        // Strict maximum: ties keep the earliest candidate in catalog order.
        let mut best: Option<(f64, FontEntry)> = None;
        for font in alternatives {
            let score = font_style_score(query, &font.label());
            trace!(query, candidate = %font.label(), score, "scored alternative");
            if best.as_ref().map_or(true, |(top, _)| score > *top) {
                best = Some((score, font));
            }
        }

        best.map(|(score, entry)| {
            debug!(query, family = %family.family, name = %entry.label(), score, "alternative match");
            Resolution {
                kind: ResolutionKind::Alternative {
                    family: entry.family.clone().unwrap_or_else(|| family.family.clone()),
                    score,
                },
                entry,
            }
        })
    }

    /// Last resort once neither the family nor a substitute is installed.
    /// No default-font policy exists yet, so nothing is returned.
    fn find_default(&self, query: &str, family: &str) -> Option<Resolution> {
        debug!(query, family, "no installed alternative");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arial_catalog() -> Finder {
        Finder::from_entries(
            vec![
                FontEntry::named("arial-bold.ttf", "Arial", "Arial Bold"),
                FontEntry::named("arial-italic.ttf", "Arial", "Arial Italic"),
            ],
            NameRegistry::builtin(),
        )
    }

    #[test]
    fn exact_name_wins() {
        let finder = arial_catalog();
        let found = finder.resolve("Arial Bold").expect("match");
        assert!(found.is_exact());
        assert_eq!(found.entry.path, PathBuf::from("arial-bold.ttf"));
    }

    #[test]
    fn unknown_variant_falls_back_to_closest_style() {
        let finder = arial_catalog();
        let found = finder.resolve("Arial Black").expect("match");
        assert!(!found.is_exact());
        assert_eq!(found.entry.name.as_deref(), Some("Arial Bold"));
    }

    #[test]
    fn bare_entries_group_by_file_stem_family() {
        let finder = Finder::from_entries(
            vec![FontEntry::bare("/fonts/Foo-Bold.otf"), FontEntry::bare("/fonts/Foo-Italic.otf")],
            NameRegistry::builtin(),
        );
        let found = finder.find("Foo Black").expect("match");
        assert_eq!(found.path, PathBuf::from("/fonts/Foo-Bold.otf"));
    }

    #[test]
    fn missing_family_is_none() {
        assert!(arial_catalog().find("Zapfino").is_none());
        assert!(arial_catalog().find("").is_none());
    }
}
