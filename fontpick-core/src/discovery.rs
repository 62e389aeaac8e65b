//! Font discovery helpers for fontpick-core (made by FontLab https://www.fontlab.com/)

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::registry::normalize_extension;

/// Extensions accepted when none are configured explicitly.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".ttf", ".ttc", ".otf"];

/// Environment variable overriding the platform font directories (`:` or `;` separated).
pub const FONT_DIRS_ENV: &str = "FONTPICK_FONT_DIRS";

/// Path to a candidate font file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSourceRef {
    pub path: PathBuf,
}

/// Something the walk stepped over instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub path: Option<PathBuf>,
    pub reason: String,
}

/// Trait for enumerating font files from some backing store.
///
/// Discovery is best effort: problems are handed to `on_skip` and the
/// enumeration carries on.
pub trait FontDiscovery {
    fn discover(&self, on_skip: &mut dyn FnMut(&SkippedEntry)) -> Vec<FontSourceRef>;
}

/// Recursive filesystem walker with an extension allow-list.
#[derive(Debug, Clone)]
pub struct PathDiscovery {
    roots: Vec<PathBuf>,
    extensions: Vec<String>,
    follow_symlinks: bool,
}

impl PathDiscovery {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let roots = roots.into_iter().map(Into::into).collect();
        Self {
            roots,
            extensions: Vec::new(),
            follow_symlinks: false,
        }
        .extensions(DEFAULT_EXTENSIONS)
    }

    /// Accepted extensions, case-insensitive, with or without the leading dot.
    /// An empty list accepts every file.
    pub fn extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|e| normalize_extension(e.as_ref()))
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    fn accepts(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self
                .extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}

impl FontDiscovery for PathDiscovery {
    fn discover(&self, on_skip: &mut dyn FnMut(&SkippedEntry)) -> Vec<FontSourceRef> {
        let mut found = Vec::new();

        for root in &self.roots {
            let walker = WalkDir::new(root)
                .follow_links(self.follow_symlinks)
                .sort_by_file_name();

            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        let skipped = SkippedEntry {
                            path: err.path().map(Path::to_path_buf),
                            reason: err.to_string(),
                        };
                        debug!(root = %root.display(), reason = %skipped.reason, "skipping unreadable entry");
                        on_skip(&skipped);
                        continue;
                    }
                };

                if entry.file_type().is_file() && self.accepts(entry.path()) {
                    found.push(FontSourceRef {
                        path: entry.path().to_path_buf(),
                    });
                }
            }
        }

        found
    }
}

/// Platform font directories that exist on this machine.
///
/// `FONTPICK_FONT_DIRS` replaces the platform list when set.
pub fn system_font_dirs() -> Vec<PathBuf> {
    if let Ok(raw) = env::var(FONT_DIRS_ENV) {
        return existing_dirs(split_dir_list(&raw));
    }

    let mut candidates: Vec<PathBuf> = Vec::new();

    #[cfg(target_os = "macos")]
    {
        candidates.push(PathBuf::from("/System/Library/Fonts"));
        candidates.push(PathBuf::from("/Library/Fonts"));
        if let Some(home) = env::var_os("HOME") {
            candidates.push(PathBuf::from(home).join("Library/Fonts"));
        }
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        candidates.push(PathBuf::from("/usr/share/fonts"));
        candidates.push(PathBuf::from("/usr/local/share/fonts"));
        if let Some(data_home) = env::var_os("XDG_DATA_HOME") {
            candidates.push(PathBuf::from(data_home).join("fonts"));
        }
        if let Some(home) = env::var_os("HOME") {
            candidates.push(PathBuf::from(&home).join(".local/share/fonts"));
            candidates.push(PathBuf::from(home).join(".fonts"));
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(system_root) = env::var_os("SYSTEMROOT") {
            candidates.push(PathBuf::from(system_root).join("Fonts"));
        }
        if let Some(local_appdata) = env::var_os("LOCALAPPDATA") {
            candidates.push(PathBuf::from(local_appdata).join("Microsoft/Windows/Fonts"));
        }
    }

    existing_dirs(candidates)
}

fn split_dir_list(raw: &str) -> Vec<PathBuf> {
    raw.split([':', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn existing_dirs(mut dirs: Vec<PathBuf>) -> Vec<PathBuf> {
    dirs.retain(|p| p.is_dir());
    let mut seen = Vec::new();
    dirs.retain(|p| {
        if seen.contains(p) {
            false
        } else {
            seen.push(p.clone());
            true
        }
    });
    dirs
}
