//! Font catalog entries (made by FontLab https://www.fontlab.com/)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::style::{parse_style, Style};

/// One font face found on disk.
///
/// `name` and `family` are only filled in when the name registry recognizes
/// the file; a bare entry carries nothing but its path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontEntry {
    pub path: PathBuf,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    /// Face index inside a TTC/OTC collection.
    #[serde(default)]
    pub face_index: Option<u32>,
}

impl FontEntry {
    /// Entry for a file the registry knows nothing about.
    pub fn bare(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            name: None,
            family: None,
            face_index: None,
        }
    }

    pub fn named(
        path: impl Into<PathBuf>,
        family: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: Some(name.into()),
            family: Some(family.into()),
            face_index: None,
        }
    }

    pub fn with_face_index(mut self, index: u32) -> Self {
        self.face_index = Some(index);
        self
    }

    pub fn is_recognized(&self) -> bool {
        self.name.is_some()
    }

    /// Display name, or the file stem for bare entries.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => file_stem(&self.path),
        }
    }

    /// Style as far as the label tells.
    pub fn style(&self) -> Style {
        parse_style(&self.label()).style
    }

    /// Render the path, appending `#<index>` for collection faces.
    pub fn path_with_index(&self) -> String {
        if let Some(idx) = self.face_index {
            format!("{}#{idx}", self.path.display())
        } else {
            self.path.display().to_string()
        }
    }
}

pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Slant;

    #[test]
    fn bare_entry_labels_with_file_stem() {
        let entry = FontEntry::bare("/fonts/MyFont-BoldItalic.otf");
        assert!(!entry.is_recognized());
        assert_eq!(entry.label(), "MyFont-BoldItalic");
        assert_eq!(entry.style().weight, 700);
        assert_eq!(entry.style().slant, Slant::Italic);
    }

    #[test]
    fn collection_faces_render_index_suffix() {
        let entry = FontEntry::named("/fonts/Helvetica.ttc", "Helvetica", "Helvetica Bold")
            .with_face_index(1);
        assert_eq!(entry.path_with_index(), "/fonts/Helvetica.ttc#1");
        assert_eq!(entry.label(), "Helvetica Bold");
    }
}
