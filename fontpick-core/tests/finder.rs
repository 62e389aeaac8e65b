/// End-to-end: walk a fixture folder, then ask for fonts by name
///
/// The fixture files are empty; the registry only ever looks at names.
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use fontpick_core::discovery::SkippedEntry;
use fontpick_core::{
    font_style_score, Finder, FinderOptions, FontEntry, NameRegistry, ResolutionKind,
};
use tempfile::TempDir;

/// Walk order: `Helvetica.ttc`, `arial.ttf`, `arialbd.ttf`, `ariali.ttf`,
/// `custom-font.otf`, `readme.txt`, `sub/LiberationSans-Bold.ttf`.
fn fixture() -> TempDir {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    for name in [
        "Helvetica.ttc",
        "arial.ttf",
        "arialbd.ttf",
        "ariali.ttf",
        "custom-font.otf",
        "readme.txt",
    ] {
        fs::write(root.join(name), b"").expect("touch");
    }
    fs::create_dir_all(root.join("sub")).expect("mkdir");
    fs::write(root.join("sub/LiberationSans-Bold.ttf"), b"").expect("touch");
    temp
}

fn finder_for(root: &Path) -> Finder {
    Finder::new(&FinderOptions::with_roots([root]))
}

#[test]
fn catalog_covers_every_walked_file() {
    let temp = fixture();
    let finder = finder_for(temp.path());
    let fonts = finder.list();

    // 6 Helvetica faces + 3 Arial + custom + Liberation; readme.txt is filtered out.
    assert_eq!(fonts.len(), 11);
    assert_eq!(finder.len(), 11);

    let bare: Vec<&FontEntry> = fonts.iter().filter(|f| !f.is_recognized()).collect();
    assert_eq!(bare.len(), 1);
    assert!(bare[0].path.ends_with("custom-font.otf"));
}

#[test]
fn listed_entries_are_copies() {
    let temp = fixture();
    let finder = finder_for(temp.path());

    let mut first = finder.list();
    first[0].name = Some("Mutated".to_string());
    first.clear();

    let second = finder.list();
    assert_eq!(second.len(), 11);
    assert_eq!(second[0].name.as_deref(), Some("Helvetica"));

    let mut found = finder.find("Arial Bold").expect("match");
    found.name = None;
    assert_eq!(
        finder.find("Arial Bold").and_then(|f| f.name),
        Some("Arial Bold".to_string())
    );
}

#[test]
fn exact_names_round_trip() {
    let temp = fixture();
    let finder = finder_for(temp.path());

    for entry in finder.list() {
        let found = finder.find(&entry.label()).expect("exact match");
        assert_eq!(found, entry);
    }
}

#[test]
fn collection_faces_resolve_by_index() {
    let temp = fixture();
    let finder = finder_for(temp.path());

    let found = finder.resolve("Helvetica-BoldOblique").expect("match");
    assert!(found.is_exact());
    assert_eq!(found.entry.face_index, Some(3));
    assert!(found.entry.path_with_index().ends_with("Helvetica.ttc#3"));
}

#[test]
fn missing_variant_picks_family_member() {
    let temp = fixture();
    let finder = finder_for(temp.path());

    let found = finder.resolve("Helvetica Condensed Black").expect("match");
    assert_eq!(found.entry.family.as_deref(), Some("Helvetica"));
    assert_eq!(found.entry.face_index, Some(1));
    match found.kind {
        ResolutionKind::Alternative { family, score } => {
            assert_eq!(family, "Helvetica");
            assert!(score > 0.0);
        }
        ResolutionKind::Exact => panic!("expected an alternative"),
    }
}

#[test]
fn missing_family_uses_substitutes_with_stable_ties() {
    let temp = fixture();
    let finder = finder_for(temp.path());

    // Helvetica Bold, Arial Bold and Liberation Sans Bold tie; the first in catalog order wins.
    let first = finder.find("Nimbus Sans Bold").expect("match");
    assert!(first.path.ends_with("Helvetica.ttc"));
    assert_eq!(first.face_index, Some(1));

    for _ in 0..5 {
        assert_eq!(finder.find("Nimbus Sans Bold"), Some(first.clone()));
    }
}

#[test]
fn unrelated_queries_find_nothing() {
    let temp = fixture();
    let finder = finder_for(temp.path());

    assert!(finder.find("Zapfino").is_none());
    assert!(finder.resolve("Bold").is_none());
    assert!(finder.find("").is_none());
}

#[test]
fn bare_files_match_by_stem() {
    let temp = fixture();
    let finder = finder_for(temp.path());

    let found = finder.find("Custom Font").expect("match");
    assert!(found.path.ends_with("custom-font.otf"));
    assert_eq!(found.name, None);
}

#[test]
fn extension_filter_limits_catalog() {
    let temp = fixture();
    let opts = FinderOptions::with_roots([temp.path()]).extensions(&[".ttf"]);
    let finder = Finder::new(&opts);

    let fonts = finder.list();
    assert_eq!(fonts.len(), 4);
    assert!(fonts
        .iter()
        .all(|f| f.path.extension().and_then(|e| e.to_str()) == Some("ttf")));
}

#[test]
fn empty_extension_filter_accepts_all_files() {
    let temp = fixture();
    let opts = FinderOptions::with_roots([temp.path()]).extensions::<&str>(&[]);
    let finder = Finder::new(&opts);

    assert!(finder
        .list()
        .iter()
        .any(|f| f.path.ends_with("readme.txt")));
}

#[test]
fn unreadable_roots_are_reported_not_fatal() {
    let temp = fixture();
    let missing = PathBuf::from("/nonexistent/fontpick");
    let opts = FinderOptions::with_roots([missing.clone(), temp.path().to_path_buf()]);

    let mut skipped: Vec<SkippedEntry> = Vec::new();
    let finder = Finder::scan(&opts, NameRegistry::builtin(), |entry| {
        skipped.push(entry.clone())
    });

    assert_eq!(finder.len(), 11);
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].path.as_ref(), Some(&missing));

    let nothing = Finder::new(&FinderOptions::with_roots([missing]));
    assert!(nothing.is_empty());
}

#[test]
fn readers_share_a_finder_across_threads() {
    let temp = fixture();
    let finder = Arc::new(finder_for(temp.path()));
    let expected = finder.find("Arial Italic");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let finder = Arc::clone(&finder);
            thread::spawn(move || finder.find("Arial Italic"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("join"), expected);
    }
}

#[test]
fn documented_arial_example() {
    let finder = Finder::from_entries(
        vec![
            FontEntry::named("arial-bold.ttf", "Arial", "Arial Bold"),
            FontEntry::named("arial-italic.ttf", "Arial", "Arial Italic"),
        ],
        NameRegistry::builtin(),
    );

    let exact = finder.find("Arial Bold").expect("exact");
    assert_eq!(exact.path, PathBuf::from("arial-bold.ttf"));

    let black = finder.find("Arial Black").expect("alternative");
    assert_eq!(black.path, PathBuf::from("arial-bold.ttf"));
}

#[test]
fn zero_scores_still_pick_the_first_family_member() {
    let finder = Finder::from_entries(
        vec![
            FontEntry::named("arial-a.ttf", "Arial", "Arial Black UltraExpanded"),
            FontEntry::named("arial-b.ttf", "Arial", "Arial UltraExpanded Black"),
        ],
        NameRegistry::builtin(),
    );

    let query = "Arial Thin UltraCondensed Italic";
    assert_eq!(font_style_score(query, "Arial Black UltraExpanded"), 0.0);

    let found = finder.resolve(query).expect("alternative");
    assert_eq!(found.entry.path, PathBuf::from("arial-a.ttf"));
    match found.kind {
        ResolutionKind::Alternative { family, score } => {
            assert_eq!(family, "Arial");
            assert_eq!(score, 0.0);
        }
        ResolutionKind::Exact => panic!("expected an alternative"),
    }
}

#[test]
fn long_glued_style_runs_resolve_promptly() {
    let finder = Finder::from_entries(
        vec![
            FontEntry::named("arial.ttf", "Arial", "Arial"),
            FontEntry::named("arialbd.ttf", "Arial", "Arial Bold"),
        ],
        NameRegistry::builtin(),
    );

    let query = format!("Arial {}x", "Demibold".repeat(32));
    let found = finder.find(&query).expect("family member");
    assert_eq!(found.family.as_deref(), Some("Arial"));
    assert!(finder.find(&format!("{}x", "Demibold".repeat(32))).is_none());
}
