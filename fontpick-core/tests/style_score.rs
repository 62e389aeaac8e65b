use proptest::prelude::*;

use fontpick_core::font_style_score;
use fontpick_core::style::{parse_style, Slant};

const TOKENS: &[&str] = &[
    "Thin", "Light", "Regular", "Medium", "SemiBold", "Bold", "Black", "Italic", "Oblique",
    "Condensed", "Expanded", "Narrow", "Book",
];

#[test]
fn bold_query_prefers_bold_face() {
    assert!(font_style_score("Bold", "Foo Bold") > font_style_score("Bold", "Foo Italic"));
}

#[test]
fn plain_query_prefers_regular_face() {
    let regular = font_style_score("Arial", "Arial");
    assert!(regular > font_style_score("Arial", "Arial Bold"));
    assert!(regular > font_style_score("Arial", "Arial Italic"));
}

#[test]
fn italic_and_oblique_are_close_relatives() {
    let italic = font_style_score("Italic", "Foo Italic");
    let oblique = font_style_score("Italic", "Foo Oblique");
    let upright = font_style_score("Italic", "Foo");
    assert!(italic > oblique);
    assert!(oblique > upright);
}

#[test]
fn parses_separated_width_words() {
    let parsed = parse_style("Foo Semi Condensed Light Italic");
    assert_eq!(parsed.style.width, 4);
    assert_eq!(parsed.style.weight, 300);
    assert_eq!(parsed.style.slant, Slant::Italic);
    assert_eq!(parsed.rest, vec!["Foo".to_string()]);
}

#[test]
fn long_glued_style_runs_score_promptly() {
    let query = format!("{}x", "Demibold".repeat(32));
    let score = font_style_score(&query, "Arial Bold");
    assert!(score.is_finite());
    assert!(score >= 0.0);

    let parsed = parse_style(&format!("Foo {}", "Demibold".repeat(32)));
    assert_eq!(parsed.style.weight, 600);
    assert_eq!(parsed.rest, vec!["Foo".to_string()]);
}

proptest! {
    #[test]
    fn scores_are_never_negative(query in "\\PC{0,24}", name in "\\PC{0,24}") {
        let score = font_style_score(&query, &name);
        prop_assert!(score >= 0.0);
        prop_assert!(score.is_finite());
    }

    #[test]
    fn token_order_does_not_matter(
        tokens in prop::collection::vec(prop::sample::select(TOKENS), 0..5),
        candidate in prop::sample::select(TOKENS),
    ) {
        let forward = tokens.join(" ");
        let mut reversed = tokens.clone();
        reversed.reverse();
        let backward = reversed.join(" ");
        let name = format!("Foo {candidate}");

        prop_assert_eq!(
            font_style_score(&forward, &name),
            font_style_score(&backward, &name)
        );
    }

    #[test]
    fn bold_beats_italic_for_any_family(family in "[A-Z][a-z]{2,10}") {
        let bold = font_style_score("Bold", &format!("{family} Bold"));
        let italic = font_style_score("Bold", &format!("{family} Italic"));
        prop_assert!(bold > italic);
    }
}
