/// fontpick-core: the matchmaker between font requests and installed fonts
///
/// Somebody asks for "Helvetica Bold". The machine has `Helvetica.ttc`, or
/// maybe just `arialbd.ttf`, or only `LiberationSans-Bold.ttf`. This library
/// walks the font directories once, recognizes what each file holds from its
/// name, and then answers requests with the closest installed face it can
/// honestly offer.
///
/// ## Three Acts of Font Matching
///
/// **Discovery**: a single best-effort walk over the font directories
/// - Accepts TTF, TTC and OTF by default, any extension list on request
/// - Shrugs off unreadable folders instead of giving up on the whole party
/// - Lets you listen in on what was skipped, if you care to
///
/// **Recognition**: filenames tell stories
/// - Abbreviated Windows names (`arialbd`, `georgiaz`) and macOS collections
///   (`Helvetica.ttc` holds six faces) come from a bundled table
/// - Everything else is read as `<family><style words>`, e.g.
///   `DejaVuSansMono-BoldOblique`
///
/// **Resolution**: exact first, kin second
/// - Exact names win, spelled any way you like ("Arial-BoldItalic")
/// - Otherwise the family is inferred and its installed members, or those
///   of a stand-in family (Helvetica ~ Arial ~ Liberation Sans), compete on
///   weight, slant and width
/// - When nobody fits, you get `None`, never an impostor
///
/// ## A Sample Conversation
///
/// ```rust,no_run
/// use fontpick_core::finder::{Finder, FinderOptions};
///
/// let finder = Finder::new(&FinderOptions::default());
///
/// match finder.find("Helvetica Bold") {
///     Some(font) => println!("{} -> {}", font.label(), font.path_with_index()),
///     None => println!("no installed font fits"),
/// }
/// ```
///
/// ## The Cast of Characters
///
/// - [`FontEntry`]: one face and the file it lives in
/// - [`NameRegistry`]: the table of families, filenames and stand-ins
/// - [`Finder`]: the catalog and the matchmaking pipeline
/// - [`font_style_score`]: how alike two styles are
///
/// ---
///
/// Crafted with care at FontLab https://www.fontlab.com/
pub mod catalog;
pub mod discovery;
pub mod finder;
pub mod output;
pub mod registry;
pub mod style;

mod builtin;

pub use catalog::FontEntry;
pub use finder::{Finder, FinderOptions, Resolution, ResolutionKind};
pub use registry::{Confidence, FamilyMatch, NameRegistry, RegistryTable};
pub use style::font_style_score;
