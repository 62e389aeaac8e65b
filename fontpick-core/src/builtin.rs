//! Bundled registry table (made by FontLab https://www.fontlab.com/)
//!
//! Covers the families shipped with macOS, Windows and the common Linux
//! distributions, their metric-compatible stand-ins, and the abbreviated or
//! bundled filenames those platforms use.

use crate::registry::RegistryTable;

/// Families and the other spellings they go by.
const FAMILIES: &[(&str, &[&str])] = &[
    ("Arial", &[]),
    ("Helvetica", &[]),
    ("Helvetica Neue", &[]),
    ("Times", &[]),
    ("Times New Roman", &["TimesNewRomanPS"]),
    ("Courier", &[]),
    ("Courier New", &["CourierNewPS"]),
    ("Liberation Sans", &[]),
    ("Liberation Serif", &[]),
    ("Liberation Mono", &[]),
    ("Arimo", &[]),
    ("Tinos", &[]),
    ("Cousine", &[]),
    ("Nimbus Sans", &["Nimbus Sans L", "NimbusSanL"]),
    ("Nimbus Roman", &["Nimbus Roman No9 L", "NimbusRomNo9L"]),
    ("Nimbus Mono PS", &["Nimbus Mono L", "NimbusMonL", "Nimbus Mono"]),
    ("TeX Gyre Heros", &[]),
    ("TeX Gyre Termes", &[]),
    ("TeX Gyre Cursor", &[]),
    ("TeX Gyre Pagella", &[]),
    ("FreeSans", &[]),
    ("FreeSerif", &[]),
    ("FreeMono", &[]),
    ("DejaVu Sans", &[]),
    ("DejaVu Sans Mono", &[]),
    ("DejaVu Serif", &[]),
    ("Bitstream Vera Sans", &["Vera Sans"]),
    ("Bitstream Vera Sans Mono", &["Vera Sans Mono"]),
    ("Bitstream Vera Serif", &["Vera Serif"]),
    ("Noto Sans", &[]),
    ("Noto Serif", &[]),
    ("Noto Sans Mono", &[]),
    ("Roboto", &[]),
    ("Roboto Mono", &[]),
    ("Open Sans", &[]),
    ("Ubuntu", &[]),
    ("Ubuntu Mono", &[]),
    ("Cantarell", &[]),
    ("Source Sans Pro", &["Source Sans 3", "SourceSans3"]),
    ("Source Code Pro", &[]),
    ("Fira Sans", &[]),
    ("Fira Mono", &[]),
    ("Fira Code", &[]),
    ("Inter", &[]),
    ("Lato", &[]),
    ("Droid Sans", &[]),
    ("Droid Sans Mono", &[]),
    ("Droid Serif", &[]),
    ("Verdana", &[]),
    ("Georgia", &[]),
    ("Gelasio", &[]),
    ("Tahoma", &[]),
    ("Trebuchet MS", &["Trebuchet"]),
    ("Calibri", &[]),
    ("Carlito", &[]),
    ("Cambria", &[]),
    ("Cambria Math", &[]),
    ("Caladea", &[]),
    ("Consolas", &[]),
    ("Segoe UI", &[]),
    ("Comic Sans MS", &["Comic Sans"]),
    ("Impact", &[]),
    ("Palatino", &[]),
    ("Palatino Linotype", &[]),
    ("P052", &[]),
    ("Menlo", &[]),
    ("Monaco", &[]),
    ("Symbol", &[]),
    ("Standard Symbols PS", &["Standard Symbols L", "StandardSymL"]),
    ("MS Gothic", &[]),
    ("MS PGothic", &[]),
    ("MS UI Gothic", &[]),
];

/// Windows and Bitstream abbreviated filenames: (stem, family, style).
const FILES: &[(&str, &str, &str)] = &[
    ("arialbd", "Arial", "Bold"),
    ("ariali", "Arial", "Italic"),
    ("arialbi", "Arial", "Bold Italic"),
    ("ariblk", "Arial", "Black"),
    ("arialn", "Arial", "Narrow"),
    ("arialnb", "Arial", "Narrow Bold"),
    ("arialni", "Arial", "Narrow Italic"),
    ("arialnbi", "Arial", "Narrow Bold Italic"),
    ("times", "Times New Roman", ""),
    ("timesbd", "Times New Roman", "Bold"),
    ("timesi", "Times New Roman", "Italic"),
    ("timesbi", "Times New Roman", "Bold Italic"),
    ("cour", "Courier New", ""),
    ("courbd", "Courier New", "Bold"),
    ("couri", "Courier New", "Italic"),
    ("courbi", "Courier New", "Bold Italic"),
    ("verdanab", "Verdana", "Bold"),
    ("verdanai", "Verdana", "Italic"),
    ("verdanaz", "Verdana", "Bold Italic"),
    ("georgiab", "Georgia", "Bold"),
    ("georgiai", "Georgia", "Italic"),
    ("georgiaz", "Georgia", "Bold Italic"),
    ("tahomabd", "Tahoma", "Bold"),
    ("trebuc", "Trebuchet MS", ""),
    ("trebucbd", "Trebuchet MS", "Bold"),
    ("trebucit", "Trebuchet MS", "Italic"),
    ("trebucbi", "Trebuchet MS", "Bold Italic"),
    ("calibrib", "Calibri", "Bold"),
    ("calibrii", "Calibri", "Italic"),
    ("calibriz", "Calibri", "Bold Italic"),
    ("calibril", "Calibri", "Light"),
    ("calibrili", "Calibri", "Light Italic"),
    ("cambriab", "Cambria", "Bold"),
    ("cambriai", "Cambria", "Italic"),
    ("cambriaz", "Cambria", "Bold Italic"),
    ("consola", "Consolas", ""),
    ("consolab", "Consolas", "Bold"),
    ("consolai", "Consolas", "Italic"),
    ("consolaz", "Consolas", "Bold Italic"),
    ("segoeuib", "Segoe UI", "Bold"),
    ("segoeuii", "Segoe UI", "Italic"),
    ("segoeuiz", "Segoe UI", "Bold Italic"),
    ("segoeuil", "Segoe UI", "Light"),
    ("seguisb", "Segoe UI", "SemiBold"),
    ("comic", "Comic Sans MS", ""),
    ("comicbd", "Comic Sans MS", "Bold"),
    ("comici", "Comic Sans MS", "Italic"),
    ("comicz", "Comic Sans MS", "Bold Italic"),
    ("pala", "Palatino Linotype", ""),
    ("palab", "Palatino Linotype", "Bold"),
    ("palai", "Palatino Linotype", "Italic"),
    ("palabi", "Palatino Linotype", "Bold Italic"),
    ("vera", "Bitstream Vera Sans", ""),
    ("verabd", "Bitstream Vera Sans", "Bold"),
    ("verait", "Bitstream Vera Sans", "Oblique"),
    ("verabi", "Bitstream Vera Sans", "Bold Oblique"),
    ("veramono", "Bitstream Vera Sans Mono", ""),
    ("veramobd", "Bitstream Vera Sans Mono", "Bold"),
    ("veramoit", "Bitstream Vera Sans Mono", "Oblique"),
    ("veramobi", "Bitstream Vera Sans Mono", "Bold Oblique"),
    ("verase", "Bitstream Vera Serif", ""),
    ("verasebd", "Bitstream Vera Serif", "Bold"),
    ("ubuntur", "Ubuntu", ""),
    ("ubunturi", "Ubuntu", "Italic"),
    ("ubuntub", "Ubuntu", "Bold"),
    ("ubuntubi", "Ubuntu", "Bold Italic"),
    ("ubuntul", "Ubuntu", "Light"),
    ("ubuntuli", "Ubuntu", "Light Italic"),
    ("ubuntum", "Ubuntu", "Medium"),
    ("ubuntumi", "Ubuntu", "Medium Italic"),
    ("ubuntuc", "Ubuntu", "Condensed"),
    ("ubuntumonor", "Ubuntu Mono", ""),
    ("ubuntumonori", "Ubuntu Mono", "Italic"),
    ("ubuntumonob", "Ubuntu Mono", "Bold"),
    ("ubuntumonobi", "Ubuntu Mono", "Bold Italic"),
];

/// Collection files: (stem, extension, faces in index order).
const COLLECTIONS: &[(&str, &str, &[(&str, &str)])] = &[
    (
        "Helvetica",
        "ttc",
        &[
            ("Helvetica", ""),
            ("Helvetica", "Bold"),
            ("Helvetica", "Oblique"),
            ("Helvetica", "Bold Oblique"),
            ("Helvetica", "Light"),
            ("Helvetica", "Light Oblique"),
        ],
    ),
    (
        "HelveticaNeue",
        "ttc",
        &[
            ("Helvetica Neue", ""),
            ("Helvetica Neue", "Bold"),
            ("Helvetica Neue", "Italic"),
            ("Helvetica Neue", "Bold Italic"),
            ("Helvetica Neue", "Condensed Bold"),
            ("Helvetica Neue", "UltraLight"),
            ("Helvetica Neue", "UltraLight Italic"),
            ("Helvetica Neue", "Light"),
            ("Helvetica Neue", "Light Italic"),
            ("Helvetica Neue", "Condensed Black"),
            ("Helvetica Neue", "Medium"),
            ("Helvetica Neue", "Medium Italic"),
            ("Helvetica Neue", "Thin"),
            ("Helvetica Neue", "Thin Italic"),
        ],
    ),
    (
        "Times",
        "ttc",
        &[
            ("Times", "Roman"),
            ("Times", "Bold"),
            ("Times", "Italic"),
            ("Times", "Bold Italic"),
        ],
    ),
    (
        "Courier",
        "ttc",
        &[
            ("Courier", ""),
            ("Courier", "Bold"),
            ("Courier", "Oblique"),
            ("Courier", "Bold Oblique"),
        ],
    ),
    (
        "Menlo",
        "ttc",
        &[
            ("Menlo", ""),
            ("Menlo", "Bold"),
            ("Menlo", "Italic"),
            ("Menlo", "Bold Italic"),
        ],
    ),
    ("cambria", "ttc", &[("Cambria", ""), ("Cambria Math", "")]),
    (
        "msgothic",
        "ttc",
        &[("MS Gothic", ""), ("MS UI Gothic", ""), ("MS PGothic", "")],
    ),
];

/// Metric-compatible or visually close families.
const SUBSTITUTES: &[&[&str]] = &[
    &[
        "Helvetica",
        "Arial",
        "Helvetica Neue",
        "Liberation Sans",
        "Arimo",
        "Nimbus Sans",
        "TeX Gyre Heros",
        "FreeSans",
    ],
    &[
        "Times New Roman",
        "Times",
        "Liberation Serif",
        "Tinos",
        "Nimbus Roman",
        "TeX Gyre Termes",
        "FreeSerif",
    ],
    &[
        "Courier New",
        "Courier",
        "Liberation Mono",
        "Cousine",
        "Nimbus Mono PS",
        "TeX Gyre Cursor",
        "FreeMono",
    ],
    &["Calibri", "Carlito"],
    &["Cambria", "Caladea"],
    &["Georgia", "Gelasio"],
    &["Palatino", "Palatino Linotype", "P052", "TeX Gyre Pagella"],
    &["Symbol", "Standard Symbols PS"],
    &["DejaVu Sans", "Bitstream Vera Sans", "Verdana"],
    &[
        "DejaVu Sans Mono",
        "Bitstream Vera Sans Mono",
        "Menlo",
        "Consolas",
    ],
    &["DejaVu Serif", "Bitstream Vera Serif"],
];

pub(crate) fn table() -> RegistryTable {
    let mut table = RegistryTable::new();

    for (name, aliases) in FAMILIES {
        table = table.family(name, aliases);
    }
    for (stem, family, style) in FILES {
        table = table.file(stem, family, style);
    }
    for (stem, extension, faces) in COLLECTIONS {
        table = table.collection(stem, Some(*extension), faces);
    }
    for group in SUBSTITUTES {
        table = table.substitutes(group);
    }

    table
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::registry::NameRegistry;

    #[test]
    fn windows_times_and_mac_times_differ_by_extension() {
        let registry = NameRegistry::builtin();

        let windows = registry.match_fonts_by_filename(Path::new("C:/Windows/Fonts/times.ttf"));
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].family.as_deref(), Some("Times New Roman"));

        let mac = registry.match_fonts_by_filename(Path::new("/System/Library/Fonts/Times.ttc"));
        assert_eq!(mac.len(), 4);
        assert_eq!(mac[0].name.as_deref(), Some("Times Roman"));
        assert_eq!(mac[3].face_index, Some(3));
    }

    #[test]
    fn every_substitute_is_a_known_family() {
        let registry = NameRegistry::builtin();
        for group in super::SUBSTITUTES {
            for family in group.iter() {
                assert_eq!(registry.canonical_family(family), Some(*family));
            }
        }
    }
}
