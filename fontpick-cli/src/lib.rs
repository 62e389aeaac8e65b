//! fontpick CLI (made by FontLab https://www.fontlab.com/)

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use fontpick_core::discovery::{system_font_dirs, DEFAULT_EXTENSIONS};
use fontpick_core::output::{write_json_pretty, write_ndjson};
use fontpick_core::style::Style;
use fontpick_core::{
    Confidence, Finder, FinderOptions, FontEntry, NameRegistry, Resolution, ResolutionKind,
};

/// CLI entrypoint for fontpick.
#[derive(Debug, Parser)]
#[command(
    name = "fontpick",
    about = "Find the installed font closest to a requested name (made by FontLab https://www.fontlab.com/)"
)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every font face found under the given paths
    List(ListArgs),
    /// Resolve a font name to the best installed face
    Match(MatchArgs),
    /// Show the family a query implies and its installed members
    Family(FamilyArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct MatchArgs {
    /// Font name to resolve, e.g. "Helvetica Bold" or Arial-BoldItalic
    query: String,

    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct FamilyArgs {
    /// Font name whose family should be inferred
    query: String,

    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct SourceArgs {
    /// Paths to scan (directories or files); defaults to the system font directories
    #[arg(value_hint = ValueHint::DirPath)]
    paths: Vec<PathBuf>,

    /// Read newline-delimited paths from STDIN
    #[arg(long = "stdin-paths", action = ArgAction::SetTrue)]
    stdin_paths: bool,

    /// Include common system font directories automatically
    #[arg(long = "system-fonts", action = ArgAction::SetTrue)]
    system_fonts: bool,

    /// Accepted file extensions (default: .ttf,.ttc,.otf)
    #[arg(long = "ext", value_delimiter = ',', value_hint = ValueHint::Other)]
    extensions: Vec<String>,

    /// Accept every file regardless of extension
    #[arg(long = "all-files", action = ArgAction::SetTrue, conflicts_with = "extensions")]
    all_files: bool,

    /// Follow symlinks while walking paths
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    follow_symlinks: bool,
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Emit a single JSON array
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,

    /// Format output as padded columns
    #[arg(long = "columns", action = ArgAction::SetTrue)]
    columns: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// What `family` reports about a query.
#[derive(Debug, Clone, Serialize)]
struct FamilyReport {
    query: String,
    family: String,
    confidence: Confidence,
    style: Style,
    alternatives: Vec<FontEntry>,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::List(args) => run_list(args),
        Command::Match(args) => run_match(args),
        Command::Family(args) => run_family(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run_list(args: ListArgs) -> Result<()> {
    let finder = build_finder(&args.source)?;
    let fonts = finder.list();

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let use_color = use_color(args.output.color, &handle);

    if args.output.ndjson {
        write_ndjson(&fonts, &mut handle)?;
    } else if args.output.json {
        write_json_pretty(&fonts, &mut handle)?;
    } else if args.output.columns {
        let rows: Vec<Row> = fonts.iter().map(entry_row).collect();
        write_columns(&rows, &mut handle, use_color)?;
    } else {
        write_plain(&fonts, &mut handle, use_color)?;
    }

    Ok(())
}

fn run_match(args: MatchArgs) -> Result<()> {
    let finder = build_finder(&args.source)?;
    let resolution = finder
        .resolve(&args.query)
        .ok_or_else(|| anyhow!("no installed font matches \"{}\"", args.query))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let use_color = use_color(args.output.color, &handle);
    let resolutions = [resolution];

    if args.output.ndjson {
        write_ndjson(&resolutions, &mut handle)?;
    } else if args.output.json {
        write_json_pretty(&resolutions, &mut handle)?;
    } else {
        let rows: Vec<Row> = resolutions.iter().map(resolution_row).collect();
        write_columns(&rows, &mut handle, use_color)?;
    }

    Ok(())
}

fn run_family(args: FamilyArgs) -> Result<()> {
    let finder = build_finder(&args.source)?;
    let report = family_report(&finder, &args.query);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let use_color = use_color(args.output.color, &handle);

    if args.output.ndjson {
        write_ndjson(std::slice::from_ref(&report), &mut handle)?;
    } else if args.output.json {
        write_json_pretty(std::slice::from_ref(&report), &mut handle)?;
    } else {
        write_family(&report, &mut handle, use_color, args.output.columns)?;
    }

    Ok(())
}

fn family_report(finder: &Finder, query: &str) -> FamilyReport {
    let matched = finder.registry().match_family(query);
    let alternatives = finder
        .registry()
        .alternatives(&matched.family, &finder.list());

    FamilyReport {
        query: query.to_string(),
        family: matched.family,
        confidence: matched.confidence,
        style: matched.style,
        alternatives,
    }
}

fn build_finder(source: &SourceArgs) -> Result<Finder> {
    let stdin = io::stdin();
    let roots = gather_paths(
        &source.paths,
        source.stdin_paths,
        source.system_fonts,
        stdin.lock(),
    )?;
    let opts = finder_options(source, roots);

    let mut skipped = 0usize;
    let finder = Finder::scan(&opts, NameRegistry::builtin(), |entry| {
        skipped += 1;
        debug!(path = ?entry.path, reason = %entry.reason, "skipped");
    });
    info!(faces = finder.len(), skipped, "scanned font directories");

    Ok(finder)
}

fn finder_options(source: &SourceArgs, roots: Vec<PathBuf>) -> FinderOptions {
    let opts = FinderOptions::with_roots(roots).follow_symlinks(source.follow_symlinks);
    if source.all_files {
        opts.extensions::<&str>(&[])
    } else if source.extensions.is_empty() {
        opts.extensions(DEFAULT_EXTENSIONS)
    } else {
        opts.extensions(&source.extensions)
    }
}

fn gather_paths(
    raw_paths: &[PathBuf],
    read_stdin: bool,
    include_system: bool,
    mut stdin: impl BufRead,
) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    if read_stdin {
        paths.extend(read_paths_from(&mut stdin)?);
    }

    for path in raw_paths {
        if path == Path::new("-") {
            paths.extend(read_paths_from(&mut stdin)?);
        } else {
            paths.push(path.clone());
        }
    }

    let explicit = !paths.is_empty();
    if include_system || !explicit {
        paths.extend(system_font_dirs());
    }

    if paths.is_empty() {
        return Err(anyhow!(
            "no font directories found; pass paths or set FONTPICK_FONT_DIRS"
        ));
    }

    Ok(paths)
}

fn read_paths_from(reader: &mut impl BufRead) -> Result<Vec<PathBuf>> {
    let mut buf = String::new();
    let mut paths = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_line(&mut buf)
            .context("reading paths from stdin")?;
        if read == 0 {
            break;
        }

        let trimmed = buf.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }

    Ok(paths)
}

fn use_color(choice: ColorChoice, handle: &impl IsTerminal) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => handle.is_terminal(),
    }
}

/// One line of tabular output.
struct Row {
    path: String,
    name: String,
    detail: String,
}

fn entry_row(entry: &FontEntry) -> Row {
    Row {
        path: entry.path_with_index(),
        name: entry.label(),
        detail: entry
            .family
            .clone()
            .unwrap_or_else(|| "(unrecognized)".to_string()),
    }
}

fn resolution_row(resolution: &Resolution) -> Row {
    let detail = match &resolution.kind {
        ResolutionKind::Exact => "exact".to_string(),
        ResolutionKind::Alternative { score, .. } => format!("alternative {score:.2}"),
    };

    Row {
        path: resolution.entry.path_with_index(),
        name: resolution.entry.label(),
        detail,
    }
}

fn write_plain(fonts: &[FontEntry], mut w: impl Write, color: bool) -> Result<()> {
    for entry in fonts {
        let rendered = apply_color(&entry.path_with_index(), color, AnsiColor::Cyan);
        writeln!(w, "{rendered}")?;
    }
    Ok(())
}

fn write_columns(rows: &[Row], mut w: impl Write, color: bool) -> Result<()> {
    let path_width = rows
        .iter()
        .map(|r| r.path.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(0, 120);
    let name_width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(0, 80);

    for row in rows {
        let padded_path = format!("{:<path_width$}", row.path);
        let padded_name = format!("{:<name_width$}", row.name);
        let rendered_path = apply_color(&padded_path, color, AnsiColor::Cyan);
        let rendered_name = apply_color(&padded_name, color, AnsiColor::Yellow);
        let rendered_detail = apply_color(&row.detail, color, AnsiColor::Green);

        writeln!(w, "{rendered_path}  {rendered_name}  {rendered_detail}")?;
    }

    Ok(())
}

fn write_family(report: &FamilyReport, mut w: impl Write, color: bool, columns: bool) -> Result<()> {
    let confidence = match report.confidence {
        Confidence::Known => "known",
        Confidence::Guessed => "guessed",
    };
    let family = apply_color(&report.family, color, AnsiColor::Yellow);
    writeln!(w, "{family} ({confidence})")?;

    if columns {
        let rows: Vec<Row> = report.alternatives.iter().map(entry_row).collect();
        write_columns(&rows, &mut w, color)?;
    } else {
        write_plain(&report.alternatives, &mut w, color)?;
    }

    Ok(())
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Cyan,
    Yellow,
    Green,
}

fn apply_color(text: &str, color: bool, code: AnsiColor) -> String {
    if !color {
        return text.to_string();
    }

    let code_str = match code {
        AnsiColor::Cyan => "36",
        AnsiColor::Yellow => "33",
        AnsiColor::Green => "32",
    };

    format!("\u{1b}[{}m{}\u{1b}[0m", code_str, text)
}
