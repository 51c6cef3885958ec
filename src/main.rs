use anyhow::{Context, Result, bail};
use floorgrid::script::Script;
use floorgrid::{Cell, CellSet, Editor, EditorSettings, logging, outline};
use std::path::{Path, PathBuf};

const USAGE: &str = "\
usage:
  floorgrid replay <script.json> [--settings <settings.json>]
  floorgrid outline <cells.json>";

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    logging::init();
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(|s| s.as_str()) {
        Some("replay") => replay(&args[2..]),
        Some("outline") => print_outline(&args[2..]),
        Some("help") | Some("--help") | Some("-h") => {
            println!("{USAGE}");
            Ok(())
        }
        _ => bail!("{USAGE}"),
    }
}

fn replay(args: &[String]) -> Result<()> {
    let Some(script_path) = args.first() else {
        bail!("{USAGE}");
    };
    let settings = match args.get(1).map(|s| s.as_str()) {
        Some("--settings") => {
            let path = args.get(2).map(PathBuf::from).context("--settings needs a path")?;
            EditorSettings::load_from(&path)?
        }
        Some(other) => bail!("unexpected argument '{other}'\n{USAGE}"),
        None => EditorSettings::load(),
    };

    let script = Script::load(Path::new(script_path))?;
    let mut editor = Editor::new(settings);
    let summary = script.run(&mut editor);
    if summary.skipped > 0 {
        eprintln!("{} of {} steps had no effect", summary.skipped, summary.steps);
    }
    println!("{}", serde_json::to_string_pretty(&editor.region_records())?);
    Ok(())
}

fn print_outline(args: &[String]) -> Result<()> {
    let Some(path) = args.first() else {
        bail!("{USAGE}");
    };
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let cells: Vec<Cell> = serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))?;
    let cells: CellSet = cells.into_iter().collect();
    let outline = outline::extract(&cells)?;
    println!("{outline}");
    println!("{}", serde_json::to_string_pretty(&outline)?);
    Ok(())
}
