// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Medflow CLI entrypoint.
//!
//! Runs against the built-in protocol catalog unless `--catalog` points at another graph
//! document. Bookmarks are stored under `--data-dir` (default `.medflow`).

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::Path;

use medflow::config::{bootstrap_catalog, load_feature_flags};
use medflow::diagram::{classify, matching_rules, Diagram, DiagramKey, DiagramView};
use medflow::model::Catalog;
use medflow::nav::Navigator;
use medflow::render::{
    render_bookmarks, render_nav_error, render_outline, render_step, RenderOptions,
};
use medflow::store::{BookmarkStore, DirKv, KvStore, WriteDurability};
use tracing_subscriber::EnvFilter;

const DEFAULT_DATA_DIR: &str = ".medflow";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [options] protocols\n  {program} [options] walk <protocol-id>\n  {program} [options] diagram [--collapse <key>]...\n  {program} [options] bookmarks\n  {program} [options] classify <node-id>\n  {program} schema\n\nOptions:\n  --catalog <file>    graph document replacing the built-in protocols\n  --overrides <file>  graph document merged over the catalog (ignored if missing or broken)\n  --flags <file>      feature flags document (defaults if missing or broken)\n  --data-dir <dir>    bookmark storage directory (default {DEFAULT_DATA_DIR})\n  --durable-writes    opt into slower, best-effort durable persistence (fsync where supported)\n\nWalk keys: <n> pick choice, b back, r restart, m toggle bookmark, q quit.\nDiagram keys are `header:<category>` or `<protocol>:<node>`."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
enum Command {
    #[default]
    Protocols,
    Walk { protocol_id: String },
    Diagram,
    Bookmarks,
    Classify { node_id: String },
    Schema,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    command: Command,
    catalog: Option<String>,
    overrides: Option<String>,
    flags: Option<String>,
    data_dir: Option<String>,
    durable_writes: bool,
    collapse: Vec<String>,
}

fn set_once(slot: &mut Option<String>, args: &mut impl Iterator<Item = String>) -> Result<(), ()> {
    if slot.is_some() {
        return Err(());
    }
    *slot = Some(args.next().ok_or(())?);
    Ok(())
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();
    let mut positional = Vec::<String>::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--catalog" => set_once(&mut options.catalog, &mut args)?,
            "--overrides" => set_once(&mut options.overrides, &mut args)?,
            "--flags" => set_once(&mut options.flags, &mut args)?,
            "--data-dir" => set_once(&mut options.data_dir, &mut args)?,
            "--collapse" => options.collapse.push(args.next().ok_or(())?),
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    options.command = match positional.next().as_deref() {
        None | Some("protocols") => Command::Protocols,
        Some("walk") => Command::Walk { protocol_id: positional.next().ok_or(())? },
        Some("diagram") => Command::Diagram,
        Some("bookmarks") => Command::Bookmarks,
        Some("classify") => Command::Classify { node_id: positional.next().ok_or(())? },
        Some("schema") => Command::Schema,
        Some(_) => return Err(()),
    };

    if positional.next().is_some() {
        return Err(());
    }

    if !options.collapse.is_empty() && options.command != Command::Diagram {
        return Err(());
    }

    Ok(options)
}

fn init_tracing(debug: bool) {
    let fallback = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_catalog(options: &CliOptions) -> Result<Catalog, Box<dyn Error>> {
    let base = match options.catalog.as_deref() {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::builtin()?,
    };
    Ok(bootstrap_catalog(base, None, options.overrides.as_deref().map(Path::new)))
}

fn open_bookmarks(options: &CliOptions) -> BookmarkStore<DirKv> {
    let dir = options.data_dir.clone().unwrap_or_else(|| DEFAULT_DATA_DIR.to_owned());
    let kv = if options.durable_writes {
        DirKv::new(dir).with_durability(WriteDurability::Durable)
    } else {
        DirKv::new(dir)
    };
    BookmarkStore::load(kv)
}

fn print_protocols(catalog: &Catalog, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Catalog {} ({})", catalog.version, catalog.language)?;
    for protocol in catalog.protocols.values() {
        writeln!(out, "  {:<16} {} · {} steps", protocol.id.as_str(), protocol.name, protocol.nodes.len())?;
    }
    Ok(())
}

/// Interactive walkthrough. Reads one command per line from `input` until `q` or EOF.
fn run_walk<S: KvStore>(
    catalog: &Catalog,
    bookmarks: &mut BookmarkStore<S>,
    protocol_id: &str,
    render: RenderOptions,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let mut nav = Navigator::new(catalog);
    nav.activate(protocol_id)?;
    show_step(&nav, bookmarks, render, out)?;

    for line in input.lines() {
        let line = line?;
        let outcome = match line.trim() {
            "q" => break,
            "b" => nav.back(),
            "r" => nav.restart(),
            "m" => {
                if let Some(current) = nav.current_ref().cloned() {
                    match bookmarks.toggle(&current) {
                        Ok(true) => writeln!(out, "Bookmarked {current}.")?,
                        Ok(false) => writeln!(out, "Removed bookmark {current}.")?,
                        Err(err) => writeln!(out, "Could not save bookmark: {err}")?,
                    }
                }
                Ok(())
            }
            raw => match raw.parse::<usize>() {
                Ok(pick) if pick >= 1 => match nav.choices().get(pick - 1) {
                    Some(choice) => nav.follow(choice),
                    None => {
                        writeln!(out, "No choice {pick}.")?;
                        continue;
                    }
                },
                _ => {
                    writeln!(out, "Enter a choice number, b, r, m or q.")?;
                    continue;
                }
            },
        };

        match outcome {
            Ok(()) => show_step(&nav, bookmarks, render, out)?,
            Err(err) => writeln!(out, "{}", render_nav_error(&err))?,
        }
    }
    Ok(())
}

fn show_step<S: KvStore>(
    nav: &Navigator<'_>,
    bookmarks: &BookmarkStore<S>,
    render: RenderOptions,
    out: &mut impl Write,
) -> io::Result<()> {
    let bookmarked = nav.current_ref().is_some_and(|current| bookmarks.contains(current));
    if let Some(text) = render_step(nav, bookmarked, render) {
        writeln!(out, "\n{text}")?;
    }
    Ok(())
}

fn print_diagram(
    catalog: &Catalog,
    collapse: &[String],
    render: RenderOptions,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let mut view = DiagramView::new(Diagram::build(catalog));
    for raw in collapse {
        let key: DiagramKey = match raw.parse() {
            Ok(key) => key,
            Err(err) => {
                tracing::warn!(key = %raw, error = %err, "ignoring malformed collapse key");
                continue;
            }
        };
        if !view.diagram().contains(&key) {
            tracing::warn!(key = %key, "collapse key not in diagram");
        }
        view.toggle(key);
    }

    let visibility = view.visibility().clone();
    writeln!(out, "{}", render_outline(view.diagram(), &visibility, view.collapsed(), render))?;
    Ok(())
}

fn print_classification(node_id: &str, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{node_id}: {}", classify(node_id).label())?;
    for (idx, rule) in matching_rules(node_id).iter().enumerate() {
        let marker = if idx == 0 { "*" } else { " " };
        writeln!(out, "  {marker} {:?} -> {}", rule.matcher, rule.category)?;
    }
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "medflow".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let flags = load_feature_flags(options.flags.as_deref().map(Path::new));
        init_tracing(flags.features.enable_debug_mode);
        let render = RenderOptions::from(flags.ui);

        let stdout = io::stdout();
        let mut out = stdout.lock();

        match &options.command {
            Command::Schema => {
                let schema = schemars::schema_for!(Catalog);
                writeln!(out, "{}", serde_json::to_string_pretty(&schema)?)?;
            }
            Command::Classify { node_id } => print_classification(node_id, &mut out)?,
            Command::Protocols => print_protocols(&load_catalog(&options)?, &mut out)?,
            Command::Diagram => {
                print_diagram(&load_catalog(&options)?, &options.collapse, render, &mut out)?
            }
            Command::Bookmarks => {
                let catalog = load_catalog(&options)?;
                let bookmarks = open_bookmarks(&options);
                writeln!(out, "{}", render_bookmarks(&bookmarks.list(&catalog), render))?;
            }
            Command::Walk { protocol_id } => {
                let catalog = load_catalog(&options)?;
                let mut bookmarks = open_bookmarks(&options);
                let stdin = io::stdin();
                run_walk(&catalog, &mut bookmarks, protocol_id, render, stdin.lock(), &mut out)?;
            }
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("medflow: {err}");
        std::process::exit(1);
    }
}
