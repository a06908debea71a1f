use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use applica_cli::report::FillRun;
use applica_fill::{FIELD_MATCHERS, FillOptions, HtmlDocument, inspect_candidates};
use chrono::Utc;
use comfy_table::{Cell, Table};
use serde_json::Value;
use tracing::{info, info_span};

use crate::cli::{FillArgs, InspectArgs};
use crate::summary::{apply_table_style, dim_cell, kind_cell};

pub fn run_fill(args: &FillArgs) -> Result<FillRun> {
    let span = info_span!("fill", page = %args.page.display());
    let _guard = span.enter();

    let html = read_page(&args.page)?;
    let raw = fs::read_to_string(&args.profile)
        .with_context(|| format!("read profile {}", args.profile.display()))?;
    let profile: Value = serde_json::from_str(&raw)
        .with_context(|| format!("parse profile {}", args.profile.display()))?;

    let options = FillOptions {
        enrich_names: !args.no_split_names,
    };
    let run = FillRun::execute(&args.page, &html, &profile, options);

    if let Some(path) = &args.output {
        let record = run.record(Utc::now());
        let json = serde_json::to_string_pretty(&record).context("serialize fill report")?;
        fs::write(path, json).with_context(|| format!("write report {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }
    Ok(run)
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let html = read_page(&args.page)?;
    let document = HtmlDocument::parse(&html);
    let candidates = inspect_candidates(&document);

    let mut table = Table::new();
    table.set_header(vec!["Element", "Kind", "Name", "Id", "Label", "Signature"]);
    apply_table_style(&mut table);
    for candidate in &candidates {
        table.add_row(vec![
            Cell::new(candidate.element),
            kind_cell(candidate.kind),
            optional_cell(candidate.name.as_deref()),
            optional_cell(candidate.id.as_deref()),
            optional_cell(Some(candidate.label_text.trim())),
            Cell::new(&candidate.signature),
        ]);
    }
    println!("{table}");
    println!("{} candidate control(s)", candidates.len());
    Ok(())
}

pub fn run_matchers() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Aliases"]);
    apply_table_style(&mut table);
    for (field, aliases) in FIELD_MATCHERS {
        table.add_row(vec![Cell::new(field), Cell::new(aliases.join(", "))]);
    }
    println!("{table}");
    Ok(())
}

fn read_page(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read page {}", path.display()))
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(text) if !text.is_empty() => Cell::new(text),
        _ => dim_cell("-"),
    }
}
