//! Command-line front end: load a structure, select residues, print the
//! candidate list and the interactions among the selection.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use proxima::contact::ContactMap;
use proxima::filter::CandidateList;
use proxima::interaction::InteractionSet;
use proxima::options::AnalysisOptions;
use proxima::render::InteractionRenderer;
use proxima::residue::{ResidueDataset, ResidueKey};
use proxima::session::{Announcement, AnalysisSession, SessionObserver};
use serde::Serialize;
use web_time::Instant;

#[derive(Parser)]
#[command(
    name = "proxima",
    about = "Residue contact and side-chain interaction analysis"
)]
struct Args {
    /// PDB or mmCIF file.
    file: PathBuf,
    /// Residue to select: a key (`A:45`) or free text (`ARG A45`, `A45`).
    #[arg(short, long = "select", value_name = "RESIDUE")]
    select: Vec<String>,
    /// Proximity threshold in Angstroms (clamped to 1-5).
    #[arg(short, long)]
    threshold: Option<f32>,
    /// Disable proximity filtering of the candidate list.
    #[arg(long)]
    no_filter: bool,
    /// TOML options file.
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,
    /// Emit a JSON report instead of text.
    #[arg(long)]
    json: bool,
}

/// Collects announcements for the report.
#[derive(Default)]
struct Transcript {
    lines: Vec<String>,
}

impl InteractionRenderer for Transcript {}

impl SessionObserver for Transcript {
    fn announce(&mut self, announcement: &Announcement) {
        self.lines.push(announcement.to_string());
    }
}

#[derive(Serialize)]
struct Report<'a> {
    file: String,
    residues: usize,
    contacts: usize,
    threshold: f32,
    filter_enabled: bool,
    selected: Vec<ResidueKey>,
    candidates: &'a CandidateList,
    interactions: Option<&'a InteractionSet>,
    announcements: &'a [String],
}

fn resolve(dataset: &ResidueDataset, query: &str) -> Option<ResidueKey> {
    if let Some(key) =
        ResidueKey::parse(query).filter(|k| dataset.id_of(k).is_some())
    {
        return Some(key);
    }
    let id = dataset.find(query)?;
    dataset.get(id).map(|r| r.key.clone())
}

fn write_text(
    out: &mut impl Write,
    report: &Report<'_>,
    dataset: &ResidueDataset,
) -> io::Result<()> {
    writeln!(
        out,
        "{}: {} residues, {} contacts",
        report.file, report.residues, report.contacts
    )?;
    writeln!(
        out,
        "threshold {} Å, filter {}",
        report.threshold,
        if report.filter_enabled { "on" } else { "off" }
    )?;

    writeln!(out, "\ncandidates:")?;
    for (i, c) in report.candidates.items.iter().enumerate() {
        if let Some(divider) = &report.candidates.divider {
            if divider.index == i {
                writeln!(out, "  {}", divider.label)?;
            }
        }
        let mark = match (c.selected, c.disabled) {
            (true, _) => "[x]",
            (false, true) => "[-]",
            (false, false) => "[ ]",
        };
        let note = if c.has_interaction {
            "  (interaction)"
        } else if c.in_proximity {
            "  (in proximity)"
        } else {
            ""
        };
        writeln!(out, "  {mark} {}{note}", c.label)?;
    }

    if let Some(set) = report.interactions {
        writeln!(out, "\ninteractions among {} residues:", set.residues.len())?;
        for r in &set.records {
            writeln!(
                out,
                "  {:<18} {}  {:.2} Å",
                r.kind.label(),
                r.description,
                r.distance
            )?;
        }
        let involved: Vec<&str> =
            set.residues.iter().map(|&id| dataset.label(id)).collect();
        writeln!(out, "  residues: {}", involved.join(", "))?;
    }

    if !report.announcements.is_empty() {
        writeln!(out)?;
        for line in report.announcements {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    )
    .init();
    let args = Args::parse();

    let options = match &args.options {
        Some(path) => AnalysisOptions::load(path)
            .with_context(|| format!("reading options {}", path.display()))?,
        None => AnalysisOptions::default(),
    };
    let mut session =
        AnalysisSession::with_observer(options, Transcript::default());
    let _ = session
        .load_path(&args.file)
        .with_context(|| format!("loading {}", args.file.display()))?;

    if args.no_filter {
        session.set_filter_enabled(false);
    }
    if let Some(threshold) = args.threshold {
        let _ = session.set_threshold(threshold, Instant::now());
        let _ = session.flush_threshold();
    }

    for query in &args.select {
        let key = match session.dataset() {
            Some(dataset) => resolve(dataset, query),
            None => bail!("no structure loaded"),
        };
        match key {
            Some(key) => {
                let _ = session.select(&key);
            }
            None => log::warn!("no residue matches {query:?}"),
        }
    }
    let _ = session.analyze();

    let candidates = session.candidates();
    let Some(dataset) = session.dataset() else {
        bail!("no structure loaded");
    };
    let report = Report {
        file: args.file.display().to_string(),
        residues: dataset.len(),
        contacts: session.contacts().map_or(0, ContactMap::contact_count),
        threshold: session.filter().threshold(),
        filter_enabled: session.selection().filter_enabled(),
        selected: session
            .selection()
            .ids()
            .into_iter()
            .filter_map(|id| dataset.get(id).map(|r| r.key.clone()))
            .collect(),
        candidates: &candidates,
        interactions: session.last_analysis(),
        announcements: &session.observer().lines,
    };

    let mut out = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        write_text(&mut out, &report, dataset)?;
    }
    Ok(())
}
