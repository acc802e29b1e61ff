//! One evaluation pass over the reminder document.
//!
//! parse -> evaluate -> deliver -> mutate -> serialize, all against a
//! single "today" value. Delivery happens before mutation: an entry
//! whose delivery fails is left intact so a one-time reminder is not
//! lost to a transient failure (best-effort mode opts out of that).
//! Dry-run stops after evaluation and touches neither the sink nor the
//! document.

use chrono::NaiveDate;
use log::{info, warn};
use serde::Serialize;

use crate::deliver::DeliverySink;
use crate::document::{Block, Document, InvalidEntry};
use crate::evaluate::evaluate;
use crate::mutate::mutate;

/// Knobs for one pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassOptions {
    /// Evaluate only; skip delivery and mutation.
    pub dry_run: bool,
    /// Commit deletions/decrements even when delivery fails.
    pub best_effort: bool,
}

/// One matched entry and what happened to it.
#[derive(Debug, Clone, Serialize)]
pub struct FiredReminder {
    pub line_no: usize,
    pub title: String,
    pub notes: String,
    pub is_command: bool,
    pub delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of one pass.
#[derive(Debug)]
pub struct PassOutcome {
    /// Document text after mutation (the input text when nothing
    /// changed or in dry-run).
    pub text: String,
    pub changed: bool,
    pub fired: Vec<FiredReminder>,
    /// Tag lines that failed to parse; they stay in the document.
    pub skipped: Vec<InvalidEntry>,
}

/// Run one pass against `text`, delivering through `sink`.
pub fn run_pass(
    sink: &mut dyn DeliverySink,
    text: &str,
    today: NaiveDate,
    options: PassOptions,
) -> PassOutcome {
    let doc = Document::parse(text);
    for inv in &doc.invalid {
        warn!("skipping line {}: {} ({})", inv.line_no, inv.raw, inv.error);
    }

    let matched = evaluate(&doc, today);
    info!(
        "{} of {} entries match {}",
        matched.len(),
        doc.entries().count(),
        today
    );

    let mut fired = Vec::new();
    let mut committed = Vec::new();

    for &index in &matched {
        let entry = match &doc.blocks[index] {
            Block::Entry(entry) => entry,
            Block::Raw(_) => continue,
        };
        let is_command = entry.modifier.run_as_command;

        if options.dry_run {
            fired.push(FiredReminder {
                line_no: entry.line_no,
                title: entry.title.clone(),
                notes: entry.notes_text(),
                is_command,
                delivered: false,
                error: None,
            });
            continue;
        }

        match sink.deliver(&entry.title, &entry.notes_text(), is_command) {
            Ok(()) => {
                info!("fired: {}", entry.title);
                committed.push(index);
                fired.push(FiredReminder {
                    line_no: entry.line_no,
                    title: entry.title.clone(),
                    notes: entry.notes_text(),
                    is_command,
                    delivered: true,
                    error: None,
                });
            }
            Err(err) => {
                warn!("delivery failed for '{}': {}", entry.title, err);
                if options.best_effort {
                    committed.push(index);
                }
                fired.push(FiredReminder {
                    line_no: entry.line_no,
                    title: entry.title.clone(),
                    notes: entry.notes_text(),
                    is_command,
                    delivered: false,
                    error: Some(err.to_string()),
                });
            }
        }
    }

    if options.dry_run {
        return PassOutcome {
            text: text.to_string(),
            changed: false,
            fired,
            skipped: doc.invalid.clone(),
        };
    }

    let skipped = doc.invalid.clone();
    let new_text = mutate(&doc, &committed).serialize();
    let changed = new_text != text;
    if changed {
        info!("document rewritten after {} fired entries", committed.len());
    }

    PassOutcome {
        text: new_text,
        changed,
        fired,
        skipped,
    }
}
