//! Mutation engine: the post-fire effect of a modifier on its entry.
//!
//! Counters are decremented as an explicit state transition
//! (`Counter(n)` → `Counter(n-1)` → removed), and the rewritten tag
//! line changes only the modifier token so everything else on the line
//! survives verbatim.

use crate::document::{Block, Document, Entry};
use crate::tag::{Disposition, Modifier};

/// What happens to one matched entry after delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationResult {
    Unchanged,
    Rewritten(Entry),
    Removed,
}

/// The post-fire effect of `entry`'s modifier.
pub fn apply_post_match(entry: &Entry) -> MutationResult {
    match entry.modifier.disposition {
        Disposition::Recurring => MutationResult::Unchanged,
        Disposition::DeleteOnce | Disposition::Counter(1) => MutationResult::Removed,
        Disposition::Counter(n) => MutationResult::Rewritten(decrement(entry, n - 1)),
    }
}

/// Rebuild the entry with its counter at `n`, splicing the new count
/// into the raw tag line in place of the old digits.
fn decrement(entry: &Entry, n: u32) -> Entry {
    let modifier = Modifier {
        run_as_command: entry.modifier.run_as_command,
        disposition: Disposition::Counter(n),
    };

    let tag_line = match entry.tag_line.find(']') {
        Some(close) => {
            let after = close + 1;
            let token_len = entry.tag_line[after..]
                .find(|c: char| c.is_whitespace())
                .unwrap_or(entry.tag_line.len() - after);
            let token = &entry.tag_line[after..after + token_len];
            match token.find(|c: char| c.is_ascii_digit()) {
                Some(start) => {
                    let digits_end = token[start..]
                        .find(|c: char| !c.is_ascii_digit())
                        .map_or(token.len(), |e| start + e);
                    format!(
                        "{}{}{}{}",
                        &entry.tag_line[..after + start],
                        n,
                        &token[digits_end..],
                        &entry.tag_line[after + token_len..]
                    )
                }
                None => entry.tag_line.clone(),
            }
        }
        None => entry.tag_line.clone(),
    };

    Entry {
        modifier,
        tag_line,
        ..entry.clone()
    }
}

/// Apply post-match effects for the matched block indices, returning
/// the updated document. Entries are independent: each is rewritten or
/// removed on its own, and the relative order of everything else is
/// preserved.
pub fn mutate(doc: &Document, matched: &[usize]) -> Document {
    let mut out = doc.clone();
    let mut indices: Vec<usize> = matched.to_vec();
    indices.sort_unstable();

    // walk back-to-front so removals don't shift pending indices
    for &index in indices.iter().rev() {
        let entry = match out.blocks.get(index) {
            Some(Block::Entry(entry)) => entry.clone(),
            _ => continue,
        };
        match apply_post_match(&entry) {
            MutationResult::Unchanged => {}
            MutationResult::Rewritten(new_entry) => {
                out.blocks[index] = Block::Entry(new_entry);
            }
            MutationResult::Removed => out.remove_block(index),
        }
    }
    out
}
