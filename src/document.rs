//! Document model: an ordered sequence of reminder entries and raw
//! lines, parsed from and serialized back to the source text.
//!
//! The raw text of every line is kept verbatim so that serializing an
//! untouched document reproduces the input byte-for-byte. Tag lines
//! that fail to parse stay in the document as raw lines and are
//! reported through [`Document::invalid`].

use serde::Serialize;

use crate::error::TagError;
use crate::tag::{self, Modifier, RecurrenceRule};

/// One reminder entry: the tag line plus its trailing note lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub rule: RecurrenceRule,
    pub modifier: Modifier,
    pub title: String,
    /// The tag line exactly as it appeared in the source.
    pub tag_line: String,
    /// Verbatim note lines, up to the next blank line or tag line.
    pub notes: Vec<String>,
    /// 1-based line number of the tag line in the source.
    pub line_no: usize,
}

impl Entry {
    pub fn notes_text(&self) -> String {
        self.notes.join("\n")
    }
}

/// A document block: either a parsed entry or a line left as-is
/// (comments, blank separators, invalid tag lines).
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Entry(Entry),
    Raw(String),
}

/// A tag line that could not be parsed; surfaced to the caller but
/// kept verbatim in the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidEntry {
    pub line_no: usize,
    pub raw: String,
    #[serde(serialize_with = "serialize_error")]
    pub error: TagError,
}

fn serialize_error<S: serde::Serializer>(e: &TagError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(e)
}

/// The parsed reminder document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub blocks: Vec<Block>,
    pub invalid: Vec<InvalidEntry>,
    trailing_newline: bool,
}

impl Document {
    /// Parse source text. Never fails: lines that are not valid entries
    /// stay raw, and bad tag lines are additionally reported in
    /// `invalid`.
    pub fn parse(text: &str) -> Document {
        let lines: Vec<&str> = text.lines().collect();
        let mut blocks = Vec::new();
        let mut invalid = Vec::new();

        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];
            if line.starts_with('[') {
                match tag::parse_tag_line(line) {
                    Ok(parsed) => {
                        let mut notes = Vec::new();
                        let mut j = i + 1;
                        while j < lines.len()
                            && !lines[j].trim().is_empty()
                            && !lines[j].starts_with('[')
                        {
                            notes.push(lines[j].to_string());
                            j += 1;
                        }
                        blocks.push(Block::Entry(Entry {
                            rule: parsed.rule,
                            modifier: parsed.modifier,
                            title: parsed.title,
                            tag_line: line.to_string(),
                            notes,
                            line_no: i + 1,
                        }));
                        i = j;
                        continue;
                    }
                    Err(error) => {
                        invalid.push(InvalidEntry {
                            line_no: i + 1,
                            raw: line.to_string(),
                            error,
                        });
                        blocks.push(Block::Raw(line.to_string()));
                    }
                }
            } else {
                blocks.push(Block::Raw(line.to_string()));
            }
            i += 1;
        }

        Document {
            blocks,
            invalid,
            trailing_newline: text.ends_with('\n'),
        }
    }

    /// Serialize back to text. With no mutations applied this is the
    /// exact input.
    pub fn serialize(&self) -> String {
        let mut lines: Vec<&str> = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Entry(entry) => {
                    lines.push(&entry.tag_line);
                    for note in &entry.notes {
                        lines.push(note);
                    }
                }
                Block::Raw(raw) => lines.push(raw),
            }
        }
        let mut out = lines.join("\n");
        if self.trailing_newline && !lines.is_empty() {
            out.push('\n');
        }
        out
    }

    /// All parsed entries with their block indices, in document order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &Entry)> {
        self.blocks.iter().enumerate().filter_map(|(i, b)| match b {
            Block::Entry(e) => Some((i, e)),
            Block::Raw(_) => None,
        })
    }

    /// Remove the block at `index`; if a blank separator line follows,
    /// it is consumed too so remaining entries keep their spacing.
    pub(crate) fn remove_block(&mut self, index: usize) {
        self.blocks.remove(index);
        if let Some(Block::Raw(next)) = self.blocks.get(index) {
            if next.trim().is_empty() {
                self.blocks.remove(index);
            }
        }
    }
}
