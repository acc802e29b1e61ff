use clap::{Parser, Subcommand};

/// remind-md - recurring reminders as bracketed tags in a plain-text file
///
/// # Quick Reference
///
/// ## Tag Grammar
///
/// ```text
/// [<selector>(%<period>)?(+<offset>)?]<modifier>? <title> [# comment]
/// note line(s) until a blank line or the next tag line
/// ```
///
/// Selectors:
/// - `sun`..`sat`: weekday, optionally `%n+o` scoped to epoch weeks
/// - `D05`: day of month (two digits, 01-31)
/// - `12-25`, `12/25`, `2026-12-25`: fixed dates
/// - `D%n+o`, `W%n+o`, `M%n+o`: every n epoch days / weeks / months
/// - `any`: never scheduled (the "for later" bucket)
///
/// Modifiers (after the closing bracket):
/// - `d`: delete the entry after it first fires
/// - `3`: fire three times, then delete
/// - `c`: the title is a shell command to run (combines: `c2`, `cd`)
///
/// ## Commands
///
/// ```bash
/// remind-md generate                  # Fire today's reminders, rewrite file
/// remind-md generate --dry-run        # Report without delivering or mutating
/// remind-md offset week 3             # Offset aligning [W%3+?] to today
/// remind-md offset day 5 2026-09-04   # ...or to an explicit anchor date
/// remind-md later                     # List the [any] bucket
/// remind-md show --days 14            # Preview the next two weeks
/// remind-md list                      # Print file with line numbers
/// remind-md add "[thu]" "Take out trash"
/// remind-md edit                      # Open the file in $EDITOR
/// ```
///
/// ## Global Options
///
/// ```bash
/// remind-md --file ~/notes/remind.md generate
/// remind-md --date 2026-09-01 generate --dry-run
/// ```
///
/// ## Environment Variables
///
/// - `REMIND_MD_FILE`: reminder document path (default: ~/.remind-md/remind.md)
/// - `EDITOR`: editor for the edit command
#[derive(Parser, Debug)]
#[command(name = "remind-md")]
#[command(version = "0.1.0")]
#[command(about = "Recurring reminders as bracketed tags in a plain-text file")]
pub struct Cli {
    /// Reminder document path (default: ~/.remind-md/remind.md or $REMIND_MD_FILE)
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<String>,

    /// Evaluate against this date instead of today (YYYY-MM-DD)
    #[arg(long, global = true, value_name = "DATE")]
    pub date: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate today's reminders, deliver them, and rewrite the file
    #[command(alias = "g")]
    Generate {
        /// Report what would fire without delivering or mutating
        #[arg(long)]
        dry_run: bool,

        /// Commit deletions and decrements even when delivery fails
        #[arg(long)]
        best_effort: bool,

        /// Output fired and skipped entries as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Compute the offset that aligns an every-n rule to a date
    #[command(alias = "o")]
    Offset {
        /// Epoch unit: day, week, or month
        unit: String,

        /// The n in "every n units"
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        period: i64,

        /// Anchor date as YYYY-MM-DD (defaults to today)
        anchor: Option<String>,
    },

    /// List entries filed under [any] for later
    Later {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Preview reminders firing over the coming days
    Show {
        /// Number of days to preview, starting today
        #[arg(short, long, default_value = "7")]
        days: u32,
    },

    /// Print the document with line numbers and parse diagnostics
    #[command(alias = "ls")]
    List,

    /// Append a new entry after validating its tag
    Add {
        /// The bracketed tag, e.g. "[W%3+1]" (brackets optional)
        tag: String,

        /// Reminder title
        title: String,

        /// Note line for the body (repeatable)
        #[arg(short, long)]
        notes: Vec<String>,

        /// Delete the entry after it first fires
        #[arg(short, long, conflicts_with = "count")]
        delete_once: bool,

        /// Fire this many times, then delete
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
        count: Option<u32>,
    },

    /// Open the reminder document in $EDITOR
    #[command(alias = "e")]
    Edit,
}
