pub mod cli;
pub mod constants;
pub mod deliver;
pub mod document;
pub mod engine;
pub mod epoch;
pub mod error;
pub mod evaluate;
pub mod mutate;
pub mod store;
pub mod tag;

pub use cli::{Cli, Command};
pub use deliver::{ConsoleSink, DeliverySink, RecordingSink};
pub use document::{Block, Document, Entry, InvalidEntry};
pub use engine::{run_pass, FiredReminder, PassOptions, PassOutcome};
pub use epoch::{epoch_days, epoch_months, epoch_weeks, solve_offset, Unit};
pub use error::{RemindError, RemindResult, TagError};
pub use store::ReminderFile;
pub use tag::{parse_tag_line, Disposition, Modifier, ParsedTag, RecurrenceRule};

/// Default reminder document path in the user's home directory
pub fn default_remind_path() -> Option<std::path::PathBuf> {
    dirs::home_dir().map(|p| {
        p.join(constants::DEFAULT_DIR)
            .join(constants::DEFAULT_FILENAME)
    })
}
