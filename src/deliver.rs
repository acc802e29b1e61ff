//! Delivery seam: the core hands matched reminders to a sink and never
//! learns the transport. The email/ticket layers supply their own sink;
//! this module ships a console sink for terminal use and a recording
//! sink for tests.

use std::process::Command;

use log::{debug, info};

use crate::error::RemindError;

/// Where fired reminders go. `is_command` is set for `]c` entries,
/// whose title is a shell command rather than a message.
pub trait DeliverySink {
    fn deliver(&mut self, title: &str, notes: &str, is_command: bool) -> Result<(), RemindError>;
}

/// Prints reminders to stdout; executes command entries through
/// `sh -c` and reports a nonzero exit as a delivery failure.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl DeliverySink for ConsoleSink {
    fn deliver(&mut self, title: &str, notes: &str, is_command: bool) -> Result<(), RemindError> {
        if is_command {
            debug!("running command: {}", title);
            let output = Command::new("sh")
                .arg("-c")
                .arg(title)
                .output()
                .map_err(|e| RemindError::Delivery {
                    title: title.to_string(),
                    reason: e.to_string(),
                })?;
            if !output.status.success() {
                return Err(RemindError::Delivery {
                    title: title.to_string(),
                    reason: format!("command exited with {}", output.status),
                });
            }
            let stdout = String::from_utf8_lossy(&output.stdout);
            if !stdout.trim().is_empty() {
                print!("{}", stdout);
            }
            info!("command succeeded: {}", title);
        } else {
            println!("Reminder - {}", title);
            if !notes.is_empty() {
                println!("{}", notes);
            }
            info!("delivered: {}", title);
        }
        Ok(())
    }
}

/// Test double: records every call and optionally fails titles on a
/// deny-list.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub delivered: Vec<(String, String, bool)>,
    pub fail_titles: Vec<String>,
}

impl DeliverySink for RecordingSink {
    fn deliver(&mut self, title: &str, notes: &str, is_command: bool) -> Result<(), RemindError> {
        if self.fail_titles.iter().any(|t| t == title) {
            return Err(RemindError::Delivery {
                title: title.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        self.delivered
            .push((title.to_string(), notes.to_string(), is_command));
        Ok(())
    }
}
