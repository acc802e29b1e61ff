use std::process::Command;

use remind_md::constants as C;
use remind_md::error::RemindResult;
use remind_md::store::ReminderFile;

pub fn run(file: Option<&str>) -> RemindResult<()> {
    let store = ReminderFile::resolve(file)?;
    let editor =
        std::env::var(C::EDITOR_ENV_VAR).unwrap_or_else(|_| C::DEFAULT_EDITOR.to_string());
    let status = Command::new(&editor).arg(store.path()).status()?;
    if !status.success() {
        eprintln!("{} exited with {}", editor, status);
    }
    Ok(())
}
