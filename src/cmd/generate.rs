use chrono::NaiveDate;
use remind_md::deliver::ConsoleSink;
use remind_md::engine::{run_pass, PassOptions};
use remind_md::error::RemindResult;
use remind_md::store::ReminderFile;

pub fn run(
    file: Option<&str>,
    today: NaiveDate,
    dry_run: bool,
    best_effort: bool,
    json: bool,
) -> RemindResult<()> {
    let store = ReminderFile::resolve(file)?;
    let text = store.load()?;

    let mut sink = ConsoleSink;
    let outcome = run_pass(
        &mut sink,
        &text,
        today,
        PassOptions {
            dry_run,
            best_effort,
        },
    );

    if json {
        let payload = serde_json::json!({
            "date": today.to_string(),
            "dry_run": dry_run,
            "fired": outcome.fired,
            "skipped": outcome.skipped,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        if dry_run {
            for fired in &outcome.fired {
                println!("would send: {}", fired.title);
            }
        }
        if outcome.fired.is_empty() {
            println!("No reminders for {}", today);
        }
        for skipped in &outcome.skipped {
            eprintln!(
                "warning: line {}: {} ({})",
                skipped.line_no, skipped.raw, skipped.error
            );
        }
    }

    if outcome.changed && !dry_run {
        store.save(&outcome.text)?;
    }
    Ok(())
}
