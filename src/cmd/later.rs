use remind_md::document::Document;
use remind_md::error::RemindResult;
use remind_md::evaluate::later_entries;
use remind_md::store::ReminderFile;

pub fn run(file: Option<&str>, json: bool) -> RemindResult<()> {
    let store = ReminderFile::resolve(file)?;
    let text = store.load()?;
    let doc = Document::parse(&text);
    let later = later_entries(&doc);

    if json {
        let payload: Vec<serde_json::Value> = later
            .iter()
            .map(|entry| {
                serde_json::json!({
                    "line_no": entry.line_no,
                    "title": entry.title,
                    "notes": entry.notes_text(),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "[]".to_string())
        );
        return Ok(());
    }

    if later.is_empty() {
        println!("No reminders filed for later.");
        return Ok(());
    }
    println!("Reminders for later:");
    for entry in later {
        println!("- {}", entry.title);
        for note in &entry.notes {
            println!("    {}", note);
        }
    }
    Ok(())
}
