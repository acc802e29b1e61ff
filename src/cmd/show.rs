use chrono::{Duration, NaiveDate};
use remind_md::document::{Block, Document};
use remind_md::error::RemindResult;
use remind_md::evaluate::evaluate;
use remind_md::store::ReminderFile;

pub fn run(file: Option<&str>, today: NaiveDate, days: u32) -> RemindResult<()> {
    let store = ReminderFile::resolve(file)?;
    let text = store.load()?;
    let doc = Document::parse(&text);

    let mut any = false;
    for i in 0..i64::from(days) {
        let day = today + Duration::days(i);
        let matched = evaluate(&doc, day);
        if matched.is_empty() {
            continue;
        }
        any = true;
        println!("{} ({}):", day, day.format("%a"));
        for index in matched {
            if let Block::Entry(entry) = &doc.blocks[index] {
                println!("  {}", entry.title);
            }
        }
    }
    if !any {
        println!("Nothing scheduled in the next {} days.", days);
    }
    Ok(())
}
