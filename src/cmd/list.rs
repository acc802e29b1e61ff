use remind_md::document::Document;
use remind_md::error::RemindResult;
use remind_md::store::ReminderFile;

pub fn run(file: Option<&str>) -> RemindResult<()> {
    let store = ReminderFile::resolve(file)?;
    let text = store.load()?;
    if text.is_empty() {
        println!("{} is empty.", store.path().display());
        return Ok(());
    }

    for (i, line) in text.lines().enumerate() {
        println!("{:>4}  {}", i + 1, line);
    }

    let doc = Document::parse(&text);
    for invalid in &doc.invalid {
        eprintln!("warning: line {}: {}", invalid.line_no, invalid.error);
    }
    Ok(())
}
