use remind_md::error::RemindResult;
use remind_md::store::ReminderFile;
use remind_md::tag::parse_tag_line;

pub fn run(
    file: Option<&str>,
    tag: &str,
    title: &str,
    notes: &[String],
    delete_once: bool,
    count: Option<u32>,
) -> RemindResult<()> {
    let inner = tag
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .to_string();
    let token = match count {
        Some(n) => n.to_string(),
        None if delete_once => "d".to_string(),
        None => String::new(),
    };
    let line = format!("[{}]{} {}", inner, token, title);

    // reject a bad tag before it lands in the file
    let parsed = parse_tag_line(&line)?;

    let store = ReminderFile::resolve(file)?;
    let mut text = store.load()?;
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text.push_str(&line);
    text.push('\n');
    for note in notes {
        text.push_str(note);
        text.push('\n');
    }
    store.save(&text)?;

    println!("Scheduled \"{}\" ({})", parsed.title, store.path().display());
    Ok(())
}
