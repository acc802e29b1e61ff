use chrono::NaiveDate;
use remind_md::constants as C;
use remind_md::epoch::{solve_offset, Unit};
use remind_md::error::{RemindError, RemindResult};

pub fn run(
    unit_raw: &str,
    period: i64,
    anchor_flag: Option<&str>,
    today: NaiveDate,
) -> RemindResult<()> {
    let unit: Unit = unit_raw.parse().map_err(RemindError::Usage)?;
    let anchor = match anchor_flag {
        Some(raw) => NaiveDate::parse_from_str(raw, C::DATE_FORMAT)
            .map_err(|_| RemindError::InvalidDate(raw.to_string()))?,
        None => today,
    };

    let offset = solve_offset(unit, anchor, period);
    println!("{}", offset);
    println!(
        "Add '[{}%{}+{}] <title>' to your reminder file to fire on {}.",
        unit.selector(),
        period,
        offset,
        anchor
    );
    if period == 1 {
        println!(
            "Note: anything % 1 is 0, i.e. 'every single {}'; no offset is needed.",
            unit
        );
    } else if offset == 0 {
        println!("Note: the offset is 0, so the tag can be written without '+0'.");
    }
    Ok(())
}
