use chrono::NaiveDate;
use clap::Parser;
use env_logger::Env;
use remind_md::constants as C;
use remind_md::{Cli, Command, RemindError};

fn main() -> Result<(), RemindError> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let today = resolve_date(cli.date.as_deref())?;
    let file = cli.file.as_deref();

    match cli.command {
        Command::Generate {
            dry_run,
            best_effort,
            json,
        } => cmd::generate::run(file, today, dry_run, best_effort, json),
        Command::Offset {
            unit,
            period,
            anchor,
        } => cmd::offset::run(&unit, period, anchor.as_deref(), today),
        Command::Later { json } => cmd::later::run(file, json),
        Command::Show { days } => cmd::show::run(file, today, days),
        Command::List => cmd::list::run(file),
        Command::Add {
            tag,
            title,
            notes,
            delete_once,
            count,
        } => cmd::add::run(file, &tag, &title, &notes, delete_once, count),
        Command::Edit => cmd::edit::run(file),
    }
}

fn resolve_date(flag: Option<&str>) -> Result<NaiveDate, RemindError> {
    match flag {
        Some(raw) => NaiveDate::parse_from_str(raw, C::DATE_FORMAT)
            .map_err(|_| RemindError::InvalidDate(raw.to_string())),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

mod cmd {
    pub mod add;
    pub mod edit;
    pub mod generate;
    pub mod later;
    pub mod list;
    pub mod offset;
    pub mod show;
}
