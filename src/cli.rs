use std::{
    env,
    io::{self, Write},
    path::PathBuf,
    process::{Command, Stdio},
};

use class_timetable::{
    app::AppState,
    export::{self, ExportOptions},
    storage::config::{Config, StoreBackend},
    sync::sync_engine::SyncEngine,
    timetable::Timetable,
    ui::{theme::Theme, week_layout},
};

use crate::tui::ui;

pub const USAGE: &str = "Usage: class-timetable [--local] [--print | --export [DIR]]";

#[derive(Debug, Clone, PartialEq)]
pub enum CliMode {
    Interactive { local: bool },
    Print { local: bool },
    Export { local: bool, dir: Option<PathBuf> },
}

pub fn parse_cli_mode() -> Result<CliMode, String> {
    parse_args(env::args().skip(1))
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<CliMode, String> {
    let mut local = false;
    let mut print = false;
    let mut export: Option<Option<PathBuf>> = None;
    let mut args = args.peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--local" => {
                local = true;
            }
            "--print" => {
                print = true;
            }
            "--export" => {
                let dir = args.next_if(|next| !next.starts_with("--")).map(PathBuf::from);
                export = Some(dir);
            }
            "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    match (print, export) {
        (true, Some(_)) => Err("--print and --export cannot be combined".to_string()),
        (true, None) => Ok(CliMode::Print { local }),
        (false, Some(dir)) => Ok(CliMode::Export { local, dir }),
        (false, None) => Ok(CliMode::Interactive { local }),
    }
}

fn open_sync_engine(local: bool) -> Result<(Config, SyncEngine), io::Error> {
    let config = Config::load_or_create()
        .map_err(|e| io::Error::other(e.to_string()))?;
    let backend = if local { StoreBackend::Local } else { config.store.backend };
    let sync_engine = SyncEngine::from_config(&config, backend)
        .map_err(|e| io::Error::other(e.to_string()))?;
    Ok((config, sync_engine))
}

pub async fn run_print_mode(local: bool) -> Result<(), io::Error> {
    let (_, sync_engine) = open_sync_engine(local)?;

    let timetable = match sync_engine.load().await {
        Ok(timetable) => timetable,
        Err(e) => {
            eprintln!("Failed to load timetable: {}", e);
            Timetable::new()
        }
    };

    display_with_pager(&format_week_text(&timetable))
}

pub async fn run_export_mode(local: bool, dir: Option<PathBuf>) -> Result<(), io::Error> {
    let (config, sync_engine) = open_sync_engine(local)?;
    let mut options = ExportOptions::from_config(&config.export)
        .map_err(|e| io::Error::other(e.to_string()))?;
    if let Some(dir) = dir {
        options = options.with_output_dir(dir);
    }

    let timetable = sync_engine.load().await
        .map_err(|e| io::Error::other(e.to_string()))?;

    let mut app = AppState::new().with_theme(Theme::get_by_name(&config.ui.theme));
    app.timetable = timetable;

    match export::export_timetable(&mut app, &options, ui) {
        Ok(path) => {
            println!("Saved {}", path.display());
            Ok(())
        }
        Err(e) => Err(io::Error::other(e.to_string())),
    }
}

fn format_week_text(timetable: &Timetable) -> String {
    let layout = week_layout::layout_for(timetable, None);
    let mut lines = vec!["Class Timetable".to_string(), String::new()];

    for column in &layout.days {
        lines.push(column.day.name().to_string());
        if let Some(placeholder) = column.placeholder {
            lines.push(format!("  {}", placeholder));
        }
        for card in &column.entries {
            let mut line = format!("  {:<20} {}", card.time_range, card.name);
            if let Some(room) = &card.room_label {
                line.push_str(&format!(" ({})", room));
            }
            lines.push(line);
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let cmd = match parts.next() {
        Some(c) => c,
        None => {
            print!("{text}");
            return Ok(());
        }
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd)
        .args(&args)
        .stdin(Stdio::piped())
        .spawn()
    {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            print!("{text}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use class_timetable::timetable::{ClassEntry, Weekday};

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn no_arguments_start_interactive_session() {
        assert_eq!(parse_args(args(&[])), Ok(CliMode::Interactive { local: false }));
    }

    #[test]
    fn local_flag_combines_with_print() {
        assert_eq!(parse_args(args(&["--local", "--print"])), Ok(CliMode::Print { local: true }));
    }

    #[test]
    fn export_takes_optional_directory() {
        assert_eq!(
            parse_args(args(&["--export", "/tmp/out"])),
            Ok(CliMode::Export { local: false, dir: Some(PathBuf::from("/tmp/out")) })
        );
        assert_eq!(
            parse_args(args(&["--export", "--local"])),
            Ok(CliMode::Export { local: true, dir: None })
        );
    }

    #[test]
    fn unknown_argument_is_rejected() {
        assert!(parse_args(args(&["--agenda"])).is_err());
    }

    #[test]
    fn print_and_export_are_exclusive() {
        assert!(parse_args(args(&["--print", "--export"])).is_err());
    }

    #[test]
    fn week_text_lists_days_in_order() {
        let mut timetable = Timetable::new();
        timetable.add(ClassEntry {
            name: "Biology".to_string(),
            room: Some("Prof. Shad".to_string()),
            day: Weekday::Monday,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        });

        let text = format_week_text(&timetable);

        assert!(text.contains("9:00 AM - 10:00 AM   Biology (Professor: Prof. Shad)"));
        assert_eq!(text.matches("No classes scheduled").count(), 4);
        let monday = text.find("Monday").unwrap();
        let friday = text.find("Friday").unwrap();
        assert!(monday < friday);
    }
}
