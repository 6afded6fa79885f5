#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Write,
    Reload,
    Export,
    NewClass(Option<String>),
    Theme(String),
    Help,
    Error(String),
}

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();

    let Some(command_text) = trimmed.strip_prefix(':') else {
        return Command::Error("Commands must start with ':'".to_string());
    };

    let parts: Vec<&str> = command_text.split_whitespace().collect();

    if parts.is_empty() {
        return Command::Error("Empty command".to_string());
    }

    match parts[0] {
        "q" | "quit" => Command::Quit,
        "w" | "write" => Command::Write,
        "e" | "reload" => Command::Reload,
        "export" => Command::Export,
        "help" => Command::Help,
        "new" => {
            if parts.len() < 2 {
                Command::NewClass(None)
            } else {
                Command::NewClass(Some(parts[1..].join(" ")))
            }
        }
        "theme" => {
            if parts.len() < 2 {
                Command::Error("theme requires a theme name".to_string())
            } else {
                Command::Theme(parts[1].to_string())
            }
        }
        _ => Command::Error(format!("Unknown command: {}", parts[0])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_command() {
        assert_eq!(parse_command(":q"), Command::Quit);
        assert_eq!(parse_command(":quit"), Command::Quit);
    }

    #[test]
    fn parse_write_command() {
        assert_eq!(parse_command(":w"), Command::Write);
        assert_eq!(parse_command(":write"), Command::Write);
    }

    #[test]
    fn parse_reload_command() {
        assert_eq!(parse_command(":e"), Command::Reload);
        assert_eq!(parse_command(":reload"), Command::Reload);
    }

    #[test]
    fn parse_export_command() {
        assert_eq!(parse_command(":export"), Command::Export);
    }

    #[test]
    fn parse_new_class_with_subject() {
        let cmd = parse_command(":new Research Methods (Sem 1)");
        assert_eq!(cmd, Command::NewClass(Some("Research Methods (Sem 1)".to_string())));
    }

    #[test]
    fn parse_new_without_subject() {
        assert_eq!(parse_command(":new"), Command::NewClass(None));
    }

    #[test]
    fn parse_theme_command() {
        assert_eq!(parse_command(":theme nord"), Command::Theme("nord".to_string()));
    }

    #[test]
    fn parse_theme_without_name_returns_error() {
        assert!(matches!(parse_command(":theme"), Command::Error(_)));
    }

    #[test]
    fn parse_help_command() {
        assert_eq!(parse_command(":help"), Command::Help);
    }

    #[test]
    fn parse_unknown_command_returns_error() {
        assert_eq!(parse_command(":goto"), Command::Error("Unknown command: goto".to_string()));
    }

    #[test]
    fn parse_command_without_colon_returns_error() {
        assert!(matches!(parse_command("quit"), Command::Error(_)));
    }

    #[test]
    fn parse_empty_command_returns_error() {
        assert!(matches!(parse_command(":"), Command::Error(_)));
    }
}
