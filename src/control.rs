use std::path::PathBuf;

/// Entries of the indicator's dropdown menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    Quit,
    About,
    Help,
}

/// Commands accepted on the control socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Menu(MenuAction),
    /// Open or close the dropdown.
    ToggleMenu,
}

pub const COMMANDS: &[(&str, &str)] = &[
    ("quit", "disable login launch and quit"),
    ("about", "toggle the version line in the menu"),
    ("help", "open the help page"),
    ("menu", "open/close the dropdown menu"),
];

impl ControlCommand {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "quit" => Some(ControlCommand::Menu(MenuAction::Quit)),
            "about" => Some(ControlCommand::Menu(MenuAction::About)),
            "help" => Some(ControlCommand::Menu(MenuAction::Help)),
            "menu" => Some(ControlCommand::ToggleMenu),
            _ => None,
        }
    }
}

pub fn socket_path() -> PathBuf {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(runtime_dir).join("loadviz.sock")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_commands() {
        assert_eq!(
            ControlCommand::parse("quit"),
            Some(ControlCommand::Menu(MenuAction::Quit))
        );
        assert_eq!(
            ControlCommand::parse(" about\n"),
            Some(ControlCommand::Menu(MenuAction::About))
        );
        assert_eq!(
            ControlCommand::parse("help"),
            Some(ControlCommand::Menu(MenuAction::Help))
        );
        assert_eq!(ControlCommand::parse("menu"), Some(ControlCommand::ToggleMenu));
    }

    #[test]
    fn unknown_commands() {
        assert_eq!(ControlCommand::parse(""), None);
        assert_eq!(ControlCommand::parse("QUIT"), None);
        assert_eq!(ControlCommand::parse("toggle"), None);
    }

    #[test]
    fn every_listed_command_parses() {
        for (name, _) in COMMANDS {
            assert!(ControlCommand::parse(name).is_some(), "{name}");
        }
    }
}
