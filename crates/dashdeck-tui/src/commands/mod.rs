// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::app::AppState;
use dashdeck_core::{metrics::Timeframe, prefs::{Tab, ThemeMode}};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Quit, unless settings have unsaved changes
    Quit,
    // Quit and discard unsaved settings
    Exit,
    Help,
    Theme(ThemeMode),
    Tab(Tab),
    Timeframe(Timeframe),
    // Push a notification with this title
    Notify(String),
    ReadAll,
    // Remove every notification
    Clear,
    // Persist the settings screen
    Save,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "q!" | "quit!" => Ok(Command::Exit),
            "help" => Ok(Command::Help),
            "readall" => Ok(Command::ReadAll),
            "clear" => Ok(Command::Clear),
            "w" | "save" => Ok(Command::Save),
            "theme" => rest
                .parse()
                .map(Command::Theme)
                .map_err(|_| "usage: theme <light|dark|system>".to_string()),
            "tab" => rest.parse().map(Command::Tab).map_err(|_| {
                "usage: tab <dashboard|users|products|notifications|settings>".to_string()
            }),
            "tf" | "timeframe" => rest
                .parse()
                .map(Command::Timeframe)
                .map_err(|_| "usage: timeframe <weekly|monthly|quarterly|yearly>".to_string()),
            "notify" => {
                if rest.is_empty() {
                    Err("usage: notify <title>".to_string())
                } else {
                    Ok(Command::Notify(rest.to_string()))
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => s.request_quit(false),
        Command::Exit => s.request_quit(true),
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(mode) => s.set_theme(mode),
        Command::Tab(tab) => s.select_tab(tab),
        Command::Timeframe(tf) => {
            s.timeframe = tf;
        }
        Command::Notify(title) => {
            s.notify(title, "Created from the command line");
        }
        Command::ReadAll => s.mark_all_read(),
        Command::Clear => s.clear_notifications(),
        Command::Save => s.save_settings(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("q", Command::Quit)]
    #[case("quit!", Command::Exit)]
    #[case("  help  ", Command::Help)]
    #[case("theme dark", Command::Theme(ThemeMode::Dark))]
    #[case("theme SYSTEM", Command::Theme(ThemeMode::System))]
    #[case("tab products", Command::Tab(Tab::Products))]
    #[case("timeframe weekly", Command::Timeframe(Timeframe::Weekly))]
    #[case("tf quarterly", Command::Timeframe(Timeframe::Quarterly))]
    #[case("notify Disk almost full", Command::Notify("Disk almost full".into()))]
    #[case("readall", Command::ReadAll)]
    #[case("clear", Command::Clear)]
    #[case("save", Command::Save)]
    fn parses(#[case] input: &str, #[case] expected: Command) {
        assert_eq!(Command::parse(input), Ok(expected));
    }

    #[test]
    fn empty_input_is_the_close_sentinel() {
        assert_eq!(Command::parse("   "), Err(String::new()));
    }

    #[rstest]
    #[case("theme", "usage: theme")]
    #[case("theme solarized", "usage: theme")]
    #[case("tab finances", "usage: tab")]
    #[case("timeframe daily", "usage: timeframe")]
    #[case("notify", "usage: notify")]
    #[case("frobnicate", "unknown command: frobnicate")]
    fn rejects_with_a_message(#[case] input: &str, #[case] prefix: &str) {
        let err = Command::parse(input).unwrap_err();
        assert!(err.starts_with(prefix), "{err:?}");
    }
}
