use crate::controller::Control;

/// One line of interactive input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Set { control: Control, value: String },
    Clear,
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let set = |control: Control| -> Result<Option<Command>, String> {
        Ok(Some(Command::Set {
            control,
            value: rest.to_string(),
        }))
    };
    match word.to_lowercase().as_str() {
        "search" | "s" | "/" => set(Control::Search),
        "type" | "t" => set(Control::TypeFilter),
        "sort" | "o" => set(Control::Sort),
        "clear" | "reset" => Ok(Some(Command::Clear)),
        "show" | "render" => Ok(Some(Command::Show)),
        "help" | "?" => Ok(Some(Command::Help)),
        "quit" | "exit" | "q" => Ok(Some(Command::Quit)),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

pub fn help_text() -> &'static str {
    "commands:\n  search <text>   filter by name (empty clears)\n  type <label>    filter by type (empty clears)\n  sort <order>    name-asc, name-desc, level-asc, level-desc (empty: catalog order)\n  clear           reset all three controls\n  show            re-render without changing anything\n  quit            leave\n"
}
