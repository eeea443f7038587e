//! Slash-command parsing (`/name@bot args`).

/// A parsed bot command. `name` is lower-cased and has no leading `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: String,
}

impl Command {
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Parses `text` as a command.
///
/// Returns `None` when the text does not start with `/`, the name is empty, or the command is
/// addressed to another bot (`/start@other_bot`). A `@bot` suffix is only checked when
/// `bot_username` is known.
pub fn parse_command(text: &str, bot_username: Option<&str>) -> Option<Command> {
    let text = text.trim();
    let rest = text.strip_prefix('/')?;

    let (head, args) = match rest.find(char::is_whitespace) {
        Some(idx) => (&rest[..idx], rest[idx..].trim()),
        None => (rest, ""),
    };

    let (name, target) = match head.split_once('@') {
        Some((name, target)) => (name, Some(target)),
        None => (head, None),
    };

    if name.is_empty() {
        return None;
    }

    if let (Some(target), Some(me)) = (target, bot_username) {
        if !target.eq_ignore_ascii_case(me.trim_start_matches('@')) {
            return None;
        }
    }

    Some(Command {
        name: name.to_lowercase(),
        args: args.to_string(),
    })
}
