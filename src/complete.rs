use crate::commands::CommandRegistry;
use crate::vfs::Inode;

/// Commands whose arguments complete against the current directory.
const PATH_COMMANDS: &[&str] = &["cd", "ls", "cat"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    NoMatch,
    /// The single match, already spliced into the line
    Line(String),
    /// Several matches; nothing is filled in
    Candidates(Vec<String>),
}

/// Complete the last word of `input`.
pub fn complete(input: &str, registry: &CommandRegistry, dir: &Inode) -> Completion {
    let words: Vec<&str> = input.split(' ').collect();
    let last = words.last().copied().unwrap_or("");

    let first_word = words.len() == 1;
    let candidates: Vec<String> = if first_word {
        registry
            .complete(last)
            .into_iter()
            .map(String::from)
            .collect()
    } else if PATH_COMMANDS.contains(&words[0].to_lowercase().as_str()) {
        let partial = last.to_lowercase();
        dir.children()
            .into_iter()
            .flat_map(|c| c.keys())
            .filter(|name| name.to_lowercase().starts_with(&partial))
            .cloned()
            .collect()
    } else {
        Vec::new()
    };

    match candidates.len() {
        0 => Completion::NoMatch,
        1 => {
            let mut line = words[..words.len() - 1].join(" ");
            if !first_word {
                line.push(' ');
            }
            line.push_str(&candidates[0]);
            if first_word {
                line.push(' ');
            }
            Completion::Line(line)
        }
        _ => Completion::Candidates(candidates),
    }
}
