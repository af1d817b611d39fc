/// Split a command line into tokens.
///
/// Single and double quotes group whitespace and are stripped. Inside one kind
/// of quote the other kind is literal. An unterminated quote runs to the end
/// of the line. Tokens are trimmed and blank ones dropped, so `""` and `"  "`
/// contribute nothing.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == ' ' || c == '\t' => push_token(&mut tokens, &mut current),
            None => current.push(c),
        }
    }
    push_token(&mut tokens, &mut current);
    tokens
}

fn push_token(tokens: &mut Vec<String>, current: &mut String) {
    let token = current.trim();
    if !token.is_empty() {
        tokens.push(token.to_string());
    }
    current.clear();
}

/// A parsed line: lower-cased command name plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub name: String,
    pub args: Vec<String>,
}

/// `None` for blank input, which callers treat as a no-op.
pub fn parse(line: &str) -> Option<CommandLine> {
    let mut tokens = tokenize(line).into_iter();
    let name = tokens.next()?.to_lowercase();
    Some(CommandLine {
        name,
        args: tokens.collect(),
    })
}
