use crate::commands::{CommandRegistry, Context, Effect};
use crate::complete::{complete, Completion};
use crate::config::TerminalConfig;
use crate::error::ConfigError;
use crate::history::CommandHistory;
use crate::host::Host;
use crate::input::InputLine;
use crate::parser;
use crate::render::{escape_html, prompt_html, Output};
use crate::vfs::{Inode, Vfs};
use serde::Serialize;
use tracing::{debug, info};

/// One block of scrollback: the prompt line and what it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub input: String,
    pub output: Option<Output>,
    /// Prompt path at submission; later `cd`s do not rewrite it
    pub path: String,
    pub kind: ScrollbackKind,
}

/// What produced a scrollback entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollbackKind {
    /// A submitted command line
    Command,
    /// Tab-completion candidates; never committed to history
    Completion,
}

impl HistoryEntry {
    pub fn is_markup(&self) -> bool {
        self.output.as_ref().is_some_and(Output::is_markup)
    }
}

/// Serialized shape handed to JavaScript renderers.
#[derive(Serialize)]
struct EntryView<'a> {
    input: &'a str,
    path: &'a str,
    kind: ScrollbackKind,
    is_markup: bool,
    html: String,
    text: String,
}

/// Key presses the terminal reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Up,
    Down,
    Tab,
    /// Ctrl+C: drop the current line
    Cancel,
    /// Ctrl+L: clear the screen
    ClearScreen,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str, ctrl: bool) -> Option<Key> {
        match (key, ctrl) {
            ("c", true) | ("C", true) => Some(Key::Cancel),
            ("l", true) | ("L", true) => Some(Key::ClearScreen),
            (_, true) => None,
            ("Enter", _) => Some(Key::Enter),
            ("Backspace", _) => Some(Key::Backspace),
            ("Delete", _) => Some(Key::Delete),
            ("ArrowLeft", _) => Some(Key::Left),
            ("ArrowRight", _) => Some(Key::Right),
            ("ArrowUp", _) => Some(Key::Up),
            ("ArrowDown", _) => Some(Key::Down),
            ("Home", _) => Some(Key::Home),
            ("End", _) => Some(Key::End),
            ("Tab", _) => Some(Key::Tab),
            (k, _) => {
                let mut chars = k.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

/// One terminal window's state. Nothing here is shared between windows.
pub struct TerminalSession<H: Host> {
    config: TerminalConfig,
    vfs: Vfs,
    registry: CommandRegistry,
    host: H,
    cwd: Vec<String>,
    scrollback: Vec<HistoryEntry>,
    history: CommandHistory,
    input: InputLine,
    closed: bool,
}

impl<H: Host> TerminalSession<H> {
    pub fn new(config: TerminalConfig, host: H) -> Result<Self, ConfigError> {
        let vfs = config.build_vfs()?;
        info!(user = %config.user, "terminal session started");
        Ok(TerminalSession {
            config,
            vfs,
            registry: CommandRegistry::new(),
            host,
            cwd: Vec::new(),
            scrollback: Vec::new(),
            history: CommandHistory::new(),
            input: InputLine::new(),
            closed: false,
        })
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn cwd(&self) -> &[String] {
        &self.cwd
    }

    /// `~`, `~/projects`, ...
    pub fn path_display(&self) -> String {
        if self.cwd.is_empty() {
            "~".to_string()
        } else {
            format!("~/{}", self.cwd.join("/"))
        }
    }

    pub fn prompt(&self) -> String {
        format!(
            "{}@{}:{}$ ",
            self.config.user,
            self.config.hostname,
            self.path_display()
        )
    }

    pub fn scrollback(&self) -> &[HistoryEntry] {
        &self.scrollback
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn input(&self) -> &InputLine {
        &self.input
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn current_dir(&self) -> &Inode {
        self.vfs.resolve(self.cwd.as_slice()).unwrap_or(self.vfs.root())
    }

    /// Replace the input line, as typing into the field does.
    pub fn set_input(&mut self, text: &str) {
        self.input.set(text);
        self.history.reset_cursor();
    }

    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Char(c) => {
                self.input.insert_char(c);
                self.history.reset_cursor();
            }
            Key::Backspace => {
                self.input.backspace();
                self.history.reset_cursor();
            }
            Key::Delete => {
                self.input.delete();
                self.history.reset_cursor();
            }
            Key::Left => self.input.left(),
            Key::Right => self.input.right(),
            Key::Home => self.input.home(),
            Key::End => self.input.end(),
            Key::Up => {
                if let Some(line) = self.history.older() {
                    self.input.set(line);
                }
            }
            Key::Down => {
                if let Some(line) = self.history.newer() {
                    self.input.set(line);
                }
            }
            Key::Tab => self.complete(),
            Key::Enter => self.submit(),
            Key::Cancel => {
                self.input.clear();
                self.history.reset_cursor();
            }
            Key::ClearScreen => self.scrollback.clear(),
        }
    }

    /// Submit the current input line.
    pub fn submit(&mut self) {
        if self.input.is_blank() {
            return;
        }
        let line = self.input.take();
        self.history.push(&line);
        self.execute(&line);
    }

    /// Run `line` as if typed and submitted.
    pub fn run(&mut self, line: &str) {
        self.set_input(line);
        self.submit();
    }

    fn execute(&mut self, line: &str) {
        let Some(parsed) = parser::parse(line) else {
            return;
        };
        let path = self.path_display();
        debug!(command = %parsed.name, path = %path, "execute");

        let dir = self.vfs.resolve(self.cwd.as_slice()).unwrap_or(self.vfs.root());
        let mut ctx = Context {
            vfs: &self.vfs,
            cwd: &self.cwd,
            dir,
            config: &self.config,
            host: &mut self.host,
        };
        let reply = self.registry.dispatch(&parsed.name, &parsed.args, &mut ctx);

        match reply.effect {
            Effect::ClearScreen => {
                self.scrollback.clear();
                return;
            }
            Effect::Close => {
                self.closed = true;
                return;
            }
            Effect::ChangeDir(cwd) => self.cwd = cwd,
            Effect::None => {}
        }
        self.scrollback.push(HistoryEntry {
            input: line.trim().to_string(),
            output: reply.output,
            path,
            kind: ScrollbackKind::Command,
        });
    }

    /// Tab: fill in a unique match or list the candidates.
    pub fn complete(&mut self) {
        let result = complete(self.input.as_str(), &self.registry, self.current_dir());
        match result {
            Completion::NoMatch => {}
            Completion::Line(line) => self.set_input(&line),
            Completion::Candidates(names) => {
                self.scrollback.push(HistoryEntry {
                    input: self.input.as_str().to_string(),
                    output: Some(Output::Text(names.join("  "))),
                    path: self.path_display(),
                    kind: ScrollbackKind::Completion,
                });
            }
        }
    }

    /// Scrollback (or the welcome banner while it is empty) as HTML.
    pub fn render_html(&self) -> String {
        if self.scrollback.is_empty() {
            let mut html = String::from(r#"<div class="mb-4 text-ubt-warm-grey">"#);
            for line in &self.config.welcome {
                html.push_str(&format!("<div>{}</div>", escape_html(line)));
            }
            html.push_str("</div>");
            return html;
        }
        let mut html = String::new();
        for entry in &self.scrollback {
            html.push_str(r#"<div class="mb-2"><div class="flex items-center">"#);
            html.push_str(&prompt_html(
                &self.config.user,
                &self.config.hostname,
                &entry.path,
            ));
            html.push_str(&format!(
                r#"<span class="text-ubt-grey">{}</span></div>"#,
                escape_html(&entry.input)
            ));
            match &entry.output {
                Some(out) if out.is_markup() => html.push_str(&format!(
                    r#"<div class="mt-1 ml-4 text-ubt-grey"><div>{}</div></div>"#,
                    out.to_html()
                )),
                Some(out) => html.push_str(&format!(
                    r#"<div class="mt-1 ml-4 text-ubt-grey"><pre class="whitespace-pre-wrap font-ubuntu-mono text-sm">{}</pre></div>"#,
                    out.to_html()
                )),
                None => {}
            }
            html.push_str("</div>");
        }
        html
    }

    pub fn scrollback_json(&self) -> String {
        let views: Vec<EntryView<'_>> = self
            .scrollback
            .iter()
            .map(|e| EntryView {
                input: &e.input,
                path: &e.path,
                kind: e.kind,
                is_markup: e.is_markup(),
                html: e.output.as_ref().map(Output::to_html).unwrap_or_default(),
                text: e.output.as_ref().map(Output::to_plain).unwrap_or_default(),
            })
            .collect();
        serde_json::to_string(&views).unwrap_or_else(|_| "[]".to_string())
    }
}
