//! Command table and handlers.
//!
//! Every handler has the same shape: it reads the [`Context`], may call the
//! host, and returns a [`Reply`] or a [`CommandError`] whose text becomes the
//! output line. Session state is only changed through [`Effect`].

use crate::config::TerminalConfig;
use crate::error::{CommandError, HostError};
use crate::host::Host;
use crate::render::{EntryKind, ListingEntry, Markup, Output};
use crate::vfs::{Inode, Vfs};
use std::collections::BTreeMap;
use tracing::{debug, warn};
use unicode_width::UnicodeWidthStr;

/// Desktop applications reachable from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum App {
    AboutNishant,
    Settings,
    SendMsg,
    Trash,
    Terminal,
}

impl App {
    pub fn command(self) -> &'static str {
        match self {
            App::AboutNishant => "about-nishant",
            App::Settings => "settings",
            App::SendMsg => "sendmsg",
            App::Trash => "trash",
            App::Terminal => "terminal",
        }
    }

    /// Identifier the desktop knows the app by.
    pub fn app_id(self) -> &'static str {
        match self {
            App::AboutNishant => "about-nishant",
            App::Settings => "settings",
            App::SendMsg => "gedit",
            App::Trash => "trash",
            App::Terminal => "terminal",
        }
    }

    fn opening(self) -> &'static str {
        match self {
            App::AboutNishant => "Opening About Nishant...",
            App::Settings => "Opening Settings...",
            App::SendMsg => "Opening Contact Form...",
            App::Trash => "Opening Trash...",
            App::Terminal => "Opening Terminal...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Whoami,
    Date,
    Uptime,
    Clear,
    Exit,
    Pwd,
    Cd,
    Ls,
    Cat,
    Echo,
    Mkdir,
    Sudo,
    Cowsay,
    Launch(App),
    Removed,
}

/// `(name, command, listed in help/completion)`
const COMMANDS: &[(&str, Command, bool)] = &[
    ("help", Command::Help, true),
    ("whoami", Command::Whoami, true),
    ("date", Command::Date, true),
    ("uptime", Command::Uptime, true),
    ("clear", Command::Clear, true),
    ("exit", Command::Exit, true),
    ("pwd", Command::Pwd, true),
    ("cd", Command::Cd, true),
    ("ls", Command::Ls, true),
    ("cat", Command::Cat, true),
    ("echo", Command::Echo, true),
    ("mkdir", Command::Mkdir, true),
    ("sudo", Command::Sudo, true),
    ("cowsay", Command::Cowsay, true),
    ("about-nishant", Command::Launch(App::AboutNishant), true),
    ("settings", Command::Launch(App::Settings), true),
    ("sendmsg", Command::Launch(App::SendMsg), true),
    ("trash", Command::Launch(App::Trash), false),
    ("terminal", Command::Launch(App::Terminal), false),
    ("todoist", Command::Removed, false),
];

/// Names offered by `help`, tab completion and the not-found message.
pub fn visible_names() -> impl Iterator<Item = &'static str> {
    COMMANDS
        .iter()
        .filter(|(_, _, visible)| *visible)
        .map(|(name, _, _)| *name)
}

pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Command>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        CommandRegistry {
            commands: COMMANDS.iter().map(|(name, cmd, _)| (*name, *cmd)).collect(),
        }
    }

    /// `name` must already be lower-cased.
    pub fn lookup(&self, name: &str) -> Option<Command> {
        self.commands.get(name).copied()
    }

    /// Visible commands starting with `partial`, ignoring case.
    pub fn complete(&self, partial: &str) -> Vec<&'static str> {
        let partial = partial.to_lowercase();
        visible_names().filter(|n| n.starts_with(&partial)).collect()
    }

    /// Run `name` and fold any error into a text reply.
    pub fn dispatch(&self, name: &str, args: &[String], ctx: &mut Context<'_>) -> Reply {
        let result = match self.lookup(name) {
            Some(cmd) => {
                debug!(command = name, args = args.len(), "dispatch");
                cmd.run(args, ctx)
            }
            None => Err(CommandError::NotFound(name.to_string())),
        };
        result.unwrap_or_else(|e| Reply::text(e.to_string()))
    }
}

/// Everything a handler may look at.
pub struct Context<'a> {
    pub vfs: &'a Vfs,
    pub cwd: &'a [String],
    /// Node at `cwd`
    pub dir: &'a Inode,
    pub config: &'a TerminalConfig,
    pub host: &'a mut dyn Host,
}

impl Context<'_> {
    fn dir_name(&self) -> &str {
        self.cwd.last().map(String::as_str).unwrap_or("root")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    ChangeDir(Vec<String>),
    ClearScreen,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub output: Option<Output>,
    pub effect: Effect,
}

impl Reply {
    pub fn empty() -> Self {
        Reply {
            output: None,
            effect: Effect::None,
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        Reply {
            output: (!s.is_empty()).then_some(Output::Text(s)),
            effect: Effect::None,
        }
    }

    pub fn markup(m: Markup) -> Self {
        Reply {
            output: Some(Output::Markup(m)),
            effect: Effect::None,
        }
    }

    pub fn effect(effect: Effect) -> Self {
        Reply {
            output: None,
            effect,
        }
    }
}

impl Command {
    pub fn run(self, args: &[String], ctx: &mut Context<'_>) -> Result<Reply, CommandError> {
        match self {
            Command::Help => Ok(Reply::text(HELP)),
            Command::Whoami => Ok(Reply::text(ctx.config.user.clone())),
            Command::Date => Ok(Reply::text(ctx.host.now())),
            Command::Uptime => Ok(Reply::text(format_uptime(ctx.host.uptime_secs()))),
            Command::Clear => Ok(Reply::effect(Effect::ClearScreen)),
            Command::Exit => {
                if let Err(e) = ctx.host.close_window() {
                    warn!("exit: {}", e);
                }
                Ok(Reply::effect(Effect::Close))
            }
            Command::Pwd => Ok(Reply::text(pwd(ctx))),
            Command::Cd => cd(args, ctx),
            Command::Ls => ls(args, ctx),
            Command::Cat => cat(args, ctx),
            Command::Echo => Ok(Reply::text(args.join(" "))),
            Command::Mkdir => mkdir(args, ctx),
            Command::Sudo => Ok(sudo(ctx)),
            Command::Cowsay => Ok(Reply::text(cowsay(&args.join(" ")))),
            Command::Launch(app) => launch(app, args, ctx),
            Command::Removed => Err(CommandError::Removed),
        }
    }
}

const HELP: &str = "Available Commands:
Navigation:  cd, ls, pwd, clear, exit
File ops:    cat, mkdir, echo
Apps:        about-nishant, settings, sendmsg
System:      help, whoami, date, uptime
Fun:         sudo, cowsay";

fn pwd(ctx: &Context<'_>) -> String {
    if ctx.cwd.is_empty() {
        ctx.config.home.clone()
    } else {
        format!("{}/{}", ctx.config.home, ctx.cwd.join("/"))
    }
}

fn cd(args: &[String], ctx: &Context<'_>) -> Result<Reply, CommandError> {
    if args.len() > 1 {
        return Err(CommandError::CdTooManyArguments);
    }
    let target = args.first().map(String::as_str).unwrap_or("");
    match target {
        "" | "~" | "~/" => Ok(Reply::effect(Effect::ChangeDir(Vec::new()))),
        "." | ".." | "../" => Err(CommandError::UpwardNavigation),
        t if t == ctx.config.restricted_dir => {
            Err(CommandError::PermissionDenied(ctx.dir_name().to_string()))
        }
        t => {
            let name = t.strip_suffix('/').filter(|n| !n.is_empty()).unwrap_or(t);
            if ctx.dir.child_dir(name).is_none() {
                return Err(CommandError::NoSuchDirectory(t.to_string()));
            }
            let mut path = ctx.cwd.to_vec();
            path.push(name.to_string());
            Ok(Reply::effect(Effect::ChangeDir(path)))
        }
    }
}

fn listing(dir: &Inode) -> Markup {
    let entries = dir
        .children()
        .into_iter()
        .flatten()
        .map(|(name, node)| ListingEntry {
            name: name.clone(),
            kind: if node.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            },
        })
        .collect();
    Markup::Listing(entries)
}

fn ls(args: &[String], ctx: &Context<'_>) -> Result<Reply, CommandError> {
    if args.len() > 1 {
        return Err(CommandError::TooManyArguments("ls"));
    }
    let Some(target) = args.first() else {
        return Ok(Reply::markup(listing(ctx.dir)));
    };
    let target = target.as_str();
    if target == ctx.config.restricted_dir {
        return Err(CommandError::Refused);
    }
    let name = target
        .strip_suffix('/')
        .filter(|n| !n.is_empty())
        .unwrap_or(target);
    let dir = match name {
        "." => Some(ctx.dir),
        "~" | "root" => Some(ctx.vfs.root()),
        _ => ctx.dir.child_dir(name).or_else(|| ctx.vfs.top_level(name)),
    };
    if let Some(dir) = dir {
        return Ok(Reply::markup(listing(dir)));
    }
    match ctx.dir.child(name) {
        Some(file) if !file.is_dir() => Ok(Reply::markup(Markup::Listing(vec![ListingEntry {
            name: name.to_string(),
            kind: EntryKind::File,
        }]))),
        _ => Err(CommandError::CannotAccess(target.to_string())),
    }
}

fn cat(args: &[String], ctx: &Context<'_>) -> Result<Reply, CommandError> {
    let [name] = args else {
        return Err(CommandError::ArgumentCount {
            command: "cat",
            expected: 1,
            got: args.len(),
        });
    };
    match ctx.dir.child(name) {
        Some(Inode::File { content }) => Ok(Reply::text(content.clone())),
        Some(Inode::Directory { .. }) => Err(CommandError::IsADirectory {
            command: "cat",
            name: name.clone(),
        }),
        None => Err(CommandError::NoSuchFile {
            command: "cat",
            name: name.clone(),
        }),
    }
}

fn mkdir(args: &[String], ctx: &mut Context<'_>) -> Result<Reply, CommandError> {
    let name = match args {
        [] => return Err(CommandError::MissingOperand("mkdir")),
        [name] => name,
        _ => return Err(CommandError::TooManyArguments("mkdir")),
    };
    match ctx.host.create_folder(name) {
        Ok(()) => Ok(Reply::empty()),
        Err(HostError::Unavailable) => Err(CommandError::FolderUnsupported),
        Err(e) => {
            warn!("mkdir {}: {}", name, e);
            Ok(Reply::empty())
        }
    }
}

fn sudo(ctx: &mut Context<'_>) -> Reply {
    if ctx.config.analytics {
        if let Err(e) = ctx.host.track_event("Sudo Access", "lol") {
            debug!("analytics event dropped: {}", e);
        }
    }
    Reply::markup(Markup::SudoImage {
        src: ctx.config.sudo_image.clone(),
    })
}

fn launch(app: App, args: &[String], ctx: &mut Context<'_>) -> Result<Reply, CommandError> {
    match args {
        [] => {}
        [dot] if dot == "." => {}
        _ => return Err(CommandError::NotFound(app.command().to_string())),
    }
    match ctx.host.open_application(app.app_id()) {
        Ok(()) => Ok(Reply::text(app.opening())),
        Err(HostError::Unavailable) => Err(CommandError::Unavailable(app.command())),
        Err(e) => {
            warn!("open {}: {}", app.app_id(), e);
            Ok(Reply::text(app.opening()))
        }
    }
}

fn format_uptime(secs: u64) -> String {
    format!(
        "up {}h {}m {}s",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

fn cowsay(message: &str) -> String {
    let message = if message.is_empty() {
        "Hello from Ubuntu Terminal!"
    } else {
        message
    };
    let width = message.width() + 2;
    format!(
        " {}\n< {} >\n {}\n        \\   ^__^\n         \\  (oo)\\_______\n            (__)\\       )\\/\\\n                ||----w |\n                ||     ||",
        "_".repeat(width),
        message,
        "-".repeat(width)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::RecordingHost;

    struct Fixture {
        vfs: Vfs,
        config: TerminalConfig,
        host: RecordingHost,
        registry: CommandRegistry,
    }

    impl Fixture {
        fn new() -> Self {
            Fixture {
                vfs: Vfs::portfolio(),
                config: TerminalConfig::default(),
                host: RecordingHost::default(),
                registry: CommandRegistry::new(),
            }
        }

        fn run(&mut self, cwd: &[&str], line: &str) -> Reply {
            let cwd: Vec<String> = cwd.iter().map(|s| s.to_string()).collect();
            let parsed = crate::parser::parse(line).unwrap();
            let dir = self.vfs.resolve(cwd.as_slice()).unwrap();
            let mut ctx = Context {
                vfs: &self.vfs,
                cwd: &cwd,
                dir,
                config: &self.config,
                host: &mut self.host,
            };
            self.registry.dispatch(&parsed.name, &parsed.args, &mut ctx)
        }

        fn text(&mut self, cwd: &[&str], line: &str) -> String {
            match self.run(cwd, line).output {
                Some(Output::Text(s)) => s,
                other => panic!("expected text, got {:?}", other),
            }
        }
    }

    fn names(reply: &Reply) -> Vec<String> {
        match &reply.output {
            Some(Output::Markup(Markup::Listing(entries))) => {
                entries.iter().map(|e| e.name.clone()).collect()
            }
            other => panic!("expected listing, got {:?}", other),
        }
    }

    #[test]
    fn test_cd_descends_and_resets() {
        let mut f = Fixture::new();
        assert_eq!(
            f.run(&[], "cd projects").effect,
            Effect::ChangeDir(vec!["projects".into()])
        );
        assert_eq!(f.run(&["projects"], "cd").effect, Effect::ChangeDir(vec![]));
        assert_eq!(f.run(&["projects"], "cd ~").effect, Effect::ChangeDir(vec![]));
        assert_eq!(
            f.run(&[], "cd skills/").effect,
            Effect::ChangeDir(vec!["skills".into()])
        );
    }

    #[test]
    fn test_cd_errors_keep_path() {
        let mut f = Fixture::new();
        for line in ["cd ..", "cd .", "cd ../"] {
            let reply = f.run(&["projects"], line);
            assert_eq!(reply.effect, Effect::None);
            assert_eq!(reply.output, Some(Output::text("Type 'cd' to go back 😅")));
        }
        assert_eq!(
            f.text(&[], "cd personal-documents"),
            "bash /root : Permission denied 😏"
        );
        assert_eq!(
            f.text(&["skills"], "cd personal-documents"),
            "bash /skills : Permission denied 😏"
        );
        assert_eq!(
            f.text(&[], "cd nowhere"),
            "bash: cd: nowhere: No such file or directory"
        );
        assert_eq!(
            f.text(&["contact"], "cd email.txt"),
            "bash: cd: email.txt: No such file or directory"
        );
        assert_eq!(f.text(&[], "cd a b"), "bash: cd: too many arguments");
    }

    #[test]
    fn test_ls_variants() {
        let mut f = Fixture::new();
        assert_eq!(names(&f.run(&[], "ls")).len(), 8);
        assert_eq!(
            names(&f.run(&[], "ls contact")),
            vec!["email.txt", "github.txt", "phone.txt"]
        );
        // top-level directories are reachable from anywhere
        assert_eq!(names(&f.run(&["skills"], "ls contact")).len(), 3);
        assert_eq!(names(&f.run(&["skills"], "ls ~")).len(), 8);
        assert_eq!(names(&f.run(&["contact"], "ls .")).len(), 3);
        assert_eq!(
            names(&f.run(&["contact"], "ls email.txt")),
            vec!["email.txt"]
        );
        assert_eq!(f.text(&[], "ls personal-documents"), "Nope! 🙃");
        assert_eq!(
            f.text(&[], "ls ghost"),
            "ls: cannot access 'ghost': No such file or directory"
        );
        assert_eq!(f.text(&[], "ls a b"), "ls: too many arguments");
    }

    #[test]
    fn test_ls_kinds() {
        let mut f = Fixture::new();
        let reply = f.run(&[], "ls");
        let Some(Output::Markup(Markup::Listing(entries))) = reply.output else {
            panic!("expected listing");
        };
        assert!(entries.iter().all(|e| e.kind == EntryKind::Directory));
        let reply = f.run(&["courses"], "ls");
        let Some(Output::Markup(Markup::Listing(entries))) = reply.output else {
            panic!("expected listing");
        };
        assert!(entries.iter().all(|e| e.kind == EntryKind::File));
    }

    #[test]
    fn test_pwd() {
        let mut f = Fixture::new();
        assert_eq!(f.text(&[], "pwd"), "/home/nishant");
        assert_eq!(f.text(&["projects"], "pwd"), "/home/nishant/projects");
    }

    #[test]
    fn test_cat_every_file() {
        let mut f = Fixture::new();
        let vfs = Vfs::portfolio();
        for (dir_name, dir) in vfs.root().children().unwrap() {
            for (name, node) in dir.children().unwrap() {
                let out = f.text(&[dir_name.as_str()], &format!("cat \"{}\"", name));
                assert_eq!(Some(out.as_str()), node.content());
            }
        }
    }

    #[test]
    fn test_cat_errors() {
        let mut f = Fixture::new();
        assert_eq!(
            f.text(&[], "cat email.txt"),
            "cat: email.txt: No such file or directory"
        );
        assert_eq!(f.text(&[], "cat projects"), "cat: projects: Is a directory");
        assert_eq!(f.text(&[], "cat"), "cat: expected 1 argument, got 0");
        assert_eq!(f.text(&[], "cat a b"), "cat: expected 1 argument, got 2");
    }

    #[test]
    fn test_echo_keeps_raw_text() {
        let mut f = Fixture::new();
        let reply = f.run(&[], r#"echo "<script>alert(1)</script>""#);
        let out = reply.output.unwrap();
        assert!(!out.is_markup());
        assert_eq!(out.to_html(), "&lt;script&gt;alert(1)&lt;/script&gt;");
        assert_eq!(f.text(&[], "echo a   b"), "a b");
        assert_eq!(f.run(&[], "echo").output, None);
    }

    #[test]
    fn test_mkdir_calls_host_once() {
        let mut f = Fixture::new();
        assert_eq!(f.text(&[], "mkdir"), "mkdir: missing operand");
        assert!(f.host.folders.is_empty());
        assert_eq!(f.text(&[], "mkdir a b"), "mkdir: too many arguments");
        assert!(f.host.folders.is_empty());
        assert_eq!(f.run(&[], "mkdir foo"), Reply::empty());
        assert_eq!(f.host.folders, vec!["foo"]);
    }

    #[test]
    fn test_mkdir_without_host_support() {
        let mut f = Fixture::new();
        f.host.no_folders = true;
        assert_eq!(f.text(&[], "mkdir foo"), "mkdir: operation not supported");
    }

    #[test]
    fn test_launchers() {
        let mut f = Fixture::new();
        assert_eq!(f.text(&[], "sendmsg"), "Opening Contact Form...");
        assert_eq!(f.text(&[], "settings ."), "Opening Settings...");
        assert_eq!(f.text(&[], "About-Nishant"), "Opening About Nishant...");
        f.run(&[], "trash");
        assert_eq!(f.host.opened, vec!["gedit", "settings", "about-nishant", "trash"]);

        let out = f.text(&[], "settings now");
        assert!(out.starts_with("Command 'settings' not found."));
        assert_eq!(f.host.opened.len(), 4);

        f.host.no_apps = true;
        assert_eq!(f.text(&[], "settings"), "settings: command not available");
    }

    #[test]
    fn test_removed_command() {
        let mut f = Fixture::new();
        assert!(f.text(&[], "todoist").starts_with("todoist: command removed."));
    }

    #[test]
    fn test_sudo_tracks_when_enabled() {
        let mut f = Fixture::new();
        let reply = f.run(&[], "sudo rm -rf /");
        assert!(matches!(
            reply.output,
            Some(Output::Markup(Markup::SudoImage { .. }))
        ));
        assert!(f.host.events.is_empty());

        f.config.analytics = true;
        f.run(&[], "sudo");
        assert_eq!(f.host.events, vec![("Sudo Access".into(), "lol".into())]);

        f.host.failing_tracker = true;
        assert!(f.run(&[], "sudo").output.unwrap().is_markup());
    }

    #[test]
    fn test_clear_and_exit_effects() {
        let mut f = Fixture::new();
        assert_eq!(f.run(&[], "clear").effect, Effect::ClearScreen);
        assert_eq!(f.run(&[], "exit").effect, Effect::Close);
        assert_eq!(f.host.closed, 1);
    }

    #[test]
    fn test_unknown_command() {
        let mut f = Fixture::new();
        let out = f.text(&[], "helpe");
        assert!(out.contains("'helpe' not found"));
        assert!(out.contains("help"));
    }

    #[test]
    fn test_info_commands() {
        let mut f = Fixture::new();
        assert_eq!(f.text(&[], "whoami"), "nishant");
        assert_eq!(f.text(&[], "date"), "Mon Oct 19 2026 12:00:00");
        f.host.uptime = 3723;
        assert_eq!(f.text(&[], "uptime"), "up 1h 2m 3s");
        assert!(f.text(&[], "help").contains("Navigation:  cd, ls, pwd, clear, exit"));
    }

    #[test]
    fn test_cowsay_bubble_width() {
        let out = cowsay("moo");
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], " _____");
        assert_eq!(lines[1], "< moo >");
        assert_eq!(lines[2], " -----");
        assert!(cowsay("").contains("< Hello from Ubuntu Terminal! >"));
    }

    #[test]
    fn test_complete_commands() {
        let registry = CommandRegistry::new();
        assert_eq!(registry.complete("c"), vec!["clear", "cd", "cat", "cowsay"]);
        assert_eq!(registry.complete("WHO"), vec!["whoami"]);
        assert!(registry.complete("tod").is_empty());
    }
}
