//! Where player input comes from.
//!
//! Commands and combat actions are both read through [`LineInput`].
//! [`InputManager`] is the terminal source: a rustyline editor with history and
//! tab completion, or bare stdin when there is no TTY. [`ScriptedInput`] feeds
//! canned lines to tests.

use std::collections::VecDeque;
use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use log::{info, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

/// One read from the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    /// Ctrl-D or a closed pipe.
    Eof,
    /// Ctrl-C at the prompt.
    Interrupted,
}

/// Source of player input lines.
pub trait LineInput {
    /// Show `prompt` and wait for the next line.
    ///
    /// # Errors
    /// Returns an error if the underlying reader fails.
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent>;
}

lazy_static! {
    /// Everything tab completion can offer, sorted.
    static ref COMPLETIONS: Vec<&'static str> = {
        let mut words = vec![
            "attack", "drop", "exit", "get", "go east", "go north", "go south", "go west", "help", "inventory",
            "load", "load autosave", "look", "move", "quit", "run", "save", "saves", "status", "take", "use",
        ];
        words.sort_unstable();
        words
    };
}

/// Completion candidates for the text typed so far.
fn complete_words(typed: &str) -> Vec<Pair> {
    let wanted = typed.to_lowercase();
    if wanted.is_empty() {
        return Vec::new();
    }
    COMPLETIONS
        .iter()
        .filter(|word| word.starts_with(wanted.as_str()))
        .map(|word| Pair {
            display: (*word).to_string(),
            replacement: (*word).to_string(),
        })
        .collect()
}

/// Start offset and text of the line up to the cursor, without leading blanks.
fn typed_so_far(line: &str, cursor: usize) -> (usize, &str) {
    let head = &line[..cursor];
    let text = head.trim_start();
    (cursor - text.len(), text)
}

struct CaveCompleter;

impl Completer for CaveCompleter {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, typed) = typed_so_far(line, pos);
        Ok((start, complete_words(typed)))
    }
}

impl Hinter for CaveCompleter {
    type Hint = String;
}
impl Highlighter for CaveCompleter {}
impl Validator for CaveCompleter {}
impl Helper for CaveCompleter {}

/// Rustyline editor plus the file its history is kept in.
struct Terminal {
    editor: Editor<CaveCompleter, DefaultHistory>,
    history: Option<PathBuf>,
}

impl Terminal {
    fn open() -> Result<Self, ReadlineError> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(CaveCompleter));
        let history = history_file();
        if let Some(path) = &history {
            restore_history(&mut editor, path);
        }
        Ok(Self { editor, history })
    }

    fn read(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                self.remember(&line);
                Ok(InputEvent::Line(line))
            },
            Err(ReadlineError::Interrupted) => Ok(InputEvent::Interrupted),
            Err(ReadlineError::Eof) => Ok(InputEvent::Eof),
            Err(err) => Err(into_io(err)),
        }
    }

    fn remember(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        if let Err(err) = self.editor.add_history_entry(line) {
            warn!("could not add history entry: {err}");
        }
        if let Some(path) = &self.history
            && let Err(err) = self.editor.save_history(path)
        {
            warn!("could not write history to {}: {err}", path.display());
        }
    }
}

fn restore_history(editor: &mut Editor<CaveCompleter, DefaultHistory>, path: &Path) {
    if let Some(dir) = path.parent()
        && let Err(err) = fs::create_dir_all(dir)
    {
        warn!("could not create {}: {err}", dir.display());
        return;
    }
    match editor.load_history(path) {
        Ok(()) => info!("loaded command history from {}", path.display()),
        Err(ReadlineError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
            info!("no command history at {} yet", path.display());
        },
        Err(err) => warn!("could not read history from {}: {err}", path.display()),
    }
}

fn into_io(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(io_err) => io_err,
        other => io::Error::other(other),
    }
}

fn history_file() -> Option<PathBuf> {
    dirs::data_dir().or_else(dirs::data_local_dir).map(|base| history_under(&base))
}

fn history_under(base: &Path) -> PathBuf {
    base.join("cavequest").join("history.txt")
}

/// Read one line from stdin with the trailing newline removed.
fn read_stdin_line(prompt: &str) -> io::Result<InputEvent> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(InputEvent::Eof);
    }
    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(InputEvent::Line(line))
}

/// Terminal input for the game binary.
///
/// Uses rustyline when stdin is a TTY. If the editor cannot be opened, or fails
/// mid-game, reading continues from bare stdin.
pub struct InputManager {
    terminal: Option<Box<Terminal>>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        if !io::stdin().is_terminal() {
            info!("stdin is not a terminal; reading plain lines");
            return Self { terminal: None };
        }
        match Terminal::open() {
            Ok(terminal) => Self {
                terminal: Some(Box::new(terminal)),
            },
            Err(err) => {
                warn!("line editor unavailable ({err}); reading plain lines");
                Self { terminal: None }
            },
        }
    }
}

impl LineInput for InputManager {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        let Some(terminal) = self.terminal.as_mut() else {
            return read_stdin_line(prompt);
        };
        terminal.read(prompt).or_else(|err| {
            warn!("line editor failed: {err}; switching to plain lines");
            self.terminal = None;
            read_stdin_line(prompt)
        })
    }
}

/// Replays a fixed list of lines, then reports end of input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    /// Every prompt shown so far, in order.
    pub prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineInput for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front().map_or(InputEvent::Eof, InputEvent::Line))
    }
}
