//! Console front-ends for the shell: line sources, mode selection, and the
//! reedline editor with Befunge syntax highlighting.

use std::borrow::Cow;
use std::env;
use std::io::{self, BufRead, IsTerminal, Write};

use nu_ansi_term::Style;
use reedline::{
    FileBackedHistory, Highlighter, HistoryItem, Prompt, PromptEditMode, PromptHistorySearch,
    PromptHistorySearchStatus, Reedline, Signal, StyledText,
};

use crate::shell::LineSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplMode {
    Bare,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeFlagOverride {
    None,
    Bare,
    Editor,
}

/// Determine the front-end: flags override the `BEFSH_MODE` environment
/// variable, which overrides TTY auto-detection.
pub fn select_mode(flag: ModeFlagOverride) -> Result<ReplMode, String> {
    match flag {
        ModeFlagOverride::Bare => return Ok(ReplMode::Bare),
        ModeFlagOverride::Editor => {
            if !io::stdin().is_terminal() {
                return Err(
                    "cannot start editor: stdin is not a TTY (use --bare or BEFSH_MODE=bare)"
                        .to_string(),
                );
            }
            return Ok(ReplMode::Editor);
        }
        ModeFlagOverride::None => {}
    }

    if let Ok(val) = env::var("BEFSH_MODE") {
        let v = val.trim().to_ascii_lowercase();
        return match v.as_str() {
            "bare" => Ok(ReplMode::Bare),
            "editor" => {
                if !io::stdin().is_terminal() {
                    return Err(
                        "cannot start editor: stdin is not a TTY (use BEFSH_MODE=bare)".to_string(),
                    );
                }
                Ok(ReplMode::Editor)
            }
            _ => Err(format!(
                "invalid BEFSH_MODE value: {val}, must be 'bare' or 'editor'"
            )),
        };
    }

    if io::stdin().is_terminal() {
        Ok(ReplMode::Editor)
    } else {
        Ok(ReplMode::Bare)
    }
}

/// Plain line-at-a-time source over a buffered reader. The top-level prompt
/// is only rendered when connected to a terminal so piped sessions stay
/// clean; sub-prompt text is written by the shell itself.
pub struct BareLineSource<R> {
    reader: R,
    interactive: bool,
}

impl BareLineSource<io::BufReader<io::Stdin>> {
    pub fn stdin() -> Self {
        let interactive = io::stdin().is_terminal();
        Self {
            reader: io::BufReader::new(io::stdin()),
            interactive,
        }
    }
}

impl<R: BufRead> BareLineSource<R> {
    pub fn new(reader: R, interactive: bool) -> Self {
        Self {
            reader,
            interactive,
        }
    }

    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        match self.reader.read_line(&mut line)? {
            0 => Ok(None),
            _ => {
                while line.ends_with(['\n', '\r']) {
                    line.pop();
                }
                Ok(Some(line))
            }
        }
    }
}

impl<R: BufRead> LineSource for BareLineSource<R> {
    fn read_command(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if self.interactive {
            let mut out = io::stdout();
            write!(out, "{prompt}")?;
            out.flush()?;
        }
        self.next_line()
    }

    fn read_reply(&mut self) -> io::Result<Option<String>> {
        self.next_line()
    }
}

/// Interactive source backed by a reedline editor with history and
/// highlighting. Ctrl+C and Ctrl+D both read as end of input; the SIGINT
/// handler installed in main handles the hard exit.
pub struct EditorLineSource {
    editor: Reedline,
}

impl EditorLineSource {
    pub fn new() -> io::Result<Self> {
        let history = FileBackedHistory::new(1_000).map_err(io::Error::other)?;
        let editor = Reedline::create()
            .with_highlighter(Box::new(BefungeHighlighter::default()))
            .with_history(Box::new(history));
        Ok(Self { editor })
    }

    fn read(&mut self, prompt: &str, record_history: bool) -> io::Result<Option<String>> {
        let prompt = ShellPrompt::new(prompt);
        match self.editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => {
                if record_history && !line.trim().is_empty() {
                    let _ = self
                        .editor
                        .history_mut()
                        .save(HistoryItem::from_command_line(line.clone()));
                }
                Ok(Some(line))
            }
            Ok(Signal::CtrlC) | Ok(Signal::CtrlD) => Ok(None),
            Err(e) => {
                eprintln!("befsh: editor error: {e}");
                let _ = io::stderr().flush();
                Ok(None)
            }
        }
    }
}

impl LineSource for EditorLineSource {
    fn read_command(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.read(prompt, true)
    }

    fn read_reply(&mut self) -> io::Result<Option<String>> {
        // Sub-prompt replies are not commands; keep them out of history.
        self.read("", false)
    }
}

/// Renders the configured prompt string verbatim on the left.
struct ShellPrompt {
    text: String,
}

impl ShellPrompt {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl Prompt for ShellPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        match history_search.status {
            PromptHistorySearchStatus::Passing => Cow::Borrowed("(search) "),
            PromptHistorySearchStatus::Failing => Cow::Borrowed("(failing search) "),
        }
    }
}

/// Colors each Befunge instruction by the kind of state it touches.
#[derive(Default)]
pub struct BefungeHighlighter;

impl BefungeHighlighter {
    fn style_for(ch: char) -> Style {
        use crate::theme::catppuccin::Mocha as P;

        match ch {
            '0'..='9' => Style::new().fg(P::GREEN).bold(),
            '+' | '-' | '*' | '/' | '%' | '`' | '!' => Style::new().fg(P::PEACH).bold(),
            '>' | '<' | '^' | 'v' | '?' | '_' | '|' => Style::new().fg(P::SKY).bold(),
            '"' => Style::new().fg(P::PINK).bold(),
            ':' | '\\' | '$' => Style::new().fg(P::MAUVE).bold(),
            '.' | ',' | '&' | '~' => Style::new().fg(P::TEAL).bold(),
            '@' => Style::new().fg(P::YELLOW).bold(),
            '#' | 'g' | 'p' => Style::new().fg(P::RED),
            _ => Style::new().fg(P::SURFACE2),
        }
    }
}

impl Highlighter for BefungeHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut out = StyledText::new();
        let mut run = String::new();
        let mut run_style: Option<Style> = None;

        for ch in line.chars() {
            let style = Self::style_for(ch);
            match run_style {
                Some(current) if current == style => run.push(ch),
                Some(current) => {
                    out.push((current, std::mem::take(&mut run)));
                    run.push(ch);
                    run_style = Some(style);
                }
                None => {
                    run.push(ch);
                    run_style = Some(style);
                }
            }
        }
        if let Some(style) = run_style {
            out.push((style, run));
        }
        out
    }
}
