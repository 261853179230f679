//! The interactive destination picker.
//!
//! The picker walks through up to three screens: pick a file, pick a heading in it (or the file
//! root), and optionally type the name of a heading to create. Typing on the file screen fuzzy
//! filters the candidates by their path. A preview of the item being moved
//! stays visible throughout. Key handling lives on [`PickerState`] so it can be driven without a
//! terminal; [`Picker`] owns the terminal session around it.

use crate::filter::relative_path;
use crate::formats::Format;
use crate::mover::{DestinationChooser, MoveRequest, MoveTarget, Mover};
use crate::resolver::Placement;
use crate::section::Heading;
use crate::store::Severity;
use edtui::{EditorState, EditorTheme, EditorView, Lines, SyntaxHighlighter};
use nucleo::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo::{Config, Matcher, Utf32Str};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use tracing::error;

/// Longest path shown in the file list before it is shortened.
pub const MAX_PATH_DISPLAY: usize = 40;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// Which question the picker is currently asking.
pub enum Screen {
    /// Choose the destination document.
    Files,
    /// Choose a heading in the destination, or its root.
    Headings,
    /// Type the name of a heading to create.
    NewHeading,
}

#[derive(Debug, PartialEq, Eq)]
/// How a key press ended the picker, if it did.
pub enum Outcome {
    /// The user confirmed a destination.
    Chosen(MoveTarget),
    /// The user backed out without choosing.
    Cancelled,
}

/// Selection state of the picker, independent of any terminal.
pub struct PickerState {
    /// Candidate destination documents.
    pub files: Vec<PathBuf>,
    /// Directory the candidates are shown relative to.
    pub root: PathBuf,
    /// Filter in effect, shown in the file list title.
    pub filter: Option<String>,
    /// Active screen.
    pub screen: Screen,
    /// Fuzzy search typed on the file screen.
    pub query: String,
    /// Indices into `files` matching `query`, best match first.
    pub matches: Vec<usize>,
    /// Selected row of `matches`.
    pub file_index: usize,
    /// Headings of the selected document once it has been opened.
    pub headings: Vec<Heading>,
    /// Selected row on the heading screen; row 0 is the file root.
    pub heading_index: usize,
    /// Name typed on the new-heading screen.
    pub new_heading: String,
    /// Read-only editor buffer holding the item being moved.
    pub preview: EditorState,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    matcher: Matcher,
}

impl PickerState {
    #[must_use]
    /// Starts on the file screen with the source document selected if it is a candidate.
    pub fn new(request: &MoveRequest<'_>) -> Self {
        let file_index = request
            .candidates
            .iter()
            .position(|file| file == request.source)
            .unwrap_or(0);

        Self {
            files: request.candidates.clone(),
            root: request.root.to_path_buf(),
            filter: request.filter.clone(),
            screen: Screen::Files,
            query: String::new(),
            matches: (0..request.candidates.len()).collect(),
            file_index,
            headings: Vec::new(),
            heading_index: 0,
            new_heading: String::new(),
            preview: EditorState::new(Lines::from(request.item.text.as_str())),
            message: None,
            matcher: Matcher::new(Config::DEFAULT.match_paths()),
        }
    }

    fn selected_file(&self) -> Option<&PathBuf> {
        self.matches
            .get(self.file_index)
            .and_then(|&i| self.files.get(i))
    }

    /// Re-ranks the candidates against the current query and selects the best match.
    fn refresh_matches(&mut self) {
        self.file_index = 0;
        if self.query.is_empty() {
            self.matches = (0..self.files.len()).collect();
            return;
        }

        let atom = Atom::new(
            &self.query,
            CaseMatching::Smart,
            Normalization::Smart,
            AtomKind::Fuzzy,
            false,
        );
        let mut buf = Vec::new();
        let mut scored: Vec<(usize, u16)> = Vec::new();
        for (i, file) in self.files.iter().enumerate() {
            let path = relative_path(file, &self.root);
            if let Some(score) = atom.score(Utf32Str::new(&path, &mut buf), &mut self.matcher) {
                scored.push((i, score));
            }
        }
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        self.matches = scored.into_iter().map(|(i, _)| i).collect();
    }

    /// Applies one key press, loading headings through `mover` when a file is opened.
    pub fn handle_key(&mut self, key: KeyEvent, mover: &Mover<'_>) -> Option<Outcome> {
        match self.screen {
            Screen::Files => match key.code {
                KeyCode::Esc => return Some(Outcome::Cancelled),
                KeyCode::Up => {
                    self.file_index = self.file_index.saturating_sub(1);
                }
                KeyCode::Down => {
                    if self.file_index + 1 < self.matches.len() {
                        self.file_index += 1;
                    }
                }
                KeyCode::Char(c) => {
                    self.query.push(c);
                    self.refresh_matches();
                }
                KeyCode::Backspace => {
                    self.query.pop();
                    self.refresh_matches();
                }
                KeyCode::Enter => self.open_selected(mover),
                _ => {}
            },
            Screen::Headings => match key.code {
                KeyCode::Esc => {
                    self.screen = Screen::Files;
                    self.message = None;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.heading_index = self.heading_index.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if self.heading_index < self.headings.len() {
                        self.heading_index += 1;
                    }
                }
                KeyCode::Char('n') => {
                    self.screen = Screen::NewHeading;
                    self.new_heading.clear();
                }
                KeyCode::Enter => {
                    let placement = match self.heading_index {
                        0 => Placement::FileEnd,
                        i => Placement::Heading(self.headings[i - 1].clone()),
                    };
                    return self.finish(placement);
                }
                _ => {}
            },
            Screen::NewHeading => match key.code {
                KeyCode::Esc => self.screen = Screen::Headings,
                KeyCode::Char(c) => self.new_heading.push(c),
                KeyCode::Backspace => {
                    self.new_heading.pop();
                }
                KeyCode::Enter => {
                    let title = self.new_heading.trim();
                    if title.is_empty() {
                        self.message = Some("Heading name cannot be empty".to_string());
                    } else {
                        return self.finish(Placement::NewHeading(title.to_string()));
                    }
                }
                _ => {}
            },
        }
        None
    }

    fn open_selected(&mut self, mover: &Mover<'_>) {
        let Some(file) = self.selected_file() else {
            return;
        };
        match mover.snapshot(file) {
            Ok((_, snapshot)) => {
                self.headings = snapshot.headings;
                self.heading_index = 0;
                self.screen = Screen::Headings;
                self.message = None;
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    fn finish(&self, placement: Placement) -> Option<Outcome> {
        self.selected_file().map(|file| {
            Outcome::Chosen(MoveTarget {
                file: file.clone(),
                placement,
            })
        })
    }
}

/// Destination chooser that takes over the terminal.
pub struct Picker<'f> {
    /// Format used to render heading rows.
    pub format: &'f dyn Format,
}

impl DestinationChooser for Picker<'_> {
    fn choose(&mut self, request: &MoveRequest<'_>, mover: &Mover<'_>) -> Option<MoveTarget> {
        if request.candidates.is_empty() {
            mover.notify("No destination files match the filter", Severity::Error);
            return None;
        }

        let mut state = PickerState::new(request);
        match run_terminal(&mut state, mover, self.format) {
            Ok(Outcome::Chosen(target)) => Some(target),
            Ok(Outcome::Cancelled) => None,
            Err(e) => {
                error!("picker failed: {e}");
                mover.notify(&format!("Destination picker failed: {e}"), Severity::Error);
                None
            }
        }
    }
}

fn run_terminal(
    state: &mut PickerState,
    mover: &Mover<'_>,
    format: &dyn Format,
) -> io::Result<Outcome> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, state, mover, format);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    state: &mut PickerState,
    mover: &Mover<'_>,
    format: &dyn Format,
) -> io::Result<Outcome> {
    loop {
        terminal.draw(|f| draw(f, state, format))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(outcome) = state.handle_key(key, mover) {
                return Ok(outcome);
            }
        }
    }
}

/// Renders the picker.
pub fn draw(f: &mut Frame, state: &mut PickerState, format: &dyn Format) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Choices
            Constraint::Length(8), // Preview
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let selected = Style::default().add_modifier(Modifier::REVERSED);

    match state.screen {
        Screen::Files => {
            let items: Vec<ListItem> = state
                .matches
                .iter()
                .filter_map(|&i| state.files.get(i))
                .enumerate()
                .map(|(i, file)| {
                    let label = display_path(&relative_path(file, &state.root), MAX_PATH_DISPLAY);
                    let style = if i == state.file_index {
                        selected
                    } else {
                        Style::default()
                    };
                    ListItem::new(label).style(style)
                })
                .collect();
            let title = match &state.filter {
                Some(filter) => format!("Destination file (filter: {filter})"),
                None => "Destination file".to_string(),
            };
            let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(list, chunks[0]);
        }
        Screen::Headings | Screen::NewHeading => {
            let mut items = vec![ListItem::new(Line::from("No heading (file root)"))];
            items.extend(
                state
                    .headings
                    .iter()
                    .map(|h| ListItem::new(format.format_heading_display(h.level, &h.title))),
            );
            let items: Vec<ListItem> = items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    if i == state.heading_index {
                        item.style(selected)
                    } else {
                        item
                    }
                })
                .collect();
            let file = state
                .selected_file()
                .map(|file| relative_path(file, &state.root))
                .unwrap_or_default();
            let list = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Destination heading in {file}")),
            );
            f.render_widget(list, chunks[0]);
        }
    }

    let block = Block::default().borders(Borders::ALL).title("List item preview");
    let inner = block.inner(chunks[1]);
    f.render_widget(block, chunks[1]);
    let syntax_highlighter = SyntaxHighlighter::new("dracula", "md");
    let editor = EditorView::new(&mut state.preview)
        .theme(EditorTheme::default())
        .syntax_highlighter(Some(syntax_highlighter))
        .wrap(true);
    f.render_widget(editor, inner);

    let help_text = if state.screen == Screen::NewHeading {
        format!("New heading: {}", state.new_heading)
    } else if let Some(ref msg) = state.message {
        msg.clone()
    } else if state.screen == Screen::Files {
        format!(
            "Search: {} | ↑/↓: Navigate | Enter: Open | Esc: Cancel",
            state.query
        )
    } else {
        "↑/↓: Navigate | Enter: Move here | n: New heading | Esc: Back".to_string()
    };
    let help = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

#[must_use]
/// Shortens `path` to at most `max_len` characters, keeping the file name and as many parent
/// folders as fit behind a leading `.../`.
///
/// A file name that is too long on its own is cut and ends in `...`.
pub fn display_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let mut parts: Vec<&str> = path.split('/').collect();
    let name = parts.pop().unwrap_or_default();
    let name_len = name.chars().count();
    if name_len > max_len {
        return truncate_name(name, max_len);
    }
    if name_len + 4 > max_len {
        return name.to_string();
    }

    let mut shown = name.to_string();
    for folder in parts.iter().rev() {
        let candidate = format!("{folder}/{shown}");
        if candidate.chars().count() + 4 > max_len {
            break;
        }
        shown = candidate;
    }
    format!(".../{shown}")
}

fn truncate_name(name: &str, max_len: usize) -> String {
    if max_len <= 3 {
        return name.chars().take(max_len).collect();
    }
    let kept: String = name.chars().take(max_len - 3).collect();
    format!("{kept}...")
}

#[cfg(test)]
#[path = "tests/picker.rs"]
mod tests;
