//! Full-screen ratatui chat interface.
//!
//!   - Header: title + status/streaming indicator
//!   - Scrollable message panel (player / game master / error entries)
//!   - Input line at the bottom (Enter to send, Ctrl+C or `exit` to quit)
//!
//! The panel state is kept in [`ChatState`] so the event wiring can be
//! tested without a terminal.

use std::io;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Terminal,
};

use crate::persona;
use crate::transcript::Transcript;
use crate::worker::{WorkerEvent, WorkerHandle};

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Who a panel entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    Player,
    GameMaster,
    Error,
}

impl Sender {
    fn label(self) -> &'static str {
        match self {
            Sender::Player => persona::PLAYER,
            Sender::GameMaster => persona::GAMEMASTER,
            Sender::Error => "ERROR",
        }
    }
}

/// A single entry in the message panel.
#[derive(Debug, Clone)]
pub struct PanelEntry {
    pub sender: Sender,
    pub content: String,
}

/// Display state: panel entries plus streaming bookkeeping.
pub struct ChatState {
    pub entries: Vec<PanelEntry>,
    /// Index of the in-progress game-master entry while deltas arrive.
    streaming_entry: Option<usize>,
    pub awaiting_reply: bool,
    /// Lines scrolled up from the bottom; 0 sticks to the latest entry.
    pub scroll_from_bottom: u16,
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            streaming_entry: None,
            awaiting_reply: false,
            scroll_from_bottom: 0,
        }
    }

    pub fn push(&mut self, sender: Sender, content: impl Into<String>) {
        self.entries.push(PanelEntry {
            sender,
            content: content.into(),
        });
        self.scroll_from_bottom = 0;
    }

    /// Record a submitted player line and enter the awaiting state.
    pub fn begin_turn(&mut self, text: &str) {
        self.push(Sender::Player, text);
        self.awaiting_reply = true;
    }

    /// Apply one worker event to the panel.
    pub fn apply(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::Delta(delta) => {
                let index = match self.streaming_entry {
                    Some(index) => index,
                    None => {
                        self.push(Sender::GameMaster, "");
                        let index = self.entries.len() - 1;
                        self.streaming_entry = Some(index);
                        index
                    }
                };
                self.entries[index].content.push_str(&delta);
            }
            WorkerEvent::Complete(reply) => {
                match self.streaming_entry.take() {
                    // Streamed deltas already built the entry; settle on the
                    // assembled reply.
                    Some(index) => self.entries[index].content = reply,
                    None => self.push(Sender::GameMaster, reply),
                }
                self.awaiting_reply = false;
                self.scroll_from_bottom = 0;
            }
            WorkerEvent::Failed(message) => {
                // A failed call leaves no partial narration behind, matching
                // the untouched session history.
                if let Some(index) = self.streaming_entry.take() {
                    self.entries.remove(index);
                }
                self.push(Sender::Error, message);
                self.awaiting_reply = false;
            }
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

/// What a key event asks the chat loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputAction {
    Quit,
    Submit,
    Insert(char),
    DeleteBack,
    ScrollUp(u16),
    ScrollDown(u16),
}

/// Map a key event to an action. Release/repeat events are ignored so
/// platforms that report both press and release do not double input.
fn key_to_action(key: KeyEvent) -> Option<InputAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(InputAction::Quit),
        (KeyCode::Enter, _) => Some(InputAction::Submit),
        (KeyCode::Backspace, _) => Some(InputAction::DeleteBack),
        (KeyCode::Up, _) => Some(InputAction::ScrollUp(1)),
        (KeyCode::Down, _) => Some(InputAction::ScrollDown(1)),
        (KeyCode::PageUp, _) => Some(InputAction::ScrollUp(10)),
        (KeyCode::PageDown, _) => Some(InputAction::ScrollDown(10)),
        (KeyCode::Char(c), _) => Some(InputAction::Insert(c)),
        _ => None,
    }
}

/// ratatui-based interactive chat loop.
pub struct ChatUi {
    worker: WorkerHandle,
    transcript: Transcript,
}

impl ChatUi {
    pub fn new(worker: WorkerHandle, transcript: Transcript) -> Self {
        Self { worker, transcript }
    }

    /// Enter the alternate screen and run until the player quits.
    pub async fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal).await;

        // Restore terminal regardless of result.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        let mut state = ChatState::new();
        let mut input_buf = String::new();
        let mut tick: usize = 0;

        // Opening narration: shown and logged, never part of the
        // conversation history.
        state.push(Sender::GameMaster, persona::GREETING);
        self.transcript.append(persona::GAMEMASTER, persona::GREETING);

        loop {
            tick = tick.wrapping_add(1);
            terminal.draw(|f| draw_ui(f, &state, &input_buf, tick))?;

            // Poll for terminal events (non-blocking, 50ms timeout).
            if event::poll(std::time::Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    match key_to_action(key) {
                        Some(InputAction::Quit) => break,
                        Some(InputAction::Submit) => {
                            if state.awaiting_reply {
                                // One submission in flight at a time.
                                continue;
                            }
                            let text = std::mem::take(&mut input_buf);
                            let trimmed = text.trim();
                            if trimmed == "exit" || trimmed == "quit" {
                                break;
                            }

                            // Forwarded as-is; empty lines included.
                            state.begin_turn(&text);
                            self.transcript.append(persona::PLAYER, &text);
                            if self.worker.submit.send(text).is_err() {
                                state.apply(WorkerEvent::Failed(
                                    "Error: completion worker stopped".into(),
                                ));
                            }
                        }
                        Some(InputAction::DeleteBack) => {
                            input_buf.pop();
                        }
                        Some(InputAction::Insert(c)) => input_buf.push(c),
                        Some(InputAction::ScrollUp(lines)) => state.scroll_up(lines),
                        Some(InputAction::ScrollDown(lines)) => state.scroll_down(lines),
                        None => {}
                    }
                }
            }

            // Drain worker events without blocking the draw loop.
            while let Ok(event) = self.worker.events.try_recv() {
                if let WorkerEvent::Complete(ref reply) = event {
                    self.transcript.append(persona::GAMEMASTER, reply);
                }
                state.apply(event);
            }
        }

        Ok(())
    }
}

// ─── UI rendering ─────────────────────────────────────────────────────────────

fn draw_ui(f: &mut ratatui::Frame, state: &ChatState, input: &str, tick: usize) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(3),    // message panel
            Constraint::Length(3), // input area
            Constraint::Length(1), // help line
        ])
        .split(area);

    render_header(f, chunks[0], state, tick);
    render_messages(f, chunks[1], state);
    render_input(f, chunks[2], input, state.awaiting_reply);
    render_help(f, chunks[3]);
}

fn render_header(f: &mut ratatui::Frame, area: Rect, state: &ChatState, tick: usize) {
    let status = if state.awaiting_reply {
        format!("transmitting… {}", SPINNER[tick % SPINNER.len()])
    } else {
        "link idle".to_string()
    };
    let header = Paragraph::new(format!(" OUTPOST RS-232 RELAY  |  {status}"))
        .style(Style::default().bg(Color::Rgb(0, 17, 0)).fg(Color::Green));
    f.render_widget(header, area);
}

fn render_messages(f: &mut ratatui::Frame, area: Rect, state: &ChatState) {
    let mut lines: Vec<Line> = Vec::new();
    for entry in &state.entries {
        let style = match entry.sender {
            Sender::Player => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            Sender::GameMaster => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            Sender::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        };
        lines.push(Line::from(Span::styled(entry.sender.label(), style)));
        for line in entry.content.lines() {
            lines.push(Line::from(format!("  {line}")));
        }
        lines.push(Line::from(""));
    }

    // Stick to the bottom unless the player scrolled up.
    let viewport = area.height.saturating_sub(2);
    let total = lines.len() as u16;
    let bottom = total.saturating_sub(viewport);
    let offset = bottom.saturating_sub(state.scroll_from_bottom.min(bottom));

    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title("Transmission"),
        )
        .wrap(Wrap { trim: false })
        .scroll((offset, 0))
        .style(Style::default().fg(Color::Green));
    f.render_widget(panel, area);
}

fn render_input(f: &mut ratatui::Frame, area: Rect, input: &str, awaiting: bool) {
    let cursor = if awaiting { "" } else { "▌" };
    let text = Paragraph::new(format!("> {input}{cursor}"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title("Enter message"),
        )
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::Green));
    f.render_widget(text, area);
}

fn render_help(f: &mut ratatui::Frame, area: Rect) {
    let help = Paragraph::new(
        " Enter: send  |  Up/Down: scroll  |  Ctrl+C: quit  |  type 'exit' to quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, area);
}
