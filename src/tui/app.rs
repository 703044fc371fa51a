use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::cache::{ContactCache, TaskCache};
use crate::model::{Status, Task};
use crate::ops::{board, search};
use crate::store::Store;

use super::drag::{BoardHits, DragState};
use super::theme::Theme;
use super::{effects, input, render};

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Board,
    Contacts,
    Summary,
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
}

/// Cursor position on the board: lane index and card index within it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardCursor {
    pub lane: usize,
    pub card: usize,
}

/// Open task detail overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailState {
    pub task_id: String,
    pub subtask_cursor: usize,
}

/// Quick "move to" popup: only the statuses adjacent to the current one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePopup {
    pub task_id: String,
    pub options: Vec<Status>,
    pub cursor: usize,
}

/// A destructive action awaiting confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteTask(String),
    DeleteContact(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmState {
    pub prompt: String,
    pub action: ConfirmAction,
}

/// A persistence step queued by an input handler. The event loop drains
/// these between input events; the store calls inside are the only
/// suspension points, so nothing else mutates the caches mid-flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Persist only the status field (drop and quick-move path).
    PersistStatus { task_id: String, status: Status },
    /// Persist the full record as currently cached (subtask toggle path).
    PersistTask { task_id: String },
    /// Cascade-delete a task, then reload.
    DeleteTask { task_id: String },
    /// Cascade-delete a contact, then reload.
    DeleteContact { contact_id: String },
    /// Reload both collections wholesale.
    ReloadAll,
}

/// Main application state
pub struct App {
    pub tasks: TaskCache,
    pub contacts: ContactCache,
    pub view: View,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub board_cursor: BoardCursor,
    /// Per-lane scroll offset (in cards)
    pub lane_scroll: [usize; 4],
    pub contacts_cursor: usize,
    pub contacts_scroll: usize,
    pub detail: Option<DetailState>,
    pub move_popup: Option<MovePopup>,
    pub confirm: Option<ConfirmState>,
    pub drag: DragState,
    /// Lane/card rectangles recorded by the last board draw
    pub hits: BoardHits,
    /// Search mode: current query being typed
    pub search_input: String,
    /// Committed filter applied while navigating
    pub filter: Option<String>,
    pub show_help: bool,
    /// Transient message shown in the status row
    pub status_message: Option<String>,
    pub pending: VecDeque<Effect>,
}

impl App {
    pub fn new(theme: Theme) -> Self {
        App {
            tasks: TaskCache::new(),
            contacts: ContactCache::new(),
            view: View::Board,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            board_cursor: BoardCursor::default(),
            lane_scroll: [0; 4],
            contacts_cursor: 0,
            contacts_scroll: 0,
            detail: None,
            move_popup: None,
            confirm: None,
            drag: DragState::default(),
            hits: BoardHits::default(),
            search_input: String::new(),
            filter: None,
            show_help: false,
            status_message: None,
            pending: VecDeque::new(),
        }
    }

    /// The active search regex: the live input while typing, the committed
    /// filter while navigating.
    pub fn search_re(&self) -> Option<Regex> {
        let query = match self.mode {
            Mode::Search if !self.search_input.is_empty() => Some(self.search_input.as_str()),
            Mode::Search => None,
            Mode::Navigate => self.filter.as_deref(),
        };
        query.and_then(search::compile_query)
    }

    pub fn is_filtering(&self) -> bool {
        self.search_re().is_some()
    }

    /// The cached tasks the board currently shows (filter applied).
    pub fn visible_tasks(&self) -> Vec<&Task> {
        match self.search_re() {
            Some(re) => search::filter(self.tasks.tasks(), &re),
            None => self.tasks.tasks().iter().collect(),
        }
    }

    /// Visible tasks partitioned into the four lanes.
    pub fn lanes(&self) -> [Vec<&Task>; 4] {
        board::partition(self.visible_tasks())
    }

    /// Number of visible cards per lane.
    pub fn lane_lens(&self) -> [usize; 4] {
        let lanes = self.lanes();
        [
            lanes[0].len(),
            lanes[1].len(),
            lanes[2].len(),
            lanes[3].len(),
        ]
    }

    /// The task under the board cursor.
    pub fn cursor_task_id(&self) -> Option<String> {
        let lanes = self.lanes();
        lanes[self.board_cursor.lane]
            .get(self.board_cursor.card)
            .map(|t| t.id.clone())
    }

    /// Keep the cursor inside the visible card lists.
    pub fn clamp_board_cursor(&mut self) {
        let lens = self.lane_lens();
        self.board_cursor.lane = self.board_cursor.lane.min(3);
        let len = lens[self.board_cursor.lane];
        self.board_cursor.card = self.board_cursor.card.min(len.saturating_sub(1));
    }

    pub fn open_detail(&mut self, task_id: &str) {
        if self.tasks.get(task_id).is_some() {
            self.detail = Some(DetailState {
                task_id: task_id.to_string(),
                subtask_cursor: 0,
            });
        }
    }

    pub fn open_move_popup(&mut self, task_id: &str) {
        if let Some(task) = self.tasks.get(task_id) {
            self.move_popup = Some(MovePopup {
                task_id: task_id.to_string(),
                options: board::quick_moves(task.status),
                cursor: 0,
            });
        }
    }

    pub fn ask_confirm(&mut self, prompt: impl Into<String>, action: ConfirmAction) {
        self.confirm = Some(ConfirmState {
            prompt: prompt.into(),
            action,
        });
    }

    pub fn queue(&mut self, effect: Effect) {
        self.pending.push_back(effect);
    }

    pub fn say(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}

/// Run the TUI application against the given store.
pub async fn run<S: Store>(store: &S, theme: Theme) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(theme);

    // Initial load; an unreachable store still opens the (empty) board.
    if let Err(error) = app.tasks.reload(store).await {
        tracing::error!(%error, "initial task load failed");
        app.say(format!("Could not load tasks: {error}"));
    }
    if let Err(error) = app.contacts.reload(store).await {
        tracing::error!(%error, "initial contact load failed");
        app.say(format!("Could not load contacts: {error}"));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, store).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop<S: Store>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &S,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        // Drain queued persistence between input events. These awaits are
        // the loop's only suspension points.
        while let Some(effect) = app.pending.pop_front() {
            effects::apply(app, store, effect).await;
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
