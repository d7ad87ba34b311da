use std::io::{self, stdout};

use connect4::{
    status_line, token, Event as GameEvent, Game, GameOutcome, Move, Player, Presenter, Rows,
    Window, HEIGHT, WIDTH,
};
use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
    widgets::*,
};

fn main() -> io::Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    let mut app = App::new();

    while !app.should_quit {
        terminal.draw(|frame| app.ui(frame))?;
        handle_events(&mut app)?;
    }

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

const CELL_WIDTH: u16 = 4;

const BOARD_WIDGET_WIDTH: u16 = CELL_WIDTH * WIDTH as u16 + 2;

/// Column numbers, the pieces, and the borders.
const BOARD_WIDGET_HEIGHT: u16 = HEIGHT as u16 + 3;

/// What is on screen. Only ever changed through [`Presenter`] calls.
struct BoardView {
    cells: Rows,
    status: String,
}

impl BoardView {
    fn new() -> Self {
        Self {
            cells: [[None; WIDTH]; HEIGHT],
            status: status_line(GameOutcome::InProgress, Player::One),
        }
    }
}

impl Presenter for BoardView {
    fn piece_committed(&mut self, placed: Move) {
        self.cells[placed.row][placed.column] = Some(placed.player);
    }

    fn turn_changed(&mut self, player: Player) {
        self.status = status_line(GameOutcome::InProgress, player);
    }

    fn game_ended(&mut self, outcome: GameOutcome) {
        // The player only matters for a game in progress
        let player = outcome.winner().unwrap_or(Player::One);
        self.status = status_line(outcome, player);
    }

    fn board_reset(&mut self) {
        *self = Self::new();
    }
}

struct App {
    game: Game,
    view: BoardView,
    /// The column the selector arrow points at.
    selected_column: usize,
    should_quit: bool,
}

impl App {
    fn new() -> Self {
        Self {
            game: Game::new(),
            view: BoardView::new(),
            selected_column: WIDTH / 2,
            should_quit: false,
        }
    }

    fn on_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Left => self.selected_column = self.selected_column.saturating_sub(1),
            KeyCode::Right => self.selected_column = (self.selected_column + 1).min(WIDTH - 1),
            KeyCode::Enter | KeyCode::Down | KeyCode::Char(' ') => {
                self.send(GameEvent::ColumnSelected {
                    column: self.selected_column as i64,
                })
            }
            KeyCode::Char(c @ '1'..='9') => {
                let column = i64::from(c as u8 - b'1');
                if let Ok(selected) = usize::try_from(column) {
                    if selected < WIDTH {
                        self.selected_column = selected;
                    }
                }
                self.send(GameEvent::ColumnSelected { column })
            }
            KeyCode::Char('n') => self.send(GameEvent::ResetRequested),
            _ => {}
        }
    }

    fn send(&mut self, event: GameEvent) {
        // A rejected move simply leaves the screen as it is
        let _ = self.game.handle(event, &mut self.view);
    }

    fn ui(&self, frame: &mut Frame) {
        let main_layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(BOARD_WIDGET_HEIGHT),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ],
        )
        .split(frame.size());
        frame.render_widget(
            BoardWidget {
                view: &self.view,
                selected_column: self.selected_column,
                highlight: self.game.winning_window(),
            },
            main_layout[0],
        );
        frame.render_widget(
            Paragraph::new(self.view.status.as_str())
                .alignment(Alignment::Center)
                .style(Style::new().bold()),
            main_layout[1],
        );
        frame.render_widget(
            Paragraph::new("←/→ select · Enter drop · 1-7 drop into column · n new game · q quit")
                .alignment(Alignment::Center)
                .style(Style::new().dim()),
            main_layout[2],
        );
    }
}

struct BoardWidget<'a> {
    view: &'a BoardView,
    selected_column: usize,
    highlight: Option<Window>,
}

fn player_style(player: Player) -> Style {
    match player {
        Player::One => Style::new().fg(Color::Red),
        Player::Two => Style::new().fg(Color::Yellow),
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(BOARD_WIDGET_WIDTH),
                Constraint::Min(0),
            ])
            .split(area)[1];
        let block = Block::new()
            .border_type(BorderType::Rounded)
            .borders(Borders::all())
            .title(" Connect Four ");
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < BOARD_WIDGET_WIDTH - 2 || inner.height < BOARD_WIDGET_HEIGHT - 2 {
            return;
        }

        // The column tops
        for column in 0..WIDTH {
            let x = inner.x + column as u16 * CELL_WIDTH + 1;
            let (label, style) = if column == self.selected_column {
                (format!("▼{}", column + 1), Style::new().bold())
            } else {
                (format!(" {}", column + 1), Style::new().dim())
            };
            buf.set_string(x - 1, inner.y, label, style);
        }

        for (row, cells) in self.view.cells.iter().enumerate() {
            let y = inner.y + 1 + row as u16;
            for (column, cell) in cells.iter().enumerate() {
                let x = inner.x + column as u16 * CELL_WIDTH + 1;
                match cell {
                    Some(player) => {
                        let mut style = player_style(*player);
                        if self.highlight.is_some_and(|w| w.contains(row, column)) {
                            style = style.bold().reversed();
                        }
                        buf.set_string(x, y, token(*player).to_string(), style);
                    }
                    None => {
                        buf.set_string(x, y, "·", Style::new().dim());
                    }
                }
            }
        }
    }
}

fn handle_events(app: &mut App) -> io::Result<()> {
    if event::poll(std::time::Duration::from_millis(16))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == event::KeyEventKind::Press {
                app.on_key(key.code);
            }
        }
    }
    Ok(())
}
