use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use tui_textarea::TextArea;

use crate::game::{Outcome, PlayError, Session};
use crate::maze::RoomKind;

struct App<'a> {
    session: Session,
    message: String,
    message_style: Style,
    message_scroll: u16,
    answer: TextArea<'a>,
    answering: bool,
    command_mode: bool,
    command_buffer: String,
    quit: bool,
}

impl<'a> App<'a> {
    fn new(session: Session) -> Self {
        let mut app = App {
            session,
            message: String::new(),
            message_style: Style::default().fg(Color::Yellow),
            message_scroll: 0,
            answer: answer_box(),
            answering: false,
            command_mode: false,
            command_buffer: String::new(),
            quit: false,
        };
        app.describe_room();
        app
    }

    fn tell(&mut self, message: String, color: Color) {
        self.message = message;
        self.message_style = Style::default().fg(color);
        self.message_scroll = 0;
    }

    fn describe_room(&mut self) {
        let text = match self.session.pending_riddle() {
            Some(_) => "A riddle bars the way. Press 'a' to answer it.".to_string(),
            None => "Pick an exit with its number. 'u' uses an item, :q gives up.".to_string(),
        };
        self.tell(text, Color::Yellow);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.session.outcome().is_finished() {
            self.quit = true;
            return;
        }

        if self.command_mode {
            match key.code {
                KeyCode::Esc => {
                    self.command_mode = false;
                    self.command_buffer.clear();
                }
                KeyCode::Enter => {
                    match self.command_buffer.as_str() {
                        "q" | "quit" => {
                            self.session.abandon();
                            self.quit = true;
                        }
                        "help" => self.tell(
                            "Keys: 1-9 move, a answer riddle, u use item, :q quit".to_string(),
                            Color::Cyan,
                        ),
                        "" => {}
                        other => self.tell(format!("Unknown command: {}", other), Color::Red),
                    }
                    self.command_mode = false;
                    self.command_buffer.clear();
                }
                KeyCode::Backspace => {
                    self.command_buffer.pop();
                    if self.command_buffer.is_empty() {
                        self.command_mode = false;
                    }
                }
                KeyCode::Char(c) => self.command_buffer.push(c),
                _ => {}
            }
            return;
        }

        if self.answering {
            match key.code {
                KeyCode::Esc => {
                    self.answering = false;
                    self.answer = answer_box();
                }
                KeyCode::Enter => self.submit_answer(),
                _ => {
                    self.answer.input(key);
                }
            }
            return;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char(':'), _) => {
                self.command_mode = true;
                self.command_buffer.clear();
            }
            (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
                let index = c as usize - '1' as usize;
                self.take_exit(index);
            }
            (KeyCode::Char('a'), KeyModifiers::NONE) => {
                if self.session.pending_riddle().is_some() {
                    self.answering = true;
                    self.answer = answer_box();
                } else {
                    self.tell("Nothing to answer here.".to_string(), Color::DarkGray);
                }
            }
            (KeyCode::Char('u'), KeyModifiers::NONE) => self.use_first_item(),
            (KeyCode::PageDown, _) => {
                let lines = self.message.lines().count() as u16;
                if self.message_scroll < lines.saturating_sub(3) {
                    self.message_scroll += 3;
                }
            }
            (KeyCode::PageUp, _) => {
                self.message_scroll = self.message_scroll.saturating_sub(3);
            }
            (KeyCode::Esc, _) => self.tell("Type :q to quit".to_string(), Color::DarkGray),
            _ => {}
        }
    }

    fn take_exit(&mut self, index: usize) {
        let Some(target) = self.session.exits().get(index).map(|room| room.id.clone()) else {
            self.tell(format!("There is no exit number {}.", index + 1), Color::DarkGray);
            return;
        };
        match self.session.move_to(&target) {
            Ok(report) => {
                let mut text = format!("{} walks to {} (cost {}).", report.player, report.to, report.cost);
                if let Some(event) = &report.event {
                    text.push_str(&format!("\n\n{} [{}]", event.description, event.effect));
                    if let Some(item) = event.item() {
                        text.push_str(&format!("\n{} picks up {}.", report.player, item));
                    }
                }
                if report.arrived != report.to {
                    text.push_str(&format!("\n{} ends up in {}.", report.player, report.arrived));
                }
                match report.outcome {
                    Outcome::Victory | Outcome::Defeat => self.finish(text),
                    _ => {
                        if self.session.players().len() > 1 {
                            text.push_str(&format!("\n\n{}'s turn.", self.session.player().name()));
                        }
                        let color = if report.event.is_some() { Color::Magenta } else { Color::White };
                        self.tell(text, color);
                    }
                }
            }
            Err(e @ PlayError::RiddleUnsolved(_)) => self.tell(format!("{}. Press 'a'.", e), Color::Red),
            Err(e) => self.tell(e.to_string(), Color::Red),
        }
    }

    fn submit_answer(&mut self) {
        let text = self.answer.lines().join(" ");
        self.answering = false;
        self.answer = answer_box();
        match self.session.answer_riddle(&text) {
            Ok(true) => self.tell("Correct! The way is open.".to_string(), Color::Green),
            Ok(false) => self.tell("That is not the answer. Try again with 'a'.".to_string(), Color::Red),
            Err(e) => self.tell(e.to_string(), Color::Red),
        }
    }

    fn use_first_item(&mut self) {
        let Some(name) = self.session.player().inventory().first().ok().map(|item| item.name.clone()) else {
            self.tell("Your inventory is empty.".to_string(), Color::DarkGray);
            return;
        };
        match self.session.use_item(&name) {
            Ok(item) => {
                let text = format!("You use {}. Health is now {}.", item, self.session.player().health());
                if self.session.outcome() == Outcome::Defeat {
                    self.finish(text);
                } else {
                    self.tell(text, Color::Green);
                }
            }
            Err(e) => self.tell(e.to_string(), Color::Red),
        }
    }

    fn finish(&mut self, prefix: String) {
        let player = self.session.player();
        let (headline, color) = match self.session.outcome() {
            Outcome::Victory => ("TREASURE FOUND BY", Color::Green),
            _ => ("FALLEN:", Color::Red),
        };
        let text = format!(
            "{}\n\n*** {} {} ***\nMoves: {}  Cost: {}  Health: {}\n\nPress any key to leave...",
            prefix,
            headline,
            player.name(),
            player.moves(),
            player.distance(),
            player.health()
        );
        self.message = text;
        self.message_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
        self.message_scroll = 0;
    }
}

fn answer_box<'a>() -> TextArea<'a> {
    let mut answer = TextArea::default();
    answer.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Your answer [Enter: submit | Esc: cancel] "),
    );
    answer.set_cursor_line_style(Style::default());
    answer
}

/// Plays `session` on the terminal until it ends or the player quits, then
/// hands it back for reporting.
pub fn play(session: Session) -> Result<Session> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    if !app.session.outcome().is_finished() {
        app.session.abandon();
    }
    Ok(app.session)
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while !app.quit {
        terminal.draw(|f| draw_ui(f, app))?;
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
    }
    Ok(())
}

fn draw_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(9),
        ])
        .split(f.area());

    let session = &app.session;
    let player = session.player();
    let health = player.health();
    let status = Line::from(vec![
        Span::styled(" LABYRINTH ", Style::default().fg(Color::Black).bg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", session.maze().name().unwrap_or("Unknown map")),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" {} (turn {}) ", player.name(), session.turn()),
            Style::default().fg(Color::Magenta),
        ),
        Span::raw("  "),
        Span::styled(format!(" Room {} ", player.current_room()), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(
            format!(" HP: {} ", health),
            Style::default().fg(if health > 50 {
                Color::Green
            } else if health > 20 {
                Color::Yellow
            } else {
                Color::Red
            }),
        ),
        Span::raw("  "),
        Span::styled(format!(" Moves: {} ", player.moves()), Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled(format!(" Cost: {} ", player.distance()), Style::default().fg(Color::Yellow)),
    ]);
    f.render_widget(
        Paragraph::new(status).block(Block::default().borders(Borders::BOTTOM)),
        chunks[0],
    );

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    let mut room_lines = Vec::new();
    if let Some(room) = session.current_room() {
        room_lines.push(Line::from(Span::styled(
            format!("{} ({})", room.id, room.kind.label()),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        room_lines.push(Line::raw(""));
        room_lines.push(Line::raw(room.description.clone()));
        if let RoomKind::Riddle(_) = room.kind {
            if let Some(riddle) = session.pending_riddle() {
                room_lines.push(Line::raw(""));
                room_lines.push(Line::styled(
                    format!("Riddle: {}", riddle.question()),
                    Style::default().fg(Color::Magenta),
                ));
                for (i, option) in riddle.options().iter().enumerate() {
                    room_lines.push(Line::raw(format!("  {}. {}", i + 1, option)));
                }
            }
        }
    }
    let room_panel = Paragraph::new(room_lines)
        .block(Block::default().borders(Borders::ALL).title(" The Room "))
        .wrap(Wrap { trim: false });
    f.render_widget(room_panel, main_chunks[0]);

    let mut side = vec![Line::styled("Exits", Style::default().add_modifier(Modifier::BOLD))];
    let exits = session.exits();
    if exits.is_empty() {
        side.push(Line::raw("  none (dead end)"));
    }
    for (i, room) in exits.iter().enumerate().take(9) {
        side.push(Line::raw(format!("  {}. {} {}", i + 1, room.id, room.description)));
    }
    side.push(Line::raw(""));
    side.push(Line::styled("Inventory", Style::default().add_modifier(Modifier::BOLD)));
    if player.inventory().is_empty() {
        side.push(Line::raw("  (empty)"));
    }
    for item in player.inventory() {
        side.push(Line::raw(format!("  {}", item)));
    }
    let side_panel = Paragraph::new(side)
        .block(Block::default().borders(Borders::ALL).title(" Paths & Pack "))
        .wrap(Wrap { trim: false });
    f.render_widget(side_panel, main_chunks[1]);

    if app.answering {
        f.render_widget(&app.answer, chunks[2]);
        return;
    }

    let (content, style, title) = if app.command_mode {
        (
            format!(":{}", app.command_buffer),
            Style::default().fg(Color::White).bg(Color::DarkGray),
            " Command ",
        )
    } else {
        let title = match session.outcome() {
            Outcome::Victory => " VICTORY! ",
            Outcome::Defeat => " GAME OVER ",
            Outcome::InProgress | Outcome::Abandoned => " Echoes ",
        };
        (app.message.clone(), app.message_style, title)
    };
    let message = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .style(style)
        .scroll((app.message_scroll, 0));
    f.render_widget(message, chunks[2]);
}
