mod app;
mod config;
mod event;
mod quiz;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use app::{App, AppScreen};
use config::Config;
use event::{AppEvent, EventHandler};
use quiz::{Answer, SessionState, loader};
use ui::components::feedback_banner::FeedbackBanner;
use ui::components::progress_bar::ProgressBar;
use ui::components::question_card::QuestionCard;
use ui::components::result_panel::ResultPanel;
use ui::layout::AppLayout;

#[derive(Parser)]
#[command(name = "termquiz", version, about = "Terminal true/false quiz game")]
struct Cli {
    #[arg(help = "Question file, one `token,question` per line (default: bundled set)")]
    questions: Option<PathBuf>,

    #[arg(short, long, help = "Questions per round")]
    count: Option<usize>,

    #[arg(short, long, help = "Minimum score to pass")]
    threshold: Option<f64>,

    #[arg(long, help = "Feedback delay between questions, in milliseconds")]
    delay_ms: Option<u64>,

    #[arg(long, help = "Theme name")]
    theme: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    config.normalize_tokens();
    if let Some(count) = cli.count {
        config.question_count = count;
    }
    if let Some(threshold) = cli.threshold {
        config.passing_threshold = threshold;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.advance_delay_ms = delay_ms;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    // A question source that cannot be read aborts startup before the
    // terminal is touched.
    let tokens = config.token_map();
    let question_bank = match cli.questions {
        Some(ref path) => loader::load_questions(path, &tokens)
            .context("failed to load questions")?,
        None if !config.questions_file.is_empty() => {
            let path = PathBuf::from(&config.questions_file);
            loader::load_questions(&path, &tokens).context("failed to load questions")?
        }
        None => loader::load_embedded(&tokens).context("failed to load questions")?,
    };

    let mut app = App::new(config, question_bank);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Quiz => handle_quiz_key(app, key),
        AppScreen::Result => handle_result_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('1') => app.start_session(),
        KeyCode::Char('c') => app.go_to_settings(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => match app.menu.selected {
            0 => app.start_session(),
            1 => app.go_to_settings(),
            2 => app.should_quit = true,
            _ => {}
        },
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Char('y') | KeyCode::Char('t') | KeyCode::Left => app.answer(Answer::Yes),
        KeyCode::Char('n') | KeyCode::Char('f') | KeyCode::Right => app.answer(Answer::No),
        KeyCode::Char('s') | KeyCode::Char(' ') => app.skip(),
        _ => {}
    }
}

fn handle_result_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.retry_session(),
        KeyCode::Char('m') => app.go_to_menu(),
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            let _ = app.config.save();
            app.go_to_menu();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if app.settings_selected > 0 {
                app.settings_selected -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.settings_selected < 3 {
                app.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
            app.settings_cycle_forward();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.settings_cycle_backward();
        }
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Quiz => render_quiz(frame, app),
        AppScreen::Result => render_result(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let header_info = format!(
        " {} questions per round | pass mark {:.1}",
        app.config.question_count, app.config.passing_threshold,
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " termquiz ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            &*header_info,
            Style::default().fg(colors.text_dim()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout[0]);

    let menu_area = ui::layout::centered_rect(50, 80, layout[1]);
    frame.render_widget(&app.menu, menu_area);

    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " [1] Start  [c] Settings  [q] Quit ",
        Style::default().fg(colors.text_dim()),
    )]));
    frame.render_widget(footer, layout[2]);
}

fn render_quiz(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let app_layout = AppLayout::new(area);

    let answered = app.session.current_index();
    let total = app.session.question_count();
    // While feedback is showing the index has already moved past the
    // question on screen.
    let position = if app.session.state() == SessionState::Advancing {
        answered
    } else {
        answered + 1
    };

    let header_text = format!(" Score: {:.1} | Question {position}/{total}", app.session.score());
    let header = Paragraph::new(Line::from(Span::styled(
        &*header_text,
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, app_layout.header);

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(app_layout.main);

    if let Some(ref question) = app.shown_question {
        let card = QuestionCard::new(question, position, total, app.theme);
        frame.render_widget(card, main_layout[0]);
    }

    if let Some(kind) = app.feedback.banner {
        let banner = FeedbackBanner::new(kind, app.theme);
        frame.render_widget(banner, main_layout[1]);
    }

    let progress = ProgressBar::new(answered, total, app.theme);
    frame.render_widget(progress, main_layout[2]);

    let hints = if app.advancing() {
        " Next question coming up... "
    } else {
        " [y] Yes  [n] No  [s] Skip  [Esc] Menu "
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(colors.text_dim()),
    )));
    frame.render_widget(footer, app_layout.footer);
}

fn render_result(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    if let Some(ref result) = app.last_result {
        let centered = ui::layout::centered_rect(60, 60, area);
        let panel = ResultPanel::new(
            result,
            app.session.question_count(),
            app.config.passing_threshold,
            app.theme,
        );
        frame.render_widget(panel, centered);
    }
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = ui::layout::centered_rect(60, 80, area);

    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let fields: Vec<(String, String)> = vec![
        (
            "Questions per round".to_string(),
            format!("{}", app.config.question_count),
        ),
        (
            "Pass mark".to_string(),
            format!("{:.1}", app.config.passing_threshold),
        ),
        (
            "Feedback delay".to_string(),
            format!("{} ms", app.config.advance_delay_ms),
        ),
        ("Theme".to_string(), app.config.theme.clone()),
    ];

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(fields.len() as u16 * 3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        "  Use arrows to navigate, Enter/Right to change, ESC to save & exit",
        Style::default().fg(colors.text_dim()),
    )));
    header.render(layout[0], frame.buffer_mut());

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            fields
                .iter()
                .map(|_| Constraint::Length(3))
                .collect::<Vec<_>>(),
        )
        .split(layout[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_text = format!("{indicator}{label}:");
        let value_text = format!("  < {value} >");

        let label_style = Style::default()
            .fg(if is_selected {
                colors.accent()
            } else {
                colors.fg()
            })
            .add_modifier(if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            });

        let value_style = Style::default().fg(if is_selected {
            colors.warning()
        } else {
            colors.text_dim()
        });

        let lines = vec![
            Line::from(Span::styled(label_text, label_style)),
            Line::from(Span::styled(value_text, value_style)),
        ];
        Paragraph::new(lines).render(field_layout[i], frame.buffer_mut());
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        "  [ESC] Save & back  [Enter/arrows] Change value",
        Style::default().fg(colors.accent()),
    )));
    footer.render(layout[3], frame.buffer_mut());
}
