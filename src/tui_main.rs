use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use dropzone::{
    config::Settings,
    models::ProtocolInfo,
    tui::{
        app::{InputMode, Screen},
        ui, App, Event as TuiEvent, EventHandler,
    },
};

pub fn run_tui(settings: Settings, protocol: ProtocolInfo) -> Result<()> {
    let mut app = App::new(settings);
    app.session.set_protocol(protocol)?;
    app.recompute();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(250);

    terminal.clear()?;

    let res = run_app(&mut terminal, &mut app, events);

    // Always restore terminal state, even if there was an error
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Application error: {}", err);
        Err(err)
    } else {
        Ok(())
    }
}

/// Installs a subscriber that discards output so logs do not draw over the screen.
pub fn disable_logging_output() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

    let null_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::sink)
        .with_filter(tracing_subscriber::filter::LevelFilter::OFF);

    let _ = tracing_subscriber::registry()
        .with(null_layer)
        .try_init();
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: EventHandler,
) -> Result<()> {
    loop {
        if app.should_quit {
            return Ok(());
        }

        terminal.draw(|f| ui::draw(f, app))?;

        let event = match events.next() {
            Ok(event) => event,
            Err(e) => return Err(anyhow::anyhow!("Input channel closed: {}", e)),
        };

        match event {
            TuiEvent::Key(key) => handle_key(app, key),
            TuiEvent::Resize(_, _) | TuiEvent::Tick => {}
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    match app.current_screen {
        Screen::Form => match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Tab => app.toggle_focus(),
                KeyCode::Char('m') => app.toggle_mode(),
                KeyCode::Char('a') => app.add_row(),
                KeyCode::Delete | KeyCode::Char('d') => app.remove_selected_row(),
                KeyCode::Char('r') => app.reset(),
                KeyCode::Char('c') => app.show_comparison(),
                KeyCode::Up => app.move_selection_up(),
                KeyCode::Down => app.move_selection_down(),
                KeyCode::Left => app.adjust(false),
                KeyCode::Right => app.adjust(true),
                KeyCode::Enter | KeyCode::Char(' ') => app.begin_edit(),
                _ => {}
            },
            InputMode::Editing => match key.code {
                KeyCode::Esc => app.cancel_edit(),
                KeyCode::Enter => app.commit_edit(),
                KeyCode::Char(c) => app.current_input.push(c),
                KeyCode::Backspace => {
                    app.current_input.pop();
                }
                _ => {}
            },
        },
        Screen::Comparison => match key.code {
            KeyCode::Char('b') | KeyCode::Esc => app.back_to_form(),
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Up => app.scroll_comparison(false),
            KeyCode::Down => app.scroll_comparison(true),
            _ => {}
        },
    }
}
