use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use class_timetable::{
    app::{AppState, Mode},
    controller,
    export::{self, ExportOptions},
    form::FormOptions,
    input::{command_mode::{self, Command}, insert_mode, normal_mode},
    storage::config::{Config, StoreBackend},
    sync::sync_engine::SyncEngine,
    ui::theme::Theme,
};
use crate::tui::presentation::ui;

const INPUT_POLL: Duration = Duration::from_millis(50);

pub async fn run_tui(local: bool) -> Result<(), io::Error> {
    let config = Config::load_or_create()
        .map_err(|e| io::Error::other(e.to_string()))?;
    let backend = if local { StoreBackend::Local } else { config.store.backend };
    let sync_engine = SyncEngine::from_config(&config, backend)
        .map_err(|e| io::Error::other(e.to_string()))?;
    let export_options = ExportOptions::from_config(&config.export)
        .map_err(|e| io::Error::other(e.to_string()))?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let theme = Theme::get_by_name(&config.ui.theme);
    let mut app = AppState::new()
        .with_theme(theme)
        .with_form_options(FormOptions::from(&config.form));

    app.set_loading(true);
    terminal.draw(|f| ui(f, &app)).ok();
    controller::reload(&mut app, &sync_engine).await;

    let res = run_app(&mut terminal, &mut app, &sync_engine, &export_options).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    sync_engine: &SyncEngine,
    export_options: &ExportOptions,
) -> io::Result<()> {
    let mut subscription = sync_engine.subscribe();

    loop {
        while let Some(snapshot) = subscription.try_next() {
            if app.apply_snapshot(snapshot, Instant::now()) {
                tracing::debug!("Applied change notification");
            }
        }
        app.tick(Instant::now());

        if app.take_dirty() || app.loading {
            terminal.draw(|f| ui(f, app))?;
        }

        if !event::poll(INPUT_POLL)? {
            continue;
        }

        match event::read()? {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                app.mark_dirty();
                if handle_key(key.code, app, terminal, sync_engine, export_options).await? {
                    return Ok(());
                }
            }
            TermEvent::Resize(_, _) => app.mark_dirty(),
            _ => {}
        }
    }
}

async fn handle_key<B: Backend>(
    code: KeyCode,
    app: &mut AppState,
    terminal: &mut Terminal<B>,
    sync_engine: &SyncEngine,
    export_options: &ExportOptions,
) -> io::Result<bool> {
    if app.alert.is_some() {
        app.dismiss_alert();
        return Ok(false);
    }

    match app.mode {
        Mode::Normal => {
            app.status_message = None;
            if app.show_help {
                handle_help_keys(code, app);
                Ok(false)
            } else if let Some(cmd) = normal_mode::handle_key(code, app) {
                run_command(cmd, app, terminal, sync_engine, export_options).await
            } else {
                Ok(false)
            }
        }
        Mode::Command => handle_command_mode(code, app, terminal, sync_engine, export_options).await,
        Mode::Insert => {
            handle_insert_mode(code, app, terminal, sync_engine).await?;
            Ok(false)
        }
        Mode::Confirm => {
            handle_delete_confirmation(code, app, terminal, sync_engine).await?;
            Ok(false)
        }
    }
}

fn handle_help_keys(code: KeyCode, app: &mut AppState) {
    match code {
        KeyCode::Char('j') => {
            app.help_scroll = app.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') => {
            app.help_scroll = app.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Esc => {
            app.show_help = false;
            app.help_scroll = 0;
        }
        _ => {}
    }
}

async fn handle_command_mode<B: Backend>(
    code: KeyCode,
    app: &mut AppState,
    terminal: &mut Terminal<B>,
    sync_engine: &SyncEngine,
    export_options: &ExportOptions,
) -> io::Result<bool> {
    match code {
        KeyCode::Enter => {
            let cmd = command_mode::parse_command(&app.command_buffer);
            app.command_buffer.clear();
            app.mode = Mode::Normal;
            run_command(cmd, app, terminal, sync_engine, export_options).await
        }
        KeyCode::Esc => {
            app.command_buffer.clear();
            app.mode = Mode::Normal;
            Ok(false)
        }
        KeyCode::Backspace => {
            app.command_buffer.pop();
            if app.command_buffer.is_empty() {
                app.mode = Mode::Normal;
            }
            Ok(false)
        }
        KeyCode::Char(c) => {
            app.command_buffer.push(c);
            Ok(false)
        }
        _ => Ok(false)
    }
}

async fn run_command<B: Backend>(
    cmd: Command,
    app: &mut AppState,
    terminal: &mut Terminal<B>,
    sync_engine: &SyncEngine,
    export_options: &ExportOptions,
) -> io::Result<bool> {
    match cmd {
        Command::Quit => return Ok(true),
        Command::Write => {
            show_loading(app, terminal)?;
            controller::push(app, sync_engine).await;
        }
        Command::Reload => {
            show_loading(app, terminal)?;
            controller::reload(app, sync_engine).await;
        }
        Command::Export => {
            if let Err(e) = export::export_timetable(app, export_options, ui) {
                tracing::debug!("Export command failed: {}", e);
            }
        }
        Command::NewClass(subject) => app.open_add_form(subject),
        Command::Theme(theme_name) => {
            app.theme = Theme::get_by_name(&theme_name);
        }
        Command::Help => {
            app.show_help = !app.show_help;
        }
        Command::Error(message) => {
            tracing::info!("Rejected command: {}", message);
            app.set_status_message(message);
        }
    }
    Ok(false)
}

async fn handle_insert_mode<B: Backend>(
    code: KeyCode,
    app: &mut AppState,
    terminal: &mut Terminal<B>,
    sync_engine: &SyncEngine,
) -> io::Result<()> {
    match code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => {
            if app.is_interactive() {
                show_loading(app, terminal)?;
                let outcome = controller::submit_class_form(app, sync_engine).await;
                tracing::debug!("Class form submitted: {:?}", outcome);
            }
        }
        _ => insert_mode::handle_key(code, app),
    }
    Ok(())
}

async fn handle_delete_confirmation<B: Backend>(
    code: KeyCode,
    app: &mut AppState,
    terminal: &mut Terminal<B>,
    sync_engine: &SyncEngine,
) -> io::Result<()> {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(target) = app.delete_confirmation.clone() {
                show_loading(app, terminal)?;
                controller::delete_entry(app, sync_engine, &target).await;
            }
            app.mode = Mode::Normal;
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.delete_confirmation = None;
            app.mode = Mode::Normal;
        }
        _ => {}
    }
    Ok(())
}

fn show_loading<B: Backend>(app: &mut AppState, terminal: &mut Terminal<B>) -> io::Result<()> {
    app.set_loading(true);
    terminal.draw(|f| ui(f, app))?;
    Ok(())
}
