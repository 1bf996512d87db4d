use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Instant;
use tokio::sync::mpsc;

use super::app::{App, Completion, ListFocus};
use super::render::render_ui;
use crate::api::ApiGateway;
use crate::constants::{COMPLETION_CHANNEL_CAPACITY, EVENT_POLL_MILLIS};
use crate::router::Route;

/// Run the terminal UI
pub async fn run_ui(mut app: App, gateway: ApiGateway) -> Result<()> {
    // Check if we have an interactive terminal
    if !crossterm::tty::IsTty::is_tty(&io::stdout()) {
        eprintln!("stablehand requires an interactive terminal.");
        eprintln!("Cannot run in non-interactive mode (pipes, redirects, etc.)");
        return Err(anyhow::anyhow!("No interactive terminal available"));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Channel through which spawned requests report back
    let (tx, mut rx) = mpsc::channel::<Completion>(COMPLETION_CHANNEL_CAPACITY);

    let res = run_app(&mut terminal, &mut app, gateway, tx, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    gateway: ApiGateway,
    tx: mpsc::Sender<Completion>,
    rx: &mut mpsc::Receiver<Completion>,
) -> Result<()> {
    // Entry point; the guard resolves it to /login or /horses
    let initial = app.navigate(Route::Root);
    dispatch(initial, app.nav_gen, &gateway, &tx);

    let mut last_tick = Instant::now();

    while app.running {
        terminal.draw(|f| render_ui(f, app))?;

        // Apply completed requests; stale generations fall out here
        while let Ok(completion) = rx.try_recv() {
            if let Some(follow_up) = app.apply(completion) {
                let target = app.navigate(follow_up);
                dispatch(target, app.nav_gen, &gateway, &tx);
            }
        }

        // Advance notification countdowns
        let elapsed = last_tick.elapsed().as_millis() as i64;
        if elapsed > 0 {
            app.notices.with(|center| center.tick(elapsed));
            last_tick = Instant::now();
        }

        if event::poll(std::time::Duration::from_millis(EVENT_POLL_MILLIS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key, &gateway, &tx);
                }
            }
        }
    }

    Ok(())
}

/// Spawn the fetch a page needs on entry. Routes without a fetch are no-ops.
fn dispatch(route: Route, nav_gen: u64, gateway: &ApiGateway, tx: &mpsc::Sender<Completion>) {
    match route {
        Route::Horses => {
            let gateway = gateway.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = gateway.fetch_horses().await;
                let _ = tx.send(Completion::Horses { nav_gen, result }).await;
            });
        }
        Route::HorseDetails(id) => {
            let gateway = gateway.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = gateway.get_horse(id).await;
                let _ = tx.send(Completion::Horse { nav_gen, result }).await;
            });
        }
        _ => {}
    }
}

fn handle_key(app: &mut App, key: KeyEvent, gateway: &ApiGateway, tx: &mpsc::Sender<Completion>) {
    // Chords that work on every authenticated page
    if key.modifiers.contains(KeyModifiers::CONTROL) && app.route != Route::Login {
        match key.code {
            KeyCode::Char('t') => {
                app.theme.toggle();
                return;
            }
            KeyCode::Char('l') => {
                let target = app.navigate(Route::Logout);
                dispatch(target, app.nav_gen, gateway, tx);
                return;
            }
            KeyCode::Char('n') => {
                // Focus the notification panel: freezes auto-dismiss
                app.notices.with(|center| {
                    let paused = center.is_paused();
                    center.set_paused(!paused);
                });
                return;
            }
            KeyCode::Char('c') => {
                app.quit();
                return;
            }
            _ => {}
        }
    }

    match app.route {
        Route::Login => handle_login_key(app, key, gateway, tx),
        Route::Horses => handle_horses_key(app, key, gateway, tx),
        Route::HorseDetails(_) => handle_detail_key(app, key, gateway, tx),
        _ => {}
    }
}

fn handle_login_key(
    app: &mut App,
    key: KeyEvent,
    gateway: &ApiGateway,
    tx: &mpsc::Sender<Completion>,
) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('p') => app.login.toggle_show_password(),
            KeyCode::Char('c') => app.quit(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login.switch_focus();
        }
        KeyCode::Enter => {
            // Submit stays locked while a request is outstanding
            if !app.login.submitting && app.login.validate() {
                app.login.submitting = true;
                let email = app.login.email_value();
                let password = app.login.password_value();
                let nav_gen = app.nav_gen;
                let gateway = gateway.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = gateway.login(&email, &password).await;
                    let _ = tx.send(Completion::Login { nav_gen, result }).await;
                });
            }
        }
        _ => {
            match app.login.focus {
                super::form::LoginField::Email => {
                    app.login.email.input(key);
                }
                super::form::LoginField::Password => {
                    app.login.password.input(key);
                }
            };
        }
    }
}

fn handle_horses_key(
    app: &mut App,
    key: KeyEvent,
    gateway: &ApiGateway,
    tx: &mpsc::Sender<Completion>,
) {
    match app.list.focus {
        ListFocus::Table => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => app.quit(),
            KeyCode::Tab => app.list.focus = ListFocus::Search,
            KeyCode::BackTab => app.list.focus = ListFocus::Breed,
            KeyCode::Up => app.list.select_prev(),
            KeyCode::Down => app.list.select_next(),
            KeyCode::Left => app.list.prev_page(),
            KeyCode::Right => app.list.next_page(),
            KeyCode::Char('x') => app.notices.with(|center| center.dismiss_oldest()),
            KeyCode::Enter => {
                if let Some(horse) = app.list.selected_horse() {
                    let target = app.navigate(Route::HorseDetails(horse.id));
                    dispatch(target, app.nav_gen, gateway, tx);
                }
            }
            _ => {}
        },
        ListFocus::Search => match key.code {
            KeyCode::Esc | KeyCode::Enter => app.list.focus = ListFocus::Table,
            KeyCode::Tab => app.list.focus = ListFocus::Breed,
            KeyCode::BackTab => app.list.focus = ListFocus::Table,
            _ => {
                let before = app.list.search_term();
                app.list.search.input(key);
                if app.list.search_term() != before {
                    app.list.on_filter_changed();
                }
            }
        },
        ListFocus::Breed => match key.code {
            KeyCode::Esc | KeyCode::Enter => app.list.focus = ListFocus::Table,
            KeyCode::Tab => app.list.focus = ListFocus::Table,
            KeyCode::BackTab => app.list.focus = ListFocus::Search,
            _ => {
                let before = app.list.breed_term();
                app.list.breed.input(key);
                if app.list.breed_term() != before {
                    app.list.on_filter_changed();
                }
            }
        },
    }
}

fn handle_detail_key(
    app: &mut App,
    key: KeyEvent,
    gateway: &ApiGateway,
    tx: &mpsc::Sender<Completion>,
) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Esc | KeyCode::Backspace => {
            let target = app.navigate(Route::Horses);
            dispatch(target, app.nav_gen, gateway, tx);
        }
        KeyCode::Up => app.detail.scroll = app.detail.scroll.saturating_sub(1),
        KeyCode::Down => app.detail.scroll = app.detail.scroll.saturating_add(1),
        KeyCode::PageUp => app.detail.scroll = app.detail.scroll.saturating_sub(10),
        KeyCode::PageDown => app.detail.scroll = app.detail.scroll.saturating_add(10),
        KeyCode::Char('x') => app.notices.with(|center| center.dismiss_oldest()),
        _ => {}
    }
}
