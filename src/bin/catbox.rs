// Native binary for catbox - Terminal UI mode

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use catbox::{
    api::CatApi,
    app::App,
    config::load,
    fetch_worker, platform,
    storage::{KvStore, MemoryStore, SqliteStore},
    types::{AppEvent, FetchRequest},
    ui, FavoritesStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (safe to ignore if not found)
    let _ = dotenvy::dotenv();

    let cfg = load().context("Failed to load configuration")?;
    platform::init_logging(&cfg.log_file)?;
    cfg.print_summary();

    // Favorites survive restarts in SQLite; fall back to memory for this session
    let store: Box<dyn KvStore> = match SqliteStore::open(&cfg.favorites_db_path) {
        Ok(db) => Box::new(db),
        Err(e) => {
            log::warn!("[storage] {e:#}; favorites will not be saved this session");
            Box::new(MemoryStore::new())
        }
    };
    let favorites = FavoritesStore::new(store);

    // app + channels
    let (event_tx, event_rx) = unbounded_channel::<AppEvent>();
    let (fetch_tx, fetch_rx) = unbounded_channel::<FetchRequest>();
    let worker = tokio::spawn(fetch_worker::run_fetch_worker(
        CatApi::from_config(&cfg),
        fetch_rx,
        event_tx,
    ));

    let mut app = App::new(cfg.render_fps, cfg.theme, favorites, Some(fetch_tx));
    app.fetch_breeds();
    app.fetch_fact();

    // terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // main loop
    let result = run_loop(&mut app, &mut terminal, event_rx).await;

    // cleanup
    worker.abort();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    log::info!("[main] bye ({} favorites saved)", app.favorites().len());
    result
}

async fn run_loop(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut rx: UnboundedReceiver<AppEvent>,
) -> Result<()> {
    let mut last_frame = Instant::now();

    loop {
        // frame budget (coalesced renders)
        let frame_ms = 1000u32.saturating_div(app.fps()) as u64;
        let budget = Duration::from_millis(frame_ms.max(1));
        let wait = budget.saturating_sub(last_frame.elapsed());

        // input or fetch results
        if event::poll(wait)? {
            if let Event::Key(k) = event::read()? {
                if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat {
                    handle_key(app, k);
                }
            }
        }
        while let Ok(ev) = rx.try_recv() {
            app.on_event(ev);
        }

        if last_frame.elapsed() >= budget {
            terminal.draw(|f| ui::draw(f, app))?;
            last_frame = Instant::now();
        }
        if app.quit_flag() {
            break;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, k: KeyEvent) {
    match (k.code, k.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.on_event(AppEvent::Quit);
        }

        (KeyCode::Tab, _) => app.next_pane(),
        (KeyCode::BackTab, _) => app.prev_pane(),

        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.up(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.down(),
        (KeyCode::Enter, _) => app.activate(),

        // fetch
        (KeyCode::Char('f'), _) => app.fetch_fact(),
        (KeyCode::Char('i'), _) => app.fetch_image(),

        // favorites
        (KeyCode::Char('F'), _) => {
            if app.favorite_fact().is_none() {
                app.show_toast("No fact to favorite yet (press f)");
            }
        }
        (KeyCode::Char('I'), _) => {
            if app.favorite_image().is_none() {
                app.show_toast("No image to favorite yet (press i)");
            }
        }
        // Removes the favorite under the cursor from any pane
        (KeyCode::Char('x'), _) | (KeyCode::Delete, _) => {
            if app.remove_selected_favorite() {
                app.show_toast("Removed from favorites");
            } else {
                app.show_toast("No favorite selected");
            }
        }
        (KeyCode::Char('C'), _) => app.clear_favorites(),

        (KeyCode::Char('c'), _) => match app.copy_content() {
            Some(text) if platform::copy_to_clipboard(&text) => app.show_toast("Copied to clipboard"),
            Some(_) => app.show_error("Clipboard unavailable"),
            None => app.show_toast("Nothing to copy"),
        },

        (KeyCode::Esc, _) => {
            if app.selected_breed().is_some() {
                app.clear_breed_filter();
                app.show_toast("Breed filter cleared");
            } else {
                app.dismiss_toast();
            }
        }
        _ => {}
    }
}
