use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
        SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::{debug, info};

use pagesnap_core::{AppConfig, Controller, Hooks};
use pagesnap_tui::{
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    App, TerminalHost, Theme,
};

use super::{deck_location, load_deck};
use crate::SnapArgs;

pub async fn run(config: Arc<AppConfig>, deck_path: &Path, args: &SnapArgs) -> Result<()> {
    let deck = load_deck(deck_path).await?;
    let location = deck_location(deck_path, args.fragment.as_deref())?;
    let snap = args.apply(&config.snap);

    // Bind before touching the terminal so selector errors print normally
    let (width, height) = terminal::size()?;
    let (sections, _) = App::layout(Rect::new(0, 0, width, height));
    let host = TerminalHost::new(deck, location, &config.ui, sections.width, sections.height);
    let hooks = Hooks::new()
        .on_before_leave(|from, to| debug!(from, to, "Leaving section"))
        .on_after_load(|index| debug!(index, "Section shown"));
    let controller = Controller::new(host, &args.selector, snap, hooks)?;

    let title = deck_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "pagesnap".to_string());
    let theme = Theme::from_overrides(&config.ui.theme);
    let mut app = App::new(controller, config.clone(), theme, title);
    let keymap = Keymap::from_config(&config.keymap);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle(format!("pagesnap - {}", app.title))
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(deck = %deck_path.display(), "Viewer started");
    let result = main_loop(&mut terminal, &mut app, &keymap, &config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    info!(commits = app.controller.commit_count(), "Viewer closed");
    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    keymap: &Keymap,
    config: &AppConfig,
) -> Result<()> {
    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);

    loop {
        // Pending frames run right before painting, like animation frames
        app.run_frames();

        terminal.draw(|frame| app.draw(frame))?;

        // Poll faster while the offset is moving
        let event = if app.needs_fast_update() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };

        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    app.handle_action(action);
                }
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse),
                AppEvent::Resize(width, height) => app.resize(width, height),
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
