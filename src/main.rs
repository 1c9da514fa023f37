use crossterm::{
    event::{
        DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use study_tools::{
    draw_app, file_io, handle_key, insert_text, logger, spawn_request, App, BackendResponse,
    Config, HttpBackend, StudyBackend,
};
use tokio::sync::mpsc;
use tracing::{error, info};

const SPINNER_INTERVAL: Duration = Duration::from_millis(120);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let _log_guard = logger::init(&config.log_file, &config.log_filter)?;
    info!(backend = %config.backend_url, "starting study tools");

    let backend: Arc<dyn StudyBackend> = Arc::new(HttpBackend::new(&config)?);
    let mut app = App::new(config);

    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        let text = file_io::load_input_file(&path)?;
        info!(path = %path.display(), "loaded input file");
        app.controller.set_input(text);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, &mut app, backend).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "terminal loop failed");
    }
    info!("exiting");
    Ok(result?)
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    backend: Arc<dyn StudyBackend>,
) -> io::Result<()> {
    let (response_tx, mut response_rx) = mpsc::unbounded_channel::<BackendResponse>();
    let mut events = EventStream::new();
    let mut spinner = tokio::time::interval(SPINNER_INTERVAL);

    loop {
        terminal.draw(|f| draw_app(f, app))?;

        tokio::select! {
            Some(response) = response_rx.recv() => {
                app.apply_response(response);
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if let Some(request) = handle_key(app, key) {
                        spawn_request(Arc::clone(&backend), request, response_tx.clone());
                    }
                }
                Some(Ok(Event::Paste(text))) => insert_text(app, &text),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => return Ok(()),
            },
            _ = spinner.tick(), if app.is_busy() => {
                app.advance_spinner();
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
