use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use larder::{
    client::GatewayClient,
    logging,
    state::{Action, Effect, Session},
    store::SqliteStore,
    tui::{
        self,
        app::{AppAction, LarderApp},
    },
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "larder_tui", about = "Find recipes for what's in your kitchen")]
struct Args {
    /// Gateway to send searches to
    #[arg(long, env = "LARDER_SERVER_URL", default_value = "http://127.0.0.1:3001")]
    server_url: String,

    /// Where saved recipes, the grocery list and the theme are kept
    #[arg(long, env = "LARDER_DATABASE_URL", default_value = "sqlite://larder.db")]
    database_url: String,

    /// Write logs here; without it nothing is logged
    #[arg(long)]
    log_file: Option<PathBuf>,
}

type Backend = CrosstermBackend<std::io::Stdout>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // The terminal is ours, so logs can only go to a file
    if let Some(path) = &args.log_file {
        logging::init_file(path)?;
    }

    let store = SqliteStore::connect(&args.database_url).await?;
    let mut session = Session::open(store).await?;
    let client = GatewayClient::new(&args.server_url);
    info!(server_url = %args.server_url, "client started");

    let mut app = LarderApp::new();
    if let Some(warning) = session.warnings().first() {
        app.set_notice(format!("Stored data was reset: {warning}"));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, &mut app, &mut session, &client).await;

    // Cleanup terminal, even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    session.into_store().close().await;
    result
}

async fn run(
    terminal: &mut Terminal<Backend>,
    app: &mut LarderApp,
    session: &mut Session<SqliteStore>,
    client: &GatewayClient,
) -> anyhow::Result<()> {
    let (results_tx, mut results_rx) = mpsc::unbounded_channel::<Action>();

    loop {
        terminal.draw(|f| app.render(session.state(), f))?;

        // Gateway results arrive as actions from spawned tasks
        while let Ok(action) = results_rx.try_recv() {
            dispatch(app, session, client, &results_tx, action).await;
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key.code, session.state()) {
            AppAction::Continue => {}
            AppAction::Exit => return Ok(()),
            AppAction::Dispatch(action) => {
                dispatch(app, session, client, &results_tx, action).await;
            }
        }
    }
}

/// A failed save leaves the session unchanged; say so and keep running
async fn dispatch(
    app: &mut LarderApp,
    session: &mut Session<SqliteStore>,
    client: &GatewayClient,
    results: &mpsc::UnboundedSender<Action>,
    action: Action,
) {
    match session.dispatch(action).await {
        Ok(Some(effect)) => spawn_effect(client, effect, results),
        Ok(None) => {}
        Err(error) => {
            error!(%error, "failed to save client state");
            app.set_notice(format!("Could not save changes: {error}"));
        }
    }
}

fn spawn_effect(client: &GatewayClient, effect: Effect, results: &mpsc::UnboundedSender<Action>) {
    let client = client.clone();
    let results = results.clone();
    tokio::spawn(async move {
        let action = tui::perform(&client, effect).await;
        // The receiver only goes away on exit
        let _ = results.send(action);
    });
}
