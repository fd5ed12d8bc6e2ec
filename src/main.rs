use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    sync::Arc,
    time::{Duration, SystemTime},
};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use iconhunt::{
    app::{App, Flow},
    app_dirs::AppDirs,
    backend::{Backend, HttpBackend, LocalBackend, RegionSource},
    config::{Config, ConfigStore, FileConfigStore},
    game::MinutesRule,
    leaderboard::Leaderboard,
    logging,
    runtime::{CrosstermEventSource, FixedTicker, GameEventSource, Runner, Ticker},
    scene::{Scene, DEFAULT_SCENE},
    store::ScoreDb,
    sync::ScoreSync,
    TICK_RATE_MS,
};
use itertools::Itertools;
use ratatui::{
    backend::{Backend as TermBackend, CrosstermBackend},
    layout::Rect,
    Terminal,
};

/// find the hidden icons in a terminal picture and race the clock
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    version,
    about,
    long_about = "Click the picture to find each hidden icon. Once everything is found your time is ranked against the five best runs."
)]
pub struct Cli {
    /// game server to fetch regions from and submit scores to (local storage when unset)
    #[clap(long)]
    server: Option<String>,

    /// region data JSON file to use instead of the bundled one
    #[clap(long)]
    regions: Option<PathBuf>,

    /// leaderboard database file
    #[clap(long)]
    db: Option<PathBuf>,

    /// how long notices stay on screen, in milliseconds
    #[clap(long)]
    notice_ms: Option<u64>,

    /// render minutes as round(total / 60), shown only above a minute, as the
    /// legacy game did (the default is whole minutes, total / 60 rounded down)
    #[clap(long)]
    rounded_minutes: bool,

    /// print the leaderboard and exit
    #[clap(long)]
    scores: bool,

    /// delete every local high score and exit
    #[clap(long)]
    clear_scores: bool,

    /// persist the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Command-line flags override the stored configuration.
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(server) = &self.server {
            cfg.server_url = Some(server.clone());
        }
        if let Some(regions) = &self.regions {
            cfg.regions_path = Some(regions.clone());
        }
        if let Some(db) = &self.db {
            cfg.db_path = Some(db.clone());
        }
        if let Some(ms) = self.notice_ms {
            cfg.notice_ms = ms;
        }
        if self.rounded_minutes {
            cfg.minutes_rule = MinutesRule::Rounded;
        }
        cfg
    }
}

fn build_backend(cfg: &Config, scene: &Scene) -> Result<Arc<dyn Backend>, Box<dyn Error>> {
    if let Some(url) = &cfg.server_url {
        tracing::info!(%url, "using remote game server");
        return Ok(Arc::new(HttpBackend::new(url.clone())));
    }

    let regions = match &cfg.regions_path {
        Some(path) => RegionSource::File(path.clone()),
        None => RegionSource::Bundled(scene.regions().clone()),
    };
    let db = ScoreDb::open(&cfg.resolved_db_path())?;
    Ok(Arc::new(LocalBackend::new(regions, db)))
}

fn format_scores(board: &Leaderboard) -> String {
    if board.is_empty() {
        return "No high scores yet".to_string();
    }
    board
        .entries()
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{:>2}. {:<20} {}", i + 1, e.display_name, e.time_display()))
        .join("\n")
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(log_path) = AppDirs::log_path() {
        if let Err(e) = logging::init_file_logging(&log_path) {
            eprintln!("logging disabled: {}", e);
        }
    }

    let store = FileConfigStore::new();
    let cfg = cli.apply(store.load());
    if cli.save_config {
        store.save(&cfg)?;
    }

    if cli.clear_scores {
        ScoreDb::open(&cfg.resolved_db_path())?.clear()?;
        println!("High scores cleared");
        return Ok(());
    }

    let scene = Scene::bundled(DEFAULT_SCENE)?;
    let backend = build_backend(&cfg, &scene)?;

    if cli.scores {
        let rt = tokio::runtime::Runtime::new()?;
        let board = rt.block_on(backend.fetch_leaderboard())?;
        println!("{}", format_scores(&board));
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let events = CrosstermEventSource::new();
    let sync = ScoreSync::new(backend, events.sender())?;
    let runner = Runner::new(events, FixedTicker::new(Duration::from_millis(TICK_RATE_MS)));
    let mut app = App::new(
        scene,
        sync,
        cfg.minutes_rule,
        Duration::from_millis(cfg.notice_ms),
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: TermBackend, E: GameEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    let size = terminal.size()?;
    app.on_resize(Rect::new(0, 0, size.width, size.height));
    app.start();

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        app.on_rendered(SystemTime::now());

        if app.handle_event(runner.step(), SystemTime::now()) == Flow::Quit {
            tracing::info!("quitting");
            break;
        }
    }

    Ok(())
}
