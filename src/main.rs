mod app;
mod clock;
mod domain;
mod error;
mod input;
mod logging;
mod notifications;
mod persistence;
mod session;
mod tasks;
mod timer;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use clock::IntervalClock;
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange, Event, KeyEventKind},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use domain::{ModeId, ModeRegistry};
use persistence::{
    load_settings, save_settings, DataDir, JsonFileStorage, MemoryStorage, Settings, TaskStorage,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use session::Session;
use std::io;
use tasks::TaskStore;
use timer::TimerController;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "fokus")]
#[command(about = "A terminal Pomodoro timer with a linked task list", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Initial timer mode: foco, descanso-curto or descanso-longo
    #[arg(short, long, default_value = "foco")]
    mode: String,

    /// Keep tasks in memory only; nothing is written to tasks.json
    #[arg(long)]
    ephemeral: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .fokus directory in the current directory
    Init,
    /// Print the stored task list
    List,
    /// Print the effective settings as JSON
    Settings,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let cwd = std::env::current_dir().context("Could not determine current directory")?;
            let data_dir = DataDir::init_in(&cwd)?;
            save_settings(data_dir.settings_file(), &Settings::default())?;
            println!("Initialized fokus directory: {}", data_dir.root().display());
            println!();
            println!("Fokus will now keep tasks and settings in this directory.");
            println!("Run 'fokus' to start the timer.");
            Ok(())
        }
        Some(Commands::List) => list_tasks(),
        Some(Commands::Settings) => {
            let settings = load_settings(DataDir::discover()?.settings_file())?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
        None => run_tui(&cli.mode, cli.ephemeral),
    }
}

fn list_tasks() -> Result<()> {
    let storage = JsonFileStorage::new(DataDir::discover()?.tasks_file());
    let tasks = storage
        .load()
        .with_context(|| format!("Failed to read tasks: {}", storage.path().display()))?;

    if tasks.is_empty() {
        println!("No tasks in {}", storage.path().display());
        return Ok(());
    }

    for task in &tasks {
        println!("{} {}", task.checkbox(), task.description);
    }
    Ok(())
}

fn build_app(
    data_dir: &DataDir,
    settings: Settings,
    mode: &str,
    ephemeral: bool,
) -> Result<(AppState, ModeId)> {
    let registry = ModeRegistry::new(&settings.durations);
    let initial = registry.resolve(mode)?;

    let storage: Box<dyn TaskStorage> = if ephemeral {
        Box::new(MemoryStorage::new())
    } else {
        Box::new(JsonFileStorage::new(data_dir.tasks_file()))
    };

    let timer = TimerController::new(registry, IntervalClock::default(), initial);
    let tasks = TaskStore::load(storage).context("Failed to load tasks")?;
    let session = Session::new(timer, tasks);

    Ok((AppState::new(session, settings), initial))
}

fn run_tui(mode: &str, ephemeral: bool) -> Result<()> {
    let data_dir = DataDir::open()?;
    eprintln!("Using fokus directory: {}", data_dir.root().display());

    let settings = load_settings(data_dir.settings_file())?;
    let _log_guard = logging::init_logging(&data_dir.log_dir(), &settings.log_level)?;

    let (mut app, initial) = build_app(&data_dir, settings, mode, ephemeral)?;
    info!(
        dir = %data_dir.root().display(),
        mode = initial.token(),
        ephemeral,
        "starting fokus"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!(error = %err, "terminal loop failed");
        eprintln!("Error: {}", err);
    }
    info!("fokus exited");

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let poll_rate = clock::poll_duration();
    let mut last_title = String::new();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        let title = app.window_title();
        if title != last_title {
            execute!(terminal.backend_mut(), SetTitle(&title))?;
            last_title = title;
        }

        if event::poll(poll_rate)? {
            match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_key(app, key) {
                        return Ok(());
                    }
                }
                Event::FocusLost => app.focus_lost(),
                _ => {}
            }
        }

        app.tick();

        if app.take_bell() {
            notifications::ring_bell();
        }
    }
}
