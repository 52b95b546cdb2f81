use std::io;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use miette::{IntoDiagnostic, WrapErr};
use ratatui::{backend::CrosstermBackend, Terminal};

use quest_viewer::cli::{export_html, Command, USAGE};
use quest_viewer::config::AppConfig;
use quest_viewer::core::logging;
use quest_viewer::core::quest::{self, store, QuestStore};
use quest_viewer::tui::app::AppState;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let command = Command::parse(std::env::args().skip(1))?;

    // The TUI owns the terminal, so it only logs to file
    let _log_guard = match command {
        Command::Tui => logging::init_tui(),
        _ => logging::init(),
    };
    log::info!("{} v{} starting", quest_viewer::NAME, quest_viewer::VERSION);

    let config = AppConfig::load();

    match command {
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::List => {
            load_store(&config)?;
            print_quest_list();
            Ok(())
        }
        Command::Html {
            quest_id,
            narrow,
            output,
        } => {
            let store = load_store(&config)?;
            export_html(
                store,
                quest_id,
                narrow,
                output.as_deref(),
                &mut io::stdout().lock(),
            )
        }
        Command::Tui => {
            let store = load_store(&config)?;
            run_tui(store, &config).await
        }
    }
}

/// Load the configured data file (or the bundled set) and install it.
fn load_store(config: &AppConfig) -> miette::Result<&'static QuestStore> {
    let loaded = match &config.data.quest_file {
        Some(path) => QuestStore::from_path(path)
            .wrap_err_with(|| format!("Failed to load {}", path.display()))?,
        None => QuestStore::bundled()?,
    };
    Ok(store::init(loaded)?)
}

fn print_quest_list() {
    for (id, chapter) in quest::quest_list() {
        let enemies = match quest::quest_data(*id) {
            Some(record) => format!("{:>3} enemies", record.enemy_count()),
            None => "    no data".to_string(),
        };
        println!("{id:>8}  {enemies}  {}", chapter.label());
    }
}

async fn run_tui(store: &'static QuestStore, config: &AppConfig) -> miette::Result<()> {
    // Setup terminal
    enable_raw_mode().into_diagnostic()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).into_diagnostic()?;
    if config.tui.mouse_enabled {
        execute!(stdout, EnableMouseCapture).into_diagnostic()?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).into_diagnostic()?;

    // Run the app
    let mut app = AppState::new(store, config);
    let result = app
        .run(&mut terminal, Duration::from_millis(config.tui.tick_rate_ms))
        .await;

    // Restore terminal
    disable_raw_mode().into_diagnostic()?;
    if config.tui.mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture).into_diagnostic()?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen).into_diagnostic()?;
    terminal.show_cursor().into_diagnostic()?;

    if let Err(e) = result {
        logging::print_error(&format!("Terminal UI failed: {e}"));
        return Err(e).into_diagnostic();
    }

    log::info!("Exiting");
    Ok(())
}
