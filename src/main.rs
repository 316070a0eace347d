//! MathSim - a terminal-based math learning simulator.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mathsim::api::{ApiWorker, HttpMathApi};
use mathsim::app::App;
use mathsim::concepts::ConceptLibrary;
use mathsim::config::AppConfig;
use mathsim::input::InputTarget;
use mathsim::plot::{MevalEvaluator, PlotRenderer};
use mathsim::session::{Screen, SessionContext};
use mathsim::topic::{Difficulty, Topic};
use mathsim::ui;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "mathsim")]
#[command(about = "An interactive terminal math learning simulator", long_about = None)]
struct Args {
    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON concept notes to use instead of the bundled ones
    #[arg(long)]
    concepts: Option<PathBuf>,

    /// Base URL of the math API
    #[arg(long)]
    api_url: Option<String>,

    /// Open straight into a topic, by slug or name (see --list-topics)
    #[arg(long, value_parser = parse_topic)]
    topic: Option<Topic>,

    /// Difficulty to preselect along with --topic
    #[arg(long, value_parser = parse_difficulty, requires = "topic")]
    difficulty: Option<Difficulty>,

    /// Print the available topics and difficulty levels, then exit
    #[arg(long)]
    list_topics: bool,
}

fn parse_topic(name: &str) -> std::result::Result<Topic, String> {
    Topic::from_name(name).ok_or_else(|| format!("unknown topic '{}', see --list-topics", name))
}

fn parse_difficulty(name: &str) -> std::result::Result<Difficulty, String> {
    Difficulty::from_name(name)
        .ok_or_else(|| format!("unknown difficulty '{}', see --list-topics", name))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(log_file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting MathSim");
    }

    let mut config = match args.config {
        Some(ref path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(url) = args.api_url {
        config.api.base_url = url;
    }

    let concepts = match args.concepts {
        Some(ref path) => ConceptLibrary::load(path)?,
        None => ConceptLibrary::bundled()?,
    };

    if args.list_topics {
        print_catalogue(&concepts);
        return Ok(());
    }

    let plotter = PlotRenderer::new(MevalEvaluator, config.plot.clone());
    let ctx = SessionContext::new(concepts, plotter, config.practice.clone());
    let worker = ApiWorker::spawn(Box::new(HttpMathApi::new(&config.api)), config.api.retries)?;
    let mut app = App::new(ctx, Some(worker));
    if let Some(topic) = args.topic {
        app.preselect(topic, args.difficulty);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    tracing::info!("MathSim exited");

    Ok(())
}

fn print_catalogue(concepts: &ConceptLibrary) {
    for topic in Topic::ALL {
        println!("{} [{}]", topic, topic.slug());
        for difficulty in Difficulty::ALL {
            let marker = if concepts.notes(topic, difficulty).is_some() {
                "notes"
            } else {
                "-"
            };
            println!("  {:<16} {:<16} {}", difficulty.label(), difficulty.slug(), marker);
        }
    }
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        app.tick();
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Text input - handle separately
                if app.input.is_active() {
                    match key.code {
                        KeyCode::Enter => app.submit_input(),
                        KeyCode::Esc => app.input.cancel(),
                        KeyCode::Backspace => app.input.backspace(),
                        KeyCode::Char(c) => app.input.input(c),
                        _ => {},
                    }
                    continue;
                }

                // Home screen
                if app.session.screen == Screen::Home {
                    match (key.modifiers, key.code) {
                        (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(()),
                        (KeyModifiers::NONE, KeyCode::Enter) => app.start(),
                        (KeyModifiers::SHIFT, KeyCode::Char('T')) => app.cycle_theme(),
                        _ => {},
                    }
                    continue;
                }

                // Simulation screen
                match (key.modifiers, key.code) {
                    // Quit
                    (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(()),
                    (KeyModifiers::NONE, KeyCode::Esc) => app.go_home(),

                    // Selection
                    (KeyModifiers::NONE, KeyCode::Up)
                    | (KeyModifiers::NONE, KeyCode::Char('k')) => app.cursor_up(),
                    (KeyModifiers::NONE, KeyCode::Down)
                    | (KeyModifiers::NONE, KeyCode::Char('j')) => app.cursor_down(),
                    (KeyModifiers::NONE, KeyCode::Tab) => app.focus_next(),
                    (KeyModifiers::NONE, KeyCode::Enter)
                    | (KeyModifiers::NONE, KeyCode::Char('l')) => app.select_current(),
                    (KeyModifiers::NONE, KeyCode::Char('x')) => app.clear_current(),

                    // Simulation inputs
                    (KeyModifiers::NONE, KeyCode::Char('a')) => {
                        app.begin_input(InputTarget::Answer)
                    },
                    (KeyModifiers::NONE, KeyCode::Char('s')) => {
                        app.begin_input(InputTarget::Custom)
                    },
                    (KeyModifiers::NONE, KeyCode::Char('e')) => app.begin_input(InputTarget::Plot),
                    (KeyModifiers::NONE, KeyCode::Char('n')) => app.new_problem(),

                    // Scrolling
                    (KeyModifiers::CONTROL, KeyCode::Char('d'))
                    | (KeyModifiers::SHIFT, KeyCode::Char('J')) => app.scroll_down(),
                    (KeyModifiers::CONTROL, KeyCode::Char('u'))
                    | (KeyModifiers::SHIFT, KeyCode::Char('K')) => app.scroll_up(),

                    // Features
                    (KeyModifiers::SHIFT, KeyCode::Char('T')) => app.cycle_theme(),
                    (KeyModifiers::NONE, KeyCode::Char('y')) => app.copy_current(),
                    (KeyModifiers::SHIFT, KeyCode::Char('?')) => {
                        app.status = "Help: Tab/jk/Enter=select, a=answer, s=solve, e=graph, n=new problem, T=theme, y=copy, Esc=home".to_string();
                    },

                    _ => {},
                }
            }
        }
    }
}
