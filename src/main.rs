use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};

use labyrinth::config::Config;
use labyrinth::editor::MapEditor;
use labyrinth::game::{Outcome, Session};
use labyrinth::journal::{close_or_warn, write_or_warn, Journal};
use labyrinth::loader::{list_maps, load_maze, load_riddles};
use labyrinth::menu::{choose_map, main_menu, Console, MainChoice};
use labyrinth::report::{self, MissionReport};
use labyrinth::tui;

#[derive(Parser)]
#[command(name = "labyrinth")]
#[command(about = "Find the treasure at the heart of the maze")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, default_value = "labyrinth.toml", global = true)]
    config: PathBuf,

    /// Map file, overriding the configured one
    #[arg(long, global = true)]
    map: Option<PathBuf>,

    /// Riddle file, overriding the configured one
    #[arg(long, global = true)]
    riddles: Option<PathBuf>,

    /// Verbose logging (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a map straight away
    Play {
        /// Player name; repeat for hot-seat play in turn order
        #[arg(short, long)]
        name: Vec<String>,
    },
    /// Open the map editor
    Edit,
    /// Check that a map can be won and print its routes
    Validate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load_or_default(&cli.config)?;
    if let Some(map) = cli.map {
        config.paths.map = map;
    }
    if let Some(riddles) = cli.riddles {
        config.paths.riddles = riddles;
    }
    init_logging(&config, cli.verbose);
    info!("Starting labyrinth v{}", env!("CARGO_PKG_VERSION"));

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    match cli.command {
        Some(Commands::Play { name }) => {
            let names = if name.is_empty() { ask_names(&mut console)? } else { name };
            let map = config.paths.map.clone();
            play(&config, &map, &names)?;
        }
        Some(Commands::Edit) => {
            MapEditor::new(&mut console, &config.paths.maps_dir).run()?;
        }
        Some(Commands::Validate) => validate(&config.paths.map, &config.paths.riddles),
        None => menu_loop(&config, console)?,
    }
    Ok(())
}

fn menu_loop<R: io::BufRead, W: Write>(config: &Config, mut console: Console<R, W>) -> Result<()> {
    console.say("Labyrinth of Glory!")?;
    loop {
        match main_menu(&mut console)? {
            MainChoice::NewGame => {
                let maps = list_maps(&config.paths.maps_dir);
                let Some(map) = choose_map(&mut console, &maps, &config.paths.maps_dir)? else {
                    continue;
                };
                let names = ask_names(&mut console)?;
                if let Err(e) = play(config, &map, &names) {
                    console.say(&format!("The game stopped: {:#}", e))?;
                }
            }
            MainChoice::Editor => {
                MapEditor::new(&mut console, &config.paths.maps_dir).run()?;
            }
            MainChoice::Exit => {
                console.say("Thanks for playing!")?;
                return Ok(());
            }
        }
    }
}

fn ask_names<R: io::BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Vec<String>> {
    let count = console
        .read_choice("How many players (1-4)? ", 4)?
        .unwrap_or(1)
        .max(1) as usize;
    let mut names = Vec::with_capacity(count);
    for seat in 1..=count {
        let name = console
            .read_line(&format!("Player {} name: ", seat))?
            .unwrap_or_default();
        names.push(if name.is_empty() { format!("Adventurer {}", seat) } else { name });
    }
    Ok(names)
}

fn play(config: &Config, map: &Path, names: &[String]) -> Result<()> {
    let riddles = load_riddles(&config.paths.riddles);
    let maze = load_maze(map, riddles);
    let validation = maze.validate();
    if !validation.is_playable() {
        println!("{} cannot be played: {}", map.display(), describe(&validation));
        return Ok(());
    }
    let map_name = maze.name().unwrap_or("Unknown map").to_string();

    let mut journal = match Journal::open(&config.paths.journal) {
        Ok(journal) => Some(journal),
        Err(e) => {
            warn!("playing without a journal: {:#}", e);
            None
        }
    };
    write_or_warn(&mut journal, |j| {
        j.record(&format!("{} entering '{}'", names.join(", "), map_name))
    });

    let session = Session::with_players(maze, names, config.player.starting_health)?;
    let session = tui::play(session)?;

    for mission in MissionReport::for_every_player(&session) {
        match report::export(&mission, &config.paths.reports_dir) {
            Ok(path) => println!("Mission report saved to {}", path.display()),
            Err(e) => eprintln!("Could not save the mission report: {:#}", e),
        }
    }

    write_or_warn(&mut journal, |j| j.record_session_end(&session, &map_name));
    close_or_warn(journal);

    match session.outcome() {
        Outcome::Victory => println!(
            "\nCongratulations, {}! The treasure is yours.\n",
            session.player().name()
        ),
        Outcome::Defeat => println!("\nGame over. The maze claimed another victim.\n"),
        Outcome::Abandoned | Outcome::InProgress => println!("\nYou leave the maze behind.\n"),
    }
    Ok(())
}

fn validate(map: &Path, riddles: &Path) {
    let maze = load_maze(map, load_riddles(riddles));
    print!("{}", maze);
    let validation = maze.validate();
    println!("\n{}", describe(&validation));

    let (Some(entrance), Some(treasure)) = (maze.entrance(), maze.treasure_room()) else {
        return;
    };
    match maze.find_path(&entrance.id, &treasure.id) {
        Ok(Some(path)) => println!("First path found: {} (cost {})", path.ids().join(" -> "), path.cost),
        Ok(None) => println!("No path from {} to {}", entrance.id, treasure.id),
        Err(e) => println!("Path search failed: {}", e),
    }
    if let Ok(Some(path)) = maze.shortest_path(&entrance.id, &treasure.id) {
        println!("Cheapest path: {} (cost {})", path.ids().join(" -> "), path.cost);
    }
}

fn describe(validation: &labyrinth::maze::Validation) -> String {
    if validation.is_playable() {
        let mut text = "the treasure can be reached".to_string();
        if !validation.unreachable_rooms.is_empty() {
            text.push_str(&format!(
                " (unreachable rooms: {})",
                validation.unreachable_rooms.join(", ")
            ));
        }
        return text;
    }
    if !validation.has_entrance {
        "no entrance".to_string()
    } else if !validation.has_treasure {
        "no treasure room".to_string()
    } else {
        "the treasure cannot be reached from the entrance".to_string()
    }
}

fn init_logging(config: &Config, verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    let level = match verbosity {
        0 => config.logging.level_filter(),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(level);
    builder.format(|fmt, record| {
        writeln!(
            fmt,
            "{} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.args()
        )
    });
    if let Some(file) = config.logging.log_file() {
        if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
            let _ = std::fs::create_dir_all(parent);
        }
        match std::fs::OpenOptions::new().create(true).append(true).open(file) {
            Ok(f) => {
                builder.target(env_logger::Target::Pipe(Box::new(f)));
            }
            Err(e) => eprintln!("cannot open log file {}: {}", file.display(), e),
        }
    }
    let _ = builder.try_init();
}
