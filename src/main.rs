use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

use peakly::config::Config;
use peakly::location::{format_coords, is_unbounded};
use peakly::skills::Discipline;

/// Peakly: place, language and grade lookups for climbing partner search.
///
/// Results are printed as JSON on stdout; diagnostics go to stderr.
///
/// Examples:
///   peakly search inns
///   peakly known Zürich
///   peakly distance Berlin Munich
///   peakly languages deu
///   peakly skills "Ice climbing"
///   peakly serve --port 3030
#[derive(Parser)]
#[command(name = "peakly", version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/peakly/config.json).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Autocomplete place names (case-insensitive substring).
    Search { query: String },
    /// Check whether a place name is known. Exits 1 if not.
    Known { name: String },
    /// Great-circle distance in km between two places.
    Distance { from: String, to: String },
    /// List languages, optionally filtered by native name, name or code.
    Languages { query: Option<String> },
    /// Show grade scales for one discipline, or all of them.
    Skills { discipline: Option<String> },
    /// Run the JSON HTTP API.
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Serialize)]
struct DistanceOutput<'a> {
    from: &'a str,
    to: &'a str,
    distance_km: Option<f64>,
}

#[derive(Serialize)]
struct SkillOutput {
    discipline: Discipline,
    german: &'static str,
    levels: Vec<LevelOutput>,
}

#[derive(Serialize)]
struct LevelOutput {
    grade: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'static str>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("peakly=info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Search { query } => {
            let places = config.place_index()?;
            print_json(&places.search_places(&query))?;
        }
        Command::Known { name } => {
            let places = config.place_index()?;
            let Some(place) = places.find_place(&name) else {
                eprintln!("  Unknown place: '{}'", name);
                return Ok(ExitCode::FAILURE);
            };
            eprintln!("  \u{1F4CD} {}  ({})", place, format_coords(place.lat, place.lon));
            print_json(place)?;
        }
        Command::Distance { from, to } => {
            let places = config.place_index()?;
            let d = places.distance_km(&from, &to);
            if is_unbounded(d) {
                eprintln!("  No distance: '{}' or '{}' is not a known place", from, to);
            }
            print_json(&DistanceOutput {
                from: &from,
                to: &to,
                distance_km: (!is_unbounded(d)).then_some(d),
            })?;
        }
        Command::Languages { query } => {
            let catalog = config.language_catalog()?;
            print_json(&catalog.search(query.as_deref().unwrap_or("")))?;
        }
        Command::Skills { discipline } => {
            let selected: Vec<Discipline> = match discipline {
                Some(name) => match Discipline::from_name(&name) {
                    Some(d) => vec![d],
                    None => {
                        eprintln!("  Unknown discipline '{}'. Known:", name);
                        for d in Discipline::ALL {
                            eprintln!("    {} / {}", d.name(), d.german_name());
                        }
                        return Ok(ExitCode::FAILURE);
                    }
                },
                None => Discipline::ALL.to_vec(),
            };
            let out: Vec<SkillOutput> = selected.into_iter().map(skill_output).collect();
            print_json(&out)?;
        }
        Command::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let places = config.place_index()?;
            let languages = config.language_catalog()?;

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(peakly::server::start(&host, port, places, languages))?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn skill_output(d: Discipline) -> SkillOutput {
    SkillOutput {
        discipline: d,
        german: d.german_name(),
        levels: d
            .levels()
            .iter()
            .map(|&grade| LevelOutput {
                grade,
                description: d.level_description(grade),
            })
            .collect(),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
