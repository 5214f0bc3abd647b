// voxbeat CLI entry point.
//
// Renders music descriptions to MIDI without a microphone or a chat model:
//
//   voxbeat render <description.json> [-o out.mid]
//   voxbeat prompt <request words...> [--name NAME] [--show]
//   voxbeat drums [--kick 1,3] [--snare 2,4] [--hats ...] [--bpm N] [-o out.mid]
//
// Global options: --config <file.json>, -v/--verbose.
//
// `prompt` interprets the request with the offline keyword parser. Output
// goes to the configured output directory unless -o is given.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use voxbeat_assistant::{Assistant, AssistantConfig, AssistantError, KeywordParser, RunReport};
use voxbeat_music::{MusicDescription, Timeline};

#[derive(Parser)]
#[command(name = "voxbeat", version, about = "Render music requests as MIDI")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug detail (skipped tokens, fallbacks) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a description JSON file
    Render {
        description: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Interpret a text request offline and render it
    Prompt {
        #[arg(required = true)]
        text: Vec<String>,
        /// Output file name (without directory)
        #[arg(long)]
        name: Option<String>,
        /// Print the interpreted description and note listing
        #[arg(long)]
        show: bool,
    },
    /// Render a drum pattern given as beat tokens per voice
    Drums {
        #[arg(long)]
        kick: Option<String>,
        #[arg(long)]
        snare: Option<String>,
        #[arg(long)]
        hats: Option<String>,
        #[arg(long)]
        crash: Option<String>,
        #[arg(long)]
        tom: Option<String>,
        #[arg(long)]
        clap: Option<String>,
        #[arg(long, default_value_t = 90)]
        bpm: u16,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AssistantError> {
    let config = AssistantConfig::load_or_default(cli.config.as_deref())?;
    let assistant = Assistant::new(config, KeywordParser::new());

    match cli.command {
        Command::Render {
            description,
            output,
        } => {
            let desc = MusicDescription::load(&description)?;
            let report = match output {
                Some(path) => assistant.render_to(desc, path)?,
                None => assistant.render_description(desc, None)?,
            };
            print_report(&report);
        }
        Command::Prompt { text, name, show } => {
            let request = text.join(" ");
            let report = assistant.run_text(&request, name.as_deref())?;
            if show {
                print_description(&report.description);
            }
            print_report(&report);
        }
        Command::Drums {
            kick,
            snare,
            hats,
            crash,
            tom,
            clap,
            bpm,
            output,
        } => {
            let pattern: Vec<(&str, String)> = [
                ("kick", kick),
                ("snare", snare),
                ("hats", hats),
                ("crash", crash),
                ("tom", tom),
                ("clap", clap),
            ]
            .into_iter()
            .filter_map(|(voice, hits)| Some((voice, hits?)))
            .collect();
            let desc = MusicDescription::drums(pattern, bpm);
            let report = match output {
                Some(path) => assistant.render_to(desc, path)?,
                None => assistant.render_description(desc, Some("drums"))?,
            };
            print_report(&report);
        }
    }
    Ok(())
}

fn print_description(desc: &MusicDescription) {
    match serde_json::to_string_pretty(desc) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("  (could not format description: {e})"),
    }
    print!("{}", Timeline::from_description(desc).summary());
}

fn print_report(report: &RunReport) {
    let desc = &report.description;
    println!("MIDI file: {}", report.path.display());
    println!("  Genre: {}", desc.genre);
    println!("  Tempo: {} BPM", desc.bpm);
    println!("  Type: {}", desc.music_type.label());
    println!("  Notes: {}", report.note_count);
}
