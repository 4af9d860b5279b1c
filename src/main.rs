use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use muselab::audio::{AudioEngine, ChordProgression, OfflineBackend};
use muselab::{
    create_chord, get_diatonic_chords, get_interval, get_scale_notes, note_to_frequency,
    note_to_midi, parse_chord_symbol, ChordType, EngineConfig, MuseError, ScaleType,
};

const RENDER_SAMPLE_RATE: u32 = 44_100;
const RENDER_OCTAVE: u32 = 3;

#[derive(Parser, Debug)]
#[command(name = "muselab", about = "Music theory lookups and chord progression rendering")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a note's MIDI number and frequency
    Note { note: String },

    /// Name the interval between two notes
    Interval { first: String, second: String },

    /// Build a chord from a root and a chord type (major, minor7, ...)
    Chord { root: String, chord_type: ChordType },

    /// Parse a chord symbol such as Am7 or F#dim
    Symbol {
        symbol: String,

        /// Octave of the root
        #[arg(default_value_t = 4)]
        octave: u32,
    },

    /// List the notes of a scale
    Scale { root: String, scale_type: ScaleType },

    /// List the seven diatonic triads of a major key
    Diatonic { root: String },

    /// Render a chord progression to a WAV file
    Render {
        /// YAML settings file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Sound preset (piano, organ, pad, ...)
        #[arg(long)]
        preset: Option<String>,

        /// Override tempo (BPM)
        #[arg(long)]
        tempo: Option<f64>,

        /// Beats per chord
        #[arg(long, default_value_t = 4)]
        beats: u32,

        /// Path of the WAV file to write
        output: PathBuf,

        /// Chord symbols, one per chord
        #[arg(required = true)]
        symbols: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Note { note } => show_note(&note),
        Command::Interval { first, second } => show_interval(&first, &second),
        Command::Chord { root, chord_type } => show_chord(&root, chord_type),
        Command::Symbol { symbol, octave } => show_symbol(&symbol, octave),
        Command::Scale { root, scale_type } => show_scale(&root, scale_type),
        Command::Diatonic { root } => show_diatonic(&root),
        Command::Render {
            config,
            preset,
            tempo,
            beats,
            output,
            symbols,
        } => render(config.as_deref(), preset.as_deref(), tempo, beats, &output, &symbols),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn show_note(note: &str) -> Result<(), MuseError> {
    println!("{}: MIDI {}, {:.2} Hz", note, note_to_midi(note)?, note_to_frequency(note)?);
    Ok(())
}

fn show_interval(first: &str, second: &str) -> Result<(), MuseError> {
    let interval = get_interval(first, second)?;
    println!(
        "{} -> {}: {} ({} semitones)",
        first,
        second,
        interval.display_name(),
        interval.semitones
    );
    Ok(())
}

fn show_chord(root: &str, chord_type: ChordType) -> Result<(), MuseError> {
    let chord = create_chord(root, chord_type, None)?;
    println!("{}: {}", chord.symbol, chord.notes.join(" "));
    Ok(())
}

fn show_symbol(symbol: &str, octave: u32) -> Result<(), MuseError> {
    let chord = parse_chord_symbol(symbol, octave)?;
    println!("{} ({}): {}", chord.symbol, chord.chord_type, chord.notes.join(" "));
    Ok(())
}

fn show_scale(root: &str, scale_type: ScaleType) -> Result<(), MuseError> {
    println!("{} {}: {}", root, scale_type, get_scale_notes(root, scale_type)?.join(" "));
    Ok(())
}

fn show_diatonic(root: &str) -> Result<(), MuseError> {
    for chord in get_diatonic_chords(root)? {
        let numeral = chord.roman_numeral.as_deref().unwrap_or("");
        println!("{:<5} {:<6} {}", numeral, chord.symbol, chord.notes.join(" "));
    }
    Ok(())
}

/// Render a chord progression to a WAV file
fn render(
    config: Option<&Path>,
    preset: Option<&str>,
    tempo: Option<f64>,
    beats_per_chord: u32,
    output: &Path,
    symbols: &[String],
) -> Result<(), MuseError> {
    let config = match config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let chords = symbols
        .iter()
        .map(|symbol| parse_chord_symbol(symbol, RENDER_OCTAVE).map(|chord| chord.notes))
        .collect::<Result<Vec<_>, MuseError>>()?;
    let progression = ChordProgression {
        chords,
        beats_per_chord,
    };

    let sound = match preset {
        Some(name) => config.preset(name)?,
        None => config.audio,
    };
    let tempo = tempo.unwrap_or(config.default_tempo);

    let engine = AudioEngine::with_config(OfflineBackend::new(RENDER_SAMPLE_RATE), sound);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(|e| MuseError::Render(e.to_string()))?;
    let playback = runtime.block_on(engine.play_progression(&progression, tempo, None))?;

    engine.backend().save_wav(output)?;
    eprintln!(
        "Wrote {} chords ({:.2}s) to {}",
        progression.chords.len(),
        playback.duration(),
        output.display()
    );
    Ok(())
}
