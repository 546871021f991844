use clap::{Parser, Subcommand};
use setforge_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "setforge")]
#[command(about = "Deterministic workout generation engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a workout and print it as JSON
    Generate {
        /// Training goal (strength, conditioning, mixed, endurance)
        #[arg(long)]
        archetype: String,

        /// Session length in minutes
        #[arg(long, default_value_t = 45)]
        minutes: u32,

        /// Target intensity, 1-10
        #[arg(long, default_value_t = 6)]
        intensity: u8,

        /// Available equipment tags, comma separated
        #[arg(long, value_delimiter = ',')]
        equipment: Vec<String>,

        /// Constraint tags, comma separated (e.g. no_barbell, low_impact)
        #[arg(long, value_delimiter = ',')]
        constraints: Vec<String>,

        /// Seed string; equal seeds reproduce the workout
        #[arg(long)]
        seed: String,

        /// Path to a history JSON file from the persistence layer
        #[arg(long)]
        history: Option<PathBuf>,

        /// User identifier for feedback enrichment
        #[arg(long)]
        user_id: Option<String>,

        /// Health modifiers (all optional, 0-100 except stress 0-10)
        #[arg(long)]
        vitality: Option<f64>,
        #[arg(long)]
        performance_potential: Option<f64>,
        #[arg(long)]
        stress: Option<f64>,
        #[arg(long)]
        recovery: Option<f64>,
        #[arg(long)]
        circadian_alignment: Option<f64>,
        #[arg(long)]
        overall: Option<f64>,

        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Replay a seed twice and verify the choices are identical
    Verify {
        #[arg(long)]
        archetype: String,

        #[arg(long, default_value_t = 45)]
        minutes: u32,

        #[arg(long, default_value_t = 6)]
        intensity: u8,

        #[arg(long, value_delimiter = ',')]
        equipment: Vec<String>,

        #[arg(long)]
        seed: String,

        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// List the built-in movement or template catalog
    Catalog {
        /// List templates instead of movements
        #[arg(long)]
        templates: bool,
    },
}

fn main() -> Result<()> {
    setforge_core::logging::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Generate {
            archetype,
            minutes,
            intensity,
            equipment,
            constraints,
            seed,
            history,
            user_id,
            vitality,
            performance_potential,
            stress,
            recovery,
            circadian_alignment,
            overall,
            compact,
        } => {
            let health = HealthModifiers {
                vitality,
                performance_potential,
                stress,
                recovery,
                circadian_alignment,
                overall,
            };
            let request = GenerationRequest {
                archetype: parse_archetype(&archetype)?,
                minutes,
                target_intensity: intensity,
                equipment,
                constraints,
                health: (health != HealthModifiers::default()).then_some(health),
                user_id,
                seed,
            };
            cmd_generate(&request, history.as_deref(), &config, compact)
        }
        Commands::Verify {
            archetype,
            minutes,
            intensity,
            equipment,
            seed,
            history,
        } => {
            let request = GenerationRequest {
                archetype: parse_archetype(&archetype)?,
                minutes,
                target_intensity: intensity,
                equipment,
                constraints: Vec::new(),
                health: None,
                user_id: None,
                seed,
            };
            cmd_verify(&request, history.as_deref(), &config)
        }
        Commands::Catalog { templates } => {
            cmd_catalog(templates);
            Ok(())
        }
    }
}

fn parse_archetype(input: &str) -> Result<Archetype> {
    match input.to_lowercase().as_str() {
        "strength" => Ok(Archetype::Strength),
        "conditioning" => Ok(Archetype::Conditioning),
        "mixed" => Ok(Archetype::Mixed),
        "endurance" => Ok(Archetype::Endurance),
        other => Err(Error::InvalidRequest(format!(
            "unknown archetype: {} (expected strength, conditioning, mixed, or endurance)",
            other
        ))),
    }
}

fn load_history_file(path: Option<&std::path::Path>) -> Result<Vec<HistoryEntry>> {
    match path {
        Some(p) => history::load_history(p),
        None => Ok(Vec::new()),
    }
}

fn cmd_generate(
    request: &GenerationRequest,
    history_path: Option<&std::path::Path>,
    config: &Config,
    compact: bool,
) -> Result<()> {
    let history = load_history_file(history_path)?;
    let result = generate_workout(request, &history, None, config)?;
    tracing::debug!(
        workout = %result.workout.id,
        template = %result.choices.template_id,
        "generation complete"
    );

    let output = if compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    println!("{}", output);
    Ok(())
}

fn cmd_verify(
    request: &GenerationRequest,
    history_path: Option<&std::path::Path>,
    config: &Config,
) -> Result<()> {
    let history = load_history_file(history_path)?;
    let now = chrono::Utc::now();
    let first = generate_workout_at(request, &history, None, config, now)?;
    let second = generate_workout_at(request, &history, None, config, now)?;

    if serde_json::to_string(&first.choices)? == serde_json::to_string(&second.choices)?
        && serde_json::to_string(&first.workout)? == serde_json::to_string(&second.workout)?
    {
        println!(
            "seed '{}' is reproducible: template {}, {} movements",
            request.seed,
            first.choices.template_id,
            first.choices.movement_ids.len()
        );
        Ok(())
    } else {
        Err(Error::Other(format!(
            "seed '{}' produced diverging workouts",
            request.seed
        )))
    }
}

fn cmd_catalog(templates: bool) {
    if templates {
        for t in template_catalog() {
            println!(
                "{:<24} {:<12} {:>3}-{:<3} min  intensity {}-{}  {} blocks",
                t.id,
                t.archetype.to_string(),
                t.min_minutes,
                t.max_minutes,
                t.min_intensity,
                t.max_intensity,
                t.blocks.len()
            );
        }
    } else {
        for m in movement_catalog() {
            println!(
                "{:<24} {:<9} cx{} {}{} [{}]",
                m.id,
                m.pattern.to_string(),
                m.complexity,
                if m.compound { "compound " } else { "" },
                if m.unilateral { "unilateral " } else { "" },
                m.equipment.join(", ")
            );
        }
    }
}
