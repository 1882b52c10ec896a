#![forbid(unsafe_code)]
use anyhow::Result;
use roulement::{
    check_schedule, io,
    report::{render_timetable_markdown, MarkdownRoster, RosterRenderer, TextRoster},
    Config, ScheduleSolver, SolveOutcome, ViolationKind,
};
use clap::{Parser, Subcommand};
use std::time::Duration;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de génération de roulement Jour / Nuit / Backup
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de planification
    #[arg(long, global = true, default_value = "planning.json")]
    config: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Valider le fichier de planification
    Validate,

    /// Résoudre et exporter le roulement
    Solve {
        /// Remplace `time_limit_seconds` du fichier
        #[arg(long)]
        time_limit: Option<u64>,
        #[arg(long)]
        out_json: Option<String>,
        /// Planning horodaté (CSV)
        #[arg(long)]
        out_csv: Option<String>,
        /// Roster + planning (Markdown)
        #[arg(long)]
        out_md: Option<String>,
    },

    /// Vérifier un roster JSON existant contre les règles dures
    Check {
        #[arg(long)]
        schedule: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let config = Config::load(&cli.config)?;

    let code = match cli.cmd {
        Commands::Validate => {
            let input = config.planning_input()?;
            println!(
                "OK: {}-{:02}, {} day(s), {} worker(s), {} slot(s)",
                config.year,
                config.month,
                input.days,
                input.workers.len(),
                input.total_slots()
            );
            0
        }
        Commands::Solve {
            time_limit,
            out_json,
            out_csv,
            out_md,
        } => {
            let input = config.planning_input()?;
            let mut opts = config.solver_options();
            if let Some(secs) = time_limit {
                opts.time_limit = Duration::from_secs(secs);
            }
            let outcome = ScheduleSolver::new(&input, opts)?.solve()?;

            match &outcome {
                SolveOutcome::Optimal(_) => println!("Found an optimal solution"),
                SolveOutcome::Feasible(_) => {
                    eprintln!("Warning: time limit reached, solution may be sub-optimal")
                }
                SolveOutcome::Infeasible => {}
            }

            match outcome.into_solved() {
                None => {
                    eprintln!("No feasible schedule found");
                    // Code 2 = WARNING/INCOMPLETE
                    2
                }
                Some(solved) => {
                    print!("{}", TextRoster.render(&solved.schedule));
                    println!("objective: {}", solved.objective.total);

                    let entries = config.projector()?.project(&solved.schedule);
                    if let Some(path) = out_json {
                        io::export_schedule_json(path, &solved.schedule)?;
                    }
                    if let Some(path) = out_csv {
                        io::export_timetable_csv(path, &entries)?;
                    }
                    if let Some(path) = out_md {
                        let md = format!(
                            "{}\n{}",
                            MarkdownRoster.render(&solved.schedule),
                            render_timetable_markdown(&entries)
                        );
                        io::export_markdown(path, &md)?;
                    }
                    0
                }
            }
        }
        Commands::Check { schedule } => {
            let input = config.planning_input()?;
            let schedule = io::load_schedule_json(schedule)?;
            let violations = check_schedule(&schedule, &input);
            if violations.is_empty() {
                println!("OK: no violation");
                0
            } else {
                eprintln!("Found {} violation(s)", violations.len());
                for v in &violations {
                    eprintln!(
                        "day {:>2} {:<4} {:<8} {}",
                        v.day,
                        v.kind.map(|k| k.code().to_string()).unwrap_or_default(),
                        v.worker.as_ref().map(|w| w.as_str()).unwrap_or("-"),
                        match v.violation {
                            ViolationKind::Uncovered => "uncovered",
                            ViolationKind::DoubleCovered => "double",
                            ViolationKind::Unavailable => "unavailable",
                            ViolationKind::DayShiftRestricted => "day-restricted",
                            ViolationKind::RestAfterNight => "rest-night",
                            ViolationKind::RestAfterBackup => "rest-backup",
                            ViolationKind::BackupRepetition => "backup-repeat",
                            ViolationKind::Shape => "shape",
                        }
                    );
                }
                2
            }
        }
    };

    std::process::exit(code);
}
