#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use roulement::{
    io,
    profile::{export_profile_json, load_profile_from_file, Profile},
    Calendar, DailyRequirement, GlyphStyle, Mode, Tier,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de génération de plannings d'équipe
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer un planning
    Generate {
        /// Premier jour (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Dernier jour inclus (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
        /// CSV `name,tier,roles,vacations`
        #[arg(long)]
        roster: String,
        /// Profil JSON (besoins, règles)
        #[arg(long)]
        profile: Option<String>,
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        /// Graine pour un planning reproductible
        #[arg(long)]
        seed: Option<u64>,
        /// Effectif journalier (remplace celui du profil)
        #[arg(long)]
        headcount: Option<usize>,
        /// Rôles à couvrir, par priorité : "supervisor,front-desk" ("" pour aucun)
        #[arg(long)]
        roles: Option<String>,
        #[arg(long, value_enum)]
        glyphs: Option<GlyphArg>,
        /// Export CSV du planning
        #[arg(long)]
        out: Option<String>,
        /// Export CSV du décompte journalier
        #[arg(long)]
        summary: Option<String>,
        /// Export JSON du planning
        #[arg(long)]
        json: Option<String>,
    },

    /// Écrire le profil par défaut
    InitProfile {
        #[arg(long, default_value = "profile.json")]
        out: String,
    },

    /// Afficher le roster importé
    Roster {
        #[arg(long)]
        roster: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    RoleCoverage,
    Sampling,
}

impl From<ModeArg> for Mode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::RoleCoverage => Mode::RoleCoverage,
            ModeArg::Sampling => Mode::Sampling,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GlyphArg {
    Plain,
    Rich,
}

impl From<GlyphArg> for GlyphStyle {
    fn from(g: GlyphArg) -> Self {
        match g {
            GlyphArg::Plain => GlyphStyle::Plain,
            GlyphArg::Rich => GlyphStyle::Rich,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let code = match cli.cmd {
        Commands::Generate {
            start,
            end,
            roster,
            profile,
            mode,
            seed,
            headcount,
            roles,
            glyphs,
            out,
            summary,
            json,
        } => {
            let calendar = Calendar::new(start, end)?;
            let roster = io::import_roster_csv(&roster)
                .with_context(|| format!("importing roster {roster}"))?;
            let mut profile = match profile {
                Some(path) => load_profile_from_file(path)?,
                None => Profile::default(),
            };
            if let Some(mode) = mode {
                profile.mode = mode.into();
            }
            if let Some(glyphs) = glyphs {
                profile.glyphs = glyphs.into();
            }
            if let Some(headcount) = headcount {
                profile.staffing.default.headcount = headcount;
            }
            if let Some(list) = roles {
                let mut req = DailyRequirement::headcount(profile.staffing.default.headcount);
                for role in list.split(',').map(str::trim).filter(|r| !r.is_empty()) {
                    req = req.with_role(role);
                }
                profile.staffing.default = req;
            }
            profile.validate()?;

            let scheduler = profile.scheduler();
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let schedule = scheduler.generate(&calendar, &roster, &mut rng)?;
            let daily = schedule.summary();

            if let Some(path) = out {
                io::export_schedule_csv(path, &schedule, profile.glyphs)?;
            }
            if let Some(path) = summary {
                io::export_summary_csv(path, &daily)?;
            }
            if let Some(path) = json {
                io::export_schedule_json(path, &schedule)?;
            }

            // impression compacte
            for row in &schedule.rows {
                let cells: Vec<&str> = row
                    .labels
                    .iter()
                    .map(|l| match profile.glyphs.glyph(*l) {
                        "" => "·",
                        g => g,
                    })
                    .collect();
                println!("{} | {}", row.employee, cells.join(" "));
            }

            let shortfalls = daily.shortfalls(scheduler.staffing());
            if shortfalls.is_empty() {
                0
            } else {
                for s in &shortfalls {
                    eprintln!(
                        "understaffed {}: {} working / {} required",
                        s.date, s.working, s.required
                    );
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::InitProfile { out } => {
            let profile = Profile::default();
            export_profile_json(&out, &profile)?;
            println!("Profile {} written to {}", profile.id, out);
            0
        }
        Commands::Roster { roster } => {
            let roster = io::import_roster_csv(&roster)?;
            for e in &roster.employees {
                let tier = match e.tier {
                    Tier::Primary => "primary",
                    Tier::Secondary => "secondary",
                };
                let roles: Vec<&str> = e.roles.iter().map(|r| r.as_str()).collect();
                println!(
                    "{} | {} | {} | {} vacation day(s)",
                    e.id,
                    tier,
                    if roles.is_empty() { "-".to_string() } else { roles.join(",") },
                    e.vacations.len()
                );
            }
            0
        }
    };

    std::process::exit(code);
}
