//! CycleForge CLI
//!
//! Roster CSV → role plan → Plan.csv

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "cycleforge")]
#[command(about = "Round cycle planner: assign SB/Mag roles for a bracket", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Plan roles for a roster CSV
    Plan {
        /// Roster CSV (columns: name, sb_level, mag_level)
        #[arg(long)]
        roster: PathBuf,

        /// Bracket: 13, 13-opt2, 19, 25
        #[arg(long)]
        bracket: Option<String>,

        /// Energy cap per player (1-50)
        #[arg(long)]
        energy_cap: Option<u32>,

        /// Assignment strategy: quota (default) or layout
        #[arg(long)]
        strategy: Option<String>,

        /// Planner config JSON (defaults to $CYCLEFORGE_CONFIG_PATH)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output plan CSV path
        #[arg(long, default_value = cf_core::export::PLAN_FILE_NAME)]
        out: PathBuf,

        /// Verify the written CSV checksum
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,

        /// Print the full plan as JSON instead of the text report
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// List bracket recipes and role layouts
    Brackets,

    /// Write a blank ten-player roster CSV
    Template {
        /// Output roster CSV path
        #[arg(long)]
        out: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            roster,
            bracket,
            energy_cap,
            strategy,
            config,
            out,
            verify,
            metadata,
            json,
        } => {
            let overrides = cf_cli::ConfigOverrides { bracket, energy_cap, strategy };
            let config = cf_cli::resolve_config(config.as_deref(), &overrides)?;
            let (validated, plan) = cf_cli::plan_from_file(&roster, &config)?;

            if validated.report.invalid_cells > 0 {
                eprintln!(
                    "Warning: {} invalid level value(s) treated as 0",
                    validated.report.invalid_cells
                );
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_report(&roster, &plan);
            }

            let meta = cf_cli::write_plan(&plan, &out)?;
            if !json {
                println!("\n✅ Plan written to {} ({} rows)", out.display(), meta.rows);
                println!("   Checksum: {}", meta.checksum);
            }

            if verify {
                verify_plan_integrity(&out, &meta.checksum)?;
            }

            if let Some(metadata_path) = metadata {
                save_metadata(&metadata_path, &meta)?;
            }
        }

        Commands::Brackets => print_brackets(),

        Commands::Template { out } => {
            let count = cf_cli::write_template(&out)?;
            println!("📝 Roster template with {} players written to {}", count, out.display());
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_report(roster_path: &Path, plan: &cf_core::CyclePlan) {
    let recipe = &plan.summary.recipe;
    let cap = &plan.capability;
    let quota = &plan.quota;
    let totals = &plan.summary.totals;

    println!("🗓️  Cycle plan for {}", roster_path.display());
    println!(
        "   Bracket: {}   Energy cap: {}   Strategy: {}",
        plan.config.bracket, plan.config.energy_cap, plan.config.strategy
    );

    println!("\nBracket recipe:");
    println!("   SB casts required:  {}", recipe.sb_required);
    println!("   Mag casts required: {}", recipe.mag_required);
    println!("   Expected kills:     {}", recipe.expected_kills);
    println!("   Energy used (team): {}", recipe.nominal_team_energy);

    println!("\nRoster capability:");
    println!("   SB-capable players:  {} (sb_level > 0)", cap.sb_capable);
    println!("   Mag-capable players: {} (mag_level > 0)", cap.mag_capable);
    println!("   Idle-only players:   {}", cap.idle_only);

    println!("\nFeasible quota:");
    println!("   SB capacity: {}   Mag capacity: {}", quota.sb_capacity, quota.mag_capacity);
    println!("   Max cycles:  {}", quota.max_cycles);
    println!("   SB quota:    {} / {}", quota.sb_required, recipe.sb_required);
    println!("   Mag quota:   {} / {}", quota.mag_required, recipe.mag_required);

    println!("\nRole counts:");
    for (role, count) in &plan.summary.role_counts {
        println!("   {:<22} {}", role.display_label(), count);
    }

    println!("\nExpected points:");
    println!("   Mag points (team total): {}", totals.mag_points);
    println!("   SB points (team total):  {}", totals.sb_points);
    println!("   Grand total (Mag + SB):  {}", totals.total_points);
    println!("   Energy used:             {}", totals.energy);

    if plan.summary.meets_recipe() {
        println!("\n   Recipe fully covered");
    } else {
        println!(
            "\n   Shortfall vs recipe: {} SB, {} Mag (unmet quota: {} SB, {} Mag)",
            plan.summary.shortfall_sb,
            plan.summary.shortfall_mag,
            plan.summary.unmet_sb,
            plan.summary.unmet_mag
        );
    }

    println!("\nPlan details:");
    println!(
        "   {:<16} {:>3} {:>3}  {:<13} {:>6} {:>6} {:>7}",
        "name", "sb", "mag", "role", "sb_pts", "mag_pts", "energy"
    );
    for row in plan.rows() {
        println!(
            "   {:<16} {:>3} {:>3}  {:<13} {:>6} {:>6} {:>7}",
            row.name,
            row.sb_level,
            row.mag_level,
            row.role.name(),
            row.sb_points,
            row.mag_points,
            row.energy_used
        );
    }
}

#[cfg(feature = "cli")]
fn print_brackets() {
    use cf_core::BracketKey;

    for key in BracketKey::ALL {
        let bracket = key.bracket();
        let recipe = &bracket.recipe;
        println!("Bracket {} ({})", key.tier(), key);
        println!(
            "   SB {} / Mag {} casts, {} kills, team energy {}",
            recipe.sb_required, recipe.mag_required, recipe.expected_kills, recipe.nominal_team_energy
        );
        let layout: Vec<String> =
            bracket.layout.iter().map(|(role, count)| format!("{} ×{}", role, count)).collect();
        println!("   Layout: {}", layout.join(", "));
    }
    println!(
        "\nEnergy cap range: {}-{} (default {}), regeneration {}",
        cf_core::config::ENERGY_CAP_MIN,
        cf_core::config::ENERGY_CAP_MAX,
        cf_core::config::DEFAULT_ENERGY_CAP,
        cf_core::config::ENERGY_REGEN_INFO
    );
}

#[cfg(feature = "cli")]
fn verify_plan_integrity(path: &Path, checksum: &str) -> Result<()> {
    println!("\n🔍 Verifying plan file...");
    let is_valid = cf_cli::verify_plan_file(path, checksum)?;

    if is_valid {
        println!("✅ Plan verification passed");
        Ok(())
    } else {
        anyhow::bail!("❌ Plan verification failed - checksum mismatch!")
    }
}

#[cfg(feature = "cli")]
fn save_metadata(path: &Path, meta: &cf_cli::PlanMetadata) -> Result<()> {
    let metadata_json = serde_json::to_string_pretty(meta)?;
    std::fs::write(path, metadata_json)?;
    println!("\n📄 Metadata saved to: {}", path.display());
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("cycleforge CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
