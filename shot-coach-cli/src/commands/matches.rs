use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use shot_coach::models::{format_height, UserShootingMetrics};
use shot_coach::services::ComparisonService;

use crate::config::Config;
use crate::input::{read_metrics, read_profile};

#[derive(Args)]
pub struct MatchesCommand {
    /// User profile JSON
    #[arg(long)]
    profile: PathBuf,

    /// Measured shooting metrics JSON
    #[arg(long)]
    metrics: Option<PathBuf>,

    /// Number of matches to show
    #[arg(short, long)]
    limit: Option<usize>,
}

impl MatchesCommand {
    pub fn execute(self, config: &Config) -> Result<()> {
        if !config.output.color {
            colored::control::set_override(false);
        }

        let mut analysis = config.analysis_config()?;
        if let Some(limit) = self.limit {
            analysis = analysis.with_match_limit(limit);
        }
        analysis.validate().context("Invalid --limit")?;

        let catalog = analysis.load_catalog().context("Failed to load reference catalog")?;
        let profile = read_profile(&self.profile)?;
        let metrics = match self.metrics.as_deref() {
            Some(path) => read_metrics(path)?,
            None => UserShootingMetrics::default(),
        };

        let service = ComparisonService::new(&catalog, analysis);
        let search = service.find_matches(&profile, &metrics);

        println!("{}", "Closest Reference Shooters".bold());
        println!("────────────────────────────────");
        if search.widened {
            println!(
                "{}",
                "Few shooters matched your profile closely; ranking the full catalog.".yellow()
            );
        }
        println!();

        for matched in &search.matches {
            let score = matched.similarity_score;
            println!(
                "{:>2}. {} {}",
                matched.rank,
                matched.shooter.name.bold(),
                format!("({:.1})", score.overall).green()
            );
            println!(
                "    {} {} | {} | physical {:.0} | skill {:.0} | mechanics {:.0}",
                format_height(matched.shooter.height_inches),
                matched.shooter.body_build.label(),
                matched.shooter.skill_level.label(),
                score.physical,
                score.skill,
                score.mechanics
            );
            println!("    {}", matched.match_reasons.join(", ").dimmed());
        }

        Ok(())
    }
}
