use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use shot_coach::models::format_height;

use crate::config::Config;

#[derive(Args)]
pub struct CatalogCommand {
    /// Print the catalog as JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl CatalogCommand {
    pub fn execute(self, config: &Config) -> Result<()> {
        let catalog = config
            .analysis_config()?
            .load_catalog()
            .context("Failed to load reference catalog")?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&catalog)?);
            return Ok(());
        }

        if !config.output.color {
            colored::control::set_override(false);
        }

        println!(
            "{} {} ({} shooters)",
            "Reference Catalog".bold(),
            catalog.version(),
            catalog.len()
        );
        println!("────────────────────────────────");

        for shooter in catalog.shooters() {
            let metrics = &shooter.shooting_metrics;
            println!(
                "{:<4} {:<18} {:>5} {:<8} {:<13} elbow {:>3.0} knee {:>3.0} release {:>2.0}",
                shooter.id,
                shooter.name,
                format_height(shooter.height_inches),
                shooter.body_build.label(),
                shooter.skill_level.label(),
                metrics.elbow_angle,
                metrics.knee_angle,
                metrics.release_angle
            );
        }

        Ok(())
    }
}
