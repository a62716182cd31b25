use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use shot_coach::models::ComparisonResult;
use shot_coach::services::ComparisonService;

use crate::config::Config;
use crate::input::{read_keypoints, read_metrics, read_profile, KeypointInput};

#[derive(Args)]
pub struct AnalyzeCommand {
    /// Keypoints JSON: one frame (array of keypoints) or many (array of frames)
    #[arg(long)]
    keypoints: PathBuf,

    /// User profile JSON
    #[arg(long)]
    profile: PathBuf,

    /// Measured shooting metrics JSON; these override values derived from keypoints
    #[arg(long)]
    metrics: Option<PathBuf>,

    /// Seed for coaching cue selection
    #[arg(long)]
    seed: Option<u64>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,
}

impl AnalyzeCommand {
    pub fn execute(self, config: &Config) -> Result<()> {
        let mut analysis = config.analysis_config()?;
        if let Some(seed) = self.seed {
            analysis = analysis.with_cue_seed(seed);
        }

        let catalog = analysis.load_catalog().context("Failed to load reference catalog")?;
        let keypoints = read_keypoints(&self.keypoints)?;
        let profile = read_profile(&self.profile)?;
        let metrics = self.metrics.as_deref().map(read_metrics).transpose()?;

        let service = ComparisonService::new(&catalog, analysis);
        let result: ComparisonResult = match keypoints {
            KeypointInput::Frame(frame) => service.run_full_comparison(&frame, &profile, metrics.as_ref()),
            KeypointInput::Frames(frames) => {
                service.run_session_comparison(&frames, &profile, metrics.as_ref())
            }
        };

        let json = if self.pretty || config.output.pretty {
            serde_json::to_string_pretty(&result)?
        } else {
            serde_json::to_string(&result)?
        };
        println!("{}", json);

        Ok(())
    }
}
