use serde::{Deserialize, Serialize};

use crate::ids::{CampaignId, ObjectiveId};

/// Titles longer than this are cut for display.
pub const TITLE_MAX_CHARS: usize = 20;

/// A reward objective tracked for the rider. Progress is owned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub id: ObjectiveId,
    pub title: String,
    /// Completion ratio in `[0, 1]`.
    pub progress: f64,
    pub trophy_image: String,
    pub campaign_id: CampaignId,
}

impl Objective {
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    pub fn band(&self) -> ProgressBand {
        ProgressBand::from_progress(self.progress)
    }

    pub fn display_title(&self) -> String {
        if self.title.chars().count() > TITLE_MAX_CHARS {
            let cut: String = self.title.chars().take(TITLE_MAX_CHARS).collect();
            format!("{cut}...")
        } else {
            self.title.clone()
        }
    }
}

/// Color band of the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressBand {
    /// 0% - 35%
    Starting,
    /// 36% - 70%
    Advancing,
    /// 71% - 99%
    Closing,
    Complete,
}

impl ProgressBand {
    pub fn from_progress(progress: f64) -> Self {
        if progress >= 1.0 {
            ProgressBand::Complete
        } else if progress >= 0.71 {
            ProgressBand::Closing
        } else if progress >= 0.36 {
            ProgressBand::Advancing
        } else {
            ProgressBand::Starting
        }
    }

    pub fn color_hex(&self) -> &'static str {
        match self {
            ProgressBand::Starting => "#FF5891",
            ProgressBand::Advancing => "#9A27CB",
            ProgressBand::Closing => "#C76CEE",
            ProgressBand::Complete => "#1CCABD",
        }
    }
}

/// One rendered objective row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveCard {
    pub id: ObjectiveId,
    pub title: String,
    pub progress: f64,
    pub band: ProgressBand,
    pub trophy_image: String,
    pub campaign_id: CampaignId,
}

impl From<&Objective> for ObjectiveCard {
    fn from(objective: &Objective) -> Self {
        Self {
            id: objective.id.clone(),
            title: objective.display_title(),
            progress: objective.progress,
            band: objective.band(),
            trophy_image: objective.trophy_image.clone(),
            campaign_id: objective.campaign_id.clone(),
        }
    }
}

/// What the home screen shows for objectives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveBoardView {
    pub cards: Vec<ObjectiveCard>,
    pub celebrating: bool,
}
