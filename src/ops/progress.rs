use crate::model::task::{Task, TaskStatus};

/// Number of stages on the quest map
pub const STAGE_COUNT: u8 = 5;

const STAGE_LABELS: [&str; STAGE_COUNT as usize] = [
    "Ancient Map",
    "Lost Jungle",
    "Mystic Peak",
    "Temple Ruins",
    "Sacred Relic",
];

/// Progress through the quest, derived from root-task completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestStage {
    /// 1-based stage number, `1..=STAGE_COUNT`
    pub stage: u8,
    pub done: usize,
    pub total: usize,
}

impl QuestStage {
    pub fn label(&self) -> &'static str {
        STAGE_LABELS[usize::from(self.stage.clamp(1, STAGE_COUNT)) - 1]
    }

    /// Share of the map covered, 0–100
    pub fn percent(&self) -> u8 {
        let stage = self.stage.clamp(1, STAGE_COUNT);
        ((u32::from(stage) - 1) * 100 / (u32::from(STAGE_COUNT) - 1)) as u8
    }
}

/// Stage 1 for an empty board, otherwise `ceil(done / total * 5)` clamped to 1..=5.
/// Only root tasks count.
pub fn quest_stage(tasks: &[Task]) -> QuestStage {
    let total = tasks.len();
    let done = tasks.iter().filter(|t| t.status == TaskStatus::Done).count();
    let stage = if total == 0 {
        1
    } else {
        // Integer ceiling of done * 5 / total
        (done * usize::from(STAGE_COUNT)).div_ceil(total)
    };
    QuestStage {
        stage: stage.clamp(1, usize::from(STAGE_COUNT)) as u8,
        done,
        total,
    }
}
