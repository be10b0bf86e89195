//! Time-trial best scores.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use strum::VariantArray;

/// The lengths of a time trial.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, VariantArray)]
pub enum TrialLength {
    /// 30 seconds.
    Short,
    /// 60 seconds.
    Medium,
    /// 90 seconds.
    Long,
}

impl TrialLength {
    /// How long the trial runs.
    pub fn duration(self) -> Duration {
        Duration::from_secs(match self {
            TrialLength::Short => 30,
            TrialLength::Medium => 60,
            TrialLength::Long => 90,
        })
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Best time-trial score per [`TrialLength`], persisted as `short,medium,long`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ScoreBoard([u32; 3]);

impl ScoreBoard {
    /// The best score for `length`; 0 if none was recorded.
    pub fn best(&self, length: TrialLength) -> u32 {
        self.0[length.slot()]
    }

    /// Offer `score` for `length`. Returns whether it beat the previous best.
    pub fn record(&mut self, length: TrialLength, score: u32) -> bool {
        let best = &mut self.0[length.slot()];
        if score > *best {
            *best = score;
            true
        } else {
            false
        }
    }
}

impl FromStr for ScoreBoard {
    type Err = std::convert::Infallible;

    /// Fields that are missing or not numbers count as 0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ret = Self::default();
        for (best, field) in ret.0.iter_mut().zip(s.split(',')) {
            *best = field.trim().parse().unwrap_or(0);
        }

        Ok(ret)
    }
}

impl Display for ScoreBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let [short, medium, long] = self.0;
        write!(f, "{short},{medium},{long}")
    }
}
