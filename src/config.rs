use std::path::PathBuf;

/// What [`save_levels`](crate::store::save_levels) writes in each record's time field.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum TimeRecordPolicy {
    /// Write `0`, discarding the recorded time.
    #[default]
    Reset,
    /// Write the time recorded on the level.
    Preserve,
}

/// Where a [`Library`](crate::library::Library) keeps its files, and how it saves them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoreConfig {
    /// The built-in pack, read on open and rewritten on save.
    pub levels_path: PathBuf,
    /// A pack supplied by the player; only ever read.
    pub user_levels_path: PathBuf,
    /// Time-trial best scores.
    pub scores_path: PathBuf,
    /// Time field policy for the built-in pack.
    pub time_record: TimeRecordPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            levels_path: PathBuf::from("defaultLevels.txt"),
            user_levels_path: PathBuf::from("userLevels.txt"),
            scores_path: PathBuf::from("scores.txt"),
            time_record: TimeRecordPolicy::default(),
        }
    }
}
