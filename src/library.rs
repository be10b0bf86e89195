//! The level packs and scores of one player.

use std::fs;
use std::io;

use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::LoadError;
use crate::level::Level;
use crate::score::ScoreBoard;
use crate::store::{load_levels, read_levels, write_levels};

/// The two packs a [`Library`] holds.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Pack {
    /// Shipped levels; their ratings are saved back.
    Builtin,
    /// Levels loaded on request from the user's own file; never saved.
    User,
}

/// Every level the player can choose from, the time-trial scores and the level in play.
#[derive(Debug)]
pub struct Library {
    config: StoreConfig,
    builtin: Vec<Level>,
    user: Vec<Level>,
    scores: ScoreBoard,
    current: Option<(Pack, usize)>,
}

impl Library {
    /// Read the built-in pack and the scores named by `config`.
    ///
    /// Missing files give an empty pack and zero scores. A malformed built-in pack is an error.
    pub fn open(config: StoreConfig) -> Result<Self, LoadError> {
        let builtin = read_levels(&config.levels_path)?;
        let scores = match fs::read_to_string(&config.scores_path) {
            Ok(source) => source.parse::<ScoreBoard>().unwrap_or_default(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %config.scores_path.display(), "no scores yet");
                ScoreBoard::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            config,
            builtin,
            user: Vec::new(),
            scores,
            current: None,
        })
    }

    /// The configuration this library was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The levels of `pack`.
    pub fn pack(&self, pack: Pack) -> &[Level] {
        match pack {
            Pack::Builtin => &self.builtin,
            Pack::User => &self.user,
        }
    }

    fn pack_mut(&mut self, pack: Pack) -> &mut Vec<Level> {
        match pack {
            Pack::Builtin => &mut self.builtin,
            Pack::User => &mut self.user,
        }
    }

    /// Time-trial best scores.
    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    /// Time-trial best scores, for recording a new result.
    pub fn scores_mut(&mut self) -> &mut ScoreBoard {
        &mut self.scores
    }

    /// Replace the user pack with the contents of the user level file and start its first level.
    ///
    /// On failure the previous user pack is gone as well.
    pub fn load_user_pack(&mut self) -> Result<usize, LoadError> {
        let loaded = fs::read_to_string(&self.config.user_levels_path)
            .map_err(LoadError::from)
            .and_then(|source| load_levels(&source));

        match loaded {
            Ok(levels) => {
                info!(path = %self.config.user_levels_path.display(), count = levels.len(), "loaded user pack");
                self.user = levels;
                self.select(Pack::User, 0);
                Ok(self.user.len())
            }
            Err(e) => {
                warn!(path = %self.config.user_levels_path.display(), error = %e, "user pack unavailable");
                self.user.clear();
                if matches!(self.current, Some((Pack::User, _))) {
                    self.current = None;
                }
                Err(e)
            }
        }
    }

    /// Put level `index` of `pack` in play, clamping the index to the pack, and reset it.
    ///
    /// Returns `None` only if the pack is empty.
    pub fn select(&mut self, pack: Pack, index: usize) -> Option<&mut Level> {
        let levels = self.pack_mut(pack);
        let index = index.min(levels.len().checked_sub(1)?);
        levels[index].reset();
        self.current = Some((pack, index));
        self.pack_mut(pack).get_mut(index)
    }

    /// The pack and index of the level in play.
    pub fn current(&self) -> Option<(Pack, usize)> {
        self.current
    }

    /// The level in play.
    pub fn current_level_mut(&mut self) -> Option<&mut Level> {
        let (pack, index) = self.current?;
        self.pack_mut(pack).get_mut(index)
    }

    /// Write back the built-in pack and the scores.
    pub fn save(&self) -> io::Result<()> {
        write_levels(&self.config.levels_path, &self.builtin, self.config.time_record)?;
        fs::write(&self.config.scores_path, self.scores.to_string())?;
        info!(path = %self.config.scores_path.display(), scores = %self.scores, "saved scores");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;
    use crate::level::LevelState;
    use crate::location::Location;
    use crate::score::TrialLength;

    fn config_in(dir: &Path) -> StoreConfig {
        StoreConfig {
            levels_path: dir.join("defaultLevels.txt"),
            user_levels_path: dir.join("userLevels.txt"),
            scores_path: dir.join("scores.txt"),
            ..Default::default()
        }
    }

    #[test]
    fn missing_files_open_empty() {
        let dir = TempDir::new().unwrap();
        let mut library = Library::open(config_in(dir.path())).unwrap();
        assert!(library.pack(Pack::Builtin).is_empty());
        assert_eq!(*library.scores(), ScoreBoard::default());
        assert!(library.select(Pack::Builtin, 0).is_none());
        assert!(matches!(library.load_user_pack(), Err(LoadError::Io(_))));
    }

    #[test]
    fn select_clamps_and_resets() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.levels_path, "{{1,1,3,1},3,0,0}\n{{1,1,1,3},3,0,0}").unwrap();
        let mut library = Library::open(config).unwrap();

        let level = library.select(Pack::Builtin, 7).unwrap();
        assert_eq!(level.flows()[0].last(), Location(0, 2));
        level.route(0, Location(0, 0), Location(0, 2)).unwrap();
        assert!(level.is_solved());
        assert_eq!(library.current(), Some((Pack::Builtin, 1)));

        let level = library.select(Pack::Builtin, 1).unwrap();
        assert!(!level.is_solved());
    }

    #[test]
    fn bad_user_pack_drops_the_old_one() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.user_levels_path, "{{1,1,2,2},2,0,0}").unwrap();
        let mut library = Library::open(config.clone()).unwrap();
        assert_eq!(library.load_user_pack().unwrap(), 1);
        assert_eq!(library.current(), Some((Pack::User, 0)));

        fs::write(&config.user_levels_path, "{{1,1,2").unwrap();
        assert!(matches!(library.load_user_pack(), Err(LoadError::Malformed { .. })));
        assert!(library.pack(Pack::User).is_empty());
        assert_eq!(library.current(), None);
    }

    #[test]
    fn saves_ratings_and_scores() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.levels_path, "{{1,1,3,1},3,0,12}").unwrap();
        fs::write(&config.scores_path, "1,2,3").unwrap();
        let mut library = Library::open(config.clone()).unwrap();
        assert_eq!(library.scores().best(TrialLength::Long), 3);

        let level = library.select(Pack::Builtin, 0).unwrap();
        level.route(0, Location(0, 0), Location(2, 0)).unwrap();
        level.track();
        library.scores_mut().record(TrialLength::Short, 9);
        library.save().unwrap();

        assert_eq!(fs::read_to_string(&config.levels_path).unwrap(), "{{1,1,3,1},3,1,0}");
        assert_eq!(fs::read_to_string(&config.scores_path).unwrap(), "9,2,3");

        let reopened = Library::open(config).unwrap();
        assert_eq!(reopened.pack(Pack::Builtin)[0].rating(), LevelState::Completed);
    }
}
