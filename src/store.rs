//! Reading and writing level packs.
//!
//! A pack is a sequence of records, one level each:
//!
//! ```text
//! {{1,1,3,3},{1,3,3,1},5,0,0}
//! ```
//!
//! Each `{x1,y1,x2,y2},` tuple declares the two termini of a flow, 1-based.
//! The record closes with the board size, the [`LevelState`] as an integer and the best time.
//! Anything between records is skipped up to the next `{`.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::num::NonZero;
use std::path::Path;

use itertools::Itertools;
use tracing::{info, warn};

use crate::builder::{BuilderInvalidReason, LevelBuilder};
use crate::config::TimeRecordPolicy;
use crate::error::LoadError;
use crate::level::{Level, LevelState};
use crate::location::Location;

/// Largest board side a pack may declare.
pub const MAX_BOARD_SIZE: usize = 256;

struct Reader<'a> {
    src: &'a [u8],
    pos: usize,
    // 1-based number of the record being read
    record: usize,
}

impl<'a> Reader<'a> {
    fn new(src: &'a str) -> Self {
        Self { src: src.as_bytes(), pos: 0, record: 0 }
    }

    fn malformed(&self, reason: impl Into<String>) -> LoadError {
        LoadError::Malformed {
            record: self.record,
            offset: self.pos,
            reason: reason.into(),
        }
    }

    fn skip_ws(&mut self) {
        while self.src.get(self.pos).is_some_and(u8::is_ascii_whitespace) {
            self.pos += 1;
        }
    }

    /// The next non-whitespace byte, without consuming it.
    fn peek(&mut self) -> Option<u8> {
        self.skip_ws();
        self.src.get(self.pos).copied()
    }

    /// Move past everything up to and including the next `{`; false at end of input.
    fn seek_record(&mut self) -> bool {
        match self.src[self.pos..].iter().position(|b| *b == b'{') {
            Some(at) => {
                self.pos += at + 1;
                self.record += 1;
                true
            }
            None => {
                self.pos = self.src.len();
                false
            }
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), LoadError> {
        match self.src.get(self.pos) {
            Some(b) if *b == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(b) => Err(self.malformed(format!("expected '{}', found '{}'", byte as char, b.escape_ascii()))),
            None => Err(self.malformed(format!("expected '{}', found end of input", byte as char))),
        }
    }

    fn integer(&mut self) -> Result<i64, LoadError> {
        self.skip_ws();
        let start = self.pos;
        if matches!(self.src.get(self.pos), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        while self.src.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }

        let parsed = std::str::from_utf8(&self.src[start..self.pos])
            .ok()
            .and_then(|digits| digits.parse().ok());
        match parsed {
            Some(value) => Ok(value),
            None => {
                self.pos = start;
                Err(self.malformed("expected an integer"))
            }
        }
    }

    fn tuple(&mut self) -> Result<[i64; 4], LoadError> {
        self.skip_ws();
        self.expect(b'{')?;
        let mut values = [0; 4];
        for (i, value) in values.iter_mut().enumerate() {
            if i > 0 {
                self.expect(b',')?;
            }
            *value = self.integer()?;
        }
        self.expect(b'}')?;
        self.expect(b',')?;

        Ok(values)
    }

    /// Read one record; the opening `{` has already been consumed.
    fn level(&mut self) -> Result<Level, LoadError> {
        let mut tuples = vec![self.tuple()?];
        loop {
            match self.peek() {
                Some(b'{') => tuples.push(self.tuple()?),
                Some(b'0'..=b'9' | b'+' | b'-') => break,
                Some(b) => return Err(self.malformed(format!("expected '{{' or the board size, found '{}'", b.escape_ascii()))),
                None => return Err(self.malformed("record ends after its flows")),
            }
        }

        let size = self.integer()?;
        let size = usize::try_from(size)
            .ok()
            .and_then(NonZero::new)
            .ok_or_else(|| self.malformed(format!("board size {size} is not positive")))?;
        if size.get() > MAX_BOARD_SIZE {
            return Err(self.malformed(format!("board size {size} is larger than {MAX_BOARD_SIZE}")));
        }
        self.expect(b',')?;
        let state = self.integer()?;
        let state = u8::try_from(state)
            .ok()
            .and_then(LevelState::from_repr)
            .ok_or_else(|| self.malformed(format!("unknown level state {state}")))?;
        self.expect(b',')?;
        let time_record = self.integer()?;
        let time_record = u32::try_from(time_record)
            .map_err(|_| self.malformed(format!("time record {time_record} out of range")))?;
        self.skip_ws();
        self.expect(b'}')?;

        let mut builder = LevelBuilder::with_size(size);
        builder.state(state).time_record(time_record);
        for [x1, y1, x2, y2] in tuples {
            let (Some(first), Some(last)) = (to_location(x1, y1), to_location(x2, y2)) else {
                return Err(LoadError::Invalid {
                    record: self.record,
                    reasons: vec![BuilderInvalidReason::FeatureOutOfBounds],
                });
            };
            builder.add_termini((first, last));
        }

        builder.build().map_err(|reasons| LoadError::Invalid { record: self.record, reasons })
    }
}

/// Convert 1-based pack coordinates.
fn to_location(x: i64, y: i64) -> Option<Location> {
    let x = usize::try_from(x.checked_sub(1)?).ok()?;
    let y = usize::try_from(y.checked_sub(1)?).ok()?;
    Some(Location(x, y))
}

/// Parse every level of a pack.
///
/// Either every record is read or none is: any error discards the levels read so far.
pub fn load_levels(source: &str) -> Result<Vec<Level>, LoadError> {
    let mut reader = Reader::new(source);
    let mut levels = Vec::new();
    while reader.seek_record() {
        levels.push(reader.level()?);
    }

    if levels.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(levels)
}

/// Write `levels` back in the pack grammar, one record per line.
pub fn save_levels(levels: &[Level], policy: TimeRecordPolicy) -> String {
    levels.iter()
        .map(|level| {
            let mut record = String::from("{");
            for flow in level.flows() {
                let (first, last) = flow.termini();
                // writing to a String cannot fail
                let _ = write!(record, "{{{},{},{},{}}},", first.0 + 1, first.1 + 1, last.0 + 1, last.1 + 1);
            }
            let time_record = match policy {
                TimeRecordPolicy::Reset => 0,
                TimeRecordPolicy::Preserve => level.time_record(),
            };
            let _ = write!(record, "{},{},{}}}", level.size(), level.rating() as u8, time_record);
            record
        })
        .join("\n")
}

/// Load the pack at `path`. A missing file is an empty pack.
pub fn read_levels(path: impl AsRef<Path>) -> Result<Vec<Level>, LoadError> {
    let path = path.as_ref();
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "level pack not found, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    match load_levels(&source) {
        Ok(levels) => {
            info!(path = %path.display(), count = levels.len(), "loaded level pack");
            Ok(levels)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "rejected level pack");
            Err(e)
        }
    }
}

/// Save `levels` to `path`, replacing it.
pub fn write_levels(path: impl AsRef<Path>, levels: &[Level], policy: TimeRecordPolicy) -> io::Result<()> {
    let path = path.as_ref();
    fs::write(path, save_levels(levels, policy))?;
    info!(path = %path.display(), count = levels.len(), ?policy, "saved level pack");
    Ok(())
}
