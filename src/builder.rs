//! Putting levels together by hand.

use std::num::NonZero;
use std::ops::IndexMut;

use ndarray::{Array2, AssignElem};

use crate::affiliation::{Color, FlowId};
use crate::flow::Flow;
use crate::level::{Level, LevelState};
use crate::location::{Dimension, Location};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A terminus was placed outside the board.
    FeatureOutOfBounds,
    /// Both termini of one flow were placed on the same cell.
    TerminiCoincide,
    /// A terminus was placed on a cell already holding another flow's terminus.
    TerminusOccupied,
    /// The board has no flows at all.
    NoTermini,
}

/// A builder for square levels.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Flows are colored from the [`PALETTE`](crate::affiliation::PALETTE) in the order their termini are added.
#[derive(Clone, Debug)]
pub struct LevelBuilder {
    size: Dimension,
    // which flow's terminus sits on each cell
    cells: Array2<Option<FlowId>>,
    termini: Vec<(Location, Location)>,
    state: LevelState,
    time_record: u32,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for LevelBuilder {
    fn default() -> Self {
        Self::with_size(NonZero::new(5).unwrap())
    }
}

impl LevelBuilder {
    /// Construct a new [`Self`] for a `size` by `size` board.
    pub fn with_size(size: Dimension) -> Self {
        Self {
            size,
            cells: Array2::from_elem((size.get(), size.get()), None),
            termini: Default::default(),
            state: Default::default(),
            time_record: 0,
            invalid_reasons: Default::default(),
        }
    }

    /// Add the termini of the next flow, first terminus then last.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds),
    /// [`TerminiCoincide`](BuilderInvalidReason::TerminiCoincide) or
    /// [`TerminusOccupied`](BuilderInvalidReason::TerminusOccupied) invalid state.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_termini(&mut self, locations: (Location, Location)) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        for location in [locations.0, locations.1] {
            if !location.is_within(self.size) {
                self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
                return self;
            }
            if self.cells[location.as_index()].is_some() {
                self.invalid_reasons.push(BuilderInvalidReason::TerminusOccupied);
                return self;
            }
        }

        if locations.0 == locations.1 {
            self.invalid_reasons.push(BuilderInvalidReason::TerminiCoincide);
            return self;
        }

        let flow = self.termini.len();
        self.termini.push(locations);
        for location in [locations.0, locations.1] {
            self.cells.index_mut(location.as_index()).assign_elem(Some(flow));
        }

        self
    }

    /// Remove the most recently added pair of termini.
    ///
    /// If the builder is in an invalid state or no termini are present, this function does nothing.
    pub fn pop_termini(&mut self) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if let Some((first, last)) = self.termini.pop() {
            for location in [first, last] {
                self.cells.index_mut(location.as_index()).assign_elem(None);
            }
        }

        self
    }

    /// Set the solve state recorded for this level.
    pub fn state(&mut self, state: LevelState) -> &mut Self {
        self.state = state;
        self
    }

    /// Set the best time recorded for this level.
    pub fn time_record(&mut self, time_record: u32) -> &mut Self {
        self.time_record = time_record;
        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Level`] whose flows are all pristine.
    /// If the builder is invalid for any reason, the returned [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Level, Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(self.invalid_reasons.clone());
        }
        if self.termini.is_empty() {
            return Err(vec![BuilderInvalidReason::NoTermini]);
        }

        let flows = self.termini.iter()
            .enumerate()
            .map(|(index, termini)| Flow::new(*termini, Color::from_palette(index)))
            .collect();

        Ok(Level::new(self.size, flows, self.state, self.time_record))
    }
}
