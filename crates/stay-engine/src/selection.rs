//! Range selection flow: `Empty -> StartSelected -> RangeComplete`.
//!
//! Every transition re-evaluates the picked day against the snapshot handed in,
//! so the machine holds no reservation state of its own.

use chrono::NaiveDate;

use crate::availability::{is_day_selectable, ProposedRange};
use crate::reservation::Reservation;

/// Where the user is in picking a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeSelection {
    #[default]
    Empty,
    StartSelected {
        from: NaiveDate,
    },
    RangeComplete(ProposedRange),
}

/// Result of feeding one picked day into the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The day became the check-in day of a new selection.
    Started(NaiveDate),
    /// The day was before the current check-in and replaced it.
    Restarted(NaiveDate),
    /// The day closed the range.
    Completed(ProposedRange),
    /// The day is not selectable; state is unchanged.
    Rejected,
}

impl RangeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The day picked first, if any.
    pub fn tentative_start(&self) -> Option<NaiveDate> {
        match self {
            Self::Empty => None,
            Self::StartSelected { from } => Some(*from),
            Self::RangeComplete(range) => Some(range.from),
        }
    }

    /// The complete range, once both ends are picked.
    pub fn proposed_range(&self) -> Option<ProposedRange> {
        match self {
            Self::RangeComplete(range) => Some(*range),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::RangeComplete(_))
    }

    /// Feed a picked day.
    pub fn select(
        &mut self,
        day: NaiveDate,
        reservations: &[Reservation],
        today: NaiveDate,
    ) -> SelectOutcome {
        match *self {
            Self::Empty | Self::RangeComplete(_) => {
                if !is_day_selectable(day, reservations, None, today) {
                    return SelectOutcome::Rejected;
                }
                *self = Self::StartSelected { from: day };
                SelectOutcome::Started(day)
            }
            Self::StartSelected { from } if day < from => {
                if !is_day_selectable(day, reservations, None, today) {
                    return SelectOutcome::Rejected;
                }
                *self = Self::StartSelected { from: day };
                SelectOutcome::Restarted(day)
            }
            Self::StartSelected { from } => {
                if !is_day_selectable(day, reservations, Some(from), today) {
                    return SelectOutcome::Rejected;
                }
                let range = ProposedRange { from, to: day };
                *self = Self::RangeComplete(range);
                SelectOutcome::Completed(range)
            }
        }
    }

    /// Reopen a complete range for a new check-out day, keeping check-in.
    pub fn back_to_start(&mut self) {
        if let Self::RangeComplete(range) = *self {
            *self = Self::StartSelected { from: range.from };
        }
    }

    pub fn clear(&mut self) {
        *self = Self::Empty;
    }
}
