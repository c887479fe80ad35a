//! The rotation engine.
//!
//! Maps `(start date, roster length, reference date)` to the index of the
//! responsible member and enumerates the turns around it. Nothing here holds
//! state between calls: every query recomputes from its inputs, so a roster
//! that grows or shrinks takes effect on the next call.

use time::{Date, Weekday};

use crate::calendar::{current_cycle_anchor, days_until, shift_days, weeks_between};
use crate::error::RotaError;
use crate::model::Turn;
use crate::roster::Member;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    start_date: Date,
    cycle_day: Weekday,
    start_index: usize,
}

impl Rotation {
    pub fn new(start_date: Date, cycle_day: Weekday) -> Self {
        Self {
            start_date,
            cycle_day,
            start_index: 0,
        }
    }

    /// Roster position responsible for the first turn (default 0).
    pub fn with_start_index(mut self, start_index: usize) -> Self {
        self.start_index = start_index;
        self
    }

    /// Whole cycles elapsed between the start date and `anchor`, never
    /// negative.
    fn cycles_elapsed(&self, anchor: Date) -> i64 {
        if anchor < self.start_date {
            return 0;
        }
        weeks_between(self.start_date, anchor)
    }

    fn index_after(&self, cycles: i64, roster_len: usize) -> usize {
        let len = roster_len as i64;
        ((cycles + self.start_index as i64).rem_euclid(len)) as usize
    }

    /// Index owning the turn on cycle-day `anchor`, computed forward from the
    /// start date.
    pub fn index_for_anchor(&self, anchor: Date, roster_len: usize) -> Result<usize, RotaError> {
        ensure_roster(roster_len)?;
        Ok(self.index_after(self.cycles_elapsed(anchor), roster_len))
    }

    /// Index of the member responsible for the cycle that owns `reference`.
    ///
    /// Before the start date the rotation has not begun and the first member
    /// is responsible.
    pub fn current_index(&self, roster_len: usize, reference: Date) -> Result<usize, RotaError> {
        ensure_roster(roster_len)?;
        if reference < self.start_date {
            return Ok(self.index_after(0, roster_len));
        }
        let anchor = current_cycle_anchor(reference, self.cycle_day)?;
        self.index_for_anchor(anchor, roster_len)
    }

    pub fn current_turn<'a>(
        &self,
        roster: &'a [Member],
        reference: Date,
    ) -> Result<Turn<'a>, RotaError> {
        let index = self.current_index(roster.len(), reference)?;
        let date = current_cycle_anchor(reference, self.cycle_day)?;
        let days_remaining = days_until(reference, date);
        Ok(Turn {
            date,
            index,
            member: &roster[index],
            days_remaining,
            is_today: days_remaining == 0 && reference.weekday() == self.cycle_day,
        })
    }

    /// The next `count` turns after the current one, soonest first.
    ///
    /// `count` defaults to one lap of the roster minus the current turn.
    pub fn upcoming_turns<'a>(
        &self,
        roster: &'a [Member],
        reference: Date,
        count: Option<usize>,
    ) -> Result<Vec<Turn<'a>>, RotaError> {
        let len = roster.len();
        let current = self.current_index(len, reference)?;
        let anchor = current_cycle_anchor(reference, self.cycle_day)?;
        let count = count.unwrap_or(len - 1);

        // `count` is caller-supplied; an absurd one must end at DateOutOfRange.
        let mut turns = Vec::with_capacity(count.min(len));
        for i in 1..=count {
            let date = shift_days(anchor, 7 * i as i64)?;
            let index = (current + i) % len;
            turns.push(Turn {
                date,
                index,
                member: &roster[index],
                days_remaining: days_until(reference, date),
                is_today: false,
            });
        }
        Ok(turns)
    }

    /// Turns before the current one, most recent first.
    ///
    /// Stops at the start date or after `limit` turns; `None` walks all the
    /// way back. Elapsed turns report `days_remaining == 0`.
    pub fn past_turns<'a>(
        &self,
        roster: &'a [Member],
        reference: Date,
        limit: Option<usize>,
    ) -> Result<Vec<Turn<'a>>, RotaError> {
        let len = roster.len();
        let current = self.current_index(len, reference)?;
        let anchor = current_cycle_anchor(reference, self.cycle_day)?;

        let mut turns = Vec::new();
        let mut i: usize = 1;
        loop {
            if limit.is_some_and(|n| turns.len() >= n) {
                break;
            }
            let date = shift_days(anchor, -7 * i as i64)?;
            if date < self.start_date {
                break;
            }
            let index = (current as i64 - i as i64).rem_euclid(len as i64) as usize;
            turns.push(Turn {
                date,
                index,
                member: &roster[index],
                days_remaining: 0,
                is_today: false,
            });
            i += 1;
        }
        Ok(turns)
    }
}

fn ensure_roster(len: usize) -> Result<(), RotaError> {
    if len == 0 {
        return Err(RotaError::InvalidRoster { len });
    }
    Ok(())
}
