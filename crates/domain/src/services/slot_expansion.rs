//! Expand availability rules into dated slots for an inclusive date range.
//!
//! Expansion is calendar-day arithmetic on naive dates. The rule's timezone
//! label is copied onto each slot and never used to shift dates or times.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::models::{ExpandedSlot, Recurrence, RecurrenceRule, SlotEntry};
use shared::time::parse_time_to_minutes;

/// Expands `rules` over `[from, to]` (both inclusive).
///
/// Inactive rules are skipped. The result is sorted by `(date, start minutes)`;
/// slots that tie keep the order of their rules in `rules`. An inverted range
/// yields no slots.
pub fn expand(rules: &[RecurrenceRule], from: NaiveDate, to: NaiveDate) -> Vec<ExpandedSlot> {
    if from > to {
        return Vec::new();
    }

    let mut slots = Vec::new();
    for rule in rules.iter().filter(|r| r.is_active) {
        match rule.recurrence {
            Recurrence::OneOff { date } => {
                if from <= date && date <= to {
                    slots.push(slot_for(rule, date));
                }
            }
            Recurrence::Daily { window } => {
                let (start, end) = window.resolve(from, to);
                slots.extend(days_between(start.max(from), end.min(to)).map(|d| slot_for(rule, d)));
            }
            Recurrence::Weekly {
                day_of_week,
                window,
            } => {
                let (start, end) = window.resolve(from, to);
                slots.extend(
                    days_between(start.max(from), end.min(to))
                        .filter(|d| d.weekday().num_days_from_sunday() == u32::from(day_of_week))
                        .map(|d| slot_for(rule, d)),
                );
            }
        }
    }

    slots.sort_by_key(|s| (s.date, parse_time_to_minutes(&s.start_time).unwrap_or(0)));
    slots
}

/// Groups an expanded, sorted sequence by date, preserving per-date order.
pub fn group_by_date(slots: Vec<ExpandedSlot>) -> BTreeMap<NaiveDate, Vec<SlotEntry>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<SlotEntry>> = BTreeMap::new();
    for slot in slots {
        grouped.entry(slot.date).or_default().push(slot.into());
    }
    grouped
}

/// Every date in `[start, end]`; empty when `start > end`.
fn days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

fn slot_for(rule: &RecurrenceRule, date: NaiveDate) -> ExpandedSlot {
    ExpandedSlot {
        rule_id: rule.id,
        date,
        start_time: rule.start_time.clone(),
        end_time: rule.end_time.clone(),
        timezone: rule.timezone.clone(),
    }
}
