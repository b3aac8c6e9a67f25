use std::collections::HashSet;

use cosmwasm_std::Decimal;

use crate::error::ContractError;
use sweepstakes_export::state::Ticket;

/// Half-open interval `[start, end)` owned by one ticket
#[derive(Clone, Debug, PartialEq)]
pub struct WeightRange<'a> {
    pub ticket: &'a Ticket,
    pub start: Decimal,
    pub end: Decimal,
}

impl<'a> WeightRange<'a> {
    pub fn contains(&self, position: Decimal) -> bool {
        self.start <= position && position < self.end
    }
}

/// Partition of `[0, total_weight)` between the tickets still in the draw
#[derive(Clone, Debug, PartialEq)]
pub struct WeightRanges<'a> {
    ranges: Vec<WeightRange<'a>>,
    total_weight: Decimal,
}

impl<'a> WeightRanges<'a> {
    pub fn ranges(&self) -> &[WeightRange<'a>] {
        &self.ranges
    }

    pub fn total_weight(&self) -> Decimal {
        self.total_weight
    }

    /// Finds the interval containing `position`.
    /// A position outside every interval resolves to the last one.
    pub fn locate(&self, position: Decimal) -> Option<&WeightRange<'a>> {
        self.ranges
            .iter()
            .find(|range| range.contains(position))
            .or_else(|| self.ranges.last())
    }
}

/// Lays the tickets that are not excluded end to end, starting back at 0.
/// Returns `None` when nothing is left to draw from (no ticket or no weight).
pub fn build_weight_ranges<'a>(
    tickets: &'a [Ticket],
    excluded: &HashSet<String>,
) -> Result<Option<WeightRanges<'a>>, ContractError> {
    let mut cursor = Decimal::zero();
    let mut ranges = Vec::with_capacity(tickets.len().saturating_sub(excluded.len()));

    for ticket in tickets.iter().filter(|ticket| !excluded.contains(&ticket.id)) {
        let end = cursor.checked_add(ticket.weight)?;
        ranges.push(WeightRange {
            ticket,
            start: cursor,
            end,
        });
        cursor = end;
    }

    if ranges.is_empty() || cursor.is_zero() {
        return Ok(None);
    }

    Ok(Some(WeightRanges {
        ranges,
        total_weight: cursor,
    }))
}
