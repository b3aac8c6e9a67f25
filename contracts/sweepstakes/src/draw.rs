use std::collections::HashSet;
use std::convert::TryFrom;

use crate::error::ContractError;
use crate::ledger::Ledger;
use crate::rand::{derive_seed, rank_hash, rank_sample, scale_to_weight, Seed};
use crate::ranges::build_weight_ranges;
use sweepstakes_export::state::{PrizeTable, Winner};

/// Outcome of a draw, winners ordered by rank
#[derive(Clone, Debug, PartialEq)]
pub struct Draw {
    pub seed: Seed,
    pub winners: Vec<Winner>,
}

impl Draw {
    pub fn winning_ticket_ids(&self) -> Vec<String> {
        self.winners.iter().map(|winner| winner.ticket_id.clone()).collect()
    }
}

/// Weighted draw without replacement, one winner per rank of the prize table.
///
/// For every rank, the tickets that didn't win yet are laid out on `[0, total)`.
/// `SHA-256(seed || nonce || rank)` picks a point on that segment and the ticket owning it wins.
/// The draw stops early when no weight is left, fewer winners than ranks is a valid outcome.
/// Nothing here is retried, any error aborts the whole selection.
pub fn draw_winners(
    ledger: &Ledger,
    prize_table: &PrizeTable,
    nonce: &[u8],
) -> Result<Draw, ContractError> {
    let seed = derive_seed(nonce, &ledger.latest);
    let mut excluded: HashSet<String> = HashSet::new();
    let mut winners: Vec<Winner> = vec![];

    for rank in 1..=prize_table.total_winner_count() {
        let ranges = match build_weight_ranges(&ledger.tickets, &excluded)? {
            Some(ranges) => ranges,
            None => break,
        };

        let rank_byte = u8::try_from(rank)
            .map_err(|_| ContractError::InvalidPrizeTable("too many winners".to_string()))?;
        let sample = rank_sample(&rank_hash(&seed, nonce, rank_byte));
        let position = scale_to_weight(sample, ranges.total_weight())?;

        let ticket = ranges
            .locate(position)
            .ok_or(ContractError::Unreachable {})?
            .ticket;
        let prize = prize_table
            .prize_for_rank(rank)
            .ok_or(ContractError::PrizeNotFound { rank })?;

        winners.push(Winner {
            rank,
            label: prize.label.clone(),
            prize_amount: prize.amount,
            ticket_id: ticket.id.clone(),
            user: ticket.owner.clone(),
        });
        excluded.insert(ticket.id.clone());
    }

    Ok(Draw { seed, winners })
}
