use anchor_lang::prelude::*;

use crate::{
    constants::*,
    error::VoteError,
    state::VoteRecord,
    validation::{self, VotePlan},
};

// The Poll account: rules, lifecycle flag and running tallies of one election.
// Field order is the on-chain layout the client decodes.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Poll {
    // Only this key may add candidates or close the poll
    pub authority: Pubkey,

    // Caller-chosen id, part of the PDA seeds
    pub poll_id: u64,

    // Open -> Closed is the only transition, and it is terminal
    pub is_open: bool,

    // Distinct candidates a single voter may pick
    pub max_votes_per_voter: u16,

    // Capacity fixed at creation
    pub max_candidates: u16,

    // Always equal to vote_counts.len()
    pub candidate_count: u16,

    pub title: String,

    // One slot per candidate index
    pub vote_counts: Vec<u64>,
}

/// Outcome of a successful cast_votes transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VotesCast {
    pub added: u16,
    pub total_used: u16,
}

impl Poll {
    /// Account space reserved at creation, discriminator included.
    pub fn space(max_title_bytes: u32, max_candidates: u16) -> usize {
        DISCRIMINATOR_SIZE
            + POLL_FIXED_SIZE
            + LEN_PREFIX_SIZE
            + max_title_bytes as usize
            + LEN_PREFIX_SIZE
            + 8 * max_candidates as usize
    }

    /// Build a freshly opened poll after checking its configuration.
    pub fn new(
        authority: Pubkey,
        poll_id: u64,
        title: String,
        max_candidates: u16,
        max_votes_per_voter: u16,
        max_title_bytes: u32,
    ) -> Result<Self> {
        validation::validate_create_poll(
            &title,
            max_candidates,
            max_votes_per_voter,
            max_title_bytes,
        )?;

        Ok(Self {
            authority,
            poll_id,
            is_open: true,
            max_votes_per_voter,
            max_candidates,
            candidate_count: 0,
            title,
            vote_counts: Vec::with_capacity(max_candidates as usize),
        })
    }

    // Indices are dense, so the next candidate always takes this slot
    pub fn next_candidate_index(&self) -> u16 {
        self.candidate_count
    }

    pub fn is_full(&self) -> bool {
        self.candidate_count >= self.max_candidates
    }

    /// Register a new candidate slot: bumps `candidate_count` and appends a zero tally.
    pub fn add_candidate(
        &mut self,
        signer: &Pubkey,
        index: u16,
        name: &str,
        max_name_bytes: u32,
    ) -> Result<()> {
        validation::validate_add_candidate(self, signer, index, name, max_name_bytes)?;

        let next_count = self
            .candidate_count
            .checked_add(1)
            .ok_or(VoteError::Overflow)?;

        self.vote_counts.push(0);
        self.candidate_count = next_count;

        Ok(())
    }

    /// Apply a voter's ballot. Either every new index is counted or nothing changes.
    pub fn cast_votes(
        &mut self,
        poll_key: &Pubkey,
        voter: &Pubkey,
        record: &mut VoteRecord,
        indices: &[u16],
    ) -> Result<VotesCast> {
        let VotePlan {
            new_indices,
            updated_counts,
            used_votes,
        } = validation::plan_votes(self, poll_key, voter, record, indices)?;

        for (&index, &count) in new_indices.iter().zip(updated_counts.iter()) {
            self.vote_counts[index as usize] = count;
            record.mark_voted(index);
        }
        record.used_votes = used_votes;

        Ok(VotesCast {
            added: new_indices.len() as u16,
            total_used: used_votes,
        })
    }

    /// Close the poll. Returns false when it was already closed.
    pub fn close_by(&mut self, signer: &Pubkey) -> Result<bool> {
        validation::validate_close_poll(self, signer)?;

        let was_open = self.is_open;
        self.is_open = false;

        Ok(was_open)
    }

    pub fn total_votes(&self) -> u128 {
        self.vote_counts.iter().map(|&votes| votes as u128).sum()
    }

    /// Indices holding the highest tally. Empty until at least one vote is counted.
    pub fn leading_candidates(&self) -> Vec<u16> {
        let max_votes = match self.vote_counts.iter().copied().max() {
            Some(max) if max > 0 => max,
            _ => return Vec::new(),
        };

        self.vote_counts
            .iter()
            .enumerate()
            .filter(|(_, votes)| **votes == max_votes)
            .map(|(index, _)| index as u16)
            .collect()
    }
}
