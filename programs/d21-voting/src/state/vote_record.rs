use anchor_lang::prelude::*;

use crate::constants::*;

// Per-voter bookkeeping for one poll: how much of the quota is spent and on whom
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct VoteRecord {
    // Poll this record counts against
    pub poll: Pubkey,

    // Signer that owns the record
    pub voter: Pubkey,

    // Always equal to the number of set bits in voted_bitmap
    pub used_votes: u16,

    // Bit i of byte i / 8 (LSB first) is set once candidate i got this voter's vote
    pub voted_bitmap: Vec<u8>,
}

impl VoteRecord {
    pub fn space(max_candidates: u16) -> usize {
        DISCRIMINATOR_SIZE + VOTE_RECORD_FIXED_SIZE + LEN_PREFIX_SIZE + bitmap_len(max_candidates)
    }

    pub fn new(poll: Pubkey, voter: Pubkey, max_candidates: u16) -> Self {
        Self {
            poll,
            voter,
            used_votes: 0,
            voted_bitmap: vec![0; bitmap_len(max_candidates)],
        }
    }

    /// A zeroed account (fresh from allocation) has no poll link yet.
    pub fn is_initialized(&self) -> bool {
        self.poll != Pubkey::default()
    }

    /// Fill in a freshly allocated record. Returns false, leaving the record untouched,
    /// when it already belongs to someone.
    pub fn initialize(&mut self, poll: Pubkey, voter: Pubkey, max_candidates: u16) -> bool {
        if self.is_initialized() {
            return false;
        }

        *self = Self::new(poll, voter, max_candidates);
        true
    }

    /// Whether the bitmap has a bit for this index at all.
    pub fn covers(&self, index: u16) -> bool {
        (index as usize / 8) < self.voted_bitmap.len()
    }

    pub fn has_voted(&self, index: u16) -> bool {
        self.voted_bitmap
            .get(index as usize / 8)
            .map_or(false, |byte| byte & (1 << (index % 8)) != 0)
    }

    pub(crate) fn mark_voted(&mut self, index: u16) {
        if let Some(byte) = self.voted_bitmap.get_mut(index as usize / 8) {
            *byte |= 1 << (index % 8);
        }
    }

    /// Candidate indices this voter has already picked, ascending.
    pub fn voted_indices(&self) -> Vec<u16> {
        (0..self.voted_bitmap.len() * 8)
            .map(|index| index as u16)
            .filter(|&index| self.has_voted(index))
            .collect()
    }

    pub fn remaining_votes(&self, max_votes_per_voter: u16) -> u16 {
        max_votes_per_voter.saturating_sub(self.used_votes)
    }
}
