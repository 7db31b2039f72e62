use anchor_lang::prelude::*;

use crate::constants::*;

// One selectable option of a poll, addressed by its index
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Candidate {
    // Back-reference to the owning poll
    pub poll: Pubkey,

    // Slot in poll.vote_counts
    pub index: u16,

    pub name: String,
}

impl Candidate {
    pub fn space(max_name_bytes: u32) -> usize {
        DISCRIMINATOR_SIZE + CANDIDATE_FIXED_SIZE + LEN_PREFIX_SIZE + max_name_bytes as usize
    }

    pub fn new(poll: Pubkey, index: u16, name: String) -> Self {
        Self { poll, index, name }
    }
}
