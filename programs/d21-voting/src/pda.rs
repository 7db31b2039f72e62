//! Program-derived addresses shared by the program's account checks and the
//! client-side instruction builders.

use anchor_lang::prelude::*;

use crate::constants::*;

/// Find the Poll address for an authority and its chosen poll id.
pub fn find_poll_address(program_id: &Pubkey, authority: &Pubkey, poll_id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[POLL_SEED, authority.as_ref(), &poll_id.to_le_bytes()],
        program_id,
    )
}

/// Find the Candidate address for a poll slot.
pub fn find_candidate_address(program_id: &Pubkey, poll: &Pubkey, index: u16) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[CANDIDATE_SEED, poll.as_ref(), &index.to_le_bytes()],
        program_id,
    )
}

/// Find the VoteRecord address of a voter in a poll.
pub fn find_vote_record_address(program_id: &Pubkey, poll: &Pubkey, voter: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VOTE_SEED, poll.as_ref(), voter.as_ref()], program_id)
}
