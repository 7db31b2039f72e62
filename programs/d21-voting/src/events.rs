use anchor_lang::prelude::*;

// Emitted by cast_votes so indexers can audit every ballot
#[event]
pub struct VotesCastEvent {
    pub poll: Pubkey,
    pub voter: Pubkey,
    // Indices newly counted by this call
    pub added: u16,
    // voter's used_votes after the call
    pub total_used: u16,
}
