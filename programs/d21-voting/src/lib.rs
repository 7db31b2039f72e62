use anchor_lang::prelude::*;

pub mod builder;
pub mod codec;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod pda;
pub mod query;
pub mod state;
pub mod validation;

pub use instructions::*;

declare_id!("2CNQMKvkPPfgiZFKJar6gyWc6bquTV2jW7NEHMfynLBs");

#[program]
pub mod d21voting {
    use super::*;

    // Open a poll with a fixed candidate capacity and per-voter quota
    pub fn create_poll(
        ctx: Context<CreatePoll>,
        poll_id: u64,
        title: String,
        max_candidates: u16,
        max_votes_per_voter: u16,
        max_title_bytes: u32,
    ) -> Result<()> {
        ctx.accounts.create_poll(
            poll_id,
            title,
            max_candidates,
            max_votes_per_voter,
            max_title_bytes,
        )
    }

    // Register the next candidate slot (authority only)
    pub fn add_candidate(
        ctx: Context<AddCandidate>,
        index: u16,
        name: String,
        max_name_bytes: u32,
    ) -> Result<()> {
        ctx.accounts.add_candidate(index, name, max_name_bytes)
    }

    // Count a ballot of distinct candidate indices
    pub fn cast_votes(ctx: Context<CastVotes>, indices: Vec<u16>) -> Result<()> {
        ctx.accounts.cast_votes(indices)
    }

    // Create the caller's vote record, or leave an existing one untouched
    pub fn init_vote_record(ctx: Context<InitVoteRecord>) -> Result<()> {
        ctx.accounts.init_vote_record()
    }

    // Stop accepting candidates and votes (authority only)
    pub fn close_poll(ctx: Context<ClosePoll>) -> Result<()> {
        ctx.accounts.close_poll()
    }
}
