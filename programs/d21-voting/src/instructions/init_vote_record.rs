use anchor_lang::prelude::*;
use crate::{
    constants::*,
    state::{Poll, VoteRecord},
};

// Accounts needed for preparing a voter's record
#[derive(Accounts)]
pub struct InitVoteRecord<'info> {
    #[account(mut)]
    pub voter: Signer<'info>,

    #[account(
        mut,
        seeds = [POLL_SEED, poll.authority.as_ref(), poll.poll_id.to_le_bytes().as_ref()],
        bump
    )]
    pub poll: Account<'info, Poll>,

    // Calling twice must not wipe votes already cast
    #[account(
        init_if_needed,
        payer = voter,
        space = VoteRecord::space(poll.max_candidates),
        seeds = [VOTE_SEED, poll.key().as_ref(), voter.key().as_ref()],
        bump
    )]
    pub vote_record: Account<'info, VoteRecord>,

    pub system_program: Program<'info, System>,
}

impl<'info> InitVoteRecord<'info> {
    pub fn init_vote_record(&mut self) -> Result<()> {
        let poll_key = self.poll.key();
        let voter = self.voter.key();

        if self
            .vote_record
            .initialize(poll_key, voter, self.poll.max_candidates)
        {
            msg!("Vote record created for {} on poll {}", voter, poll_key);
        } else {
            msg!(
                "Vote record for {} already exists ({} votes used), nothing to do",
                voter,
                self.vote_record.used_votes
            );
        }

        Ok(())
    }
}
