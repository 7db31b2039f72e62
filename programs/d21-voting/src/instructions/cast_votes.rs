use anchor_lang::prelude::*;
use crate::{
    constants::*,
    events::VotesCastEvent,
    state::{Poll, VoteRecord},
};

// Accounts needed for casting a ballot
#[derive(Accounts)]
pub struct CastVotes<'info> {
    #[account(mut)]
    pub voter: Signer<'info>,

    #[account(
        mut,
        seeds = [POLL_SEED, poll.authority.as_ref(), poll.poll_id.to_le_bytes().as_ref()],
        bump
    )]
    pub poll: Account<'info, Poll>,

    // Must already exist, see init_vote_record
    #[account(
        mut,
        seeds = [VOTE_SEED, poll.key().as_ref(), voter.key().as_ref()],
        bump
    )]
    pub vote_record: Account<'info, VoteRecord>,
}

impl<'info> CastVotes<'info> {
    pub fn cast_votes(&mut self, indices: Vec<u16>) -> Result<()> {
        let poll_key = self.poll.key();
        let voter = self.voter.key();

        let cast = self
            .poll
            .cast_votes(&poll_key, &voter, &mut self.vote_record, &indices)?;

        msg!("Votes cast on poll {} by {}", poll_key, voter);
        msg!(
            "Added: {}, used: {}/{}",
            cast.added,
            cast.total_used,
            self.poll.max_votes_per_voter
        );

        emit!(VotesCastEvent {
            poll: poll_key,
            voter,
            added: cast.added,
            total_used: cast.total_used,
        });

        Ok(())
    }
}
