use anchor_lang::prelude::*;
use crate::{constants::*, state::Poll};

// Accounts needed for closing a poll
#[derive(Accounts)]
pub struct ClosePoll<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [POLL_SEED, poll.authority.as_ref(), poll.poll_id.to_le_bytes().as_ref()],
        bump
    )]
    pub poll: Account<'info, Poll>,
}

impl<'info> ClosePoll<'info> {
    pub fn close_poll(&mut self) -> Result<()> {
        let was_open = self.poll.close_by(&self.authority.key())?;

        if !was_open {
            msg!("Poll {} was already closed", self.poll.key());
            return Ok(());
        }

        msg!("Poll closed: {}", self.poll.key());
        msg!("Total votes: {}", self.poll.total_votes());

        for (index, votes) in self.poll.vote_counts.iter().enumerate() {
            msg!("Candidate {}: {} votes", index, votes);
        }

        match self.poll.leading_candidates().as_slice() {
            [] => msg!("No votes were cast on this poll."),
            [winner] => msg!("Leader: candidate {}", winner),
            tied => msg!("Tied leaders: {:?}", tied),
        }

        Ok(())
    }
}
