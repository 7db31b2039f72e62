use anchor_lang::prelude::*;
use crate::{constants::*, state::Poll};

// Accounts needed for opening a new poll
#[derive(Accounts)]
#[instruction(poll_id: u64, title: String, max_candidates: u16, max_votes_per_voter: u16, max_title_bytes: u32)]
pub struct CreatePoll<'info> {
    // Owner of the poll, pays for the account
    #[account(mut)]
    pub authority: Signer<'info>,

    // Sized once for the largest title and candidate list the poll will ever hold
    #[account(
        init,
        payer = authority,
        space = Poll::space(max_title_bytes, max_candidates),
        seeds = [POLL_SEED, authority.key().as_ref(), poll_id.to_le_bytes().as_ref()],
        bump
    )]
    pub poll: Account<'info, Poll>,

    pub system_program: Program<'info, System>,
}

impl<'info> CreatePoll<'info> {
    pub fn create_poll(
        &mut self,
        poll_id: u64,
        title: String,
        max_candidates: u16,
        max_votes_per_voter: u16,
        max_title_bytes: u32,
    ) -> Result<()> {
        let poll = Poll::new(
            self.authority.key(),
            poll_id,
            title,
            max_candidates,
            max_votes_per_voter,
            max_title_bytes,
        )?;
        self.poll.set_inner(poll);

        msg!("Poll created: {}", self.poll.key());
        msg!("Poll ID: {}", poll_id);
        msg!("Authority: {}", self.authority.key());
        msg!(
            "Capacity: {} candidates, {} votes per voter",
            max_candidates,
            max_votes_per_voter
        );

        Ok(())
    }
}
