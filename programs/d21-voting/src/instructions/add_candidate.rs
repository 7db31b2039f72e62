use anchor_lang::prelude::*;
use crate::{constants::*, state::{Candidate, Poll}};

// Accounts needed for registering a candidate
#[derive(Accounts)]
#[instruction(index: u16, name: String, max_name_bytes: u32)]
pub struct AddCandidate<'info> {
    // Gains one tally slot
    #[account(
        mut,
        seeds = [POLL_SEED, poll.authority.as_ref(), poll.poll_id.to_le_bytes().as_ref()],
        bump
    )]
    pub poll: Account<'info, Poll>,

    #[account(
        init,
        payer = authority,
        space = Candidate::space(max_name_bytes),
        seeds = [CANDIDATE_SEED, poll.key().as_ref(), index.to_le_bytes().as_ref()],
        bump
    )]
    pub candidate: Account<'info, Candidate>,

    // Checked against poll.authority in the handler so the caller sees Unauthorized
    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> AddCandidate<'info> {
    pub fn add_candidate(&mut self, index: u16, name: String, max_name_bytes: u32) -> Result<()> {
        let poll_key = self.poll.key();

        // Poll and candidate are written in the same instruction, so both land or neither does
        self.poll
            .add_candidate(&self.authority.key(), index, &name, max_name_bytes)?;

        msg!("Candidate {} added to poll {}: {}", index, poll_key, name);
        msg!(
            "Candidates: {}/{}",
            self.poll.candidate_count,
            self.poll.max_candidates
        );

        self.candidate.set_inner(Candidate::new(poll_key, index, name));

        Ok(())
    }
}
