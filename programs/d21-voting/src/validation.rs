//! Precondition checks for every mutating instruction.
//!
//! Each check runs before any account is written, so a failing instruction leaves all
//! state untouched. The order of the checks decides which error a caller sees when
//! several preconditions fail at once.

use anchor_lang::prelude::*;

use crate::{
    error::VoteError,
    state::{Poll, VoteRecord},
};

/// Everything cast_votes will write, computed up front.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VotePlan {
    /// Indices not yet voted by this voter, in submission order, without repeats
    pub new_indices: Vec<u16>,
    /// New tally for each entry of `new_indices`
    pub updated_counts: Vec<u64>,
    /// `used_votes` after the ballot
    pub used_votes: u16,
}

fn fits_budget(value: &str, budget: u32) -> bool {
    value.len() as u64 <= budget as u64
}

pub fn validate_create_poll(
    title: &str,
    max_candidates: u16,
    max_votes_per_voter: u16,
    max_title_bytes: u32,
) -> Result<()> {
    require!(max_candidates > 0, VoteError::ZeroCandidatesNotAllowed);
    require!(max_votes_per_voter > 0, VoteError::ZeroVotesPerVoter);
    require!(
        fits_budget(title, max_title_bytes),
        VoteError::TitleTooLongAtInit
    );
    Ok(())
}

pub fn validate_add_candidate(
    poll: &Poll,
    signer: &Pubkey,
    index: u16,
    name: &str,
    max_name_bytes: u32,
) -> Result<()> {
    require!(poll.is_open, VoteError::PollClosed);
    require_keys_eq!(*signer, poll.authority, VoteError::Unauthorized);
    require!(!poll.is_full(), VoteError::MaxCandidatesReached);

    // Dense indices keep vote_counts[index] addressing trivial
    if index != poll.next_candidate_index() {
        msg!(
            "Candidate index {} rejected, next free index is {}",
            index,
            poll.next_candidate_index()
        );
        return err!(VoteError::InvalidCandidateIndex);
    }

    require!(
        fits_budget(name, max_name_bytes),
        VoteError::NameTooLongAtInit
    );
    Ok(())
}

pub fn plan_votes(
    poll: &Poll,
    poll_key: &Pubkey,
    voter: &Pubkey,
    record: &VoteRecord,
    indices: &[u16],
) -> Result<VotePlan> {
    require!(poll.is_open, VoteError::PollClosed);
    require!(!indices.is_empty(), VoteError::NoVotesSubmitted);
    require!(
        indices.iter().all(|&index| index < poll.candidate_count),
        VoteError::InvalidCandidateIndex
    );
    require_keys_eq!(record.poll, *poll_key, VoteError::MismatchedPollInRecord);
    require_keys_eq!(record.voter, *voter, VoteError::Unauthorized);

    let remaining = record.remaining_votes(poll.max_votes_per_voter) as usize;
    // Same shape as voted_bitmap, for picks made earlier in this ballot
    let mut seen = vec![0u8; record.voted_bitmap.len()];
    let mut new_indices: Vec<u16> = Vec::new();
    for &index in indices {
        require!(record.covers(index), VoteError::InvalidCandidateIndex);
        let (byte, mask) = (index as usize / 8, 1u8 << (index % 8));
        if record.has_voted(index) || seen[byte] & mask != 0 {
            continue;
        }
        seen[byte] |= mask;
        new_indices.push(index);

        if new_indices.len() > remaining {
            msg!(
                "Quota exceeded: {} used, {} allowed",
                record.used_votes,
                poll.max_votes_per_voter
            );
            return err!(VoteError::VotesQuotaExceeded);
        }
    }
    require!(!new_indices.is_empty(), VoteError::NoNewVotes);

    let used_votes = record
        .used_votes
        .checked_add(new_indices.len() as u16)
        .ok_or(VoteError::Overflow)?;

    let mut updated_counts = Vec::with_capacity(new_indices.len());
    for &index in &new_indices {
        let current = poll
            .vote_counts
            .get(index as usize)
            .ok_or(VoteError::InvalidCandidateIndex)?;
        updated_counts.push(current.checked_add(1).ok_or(VoteError::Overflow)?);
    }

    Ok(VotePlan {
        new_indices,
        updated_counts,
        used_votes,
    })
}

pub fn validate_close_poll(poll: &Poll, signer: &Pubkey) -> Result<()> {
    require_keys_eq!(*signer, poll.authority, VoteError::Unauthorized);
    Ok(())
}
