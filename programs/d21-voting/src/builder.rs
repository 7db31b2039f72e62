//! Client-side instruction builders.
//!
//! Each builder derives the program addresses it needs and lays the accounts out in
//! the order the program's account structs expect.

use anchor_lang::{
    prelude::Pubkey,
    solana_program::instruction::{AccountMeta, Instruction},
    system_program,
};

use crate::{
    codec::{
        encode_instruction, CodecError, VotingInstruction, CLOSE_POLL_DISCRIMINATOR,
        INIT_VOTE_RECORD_DISCRIMINATOR,
    },
    pda::{find_candidate_address, find_poll_address, find_vote_record_address},
};

/// Creates a `create_poll` instruction.
///
///   0. `[s, w]` Poll authority, pays for the poll account
///   1. `[w]` Poll, derived from the authority and `poll_id`
///   2. `[]` System program
pub fn create_poll(
    program_id: &Pubkey,
    authority: &Pubkey,
    poll_id: u64,
    title: &str,
    max_candidates: u16,
    max_votes_per_voter: u16,
    max_title_bytes: u32,
) -> Result<Instruction, CodecError> {
    let data = encode_instruction(&VotingInstruction::CreatePoll {
        poll_id,
        title: title.to_string(),
        max_candidates,
        max_votes_per_voter,
        max_title_bytes,
    })?;
    let accounts = vec![
        AccountMeta::new(*authority, true),
        AccountMeta::new(find_poll_address(program_id, authority, poll_id).0, false),
        AccountMeta::new_readonly(system_program::ID, false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data,
    })
}

/// Creates an `add_candidate` instruction.
///
///   0. `[w]` Poll
///   1. `[w]` Candidate, derived from the poll and `index`
///   2. `[s, w]` Poll authority, pays for the candidate account
///   3. `[]` System program
pub fn add_candidate(
    program_id: &Pubkey,
    poll: &Pubkey,
    authority: &Pubkey,
    index: u16,
    name: &str,
    max_name_bytes: u32,
) -> Result<Instruction, CodecError> {
    let data = encode_instruction(&VotingInstruction::AddCandidate {
        index,
        name: name.to_string(),
        max_name_bytes,
    })?;
    let accounts = vec![
        AccountMeta::new(*poll, false),
        AccountMeta::new(find_candidate_address(program_id, poll, index).0, false),
        AccountMeta::new(*authority, true),
        AccountMeta::new_readonly(system_program::ID, false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data,
    })
}

/// Creates a `cast_votes` instruction.
///
///   0. `[s, w]` Voter
///   1. `[w]` Poll
///   2. `[w]` Voter's record, which must already exist
pub fn cast_votes(
    program_id: &Pubkey,
    poll: &Pubkey,
    voter: &Pubkey,
    indices: &[u16],
) -> Result<Instruction, CodecError> {
    let data = encode_instruction(&VotingInstruction::CastVotes {
        indices: indices.to_vec(),
    })?;
    let accounts = vec![
        AccountMeta::new(*voter, true),
        AccountMeta::new(*poll, false),
        AccountMeta::new(find_vote_record_address(program_id, poll, voter).0, false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data,
    })
}

/// Creates an `init_vote_record` instruction.
///
///   0. `[s, w]` Voter, pays for the record
///   1. `[w]` Poll
///   2. `[w]` Voter's record
///   3. `[]` System program
pub fn init_vote_record(program_id: &Pubkey, poll: &Pubkey, voter: &Pubkey) -> Instruction {
    let accounts = vec![
        AccountMeta::new(*voter, true),
        AccountMeta::new(*poll, false),
        AccountMeta::new(find_vote_record_address(program_id, poll, voter).0, false),
        AccountMeta::new_readonly(system_program::ID, false),
    ];

    Instruction {
        program_id: *program_id,
        accounts,
        data: INIT_VOTE_RECORD_DISCRIMINATOR.to_vec(),
    }
}

/// Creates a `close_poll` instruction.
///
///   0. `[s, w]` Poll authority
///   1. `[w]` Poll
pub fn close_poll(program_id: &Pubkey, poll: &Pubkey, authority: &Pubkey) -> Instruction {
    let accounts = vec![
        AccountMeta::new(*authority, true),
        AccountMeta::new(*poll, false),
    ];

    Instruction {
        program_id: *program_id,
        accounts,
        data: CLOSE_POLL_DISCRIMINATOR.to_vec(),
    }
}
