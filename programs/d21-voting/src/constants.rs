// PDA Seeds for deterministic address generation

// Seed for Poll PDAs: ["poll", authority.key(), poll_id (u64 LE)]
// Each authority can run many polls, one per poll_id
pub const POLL_SEED: &[u8] = b"poll";

// Seed for Candidate PDAs: ["candidate", poll.key(), index (u16 LE)]
pub const CANDIDATE_SEED: &[u8] = b"candidate";

// Seed for VoteRecord PDAs: ["vote", poll.key(), voter.key()]
// One record per voter per poll
pub const VOTE_SEED: &[u8] = b"vote";

// Anchor discriminator size (8 bytes)
pub const DISCRIMINATOR_SIZE: usize = 8;

// Fixed field widths of the account layouts
pub const PUBKEY_SIZE: usize = 32;
pub const LEN_PREFIX_SIZE: usize = 4;

// authority + poll_id + is_open + max_votes_per_voter + max_candidates + candidate_count
pub const POLL_FIXED_SIZE: usize = PUBKEY_SIZE + 8 + 1 + 2 + 2 + 2;

// poll + index
pub const CANDIDATE_FIXED_SIZE: usize = PUBKEY_SIZE + 2;

// poll + voter + used_votes
pub const VOTE_RECORD_FIXED_SIZE: usize = PUBKEY_SIZE + PUBKEY_SIZE + 2;

// Byte offset of the `poll` back-reference inside Candidate and VoteRecord accounts
pub const POLL_REF_OFFSET: usize = DISCRIMINATOR_SIZE;

// Basis points in 100%
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Number of bytes needed for a one-bit-per-candidate bitmap.
pub fn bitmap_len(max_candidates: u16) -> usize {
    (max_candidates as usize + 7) / 8
}
