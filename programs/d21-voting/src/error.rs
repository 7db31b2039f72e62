use anchor_lang::prelude::*;

// Custom error types for the voting program.
// Variant order is part of the wire contract: Anchor numbers them from 6000.
#[error_code]
pub enum VoteError {
    #[msg("max_candidates must be > 0")]
    ZeroCandidatesNotAllowed,

    #[msg("max_votes_per_voter must be > 0")]
    ZeroVotesPerVoter,

    #[msg("poll is closed")]
    PollClosed,

    #[msg("unauthorized")]
    Unauthorized,

    #[msg("maximum number of candidates reached")]
    MaxCandidatesReached,

    #[msg("candidate name exceeds reserved length (max_name_bytes)")]
    NameTooLongAtInit,

    #[msg("title exceeds reserved length (max_title_bytes)")]
    TitleTooLongAtInit,

    #[msg("no votes submitted")]
    NoVotesSubmitted,

    #[msg("no new votes to add (duplicates or already voted)")]
    NoNewVotes,

    #[msg("votes-per-voter quota exceeded")]
    VotesQuotaExceeded,

    #[msg("invalid candidate index")]
    InvalidCandidateIndex,

    #[msg("arithmetic overflow")]
    Overflow,

    #[msg("vote record links to a different poll")]
    MismatchedPollInRecord,
}

/// How a caller is expected to react to a failed instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments; fix the input before resubmitting.
    Validation,
    /// Wrong signer for the poll.
    Authorization,
    /// Expected outcome of the current poll or voter state.
    StateConflict,
    /// Checked arithmetic tripped.
    Arithmetic,
}

pub const VOTE_ERROR_BASE: u32 = anchor_lang::error::ERROR_CODE_OFFSET;

impl VoteError {
    /// Every variant, in code order.
    pub const ALL: [VoteError; 13] = [
        VoteError::ZeroCandidatesNotAllowed,
        VoteError::ZeroVotesPerVoter,
        VoteError::PollClosed,
        VoteError::Unauthorized,
        VoteError::MaxCandidatesReached,
        VoteError::NameTooLongAtInit,
        VoteError::TitleTooLongAtInit,
        VoteError::NoVotesSubmitted,
        VoteError::NoNewVotes,
        VoteError::VotesQuotaExceeded,
        VoteError::InvalidCandidateIndex,
        VoteError::Overflow,
        VoteError::MismatchedPollInRecord,
    ];

    /// Numeric code surfaced to the client in the transaction error.
    pub fn code(&self) -> u32 {
        u32::from(*self)
    }

    /// Map a custom program error code back to its variant.
    pub fn from_code(code: u32) -> Option<VoteError> {
        Self::ALL.into_iter().find(|err| err.code() == code)
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            VoteError::ZeroCandidatesNotAllowed
            | VoteError::ZeroVotesPerVoter
            | VoteError::NameTooLongAtInit
            | VoteError::TitleTooLongAtInit
            | VoteError::NoVotesSubmitted
            | VoteError::InvalidCandidateIndex
            | VoteError::MismatchedPollInRecord => ErrorCategory::Validation,

            VoteError::Unauthorized => ErrorCategory::Authorization,

            VoteError::PollClosed
            | VoteError::MaxCandidatesReached
            | VoteError::NoNewVotes
            | VoteError::VotesQuotaExceeded => ErrorCategory::StateConflict,

            VoteError::Overflow => ErrorCategory::Arithmetic,
        }
    }
}
