//! Byte-exact layouts of the program's instructions and accounts.
//!
//! Every buffer starts with an 8-byte discriminator, followed by the fields in
//! declaration order: little-endian fixed-width integers, `u32`-length-prefixed UTF-8
//! strings and `u32`-length-prefixed sequences. Account buffers may carry trailing
//! bytes (unused reserved space), which decoding ignores.
//!
//! The field encoding is borsh. Decoding first walks the expected layout so a bad
//! buffer reports where it breaks, then hands the bytes to borsh.

use anchor_lang::prelude::{AnchorDeserialize, AnchorSerialize};
use thiserror::Error;

use crate::{
    constants::*,
    state::{Candidate, Poll, VoteRecord},
};

pub type Discriminator = [u8; DISCRIMINATOR_SIZE];

// sha256("global:<instruction>")[..8]
pub const CREATE_POLL_DISCRIMINATOR: Discriminator = [182, 171, 112, 238, 6, 219, 14, 110];
pub const ADD_CANDIDATE_DISCRIMINATOR: Discriminator = [172, 34, 30, 247, 165, 210, 224, 164];
pub const CAST_VOTES_DISCRIMINATOR: Discriminator = [236, 139, 5, 4, 34, 33, 175, 92];
pub const INIT_VOTE_RECORD_DISCRIMINATOR: Discriminator = [50, 167, 47, 161, 216, 144, 32, 85];
pub const CLOSE_POLL_DISCRIMINATOR: Discriminator = [139, 213, 162, 65, 172, 150, 123, 67];

// sha256("account:<Type>")[..8]
pub const POLL_DISCRIMINATOR: Discriminator = [110, 234, 167, 188, 231, 136, 153, 111];
pub const CANDIDATE_DISCRIMINATOR: Discriminator = [86, 69, 250, 96, 193, 10, 222, 123];
pub const VOTE_RECORD_DISCRIMINATOR: Discriminator = [112, 9, 123, 165, 234, 9, 157, 167];

/// Errors raised while encoding or decoding program buffers.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CodecError {
    /// A fixed-width field needs more bytes than the buffer holds.
    #[error("TruncatedData: {needed} bytes needed, {available} available")]
    TruncatedData { needed: usize, available: usize },
    /// A length prefix points past the end of the buffer.
    #[error("LengthOverrun: {declared} elements declared at offset {offset}")]
    LengthOverrun { offset: usize, declared: usize },
    /// The leading tag is not the one expected (or not one of ours at all).
    #[error("InvalidDiscriminator: {found:?}")]
    InvalidDiscriminator { found: Discriminator },
    /// A string field is not valid UTF-8.
    #[error("InvalidUtf8 at offset {0}")]
    InvalidUtf8(usize),
    /// A bool byte other than 0 or 1.
    #[error("InvalidBool: {0}")]
    InvalidBool(u8),
    /// A string is longer than the byte budget sent alongside it.
    #[error("BudgetExceeded: {len} bytes over a budget of {budget}")]
    BudgetExceeded { len: usize, budget: u32 },
    /// A field is too long for its `u32` length prefix.
    #[error("LengthPrefixOverflow")]
    LengthPrefixOverflow,
    /// Bytes that pass the layout checks but still fail to deserialize.
    #[error("Malformed: {0}")]
    Malformed(String),
}

/// The program's instructions together with their arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VotingInstruction {
    CreatePoll {
        poll_id: u64,
        title: String,
        max_candidates: u16,
        max_votes_per_voter: u16,
        max_title_bytes: u32,
    },
    AddCandidate {
        index: u16,
        name: String,
        max_name_bytes: u32,
    },
    CastVotes {
        indices: Vec<u16>,
    },
    InitVoteRecord,
    ClosePoll,
}

impl VotingInstruction {
    pub fn discriminator(&self) -> Discriminator {
        match self {
            VotingInstruction::CreatePoll { .. } => CREATE_POLL_DISCRIMINATOR,
            VotingInstruction::AddCandidate { .. } => ADD_CANDIDATE_DISCRIMINATOR,
            VotingInstruction::CastVotes { .. } => CAST_VOTES_DISCRIMINATOR,
            VotingInstruction::InitVoteRecord => INIT_VOTE_RECORD_DISCRIMINATOR,
            VotingInstruction::ClosePoll => CLOSE_POLL_DISCRIMINATOR,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VotingInstruction::CreatePoll { .. } => "create_poll",
            VotingInstruction::AddCandidate { .. } => "add_candidate",
            VotingInstruction::CastVotes { .. } => "cast_votes",
            VotingInstruction::InitVoteRecord => "init_vote_record",
            VotingInstruction::ClosePoll => "close_poll",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccountKind {
    Poll,
    Candidate,
    VoteRecord,
}

impl AccountKind {
    pub fn discriminator(self) -> Discriminator {
        match self {
            AccountKind::Poll => POLL_DISCRIMINATOR,
            AccountKind::Candidate => CANDIDATE_DISCRIMINATOR,
            AccountKind::VoteRecord => VOTE_RECORD_DISCRIMINATOR,
        }
    }

    pub fn from_discriminator(tag: &[u8]) -> Option<Self> {
        [AccountKind::Poll, AccountKind::Candidate, AccountKind::VoteRecord]
            .into_iter()
            .find(|kind| kind.discriminator()[..] == *tag)
    }
}

/// A decoded account of any kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VotingAccount {
    Poll(Poll),
    Candidate(Candidate),
    VoteRecord(VoteRecord),
}

impl VotingAccount {
    pub fn kind(&self) -> AccountKind {
        match self {
            VotingAccount::Poll(_) => AccountKind::Poll,
            VotingAccount::Candidate(_) => AccountKind::Candidate,
            VotingAccount::VoteRecord(_) => AccountKind::VoteRecord,
        }
    }
}

/// Shape of one serialized field, used to locate bad bytes before handing the
/// buffer to borsh.
#[derive(Clone, Copy)]
enum Field {
    Fixed(usize),
    Bool,
    Str,
    /// `u32` count followed by elements of the given width.
    Seq(usize),
}

const CREATE_POLL_ARGS: &[Field] = &[
    Field::Fixed(8),
    Field::Str,
    Field::Fixed(2),
    Field::Fixed(2),
    Field::Fixed(4),
];
const ADD_CANDIDATE_ARGS: &[Field] = &[Field::Fixed(2), Field::Str, Field::Fixed(4)];
const CAST_VOTES_ARGS: &[Field] = &[Field::Seq(2)];

const POLL_LAYOUT: &[Field] = &[
    Field::Fixed(PUBKEY_SIZE),
    Field::Fixed(8),
    Field::Bool,
    Field::Fixed(2),
    Field::Fixed(2),
    Field::Fixed(2),
    Field::Str,
    Field::Seq(8),
];
const CANDIDATE_LAYOUT: &[Field] = &[Field::Fixed(PUBKEY_SIZE), Field::Fixed(2), Field::Str];
const VOTE_RECORD_LAYOUT: &[Field] = &[
    Field::Fixed(PUBKEY_SIZE),
    Field::Fixed(PUBKEY_SIZE),
    Field::Fixed(2),
    Field::Seq(1),
];

struct Cursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or(CodecError::TruncatedData {
                needed: self.offset.saturating_add(len),
                available: self.data.len(),
            })?;
        let bytes = &self.data[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    /// Read a `u32` element count and make sure `count * elem_size` bytes follow.
    /// Returns the byte length of the elements.
    fn len_prefix(&mut self, elem_size: usize) -> Result<usize, CodecError> {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(self.take(4)?);
        let declared = u32::from_le_bytes(raw) as usize;
        declared
            .checked_mul(elem_size)
            .filter(|&bytes| {
                self.offset
                    .checked_add(bytes)
                    .map_or(false, |end| end <= self.data.len())
            })
            .ok_or(CodecError::LengthOverrun {
                offset: self.offset,
                declared,
            })
    }

    fn check(&mut self, field: Field) -> Result<(), CodecError> {
        match field {
            Field::Fixed(len) => {
                self.take(len)?;
            }
            Field::Bool => match self.take(1)?[0] {
                0 | 1 => {}
                other => return Err(CodecError::InvalidBool(other)),
            },
            Field::Str => {
                let start = self.offset;
                let len = self.len_prefix(1)?;
                std::str::from_utf8(self.take(len)?).map_err(|_| CodecError::InvalidUtf8(start))?;
            }
            Field::Seq(elem_size) => {
                let len = self.len_prefix(elem_size)?;
                self.take(len)?;
            }
        }
        Ok(())
    }
}

fn read_discriminator(data: &[u8]) -> Result<Discriminator, CodecError> {
    data.get(..DISCRIMINATOR_SIZE)
        .and_then(|tag| Discriminator::try_from(tag).ok())
        .ok_or(CodecError::TruncatedData {
            needed: DISCRIMINATOR_SIZE,
            available: data.len(),
        })
}

/// Walk `layout` over the bytes after the discriminator, then let borsh decode them.
fn decode_body<T: AnchorDeserialize>(data: &[u8], layout: &[Field]) -> Result<T, CodecError> {
    let mut cursor = Cursor {
        data,
        offset: DISCRIMINATOR_SIZE,
    };
    for &field in layout {
        cursor.check(field)?;
    }
    let mut body = &data[DISCRIMINATOR_SIZE..];
    T::deserialize(&mut body).map_err(|err| CodecError::Malformed(err.to_string()))
}

fn decode_tagged<T: AnchorDeserialize>(
    data: &[u8],
    expected: Discriminator,
    layout: &[Field],
) -> Result<T, CodecError> {
    let found = read_discriminator(data)?;
    if found != expected {
        return Err(CodecError::InvalidDiscriminator { found });
    }
    decode_body(data, layout)
}

fn encode_tagged<T: AnchorSerialize>(
    discriminator: Discriminator,
    body: &T,
) -> Result<Vec<u8>, CodecError> {
    let mut data = discriminator.to_vec();
    body.serialize(&mut data)
        .map_err(|_| CodecError::LengthPrefixOverflow)?;
    Ok(data)
}

fn check_budget(value: &str, budget: u32) -> Result<(), CodecError> {
    if value.len() as u64 > budget as u64 {
        return Err(CodecError::BudgetExceeded {
            len: value.len(),
            budget,
        });
    }
    Ok(())
}

/// Serialize an instruction into the data field of a transaction instruction.
pub fn encode_instruction(ix: &VotingInstruction) -> Result<Vec<u8>, CodecError> {
    let tag = ix.discriminator();
    match ix {
        VotingInstruction::CreatePoll {
            poll_id,
            title,
            max_candidates,
            max_votes_per_voter,
            max_title_bytes,
        } => {
            check_budget(title, *max_title_bytes)?;
            encode_tagged(
                tag,
                &(
                    *poll_id,
                    title.as_str(),
                    *max_candidates,
                    *max_votes_per_voter,
                    *max_title_bytes,
                ),
            )
        }
        VotingInstruction::AddCandidate {
            index,
            name,
            max_name_bytes,
        } => {
            check_budget(name, *max_name_bytes)?;
            encode_tagged(tag, &(*index, name.as_str(), *max_name_bytes))
        }
        VotingInstruction::CastVotes { indices } => encode_tagged(tag, indices),
        VotingInstruction::InitVoteRecord | VotingInstruction::ClosePoll => Ok(tag.to_vec()),
    }
}

/// Parse instruction data back into a [`VotingInstruction`].
pub fn decode_instruction(data: &[u8]) -> Result<VotingInstruction, CodecError> {
    let ix = match read_discriminator(data)? {
        CREATE_POLL_DISCRIMINATOR => {
            let (poll_id, title, max_candidates, max_votes_per_voter, max_title_bytes) =
                decode_body::<(u64, String, u16, u16, u32)>(data, CREATE_POLL_ARGS)?;
            VotingInstruction::CreatePoll {
                poll_id,
                title,
                max_candidates,
                max_votes_per_voter,
                max_title_bytes,
            }
        }
        ADD_CANDIDATE_DISCRIMINATOR => {
            let (index, name, max_name_bytes) =
                decode_body::<(u16, String, u32)>(data, ADD_CANDIDATE_ARGS)?;
            VotingInstruction::AddCandidate {
                index,
                name,
                max_name_bytes,
            }
        }
        CAST_VOTES_DISCRIMINATOR => VotingInstruction::CastVotes {
            indices: decode_body(data, CAST_VOTES_ARGS)?,
        },
        INIT_VOTE_RECORD_DISCRIMINATOR => VotingInstruction::InitVoteRecord,
        CLOSE_POLL_DISCRIMINATOR => VotingInstruction::ClosePoll,
        found => return Err(CodecError::InvalidDiscriminator { found }),
    };
    Ok(ix)
}

/// Identify an account buffer by its leading tag.
pub fn account_kind(data: &[u8]) -> Result<AccountKind, CodecError> {
    let found = read_discriminator(data)?;
    AccountKind::from_discriminator(&found).ok_or(CodecError::InvalidDiscriminator { found })
}

/// Serialize an account the way the program stores it (without reserved padding).
pub fn encode_account(account: &VotingAccount) -> Result<Vec<u8>, CodecError> {
    let tag = account.kind().discriminator();
    match account {
        VotingAccount::Poll(poll) => encode_tagged(tag, poll),
        VotingAccount::Candidate(candidate) => encode_tagged(tag, candidate),
        VotingAccount::VoteRecord(record) => encode_tagged(tag, record),
    }
}

/// Decode an account buffer that is expected to hold `kind`.
pub fn decode_account(kind: AccountKind, data: &[u8]) -> Result<VotingAccount, CodecError> {
    let account = match kind {
        AccountKind::Poll => VotingAccount::Poll(decode_poll(data)?),
        AccountKind::Candidate => VotingAccount::Candidate(decode_candidate(data)?),
        AccountKind::VoteRecord => VotingAccount::VoteRecord(decode_vote_record(data)?),
    };
    Ok(account)
}

pub fn decode_poll(data: &[u8]) -> Result<Poll, CodecError> {
    decode_tagged(data, POLL_DISCRIMINATOR, POLL_LAYOUT)
}

pub fn decode_candidate(data: &[u8]) -> Result<Candidate, CodecError> {
    decode_tagged(data, CANDIDATE_DISCRIMINATOR, CANDIDATE_LAYOUT)
}

pub fn decode_vote_record(data: &[u8]) -> Result<VoteRecord, CodecError> {
    decode_tagged(data, VOTE_RECORD_DISCRIMINATOR, VOTE_RECORD_LAYOUT)
}
