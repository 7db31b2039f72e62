//! Read-only views over the program's accounts.
//!
//! Queries run against an [`AccountSource`], which hands back raw account data for a
//! set of memcmp filters. An RPC-backed source can push the filters to the node;
//! [`InMemoryAccounts`] applies them locally.

use std::collections::BTreeMap;

use anchor_lang::prelude::Pubkey;
use thiserror::Error;

use crate::{
    codec::{
        decode_candidate, decode_poll, decode_vote_record, encode_account, AccountKind,
        CodecError, VotingAccount,
    },
    constants::{BPS_DENOMINATOR, POLL_REF_OFFSET},
    pda::find_vote_record_address,
    state::{Candidate, Poll, VoteRecord},
};

pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("account source failed: {0}")]
    Source(#[from] SourceError),
    #[error("account {address} could not be decoded: {source}")]
    Decode {
        address: Pubkey,
        #[source]
        source: CodecError,
    },
}

/// Byte comparison against account data at a fixed offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemcmpFilter {
    pub offset: usize,
    pub bytes: Vec<u8>,
}

impl MemcmpFilter {
    pub fn new(offset: usize, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            offset,
            bytes: bytes.into(),
        }
    }

    /// Selects accounts of one kind by their leading tag.
    pub fn kind(kind: AccountKind) -> Self {
        Self::new(0, kind.discriminator().to_vec())
    }

    /// Selects candidates and vote records pointing back at `poll`.
    pub fn poll_ref(poll: &Pubkey) -> Self {
        Self::new(POLL_REF_OFFSET, poll.to_bytes().to_vec())
    }

    pub fn matches(&self, data: &[u8]) -> bool {
        self.offset
            .checked_add(self.bytes.len())
            .and_then(|end| data.get(self.offset..end))
            .map_or(false, |window| window == self.bytes.as_slice())
    }
}

/// Somewhere program-owned accounts can be read from.
pub trait AccountSource {
    /// Every program account whose data satisfies all `filters`.
    fn program_accounts(
        &self,
        filters: &[MemcmpFilter],
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, SourceError>;

    /// Data of a single account, or `None` if it does not exist.
    fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, SourceError>;
}

/// Account store backed by a map, ordered by address.
#[derive(Clone, Debug, Default)]
pub struct InMemoryAccounts {
    accounts: BTreeMap<Pubkey, Vec<u8>>,
}

impl InMemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: Pubkey, data: Vec<u8>) {
        self.accounts.insert(address, data);
    }

    pub fn insert_account(
        &mut self,
        address: Pubkey,
        account: &VotingAccount,
    ) -> Result<(), CodecError> {
        self.insert(address, encode_account(account)?);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountSource for InMemoryAccounts {
    fn program_accounts(
        &self,
        filters: &[MemcmpFilter],
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, SourceError> {
        Ok(self
            .accounts
            .iter()
            .filter(|(_, data)| filters.iter().all(|filter| filter.matches(data)))
            .map(|(address, data)| (*address, data.clone()))
            .collect())
    }

    fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, SourceError> {
        Ok(self.accounts.get(address).cloned())
    }
}

fn decode_all<T>(
    raw: Vec<(Pubkey, Vec<u8>)>,
    decode: fn(&[u8]) -> Result<T, CodecError>,
) -> Result<Vec<(Pubkey, T)>, QueryError> {
    raw.into_iter()
        .map(|(address, data)| {
            decode(&data)
                .map(|account| (address, account))
                .map_err(|source| QueryError::Decode { address, source })
        })
        .collect()
}

/// Every poll the program owns. No ordering or paging is implied.
pub fn list_polls<S: AccountSource + ?Sized>(
    source: &S,
) -> Result<Vec<(Pubkey, Poll)>, QueryError> {
    let raw = source.program_accounts(&[MemcmpFilter::kind(AccountKind::Poll)])?;
    decode_all(raw, decode_poll)
}

/// Candidates of one poll, sorted by index.
pub fn list_candidates<S: AccountSource + ?Sized>(
    source: &S,
    poll: &Pubkey,
) -> Result<Vec<(Pubkey, Candidate)>, QueryError> {
    let raw = source.program_accounts(&[
        MemcmpFilter::kind(AccountKind::Candidate),
        MemcmpFilter::poll_ref(poll),
    ])?;
    let mut candidates = decode_all(raw, decode_candidate)?;
    candidates.sort_by_key(|(_, candidate)| candidate.index);
    Ok(candidates)
}

/// The voter's record for a poll. A voter who never initialized one yields `None`.
pub fn get_vote_record<S: AccountSource + ?Sized>(
    source: &S,
    program_id: &Pubkey,
    poll: &Pubkey,
    voter: &Pubkey,
) -> Result<Option<VoteRecord>, QueryError> {
    let (address, _) = find_vote_record_address(program_id, poll, voter);
    let Some(data) = source.account_data(&address)? else {
        return Ok(None);
    };

    decode_vote_record(&data)
        .map(Some)
        .map_err(|source| QueryError::Decode { address, source })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateResult {
    pub index: u16,
    /// `None` when the candidate account was not found
    pub name: Option<String>,
    pub votes: u64,
    /// Share of all votes in the poll, in basis points (rounded down)
    pub share_bps: u16,
}

/// Tallies of one poll, ready for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollResults {
    pub poll: Pubkey,
    pub title: String,
    pub is_open: bool,
    pub total_votes: u128,
    pub candidates: Vec<CandidateResult>,
    /// Indices sharing the highest tally; empty while nobody has voted
    pub leaders: Vec<u16>,
}

impl PollResults {
    pub fn compute(poll_key: Pubkey, poll: &Poll, candidates: &[(Pubkey, Candidate)]) -> Self {
        let total_votes = poll.total_votes();

        let candidates = poll
            .vote_counts
            .iter()
            .enumerate()
            .map(|(index, &votes)| {
                let index = index as u16;
                let name = candidates
                    .iter()
                    .find(|(_, c)| c.poll == poll_key && c.index == index)
                    .map(|(_, c)| c.name.clone());

                CandidateResult {
                    index,
                    name,
                    votes,
                    share_bps: share_bps(votes, total_votes),
                }
            })
            .collect();

        Self {
            poll: poll_key,
            title: poll.title.clone(),
            is_open: poll.is_open,
            total_votes,
            candidates,
            leaders: poll.leading_candidates(),
        }
    }
}

fn share_bps(votes: u64, total_votes: u128) -> u16 {
    if total_votes == 0 {
        return 0;
    }
    // votes <= total, so the share never exceeds BPS_DENOMINATOR
    (votes as u128 * BPS_DENOMINATOR as u128 / total_votes) as u16
}

/// Results of a single poll, or `None` if no poll lives at `poll`.
pub fn poll_results<S: AccountSource + ?Sized>(
    source: &S,
    poll: &Pubkey,
) -> Result<Option<PollResults>, QueryError> {
    let Some(data) = source.account_data(poll)? else {
        return Ok(None);
    };
    let account = decode_poll(&data).map_err(|source| QueryError::Decode {
        address: *poll,
        source,
    })?;
    let candidates = list_candidates(source, poll)?;

    Ok(Some(PollResults::compute(*poll, &account, &candidates)))
}

/// Program-wide counters for a dashboard.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgramStats {
    pub total_polls: usize,
    pub open_polls: usize,
    pub closed_polls: usize,
    pub total_candidates: u64,
    pub total_votes: u128,
    /// Poll with the most votes and its total; the first one wins a tie
    pub most_voted: Option<(Pubkey, u128)>,
}

impl ProgramStats {
    pub fn from_polls(polls: &[(Pubkey, Poll)]) -> Self {
        let mut stats = Self::default();

        for (address, poll) in polls {
            let votes = poll.total_votes();

            stats.total_polls += 1;
            if poll.is_open {
                stats.open_polls += 1;
            } else {
                stats.closed_polls += 1;
            }
            stats.total_candidates += poll.candidate_count as u64;
            stats.total_votes += votes;

            let leading = stats.most_voted.map_or(0, |(_, most)| most);
            if votes > leading {
                stats.most_voted = Some((*address, votes));
            }
        }

        stats
    }

    pub fn average_votes_per_poll(&self) -> f64 {
        if self.total_polls == 0 {
            return 0.0;
        }
        self.total_votes as f64 / self.total_polls as f64
    }
}

pub fn program_stats<S: AccountSource + ?Sized>(source: &S) -> Result<ProgramStats, QueryError> {
    Ok(ProgramStats::from_polls(&list_polls(source)?))
}
