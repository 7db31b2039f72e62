mod helpers;

use {
    d21_voting::{
        builder,
        error::VoteError,
        pda::{find_candidate_address, find_poll_address},
        state::Poll,
    },
    helpers::*,
    solana_program_test::ProgramTestContext,
    solana_sdk::{
        instruction::InstructionError,
        pubkey::Pubkey,
        signature::{Keypair, Signer},
        transaction::TransactionError,
    },
};

const ID: Pubkey = d21_voting::ID;

/// Create a poll owned by the context payer and register `candidates` in order.
async fn setup_poll(
    context: &mut ProgramTestContext,
    poll_id: u64,
    title: &str,
    candidates: &[&str],
    max_votes_per_voter: u16,
) -> Pubkey {
    let authority = context.payer.pubkey();
    let (poll, _) = find_poll_address(&ID, &authority, poll_id);

    let create = builder::create_poll(
        &ID,
        &authority,
        poll_id,
        title,
        candidates.len() as u16,
        max_votes_per_voter,
        64,
    )
    .unwrap();
    process(context, &[create], &[]).await.unwrap();

    for (index, name) in candidates.iter().enumerate() {
        let add = builder::add_candidate(&ID, &poll, &authority, index as u16, name, 32).unwrap();
        process(context, &[add], &[]).await.unwrap();
    }
    poll
}

async fn voter_with_record(context: &mut ProgramTestContext, poll: &Pubkey) -> Keypair {
    let voter = funded_keypair(context).await;
    let init = builder::init_vote_record(&ID, poll, &voter.pubkey());
    process(context, &[init], &[&voter]).await.unwrap();
    voter
}

#[tokio::test]
async fn success_full_lifecycle() {
    let mut context = program_test().start_with_context().await;
    let authority = context.payer.pubkey();
    let poll = setup_poll(&mut context, 1, "Best Pizza", &["Pepperoni", "Margherita"], 1).await;

    let state = get_poll(&mut context, &poll).await;
    assert_eq!(state.authority, authority);
    assert_eq!(state.title, "Best Pizza");
    assert!(state.is_open);
    assert_eq!(state.candidate_count, 2);
    assert_eq!(state.vote_counts, vec![0, 0]);

    // Space was reserved from the budgets, not the actual title
    let data = get_account_data(&mut context, &poll).await.unwrap();
    assert_eq!(data.len(), Poll::space(64, 2));

    let (second, _) = find_candidate_address(&ID, &poll, 1);
    let candidate = get_candidate(&mut context, &second).await;
    assert_eq!(candidate.poll, poll);
    assert_eq!(candidate.index, 1);
    assert_eq!(candidate.name, "Margherita");

    let voter = voter_with_record(&mut context, &poll).await;
    let record = get_vote_record(&mut context, &poll, &voter.pubkey()).await;
    assert_eq!(record.voter, voter.pubkey());
    assert_eq!(record.used_votes, 0);

    let cast = builder::cast_votes(&ID, &poll, &voter.pubkey(), &[0]).unwrap();
    process(&mut context, &[cast], &[&voter]).await.unwrap();
    assert_eq!(get_poll(&mut context, &poll).await.vote_counts, vec![1, 0]);

    let record = get_vote_record(&mut context, &poll, &voter.pubkey()).await;
    assert_eq!(record.used_votes, 1);
    assert_eq!(record.voted_indices(), vec![0]);

    let cast = builder::cast_votes(&ID, &poll, &voter.pubkey(), &[1]).unwrap();
    let result = process(&mut context, &[cast], &[&voter]).await;
    assert_vote_error(result, VoteError::VotesQuotaExceeded);

    let close = builder::close_poll(&ID, &poll, &authority);
    process(&mut context, &[close], &[]).await.unwrap();
    let state = get_poll(&mut context, &poll).await;
    assert!(!state.is_open);
    assert_eq!(state.vote_counts, vec![1, 0]);

    let late = funded_keypair(&mut context).await;
    let init = builder::init_vote_record(&ID, &poll, &late.pubkey());
    process(&mut context, &[init], &[&late]).await.unwrap();
    let cast = builder::cast_votes(&ID, &poll, &late.pubkey(), &[1]).unwrap();
    let result = process(&mut context, &[cast], &[&late]).await;
    assert_vote_error(result, VoteError::PollClosed);
}

#[tokio::test]
async fn fail_reused_poll_id() {
    let mut context = program_test().start_with_context().await;
    let authority = context.payer.pubkey();
    let poll = setup_poll(&mut context, 3, "Lunch", &["Tacos"], 1).await;

    let again = builder::create_poll(&ID, &authority, 3, "Dinner", 4, 2, 64).unwrap();
    let result = process(&mut context, &[again], &[]).await;
    assert!(matches!(
        result.unwrap_err().unwrap(),
        TransactionError::InstructionError(0, _)
    ));

    let state = get_poll(&mut context, &poll).await;
    assert_eq!(state.title, "Lunch");
    assert_eq!(state.max_candidates, 1);
    assert_eq!(state.candidate_count, 1);

    // A different id from the same authority is a different poll
    let other = builder::create_poll(&ID, &authority, 4, "Dinner", 4, 2, 64).unwrap();
    process(&mut context, &[other], &[]).await.unwrap();
}

#[tokio::test]
async fn success_second_init_keeps_progress() {
    let mut context = program_test().start_with_context().await;
    let poll = setup_poll(&mut context, 5, "Snacks", &["Chips", "Nuts"], 2).await;
    let voter = voter_with_record(&mut context, &poll).await;

    let cast = builder::cast_votes(&ID, &poll, &voter.pubkey(), &[0]).unwrap();
    process(&mut context, &[cast], &[&voter]).await.unwrap();

    refresh_blockhash(&mut context).await;
    let init = builder::init_vote_record(&ID, &poll, &voter.pubkey());
    process(&mut context, &[init], &[&voter]).await.unwrap();

    let record = get_vote_record(&mut context, &poll, &voter.pubkey()).await;
    assert_eq!(record.used_votes, 1);
    assert!(record.has_voted(0));
    assert!(!record.has_voted(1));

    let cast = builder::cast_votes(&ID, &poll, &voter.pubkey(), &[0, 0]).unwrap();
    let result = process(&mut context, &[cast], &[&voter]).await;
    assert_vote_error(result, VoteError::NoNewVotes);
}

#[tokio::test]
async fn success_close_twice() {
    let mut context = program_test().start_with_context().await;
    let authority = context.payer.pubkey();
    let poll = setup_poll(&mut context, 6, "Venue", &["Hall"], 1).await;

    let close = builder::close_poll(&ID, &poll, &authority);
    process(&mut context, &[close.clone()], &[]).await.unwrap();

    refresh_blockhash(&mut context).await;
    process(&mut context, &[close], &[]).await.unwrap();

    let state = get_poll(&mut context, &poll).await;
    assert!(!state.is_open);
    assert_eq!(state.candidate_count, 1);

    let add = builder::add_candidate(&ID, &poll, &authority, 1, "Park", 32).unwrap();
    let result = process(&mut context, &[add], &[]).await;
    assert_vote_error(result, VoteError::PollClosed);
}

#[tokio::test]
async fn fail_stranger_close_and_add() {
    let mut context = program_test().start_with_context().await;
    let poll = setup_poll(&mut context, 7, "Board", &["Ana"], 1).await;
    let stranger = funded_keypair(&mut context).await;

    let close = builder::close_poll(&ID, &poll, &stranger.pubkey());
    let result = process(&mut context, &[close], &[&stranger]).await;
    assert_vote_error(result, VoteError::Unauthorized);

    let add = builder::add_candidate(&ID, &poll, &stranger.pubkey(), 1, "Ben", 32).unwrap();
    let result = process(&mut context, &[add], &[&stranger]).await;
    assert_vote_error(result, VoteError::Unauthorized);

    let state = get_poll(&mut context, &poll).await;
    assert!(state.is_open);
    assert_eq!(state.candidate_count, 1);
    let (unused, _) = find_candidate_address(&ID, &poll, 1);
    assert!(get_account_data(&mut context, &unused).await.is_none());
}

#[tokio::test]
async fn fail_vote_for_missing_candidate() {
    let mut context = program_test().start_with_context().await;
    let poll = setup_poll(&mut context, 8, "Colors", &["Red", "Blue"], 2).await;
    let voter = voter_with_record(&mut context, &poll).await;

    let cast = builder::cast_votes(&ID, &poll, &voter.pubkey(), &[0, 5]).unwrap();
    let result = process(&mut context, &[cast], &[&voter]).await;
    assert_vote_error(result, VoteError::InvalidCandidateIndex);

    assert_eq!(get_poll(&mut context, &poll).await.vote_counts, vec![0, 0]);
    let record = get_vote_record(&mut context, &poll, &voter.pubkey()).await;
    assert_eq!(record.used_votes, 0);
}

#[tokio::test]
async fn fail_cast_without_record() {
    let mut context = program_test().start_with_context().await;
    let poll = setup_poll(&mut context, 9, "Pets", &["Cat"], 1).await;
    let voter = funded_keypair(&mut context).await;

    let cast = builder::cast_votes(&ID, &poll, &voter.pubkey(), &[0]).unwrap();
    let result = process(&mut context, &[cast], &[&voter]).await;
    assert!(matches!(
        result.unwrap_err().unwrap(),
        TransactionError::InstructionError(0, InstructionError::Custom(code))
            if VoteError::from_code(code).is_none()
    ));

    assert_eq!(get_poll(&mut context, &poll).await.vote_counts, vec![0]);
}
