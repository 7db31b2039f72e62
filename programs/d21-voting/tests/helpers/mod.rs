#![allow(dead_code)]

use {
    anchor_lang::{prelude::AccountInfo, solana_program::entrypoint::ProgramResult},
    d21_voting::{
        codec::{decode_candidate, decode_poll, decode_vote_record},
        error::VoteError,
        pda::find_vote_record_address,
        state::{Candidate, Poll, VoteRecord},
    },
    solana_program_test::{
        processor, BanksClientError, ProgramTest, ProgramTestBanksClientExt, ProgramTestContext,
    },
    solana_sdk::{
        instruction::{Instruction, InstructionError},
        native_token::LAMPORTS_PER_SOL,
        pubkey::Pubkey,
        signature::{Keypair, Signer},
        system_instruction,
        transaction::{Transaction, TransactionError},
    },
};

pub const USER_STARTING_LAMPORTS: u64 = LAMPORTS_PER_SOL;

// The builtin processor hands out slices whose lifetime is shorter than the one
// the generated entry point ties to its accounts.
fn process_instruction(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let accounts = Box::leak(accounts.to_vec().into_boxed_slice());
    d21_voting::entry(program_id, accounts, data)
}

pub fn program_test() -> ProgramTest {
    let mut program_test = ProgramTest::default();
    program_test.prefer_bpf(false);
    program_test.add_program("d21_voting", d21_voting::ID, processor!(process_instruction));
    program_test
}

pub async fn refresh_blockhash(context: &mut ProgramTestContext) {
    context.last_blockhash = context
        .banks_client
        .get_new_latest_blockhash(&context.last_blockhash)
        .await
        .unwrap();
}

/// Send `instructions` in one transaction paid by the context payer.
pub async fn process(
    context: &mut ProgramTestContext,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> Result<(), BanksClientError> {
    let mut all_signers = vec![&context.payer];
    all_signers.extend_from_slice(signers);
    let transaction = Transaction::new_signed_with_payer(
        instructions,
        Some(&context.payer.pubkey()),
        all_signers.as_slice(),
        context.last_blockhash,
    );
    context.banks_client.process_transaction(transaction).await
}

/// A new keypair with enough lamports to pay rent for the accounts it creates.
pub async fn funded_keypair(context: &mut ProgramTestContext) -> Keypair {
    let keypair = Keypair::new();
    let ix = system_instruction::transfer(
        &context.payer.pubkey(),
        &keypair.pubkey(),
        USER_STARTING_LAMPORTS,
    );
    process(context, &[ix], &[]).await.unwrap();
    keypair
}

pub fn assert_vote_error(result: Result<(), BanksClientError>, expected: VoteError) {
    match result.unwrap_err().unwrap() {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => {
            assert_eq!(code, expected.code(), "expected {expected:?}")
        }
        other => panic!("expected {expected:?}, got {other:?}"),
    }
}

pub async fn get_account_data(context: &mut ProgramTestContext, address: &Pubkey) -> Option<Vec<u8>> {
    context
        .banks_client
        .get_account(*address)
        .await
        .unwrap()
        .map(|account| account.data)
}

pub async fn get_poll(context: &mut ProgramTestContext, address: &Pubkey) -> Poll {
    let data = get_account_data(context, address).await.expect("poll not found");
    decode_poll(&data).unwrap()
}

pub async fn get_candidate(context: &mut ProgramTestContext, address: &Pubkey) -> Candidate {
    let data = get_account_data(context, address).await.expect("candidate not found");
    decode_candidate(&data).unwrap()
}

pub async fn get_vote_record(
    context: &mut ProgramTestContext,
    poll: &Pubkey,
    voter: &Pubkey,
) -> VoteRecord {
    let (address, _) = find_vote_record_address(&d21_voting::ID, poll, voter);
    let data = get_account_data(context, &address).await.expect("vote record not found");
    decode_vote_record(&data).unwrap()
}
