//! Drives the CLI handlers against a temporary ledger file.

use burry_cli::account::{run_airdrop, run_balance, run_keygen, AirdropArgs, BalanceArgs};
use burry_cli::escrow::{
    run_address, run_deposit, run_show, run_withdraw, AddressArgs, DepositArgs, ShowArgs,
    WithdrawArgs,
};
use burry_cli::{ledger_file, CliContext, EXIT_PRICE_NOT_MET};
use burry_core::{Address, Price};
use burry_escrow::{EscrowConfig, EscrowEntry};
use burry_ledger::RentSchedule;

fn context(dir: &tempfile::TempDir, rent: RentSchedule) -> CliContext {
    CliContext {
        ledger_path: dir.path().join("ledger.json"),
        escrow: EscrowConfig {
            new_ledger_rent: rent,
            ..EscrowConfig::default()
        },
    }
}

fn balance(ctx: &CliContext, address: &Address) -> u64 {
    ledger_file::load(&ctx.ledger_path, ctx.escrow.new_ledger_rent)
        .unwrap()
        .balance(address)
}

fn price(s: &str) -> Price {
    Price::parse(s).unwrap()
}

fn fund(ctx: &CliContext, owner: Address, amount: u64) {
    let code = run_airdrop(ctx, &AirdropArgs { to: owner, amount }).unwrap();
    assert_eq!(code, 0);
}

#[test]
fn keygen_succeeds() {
    assert_eq!(run_keygen().unwrap(), 0);
}

#[test]
fn airdrop_persists_between_commands() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir, RentSchedule::free());
    let wallet = Address::new_unique();

    fund(&ctx, wallet, 500);
    fund(&ctx, wallet, 250);
    assert_eq!(balance(&ctx, &wallet), 750);
    assert_eq!(run_balance(&ctx, &BalanceArgs { of: wallet }).unwrap(), 0);
}

#[tokio::test]
async fn deposit_then_withdraw_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let rent = RentSchedule::default();
    let ctx = context(&dir, rent);
    let owner = Address::new_unique();
    fund(&ctx, owner, 1_000_000_000);

    assert_eq!(run_address(&ctx, &AddressArgs { owner }).unwrap(), 0);

    let deposit = DepositArgs {
        owner,
        amount: 100_000,
        unlock_price: price("21.53"),
    };
    assert_eq!(run_deposit(&ctx, &deposit).unwrap(), 0);
    let reserve = rent.minimum_balance(EscrowEntry::SPACE);
    assert_eq!(balance(&ctx, &owner), 1_000_000_000 - 100_000 - reserve);
    assert_eq!(run_show(&ctx, &ShowArgs { owner }).unwrap(), 0);

    let refused = WithdrawArgs {
        owner,
        caller: None,
        price: Some(price("21.53")),
    };
    assert_eq!(run_withdraw(&ctx, &refused).await.unwrap(), EXIT_PRICE_NOT_MET);
    assert_eq!(balance(&ctx, &owner), 1_000_000_000 - 100_000 - reserve);

    let released = WithdrawArgs {
        owner,
        caller: None,
        price: Some(price("21.54")),
    };
    assert_eq!(run_withdraw(&ctx, &released).await.unwrap(), 0);
    assert_eq!(balance(&ctx, &owner), 1_000_000_000);
    assert!(run_show(&ctx, &ShowArgs { owner }).is_err());
}

#[tokio::test]
async fn stranger_withdrawal_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir, RentSchedule::free());
    let owner = Address::new_unique();
    fund(&ctx, owner, 1_000);
    let deposit = DepositArgs {
        owner,
        amount: 400,
        unlock_price: price("1"),
    };
    run_deposit(&ctx, &deposit).unwrap();

    let args = WithdrawArgs {
        owner,
        caller: Some(Address::new_unique()),
        price: Some(price("100")),
    };
    let err = run_withdraw(&ctx, &args).await.unwrap_err();
    assert!(format!("{err:#}").contains("is not the owner"));
    assert_eq!(balance(&ctx, &owner), 600);
}

#[test]
fn zero_deposit_is_an_error_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir, RentSchedule::free());
    let owner = Address::new_unique();
    fund(&ctx, owner, 1_000);
    let before = std::fs::read_to_string(&ctx.ledger_path).unwrap();

    let deposit = DepositArgs {
        owner,
        amount: 0,
        unlock_price: price("1"),
    };
    assert!(run_deposit(&ctx, &deposit).is_err());
    assert_eq!(std::fs::read_to_string(&ctx.ledger_path).unwrap(), before);
}
