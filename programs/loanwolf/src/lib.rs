use anchor_lang::prelude::*;

pub mod contexts;
pub mod states;
pub mod errors;
pub mod constants;
pub mod events;
pub mod gateway;


use contexts::*;
use states::*;

declare_id!("GtmR2Ai73FLPeyHL7y4yLAk6N9kftPNCkiYvyav2aw5E");

#[program]
pub mod loanwolf {
    use super::*;

    // Registry
    pub fn initialize_registry(ctx: Context<InitializeRegistry>, uri: String) -> Result<()> {
        contexts::initialize_registry(ctx, uri)
    }

    // Loan Setup
    pub fn configure_loan(ctx: Context<ConfigureLoan>, terms: LoanTerms) -> Result<()> {
        contexts::configure_loan(ctx, terms)
    }

    pub fn configure_native_loan(ctx: Context<ConfigureNativeLoan>, terms: LoanTerms) -> Result<()> {
        contexts::configure_native_loan(ctx, terms)
    }

    pub fn add_collateral(ctx: Context<AddCollateral>, amount: u64) -> Result<()> {
        contexts::add_collateral(ctx, amount)
    }

    pub fn mint_bonds(ctx: Context<MintBonds>) -> Result<()> {
        contexts::mint_bonds(ctx)
    }

    // Bond Transfers
    pub fn transfer_bonds(ctx: Context<TransferBonds>, amount: u64) -> Result<()> {
        contexts::transfer_bonds(ctx, amount)
    }

    pub fn set_approval_for_all(ctx: Context<SetApprovalForAll>, approved: bool) -> Result<()> {
        contexts::set_approval_for_all(ctx, approved)
    }

    pub fn operator_transfer(ctx: Context<OperatorTransfer>, amount: u64) -> Result<()> {
        contexts::operator_transfer(ctx, amount)
    }

    // Staking
    pub fn open_stake_list(ctx: Context<OpenStakeList>) -> Result<()> {
        contexts::open_stake_list(ctx)
    }

    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        contexts::stake(ctx, amount)
    }

    pub fn unstake(ctx: Context<Unstake>, index: u64) -> Result<()> {
        contexts::unstake(ctx, index)
    }

    pub fn get_staking_at(ctx: Context<GetStakingAt>, index: u64) -> Result<StakingView> {
        contexts::get_staking_at(ctx, index)
    }

    pub fn preview_accrual(ctx: Context<PreviewAccrual>, index: u64) -> Result<u64> {
        contexts::preview_accrual(ctx, index)
    }

    // Payments and Redemption
    pub fn payment(ctx: Context<Payment>, amount: u64) -> Result<()> {
        contexts::payment(ctx, amount)
    }

    pub fn native_payment(ctx: Context<NativePayment>, amount: u64) -> Result<()> {
        contexts::native_payment(ctx, amount)
    }

    pub fn withdrawl(ctx: Context<Withdrawl>, bond_amount: u64) -> Result<()> {
        contexts::withdrawl(ctx, bond_amount)
    }

    pub fn native_withdrawl(ctx: Context<NativeWithdrawl>, bond_amount: u64) -> Result<()> {
        contexts::native_withdrawl(ctx, bond_amount)
    }

    pub fn return_collateral(ctx: Context<ReturnCollateral>) -> Result<()> {
        contexts::return_collateral(ctx)
    }

    // Views
    pub fn loan_lookup(ctx: Context<LoanLookup>) -> Result<Loan> {
        contexts::loan_lookup(ctx)
    }

    pub fn collateral_lookup(ctx: Context<CollateralLookup>) -> Result<Collateral> {
        contexts::collateral_lookup(ctx)
    }

    pub fn loan_id_at(ctx: Context<LoanIdAt>, n: u64) -> Result<u64> {
        contexts::loan_id_at(ctx, n)
    }

    pub fn is_delinquent(ctx: Context<LoanLookup>) -> Result<bool> {
        contexts::is_delinquent(ctx)
    }

    pub fn is_complete(ctx: Context<LoanLookup>) -> Result<bool> {
        contexts::is_complete(ctx)
    }

    pub fn bond_uri(ctx: Context<BondUri>, loan_id: u64) -> Result<String> {
        contexts::bond_uri(ctx, loan_id)
    }
}
