// staking_view.rs
use anchor_lang::prelude::*;
use crate::states::{loan::Loan, stake_list::{StakeList, StakingView}};
use crate::errors::LoanError;
use crate::constants::*;

/// Read-only access to somebody's stake list
#[derive(Accounts)]
pub struct GetStakingAt<'info> {
    pub stake_list: Box<Account<'info, StakeList>>,
}

#[derive(Accounts)]
pub struct PreviewAccrual<'info> {
    pub stake_list: Box<Account<'info, StakeList>>,

    #[account(
        seeds = [LOAN_SEED, loan.loan_id.to_le_bytes().as_ref()],
        bump = loan.bump,
    )]
    pub loan: Box<Account<'info, Loan>>,
}

pub fn get_staking_at(ctx: Context<GetStakingAt>, index: u64) -> Result<StakingView> {
    ctx.accounts.stake_list.staking_at(index)
}

/// Interest the entry at `index` would earn if unstaked now.
pub fn preview_accrual(ctx: Context<PreviewAccrual>, index: u64) -> Result<u64> {
    let entry = ctx.accounts.stake_list.entry_at(index)?;
    require!(
        entry.loan_id == ctx.accounts.loan.loan_id,
        LoanError::LoanMismatch
    );

    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.loan.accrued_interest(entry.amount, entry.stake_start_time, now)
}
