// set_approval.rs
use anchor_lang::prelude::*;
use crate::states::bond_balance::OperatorApproval;
use crate::errors::LoanError;
use crate::events::ApprovalForAll;
use crate::constants::*;

#[derive(Accounts)]
pub struct SetApprovalForAll<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// CHECK: only its key is recorded
    #[account(
        constraint = operator.key() != owner.key() @ LoanError::SelfTransfer
    )]
    pub operator: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + OperatorApproval::INIT_SPACE,
        seeds = [APPROVAL_SEED, owner.key().as_ref(), operator.key().as_ref()],
        bump
    )]
    pub approval: Box<Account<'info, OperatorApproval>>,

    pub system_program: Program<'info, System>,
}

pub fn set_approval_for_all(ctx: Context<SetApprovalForAll>, approved: bool) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    let operator = ctx.accounts.operator.key();

    let approval = &mut ctx.accounts.approval;
    approval.owner = owner;
    approval.operator = operator;
    approval.approved = approved;
    approval.bump = ctx.bumps.approval;

    msg!("Operator {} approved: {}", operator, approved);

    emit!(ApprovalForAll {
        owner,
        operator,
        approved,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
