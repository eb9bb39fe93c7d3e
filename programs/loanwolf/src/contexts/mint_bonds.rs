// mint_bonds.rs
use anchor_lang::prelude::*;
use crate::states::{bond_balance::BondBalance, loan::Loan};
use crate::events::BondsMinted;
use crate::constants::*;

/// Issues the loan's bonds to its borrower. The borrower check happens in
/// `Loan::mark_minted` so impersonators get `Unauthorized`.
#[derive(Accounts)]
pub struct MintBonds<'info> {
    #[account(mut)]
    pub borrower: Signer<'info>,

    #[account(
        mut,
        seeds = [LOAN_SEED, loan.loan_id.to_le_bytes().as_ref()],
        bump = loan.bump,
    )]
    pub loan: Box<Account<'info, Loan>>,

    #[account(
        init_if_needed,
        payer = borrower,
        space = 8 + BondBalance::INIT_SPACE,
        seeds = [
            BOND_BALANCE_SEED,
            loan.loan_id.to_le_bytes().as_ref(),
            borrower.key().as_ref()
        ],
        bump
    )]
    pub borrower_balance: Box<Account<'info, BondBalance>>,

    pub system_program: Program<'info, System>,
}

pub fn mint_bonds(ctx: Context<MintBonds>) -> Result<()> {
    msg!("Minting bonds for loan {}", ctx.accounts.loan.loan_id);

    let now = Clock::get()?.unix_timestamp;
    let borrower = ctx.accounts.borrower.key();

    let amount = ctx.accounts.loan.mark_minted(borrower, now)?;

    let balance = &mut ctx.accounts.borrower_balance;
    balance.open(borrower, ctx.accounts.loan.loan_id, ctx.bumps.borrower_balance);
    balance.credit(amount)?;

    msg!("Minted {} bonds, total payments value {}", amount, ctx.accounts.loan.total_payments_value);

    emit!(BondsMinted {
        loan_id: ctx.accounts.loan.loan_id,
        borrower,
        amount,
        total_payments_value: ctx.accounts.loan.total_payments_value,
        timestamp: now,
    });

    Ok(())
}
