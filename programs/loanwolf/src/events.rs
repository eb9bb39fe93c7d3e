// events.rs
use anchor_lang::prelude::*;

#[event]
pub struct RegistryInitialized {
    pub admin: Pubkey,
    pub uri: String,
    pub timestamp: i64,
}

#[event]
pub struct LoanConfigured {
    pub loan_id: u64,
    pub borrower: Pubkey,
    pub payment_mint: Option<Pubkey>,
    pub principal: u64,
    pub min_payment: u64,
    pub payment_period: i64,
    pub interest_rate_inverse: u64,
    pub accrual_period: i64,
    pub timestamp: i64,
}

#[event]
pub struct CollateralAdded {
    pub loan_id: u64,
    pub mint: Pubkey,
    pub amount: u64,
    pub total: u64,
    pub timestamp: i64,
}

#[event]
pub struct BondsMinted {
    pub loan_id: u64,
    pub borrower: Pubkey,
    pub amount: u64,
    pub total_payments_value: u64,
    pub timestamp: i64,
}

#[event]
pub struct BondsTransferred {
    pub loan_id: u64,
    pub operator: Pubkey,
    pub from: Pubkey,
    pub to: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct ApprovalForAll {
    pub owner: Pubkey,
    pub operator: Pubkey,
    pub approved: bool,
    pub timestamp: i64,
}

#[event]
pub struct BondsStaked {
    pub owner: Pubkey,
    pub loan_id: u64,
    pub amount: u64,
    pub slot: u32,
    pub timestamp: i64,
}

#[event]
pub struct BondsUnstaked {
    pub owner: Pubkey,
    pub loan_id: u64,
    pub amount: u64,
    pub interest: u64,
    pub timestamp: i64,
}

#[event]
pub struct PaymentReceived {
    pub loan_id: u64,
    pub payer: Pubkey,
    pub amount: u64,
    pub payment_complete: u64,
    pub total_payments_value: u64,
    pub timestamp: i64,
}

#[event]
pub struct LoanCompleted {
    pub loan_id: u64,
    pub borrower: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct BondsRedeemed {
    pub loan_id: u64,
    pub holder: Pubkey,
    pub bond_amount: u64,
    pub payout: u64,
    pub from_collateral: bool,
    pub timestamp: i64,
}

#[event]
pub struct CollateralReturned {
    pub loan_id: u64,
    pub borrower: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
