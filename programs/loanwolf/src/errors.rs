// errors.rs
use anchor_lang::prelude::*;

#[error_code]
pub enum LoanError {
    #[msg("Unauthorized access")]
    Unauthorized,

    #[msg("Insufficient bond balance")]
    InsufficientBalance,

    #[msg("Bonds have already been minted for this loan")]
    AlreadyMinted,

    #[msg("Account is already configured")]
    AlreadyConfigured,

    #[msg("Collateral has already been released")]
    AlreadyReleased,

    #[msg("Loan terms are invalid")]
    InvalidTerms,

    #[msg("Index is out of range")]
    InvalidIndex,

    #[msg("Payment exceeds the outstanding balance")]
    OverPayment,

    #[msg("Loan is not fully paid")]
    NotComplete,

    #[msg("Not the owner of the bonds")]
    NotOwner,

    #[msg("Bonds have not been minted for this loan")]
    NotMinted,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Not enough collected funds to cover the redemption")]
    InsufficientFunds,

    #[msg("Collateral accounts are required for this redemption")]
    MissingCollateral,

    #[msg("Collateral asset does not match the escrowed asset")]
    CollateralAssetMismatch,

    #[msg("Instruction does not match the loan's payment asset")]
    AssetMismatch,

    #[msg("Stake entry belongs to a different loan")]
    LoanMismatch,

    #[msg("Cannot transfer bonds to the same account")]
    SelfTransfer,

    #[msg("Math overflow occurred")]
    MathOverflow,

    #[msg("Maximum number of loans per borrower reached")]
    TooManyLoans,

    #[msg("URI template is invalid")]
    InvalidUri,

    #[msg("Stake list is full, unstake an entry first")]
    StakeListFull,

    #[msg("Collateral share of the redeemed bonds rounds to zero")]
    ClaimTooSmall,
}
