use anchor_lang::prelude::*;

/// Custom error codes for the vesting ledger program.
#[error_code]
pub enum LedgerError {
    #[msg("Unauthorized: admin signature required")]
    UnauthorizedAdmin,

    #[msg("Unauthorized: admin or beneficiary signature required")]
    UnauthorizedCaller,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Invalid amount (must be > 0)")]
    InvalidAmount,

    #[msg("Invalid schedule (cliff exceeds duration or total amount is zero)")]
    InvalidSchedule,

    #[msg("Beneficiary ledger is full")]
    LedgerFull,

    #[msg("Duplicate beneficiary")]
    DuplicateBeneficiary,

    #[msg("Beneficiary not registered")]
    NotRegistered,

    #[msg("Schedule already started")]
    AlreadyStarted,

    #[msg("Schedule has not started")]
    NotStarted,

    #[msg("Cliff not reached")]
    CliffNotReached,

    #[msg("Schedule is revoked")]
    ScheduleRevoked,

    #[msg("Schedule is already revoked")]
    AlreadyRevoked,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Invalid associated token account for beneficiary")]
    InvalidBeneficiaryAta,

    #[msg("Insufficient vault balance")]
    InsufficientVaultBalance,

    #[msg("Math overflow")]
    MathOverflow,
}
