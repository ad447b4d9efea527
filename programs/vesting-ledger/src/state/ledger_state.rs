use anchor_lang::prelude::*;

/// Singleton ledger state PDA.
#[account]
pub struct LedgerState {
    /// Token mint the ledger vests.
    pub mint: Pubkey,
    /// Admin authority (multisig recommended off-chain).
    pub admin: Pubkey,
    /// Registered schedule count (<= 5).
    pub schedule_count: u8,
    /// Sum of per-schedule released_amount (audit field).
    pub released_total: u64,
}

impl LedgerState {
    pub const SIZE: usize =
        32 + // mint
        32 + // admin
        1 +  // schedule_count
        8;   // released_total
}
