use anchor_lang::prelude::*;

use crate::error::LedgerError;
use crate::state::{LedgerState, Schedules};

/// Read-only vesting quote: current vested / released / releasable for one
/// beneficiary, emitted as an event. Permissionless.
pub fn emit_vested_quote(ctx: Context<EmitVestedQuote>, beneficiary: Pubkey) -> Result<()> {
    let st = &ctx.accounts.ledger_state;
    let now = Clock::get()?.unix_timestamp;

    let schedules = &ctx.accounts.schedules;
    let entry = schedules
        .find(st.schedule_count, &beneficiary)
        .ok_or(LedgerError::NotRegistered)?;

    let vested = entry.vested_amount(now)?;
    let releasable = vested
        .checked_sub(entry.released_amount)
        .ok_or(LedgerError::MathOverflow)?;

    emit!(VestedQuote {
        beneficiary,
        vested_amount: vested,
        released_amount: entry.released_amount,
        releasable,
        revoked: entry.revoked != 0,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct EmitVestedQuote<'info> {
    #[account(seeds = [b"ledger_state"], bump)]
    pub ledger_state: Account<'info, LedgerState>,

    #[account(
        seeds = [b"schedules", ledger_state.key().as_ref()],
        bump
    )]
    pub schedules: Box<Account<'info, Schedules>>,
}

#[event]
pub struct VestedQuote {
    pub beneficiary: Pubkey,
    pub vested_amount: u64,
    pub released_amount: u64,
    pub releasable: u64,
    pub revoked: bool,
}
