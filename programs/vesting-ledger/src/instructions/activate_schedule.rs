use anchor_lang::prelude::*;

use crate::error::LedgerError;
use crate::state::{LedgerState, Schedules};

/// Start a beneficiary's schedule at the current clock reading. This
/// timestamp, not the registration time, anchors all vesting math.
pub fn activate_schedule(ctx: Context<ActivateSchedule>, beneficiary: Pubkey) -> Result<()> {
    let st = &ctx.accounts.ledger_state;
    require_keys_eq!(ctx.accounts.admin.key(), st.admin, LedgerError::UnauthorizedAdmin);

    let now = Clock::get()?.unix_timestamp;

    let schedules = &mut ctx.accounts.schedules;
    let entry = schedules
        .find_mut(st.schedule_count, &beneficiary)
        .ok_or(LedgerError::NotRegistered)?;
    entry.activate(now)?;

    emit!(ScheduleActivated {
        beneficiary,
        start_ts: now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct ActivateSchedule<'info> {
    #[account(seeds = [b"ledger_state"], bump)]
    pub ledger_state: Account<'info, LedgerState>,

    #[account(
        mut,
        seeds = [b"schedules", ledger_state.key().as_ref()],
        bump
    )]
    pub schedules: Box<Account<'info, Schedules>>,

    pub admin: Signer<'info>,
}

#[event]
pub struct ScheduleActivated {
    pub beneficiary: Pubkey,
    pub start_ts: i64,
}
