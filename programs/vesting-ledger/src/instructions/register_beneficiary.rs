use anchor_lang::prelude::*;

use crate::error::LedgerError;
use crate::state::{LedgerState, ScheduleEntry, Schedules};

/// Register a vesting schedule for a beneficiary. No token transfer happens
/// here; the vault must be funded separately via `deposit_tokens`.
pub fn register_beneficiary(
    ctx: Context<RegisterBeneficiary>,
    beneficiary: Pubkey,
    cliff_units: u64,
    duration_units: u64,
    time_unit: u64,
    total_amount: u64,
) -> Result<()> {
    let st = &mut ctx.accounts.ledger_state;
    require_keys_eq!(ctx.accounts.admin.key(), st.admin, LedgerError::UnauthorizedAdmin);

    let entry = ScheduleEntry::new(
        beneficiary,
        cliff_units,
        duration_units,
        time_unit,
        total_amount,
    )?;

    let schedules = &mut ctx.accounts.schedules;
    st.schedule_count = schedules.insert(st.schedule_count, entry)?;

    emit!(BeneficiaryRegistered {
        beneficiary,
        cliff_units,
        duration_units,
        time_unit,
        total_amount,
        schedule_count: st.schedule_count,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct RegisterBeneficiary<'info> {
    #[account(mut, seeds = [b"ledger_state"], bump)]
    pub ledger_state: Account<'info, LedgerState>,

    #[account(
        mut,
        seeds = [b"schedules", ledger_state.key().as_ref()],
        bump
    )]
    pub schedules: Box<Account<'info, Schedules>>,

    #[account(mut)]
    pub admin: Signer<'info>,
}

#[event]
pub struct BeneficiaryRegistered {
    pub beneficiary: Pubkey,
    pub cliff_units: u64,
    pub duration_units: u64,
    pub time_unit: u64,
    pub total_amount: u64,
    pub schedule_count: u8,
}
