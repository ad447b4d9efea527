use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod vesting_ledger {
    use super::*;

    pub fn initialize_ledger(ctx: Context<InitializeLedger>) -> Result<()> {
        instructions::initialize_ledger::initialize_ledger(ctx)
    }

    pub fn deposit_tokens(ctx: Context<DepositTokens>, amount: u64) -> Result<()> {
        instructions::deposit_tokens::deposit_tokens(ctx, amount)
    }

    pub fn register_beneficiary(
        ctx: Context<RegisterBeneficiary>,
        beneficiary: Pubkey,
        cliff_units: u64,
        duration_units: u64,
        time_unit: u64,
        total_amount: u64,
    ) -> Result<()> {
        instructions::register_beneficiary::register_beneficiary(
            ctx,
            beneficiary,
            cliff_units,
            duration_units,
            time_unit,
            total_amount,
        )
    }

    pub fn activate_schedule(ctx: Context<ActivateSchedule>, beneficiary: Pubkey) -> Result<()> {
        instructions::activate_schedule::activate_schedule(ctx, beneficiary)
    }

    pub fn release(ctx: Context<Release>, beneficiary: Pubkey) -> Result<()> {
        instructions::release::release(ctx, beneficiary)
    }

    pub fn revoke(ctx: Context<Revoke>, beneficiary: Pubkey) -> Result<()> {
        instructions::revoke::revoke(ctx, beneficiary)
    }

    pub fn emit_vested_quote(ctx: Context<EmitVestedQuote>, beneficiary: Pubkey) -> Result<()> {
        instructions::emit_vested_quote::emit_vested_quote(ctx, beneficiary)
    }

    pub fn admin_sweep(ctx: Context<AdminSweep>, amount: u64) -> Result<()> {
        instructions::admin_sweep::admin_sweep(ctx, amount)
    }
}
