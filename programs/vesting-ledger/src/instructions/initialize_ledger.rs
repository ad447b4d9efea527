use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::MAX_BENEFICIARIES;
use crate::state::{LedgerState, ScheduleEntry, Schedules};

pub fn initialize_ledger(ctx: Context<InitializeLedger>) -> Result<()> {
    let st = &mut ctx.accounts.ledger_state;
    st.mint = ctx.accounts.mint.key();
    st.admin = ctx.accounts.admin.key();
    st.schedule_count = 0;
    st.released_total = 0;

    // Empty schedules list (deterministic insertion order).
    let schedules = &mut ctx.accounts.schedules;
    schedules.entries = [ScheduleEntry::default(); MAX_BENEFICIARIES];

    emit!(LedgerInitialized {
        mint: st.mint,
        admin: st.admin,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeLedger<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + LedgerState::SIZE,
        seeds = [b"ledger_state"],
        bump
    )]
    pub ledger_state: Account<'info, LedgerState>,

    #[account(
        init,
        payer = admin,
        space = Schedules::space(),
        seeds = [b"schedules", ledger_state.key().as_ref()],
        bump
    )]
    pub schedules: Box<Account<'info, Schedules>>,

    #[account(
        init,
        payer = admin,
        token::mint = mint,
        token::authority = ledger_state,
        seeds = [b"vault", ledger_state.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct LedgerInitialized {
    pub mint: Pubkey,
    pub admin: Pubkey,
}
