use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::error::LedgerError;
use crate::instructions::release::expected_ata_address;
use crate::state::{LedgerState, Schedules};

/// Terminate a schedule early: pay out the vested-but-unpaid balance, then
/// freeze the entry forever. Before the cliff the payout is zero but the
/// revocation still finalizes. The unvested remainder stays in the vault
/// until the admin sweeps it.
pub fn revoke(ctx: Context<Revoke>, beneficiary: Pubkey) -> Result<()> {
    let ledger_state_ai = ctx.accounts.ledger_state.to_account_info();
    let ledger_state_bump = ctx.bumps.ledger_state;

    let st = &mut ctx.accounts.ledger_state;
    let caller = ctx.accounts.caller.key();
    require!(
        caller == st.admin || caller == beneficiary,
        LedgerError::UnauthorizedCaller
    );

    let now = Clock::get()?.unix_timestamp;

    require_keys_eq!(ctx.accounts.mint.key(), st.mint, LedgerError::InvalidTokenMint);
    require_keys_eq!(ctx.accounts.vault.mint, st.mint, LedgerError::InvalidTokenMint);
    let expected_ata = expected_ata_address(&beneficiary, &st.mint);
    require_keys_eq!(
        ctx.accounts.beneficiary_ata.key(),
        expected_ata,
        LedgerError::InvalidBeneficiaryAta
    );
    require_keys_eq!(
        ctx.accounts.beneficiary_ata.mint,
        st.mint,
        LedgerError::InvalidTokenMint
    );
    require_keys_eq!(
        ctx.accounts.beneficiary_ata.owner,
        beneficiary,
        LedgerError::InvalidTokenAccount
    );

    let schedules = &mut ctx.accounts.schedules;
    let entry = schedules
        .find_mut(st.schedule_count, &beneficiary)
        .ok_or(LedgerError::NotRegistered)?;

    let payout = entry.prepare_revoke(now)?;

    if payout > 0 {
        require!(
            ctx.accounts.vault.amount >= payout,
            LedgerError::InsufficientVaultBalance
        );

        let signer_seeds: &[&[&[u8]]] = &[&[b"ledger_state", &[ledger_state_bump]]];
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.vault.to_account_info(),
                    to: ctx.accounts.beneficiary_ata.to_account_info(),
                    authority: ledger_state_ai,
                },
                signer_seeds,
            ),
            payout,
        )?;
    }

    // Freeze only after the payout landed (or was provably zero).
    entry.commit_revoke(payout)?;
    let released_total = entry.released_amount;
    let unvested_remainder = entry
        .total_amount
        .checked_sub(released_total)
        .ok_or(LedgerError::MathOverflow)?;
    st.released_total = st
        .released_total
        .checked_add(payout)
        .ok_or(LedgerError::MathOverflow)?;

    emit!(ScheduleRevoked {
        beneficiary,
        caller,
        final_payout: payout,
        released_total,
        unvested_remainder,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Revoke<'info> {
    #[account(mut, seeds = [b"ledger_state"], bump)]
    pub ledger_state: Account<'info, LedgerState>,

    #[account(
        mut,
        seeds = [b"schedules", ledger_state.key().as_ref()],
        bump
    )]
    pub schedules: Box<Account<'info, Schedules>>,

    #[account(
        mut,
        seeds = [b"vault", ledger_state.key().as_ref()],
        bump,
        constraint = vault.mint == ledger_state.mint @ LedgerError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub beneficiary_ata: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    /// Admin or the beneficiary itself.
    pub caller: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct ScheduleRevoked {
    pub beneficiary: Pubkey,
    pub caller: Pubkey,
    pub final_payout: u64,
    pub released_total: u64,
    pub unvested_remainder: u64,
}
