use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::error::LedgerError;
use crate::state::LedgerState;

/// Blunt recovery tool: drain `amount` from any token account the ledger PDA
/// controls to an admin-owned destination. Generic over mint so tokens sent
/// to the ledger by mistake are recoverable, not just the vested mint.
/// Bookkeeping-blind: no schedule state is read or written; computing the
/// right amount (typically total minus released for a just-revoked schedule)
/// is the admin's job.
pub fn admin_sweep(ctx: Context<AdminSweep>, amount: u64) -> Result<()> {
    require!(amount > 0, LedgerError::InvalidAmount);

    let st = &ctx.accounts.ledger_state;
    require_keys_eq!(ctx.accounts.admin.key(), st.admin, LedgerError::UnauthorizedAdmin);

    require_keys_eq!(
        ctx.accounts.drain_account.owner,
        ctx.accounts.ledger_state.key(),
        LedgerError::InvalidTokenAccount
    );
    require_keys_eq!(
        ctx.accounts.admin_destination.mint,
        ctx.accounts.drain_account.mint,
        LedgerError::InvalidTokenMint
    );
    require_keys_eq!(
        ctx.accounts.admin_destination.owner,
        ctx.accounts.admin.key(),
        LedgerError::InvalidTokenAccount
    );

    require!(
        ctx.accounts.drain_account.amount >= amount,
        LedgerError::InsufficientVaultBalance
    );

    let signer_seeds: &[&[&[u8]]] = &[&[b"ledger_state", &[ctx.bumps.ledger_state]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.drain_account.to_account_info(),
                to: ctx.accounts.admin_destination.to_account_info(),
                authority: ctx.accounts.ledger_state.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(LedgerSwept {
        admin: st.admin,
        mint: ctx.accounts.drain_account.mint,
        amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct AdminSweep<'info> {
    #[account(mut, seeds = [b"ledger_state"], bump)]
    pub ledger_state: Account<'info, LedgerState>,

    /// Any token account whose authority is the ledger PDA (the vault or a
    /// stray deposit of another mint).
    #[account(mut)]
    pub drain_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin_destination: Account<'info, TokenAccount>,

    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct LedgerSwept {
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}
