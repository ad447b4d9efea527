use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::error::LedgerError;
use crate::state::{LedgerState, Schedules};

pub fn release(ctx: Context<Release>, beneficiary: Pubkey) -> Result<()> {
    // Avoid borrow checker conflicts: capture AccountInfos/keys before taking mutable borrows.
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
    // Strict ATA checks (pre-created ATA policy).
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

    // Rejects before activation, after revocation and before the cliff;
    // a fully-claimed schedule past the cliff yields a zero payable.
    let payable = entry.prepare_release(now)?;
    if payable == 0 {
        emit!(TokensReleased {
            beneficiary,
            amount: 0,
            total_amount: entry.total_amount,
            released_total: entry.released_amount,
        });
        return Ok(());
    }

    require!(
        ctx.accounts.vault.amount >= payable,
        LedgerError::InsufficientVaultBalance
    );

    // CPI transfer from vault to beneficiary ATA, signed by ledger_state PDA.
    // A failed transfer aborts the instruction before any bookkeeping lands.
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
        payable,
    )?;

    entry.commit_release(payable)?;
    let released_total = entry.released_amount;
    let total_amount = entry.total_amount;
    st.released_total = st
        .released_total
        .checked_add(payable)
        .ok_or(LedgerError::MathOverflow)?;

    emit!(TokensReleased {
        beneficiary,
        amount: payable,
        total_amount,
        released_total,
    });

    Ok(())
}

pub(crate) fn expected_ata_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    // ATA derivation: PDA(owner, token_program_id, mint) with associated token program id.
    let seeds: &[&[u8]] = &[
        owner.as_ref(),
        anchor_spl::token::ID.as_ref(),
        mint.as_ref(),
    ];
    let (ata, _) = Pubkey::find_program_address(seeds, &anchor_spl::associated_token::ID);
    ata
}

#[derive(Accounts)]
pub struct Release<'info> {
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
pub struct TokensReleased {
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub total_amount: u64,
    pub released_total: u64,
}
