use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount};

use crate::engine::refund;
use crate::errors::SettlementError;
use crate::events::RefundClaimed;
use crate::state::*;
use crate::vault::SystemVault;

#[derive(Accounts)]
pub struct ClaimRefund<'info> {
    /// The user claiming their refund.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The cancelled market.
    #[account(mut)]
    pub market: Account<'info, Market>,

    /// User position PDA.
    #[account(
        mut,
        seeds = [UserPosition::SEED, market.key().as_ref(), user.key().as_ref()],
        bump = position.bump,
    )]
    pub position: Account<'info, UserPosition>,

    /// Market vault.
    #[account(
        mut,
        seeds = [Market::VAULT_SEED, market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: SystemAccount<'info>,

    /// YES or NO mint (depending on the position side).
    #[account(
        mut,
        address = market.receipt_mint(position.side) @ SettlementError::ReceiptMintMismatch,
    )]
    pub position_mint: Account<'info, Mint>,

    /// The user's receipt token account.
    #[account(
        mut,
        constraint = user_token_account.owner == user.key() @ SettlementError::ReceiptMintMismatch,
        constraint = user_token_account.mint == position_mint.key() @ SettlementError::ReceiptMintMismatch,
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<ClaimRefund>) -> Result<()> {
    let market_key = ctx.accounts.market.key();
    let user = ctx.accounts.user.key();
    let vault_bump = ctx.accounts.market.vault_bump;
    let vault_seeds: &[&[u8]] = &[Market::VAULT_SEED, market_key.as_ref(), &[vault_bump]];

    let mut vault = SystemVault::new(
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.user.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        vault_seeds,
    )?;

    let refund_amount = refund::claim_refund(
        &mut ctx.accounts.market,
        &market_key,
        &mut ctx.accounts.position,
        &user,
        &mut vault,
    )?;

    // Burn the receipts backing the refunded stake.
    token::burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Burn {
                mint: ctx.accounts.position_mint.to_account_info(),
                from: ctx.accounts.user_token_account.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        refund_amount,
    )?;

    emit!(RefundClaimed {
        market: market_key,
        owner: user,
        amount: refund_amount,
    });

    msg!(
        "Refund: {} lamports returned to {} for market #{}",
        refund_amount,
        user,
        ctx.accounts.market.market_id,
    );

    Ok(())
}
