use anchor_lang::prelude::*;

use crate::engine::settlement;
use crate::events::PositionSettled;
use crate::state::*;
use crate::vault::SystemVault;

#[derive(Accounts)]
pub struct Settle<'info> {
    /// Whoever submits the settlement. Pays fees, receives nothing.
    pub payer: Signer<'info>,

    /// The resolved market.
    #[account(mut)]
    pub market: Account<'info, Market>,

    /// Position owner — always the payout recipient.
    #[account(mut)]
    pub owner: SystemAccount<'info>,

    /// Position being settled. Derived from `owner`, so it can only be
    /// the owner's own position.
    #[account(
        mut,
        seeds = [UserPosition::SEED, market.key().as_ref(), owner.key().as_ref()],
        bump = position.bump,
    )]
    pub position: Account<'info, UserPosition>,

    /// Market vault — source of payout funds.
    #[account(
        mut,
        seeds = [Market::VAULT_SEED, market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Settle>) -> Result<()> {
    let market_key = ctx.accounts.market.key();
    let owner = ctx.accounts.owner.key();
    let vault_bump = ctx.accounts.market.vault_bump;
    let vault_seeds: &[&[u8]] = &[Market::VAULT_SEED, market_key.as_ref(), &[vault_bump]];

    let mut vault = SystemVault::new(
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.owner.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        vault_seeds,
    )?;

    let payout = settlement::settle(
        &mut ctx.accounts.market,
        &market_key,
        &mut ctx.accounts.position,
        &mut vault,
    )?;

    emit!(PositionSettled {
        market: market_key,
        owner,
        capital: payout.capital,
        profit_share: payout.profit_share,
        profit_after_h: payout.profit_after_h,
        profit_paid: payout.profit_paid,
        payout: payout.total,
    });

    msg!(
        "Settled: owner={} payout={} (capital={} + profit {}×h={} paid={}), market #{}",
        owner,
        payout.total,
        payout.capital,
        payout.profit_share,
        payout.profit_after_h,
        payout.profit_paid,
        ctx.accounts.market.market_id,
    );

    Ok(())
}
