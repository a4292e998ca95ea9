use anchor_lang::prelude::*;

use crate::engine::resolution;
use crate::events::MarketResolved;
use crate::state::*;
use crate::vault::available_lamports;

#[derive(Accounts)]
pub struct ResolveMarket<'info> {
    /// Oracle authority — checked against `market.oracle` by the engine.
    pub oracle: Signer<'info>,

    /// The market to resolve.
    #[account(mut)]
    pub market: Account<'info, Market>,

    /// Market vault — read balance for h-ratio computation.
    #[account(
        seeds = [Market::VAULT_SEED, market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: SystemAccount<'info>,
}

pub fn handler(ctx: Context<ResolveMarket>, outcome: Outcome) -> Result<()> {
    let clock = Clock::get()?;
    let market_key = ctx.accounts.market.key();

    // The oracle is trusted on timing: resolution before the deadline is allowed.
    let vault_balance = available_lamports(&ctx.accounts.vault.to_account_info())?;
    let market = &mut ctx.accounts.market;
    let h_ratio_bps = resolution::resolve(
        market,
        &ctx.accounts.oracle.key(),
        outcome,
        vault_balance,
        clock.unix_timestamp,
    )?;

    emit!(MarketResolved {
        market: market_key,
        outcome,
        h_ratio_bps,
        vault_balance,
        yes_pool: market.yes_pool,
        no_pool: market.no_pool,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Market #{} resolved: outcome={:?}, h_ratio={}bps, vault={}, yes_pool={}, no_pool={}",
        market.market_id,
        outcome,
        h_ratio_bps,
        vault_balance,
        market.yes_pool,
        market.no_pool,
    );

    Ok(())
}
