use anchor_lang::prelude::*;

use crate::engine::lifecycle;
use crate::events::MarketClosed;
use crate::state::*;

/// Permissionless crank: records that the deadline has passed.
#[derive(Accounts)]
pub struct CloseMarket<'info> {
    pub cranker: Signer<'info>,

    #[account(mut)]
    pub market: Account<'info, Market>,
}

pub fn handler(ctx: Context<CloseMarket>) -> Result<()> {
    let clock = Clock::get()?;
    let market_key = ctx.accounts.market.key();
    let market = &mut ctx.accounts.market;

    lifecycle::close(market, clock.unix_timestamp)?;

    emit!(MarketClosed {
        market: market_key,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Market #{} closed: yes_pool={} no_pool={}",
        market.market_id,
        market.yes_pool,
        market.no_pool,
    );

    Ok(())
}
