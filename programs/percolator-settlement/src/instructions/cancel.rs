use anchor_lang::prelude::*;

use crate::engine::refund;
use crate::events::MarketCancelled;
use crate::state::*;

#[derive(Accounts)]
pub struct CancelMarket<'info> {
    /// Market creator or oracle authority — checked by the engine.
    pub authority: Signer<'info>,

    /// The market to cancel.
    #[account(mut)]
    pub market: Account<'info, Market>,
}

pub fn handler(ctx: Context<CancelMarket>) -> Result<()> {
    let clock = Clock::get()?;
    let market_key = ctx.accounts.market.key();
    let authority = ctx.accounts.authority.key();
    let market = &mut ctx.accounts.market;

    refund::cancel(market, &authority, clock.unix_timestamp)?;

    emit!(MarketCancelled {
        market: market_key,
        authority,
        timestamp: clock.unix_timestamp,
    });

    msg!("Market #{} cancelled by {}", market.market_id, authority);

    Ok(())
}
