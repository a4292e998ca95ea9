use anchor_lang::prelude::*;

use crate::events::ConfigInitialized;
use crate::state::*;

#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    /// Protocol authority; pays for the config account.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Global config PDA.
    #[account(
        init,
        payer = authority,
        space = GlobalConfig::SIZE,
        seeds = [GlobalConfig::SEED],
        bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeConfig>, params: ConfigParams) -> Result<()> {
    params.validate()?;

    let authority = ctx.accounts.authority.key();
    ctx.accounts.config.set_inner(GlobalConfig {
        authority,
        next_market_id: 0,
        total_markets: 0,
        total_volume: 0,
        max_position_amount: params.max_position_amount,
        min_market_duration: params.min_market_duration,
        bump: ctx.bumps.config,
        _reserved: [0; 32],
    });

    emit!(ConfigInitialized {
        authority,
        max_position_amount: params.max_position_amount,
        min_market_duration: params.min_market_duration,
    });

    msg!(
        "Config initialized: authority={} max_position={} min_duration={}s",
        authority,
        params.max_position_amount,
        params.min_market_duration,
    );

    Ok(())
}
