use anchor_lang::prelude::*;

use crate::errors::SettlementError;
use crate::events::ConfigUpdated;
use crate::state::*;

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [GlobalConfig::SEED],
        bump = config.bump,
        has_one = authority @ SettlementError::UnauthorizedAuthority,
    )]
    pub config: Account<'info, GlobalConfig>,
}

/// Changes apply to markets created afterwards; existing markets keep the
/// limits they were created with.
pub fn handler(ctx: Context<UpdateConfig>, params: ConfigParams) -> Result<()> {
    params.validate()?;

    let config = &mut ctx.accounts.config;
    config.max_position_amount = params.max_position_amount;
    config.min_market_duration = params.min_market_duration;

    emit!(ConfigUpdated {
        authority: config.authority,
        max_position_amount: config.max_position_amount,
        min_market_duration: config.min_market_duration,
    });

    msg!(
        "Config updated: max_position={} min_duration={}s",
        config.max_position_amount,
        config.min_market_duration,
    );

    Ok(())
}
