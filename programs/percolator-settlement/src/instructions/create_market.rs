use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{Mint, Token};

use crate::engine::ledger;
use crate::errors::SettlementError;
use crate::events::MarketCreated;
use crate::state::*;

/// Parameters for creating a new prediction market.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct CreateMarketParams {
    /// Immutable market terms.
    pub terms: MarketTerms,

    /// Extra lamports the creator places in the vault on top of its rent
    /// reserve. Counts toward the balance that backs payouts.
    pub seed_amount: u64,
}

#[derive(Accounts)]
pub struct CreateMarket<'info> {
    /// Market creator — pays for account allocation and the vault seed.
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Global config — provides next_market_id and market limits.
    #[account(
        mut,
        seeds = [GlobalConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// Market PDA — the core account for this prediction market.
    #[account(
        init,
        payer = creator,
        space = Market::SIZE,
        seeds = [
            Market::SEED,
            creator.key().as_ref(),
            config.next_market_id.to_le_bytes().as_ref(),
        ],
        bump,
    )]
    pub market: Account<'info, Market>,

    /// Vault PDA — holds all SOL backing this market.
    #[account(
        mut,
        seeds = [Market::VAULT_SEED, market.key().as_ref()],
        bump,
    )]
    pub vault: SystemAccount<'info>,

    /// YES receipt token mint.
    #[account(
        init,
        payer = creator,
        mint::decimals = 0,
        mint::authority = market,
        seeds = [Market::YES_MINT_SEED, market.key().as_ref()],
        bump,
    )]
    pub yes_mint: Account<'info, Mint>,

    /// NO receipt token mint.
    #[account(
        init,
        payer = creator,
        mint::decimals = 0,
        mint::authority = market,
        seeds = [Market::NO_MINT_SEED, market.key().as_ref()],
        bump,
    )]
    pub no_mint: Account<'info, Mint>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handler(ctx: Context<CreateMarket>, params: CreateMarketParams) -> Result<()> {
    let clock = Clock::get()?;
    let creator = ctx.accounts.creator.key();

    let mut market = ledger::open_market(
        &mut ctx.accounts.config,
        creator,
        params.terms,
        clock.unix_timestamp,
    )?;
    market.yes_mint = ctx.accounts.yes_mint.key();
    market.no_mint = ctx.accounts.no_mint.key();
    market.vault = ctx.accounts.vault.key();
    market.vault_bump = ctx.bumps.vault;
    market.bump = ctx.bumps.market;

    // Fund the vault: rent-exempt reserve (never paid out) plus the seed.
    let reserve = ctx.accounts.rent.minimum_balance(0);
    let target = reserve
        .checked_add(params.seed_amount)
        .ok_or(SettlementError::ArithmeticOverflow)?;
    let shortfall = target.saturating_sub(ctx.accounts.vault.lamports());
    if shortfall > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.creator.to_account_info(),
                    to: ctx.accounts.vault.to_account_info(),
                },
            ),
            shortfall,
        )?;
    }

    let market_key = ctx.accounts.market.key();
    emit!(MarketCreated {
        market: market_key,
        market_id: market.market_id,
        creator,
        oracle: market.oracle,
        deadline: market.deadline,
        seed_amount: params.seed_amount,
    });

    msg!(
        "Market #{} created: {} | deadline: {} | rule: {:?} | seed: {}",
        market.market_id,
        market.question,
        market.deadline,
        market.rule,
        params.seed_amount,
    );

    ctx.accounts.market.set_inner(market);

    Ok(())
}
