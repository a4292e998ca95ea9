use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount};

use crate::engine::ledger;
use crate::errors::SettlementError;
use crate::events::BetPlaced;
use crate::state::*;
use crate::vault::SystemVault;

#[derive(Accounts)]
pub struct PlaceBet<'info> {
    /// The bettor placing the wager.
    #[account(mut)]
    pub bettor: Signer<'info>,

    /// The prediction market.
    #[account(mut)]
    pub market: Account<'info, Market>,

    /// User position PDA — created on first bet, updated on subsequent bets.
    #[account(
        init_if_needed,
        payer = bettor,
        space = UserPosition::SIZE,
        seeds = [UserPosition::SEED, market.key().as_ref(), bettor.key().as_ref()],
        bump,
    )]
    pub position: Account<'info, UserPosition>,

    /// Market vault — receives the SOL deposit.
    #[account(
        mut,
        seeds = [Market::VAULT_SEED, market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: SystemAccount<'info>,

    /// YES receipt mint (market is authority).
    #[account(
        mut,
        seeds = [Market::YES_MINT_SEED, market.key().as_ref()],
        bump,
    )]
    pub yes_mint: Account<'info, Mint>,

    /// NO receipt mint (market is authority).
    #[account(
        mut,
        seeds = [Market::NO_MINT_SEED, market.key().as_ref()],
        bump,
    )]
    pub no_mint: Account<'info, Mint>,

    /// Bettor's token account for the chosen side.
    #[account(
        mut,
        constraint = bettor_token_account.owner == bettor.key() @ SettlementError::ReceiptMintMismatch,
    )]
    pub bettor_token_account: Account<'info, TokenAccount>,

    /// Global config for volume tracking.
    #[account(
        mut,
        seeds = [GlobalConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<PlaceBet>, side: BetSide, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let market_key = ctx.accounts.market.key();
    let bettor = ctx.accounts.bettor.key();

    // Deposits need no vault signature.
    let mut vault = SystemVault::new(
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.bettor.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        &[],
    )?;

    ledger::place_bet(
        &mut ctx.accounts.market,
        &market_key,
        &mut ctx.accounts.position,
        &bettor,
        side,
        amount,
        clock.unix_timestamp,
        &mut vault,
    )?;
    ctx.accounts.position.bump = ctx.bumps.position;

    // Input and lifecycle errors take precedence; a failure here still
    // reverts the whole bet.
    require_keys_eq!(
        ctx.accounts.bettor_token_account.mint,
        ctx.accounts.market.receipt_mint(side),
        SettlementError::ReceiptMintMismatch
    );

    // Mint receipt tokens 1:1 with lamports staked. Market PDA is the mint authority.
    let mint = match side {
        BetSide::Yes => ctx.accounts.yes_mint.to_account_info(),
        BetSide::No => ctx.accounts.no_mint.to_account_info(),
    };
    let creator_key = ctx.accounts.market.creator;
    let market_id_bytes = ctx.accounts.market.market_id.to_le_bytes();
    let bump = ctx.accounts.market.bump;
    let seeds: &[&[u8]] = &[
        Market::SEED,
        creator_key.as_ref(),
        market_id_bytes.as_ref(),
        &[bump],
    ];

    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint,
                to: ctx.accounts.bettor_token_account.to_account_info(),
                authority: ctx.accounts.market.to_account_info(),
            },
            &[seeds],
        ),
        amount,
    )?;

    let config = &mut ctx.accounts.config;
    config.total_volume = config
        .total_volume
        .checked_add(amount)
        .ok_or(SettlementError::ArithmeticOverflow)?;

    let market = &ctx.accounts.market;
    emit!(BetPlaced {
        market: market_key,
        bettor,
        side,
        amount,
        yes_pool: market.yes_pool,
        no_pool: market.no_pool,
    });

    msg!(
        "Bet placed: {} lamports on {:?} for market #{} (yes={} no={})",
        amount,
        side,
        market.market_id,
        market.yes_pool,
        market.no_pool,
    );

    Ok(())
}
