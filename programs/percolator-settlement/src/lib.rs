use anchor_lang::prelude::*;

pub mod engine;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod vault;


use instructions::*;
use state::{BetSide, ConfigParams, Outcome};

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod percolator_settlement {
    use super::*;

    /// Create the global config singleton.
    pub fn initialize_config(ctx: Context<InitializeConfig>, params: ConfigParams) -> Result<()> {
        instructions::initialize_config::handler(ctx, params)
    }

    /// Update market limits (protocol authority only).
    pub fn update_config(ctx: Context<UpdateConfig>, params: ConfigParams) -> Result<()> {
        instructions::update_config::handler(ctx, params)
    }

    /// Create a new binary prediction market.
    ///
    /// The market vault is funded with its rent reserve plus an optional seed
    /// deposit from the creator. Resolution criteria are encoded in
    /// `rule` + `target_value` and evaluated off-chain by the oracle.
    pub fn create_market(ctx: Context<CreateMarket>, params: CreateMarketParams) -> Result<()> {
        instructions::create_market::handler(ctx, params)
    }

    /// Place a bet on YES or NO.
    ///
    /// Transfers `amount` from the bettor into the market vault and mints
    /// the corresponding receipt token (YES-mint or NO-mint).
    pub fn place_bet(ctx: Context<PlaceBet>, side: BetSide, amount: u64) -> Result<()> {
        instructions::place_bet::handler(ctx, side, amount)
    }

    /// Persist the `Closed` status once the deadline has passed.
    pub fn close_market(ctx: Context<CloseMarket>) -> Result<()> {
        instructions::close_market::handler(ctx)
    }

    /// Resolve the market outcome and freeze the h-ratio.
    ///
    /// Only callable by the designated oracle authority.
    pub fn resolve_market(ctx: Context<ResolveMarket>, outcome: Outcome) -> Result<()> {
        instructions::resolve::handler(ctx, outcome)
    }

    /// Settle a position after market resolution.
    ///
    /// Computes payout using the two-claim model:
    ///   - Capital (senior): the stake, returned in full
    ///   - Profit  (junior): share of loser pool × h-ratio
    ///
    /// h = min(vault_balance, total_claims) / total_claims
    ///
    /// Anyone may submit this; the payout always goes to the position owner.
    pub fn settle(ctx: Context<Settle>) -> Result<()> {
        instructions::settle::handler(ctx)
    }

    /// Cancel a market before resolution (creator or oracle only).
    ///
    /// All bettors can claim a full refund via `claim_refund`.
    pub fn cancel_market(ctx: Context<CancelMarket>) -> Result<()> {
        instructions::cancel::handler(ctx)
    }

    /// Claim refund from a cancelled market.
    ///
    /// Burns the user's receipt tokens and returns the stake at par.
    pub fn claim_refund(ctx: Context<ClaimRefund>) -> Result<()> {
        instructions::claim_refund::handler(ctx)
    }
}
