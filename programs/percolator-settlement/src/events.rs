use anchor_lang::prelude::*;

use crate::state::{BetSide, Outcome};

#[event]
pub struct ConfigInitialized {
    /// Protocol authority allowed to update the config.
    pub authority: Pubkey,
    /// Per-position stake cap. 0 = no cap.
    pub max_position_amount: u64,
    /// Minimum seconds between market creation and deadline.
    pub min_market_duration: i64,
}

#[event]
pub struct ConfigUpdated {
    /// Authority that applied the update.
    pub authority: Pubkey,
    /// New per-position stake cap. 0 = no cap.
    pub max_position_amount: u64,
    /// New minimum market duration in seconds.
    pub min_market_duration: i64,
}

#[event]
pub struct MarketCreated {
    /// Market PDA.
    pub market: Pubkey,
    /// Sequential id assigned from the config counter.
    pub market_id: u64,
    /// Market creator.
    pub creator: Pubkey,
    /// Authority that can resolve the market.
    pub oracle: Pubkey,
    /// Betting deadline (Unix timestamp).
    pub deadline: i64,
    /// Lamports the creator placed in the vault beyond its rent reserve.
    pub seed_amount: u64,
}

#[event]
pub struct BetPlaced {
    /// Market PDA.
    pub market: Pubkey,
    /// Bettor and position owner.
    pub bettor: Pubkey,
    /// Side the stake went to.
    pub side: BetSide,
    /// Lamports staked by this bet.
    pub amount: u64,
    /// YES pool after the bet.
    pub yes_pool: u64,
    /// NO pool after the bet.
    pub no_pool: u64,
}

#[event]
pub struct MarketClosed {
    /// Market PDA.
    pub market: Pubkey,
    /// Time the close was persisted.
    pub timestamp: i64,
}

/// Emitted once per market; `h_ratio_bps` is frozen from here on.
#[event]
pub struct MarketResolved {
    /// Market PDA.
    pub market: Pubkey,
    /// Winning side.
    pub outcome: Outcome,
    /// Frozen h-ratio in basis points.
    pub h_ratio_bps: u16,
    /// Vault balance snapshot backing all settlements.
    pub vault_balance: u64,
    /// Final YES pool.
    pub yes_pool: u64,
    /// Final NO pool.
    pub no_pool: u64,
    /// Resolution time.
    pub timestamp: i64,
}

#[event]
pub struct PositionSettled {
    /// Market PDA.
    pub market: Pubkey,
    /// Position owner and payout recipient.
    pub owner: Pubkey,
    /// Stake returned in full.
    pub capital: u64,
    /// Pro-rata share of the losing pool, before the h-ratio.
    pub profit_share: u64,
    /// Profit share scaled by the h-ratio.
    pub profit_after_h: u64,
    /// Profit actually paid after holding back unsettled stakes.
    pub profit_paid: u64,
    /// Total lamports sent to the owner.
    pub payout: u64,
}

#[event]
pub struct MarketCancelled {
    /// Market PDA.
    pub market: Pubkey,
    /// Creator or oracle that cancelled.
    pub authority: Pubkey,
    /// Cancellation time.
    pub timestamp: i64,
}

#[event]
pub struct RefundClaimed {
    /// Market PDA.
    pub market: Pubkey,
    /// Position owner receiving the refund.
    pub owner: Pubkey,
    /// Lamports returned at par.
    pub amount: u64,
}
