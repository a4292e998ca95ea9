use anchor_lang::prelude::*;

use crate::errors::SettlementError;

/// Maximum question length, in characters.
pub const MAX_QUESTION_CHARS: usize = 255;

/// h-ratio value meaning "vault covers every claim".
pub const H_RATIO_FULL: u16 = 10_000;

/// Sentinel stored in `Market::h_ratio_bps` until resolution.
pub const H_RATIO_UNSET: u16 = u16::MAX;

/// ─── Market Account ───────────────────────────────────────────────
///
/// PDA: seeds = [b"market", creator.key, market_id.to_le_bytes()]
///
/// Stores all state for a single binary prediction market.
#[account]
#[derive(Default, Debug)]
pub struct Market {
    /// Unique numeric identifier (incrementing).
    pub market_id: u64,

    /// Creator's public key.
    pub creator: Pubkey,

    /// Oracle authority that can resolve the market.
    pub oracle: Pubkey,

    /// Human-readable question (max 255 characters).
    pub question: String,

    /// Resolution rule type.
    pub rule: MarketRule,

    /// Target value for resolution (e.g. market cap threshold in USD × 10^6).
    pub target_value: u64,

    /// Token mint address this market is about.
    pub token_mint: Pubkey,

    /// Creation time (Unix timestamp).
    pub created_at: i64,

    /// Market deadline (Unix timestamp). Bets are rejected from here on.
    pub deadline: i64,

    /// Maximum cumulative stake per position, copied from config. 0 = no cap.
    pub max_position_amount: u64,

    /// Stored market status. See [`Market::effective_status`] for the
    /// deadline-aware view.
    pub status: MarketStatus,

    /// Resolved outcome (only valid when status == Resolved).
    pub outcome: Outcome,

    // ─── Pool accounting ───
    /// Total lamports deposited into YES side.
    pub yes_pool: u64,

    /// Total lamports deposited into NO side.
    pub no_pool: u64,

    /// Number of distinct positions opened.
    pub positions_count: u64,

    /// YES receipt token mint.
    pub yes_mint: Pubkey,

    /// NO receipt token mint.
    pub no_mint: Pubkey,

    /// Market vault PDA (holds all SOL).
    pub vault: Pubkey,

    /// Vault bump seed.
    pub vault_bump: u8,

    /// Market PDA bump seed.
    pub bump: u8,

    // ─── Settlement state ───
    /// Frozen h-ratio (basis points, 0–10000). `H_RATIO_UNSET` until resolved.
    pub h_ratio_bps: u16,

    /// Resolution time (Unix timestamp), 0 until resolved.
    pub resolved_at: i64,

    /// Vault balance observed at resolution. Upper bound on `settled_amount`.
    pub vault_at_resolution: u64,

    /// Total lamports already paid out during settlement.
    pub settled_amount: u64,

    /// Portion of `settled_amount` that returned winning stakes.
    pub settled_winner_capital: u64,

    /// Number of individual settlements completed (winners and losers).
    pub settlements_count: u64,

    /// Total lamports returned through refunds.
    pub refunded_amount: u64,

    /// Number of refunds completed.
    pub refunds_count: u64,

    /// Reserved space for future upgrades.
    pub _reserved: [u8; 32],
}

impl Market {
    pub const SEED: &'static [u8] = b"market";
    pub const VAULT_SEED: &'static [u8] = b"vault";
    pub const YES_MINT_SEED: &'static [u8] = b"yes_mint";
    pub const NO_MINT_SEED: &'static [u8] = b"no_mint";

    /// Account size for Anchor allocation.
    pub const SIZE: usize = 8  // discriminator
        + 8                     // market_id
        + 32                    // creator
        + 32                    // oracle
        + (4 + MAX_QUESTION_CHARS * 4) // question (String: len + up to 4 bytes per char)
        + 1                     // rule
        + 8                     // target_value
        + 32                    // token_mint
        + 8                     // created_at
        + 8                     // deadline
        + 8                     // max_position_amount
        + 1                     // status
        + 1                     // outcome
        + 8                     // yes_pool
        + 8                     // no_pool
        + 8                     // positions_count
        + 32                    // yes_mint
        + 32                    // no_mint
        + 32                    // vault
        + 1                     // vault_bump
        + 1                     // bump
        + 2                     // h_ratio_bps
        + 8                     // resolved_at
        + 8                     // vault_at_resolution
        + 8                     // settled_amount
        + 8                     // settled_winner_capital
        + 8                     // settlements_count
        + 8                     // refunded_amount
        + 8                     // refunds_count
        + 32;                   // reserved

    /// Market PDA for `(creator, market_id)`.
    pub fn address(creator: &Pubkey, market_id: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[Self::SEED, creator.as_ref(), &market_id.to_le_bytes()],
            &crate::ID,
        )
    }

    /// Vault PDA for a market address.
    pub fn vault_address(market: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::VAULT_SEED, market.as_ref()], &crate::ID)
    }

    /// Status as seen at `now`: an `Open` market past its deadline is `Closed`.
    pub fn effective_status(&self, now: i64) -> MarketStatus {
        match self.status {
            MarketStatus::Open if now >= self.deadline => MarketStatus::Closed,
            status => status,
        }
    }

    /// Pool total staked on `side`.
    pub fn pool(&self, side: BetSide) -> u64 {
        match side {
            BetSide::Yes => self.yes_pool,
            BetSide::No => self.no_pool,
        }
    }

    /// `(winner_pool, loser_pool)` for a decided outcome, `None` while unresolved.
    pub fn pools_for(&self, outcome: Outcome) -> Option<(u64, u64)> {
        match outcome {
            Outcome::Yes => Some((self.yes_pool, self.no_pool)),
            Outcome::No => Some((self.no_pool, self.yes_pool)),
            Outcome::Unresolved => None,
        }
    }

    /// Frozen h-ratio, once resolved.
    pub fn h_ratio(&self) -> Option<u16> {
        (self.h_ratio_bps != H_RATIO_UNSET).then_some(self.h_ratio_bps)
    }

    /// Receipt mint for `side`.
    pub fn receipt_mint(&self, side: BetSide) -> Pubkey {
        match side {
            BetSide::Yes => self.yes_mint,
            BetSide::No => self.no_mint,
        }
    }
}

/// Immutable market terms supplied at creation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct MarketTerms {
    /// Human-readable prediction question (max 255 characters).
    pub question: String,

    /// Resolution rule.
    pub rule: MarketRule,

    /// Target value for resolution (interpretation depends on `rule`).
    pub target_value: u64,

    /// Token mint address that this market is about.
    pub token_mint: Pubkey,

    /// Oracle authority pubkey that can resolve this market.
    pub oracle: Pubkey,

    /// Unix timestamp deadline.
    pub deadline: i64,
}

/// ─── Market Rule ──────────────────────────────────────────────────
///
/// Determines how the oracle decides the market. The program never
/// evaluates the rule itself.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum MarketRule {
    /// Token reaches a target market cap (in USD × 10^6).
    #[default]
    MarketCapTarget,

    /// Token reaches a target price (in USD × 10^9, 9 decimal places).
    PriceTarget,

    /// Token maintains a minimum market cap throughout the period.
    MarketCapFloor,

    /// Custom condition resolved by oracle authority.
    OracleCustom,
}

/// ─── Market Status ────────────────────────────────────────────────
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum MarketStatus {
    /// Market is accepting bets.
    #[default]
    Open,

    /// Market deadline passed, awaiting resolution.
    Closed,

    /// Outcome has been determined; settlement in progress. Terminal.
    Resolved,

    /// Market was cancelled; refunds available. Terminal.
    Cancelled,
}

/// ─── Outcome ──────────────────────────────────────────────────────
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Outcome {
    #[default]
    Unresolved,
    Yes,
    No,
}

/// ─── Bet Side ─────────────────────────────────────────────────────
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum BetSide {
    #[default]
    Yes,
    No,
}

impl BetSide {
    /// Whether this side won under `outcome`.
    pub fn wins(self, outcome: Outcome) -> bool {
        matches!(
            (self, outcome),
            (BetSide::Yes, Outcome::Yes) | (BetSide::No, Outcome::No)
        )
    }
}

/// ─── Position Status ──────────────────────────────────────────────
///
/// One-way: `Active → Settled` or `Active → Refunded`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum PositionStatus {
    #[default]
    Active,
    Settled,
    Refunded,
}

/// ─── User Position ────────────────────────────────────────────────
///
/// PDA: seeds = [b"position", market.key, user.key]
///
/// Tracks a user's bet in a specific market.
#[account]
#[derive(Default, Debug)]
pub struct UserPosition {
    /// The market this position belongs to.
    pub market: Pubkey,

    /// The user who owns this position.
    pub user: Pubkey,

    /// Side of the bet, fixed by the first bet.
    pub side: BetSide,

    /// Total lamports deposited by the user.
    pub deposited: u64,

    /// Lifecycle of the claim.
    pub status: PositionStatus,

    /// Amount paid out (set after settlement or refund).
    pub payout: u64,

    /// Bump seed.
    pub bump: u8,

    /// Reserved.
    pub _reserved: [u8; 32],
}

impl UserPosition {
    pub const SEED: &'static [u8] = b"position";

    pub const SIZE: usize = 8  // discriminator
        + 32                    // market
        + 32                    // user
        + 1                     // side
        + 8                     // deposited
        + 1                     // status
        + 8                     // payout
        + 1                     // bump
        + 32;                   // reserved

    /// A position exists once it has taken a non-zero bet.
    pub fn is_open(&self) -> bool {
        self.deposited > 0
    }
}

/// ─── Global Config ────────────────────────────────────────────────
///
/// PDA: seeds = [b"config"]
///
/// Protocol-level settings. Read explicitly at market creation.
#[account]
#[derive(Default, Debug)]
pub struct GlobalConfig {
    /// Protocol authority (can update config).
    pub authority: Pubkey,

    /// Next market ID to assign.
    pub next_market_id: u64,

    /// Total markets created.
    pub total_markets: u64,

    /// Total volume processed (lamports).
    pub total_volume: u64,

    /// Per-position stake cap copied into new markets. 0 = no cap.
    pub max_position_amount: u64,

    /// Minimum seconds between creation and deadline.
    pub min_market_duration: i64,

    /// Bump seed.
    pub bump: u8,

    /// Reserved.
    pub _reserved: [u8; 32],
}

impl GlobalConfig {
    pub const SEED: &'static [u8] = b"config";

    pub const SIZE: usize = 8  // discriminator
        + 32                    // authority
        + 8                     // next_market_id
        + 8                     // total_markets
        + 8                     // total_volume
        + 8                     // max_position_amount
        + 8                     // min_market_duration
        + 1                     // bump
        + 32;                   // reserved
}

/// Tunable config values, shared by `initialize_config` and `update_config`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfigParams {
    /// Per-position stake cap for new markets. 0 = no cap.
    pub max_position_amount: u64,

    /// Minimum seconds between creation and deadline. Must not be negative.
    pub min_market_duration: i64,
}

impl ConfigParams {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.min_market_duration >= 0,
            SettlementError::InvalidConfig
        );
        Ok(())
    }
}
