use anchor_lang::prelude::*;

/// Custom error codes for the settlement program.
///
/// Error codes are offset from 6000 (Anchor convention). Every variant is
/// raised before any account is mutated.
#[error_code]
pub enum SettlementError {
    // ─── Input ───
    /// Bet amount must be greater than zero.
    #[msg("Bet amount must be > 0")]
    ZeroBetAmount,

    /// A position cannot switch sides after its first bet.
    #[msg("Position already holds the opposite side")]
    SideMismatch,

    /// Cumulative position size exceeds the market maximum.
    #[msg("Bet amount exceeds maximum")]
    BetAmountExceedsMax,

    /// Question exceeds maximum length (255 characters).
    #[msg("Question too long (max 255 characters)")]
    QuestionTooLong,

    /// Deadline must be in the future.
    #[msg("Deadline must be in the future")]
    DeadlineInPast,

    /// Deadline is closer than the configured minimum market duration.
    #[msg("Market duration below configured minimum")]
    MarketDurationTooShort,

    /// Outcome must be Yes or No.
    #[msg("Invalid outcome")]
    InvalidOutcome,

    /// Config parameters are out of range.
    #[msg("Invalid config parameters")]
    InvalidConfig,

    /// Receipt token account or mint does not match the position side.
    #[msg("Receipt mint does not match position side")]
    ReceiptMintMismatch,

    // ─── Authorization ───
    /// Only the designated oracle authority can resolve this market.
    #[msg("Unauthorized: not the oracle authority")]
    UnauthorizedOracle,

    /// Only the market creator (or oracle) can perform this action.
    #[msg("Unauthorized: not the market creator")]
    UnauthorizedCreator,

    /// Only the position owner can perform this action.
    #[msg("Unauthorized: not the position owner")]
    UnauthorizedOwner,

    /// Only the protocol authority can update the config.
    #[msg("Unauthorized: not the protocol authority")]
    UnauthorizedAuthority,

    // ─── State ───
    /// Market is not in the expected status for this operation.
    #[msg("Market is not in the expected status")]
    InvalidState,

    /// Market has already been resolved.
    #[msg("Market already resolved")]
    AlreadyResolved,

    /// Position has already been settled.
    #[msg("Position already settled")]
    AlreadySettled,

    /// Position has already been refunded.
    #[msg("Position already refunded")]
    AlreadyRefunded,

    /// Market has not yet reached its deadline.
    #[msg("Market has not reached deadline")]
    MarketNotYetClosed,

    /// Market deadline has already passed; no more bets accepted.
    #[msg("Market deadline has passed")]
    MarketExpired,

    /// Cannot cancel a market that has already been resolved.
    #[msg("Cannot cancel a resolved market")]
    CannotCancelResolved,

    /// User has no stake in this market.
    #[msg("No position found")]
    NoPosition,

    /// Position account belongs to a different market.
    #[msg("Position does not belong to this market")]
    PositionMarketMismatch,

    // ─── Arithmetic / solvency ───
    /// Overflow in arithmetic operation.
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    /// Winner pool is empty on a winning settlement.
    #[msg("Division by zero: winner pool is empty")]
    DivisionByZeroGuard,

    /// Cumulative payouts would exceed the vault balance seen at resolution.
    #[msg("Payout would exceed vault balance observed at resolution")]
    VaultInsolvency,

    /// Vault does not currently hold the requested amount.
    #[msg("Insufficient vault balance")]
    InsufficientVaultBalance,
}
