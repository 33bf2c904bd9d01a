// Centralized Protocol Constants

// Fixed-point & rate math
// =======================

/// Scale factor for `acc_reward_per_share` (12 decimals of fixed point).
/// Accumulator math is done in u128 and truncated back to u64 on payout.
pub const ACC_PRECISION: u128 = 1_000_000_000_000;

/// Default denominator for ticket multipliers. A multiplier equal to the
/// denominator (10_000 / 10_000) means 1 staked base unit = 1 ticket.
pub const DEFAULT_MULTIPLIER_DENOMINATOR: u64 = 10_000;

// Collection bounds
// =================
// Account sizes must stay deterministic (InitSpace), so every on-chain
// collection carries a hard cap. Exceeding a cap is a hard error, never a
// silent truncation.

/// Max checkpoints retained per (pool, beneficiary) history between prunes.
pub const MAX_CHECKPOINTS: usize = 256;

/// Max pools a registration set may hold for one round.
pub const MAX_SET_POOLS: usize = 32;

/// Max distinct beneficiaries in the global participant registry.
pub const MAX_USERS: usize = 128;

/// Max distinct beneficiaries per pool participant list.
pub const MAX_POOL_PARTICIPANTS: usize = 64;

/// Max blacklisted beneficiaries.
pub const MAX_BLACKLIST: usize = 64;

/// Initial version for account structures.
pub const INITIAL_VERSION: u16 = 1;

// Registration set kinds
// ======================

/// The set of pools whose tickets count toward the current round.
pub const SET_KIND_PRIZE: u8 = 0;

/// The companion set used only to aggregate distinct-participant counts.
pub const SET_KIND_USER_COUNT: u8 = 1;
