use anchor_lang::prelude::*;

#[error_code]
pub enum LedgerError {
    // -----------------
    // Authorization
    // -----------------
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Caller is not the round controller")]
    NotController,
    #[msg("Caller is not the position's funder")]
    NotFunder,

    #[msg("Protocol paused")]
    Paused,

    // -----------------
    // Registration / invariants
    // -----------------
    #[msg("Unknown pool id")]
    UnknownPool,
    #[msg("Stake adapter already registered as a pool")]
    AdapterAlreadyRegistered,
    #[msg("Unknown adapter kind value")]
    UnknownAdapterKind,
    #[msg("Reward-sink adapters cannot back a pool")]
    RewardSinkAdapter,
    #[msg("Beneficiary is blacklisted")]
    Blacklisted,
    #[msg("Position already funded by a different account")]
    BadFunder,
    #[msg("Pool already in the set")]
    DuplicatePool,
    #[msg("Pool is not in the set")]
    PoolNotInSet,

    // -----------------
    // Capacity
    // -----------------
    #[msg("Withdrawal exceeds staked amount")]
    ExceedsStake,
    #[msg("Reward mint ceiling exceeded")]
    MintCeilingExceeded,
    #[msg("Checkpoint history is full")]
    CheckpointHistoryFull,
    #[msg("Pool participant list is full")]
    ParticipantLimitReached,
    #[msg("User registry is full")]
    UserRegistryFull,
    #[msg("Blacklist is full")]
    BlacklistFull,
    #[msg("Registration set is full")]
    SetFull,

    // -----------------
    // Protocol state (set lifecycle)
    // -----------------
    #[msg("Invalid registration set status value")]
    InvalidStatus,
    #[msg("Invalid registration set status transition")]
    InvalidStatusTransition,
    #[msg("Registration set is not in Adding status")]
    SetNotAdding,
    #[msg("Registration set is not in Added status")]
    SetNotAdded,
    #[msg("Registration set is not in Active status")]
    SetNotActive,
    #[msg("Prune time does not match the round's frozen time")]
    PruneTimeMismatch,
    #[msg("Unknown registration set kind")]
    UnknownSetKind,

    // -----------------
    // Arguments / math
    // -----------------
    #[msg("Invalid amount")]
    InvalidAmount,
    #[msg("Invalid reward weight")]
    InvalidWeight,
    #[msg("Invalid ticket multiplier")]
    InvalidMultiplier,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Checkpoint timestamp regression")]
    TimestampRegression,

    // -----------------
    // Account plumbing
    // -----------------
    #[msg("Position PDA mismatch")]
    PositionPdaMismatch,
    #[msg("Stake history PDA mismatch")]
    HistoryPdaMismatch,
    #[msg("Pool PDA mismatch")]
    PoolPdaMismatch,
    #[msg("Remaining accounts do not match the expected layout")]
    RemainingAccountsMismatch,
    #[msg("Failed to borrow account data")]
    AccountBorrowFailed,
    #[msg("Beneficiary is not blacklisted")]
    NotBlacklisted,
    #[msg("Token account mint does not match the reward mint")]
    InvalidRewardAccount,
    #[msg("Token account mint does not match the pool's stake mint")]
    InvalidStakeAccount,
    #[msg("History account not owned by program")]
    HistoryNotOwnedByProgram,
}
