use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, Address, Env, Symbol,
};
use stellar_default_impl_macro::default_impl;
use stellar_ownable::{self as ownable, Ownable};
use stellar_ownable_macro::only_owner;
use stellar_upgradeable::UpgradeableInternal;
use stellar_upgradeable_macros::Upgradeable;

// Import dependencies
use crate::dependencies::*;
// Import traits
use crate::traits::*;

// ==================== Constants ====================

/// Ratio precision (10000 = 100%)
const RATIO_DENOMINATOR: i128 = 10000;

// ==================== Data Structures ====================

/// Storage data key enum
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    /// Cover contract address
    CoverContract,
    /// Capital pool contract address
    CapitalPool,
    /// Mutual token contract address
    MutualToken,
    /// Claim deposit as a share of the requested amount (1/10000 units)
    DepositRatio,
    /// Length of the assessment poll in seconds
    VotingPeriod,
    /// Delay between poll end and redeemability in seconds
    PayoutCooldown,
    /// Length of the redemption window in seconds
    RedemptionWindow,
    /// Number of claims filed
    ClaimCount,
    /// Claim record keyed by claim id
    Claim(u32),
    /// Vote keyed by claim id and assessor
    Vote(u32, Address),
    /// Assessment stake keyed by assessor
    Stake(Address),
    /// End of the latest poll the assessor voted in
    LastPollEnd(Address),
}

/// Claim record with its assessment poll
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Claim {
    pub claimant: Address,
    pub cover_id: u32,
    /// Payout requested, in the cover's payout asset
    pub amount: i128,
    /// Deposit held until redemption
    pub deposit: i128,
    pub poll_start: u64,
    pub poll_end: u64,
    /// Stake-weighted accept votes
    pub accept_total: i128,
    /// Stake-weighted reject votes
    pub reject_total: i128,
    pub redeemed: bool,
}

/// One assessor's vote on a claim
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteRecord {
    pub accept: bool,
    /// Assessor stake at the time of voting
    pub weight: i128,
}

/// Error code definition
#[contracterror]
#[derive(Clone, Debug, Copy, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ClaimsError {
    /// Insufficient permissions
    Unauthorized = 601,
    /// Invalid argument
    InvalidArgument = 602,
    /// Claimant does not own the cover
    NotCoverOwner = 603,
    /// Requested amount above the cover amount
    AmountExceedsCover = 604,
    /// Claim record not found
    ClaimNotFound = 605,
    /// Assessment poll has ended
    PollClosed = 606,
    /// Assessment poll has not ended
    PollStillOpen = 607,
    /// Assessor already voted on this claim
    AlreadyVoted = 608,
    /// No assessment stake to vote or withdraw with
    NoStake = 609,
    /// Poll did not end in favor of the claim
    ClaimNotAccepted = 610,
    /// Claim payout already redeemed
    AlreadyRedeemed = 611,
    /// Redemption window has expired
    RedemptionWindowExpired = 612,
    /// Cooldown period has not passed
    CooldownNotPassed = 613,
    /// Arithmetic overflow
    CalculationOverflow = 614,
}

/// Claims contract
#[derive(Upgradeable)]
#[contract]
pub struct Claims;

// ==================== Constructor ====================

#[contractimpl]
impl Claims {
    pub fn __constructor(
        env: &Env,
        admin: Address,
        cover_contract: Address,
        capital_pool: Address,
        mutual_token: Address,
        deposit_ratio: i128,
        voting_period: u64,
        payout_cooldown: u64,
        redemption_window: u64,
    ) {
        // Verify poll parameters
        if deposit_ratio < 0 || deposit_ratio > RATIO_DENOMINATOR {
            panic_with_error!(env, ClaimsError::InvalidArgument);
        }
        if voting_period == 0 || redemption_window == 0 {
            panic_with_error!(env, ClaimsError::InvalidArgument);
        }

        // Set contract owner using OpenZeppelin Ownable
        ownable::set_owner(env, &admin);
        env.storage()
            .instance()
            .set(&DataKey::CoverContract, &cover_contract);
        env.storage()
            .instance()
            .set(&DataKey::CapitalPool, &capital_pool);
        env.storage()
            .instance()
            .set(&DataKey::MutualToken, &mutual_token);
        env.storage()
            .instance()
            .set(&DataKey::DepositRatio, &deposit_ratio);
        env.storage()
            .instance()
            .set(&DataKey::VotingPeriod, &voting_period);
        env.storage()
            .instance()
            .set(&DataKey::PayoutCooldown, &payout_cooldown);
        env.storage()
            .instance()
            .set(&DataKey::RedemptionWindow, &redemption_window);
        env.storage().instance().set(&DataKey::ClaimCount, &0u32);

        // Publish initialization event
        env.events().publish(
            (Symbol::new(env, "initialize"),),
            (admin.clone(), cover_contract, capital_pool, deposit_ratio),
        );
    }
}

// ==================== Claim Submission Implementation ====================

#[contractimpl]
impl ClaimSubmission for Claims {
    fn submit_claim(env: Env, claimant: Address, cover_id: u32, requested_amount: i128) -> u32 {
        claimant.require_auth(); // Verify caller identity

        // Verify parameters
        if requested_amount <= 0 {
            panic_with_error!(env, ClaimsError::InvalidArgument);
        }

        let cover_contract = Self::get_cover_contract_internal(&env);
        let cover_data = CoverClient::new(&env, &cover_contract).cover_data(&cover_id);

        if cover_data.owner != claimant {
            panic_with_error!(env, ClaimsError::NotCoverOwner);
        }
        if requested_amount > cover_data.amount {
            panic_with_error!(env, ClaimsError::AmountExceedsCover);
        }

        // Hold a deposit in the cover's payout asset until redemption
        let deposit_ratio = Self::get_deposit_ratio_internal(&env);
        let deposit = Self::checked_mul(&env, requested_amount, deposit_ratio) / RATIO_DENOMINATOR;
        if deposit > 0 {
            AssetClient::new(&env, &cover_data.payout_asset).transfer_from(
                &env.current_contract_address(),
                &claimant,
                &env.current_contract_address(),
                &deposit,
            );
        }

        let now = env.ledger().timestamp();
        let poll_end = now + Self::get_voting_period_internal(&env);

        let claim_id = Self::claim_count_internal(&env);
        let claim = Claim {
            claimant: claimant.clone(),
            cover_id,
            amount: requested_amount,
            deposit,
            poll_start: now,
            poll_end,
            accept_total: 0,
            reject_total: 0,
            redeemed: false,
        };
        env.storage()
            .persistent()
            .set(&DataKey::Claim(claim_id), &claim);
        env.storage()
            .instance()
            .set(&DataKey::ClaimCount, &(claim_id + 1));

        // Publish submission event
        env.events().publish(
            (Symbol::new(&env, "submit_claim"), claim_id),
            ClaimSubmittedEvent {
                claimant,
                cover_id,
                amount: requested_amount,
                deposit,
                poll_end,
            },
        );

        claim_id
    }
}

// ==================== Assessment Implementation ====================

#[contractimpl]
impl Assessment for Claims {
    fn deposit_stake(env: Env, assessor: Address, amount: i128) {
        assessor.require_auth(); // Verify caller identity

        // Verify parameters
        if amount <= 0 {
            panic_with_error!(env, ClaimsError::InvalidArgument);
        }

        // Pull the stake in mutual tokens
        let mutual_token = Self::get_mutual_token_internal(&env);
        TokenClient::new(&env, &mutual_token).transfer(
            &assessor,
            &env.current_contract_address(),
            &amount,
        );

        let stake = Self::stake_of_internal(&env, &assessor);
        let total_stake = Self::checked_add(&env, stake, amount);
        env.storage()
            .persistent()
            .set(&DataKey::Stake(assessor.clone()), &total_stake);

        // Publish stake event
        env.events().publish(
            (Symbol::new(&env, "deposit_stake"), assessor.clone()),
            StakeDepositedEvent {
                assessor,
                amount,
                total_stake,
            },
        );
    }

    fn withdraw_stake(env: Env, assessor: Address, amount: i128) {
        assessor.require_auth(); // Verify caller identity

        // Verify parameters
        if amount <= 0 {
            panic_with_error!(env, ClaimsError::InvalidArgument);
        }

        let stake = Self::stake_of_internal(&env, &assessor);
        if amount > stake {
            panic_with_error!(env, ClaimsError::NoStake);
        }

        // Stake stays locked until the cooldown after the latest voted poll
        let unlock = Self::stake_unlock_time_internal(&env, &assessor);
        if env.ledger().timestamp() < unlock {
            panic_with_error!(env, ClaimsError::CooldownNotPassed);
        }

        let remaining_stake = stake - amount;
        env.storage()
            .persistent()
            .set(&DataKey::Stake(assessor.clone()), &remaining_stake);

        // Return the stake in mutual tokens
        let mutual_token = Self::get_mutual_token_internal(&env);
        TokenClient::new(&env, &mutual_token).transfer(
            &env.current_contract_address(),
            &assessor,
            &amount,
        );

        // Publish withdrawal event
        env.events().publish(
            (Symbol::new(&env, "withdraw_stake"), assessor.clone()),
            StakeWithdrawnEvent {
                assessor,
                amount,
                remaining_stake,
            },
        );
    }

    fn cast_vote(env: Env, assessor: Address, claim_id: u32, accept: bool) {
        assessor.require_auth(); // Verify caller identity

        let mut claim = Self::get_claim_internal(&env, claim_id);

        // Votes are only taken while the poll is open
        if env.ledger().timestamp() >= claim.poll_end {
            panic_with_error!(env, ClaimsError::PollClosed);
        }

        let weight = Self::stake_of_internal(&env, &assessor);
        if weight == 0 {
            panic_with_error!(env, ClaimsError::NoStake);
        }

        // One vote per assessor per claim
        let vote_key = DataKey::Vote(claim_id, assessor.clone());
        if env.storage().persistent().has(&vote_key) {
            panic_with_error!(env, ClaimsError::AlreadyVoted);
        }

        if accept {
            claim.accept_total = Self::checked_add(&env, claim.accept_total, weight);
        } else {
            claim.reject_total = Self::checked_add(&env, claim.reject_total, weight);
        }
        env.storage()
            .persistent()
            .set(&DataKey::Claim(claim_id), &claim);
        env.storage()
            .persistent()
            .set(&vote_key, &VoteRecord { accept, weight });

        // Extend the stake lock to this poll's end
        let last_key = DataKey::LastPollEnd(assessor.clone());
        let last_end: u64 = env.storage().persistent().get(&last_key).unwrap_or(0);
        if claim.poll_end > last_end {
            env.storage().persistent().set(&last_key, &claim.poll_end);
        }

        // Publish vote event
        env.events().publish(
            (Symbol::new(&env, "cast_vote"), claim_id),
            VoteCastEvent {
                assessor,
                accept,
                weight,
            },
        );
    }
}

// ==================== Redemption Implementation ====================

#[contractimpl]
impl Redemption for Claims {
    fn redeem_claim_payout(env: Env, claim_id: u32) {
        let mut claim = Self::get_claim_internal(&env, claim_id);

        if claim.redeemed {
            panic_with_error!(env, ClaimsError::AlreadyRedeemed);
        }

        let now = env.ledger().timestamp();
        if now < claim.poll_end {
            panic_with_error!(env, ClaimsError::PollStillOpen);
        }

        // Redeemable only after the cooldown, within the redemption window
        let redeemable_from = claim.poll_end + Self::get_payout_cooldown_internal(&env);
        if now < redeemable_from {
            panic_with_error!(env, ClaimsError::CooldownNotPassed);
        }
        if now > redeemable_from + Self::get_redemption_window_internal(&env) {
            panic_with_error!(env, ClaimsError::RedemptionWindowExpired);
        }

        // Claim needs to be accepted by stake-weighted majority
        if claim.accept_total <= claim.reject_total {
            panic_with_error!(env, ClaimsError::ClaimNotAccepted);
        }

        claim.redeemed = true;
        env.storage()
            .persistent()
            .set(&DataKey::Claim(claim_id), &claim);

        // Pay the cover owner from the capital pool
        let cover_contract = Self::get_cover_contract_internal(&env);
        let cover_data = CoverClient::new(&env, &cover_contract).cover_data(&claim.cover_id);
        let capital_pool = Self::get_capital_pool_internal(&env);
        PoolClient::new(&env, &capital_pool).send_payout(
            &cover_data.payout_asset,
            &cover_data.owner,
            &claim.amount,
        );

        // Refund the submission deposit
        if claim.deposit > 0 {
            AssetClient::new(&env, &cover_data.payout_asset).transfer(
                &env.current_contract_address(),
                &claim.claimant,
                &claim.deposit,
            );
        }

        // Publish redemption event
        env.events().publish(
            (Symbol::new(&env, "redeem_claim"), claim_id),
            ClaimRedeemedEvent {
                claimant: claim.claimant,
                cover_id: claim.cover_id,
                amount: claim.amount,
                deposit: claim.deposit,
            },
        );
    }
}

// ==================== Query Implementation ====================

#[contractimpl]
impl ClaimQuery for Claims {
    fn claim(env: Env, claim_id: u32) -> Claim {
        Self::get_claim_internal(&env, claim_id)
    }

    fn claim_count(env: Env) -> u32 {
        Self::claim_count_internal(&env)
    }

    fn stake_of(env: Env, assessor: Address) -> i128 {
        Self::stake_of_internal(&env, &assessor)
    }

    fn vote_of(env: Env, claim_id: u32, assessor: Address) -> Option<VoteRecord> {
        env.storage()
            .persistent()
            .get(&DataKey::Vote(claim_id, assessor))
    }

    fn stake_unlock_time(env: Env, assessor: Address) -> u64 {
        Self::stake_unlock_time_internal(&env, &assessor)
    }
}

#[contractimpl]
impl ConfigQuery for Claims {
    fn get_admin(env: Env) -> Address {
        ownable::get_owner(&env).unwrap()
    }

    fn get_cover_contract(env: Env) -> Address {
        Self::get_cover_contract_internal(&env)
    }

    fn get_capital_pool(env: Env) -> Address {
        Self::get_capital_pool_internal(&env)
    }

    fn get_mutual_token(env: Env) -> Address {
        Self::get_mutual_token_internal(&env)
    }

    fn get_deposit_ratio(env: Env) -> i128 {
        Self::get_deposit_ratio_internal(&env)
    }

    fn get_voting_period(env: Env) -> u64 {
        Self::get_voting_period_internal(&env)
    }

    fn get_payout_cooldown(env: Env) -> u64 {
        Self::get_payout_cooldown_internal(&env)
    }

    fn get_redemption_window(env: Env) -> u64 {
        Self::get_redemption_window_internal(&env)
    }
}

// ==================== Management Implementation ====================

#[contractimpl]
impl AdminManagement for Claims {
    #[only_owner]
    fn set_deposit_ratio_by_admin(env: Env, deposit_ratio: i128) {
        // Verify ratio range
        if deposit_ratio < 0 || deposit_ratio > RATIO_DENOMINATOR {
            panic_with_error!(env, ClaimsError::InvalidArgument);
        }
        env.storage()
            .instance()
            .set(&DataKey::DepositRatio, &deposit_ratio);

        // Publish event
        env.events().publish(
            (Symbol::new(&env, "set_deposit_ratio"),),
            DepositRatioUpdatedEvent {
                admin: ownable::get_owner(&env).unwrap(),
                deposit_ratio,
            },
        );
    }
}

// ==================== Internal Functions ====================

impl Claims {
    /// Get cover contract address
    fn get_cover_contract_internal(env: &Env) -> Address {
        env.storage().instance().get(&DataKey::CoverContract).unwrap() // Set in constructor
    }

    /// Get capital pool address
    fn get_capital_pool_internal(env: &Env) -> Address {
        env.storage().instance().get(&DataKey::CapitalPool).unwrap() // Set in constructor
    }

    /// Get mutual token address
    fn get_mutual_token_internal(env: &Env) -> Address {
        env.storage().instance().get(&DataKey::MutualToken).unwrap() // Set in constructor
    }

    /// Get claim deposit ratio
    fn get_deposit_ratio_internal(env: &Env) -> i128 {
        env.storage().instance().get(&DataKey::DepositRatio).unwrap() // Set in constructor
    }

    /// Get assessment poll length
    fn get_voting_period_internal(env: &Env) -> u64 {
        env.storage().instance().get(&DataKey::VotingPeriod).unwrap() // Set in constructor
    }

    /// Get payout cooldown length
    fn get_payout_cooldown_internal(env: &Env) -> u64 {
        env.storage().instance().get(&DataKey::PayoutCooldown).unwrap() // Set in constructor
    }

    /// Get redemption window length
    fn get_redemption_window_internal(env: &Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::RedemptionWindow)
            .unwrap() // Set in constructor
    }

    fn claim_count_internal(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::ClaimCount)
            .unwrap_or(0)
    }

    fn stake_of_internal(env: &Env, assessor: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Stake(assessor.clone()))
            .unwrap_or(0)
    }

    /// Load a claim record, panics when missing
    fn get_claim_internal(env: &Env, claim_id: u32) -> Claim {
        env.storage()
            .persistent()
            .get(&DataKey::Claim(claim_id))
            .unwrap_or_else(|| panic_with_error!(env, ClaimsError::ClaimNotFound))
    }

    /// Timestamp at which the assessor's stake unlocks, zero when never voted
    fn stake_unlock_time_internal(env: &Env, assessor: &Address) -> u64 {
        let last_end: u64 = env
            .storage()
            .persistent()
            .get(&DataKey::LastPollEnd(assessor.clone()))
            .unwrap_or(0);
        if last_end == 0 {
            return 0;
        }
        last_end + Self::get_payout_cooldown_internal(env)
    }

    /// Multiply with overflow trapped to a contract error
    fn checked_mul(env: &Env, a: i128, b: i128) -> i128 {
        a.checked_mul(b)
            .unwrap_or_else(|| panic_with_error!(env, ClaimsError::CalculationOverflow))
    }

    /// Add with overflow trapped to a contract error
    fn checked_add(env: &Env, a: i128, b: i128) -> i128 {
        a.checked_add(b)
            .unwrap_or_else(|| panic_with_error!(env, ClaimsError::CalculationOverflow))
    }
}

// ==================== Ownable Implementation ====================

#[default_impl]
#[contractimpl]
impl Ownable for Claims {}

// Provide upgrade auth via OpenZeppelin UpgradeableInternal
impl UpgradeableInternal for Claims {
    fn _require_auth(e: &Env, operator: &Address) {
        operator.require_auth();
        let owner = ownable::get_owner(e).unwrap();
        if *operator != owner {
            panic_with_error!(e, ClaimsError::Unauthorized);
        }
    }
}
