use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, Address, Env, String,
    Symbol,
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

/// Price ratio precision (10000 = 100%)
const PRICE_DENOMINATOR: i128 = 10000;

/// Shortest cover period, 28 days in seconds
const MIN_COVER_PERIOD: u64 = 2_419_200;

/// Longest cover period, 365 days in seconds; also the premium annualization base
const MAX_COVER_PERIOD: u64 = 31_536_000;

/// Mutual token precision (18 decimals)
const TOKEN_PRECISION: i128 = 1_000_000_000_000_000_000;

// ==================== Data Structures ====================

/// Storage data key enum
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    /// Capital pool contract address
    CapitalPool,
    /// Staking pool contract address
    StakingPool,
    /// Token controller contract address
    TokenController,
    /// Mutual token contract address
    MutualToken,
    /// Highest commission ratio a buyer may request (1/10000 units)
    MaxCommissionRatio,
    /// Number of covers written
    CoverCount,
    /// Product configuration keyed by product id
    Product(u32),
    /// Cover record keyed by cover id
    Cover(u32),
}

/// Product configuration in the cover registry
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProductConfig {
    /// Price ratio applied before a staking pool quotes its own target
    pub initial_price_ratio: i128,
    /// Share of nominal capacity withheld for this product (1/10000 units)
    pub capacity_reduction_ratio: i128,
}

/// Parameters of a cover purchase
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuyCoverParams {
    /// Account that will own the cover
    pub owner: Address,
    /// Product to buy cover for
    pub product_id: u32,
    /// Asset a payout would be made in
    pub payout_asset: Address,
    /// Cover amount in payout asset units
    pub amount: i128,
    /// Cover period in seconds
    pub period: u64,
    /// Upper bound on premium plus commission the buyer accepts
    pub max_premium: i128,
    /// Pay in mutual tokens instead of the payout asset
    pub pay_with_mutual_tokens: bool,
    /// Commission ratio on top of the premium (1/10000 units)
    pub commission_ratio: i128,
    /// Recipient of the commission, required when the ratio is non-zero
    pub commission_destination: Option<Address>,
    /// Free-form metadata reference (e.g. an ipfs cid)
    pub metadata: String,
}

/// Stored cover record
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CoverData {
    pub owner: Address,
    pub product_id: u32,
    pub payout_asset: Address,
    pub amount: i128,
    /// Ledger timestamp at purchase
    pub start: u64,
    pub period: u64,
    /// Price ratio the premium was charged at
    pub price_ratio: i128,
    pub metadata: String,
}

/// Error code definition
#[contracterror]
#[derive(Clone, Debug, Copy, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CoverError {
    /// Insufficient permissions
    Unauthorized = 501,
    /// Invalid argument
    InvalidArgument = 502,
    /// Product not registered
    ProductNotFound = 503,
    /// Cover period below the minimum
    CoverPeriodTooShort = 504,
    /// Cover period above the maximum
    CoverPeriodTooLong = 505,
    /// Commission ratio above the cap
    CommissionRateTooHigh = 506,
    /// Premium plus commission above the buyer's limit
    PremiumExceedsMax = 507,
    /// Asset not supported by the capital pool
    UnsupportedAsset = 508,
    /// Cover record not found
    CoverNotFound = 509,
    /// Product id already taken
    ProductAlreadyExists = 510,
    /// Arithmetic overflow
    CalculationOverflow = 511,
}

/// Cover contract
#[derive(Upgradeable)]
#[contract]
pub struct Cover;

// ==================== Constructor ====================

#[contractimpl]
impl Cover {
    pub fn __constructor(
        env: &Env,
        admin: Address,
        capital_pool: Address,
        staking_pool: Address,
        token_controller: Address,
        mutual_token: Address,
        max_commission_ratio: i128,
    ) {
        // Verify commission cap
        if max_commission_ratio < 0 || max_commission_ratio > PRICE_DENOMINATOR {
            panic_with_error!(env, CoverError::InvalidArgument);
        }

        // Set contract owner using OpenZeppelin Ownable
        ownable::set_owner(env, &admin);
        env.storage()
            .instance()
            .set(&DataKey::CapitalPool, &capital_pool);
        env.storage()
            .instance()
            .set(&DataKey::StakingPool, &staking_pool);
        env.storage()
            .instance()
            .set(&DataKey::TokenController, &token_controller);
        env.storage()
            .instance()
            .set(&DataKey::MutualToken, &mutual_token);
        env.storage()
            .instance()
            .set(&DataKey::MaxCommissionRatio, &max_commission_ratio);
        env.storage().instance().set(&DataKey::CoverCount, &0u32);

        // Publish initialization event
        env.events().publish(
            (Symbol::new(env, "initialize"),),
            (admin.clone(), capital_pool, staking_pool, max_commission_ratio),
        );
    }
}

// ==================== Cover Purchase Implementation ====================

#[contractimpl]
impl CoverPurchase for Cover {
    fn buy_cover(env: Env, buyer: Address, params: BuyCoverParams) -> u32 {
        buyer.require_auth(); // Verify caller identity

        // Verify parameters
        if params.amount <= 0 {
            panic_with_error!(env, CoverError::InvalidArgument);
        }
        if params.period < MIN_COVER_PERIOD {
            panic_with_error!(env, CoverError::CoverPeriodTooShort);
        }
        if params.period > MAX_COVER_PERIOD {
            panic_with_error!(env, CoverError::CoverPeriodTooLong);
        }
        if params.commission_ratio < 0 {
            panic_with_error!(env, CoverError::InvalidArgument);
        }
        if params.commission_ratio > Self::get_max_commission_ratio_internal(&env) {
            panic_with_error!(env, CoverError::CommissionRateTooHigh);
        }
        if !env
            .storage()
            .persistent()
            .has(&DataKey::Product(params.product_id))
        {
            panic_with_error!(env, CoverError::ProductNotFound);
        }

        let capital_pool = Self::get_capital_pool_internal(&env);
        let pool = PoolClient::new(&env, &capital_pool);
        if !pool.is_asset_supported(&params.payout_asset) {
            panic_with_error!(env, CoverError::UnsupportedAsset);
        }

        // The premium is quoted from the staking pool's target price
        let staking_pool = Self::get_staking_pool_internal(&env);
        let staking = StakingClient::new(&env, &staking_pool);
        let price_ratio = staking.product(&params.product_id).target_price_ratio;

        // Annualized premium scaled down to the cover period
        let base_premium = Self::checked_mul(&env, params.amount, price_ratio) / PRICE_DENOMINATOR;
        let premium = Self::checked_mul(&env, base_premium, params.period as i128)
            / (MAX_COVER_PERIOD as i128);
        if premium <= 0 {
            panic_with_error!(env, CoverError::InvalidArgument);
        }

        // Commission is charged on top and forwarded to the destination
        let commission =
            Self::checked_mul(&env, premium, params.commission_ratio) / PRICE_DENOMINATOR;
        let total_charge = premium
            .checked_add(commission)
            .unwrap_or_else(|| panic_with_error!(env, CoverError::CalculationOverflow));

        if total_charge > params.max_premium {
            panic_with_error!(env, CoverError::PremiumExceedsMax);
        }

        if params.pay_with_mutual_tokens {
            Self::charge_in_mutual_tokens(&env, &buyer, &params, premium, commission);
        } else {
            Self::charge_in_asset(&env, &buyer, &params, premium, commission);
        }

        // Reserve capacity for the new cover
        staking.allocate(&params.product_id, &params.amount);

        // Store the cover record
        let cover_id: u32 = env.storage().instance().get(&DataKey::CoverCount).unwrap();
        let cover_data = CoverData {
            owner: params.owner.clone(),
            product_id: params.product_id,
            payout_asset: params.payout_asset.clone(),
            amount: params.amount,
            start: env.ledger().timestamp(),
            period: params.period,
            price_ratio,
            metadata: params.metadata.clone(),
        };
        env.storage()
            .persistent()
            .set(&DataKey::Cover(cover_id), &cover_data);
        env.storage()
            .instance()
            .set(&DataKey::CoverCount, &(cover_id + 1));

        // Publish purchase event
        env.events().publish(
            (Symbol::new(&env, "buy_cover"), buyer.clone()),
            CoverPurchasedEvent {
                owner: params.owner,
                product_id: params.product_id,
                payout_asset: params.payout_asset,
                amount: params.amount,
                period: params.period,
                premium,
                commission,
            },
        );

        cover_id
    }
}

// ==================== Product Registry Implementation ====================

#[contractimpl]
impl ProductRegistry for Cover {
    #[only_owner]
    fn add_product_by_admin(env: Env, product_id: u32, config: ProductConfig) {
        // Verify configuration
        if config.initial_price_ratio <= 0
            || config.capacity_reduction_ratio < 0
            || config.capacity_reduction_ratio > PRICE_DENOMINATOR
        {
            panic_with_error!(env, CoverError::InvalidArgument);
        }

        let key = DataKey::Product(product_id);
        if env.storage().persistent().has(&key) {
            panic_with_error!(env, CoverError::ProductAlreadyExists);
        }
        env.storage().persistent().set(&key, &config);

        // Publish event
        env.events().publish(
            (Symbol::new(&env, "add_product"), product_id),
            ProductAddedEvent {
                initial_price_ratio: config.initial_price_ratio,
                capacity_reduction_ratio: config.capacity_reduction_ratio,
            },
        );
    }

    fn product_config(env: Env, product_id: u32) -> ProductConfig {
        env.storage()
            .persistent()
            .get(&DataKey::Product(product_id))
            .unwrap_or_else(|| panic_with_error!(env, CoverError::ProductNotFound))
    }

    fn has_product(env: Env, product_id: u32) -> bool {
        env.storage().persistent().has(&DataKey::Product(product_id))
    }
}

// ==================== Query Implementation ====================

#[contractimpl]
impl CoverQuery for Cover {
    fn cover_data(env: Env, cover_id: u32) -> CoverData {
        env.storage()
            .persistent()
            .get(&DataKey::Cover(cover_id))
            .unwrap_or_else(|| panic_with_error!(env, CoverError::CoverNotFound))
    }

    fn cover_metadata(env: Env, cover_id: u32) -> String {
        Self::cover_data(env, cover_id).metadata
    }

    fn cover_count(env: Env) -> u32 {
        env.storage().instance().get(&DataKey::CoverCount).unwrap() // Set in constructor
    }
}

#[contractimpl]
impl SystemQuery for Cover {
    fn get_admin(env: Env) -> Address {
        ownable::get_owner(&env).unwrap()
    }

    fn get_capital_pool(env: Env) -> Address {
        Self::get_capital_pool_internal(&env)
    }

    fn get_staking_pool(env: Env) -> Address {
        Self::get_staking_pool_internal(&env)
    }

    fn get_token_controller(env: Env) -> Address {
        Self::get_token_controller_internal(&env)
    }

    fn get_mutual_token(env: Env) -> Address {
        env.storage().instance().get(&DataKey::MutualToken).unwrap() // Set in constructor
    }

    fn get_max_commission_ratio(env: Env) -> i128 {
        Self::get_max_commission_ratio_internal(&env)
    }
}

// ==================== Internal Helper Functions ====================

impl Cover {
    /// Get capital pool address
    fn get_capital_pool_internal(env: &Env) -> Address {
        env.storage().instance().get(&DataKey::CapitalPool).unwrap() // Set in constructor
    }

    /// Get staking pool address
    fn get_staking_pool_internal(env: &Env) -> Address {
        env.storage().instance().get(&DataKey::StakingPool).unwrap() // Set in constructor
    }

    /// Get token controller address
    fn get_token_controller_internal(env: &Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::TokenController)
            .unwrap() // Set in constructor
    }

    /// Get commission cap
    fn get_max_commission_ratio_internal(env: &Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::MaxCommissionRatio)
            .unwrap() // Set in constructor
    }

    /// Multiply with overflow trapped to a contract error
    fn checked_mul(env: &Env, a: i128, b: i128) -> i128 {
        a.checked_mul(b)
            .unwrap_or_else(|| panic_with_error!(env, CoverError::CalculationOverflow))
    }

    /// Resolve the commission destination, panics when missing
    fn require_commission_destination(env: &Env, params: &BuyCoverParams) -> Address {
        params
            .commission_destination
            .clone()
            .unwrap_or_else(|| panic_with_error!(env, CoverError::InvalidArgument))
    }

    /// Charge premium and commission in the payout asset. The pool pulls the
    /// premium from the buyer, the commission goes straight to the destination.
    fn charge_in_asset(
        env: &Env,
        buyer: &Address,
        params: &BuyCoverParams,
        premium: i128,
        commission: i128,
    ) {
        let capital_pool = Self::get_capital_pool_internal(env);
        PoolClient::new(env, &capital_pool).receive_premium(
            buyer,
            &params.payout_asset,
            &premium,
        );

        if commission > 0 {
            let destination = Self::require_commission_destination(env, params);
            AssetClient::new(env, &params.payout_asset).transfer_from(
                &env.current_contract_address(),
                buyer,
                &destination,
                &commission,
            );
        }
    }

    /// Charge premium and commission in mutual tokens at the pool spot price.
    /// The full charge is burned from the buyer and the commission share is
    /// minted to the destination, so pool asset balances stay unchanged.
    fn charge_in_mutual_tokens(
        env: &Env,
        buyer: &Address,
        params: &BuyCoverParams,
        premium: i128,
        commission: i128,
    ) {
        let capital_pool = Self::get_capital_pool_internal(env);
        let spot_price = PoolClient::new(env, &capital_pool).spot_token_price();

        let total_charge = premium + commission;
        let token_total = Self::to_token_amount(env, total_charge, spot_price);

        let token_controller = Self::get_token_controller_internal(env);
        let controller = ControllerClient::new(env, &token_controller);

        // Cover acts as controller operator (must be registered)
        controller.burn(&env.current_contract_address(), buyer, &token_total);

        if commission > 0 {
            let destination = Self::require_commission_destination(env, params);
            let token_commission = Self::to_token_amount(env, commission, spot_price);
            controller.mint(&env.current_contract_address(), &destination, &token_commission);
        }
    }

    /// Convert a payout asset amount into mutual tokens at the given spot price
    fn to_token_amount(env: &Env, amount: i128, spot_price: i128) -> i128 {
        Self::checked_mul(env, amount, TOKEN_PRECISION) / spot_price
    }
}

// ==================== Ownable Implementation ====================

#[default_impl]
#[contractimpl]
impl Ownable for Cover {}

// Provide upgrade auth via OpenZeppelin UpgradeableInternal
impl UpgradeableInternal for Cover {
    fn _require_auth(e: &Env, operator: &Address) {
        operator.require_auth();
        let owner = ownable::get_owner(e).unwrap();
        if *operator != owner {
            panic_with_error!(e, CoverError::Unauthorized);
        }
    }
}
