use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env, String,
};

// Direct contract implementation imports
use capital_pool::{CapitalPool, CapitalPoolClient};
use claims::{Claims, ClaimsClient};
use cover::{BuyCoverParams, Cover, CoverClient, ProductConfig};
use legacy_mcr::LegacyMcrEngine;
use mcr::McrEngine;
use mutual_token::{MutualToken, MutualTokenClient};
use staking_pool::{StakingPool, StakingPoolClient};
use token_controller::{TokenController, TokenControllerClient};

/// One whole token or asset unit (18 decimals)
pub const ONE_TOKEN: i128 = 1_000_000_000_000_000_000;

/// Product both registries carry by default
pub const DEFAULT_PRODUCT_ID: u32 = 1;

/// Thirty days in seconds, the usual cover period in these tests
pub const THIRTY_DAYS: u64 = 2_592_000;

/// Which pricing engine generation an environment is built around
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EngineVariant {
    Legacy,
    Current,
}

/// Economic parameters shared by every environment in a run
///
/// Comparison runs build two environments from one config so that the
/// only difference between them is the engine variant.
#[derive(Clone, Debug)]
pub struct ProtocolConfig {
    /// Minimum capital requirement, in asset base units
    pub mcr_eth: i128,
    /// Highest commission ratio cover buyers may request (1/10000 units)
    pub max_commission_ratio: i128,
    /// Capacity of the default product on the staking pool
    pub product_capacity: i128,
    /// Target price ratio of the default product (1/10000 units)
    pub target_price_ratio: i128,
    /// Claim deposit as a share of the requested amount (1/10000 units)
    pub claim_deposit_ratio: i128,
    /// Length of the assessment poll in seconds
    pub voting_period: u64,
    /// Delay between poll end and redeemability in seconds
    pub payout_cooldown: u64,
    /// Length of the redemption window in seconds
    pub redemption_window: u64,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            mcr_eth: 160_000 * ONE_TOKEN,
            max_commission_ratio: 2_500,
            product_capacity: 1_000_000 * ONE_TOKEN,
            target_price_ratio: 260,
            claim_deposit_ratio: 500,
            voting_period: 259_200,
            payout_cooldown: 86_400,
            redemption_window: 1_209_600,
        }
    }
}

/// Test environment struct
///
/// Holds the shared `Env` handle and the addresses of one fully wired
/// protocol instance. Two instances deployed into the same `Env` share
/// the ledger clock, which is what the comparison driver relies on.
pub struct MutualTestEnv {
    pub env: Env,
    // Addresses
    pub admin: Address,
    pub member: Address,
    // Contract addresses
    pub base_asset_addr: Address,
    pub mutual_token_addr: Address,
    pub token_controller_addr: Address,
    pub mcr_engine_addr: Address,
    pub capital_pool_addr: Address,
    pub staking_pool_addr: Address,
    pub cover_addr: Address,
    pub claims_addr: Address,
}

impl MutualTestEnv {
    /// Create a standalone test environment around the given engine
    pub fn new(variant: EngineVariant) -> Self {
        let env = Env::default();
        env.mock_all_auths();
        Self::deploy(&env, variant, &ProtocolConfig::default())
    }

    /// Deploy and wire a full protocol instance into an existing env
    pub fn deploy(env: &Env, variant: EngineVariant, config: &ProtocolConfig) -> Self {
        // Create test addresses
        let admin = Address::generate(env);
        let member = Address::generate(env);

        // The payment asset is a Stellar Asset Contract
        let base_asset_admin = Address::generate(env);
        let base_asset_addr = env
            .register_stellar_asset_contract_v2(base_asset_admin)
            .address();

        // The engine variant is the only difference between environments
        let mcr_engine_addr = match variant {
            EngineVariant::Legacy => env.register(LegacyMcrEngine, ()),
            EngineVariant::Current => env.register(McrEngine, ()),
        };

        let mutual_token_addr = env.register(
            MutualToken,
            (
                &admin,
                String::from_str(env, "Mutual Token"),
                String::from_str(env, "MTL"),
                18u32,
            ),
        );
        let token_controller_addr = env.register(TokenController, (&admin, &mutual_token_addr));

        let capital_pool_addr = env.register(
            CapitalPool,
            (
                admin.clone(),
                base_asset_addr.clone(),
                mcr_engine_addr.clone(),
                token_controller_addr.clone(),
                config.mcr_eth,
            ),
        );

        let staking_pool_addr = env.register(StakingPool, (&admin,));

        let cover_addr = env.register(
            Cover,
            (
                admin.clone(),
                capital_pool_addr.clone(),
                staking_pool_addr.clone(),
                token_controller_addr.clone(),
                mutual_token_addr.clone(),
                config.max_commission_ratio,
            ),
        );

        let claims_addr = env.register(
            Claims,
            (
                admin.clone(),
                cover_addr.clone(),
                capital_pool_addr.clone(),
                mutual_token_addr.clone(),
                config.claim_deposit_ratio,
                config.voting_period,
                config.payout_cooldown,
                config.redemption_window,
            ),
        );

        let test_env = Self {
            env: env.clone(),
            admin,
            member,
            base_asset_addr,
            mutual_token_addr,
            token_controller_addr,
            mcr_engine_addr,
            capital_pool_addr,
            staking_pool_addr,
            cover_addr,
            claims_addr,
        };
        test_env.setup_relationships(config);
        test_env
    }

    /// Set contract relationships
    fn setup_relationships(&self, config: &ProtocolConfig) {
        // 1. Token mint/burn routes through the controller
        self.get_token_client()
            .set_token_controller(&self.token_controller_addr);

        // 2. Pool and cover mint and burn through the controller
        let controller = self.get_controller_client();
        controller.add_operator(&self.capital_pool_addr);
        controller.add_operator(&self.cover_addr);
        // The admin mints directly when a test needs seeded token balances
        controller.add_operator(&self.admin);

        // 3. Premium and payout gates on the pool
        let pool = self.get_pool_client();
        pool.set_cover_contract_by_admin(&self.cover_addr);
        pool.set_claims_contract_by_admin(&self.claims_addr);

        // 4. Capacity allocation gate on the staking pool
        self.get_staking_client()
            .set_cover_contract_by_admin(&self.cover_addr);

        // 5. The default product on both registries
        self.get_staking_client().add_product_by_admin(
            &DEFAULT_PRODUCT_ID,
            &config.product_capacity,
            &config.target_price_ratio,
        );
        self.get_cover_client().add_product_by_admin(
            &DEFAULT_PRODUCT_ID,
            &ProductConfig {
                initial_price_ratio: config.target_price_ratio,
                capacity_reduction_ratio: 0,
            },
        );

        // 6. Member roles: the member and the claims contract move mutual
        //    tokens around, so both must be enrolled
        let token = self.get_token_client();
        token.add_member(&self.member);
        token.add_member(&self.claims_addr);
    }

    /// Get contract client
    pub fn get_token_client(&self) -> MutualTokenClient {
        MutualTokenClient::new(&self.env, &self.mutual_token_addr)
    }

    pub fn get_controller_client(&self) -> TokenControllerClient {
        TokenControllerClient::new(&self.env, &self.token_controller_addr)
    }

    pub fn get_pool_client(&self) -> CapitalPoolClient {
        CapitalPoolClient::new(&self.env, &self.capital_pool_addr)
    }

    pub fn get_staking_client(&self) -> StakingPoolClient {
        StakingPoolClient::new(&self.env, &self.staking_pool_addr)
    }

    pub fn get_cover_client(&self) -> CoverClient {
        CoverClient::new(&self.env, &self.cover_addr)
    }

    pub fn get_claims_client(&self) -> ClaimsClient {
        ClaimsClient::new(&self.env, &self.claims_addr)
    }

    /// Issue base asset units to an address
    pub fn fund_address(&self, to: &Address, amount: i128) {
        token::StellarAssetClient::new(&self.env, &self.base_asset_addr).mint(to, &amount);
    }

    /// Credit the pool balance directly, without a purchase
    pub fn fund_pool(&self, amount: i128) {
        self.fund_address(&self.capital_pool_addr, amount);
    }

    /// Authorize the pool to pull base asset units from an address
    pub fn approve_pool(&self, from: &Address, amount: i128) {
        self.approve_spender(&self.base_asset_addr, from, &self.capital_pool_addr, amount);
    }

    /// Authorize the cover contract to pull the commission from a buyer
    pub fn approve_cover(&self, from: &Address, amount: i128) {
        self.approve_spender(&self.base_asset_addr, from, &self.cover_addr, amount);
    }

    /// Authorize the claims contract to pull the claim deposit
    pub fn approve_claims(&self, from: &Address, amount: i128) {
        self.approve_spender(&self.base_asset_addr, from, &self.claims_addr, amount);
    }

    /// Authorize a spender on an arbitrary asset
    pub fn approve_spender(&self, asset: &Address, from: &Address, spender: &Address, amount: i128) {
        let live_until = self.env.ledger().sequence() + 100;
        token::TokenClient::new(&self.env, asset).approve(from, spender, &amount, &live_until);
    }

    /// Buy pool tokens, returns the mutual tokens credited
    pub fn buy_tokens(&self, buyer: &Address, value: i128) -> i128 {
        self.get_pool_client().buy_tokens(buyer, &value, &0)
    }

    /// Get an address's base asset balance
    pub fn base_asset_balance(&self, id: &Address) -> i128 {
        token::TokenClient::new(&self.env, &self.base_asset_addr).balance(id)
    }

    /// Get an address's mutual token balance
    pub fn token_balance(&self, id: &Address) -> i128 {
        self.get_token_client().balance_of(id)
    }

    /// Mint mutual tokens through the controller
    pub fn mint_mutual_tokens(&self, to: &Address, amount: i128) {
        self.get_controller_client().mint(&self.admin, to, &amount);
    }

    /// Enroll an address as a token member
    pub fn enroll_member(&self, who: &Address) {
        self.get_token_client().add_member(who);
    }

    /// Advance time by specified seconds
    pub fn advance_time(&self, seconds: u64) {
        let current_time = self.env.ledger().timestamp();
        self.env.ledger().with_mut(|li| {
            li.timestamp = current_time + seconds;
        });
    }

    /// Purchase parameters for a plain 30-day cover on the default product
    pub fn cover_params(&self, owner: &Address) -> BuyCoverParams {
        BuyCoverParams {
            owner: owner.clone(),
            product_id: DEFAULT_PRODUCT_ID,
            payout_asset: self.base_asset_addr.clone(),
            amount: 1_000 * ONE_TOKEN,
            period: THIRTY_DAYS,
            max_premium: 10 * ONE_TOKEN,
            pay_with_mutual_tokens: false,
            commission_ratio: 0,
            commission_destination: None,
            metadata: String::from_str(&self.env, ""),
        }
    }
}
