use soroban_sdk::{testutils::Address as _, Address, String};

use cover::CoverError;
use integration_tests::fixtures::{
    EngineVariant, MutualTestEnv, ProtocolConfig, DEFAULT_PRODUCT_ID, ONE_TOKEN, THIRTY_DAYS,
};
use staking_pool::StakingError;

const ONE_YEAR: u64 = 31_536_000;

/// Premium the cover contract charges: the annualized rate scaled
/// down to the cover period, floor division at each step
fn expected_premium(amount: i128, price_ratio: i128, period: u64) -> i128 {
    let annual = amount * price_ratio / 10_000;
    annual * (period as i128) / (ONE_YEAR as i128)
}

#[test]
fn test_cover_record_matches_purchase_inputs() {
    let test_env = MutualTestEnv::new(EngineVariant::Current);
    let config = ProtocolConfig::default();
    let cover = test_env.get_cover_client();

    // 1. Prepare a funded buyer
    let buyer = Address::generate(&test_env.env);
    test_env.fund_address(&buyer, 100 * ONE_TOKEN);
    test_env.approve_pool(&buyer, 10 * ONE_TOKEN);

    // 2. Buy a 30-day cover with a metadata reference attached
    let mut params = test_env.cover_params(&buyer);
    params.metadata = String::from_str(&test_env.env, "ipfs://QmCoverTerms");
    let purchased_at = test_env.env.ledger().timestamp();
    let cover_id = cover.buy_cover(&buyer, &params);
    assert_eq!(cover_id, 0);

    // 3. The stored record reflects the purchase inputs
    let data = cover.cover_data(&cover_id);
    assert_eq!(data.owner, buyer);
    assert_eq!(data.product_id, DEFAULT_PRODUCT_ID);
    assert_eq!(data.payout_asset, test_env.base_asset_addr);
    assert_eq!(data.amount, params.amount);
    assert_eq!(data.start, purchased_at);
    assert_eq!(data.period, THIRTY_DAYS);
    assert_eq!(data.price_ratio, config.target_price_ratio);
    assert_eq!(data.metadata, params.metadata);
    assert_eq!(cover.cover_metadata(&cover_id), params.metadata);
    assert_eq!(cover.cover_count(), 1);

    // 4. The staking pool reserved capacity for the new cover
    let product = test_env.get_staking_client().product(&DEFAULT_PRODUCT_ID);
    assert_eq!(product.active_cover, params.amount);

    println!(
        "Cover {} written: {} units over {} seconds at ratio {}",
        cover_id, data.amount, data.period, data.price_ratio
    );
}

#[test]
fn test_premium_splits_between_pool_and_commission_destination() {
    let test_env = MutualTestEnv::new(EngineVariant::Current);
    let config = ProtocolConfig::default();
    let cover = test_env.get_cover_client();

    let buyer = Address::generate(&test_env.env);
    let broker = Address::generate(&test_env.env);
    test_env.fund_address(&buyer, 100 * ONE_TOKEN);

    // A 5% commission on top of the premium, forwarded to the broker
    let mut params = test_env.cover_params(&buyer);
    params.commission_ratio = 500;
    params.commission_destination = Some(broker.clone());

    let premium = expected_premium(params.amount, config.target_price_ratio, params.period);
    let commission = premium * 500 / 10_000;

    // The pool pulls the premium and the cover contract pulls the commission
    test_env.approve_pool(&buyer, premium);
    test_env.approve_cover(&buyer, commission);

    let pool_before = test_env.base_asset_balance(&test_env.capital_pool_addr);
    let buyer_before = test_env.base_asset_balance(&buyer);
    cover.buy_cover(&buyer, &params);

    assert_eq!(
        test_env.base_asset_balance(&test_env.capital_pool_addr),
        pool_before + premium
    );
    assert_eq!(
        test_env.base_asset_balance(&buyer),
        buyer_before - premium - commission
    );
    assert_eq!(test_env.base_asset_balance(&broker), commission);

    println!(
        "Premium {} to the pool, commission {} to the broker",
        premium, commission
    );
}

#[test]
fn test_mutual_token_payment_leaves_pool_assets_unchanged() {
    let test_env = MutualTestEnv::new(EngineVariant::Current);
    let config = ProtocolConfig::default();
    let cover = test_env.get_cover_client();

    // 1. Capitalize the pool so the spot price is on the curve
    test_env.fund_pool(config.mcr_eth);

    // 2. The buyer acquires mutual tokens from the pool first
    let buyer = Address::generate(&test_env.env);
    let broker = Address::generate(&test_env.env);
    test_env.fund_address(&buyer, 2_000 * ONE_TOKEN);
    test_env.approve_pool(&buyer, 1_000 * ONE_TOKEN);
    let tokens_bought = test_env.buy_tokens(&buyer, 1_000 * ONE_TOKEN);
    assert!(tokens_bought > 0);

    // Spot price at the moment the cover purchase converts the charge
    let spot_price = test_env.get_pool_client().spot_token_price();

    let mut params = test_env.cover_params(&buyer);
    params.pay_with_mutual_tokens = true;
    params.commission_ratio = 500;
    params.commission_destination = Some(broker.clone());

    let premium = expected_premium(params.amount, config.target_price_ratio, params.period);
    let commission = premium * 500 / 10_000;
    let token_total = (premium + commission) * ONE_TOKEN / spot_price;
    let token_commission = commission * ONE_TOKEN / spot_price;

    // 3. Pay in tokens: the charge is burned, no asset moves
    let pool_asset_before = test_env.base_asset_balance(&test_env.capital_pool_addr);
    let buyer_asset_before = test_env.base_asset_balance(&buyer);
    let buyer_tokens_before = test_env.token_balance(&buyer);

    cover.buy_cover(&buyer, &params);

    assert_eq!(
        test_env.base_asset_balance(&test_env.capital_pool_addr),
        pool_asset_before
    );
    assert_eq!(test_env.base_asset_balance(&buyer), buyer_asset_before);
    assert_eq!(
        test_env.token_balance(&buyer),
        buyer_tokens_before - token_total
    );
    assert_eq!(test_env.token_balance(&broker), token_commission);

    println!(
        "Burned {} tokens at spot {} for a {} premium",
        token_total, spot_price, premium
    );
}

#[test]
fn test_buy_cover_rejects_invalid_requests() {
    let test_env = MutualTestEnv::new(EngineVariant::Current);
    let config = ProtocolConfig::default();
    let cover = test_env.get_cover_client();

    let buyer = Address::generate(&test_env.env);
    let base = test_env.cover_params(&buyer);
    let premium = expected_premium(base.amount, config.target_price_ratio, base.period);

    // An asset the pool does not hold
    let foreign_admin = Address::generate(&test_env.env);
    let foreign_asset = test_env
        .env
        .register_stellar_asset_contract_v2(foreign_admin)
        .address();

    let mut too_short = base.clone();
    too_short.period = 3_600 * 24 * 27;
    let mut too_long = base.clone();
    too_long.period = 3_600 * 24 * 366;
    let mut commission_over_cap = base.clone();
    commission_over_cap.commission_ratio = config.max_commission_ratio + 1;
    let mut zero_amount = base.clone();
    zero_amount.amount = 0;
    let mut unknown_product = base.clone();
    unknown_product.product_id = 99;
    let mut unsupported_asset = base.clone();
    unsupported_asset.payout_asset = foreign_asset;
    let mut premium_over_limit = base.clone();
    premium_over_limit.max_premium = premium - 1;

    // Each rejection fires before any funds move, so the buyer stays unfunded
    let test_cases = vec![
        (too_short, CoverError::CoverPeriodTooShort),
        (too_long, CoverError::CoverPeriodTooLong),
        (commission_over_cap, CoverError::CommissionRateTooHigh),
        (zero_amount, CoverError::InvalidArgument),
        (unknown_product, CoverError::ProductNotFound),
        (unsupported_asset, CoverError::UnsupportedAsset),
        (premium_over_limit, CoverError::PremiumExceedsMax),
    ];

    for (params, expected) in test_cases {
        let result = cover.try_buy_cover(&buyer, &params);
        assert_eq!(result, Err(Ok(expected.into())));
    }
    assert_eq!(cover.cover_count(), 0);
}

#[test]
fn test_capacity_exhaustion_propagates_from_staking() {
    let test_env = MutualTestEnv::new(EngineVariant::Current);
    let config = ProtocolConfig::default();
    let cover = test_env.get_cover_client();

    // An amount the default product cannot back
    let buyer = Address::generate(&test_env.env);
    let mut params = test_env.cover_params(&buyer);
    params.amount = config.product_capacity + 1_000 * ONE_TOKEN;
    params.max_premium = 3_000 * ONE_TOKEN;

    // The premium charge precedes the capacity check, so funds are required
    test_env.fund_address(&buyer, 3_000 * ONE_TOKEN);
    test_env.approve_pool(&buyer, 3_000 * ONE_TOKEN);
    let pool_before = test_env.base_asset_balance(&test_env.capital_pool_addr);

    let result = cover.try_buy_cover(&buyer, &params);
    assert_eq!(result, Err(Ok(StakingError::CapacityExceeded.into())));

    // The failed purchase rolled back in full
    assert_eq!(cover.cover_count(), 0);
    assert_eq!(
        test_env.base_asset_balance(&test_env.capital_pool_addr),
        pool_before
    );
}

#[test]
fn test_cover_ids_increment_sequentially() {
    let test_env = MutualTestEnv::new(EngineVariant::Current);
    let cover = test_env.get_cover_client();

    let buyer = Address::generate(&test_env.env);
    test_env.fund_address(&buyer, 100 * ONE_TOKEN);
    test_env.approve_pool(&buyer, 30 * ONE_TOKEN);

    let params = test_env.cover_params(&buyer);
    assert_eq!(cover.buy_cover(&buyer, &params), 0);
    assert_eq!(cover.buy_cover(&buyer, &params), 1);
    assert_eq!(cover.buy_cover(&buyer, &params), 2);
    assert_eq!(cover.cover_count(), 3);

    // Capacity accrues across all three covers
    let product = test_env.get_staking_client().product(&DEFAULT_PRODUCT_ID);
    assert_eq!(product.active_cover, 3 * params.amount);
}
