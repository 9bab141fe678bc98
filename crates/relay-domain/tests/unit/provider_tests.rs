//! Unit tests for provider tiers

use relay_domain::value_objects::ProviderTier;

#[test]
fn test_tier_order() {
    let mut tiers = vec![ProviderTier::Local, ProviderTier::Primary, ProviderTier::Fallback];
    tiers.sort();
    assert_eq!(
        tiers,
        vec![ProviderTier::Primary, ProviderTier::Fallback, ProviderTier::Local]
    );
}

#[test]
fn test_tier_parse() {
    assert_eq!("primary".parse::<ProviderTier>().ok(), Some(ProviderTier::Primary));
    assert_eq!(" Local ".parse::<ProviderTier>().ok(), Some(ProviderTier::Local));
    assert!("secondary".parse::<ProviderTier>().is_err());
}

#[test]
fn test_tier_display_matches_serde() {
    let json = serde_json::to_string(&ProviderTier::Fallback).expect("serialization should succeed");
    assert_eq!(json, format!("\"{}\"", ProviderTier::Fallback));
}
