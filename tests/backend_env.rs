//! Environment-driven backend configuration.
//!
//! Kept in its own test binary: it edits process environment variables,
//! which must not race with other tests reading them.

use story_service::backend::BackendClient;
use story_service::config::BackendConfig;

#[test]
fn test_unset_env_falls_back_to_placeholders() {
    // SAFETY: the only test in this binary, so no other thread reads the environment
    unsafe {
        std::env::remove_var("SUPABASE_URL");
        std::env::remove_var("SUPABASE_ANON_KEY");
    }

    let config = BackendConfig::from_env();
    assert_eq!(config.url, "https://example.supabase.co");
    assert_eq!(config.anon_key, "example-anon-key");

    let shared = BackendClient::shared();
    assert_eq!(shared.config(), &config);
    assert!(shared.config().is_placeholder());
}
