use super::*;

// =============================================================================
// env_bool — uses unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_bool_true_variants() {
    for (i, val) in ["1", "true", "yes", "on"].iter().enumerate() {
        let key = format!("__TEST_AA_EB_TRUE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_false_variants() {
    for (i, val) in ["0", "false", "no", "off"].iter().enumerate() {
        let key = format!("__TEST_AA_EB_FALSE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(false), "expected false for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_invalid_returns_none() {
    let key = "__TEST_AA_EB_INVALID__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_bool_unset_returns_none() {
    assert_eq!(env_bool("__TEST_AA_EB_SURELY_UNSET__"), None);
}

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_valid_number() {
    let key = "__TEST_AA_EP_VALID__";
    unsafe { std::env::set_var(key, "8080") };
    assert_eq!(env_parse(key, 3000_u16), 8080);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_garbage_falls_back() {
    let key = "__TEST_AA_EP_GARBAGE__";
    unsafe { std::env::set_var(key, "eight") };
    assert_eq!(env_parse(key, 3000_u16), 3000);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_unset_falls_back() {
    assert_eq!(env_parse("__TEST_AA_EP_UNSET__", 42_u16), 42);
}

#[test]
fn env_parse_trims_whitespace() {
    let key = "__TEST_AA_EP_WS__";
    unsafe { std::env::set_var(key, "  9000  ") };
    assert_eq!(env_parse(key, 3000_u16), 9000);
    unsafe { std::env::remove_var(key) };
}

// =============================================================================
// trimmed_url
// =============================================================================

#[test]
fn trimmed_url_strips_trailing_slash() {
    assert_eq!(trimmed_url("http://localhost:5000/"), "http://localhost:5000");
}

#[test]
fn trimmed_url_keeps_clean_url() {
    assert_eq!(trimmed_url("https://api.example.com"), "https://api.example.com");
}

#[test]
fn trimmed_url_strips_surrounding_whitespace() {
    assert_eq!(trimmed_url("  http://localhost:5000  "), "http://localhost:5000");
}

// =============================================================================
// cookie_secure inference
// =============================================================================

#[test]
fn https_public_url_implies_secure() {
    assert!("https://admin.example.com".starts_with("https://"));
    assert!(!"http://localhost:3000".starts_with("https://"));
}
