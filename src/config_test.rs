use super::*;

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_missing_returns_default() {
    let val: usize = env_parse("__GEOTUTOR_TEST_MISSING__", 42);
    assert_eq!(val, 42);
}

#[test]
fn env_parse_present_valid() {
    unsafe { std::env::set_var("__GEOTUTOR_TEST_VALID__", " 99 ") };
    let val: u64 = env_parse("__GEOTUTOR_TEST_VALID__", 0);
    assert_eq!(val, 99);
    unsafe { std::env::remove_var("__GEOTUTOR_TEST_VALID__") };
}

#[test]
fn env_parse_present_invalid_returns_default() {
    unsafe { std::env::set_var("__GEOTUTOR_TEST_INVALID__", "soon") };
    let val: usize = env_parse("__GEOTUTOR_TEST_INVALID__", 7);
    assert_eq!(val, 7);
    unsafe { std::env::remove_var("__GEOTUTOR_TEST_INVALID__") };
}

// =============================================================================
// HostConfig
// =============================================================================

#[test]
fn host_config_accepts_positive_viewport() {
    let config = HostConfig::new(PathBuf::from("docs"), 1024.0, 768.0, true).unwrap();
    assert_eq!(config.viewport, Viewport::new(1024.0, 768.0));
    assert!(config.narration);
    assert_eq!(config.store_dir, PathBuf::from("docs"));
}

#[test]
fn host_config_rejects_degenerate_viewport() {
    for (w, h) in [(0.0, 600.0), (800.0, -1.0), (f64::NAN, 600.0), (f64::INFINITY, 600.0)] {
        let err = HostConfig::new(PathBuf::from("docs"), w, h, false).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidViewport { .. }), "{w}x{h}");
    }
}

#[test]
fn host_config_rejects_empty_store_dir() {
    let err = HostConfig::new(PathBuf::new(), DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT, false).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyStoreDir));
}
