use eloquence::infrastructure::observability::TracingConfig;

#[test]
fn given_default_config_when_created_then_filter_targets_this_crate() {
    let config = TracingConfig::default();

    assert!(config.default_filter.contains("eloquence=debug"));
    assert!(!config.environment.is_empty());
}

#[test]
fn given_configured_level_when_overriding_filter_then_replaces_default() {
    let config = TracingConfig::default().with_default_filter("warn");

    assert_eq!(config.default_filter, "warn");
}
