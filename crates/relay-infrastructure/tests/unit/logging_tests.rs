//! Logging helper tests

use relay_infrastructure::logging::parse_log_level;
use tracing::Level;

#[test]
fn test_parse_log_level_accepts_known_levels() {
    assert_eq!(parse_log_level("trace").ok(), Some(Level::TRACE));
    assert_eq!(parse_log_level("DEBUG").ok(), Some(Level::DEBUG));
    assert_eq!(parse_log_level("info").ok(), Some(Level::INFO));
    assert_eq!(parse_log_level("warning").ok(), Some(Level::WARN));
    assert_eq!(parse_log_level("error").ok(), Some(Level::ERROR));
}

#[test]
fn test_parse_log_level_rejects_unknown() {
    let err = parse_log_level("verbose").expect_err("must reject");
    assert!(err.to_string().contains("Invalid log level: verbose"));
}
