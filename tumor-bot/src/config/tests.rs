//! Config tests.

use crate::config::{parse_user_ids, BotConfig, DetectionSettings, DEFAULT_MODEL_PATH};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const VARS: &[&str] = &[
    "TELEGRAM_BOT_TOKEN",
    "BOT_TOKEN",
    "TELEGRAM_API_URL",
    "TELOXIDE_API_URL",
    "LOG_FILE",
    "ALLOWED_USER_IDS",
    "MODEL_PATH",
    "DETECTION_CONFIDENCE",
    "DETECTION_IOU",
    "DETECTION_INPUT_SIZE",
    "DETECTION_THREADS",
    "GEMINI_API_KEY",
    "GEMINI_BASE_URL",
    "GEMINI_MODEL",
    "LLM_TIMEOUT_SECS",
];

fn clear_env() {
    for v in VARS {
        env::remove_var(v);
    }
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    env::set_var("TELEGRAM_BOT_TOKEN", "test_token");
    env::set_var("GEMINI_API_KEY", "test_key");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "test_token");
    assert!(config.telegram_api_url().is_none());
    assert_eq!(config.log_file(), "logs/tumor-bot.log");
    assert!(config.allowed_user_ids().is_empty());
    assert_eq!(config.detection.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
    assert_eq!(config.detection.confidence_threshold, 0.25);
    assert_eq!(config.detection.iou_threshold, 0.7);
    assert_eq!(config.detection.input_size, 640);
    assert_eq!(config.detection.intra_threads, 4);
    assert_eq!(config.llm.gemini_model, "gemini-1.5-flash");
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    env::set_var("BOT_TOKEN", "fallback_token");
    env::set_var("GEMINI_API_KEY", "test_key");
    env::set_var("GEMINI_MODEL", "gemini-2.0-flash");
    env::set_var("MODEL_PATH", "/models/best.onnx");
    env::set_var("DETECTION_CONFIDENCE", "0.4");
    env::set_var("DETECTION_INPUT_SIZE", "320");
    env::set_var("ALLOWED_USER_IDS", "1, 2,,3");
    env::set_var("LOG_FILE", "/tmp/bot.log");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "fallback_token");
    assert_eq!(config.llm.gemini_model, "gemini-2.0-flash");
    assert_eq!(config.detection.model_path, PathBuf::from("/models/best.onnx"));
    assert_eq!(config.detection.confidence_threshold, 0.4);
    assert_eq!(config.detection.input_size, 320);
    assert_eq!(config.allowed_user_ids(), &[1, 2, 3]);
    assert_eq!(config.log_file(), "/tmp/bot.log");

    clear_env();
}

#[test]
#[serial]
fn test_load_config_with_override_token() {
    clear_env();
    env::set_var("TELEGRAM_BOT_TOKEN", "env_token");
    env::set_var("GEMINI_API_KEY", "test_key");

    let config = BotConfig::load(Some("override_token".to_string())).unwrap();

    assert_eq!(config.bot_token(), "override_token");
}

#[test]
#[serial]
fn test_missing_token_or_gemini_key_fails() {
    clear_env();
    env::set_var("GEMINI_API_KEY", "test_key");
    assert!(BotConfig::load(None).is_err());

    clear_env();
    env::set_var("TELEGRAM_BOT_TOKEN", "test_token");
    let err = BotConfig::load(None).err().unwrap();
    assert!(err.to_string().contains("GEMINI_API_KEY"));
}

#[test]
#[serial]
fn test_validate_telegram_api_url_invalid() {
    clear_env();
    env::set_var("TELEGRAM_BOT_TOKEN", "test_token");
    env::set_var("GEMINI_API_KEY", "test_key");
    env::set_var("TELEGRAM_API_URL", "not-a-valid-url");

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    env::remove_var("TELEGRAM_API_URL");
}

#[test]
#[serial]
fn test_validate_thresholds() {
    clear_env();
    env::set_var("DETECTION_IOU", "1.5");
    assert!(DetectionSettings::from_env().unwrap().validate().is_err());

    env::set_var("DETECTION_IOU", "0");
    assert!(DetectionSettings::from_env().unwrap().validate().is_err());

    env::set_var("DETECTION_IOU", "1");
    assert!(DetectionSettings::from_env().unwrap().validate().is_ok());

    env::set_var("DETECTION_INPUT_SIZE", "100");
    assert!(DetectionSettings::from_env().unwrap().validate().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_unparseable_detection_values_fail() {
    clear_env();
    env::set_var("DETECTION_CONFIDENCE", "abc");
    let err = DetectionSettings::from_env().unwrap_err();
    assert!(err.to_string().contains("DETECTION_CONFIDENCE"));

    env::set_var("TELEGRAM_BOT_TOKEN", "test_token");
    env::set_var("GEMINI_API_KEY", "test_key");
    assert!(BotConfig::load(None).is_err());

    clear_env();
    env::set_var("DETECTION_THREADS", "four");
    assert!(DetectionSettings::from_env().is_err());

    env::set_var("DETECTION_THREADS", "  ");
    assert_eq!(DetectionSettings::from_env().unwrap().intra_threads, 4);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_allowed_user_ids_fail() {
    clear_env();
    env::set_var("TELEGRAM_BOT_TOKEN", "test_token");
    env::set_var("GEMINI_API_KEY", "test_key");
    env::set_var("ALLOWED_USER_IDS", "12,abc");

    assert!(BotConfig::load(None).is_err());

    clear_env();
}

#[test]
fn test_parse_user_ids() {
    assert_eq!(parse_user_ids("").unwrap(), Vec::<i64>::new());
    assert_eq!(parse_user_ids(" 5 ").unwrap(), vec![5]);
    assert_eq!(parse_user_ids("-100,7").unwrap(), vec![-100, 7]);
}
