//! Integration tests for courier-config

use courier_config::*;
use std::env;
use std::io::Write;

#[test]
fn test_dotenv_file_feeds_prefixed_settings() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "COURIER_IT_EMAIL_HOST_USER=noreply@example.com").unwrap();
    writeln!(file, "COURIER_IT_EMAIL_HOST_PASSWORD=secret").unwrap();
    writeln!(file, "COURIER_IT_EMAIL_HOST=smtp.example.com").unwrap();
    writeln!(file, "COURIER_IT_EMAIL_PORT=2587").unwrap();
    file.flush().unwrap();

    load_dotenv(Some(file.path())).unwrap();

    let loader = EnvLoader::new(Some("COURIER_IT".to_string()));
    let settings = MailSettings::from_env(&loader).unwrap();

    assert_eq!(settings.account, "noreply@example.com");
    assert_eq!(settings.password, "secret");
    assert_eq!(settings.host, "smtp.example.com");
    assert_eq!(settings.port, 2587);
    assert_eq!(settings.display_name, DEFAULT_DISPLAY_NAME);

    for key in [
        "COURIER_IT_EMAIL_HOST_USER",
        "COURIER_IT_EMAIL_HOST_PASSWORD",
        "COURIER_IT_EMAIL_HOST",
        "COURIER_IT_EMAIL_PORT",
    ] {
        unsafe {
            env::remove_var(key);
        }
    }
}

#[test]
fn test_explicit_missing_dotenv_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_dotenv(Some(&dir.path().join("absent.env")));

    assert!(matches!(result, Err(ConfigError::Dotenv(_))));
}

#[test]
fn test_prefixed_env_without_keys_reports_account_missing() {
    let loader = EnvLoader::new(Some("COURIER_EMPTY_9931".to_string()));
    let err = MailSettings::from_env(&loader).unwrap_err();

    assert!(matches!(err, ConfigError::Missing(ref key) if key == "EMAIL_HOST_USER"));
}
