mod common;

use common::with_dealpost_env;
use dealpost::config::AppConfig;

fn required_env_vars() -> Vec<(&'static str, &'static str)> {
    vec![
        ("DEALPOST_SHEET_ID", "sheet-123"),
        ("DEALPOST_SERVICE_ACCOUNT_JSON", "{\"client_email\":\"x\",\"private_key\":\"y\"}"),
    ]
}

#[test]
fn test_config_loads_valid_config() {
    let _guard = with_dealpost_env(required_env_vars());

    let config = AppConfig::from_env().expect("Failed to parse config");

    assert_eq!(config.sheets.sheet_id, "sheet-123");
    assert_eq!(
        config.sheets.service_account_json,
        "{\"client_email\":\"x\",\"private_key\":\"y\"}"
    );
    assert_eq!(config.sheets.worksheet_name, None);
    // Check defaults
    assert_eq!(config.deals_path, "deals.json");
    assert_eq!(config.sheets.base_url, "https://sheets.googleapis.com");
}

#[test]
fn test_config_with_optional_fields() {
    let mut vars = required_env_vars();
    vars.extend([
        ("DEALPOST_WORKSHEET_NAME", "Angebote"),
        ("DEALPOST_DEALS_PATH", "/tmp/deals.json"),
        ("DEALPOST_SHEETS_BASE_URL", "http://localhost:8080"),
    ]);
    let _guard = with_dealpost_env(vars);

    let config = AppConfig::from_env().expect("Failed to parse config");

    assert_eq!(config.sheets.worksheet_name, Some("Angebote".to_string()));
    assert_eq!(config.deals_path, "/tmp/deals.json");
    assert_eq!(config.sheets.base_url, "http://localhost:8080");
}

#[test]
fn test_config_missing_required_fields() {
    let _guard = with_dealpost_env(vec![
        // Missing SERVICE_ACCOUNT_JSON
        ("DEALPOST_SHEET_ID", "sheet-123"),
    ]);

    let config = AppConfig::from_env();
    assert!(config.is_err());
}
