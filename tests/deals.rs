use dealpost::deals::{load_deals, DealsError};
use std::fs;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("dealpost-test-{}", name))
}

#[test]
fn loads_deals_in_order_with_defaults() {
    let path = temp_path("valid-deals.json");
    fs::write(
        &path,
        r#"[
            {
                "title": "Pampers Baby-Dry Monatspaket Gr. 3",
                "price": "45,49€",
                "old_price": "59,99€",
                "discount": "-24%",
                "link": "https://amzn.to/4sE7IBl"
            },
            {
                "title": "Test Toy",
                "price": "9,99€",
                "link": "https://x/y"
            }
        ]"#,
    )
    .expect("Failed to write deals file");

    let deals = load_deals(path.to_str().unwrap()).expect("Failed to load deals");
    fs::remove_file(&path).ok();

    assert_eq!(deals.len(), 2);
    assert_eq!(deals[0].title, "Pampers Baby-Dry Monatspaket Gr. 3");
    assert_eq!(deals[0].old_price, "59,99€");
    assert_eq!(deals[1].title, "Test Toy");
    // Absent optional fields default to empty
    assert_eq!(deals[1].old_price, "");
    assert_eq!(deals[1].discount, "");
}

#[test]
fn missing_file_is_a_distinct_error() {
    let path = temp_path("does-not-exist.json");
    let result = load_deals(path.to_str().unwrap());

    assert!(matches!(result, Err(DealsError::MissingFile(_))));
}

#[test]
fn malformed_json_fails_with_context() {
    let path = temp_path("malformed-deals.json");
    fs::write(&path, "{ not json").expect("Failed to write deals file");

    let result = load_deals(path.to_str().unwrap());
    fs::remove_file(&path).ok();

    assert!(result.is_err());
}
