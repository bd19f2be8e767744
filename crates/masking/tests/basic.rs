use masking::{ExposeInterface, Mask, Maskable, PeekInterface, Secret};

#[test]
fn debug_output_is_masked() {
    let api_key: Secret<String> = Secret::new("live_key_1234".to_string());
    let printed = format!("{api_key:?}");
    assert!(!printed.contains("live_key_1234"));
    assert!(printed.contains("alloc::string::String"));
}

#[test]
fn peek_and_expose() {
    let secret: Secret<String> = "s3cr3t".into();
    assert_eq!(secret.peek(), "s3cr3t");
    assert_eq!(secret.expose(), "s3cr3t");
}

#[test]
fn serialization_exposes_inner_value() {
    let secret: Secret<String> = "wire-value".into();
    let serialized = serde_json::to_string(&secret).expect("serialize secret");
    assert_eq!(serialized, r#""wire-value""#);
}

#[test]
fn maskable_header_values() {
    let auth: Maskable<String> = "token".to_string().into_masked();
    let plain: Maskable<String> = "application/json".into();
    assert!(auth.is_masked());
    assert!(!plain.is_masked());
    assert_eq!(auth.into_inner(), "token");
    assert_eq!(plain.into_inner(), "application/json");
}
