use media3p_core::{fetch_categories_error_message, fetch_media_error_message, ProviderType};

#[test]
fn provider_identifiers_parse_case_insensitively() {
    assert_eq!(ProviderType::from("UNSPLASH"), ProviderType::Unsplash);
    assert_eq!(ProviderType::from(" coverr "), ProviderType::Coverr);
    assert_eq!(ProviderType::from("Local"), ProviderType::Local);
    assert_eq!(
        ProviderType::from("tenor"),
        ProviderType::Other("tenor".to_string())
    );
    assert_eq!(ProviderType::Unsplash.to_string(), "unsplash");
    assert!(!ProviderType::from("tenor").is_known());
}

#[test]
fn media_error_messages_follow_provider_table() {
    assert_eq!(
        fetch_media_error_message(&ProviderType::from("UNSPLASH")),
        "Error loading media from Unsplash"
    );
    assert_eq!(
        fetch_media_error_message(&ProviderType::Coverr),
        "Error loading media from Coverr"
    );
    assert_eq!(
        fetch_media_error_message(&ProviderType::Local),
        "Error loading media from Wordpress"
    );
    assert_eq!(
        fetch_media_error_message(&ProviderType::from("somewhere")),
        "Error loading media"
    );
}

#[test]
fn category_error_messages_fall_back_to_generic() {
    assert_eq!(
        fetch_categories_error_message(&ProviderType::Unsplash),
        "Error loading categories from Unsplash"
    );
    assert_eq!(
        fetch_categories_error_message(&ProviderType::from("x")),
        "Error loading categories"
    );
}
