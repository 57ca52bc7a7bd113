//! URL composition tests: merging, base-URL overlay, address overlay.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use courier_url::{Address, RequestUrl};

    use crate::init_tracing;

    #[test]
    fn test_should_merge_field_wise_with_left_bias() {
        init_tracing();
        let a = RequestUrl::from_parts(None, None, Some("a.com".to_owned()), None, None, None);
        let b = RequestUrl::from_parts(
            Some("https".to_owned()),
            Some("svc:pw".to_owned()),
            Some("b.com".to_owned()),
            Some(8080),
            Some("/other".to_owned()),
            None,
        );

        let merged = a.merge_url_with(&b);
        assert_eq!(merged.scheme(), "https");
        assert_eq!(merged.host().as_deref(), Some("a.com"));
        assert_eq!(merged.port(), 8080);
        assert_eq!(merged.user_info().as_deref(), Some("svc:pw"));
        assert_eq!(merged.path(), "/other");
    }

    #[test]
    fn test_should_prepend_base_url_path_when_host_comes_from_base() {
        let mut url = RequestUrl::default();
        url.set_path("/v1/users");
        let base = RequestUrl::from_literal("https://base.example.com:8443/api/").unwrap();

        url.set_base_url(&base);
        assert_eq!(
            url.generated_url(),
            "https://base.example.com:8443/api/v1/users"
        );
    }

    #[test]
    fn test_should_not_prepend_base_url_path_when_host_is_explicit() {
        let mut url = RequestUrl::default();
        url.set_scheme("http").set_host("mine.example.com");
        url.set_path("/v1/users");
        let base = RequestUrl::from_literal("https://base.example.com/api").unwrap();

        url.set_base_url(&base);
        assert_eq!(url.generated_url(), "http://mine.example.com/v1/users");
    }

    #[test]
    fn test_should_merge_attached_address_into_empty_fields_only() {
        let address = Arc::new(
            Address::builder()
                .scheme("https")
                .host("addr.example.com")
                .port(8443)
                .base_path("/api")
                .build(),
        );

        let mut url = RequestUrl::default();
        url.set_path("/users");
        url.set_address(Arc::clone(&address));
        url.merge_address().unwrap();
        assert_eq!(url.generated_url(), "https://addr.example.com:8443/api/users");

        // An explicit host keeps its scheme-default port: the address's port
        // must not be copied underneath it.
        let mut url = RequestUrl::default();
        url.set_scheme("http").set_host("explicit.example.com");
        url.set_path("/users");
        url.set_address(address);
        url.merge_address().unwrap();
        assert_eq!(url.port(), 80);
        assert_eq!(url.generated_url(), "http://explicit.example.com/api/users");
    }

    #[test]
    fn test_should_apply_address_forcibly() {
        let address = Address::builder()
            .scheme("https")
            .host("forced.example.com")
            .port(9443)
            .base_path("/forced")
            .build();

        let mut url = RequestUrl::from_literal("http://old.example.com:8080/v1").unwrap();
        url.apply_address(&address).unwrap();

        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host().as_deref(), Some("forced.example.com"));
        assert_eq!(url.port(), 9443);
        assert_eq!(url.normalized_base_path(), "/forced");
    }

    #[test]
    fn test_should_keep_forced_base_path_separate_from_path() {
        let mut url = RequestUrl::default();
        url.set_scheme("http").set_host("example.com");
        url.set_path("/v1/users");
        url.set_base_path("/api").unwrap();

        assert_eq!(url.normalized_base_path(), "/api");
        assert_eq!(url.path(), "/v1/users");
        assert_eq!(url.generated_url(), "http://example.com/api/v1/users");
    }
}
