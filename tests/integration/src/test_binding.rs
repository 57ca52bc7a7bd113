//! Per-call template binding tests.

#[cfg(test)]
mod tests {
    use courier_core::{ResolvedCall, UrlTemplate};
    use courier_url::RequestUrl;

    use crate::init_tracing;

    #[test]
    fn test_should_resolve_templates_against_the_bound_call() {
        init_tracing();
        let mut url = RequestUrl::default();
        url.set_scheme("https");
        url.set_host_template(UrlTemplate::parse("{region}.example.com"));
        url.set_path_template(UrlTemplate::parse("/users/{id}"));

        // Unbound templates read as absent.
        assert!(url.host().is_none());

        let call = ResolvedCall::new()
            .with_arg("region", "eu-west-1")
            .with_arg("id", "42")
            .into_call();
        url.bind_call(&call);

        assert_eq!(url.host().as_deref(), Some("eu-west-1.example.com"));
        assert_eq!(url.generated_url(), "https://eu-west-1.example.com/users/42");
    }

    #[test]
    fn test_should_resolve_numeric_port_templates() {
        let mut url = RequestUrl::default();
        url.set_scheme("http").set_host("example.com");
        url.set_port_template(UrlTemplate::parse("{port}"));

        let call = ResolvedCall::new().with_arg("port", "8080").into_call();
        url.bind_call(&call);

        assert_eq!(url.port(), 8080);
        assert_eq!(url.generated_url(), "http://example.com:8080");
    }

    #[test]
    fn test_should_give_each_clone_its_own_call() {
        let mut template_url = RequestUrl::default();
        template_url.set_scheme("https");
        template_url.set_host_template(UrlTemplate::parse("{tenant}.example.com"));
        template_url.set_path("/v1/ping");

        let mut first = template_url.clone();
        let mut second = template_url.clone();

        first.bind_call(&ResolvedCall::new().with_arg("tenant", "acme").into_call());
        second.bind_call(&ResolvedCall::new().with_arg("tenant", "globex").into_call());

        assert_eq!(first.generated_url(), "https://acme.example.com/v1/ping");
        assert_eq!(second.generated_url(), "https://globex.example.com/v1/ping");
        // The template instance itself stays unbound.
        assert!(template_url.host().is_none());
    }

    #[test]
    fn test_should_keep_static_components_across_binding() {
        let mut url = RequestUrl::default();
        url.set_scheme("http").set_host("static.example.com");
        url.set_path_template(UrlTemplate::parse("/items/{id}"));

        let call = ResolvedCall::new()
            .with_arg("host", "other.example.com")
            .with_arg("id", "7")
            .into_call();
        url.bind_call(&call);

        assert_eq!(url.generated_url(), "http://static.example.com/items/7");
    }

    #[test]
    fn test_should_rebind_to_a_later_call() {
        let mut url = RequestUrl::default();
        url.set_scheme("http").set_host("example.com");
        url.set_path_template(UrlTemplate::parse("/jobs/{id}"));

        url.bind_call(&ResolvedCall::new().with_arg("id", "1").into_call());
        assert_eq!(url.generated_url(), "http://example.com/jobs/1");

        url.bind_call(&ResolvedCall::new().with_arg("id", "2").into_call());
        assert_eq!(url.generated_url(), "http://example.com/jobs/2");
    }

    #[test]
    fn test_should_render_missing_placeholder_as_absent_component() {
        let mut url = RequestUrl::default();
        url.set_scheme("http").set_host("example.com");
        url.set_path_template(UrlTemplate::parse("/users/{id}"));
        url.bind_call(&ResolvedCall::new().into_call());

        // The path placeholder cannot resolve, so the path is simply absent.
        assert_eq!(url.generated_url(), "http://example.com");
    }
}
