//! OpenAPI configuration.

use crate::api::greeting::greeting_api;
use utoipa::OpenApi;

/// OpenApi configuration.
#[derive(OpenApi)]
#[openapi(
    paths(
        greeting_api::default_message,
        greeting_api::message,
        greeting_api::update_greeting,
    ),
    components(
        schemas(
            greeting_api::Message,
            greeting_api::Greeting,
            crate::infra::error::ErrorBody
        )
    ),
    tags(
        (name = "greeting", description = "Greets people with a configurable greeting")
    )
)]
#[derive(Clone, Copy, Debug)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn documents_every_greeting_route() {
        let api = ApiDoc::openapi();
        let paths: Vec<&str> = api.paths.paths.keys().map(String::as_str).collect();
        assert!(paths.contains(&"/greet"));
        assert!(paths.contains(&"/greet/{name}"));
        assert!(paths.contains(&"/greet/greeting/{greeting}"));
    }

    #[test]
    fn greeting_operations_are_tagged() {
        let api = serde_json::to_value(ApiDoc::openapi()).unwrap();
        for (path, method) in [
            ("/greet", "get"),
            ("/greet/{name}", "get"),
            ("/greet/greeting/{greeting}", "put"),
        ] {
            assert_eq!("greeting", api["paths"][path][method]["tags"][0], "{method} {path}");
        }
    }

    #[test]
    fn default_message_mentions_trailing_slash() {
        let api = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let description = api["paths"]["/greet"]["get"]["description"]
            .as_str()
            .unwrap_or_default();
        assert!(description.contains("/greet/"));
    }
}
