//! Implementation of the greeting API.
//!
//! Greets the world or someone by name, and lets anyone change the greeting.
//! The greeting is shared, so a change is seen by every later request.

use crate::{
    core::greeting::greeting_service::GreetingService,
    infra::{
        extract::{Json, Path},
        metrics,
        state::AppState,
    },
};
use axum::{
    extract::State,
    routing::{get, put},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

/// The greeting API endpoints.
///
/// Empty path segments never match, so `PUT /greet/greeting/` is a 404.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/greet", get(default_message))
        .route("/greet/", get(default_message))
        .route("/greet/:name", get(message))
        .route("/greet/greeting/:greeting", put(update_greeting))
}

/// A greeting message.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Message {
    /// The greeting followed by a name, e.g. `Ciao World!`.
    message: String,
}

impl Message {
    /// Constructs a new message.
    pub fn new(message: String) -> Self {
        Self { message }
    }

    /// Returns the message.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }
}

/// The greeting after an update.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Greeting {
    /// The new greeting.
    greeting: String,
}

impl Greeting {
    /// Constructs a new greeting.
    pub fn new(greeting: String) -> Self {
        Self { greeting }
    }

    /// Returns the greeting.
    pub fn greeting(&self) -> &str {
        self.greeting.as_ref()
    }
}

/// Greets the world.
///
/// Also served at `/greet/`.
#[utoipa::path(
    get,
    path = "/greet",
    tag = "greeting",
    responses(
        (status = 200, description = "Success", body = Message),
    )
)]
#[instrument]
pub async fn default_message(State(service): State<GreetingService>) -> Json<Message> {
    metrics::record_greeting_operation("default_message");
    Json(Message {
        message: service.default_message(),
    })
}

/// Greets someone by name.
#[utoipa::path(
    get,
    path = "/greet/{name}",
    tag = "greeting",
    params(
        ("name" = String, Path, description = "Who to greet"),
    ),
    responses(
        (status = 200, description = "Success", body = Message),
        (status = 400, description = "The name is not valid UTF-8", body = crate::infra::error::ErrorBody),
    )
)]
#[instrument]
pub async fn message(
    State(service): State<GreetingService>,
    Path(name): Path<String>,
) -> Json<Message> {
    metrics::record_greeting_operation("message");
    Json(Message {
        message: service.message(&name),
    })
}

/// Sets the greeting used in future messages.
#[utoipa::path(
    put,
    path = "/greet/greeting/{greeting}",
    tag = "greeting",
    params(
        ("greeting" = String, Path, description = "The new greeting"),
    ),
    responses(
        (status = 200, description = "Success", body = Greeting),
        (status = 400, description = "The greeting is not valid UTF-8", body = crate::infra::error::ErrorBody),
    )
)]
#[instrument]
pub async fn update_greeting(
    State(service): State<GreetingService>,
    Path(greeting): Path<String>,
) -> Json<Greeting> {
    metrics::record_greeting_operation("update");
    let greeting = service.update_greeting(greeting);
    Json(Greeting {
        greeting: greeting.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> State<GreetingService> {
        State(GreetingService::default())
    }

    #[tokio::test]
    async fn default_message_greets_the_world() {
        let response = default_message(service()).await;
        assert_eq!(Message::new("Ciao World!".to_string()), response.0);
    }

    #[tokio::test]
    async fn message_greets_by_name() {
        let response = message(service(), Path("Joe".to_string())).await;
        assert_eq!(Message::new("Ciao Joe!".to_string()), response.0);
    }

    #[tokio::test]
    async fn update_returns_new_greeting() {
        let state = service();
        let response = update_greeting(state.clone(), Path("Hola".to_string())).await;
        assert_eq!(Greeting::new("Hola".to_string()), response.0);

        let response = default_message(state.clone()).await;
        assert_eq!("Hola World!", response.0.message());
        let response = message(state, Path("Joe".to_string())).await;
        assert_eq!("Hola Joe!", response.0.message());
    }

    #[tokio::test]
    async fn empty_greeting_is_accepted() {
        let state = service();
        let response = update_greeting(state.clone(), Path(String::new())).await;
        assert_eq!("", response.0.greeting());
        let response = message(state, Path("Joe".to_string())).await;
        assert_eq!(" Joe!", response.0.message());
    }
}
