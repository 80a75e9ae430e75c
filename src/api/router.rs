use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::state::AppState;
use super::v1;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Authentication endpoints (login requires no token)
        .nest("/auth", auth::create_auth_router())
        // Catalogue API
        .nest("/v1", v1::create_v1_router())
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_in_memory_state;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    async fn register_and_login(app: &Router, username: &str) -> String {
        let (status, _) = send(
            app,
            Method::POST,
            "/v1/users",
            None,
            Some(json!({"username": username, "password": "password123"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            app,
            Method::POST,
            "/auth/login",
            None,
            Some(json!({"username": username, "password": "password123"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        body["api_token"].as_str().unwrap().to_string()
    }

    fn app() -> Router {
        create_router(create_in_memory_state())
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = app();

        let (status, body) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, _) = send(&app, Method::GET, "/live", None, None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, "/ready", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_catalogue_requires_authentication() {
        let app = app();

        let (status, _) = send(&app, Method::GET, "/v1/actors", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, Method::GET, "/v1/actors", Some("bogus"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_with_bad_credentials() {
        let app = app();
        register_and_login(&app, "fred1E").await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/auth/login",
            None,
            Some(json!({"username": "fred1E", "password": "wrong_password"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_validation() {
        let app = app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/v1/users",
            None,
            Some(json!({"username": "fre", "password": "password123"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "User username invalid");

        let (status, body) = send(
            &app,
            Method::POST,
            "/v1/users",
            None,
            Some(json!({"username": "potatoooo", "password": "passwor"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "User password invalid");
    }

    #[tokio::test]
    async fn test_actor_crud() {
        let app = app();
        let token = register_and_login(&app, "fred1E").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/v1/actors",
            Some(&token),
            Some(json!({"name": "Sam", "birth": "2000-01-01"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "Sam");

        // Second creation with the same name hits the uniqueness constraint.
        let (status, _) = send(
            &app,
            Method::POST,
            "/v1/actors",
            Some(&token),
            Some(json!({"name": "Sam", "birth": "2001-01-01"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(
            &app,
            Method::PUT,
            "/v1/actors/Sam",
            Some(&token),
            Some(json!({"bio": "An actor"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bio"], "An actor");

        let (status, body) = send(&app, Method::GET, "/v1/actors/Sam", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["birth"], "2000-01-01T00:00:00+00:00");

        let (status, _) = send(&app, Method::DELETE, "/v1/actors/Sam", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, "/v1/actors/Sam", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Actor does not exist");
    }

    #[tokio::test]
    async fn test_actor_future_birth_rejected() {
        let app = app();
        let token = register_and_login(&app, "fred1E").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/v1/actors",
            Some(&token),
            Some(json!({"name": "Sam", "birth": "2999-01-01"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Birth must be in the past");
    }

    #[tokio::test]
    async fn test_movie_rating_snapshot_overwrites() {
        let app = app();
        let token = register_and_login(&app, "fred1E").await;

        send(
            &app,
            Method::POST,
            "/v1/movies",
            Some(&token),
            Some(json!({"name": "Heat"})),
        )
        .await;

        let (_, body) = send(&app, Method::GET, "/v1/movies/Heat", Some(&token), None).await;
        assert_eq!(body["rating"], 0.0);

        let (_, body) = send(
            &app,
            Method::PUT,
            "/v1/movies/Heat",
            Some(&token),
            Some(json!({"rating": 5})),
        )
        .await;
        assert_eq!(body["rating"], 5.0);

        let (_, body) = send(
            &app,
            Method::PUT,
            "/v1/movies/Heat",
            Some(&token),
            Some(json!({"rating": 3})),
        )
        .await;
        assert_eq!(body["rating"], 3.0);
    }

    #[tokio::test]
    async fn test_movie_average_over_users() {
        let app = app();
        let first = register_and_login(&app, "fred1E").await;
        let second = register_and_login(&app, "mary2B").await;

        send(
            &app,
            Method::POST,
            "/v1/movies",
            Some(&first),
            Some(json!({"name": "Heat"})),
        )
        .await;

        send(
            &app,
            Method::PUT,
            "/v1/movies/Heat",
            Some(&first),
            Some(json!({"rating": 0})),
        )
        .await;

        let (_, body) = send(
            &app,
            Method::PUT,
            "/v1/movies/Heat",
            Some(&second),
            Some(json!({"rating": 5})),
        )
        .await;
        assert_eq!(body["rating"], 2.5);
    }

    #[tokio::test]
    async fn test_movie_roster_flow() {
        let app = app();
        let token = register_and_login(&app, "fred1E").await;

        send(
            &app,
            Method::POST,
            "/v1/actors",
            Some(&token),
            Some(json!({"name": "Sam", "birth": "2000-01-01"})),
        )
        .await;
        send(
            &app,
            Method::POST,
            "/v1/movies",
            Some(&token),
            Some(json!({"name": "Heat"})),
        )
        .await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/v1/movies/Heat/actors",
            Some(&token),
            Some(json!({"character": "Hero", "actor": "Sam"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["actors"]["Hero"], "Sam");

        // Same actor and character again is rejected.
        let (status, body) = send(
            &app,
            Method::POST,
            "/v1/movies/Heat/actors",
            Some(&token),
            Some(json!({"character": "Hero", "actor": "Sam"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Actor already within movie");

        // Same actor under another character is allowed.
        let (status, body) = send(
            &app,
            Method::POST,
            "/v1/movies/Heat/actors",
            Some(&token),
            Some(json!({"character": "Villain", "actor": "Sam"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["actors"]["Villain"], "Sam");

        // Removing the actor clears every role.
        let (status, body) = send(
            &app,
            Method::DELETE,
            "/v1/movies/Heat/actors/Sam",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["actors"].as_object().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_genre_flow() {
        let app = app();
        let token = register_and_login(&app, "fred1E").await;

        send(
            &app,
            Method::POST,
            "/v1/actors",
            Some(&token),
            Some(json!({"name": "Sam", "birth": "2000-01-01"})),
        )
        .await;
        send(
            &app,
            Method::POST,
            "/v1/movies",
            Some(&token),
            Some(json!({"name": "Heat"})),
        )
        .await;
        send(
            &app,
            Method::POST,
            "/v1/movies/Heat/actors",
            Some(&token),
            Some(json!({"character": "Hero", "actor": "Sam"})),
        )
        .await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/v1/genres",
            Some(&token),
            Some(json!({"name": "Thriller"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            &app,
            Method::POST,
            "/v1/genres/Thriller/movies",
            Some(&token),
            Some(json!({"movie": "Heat"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["movies"][0], "Heat");

        // Roster actors surface through the genre.
        let (_, body) = send(&app, Method::GET, "/v1/genres/Thriller", Some(&token), None).await;
        assert_eq!(body["actors"][0], "Sam");

        // Movie genre assignment through the movie side.
        let (_, body) = send(
            &app,
            Method::PUT,
            "/v1/movies/Heat",
            Some(&token),
            Some(json!({"genre": "Thriller"})),
        )
        .await;
        assert_eq!(body["genre"], "Thriller");

        let (status, body) = send(
            &app,
            Method::POST,
            "/v1/genres/Thriller/movies",
            Some(&token),
            Some(json!({"movie": "Heat"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Movie already within genre");
    }

    #[tokio::test]
    async fn test_favourites_flow() {
        let app = app();
        let token = register_and_login(&app, "fred1E").await;

        send(
            &app,
            Method::POST,
            "/v1/movies",
            Some(&token),
            Some(json!({"name": "Heat"})),
        )
        .await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/v1/users/me/favourites",
            Some(&token),
            Some(json!({"movie": "Heat"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["favourites"][0], "Heat");

        let (status, body) = send(
            &app,
            Method::PUT,
            "/v1/users/me/favourites",
            Some(&token),
            Some(json!({"movie": "Heat"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Movie already favourited");

        let (status, body) = send(
            &app,
            Method::DELETE,
            "/v1/users/me/favourites/Heat",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["favourites"].as_array().unwrap().is_empty());

        let (status, body) = send(
            &app,
            Method::PUT,
            "/v1/users/me/favourites",
            Some(&token),
            Some(json!({"movie": "Alien"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Movie does not exist");
    }

    #[tokio::test]
    async fn test_logout_invalidates_token() {
        let app = app();
        let token = register_and_login(&app, "fred1E").await;

        let (status, _) = send(&app, Method::GET, "/v1/users/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, Method::POST, "/auth/logout", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, Method::GET, "/v1/users/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
