use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        calendars::{
            create_calendar, delete_calendar, get_calendar, list_calendars, patch_calendar,
            update_calendar, LIMIT_HEADER, OFFSET_HEADER,
        },
        health::livez,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-remote-user"),
            HeaderName::from_static(LIMIT_HEADER),
            HeaderName::from_static(OFFSET_HEADER),
        ]);

    let calendar_routes = Router::new()
        .route("/calendars", get(list_calendars).post(create_calendar))
        .route(
            "/calendars/{calendar_id}",
            get(get_calendar)
                .put(update_calendar)
                .patch(patch_calendar)
                .delete(delete_calendar),
        )
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .merge(calendar_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use calbridge_core::calendar::CalendarRecord;

    use crate::{
        business::BackendRegistry, config::Config, directory::StaticUserDirectory,
        storage::inmemory::InMemoryBackend,
    };

    async fn seeded_state(config: Config) -> AppState {
        let local = InMemoryBackend::new("local");
        for (uri, name) in [("home", "Home"), ("work", "Work"), ("gym", "Gym")] {
            local
                .insert_calendar(
                    "alice",
                    CalendarRecord::new("local", uri)
                        .with_user_id("alice")
                        .with_owner_id("alice")
                        .with_display_name(name)
                        .fill_defaults(),
                )
                .await
                .unwrap();
        }

        let registry = BackendRegistry::new().register("local", Arc::new(local));
        let users = StaticUserDirectory::new().with_user("alice", "Alice Liddell");

        AppState::new(config, registry, users)
    }

    fn request(method: &str, uri: &str, body: Body) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("x-remote-user", "alice")
            .header("content-type", "application/json")
            .body(body)
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_livez() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(Request::builder().uri("/livez").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_calendars_empty() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(request("GET", "/calendars", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_list_calendars_with_paging_headers() {
        let app = create_app(seeded_state(Config::default()).await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/calendars")
                    .header("x-remote-user", "alice")
                    .header("X-OC-CAL-LIMIT", "1")
                    .header("X-OC-CAL-OFFSET", "1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let calendars = json.as_array().unwrap();
        assert_eq!(calendars.len(), 1);
        // Sorted by uri within equal order: gym, home, work
        assert_eq!(calendars[0]["calendarURI"], "local-home");
    }

    #[tokio::test]
    async fn test_get_calendar() {
        let app = create_app(seeded_state(Config::default()).await);

        let response = app
            .oneshot(request("GET", "/calendars/local-work", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["calendarURI"], "local-work");
        assert_eq!(json["url"], "http://localhost:3000/calendars/local-work");
        assert_eq!(json["displayname"], "Work");
        assert_eq!(
            json["user"],
            json!({"userid": "alice", "displayname": "Alice Liddell"})
        );
        assert_eq!(json["cruds"]["code"], 31);
    }

    #[tokio::test]
    async fn test_get_missing_calendar_hides_message() {
        let app = create_app(seeded_state(Config::default()).await);

        let response = app
            .oneshot(request("GET", "/calendars/local-nope", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({}));
    }

    #[tokio::test]
    async fn test_get_missing_calendar_with_debug() {
        let app = create_app(seeded_state(Config::default().with_debug(true)).await);

        let response = app
            .oneshot(request("GET", "/calendars/local-nope", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert!(json["message"].as_str().unwrap().contains("local-nope"));
    }

    #[tokio::test]
    async fn test_get_missing_calendar_as_404() {
        let config = Config {
            not_found_as_404: true,
            ..Config::default()
        };
        let app = create_app(seeded_state(config).await);

        let response = app
            .oneshot(request("GET", "/calendars/local-nope", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_calendar_forces_user_and_owner() {
        let app = create_app(seeded_state(Config::default()).await);
        let body = json!({
            "calendarURI": "local-travel",
            "displayname": "Travel",
            "color": "#ff0000",
            "user": {"userid": "mallory"},
            "owner": {"userid": "mallory"},
            "cruds": {"code": 1}
        });

        let response = app
            .clone()
            .oneshot(request("POST", "/calendars", Body::from(body.to_string())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["calendarURI"], "local-travel");
        assert_eq!(json["user"]["userid"], "alice");
        assert_eq!(json["owner"]["userid"], "alice");
        assert_eq!(json["color"], "#ff0000");
        assert_eq!(json["ctag"], 1);
        assert_eq!(json["cruds"]["code"], 1);
        assert_eq!(json["cruds"]["read"], true);
        assert_eq!(json["cruds"]["update"], false);

        let response = app
            .oneshot(request("GET", "/calendars/local-travel", Body::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_calendar_invalid_json() {
        let app = create_app(seeded_state(Config::default().with_debug(true)).await);

        let response = app
            .oneshot(request("POST", "/calendars", Body::from("{not json")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert!(json["message"]
            .as_str()
            .unwrap()
            .contains("Could not parse given json string"));
    }

    #[tokio::test]
    async fn test_create_calendar_unknown_backend() {
        let app = create_app(seeded_state(Config::default()).await);
        let body = json!({"calendarURI": "google-home"});

        let response = app
            .oneshot(request("POST", "/calendars", Body::from(body.to_string())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({}));
    }

    #[tokio::test]
    async fn test_update_calendar_bumps_ctag_and_ignores_body_user() {
        let app = create_app(seeded_state(Config::default()).await);
        let body = json!({
            "displayname": "Office",
            "enabled": false,
            "user": {"userid": "mallory"},
            "owner": {"userid": "mallory"}
        });

        let response = app
            .oneshot(request(
                "PUT",
                "/calendars/local-work",
                Body::from(body.to_string()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["displayname"], "Office");
        assert_eq!(json["enabled"], false);
        assert_eq!(json["ctag"], 2);
        assert_eq!(json["color"], "#1d2d44");
        assert_eq!(json["user"]["userid"], "alice");
        assert_eq!(json["owner"]["userid"], "alice");
    }

    #[tokio::test]
    async fn test_update_calendar_rejects_uri_change() {
        let app = create_app(seeded_state(Config::default()).await);
        let body = json!({"calendarURI": "local-home"});

        let response = app
            .oneshot(request(
                "PUT",
                "/calendars/local-work",
                Body::from(body.to_string()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_patch_is_not_implemented() {
        let app = create_app(seeded_state(Config::default()).await);

        let response = app
            .oneshot(request(
                "PATCH",
                "/calendars/local-work",
                Body::from(r#"{"displayname":"x"}"#),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_calendar() {
        let app = create_app(seeded_state(Config::default()).await);

        let response = app
            .clone()
            .oneshot(request("DELETE", "/calendars/local-work", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(body_bytes(response).await.is_empty());

        let response = app
            .oneshot(request("DELETE", "/calendars/local-work", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_default_user_without_header() {
        let state = seeded_state(Config {
            default_user: "alice".to_string(),
            ..Config::default()
        })
        .await;
        let app = create_app(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/calendars")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 3);
    }
}
