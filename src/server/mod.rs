mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use crate::api::API;
use crate::error::{server_error, Error};
use crate::server::handlers::{geocode, routes, statistics, tour_logs, tours, transfer};

pub use crate::api::DynAPI;

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/routes/resolve", post(routes::resolve))
        .route("/geocode/suggestions", get(geocode::suggestions))
        .route("/tours", post(tours::create).get(tours::list))
        .route(
            "/tours/:id",
            get(tours::find).put(tours::update).delete(tours::delete),
        )
        .route("/tours/:id/route", get(tours::route))
        .route("/tours/:id/logs", get(tours::logs))
        .route("/tour_logs", post(tour_logs::create).get(tour_logs::list))
        .route(
            "/tour_logs/:id",
            get(tour_logs::find)
                .put(tour_logs::update)
                .delete(tour_logs::delete),
        )
        .route("/statistics", get(statistics::find))
        .route("/export/tours", get(transfer::export_tours))
        .route("/import/tours", post(transfer::import_tours))
        .route("/export/tour_logs", get(transfer::export_tour_logs))
        .route("/import/tour_logs", post(transfer::import_tour_logs))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let app = router(Arc::new(api) as DynAPI);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(server_error)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::engine::testing::engine;

    fn app() -> Router {
        router(Arc::new(engine()) as DynAPI)
    }

    fn post_json(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn resolve_with_unknown_location_is_bad_request() {
        let response = app()
            .oneshot(post_json(
                "/routes/resolve",
                r#"{"from_location":"Vienna","to_location":"Atlantis","transport_type":"car"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], 103);
    }

    #[tokio::test]
    async fn resolve_known_locations() {
        let response = app()
            .oneshot(post_json(
                "/routes/resolve",
                r#"{"from_location":"Vienna","to_location":"Linz","transport_type":"car"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let route = body_json(response).await;
        assert_eq!(route["to_location"], "Linz");
        assert_eq!(route["is_fallback"], false);
    }

    #[tokio::test]
    async fn missing_tour_is_not_found() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri(format!("/tours/{}", uuid::Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], 102);
    }

    #[tokio::test]
    async fn created_tour_is_exported_as_csv() {
        let app = app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/tours",
                r#"{"name":"west","from_location":"Vienna","to_location":"Linz","transport_type":"car"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/export/tours?format=csv")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let csv = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(csv.lines().nth(1).unwrap().contains("west"));
    }
}
