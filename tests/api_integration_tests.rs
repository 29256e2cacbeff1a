// API Integration Tests
//
// Exercises every endpoint against an in-memory catalog.
// Run with: cargo test --features api --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use aquarium_advisor::{create_router, AppState, AquariumAdvisor, Catalog, SpeciesRecord};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt; // for oneshot

    fn species(name: &str, tank: f64, temp: (f64, f64), ph: (f64, f64), size: f64) -> SpeciesRecord {
        SpeciesRecord {
            name: name.to_string(),
            tank_size_liter: Some(tank),
            temperature_min: Some(temp.0),
            temperature_max: Some(temp.1),
            ph_min: Some(ph.0),
            ph_max: Some(ph.1),
            max_size_cm: Some(size),
            care_difficulty: Some(4),
            ..Default::default()
        }
    }

    fn create_test_app() -> Router {
        let catalog = Catalog::from_records(vec![
            species("Neon Tetra", 40.0, (20.0, 26.0), (6.0, 7.5), 4.0),
            species("Guppy", 20.0, (22.0, 28.0), (7.0, 8.5), 6.0),
            species("Oscar", 300.0, (22.0, 28.0), (6.0, 8.0), 35.0),
        ]);
        create_router(AppState::from_advisor(AquariumAdvisor::new(catalog)))
    }

    fn create_empty_app() -> Router {
        create_router(AppState::from_advisor(AquariumAdvisor::new(Catalog::default())))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    // =========================================================================
    // Liveness
    // =========================================================================

    #[tokio::test]
    async fn test_index_banner() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Fish Info API is running!");
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_response(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["species"], 3);
        assert_eq!(json["stocking_candidates"], 3);
    }

    // =========================================================================
    // Species Lookup
    // =========================================================================

    #[tokio::test]
    async fn test_fish_lookup() {
        let response = create_test_app()
            .oneshot(post_json("/fish", json!({ "name": "Neon Tetra" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_response(response).await;
        assert_eq!(json["Fish Name"], "Neon Tetra");
        assert_eq!(json["Match Score"], 100);
        assert_eq!(json["Minimum Tank Size"], "40.0 L");
        assert_eq!(json["Temperature"], "20.0 - 26.0°C");
        assert_eq!(json["Difficulty"], "Beginner");
        assert_eq!(json["Availability"], "Unknown");
    }

    #[tokio::test]
    async fn test_fish_lookup_not_found() {
        let response = create_test_app()
            .oneshot(post_json("/fish", json!({ "name": "qqqq zzzz" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = json_response(response).await;
        assert!(json["error"].as_str().unwrap().contains("qqqq zzzz"));
        assert_eq!(json["kind"], "not_found");
    }

    #[tokio::test]
    async fn test_fish_lookup_missing_name() {
        let response = create_test_app()
            .oneshot(post_json("/fish", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_response(response).await;
        assert_eq!(json["kind"], "invalid_input");
    }

    // =========================================================================
    // Environment Aggregation
    // =========================================================================

    #[tokio::test]
    async fn test_fish_recommend() {
        let response = create_test_app()
            .oneshot(post_json(
                "/fish-recommend",
                json!({ "fish_list": ["neon tetra", "gupy", "qqqq zzzz"] }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_response(response).await;
        assert_eq!(json["Recommended Tank Size"], "30.0 L");
        assert_eq!(json["Recommended Temperature"], "21.0 - 27.0°C");
        assert_eq!(json["Recommended pH Range"], "6.5 - 8.0");
        assert_eq!(json["Included Fish"], json!(["Neon Tetra", "Guppy"]));
    }

    #[tokio::test]
    async fn test_fish_recommend_empty_list_is_bad_request() {
        let response = create_test_app()
            .oneshot(post_json("/fish-recommend", json!({ "fish_list": [] })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_response(response).await;
        assert_eq!(json["kind"], "invalid_input");
        assert!(json["error"].as_str().unwrap().contains("fish_list"));
    }

    #[tokio::test]
    async fn test_fish_recommend_unresolvable_list() {
        let response = create_test_app()
            .oneshot(post_json("/fish-recommend", json!({ "fish_list": ["qqqq zzzz"] })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = json_response(response).await;
        assert_eq!(json["kind"], "empty");
    }

    #[tokio::test]
    async fn test_fish_compare_empty_list_is_bad_request() {
        let response = create_test_app()
            .oneshot(post_json(
                "/fish-compare",
                json!({
                    "fish_list": [],
                    "temperature": 24.0,
                    "ph": 7.0,
                    "turbidity": 10,
                    "quality": 90
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // =========================================================================
    // Condition Advice
    // =========================================================================

    #[tokio::test]
    async fn test_fish_compare_ideal() {
        let response = create_test_app()
            .oneshot(post_json(
                "/fish-compare",
                json!({
                    "fish_list": ["Neon Tetra", "Guppy"],
                    "temperature": 24.0,
                    "ph": 7.0,
                    "turbidity": 10,
                    "quality": 90
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_response(response).await;
        assert_eq!(json["message"], "The aquarium environment is currently ideal!");
    }

    #[tokio::test]
    async fn test_fish_compare_recommendations() {
        let response = create_test_app()
            .oneshot(post_json(
                "/fish-compare",
                json!({
                    "fish_list": ["Neon Tetra", "Guppy"],
                    "temperature": "16",
                    "ph": 7.0,
                    "turbidity": 80,
                    "quality": 90
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_response(response).await;
        let recommendations = json["recommendations"].as_array().unwrap();
        assert_eq!(recommendations.len(), 2);
        assert_eq!(
            recommendations[0],
            "The water temperature is too low (16.0°C). It should be increased to around 21.0-27.0°C."
        );
        assert!(recommendations[1].as_str().unwrap().contains("cloudy"));
    }

    #[tokio::test]
    async fn test_fish_compare_bad_number() {
        let response = create_test_app()
            .oneshot(post_json(
                "/fish-compare",
                json!({
                    "fish_list": ["Guppy"],
                    "temperature": "warm",
                    "ph": 7.0,
                    "turbidity": 10,
                    "quality": 90
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // =========================================================================
    // Stocking
    // =========================================================================

    #[tokio::test]
    async fn test_fish_stocking() {
        let response = create_test_app()
            .oneshot(post_json(
                "/fish-stocking",
                json!({ "length": 60, "width": 30, "height": 40, "temperature": 24 }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_response(response).await;
        assert_eq!(json["tank_volume_liter"], 72.0);

        let suggestions = json["suggestions"].as_array().unwrap();
        assert_eq!(suggestions.len(), 3);
        for suggestion in suggestions {
            let expected = if suggestion["name"] == "Oscar" { 0 } else { 4 };
            assert_eq!(suggestion["quantity"], expected);
        }
    }

    #[tokio::test]
    async fn test_fish_stocking_invalid_dimensions() {
        let response = create_test_app()
            .oneshot(post_json(
                "/fish-stocking",
                json!({ "length": -60, "width": 30, "height": 40, "temperature": 24 }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_fish_stocking_without_data() {
        let response = create_empty_app()
            .oneshot(post_json(
                "/fish-stocking",
                json!({ "length": 60, "width": 30, "height": 40, "temperature": 24 }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = json_response(response).await;
        assert_eq!(json["kind"], "data_unavailable");
    }
}
