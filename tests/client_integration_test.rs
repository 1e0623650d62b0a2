use flyff_api::{
    BatchSettings, ClientSettings, FlyffClient, FlyffError, HttpTransport, IdSpec, Resource,
};
use httpmock::prelude::*;
use serde_json::json;

fn client_for(server: &MockServer) -> FlyffClient {
    FlyffClient::with_transport(HttpTransport::new(server.base_url()), BatchSettings::default())
}

fn boots_and_breaker() -> serde_json::Value {
    json!([
        {"id": 3, "name": {"en": "Layered Boots"}},
        {"id": 640, "name": {"en": "Buff breaker"}}
    ])
}

#[tokio::test]
async fn test_items_by_list_keep_request_order() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/item/3,640");
            then.status(200).json_body(boots_and_breaker());
        })
        .await;

    let client = client_for(&server);
    let items = client.get_items_by_ids(vec![3, 640]).await.unwrap();

    mock.assert_async().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"]["en"], "Layered Boots");
    assert_eq!(items[1]["name"]["en"], "Buff breaker");
}

#[tokio::test]
async fn test_items_by_comma_and_space_strings_hit_the_same_path() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/item/3,640");
            then.status(200).json_body(boots_and_breaker());
        })
        .await;

    let client = client_for(&server);
    let by_commas = client.get_items_by_ids("3,640").await.unwrap();
    let by_spaces = client.get_items_by_ids("3 640").await.unwrap();

    assert_eq!(mock.hits_async().await, 2);
    assert_eq!(by_commas, by_spaces);
    assert_eq!(by_spaces[1]["id"], 640);
}

#[tokio::test]
async fn test_single_item_by_int_and_string() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/item/3");
            then.status(200)
                .json_body(json!({"id": 3, "name": {"en": "Layered Boots"}}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/item/640");
            then.status(200)
                .json_body(json!({"id": 640, "name": {"en": "Buff breaker"}}));
        })
        .await;

    let client = client_for(&server);
    let boots = client.get_item_by_id(3).await.unwrap();
    let breaker = client.get_item_by_id("640").await.unwrap();

    assert_eq!(boots["name"]["en"], "Layered Boots");
    assert_eq!(breaker["name"]["en"], "Buff breaker");
}

#[tokio::test]
async fn test_unknown_item_returns_not_found_payload() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/item/-1");
            then.status(404)
                .json_body(json!({"statusCode": 404, "message": "Not Found"}));
        })
        .await;

    let client = client_for(&server);
    let result = client.get_item_by_id(-1).await.unwrap();
    assert_eq!(result["statusCode"], 404);
}

#[tokio::test]
async fn test_not_found_raises_when_pass_through_is_disabled() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/item/-1");
            then.status(404)
                .json_body(json!({"statusCode": 404, "message": "Not Found"}));
        })
        .await;

    let settings = ClientSettings {
        base_url: server.base_url(),
        pass_through_not_found: false,
        ..Default::default()
    };
    let client = FlyffClient::from_config(&settings).unwrap();

    let err = client.get_item_by_id(-1).await.unwrap_err();
    assert!(err.is_not_found());
    match err {
        FlyffError::RemoteApi { message, .. } => assert!(message.unwrap().contains("Not Found")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_becomes_domain_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/monster/20");
            then.status(500)
                .json_body(json!({"error": {"message": "x", "reason": "y"}}));
        })
        .await;

    let client = client_for(&server);
    let err = client.get_monster_by_id(20).await.unwrap_err();

    match err {
        FlyffError::RemoteApi {
            http_status,
            code,
            message,
            reason,
        } => {
            assert_eq!(http_status, 500);
            assert_eq!(code, -1);
            let message = message.unwrap();
            assert!(message.contains('x'));
            assert!(message.contains("/monster/20"));
            assert_eq!(reason.as_deref(), Some("y"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_plain_text_error_body_becomes_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/quest/1");
            then.status(503).body("Service Unavailable");
        })
        .await;

    let client = client_for(&server);
    let err = client.get_one(Resource::Quest, 1).await.unwrap_err();

    match err {
        FlyffError::RemoteApi {
            http_status,
            message,
            reason,
            ..
        } => {
            assert_eq!(http_status, 503);
            assert!(message.unwrap().ends_with("Service Unavailable"));
            assert!(reason.is_none());
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_threshold_boundary_over_http() {
    let server = MockServer::start_async().await;

    // 174 ones and a "10" make 350 characters: one request
    let mut exact: Vec<&str> = vec!["1"; 174];
    exact.push("10");
    let exact_path = format!("/item/{}", exact.join(","));
    let single = server
        .mock_async(|when, then| {
            when.method(GET).path(exact_path.as_str());
            then.status(200).json_body(json!([]));
        })
        .await;

    // 176 twos make 351 characters: a chunk of 100 and a chunk of 76
    let first_path = format!("/item/{}", vec!["2"; 100].join(","));
    let second_path = format!("/item/{}", vec!["2"; 76].join(","));
    let first = server
        .mock_async(|when, then| {
            when.method(GET).path(first_path.as_str());
            then.status(200).json_body(json!([{"chunk": 1}, {"chunk": 1}]));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET).path(second_path.as_str());
            then.status(200).json_body(json!([{"chunk": 2}]));
        })
        .await;

    let client = client_for(&server);

    let result = client.get_items_by_ids(exact.join(",")).await.unwrap();
    assert!(result.is_empty());
    single.assert_hits_async(1).await;

    let result = client.get_items_by_ids(vec![2; 176]).await.unwrap();
    first.assert_hits_async(1).await;
    second.assert_hits_async(1).await;
    assert_eq!(
        result,
        vec![json!({"chunk": 1}), json!({"chunk": 1}), json!({"chunk": 2})]
    );
}

#[tokio::test]
async fn test_failing_chunk_stops_the_batch() {
    let server = MockServer::start_async().await;
    let ids: Vec<i64> = (100..400).collect();
    let chunk_path = |range: std::ops::Range<i64>| {
        let joined: Vec<String> = range.map(|id| id.to_string()).collect();
        format!("/skill/{}", joined.join(","))
    };
    let first_path = chunk_path(100..200);
    let second_path = chunk_path(200..300);

    let first = server
        .mock_async(|when, then| {
            when.method(GET).path(first_path.as_str());
            then.status(502)
                .json_body(json!({"error": {"message": "bad gateway", "reason": "upstream"}}));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET).path(second_path.as_str());
            then.status(200).json_body(json!([]));
        })
        .await;

    let client = client_for(&server);
    let err = client
        .get_skills_by_ids(IdSpec::from(ids))
        .await
        .unwrap_err();

    assert!(matches!(err, FlyffError::RemoteApi { http_status: 502, .. }));
    first.assert_hits_async(1).await;
    assert_eq!(second.hits_async().await, 0);
}

#[tokio::test]
async fn test_get_all_single_items_posts_the_full_id_list() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/item");
            then.status(200).json_body(json!([3, 640]));
        })
        .await;
    let bulk = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/item/3,640")
                .header("content-type", "application/json");
            then.status(200).json_body(boots_and_breaker());
        })
        .await;

    let client = client_for(&server);
    let items = client.get_all_single_items().await.unwrap();

    list.assert_async().await;
    bulk.assert_async().await;
    assert_eq!(items[1]["name"]["en"], "Buff breaker");
}

#[tokio::test]
async fn test_get_all_single_items_skips_the_post_for_an_empty_list() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/item");
            then.status(200).json_body(json!([]));
        })
        .await;
    let bulk = server
        .mock_async(|when, then| {
            when.method(POST).path_contains("/item");
            then.status(200).json_body(json!([]));
        })
        .await;

    let client = client_for(&server);
    let items = client.get_all_single_items().await.unwrap();

    list.assert_async().await;
    assert_eq!(bulk.hits_async().await, 0);
    assert_eq!(items, json!([]));
}

#[tokio::test]
async fn test_version_is_requested_lazily_and_once() {
    let server = MockServer::start_async().await;
    let version = server
        .mock_async(|when, then| {
            when.method(GET).path("/version/data");
            then.status(200).json_body(json!(12));
        })
        .await;

    let client = client_for(&server);
    assert_eq!(version.hits_async().await, 0);

    assert_eq!(client.version().await.unwrap(), &json!(12));
    assert_eq!(client.version().await.unwrap(), &json!(12));
    version.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_malformed_success_body_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/class");
            then.status(200).body("not json");
        })
        .await;

    let client = client_for(&server);
    let err = client.get_all_classes().await.unwrap_err();
    assert!(matches!(err, FlyffError::MalformedResponse { .. }));
}
