//! API integration tests
//!
//! Each test spawns its own server on a fresh in-memory store.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::*;
use reaction_core::UserId;
use reqwest::StatusCode;

const ALICE: UserId = UserId::new(1);
const BOB: UserId = UserId::new(2);
const CAROL: UserId = UserId::new(3);

async fn create_topic(server: &TestServer, token: &str) -> String {
    let name = unique_topic();
    let response = server
        .post_auth("/api/v1/topics", token, &CreateTopicRequest { name: name.clone() })
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
    name
}

async fn react(
    server: &TestServer,
    token: &str,
    topic: &str,
    seq: i32,
    content: &str,
) -> ReactionResponse {
    let response = server
        .put_auth(
            &format!("/api/v1/topics/{topic}/messages/{seq}/reactions"),
            token,
            &ReactRequest::new(content),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn list(server: &TestServer, token: &str, topic: &str, query: &str) -> ReactionList {
    let response = server
        .get_auth(&format!("/api/v1/topics/{topic}/reactions?{query}"), token)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health/ready").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["storage"], "healthy");
    assert_eq!(body["checks"]["backend"], "memory");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/topics/grpA/reactions?since=1").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_bad_token_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .get_auth("/api/v1/topics/grpA/reactions?since=1", "not-a-token")
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_TOKEN");
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_reaction_sync_scenario() {
    let server = TestServer::start().await.unwrap();
    let alice = server.token_for(ALICE).unwrap();
    let bob = server.token_for(BOB).unwrap();
    let carol = server.token_for(CAROL).unwrap();
    let topic = create_topic(&server, &alice).await;

    let first = react(&server, &alice, &topic, 5, "👍").await;
    let second = react(&server, &bob, &topic, 5, "👍").await;
    assert_eq!(first.user, ALICE.to_string());
    assert!(second.revision > first.revision);

    // Both users counted in one group
    let all = list(&server, &alice, &topic, &format!("since={}", first.revision)).await;
    let groups = all.groups(5);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].count, 2);
    assert_eq!(groups[0].revision, second.revision);
    assert_eq!(groups[0].users.len(), 2);

    // Channel view keeps the count but lists only the caller
    let channel = list(
        &server,
        &alice,
        &topic,
        &format!("since={}&view=channel", first.revision),
    )
    .await;
    assert_eq!(channel.groups(5)[0].count, 2);
    assert_eq!(channel.groups(5)[0].users, vec![ALICE.to_string()]);

    // Bob switches to a heart
    let changed = react(&server, &bob, &topic, 5, "❤️").await;
    assert!(changed.revision > second.revision);

    let since = list(&server, &alice, &topic, &format!("since={}", changed.revision)).await;
    assert_eq!(since.groups(5).len(), 1);
    assert_eq!(since.groups(5)[0].content, "❤️");

    let before = list(&server, &alice, &topic, &format!("before={}", changed.revision)).await;
    assert_eq!(before.groups(5).len(), 1);
    assert_eq!(before.groups(5)[0].content, "👍");
    assert_eq!(before.groups(5)[0].count, 1);

    // Alice withdraws; only the heart remains
    let response = server
        .delete_auth(&format!("/api/v1/topics/{topic}/messages/5/reactions"), &alice)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let remaining = list(&server, &alice, &topic, "since=0").await;
    assert_eq!(remaining.groups(5).len(), 1);
    assert_eq!(remaining.groups(5)[0].content, "❤️");

    // A newer reaction on another message wins a limit of one
    let newest = react(&server, &carol, &topic, 6, "new").await;
    let limited = list(&server, &alice, &topic, "since=0&limit=1").await;
    assert!(limited.groups(5).is_empty());
    assert_eq!(limited.groups(6).len(), 1);
    assert_eq!(limited.groups(6)[0].revision, newest.revision);
}

#[tokio::test]
async fn test_unbounded_query_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let alice = server.token_for(ALICE).unwrap();
    let topic = create_topic(&server, &alice).await;

    let response = server
        .get_auth(&format!("/api/v1/topics/{topic}/reactions"), &alice)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_QUERY");

    let response = server
        .get_auth(&format!("/api/v1/topics/{topic}/reactions?limit=10"), &alice)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_QUERY");
}

#[tokio::test]
async fn test_unknown_topic() {
    let server = TestServer::start().await.unwrap();
    let alice = server.token_for(ALICE).unwrap();

    let response = server
        .put_auth(
            "/api/v1/topics/grpMissing/messages/1/reactions",
            &alice,
            &ReactRequest::new("👍"),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_TOPIC");
}

#[tokio::test]
async fn test_invalid_reaction_input() {
    let server = TestServer::start().await.unwrap();
    let alice = server.token_for(ALICE).unwrap();
    let topic = create_topic(&server, &alice).await;

    // Empty content
    let response = server
        .put_auth(
            &format!("/api/v1/topics/{topic}/messages/1/reactions"),
            &alice,
            &ReactRequest::new(""),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Non-positive message sequence
    let response = server
        .put_auth(
            &format!("/api/v1/topics/{topic}/messages/0/reactions"),
            &alice,
            &ReactRequest::new("👍"),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_FIELD");

    // Non-numeric message sequence
    let response = server
        .put_auth(
            &format!("/api/v1/topics/{topic}/messages/abc/reactions"),
            &alice,
            &ReactRequest::new("👍"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_unreact_twice_succeeds() {
    let server = TestServer::start().await.unwrap();
    let alice = server.token_for(ALICE).unwrap();
    let topic = create_topic(&server, &alice).await;
    react(&server, &alice, &topic, 2, "👍").await;

    for _ in 0..2 {
        let response = server
            .delete_auth(&format!("/api/v1/topics/{topic}/messages/2/reactions"), &alice)
            .await
            .unwrap();
        assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    }

    let remaining = list(&server, &alice, &topic, "since=0").await;
    assert!(remaining.reactions.is_empty());
}

#[tokio::test]
async fn test_high_water() {
    let server = TestServer::start().await.unwrap();
    let alice = server.token_for(ALICE).unwrap();
    let topic = create_topic(&server, &alice).await;

    let path = format!("/api/v1/topics/{topic}/reactions/high-water");
    let empty: HighWater = assert_json(server.get_auth(&path, &alice).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(empty.topic, topic);
    assert_eq!(empty.revision, 0);

    react(&server, &alice, &topic, 1, "👍").await;
    let latest = react(&server, &alice, &topic, 2, "🎉").await;

    let high: HighWater = assert_json(server.get_auth(&path, &alice).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(high.revision, latest.revision);
}

// ============================================================================
// Topic Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_topic() {
    let server = TestServer::start().await.unwrap();
    let alice = server.token_for(ALICE).unwrap();
    let topic = create_topic(&server, &alice).await;

    let response = server
        .get_auth(&format!("/api/v1/topics/{topic}"), &alice)
        .await
        .unwrap();
    let body: TopicResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.name, topic);
    assert_eq!(body.owner, Some(ALICE.to_string()));
    assert_eq!(body.seq_id, 0);

    // Same name again conflicts
    let response = server
        .post_auth("/api/v1/topics", &alice, &CreateTopicRequest { name: topic })
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_topics_for_user_carry_high_water() {
    let server = TestServer::start().await.unwrap();
    let alice = server.token_for(ALICE).unwrap();
    let bob = server.token_for(BOB).unwrap();
    let quiet = create_topic(&server, &alice).await;
    let busy = create_topic(&server, &alice).await;

    let reaction = react(&server, &alice, &busy, 4, "👍").await;

    // Share the busy topic with Bob
    let response = server
        .put_empty_auth(
            &format!("/api/v1/topics/{busy}/subscribers/{BOB}"),
            &alice,
        )
        .await
        .unwrap();
    let shared: SubscriptionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(shared.user, BOB.to_string());
    assert_eq!(shared.max_reaction_revision, reaction.revision);

    let response = server.get_auth("/api/v1/users/@me/topics", &alice).await.unwrap();
    let topics: Vec<SubscriptionResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(topics.len(), 2);
    for sub in &topics {
        let expected = if sub.topic == busy { reaction.revision } else { 0 };
        assert_eq!(sub.max_reaction_revision, expected, "topic {}", sub.topic);
    }
    assert!(topics.iter().any(|s| s.topic == quiet));

    let response = server
        .get_auth(&format!("/api/v1/users/@me/topics?topic={busy}"), &bob)
        .await
        .unwrap();
    let topics: Vec<SubscriptionResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].max_reaction_revision, reaction.revision);
}

#[tokio::test]
async fn test_share_with_invalid_user_id() {
    let server = TestServer::start().await.unwrap();
    let alice = server.token_for(ALICE).unwrap();
    let topic = create_topic(&server, &alice).await;

    let response = server
        .put_empty_auth(&format!("/api/v1/topics/{topic}/subscribers/usr!!"), &alice)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_USER_ID");
}
