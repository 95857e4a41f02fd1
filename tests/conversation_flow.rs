//! End-to-end conversation lifecycle tests against a simulated Answer
//! Service.

use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use datamind::client::AnswerClient;
use datamind::ui::conversation::{
    ConversationManager, Sender, CONNECTION_ERROR, FALLBACK_ANSWER, GREETING,
};

fn manager_for(url: &str) -> ConversationManager {
    ConversationManager::new(AnswerClient::new(url), None)
}

/// Poll until the outstanding request resolves.
async fn resolve(manager: &mut ConversationManager) {
    for _ in 0..500 {
        manager.poll_response();
        if !manager.is_awaiting_response() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("request did not resolve in time");
}

#[tokio::test]
async fn answer_is_appended_and_in_flight_clears() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ask"))
        .and(query_param("q", "what is the answer?"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"answer": "42"})))
        .mount(&server)
        .await;

    let mut manager = manager_for(&server.uri());
    manager.submit("what is the answer?");
    assert!(manager.is_awaiting_response());

    resolve(&mut manager).await;

    let messages: Vec<_> = manager.history().messages().collect();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].text, GREETING);
    assert_eq!(messages[1].sender, Sender::User);
    assert_eq!(messages[1].text, "what is the answer?");
    assert_eq!(messages[2].sender, Sender::Assistant);
    assert_eq!(messages[2].text, "42");
    assert!(!manager.is_awaiting_response());
}

#[tokio::test]
async fn missing_answer_field_yields_fallback_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ask"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})),
        )
        .mount(&server)
        .await;

    let mut manager = manager_for(&server.uri());
    manager.submit("anything");
    resolve(&mut manager).await;

    assert_eq!(manager.history().last().unwrap().text, FALLBACK_ANSWER);
}

#[tokio::test]
async fn server_error_yields_connection_diagnostic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut manager = manager_for(&server.uri());
    manager.submit("anything");
    resolve(&mut manager).await;

    let last = manager.history().last().unwrap();
    assert_eq!(last.sender, Sender::Assistant);
    assert_eq!(last.text, CONNECTION_ERROR);
    assert!(!manager.is_awaiting_response());
}

#[tokio::test]
async fn unreachable_service_yields_connection_diagnostic() {
    // Nothing listens on this address; the connection is refused.
    let mut manager = manager_for("http://127.0.0.1:1");
    manager.submit("anything");
    resolve(&mut manager).await;

    assert_eq!(manager.history().last().unwrap().text, CONNECTION_ERROR);
}

#[tokio::test]
async fn malformed_body_yields_connection_diagnostic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let mut manager = manager_for(&server.uri());
    manager.submit("anything");
    resolve(&mut manager).await;

    assert_eq!(manager.history().last().unwrap().text, CONNECTION_ERROR);
}

#[tokio::test]
async fn submissions_while_awaiting_are_dropped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ask"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"answer": "slow answer"}))
                .set_delay(Duration::from_millis(150)),
        )
        .mount(&server)
        .await;

    let mut manager = manager_for(&server.uri());
    manager.submit("first");
    let len_in_flight = manager.history().len();

    manager.submit("second");
    manager.submit("third");
    assert_eq!(manager.history().len(), len_in_flight);
    assert!(manager.is_awaiting_response());

    resolve(&mut manager).await;

    // Exactly one answer arrived, for the first submission.
    let messages: Vec<_> = manager.history().messages().collect();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].text, "slow answer");

    // The conversation is usable again.
    manager.submit("first again");
    assert!(manager.is_awaiting_response());
}

#[tokio::test]
async fn whitespace_submissions_never_reach_the_service() {
    // Unreachable on purpose: a request would fail the test via the
    // diagnostic message.
    let mut manager = manager_for("http://127.0.0.1:1");
    manager.submit("");
    manager.submit("   ");
    manager.submit("\t\n");

    assert!(!manager.is_awaiting_response());
    assert_eq!(manager.history().len(), 1);
}

#[tokio::test]
async fn ids_stay_unique_and_increasing_across_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"answer": "ok"})))
        .mount(&server)
        .await;

    let mut manager = manager_for(&server.uri());
    for question in ["one", "two", "three"] {
        manager.submit(question);
        resolve(&mut manager).await;
    }

    let ids: Vec<u64> = manager.history().messages().map(|m| m.id).collect();
    assert_eq!(ids.len(), 7);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}
