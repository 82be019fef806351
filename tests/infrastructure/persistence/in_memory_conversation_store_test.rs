use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use tokio_util::sync::CancellationToken;

use staygenie::application::ports::{Clock, ConversationStore};
use staygenie::application::services::ConversationSweeper;
use staygenie::domain::{ChatMessage, ConversationId, SearchContext};
use staygenie::infrastructure::persistence::InMemoryConversationStore;

use crate::helpers::ManualClock;

const TTL: StdDuration = StdDuration::from_secs(60 * 60);
const SWEEP_INTERVAL: StdDuration = StdDuration::from_secs(15 * 60);

struct Fixture {
    clock: Arc<ManualClock>,
    store: Arc<dyn ConversationStore>,
    sweeper: ConversationSweeper,
}

fn fixture() -> Fixture {
    let clock = Arc::new(ManualClock::default());
    let store: Arc<dyn ConversationStore> =
        Arc::new(InMemoryConversationStore::new(clock.clone()));
    let sweeper = ConversationSweeper::new(store.clone(), clock.clone(), TTL, SWEEP_INTERVAL);
    Fixture {
        clock,
        store,
        sweeper,
    }
}

fn id(raw: &str) -> ConversationId {
    ConversationId::parse(raw).unwrap()
}

#[test]
fn given_blank_identifier_when_parsing_conversation_id_then_rejects() {
    assert!(ConversationId::parse("").is_none());
    assert!(ConversationId::parse("   ").is_none());
    assert_eq!(ConversationId::parse(" conv-1 ").unwrap().as_str(), "conv-1");
}

#[test]
fn given_stored_turn_when_getting_then_returns_history_context_and_timestamp() {
    let f = fixture();
    let context = SearchContext {
        location: Some("Rome".to_string()),
        ..Default::default()
    };

    f.store.put(
        &id("conv-1"),
        vec![ChatMessage::user("hotels in Rome")],
        Some(context.clone()),
    );

    let state = f.store.get(&id("conv-1")).unwrap();
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.context, Some(context));
    assert_eq!(state.last_activity, f.clock.now());
}

#[test]
fn given_second_put_when_getting_then_last_write_wins() {
    let f = fixture();

    f.store.put(&id("conv-1"), vec![ChatMessage::user("first")], None);
    f.store.put(
        &id("conv-1"),
        vec![ChatMessage::user("first"), ChatMessage::user("second")],
        None,
    );

    assert_eq!(f.store.len(), 1);
    assert_eq!(f.store.get(&id("conv-1")).unwrap().history.len(), 2);
}

#[test]
fn given_state_written_59_minutes_ago_when_sweeping_then_keeps_it() {
    let f = fixture();
    f.store.put(&id("conv-1"), vec![ChatMessage::user("hi")], None);

    f.clock.advance(Duration::minutes(59));
    f.sweeper.sweep_once();

    assert!(f.store.get(&id("conv-1")).is_some());
}

#[test]
fn given_state_written_61_minutes_ago_when_sweeping_then_evicts_it() {
    let f = fixture();
    f.store.put(&id("conv-1"), vec![ChatMessage::user("hi")], None);

    f.clock.advance(Duration::minutes(61));
    f.sweeper.sweep_once();

    assert!(f.store.get(&id("conv-1")).is_none());
    assert!(f.store.is_empty());
}

#[test]
fn given_refreshed_state_when_sweeping_then_ttl_restarts_from_last_put() {
    let f = fixture();
    f.store.put(&id("stale"), vec![ChatMessage::user("a")], None);
    f.store.put(&id("active"), vec![ChatMessage::user("a")], None);

    f.clock.advance(Duration::minutes(40));
    f.store.put(
        &id("active"),
        vec![ChatMessage::user("a"), ChatMessage::user("b")],
        None,
    );
    f.clock.advance(Duration::minutes(30));
    f.sweeper.sweep_once();

    assert!(f.store.get(&id("stale")).is_none());
    assert!(f.store.get(&id("active")).is_some());
}

#[tokio::test]
async fn given_cancelled_token_when_sweeper_running_then_task_stops() {
    let f = fixture();
    let shutdown = CancellationToken::new();

    let handle = f.sweeper.spawn(shutdown.clone());
    shutdown.cancel();

    tokio::time::timeout(StdDuration::from_secs(5), handle)
        .await
        .expect("sweeper did not stop")
        .unwrap();
}
