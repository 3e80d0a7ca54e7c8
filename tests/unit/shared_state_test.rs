// Shared state snapshot tests
//
// - Values written by one step are visible to the next after a reload
// - A missing snapshot is empty, an unreadable or corrupt one is fatal
// - A step's recorded values survive its own failure

use std::fs;
use std::panic::AssertUnwindSafe;

use connector_e2e::core::{E2eError, Result};
use connector_e2e::state::{keys, run_step, Bootstrap, SharedState};
use futures_util::FutureExt;
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use tempfile::tempdir;

fn bootstrap() -> Bootstrap {
    Bootstrap::new()
        .with(keys::BASE_URL, "http://localhost:8080")
        .with(keys::CONNECTOR_ID, "stripe")
}

fn failing_assertion() -> Result<()> {
    panic!("status mismatch after recording the payment");
}

#[test]
fn test_missing_snapshot_loads_empty() {
    let dir = tempdir().unwrap();
    let state = SharedState::load(dir.path().join("absent.json")).unwrap();

    assert!(state.get_all().is_empty());
    assert_eq!(state.get(keys::PAYMENT_ID), None);
}

#[test]
fn test_persisted_values_visible_after_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("state.json");

    let mut state = SharedState::empty(&path);
    state.set(keys::PAYMENT_ID, "pay_1");
    state.set(keys::PAYMENT_AMOUNT, 6000);
    state.set("next_action", json!({"redirect_to_url": "https://acs.example.net"}));
    state.persist().unwrap();

    let reloaded = SharedState::load(&path).unwrap();
    assert_eq!(reloaded.get_str(keys::PAYMENT_ID), Some("pay_1"));
    assert_eq!(reloaded.get_i64(keys::PAYMENT_AMOUNT), Some(6000));
    assert_eq!(reloaded.get_all(), state.get_all());
    assert!(!dir.path().join("nested").join("state.json.tmp").exists());
}

#[test]
fn test_later_write_replaces_stale_value() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut first = SharedState::empty(&path);
    first.set(keys::PAYMENT_ID, "pay_123");
    first.persist().unwrap();

    let mut second = SharedState::load(&path).unwrap();
    assert_eq!(second.get_str(keys::PAYMENT_ID), Some("pay_123"));
    second.set(keys::PAYMENT_ID, "pay_456");
    second.persist().unwrap();

    let third = SharedState::load(&path).unwrap();
    assert_eq!(third.get_str(keys::PAYMENT_ID), Some("pay_456"));
}

#[test]
fn test_corrupt_snapshot_is_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, "{\"payment_id\": ").unwrap();

    let err = SharedState::load(&path).unwrap_err();
    assert!(matches!(err, E2eError::StateCorrupt { .. }));
    assert!(err.is_fatal());
}

#[test]
fn test_non_object_snapshot_is_corrupt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, "[\"pay_1\"]").unwrap();

    assert!(matches!(
        SharedState::load(&path),
        Err(E2eError::StateCorrupt { .. })
    ));
}

#[test]
fn test_unreadable_snapshot_is_fatal() {
    let dir = tempdir().unwrap();

    // A directory exists at the path but cannot be read as a file
    let err = SharedState::load(dir.path()).unwrap_err();
    assert!(matches!(err, E2eError::StateRead { .. }));
    assert!(err.is_fatal());
}

#[test]
fn test_persist_failure_is_fatal() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let mut state = SharedState::empty(blocker.join("state.json"));
    state.set(keys::PAYMENT_ID, "pay_1");

    let err = state.persist().unwrap_err();
    assert!(matches!(err, E2eError::StateWrite { .. }));
    assert!(err.is_fatal());
}

#[test]
fn test_failed_rename_leaves_no_temp_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    // A directory at the snapshot path makes the final rename fail
    fs::create_dir(&path).unwrap();
    fs::write(path.join("occupied"), "x").unwrap();

    let mut state = SharedState::empty(&path);
    state.set(keys::PAYMENT_ID, "pay_1");

    let err = state.persist().unwrap_err();
    assert!(matches!(err, E2eError::StateWrite { .. }));
    assert!(!dir.path().join("state.json.tmp").exists());
}

#[test]
fn test_reset_keeps_only_bootstrap_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut state = SharedState::empty(&path);
    state.set(keys::PAYMENT_ID, "pay_from_last_run");
    state.set(keys::CONNECTOR_ID, "adyen");
    state.persist().unwrap();

    SharedState::reset(&path, &bootstrap()).unwrap();

    let reloaded = SharedState::load(&path).unwrap();
    assert!(!reloaded.has(keys::PAYMENT_ID));
    assert_eq!(reloaded.get_str(keys::CONNECTOR_ID), Some("stripe"));
    assert_eq!(reloaded.get_all().len(), 2);
}

#[test]
fn test_bootstrap_does_not_override_recorded_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut state = SharedState::empty(&path);
    state.set(keys::CONNECTOR_ID, "cybersource");
    state.persist().unwrap();

    let seeded = SharedState::load_seeded(&path, &bootstrap()).unwrap();
    assert_eq!(seeded.get_str(keys::CONNECTOR_ID), Some("cybersource"));
    assert_eq!(seeded.get_str(keys::BASE_URL), Some("http://localhost:8080"));
}

#[test]
fn test_require_str_names_missing_key() {
    let state = SharedState::empty("unused.json");
    match state.require_str(keys::MANDATE_ID) {
        Err(E2eError::MissingStateKey(key)) => assert_eq!(key, keys::MANDATE_ID),
        other => panic!("expected MissingStateKey, got {:?}", other),
    }
}

#[test]
fn test_delete_and_merge() {
    let mut state = SharedState::empty("unused.json");
    state.set(keys::NEXT_ACTION_URL, "https://acs.example.net");
    state.delete(keys::NEXT_ACTION_URL);
    assert!(!state.has(keys::NEXT_ACTION_URL));

    let mut partial = Map::new();
    partial.insert(keys::REFUND_ID.to_string(), json!("ref_1"));
    partial.insert(keys::PAYMENT_STATUS.to_string(), json!("succeeded"));
    state.merge(partial);

    assert_eq!(state.get_str(keys::REFUND_ID), Some("ref_1"));
    assert_eq!(state.get_str(keys::PAYMENT_STATUS), Some("succeeded"));
}

#[tokio::test]
async fn test_run_step_persists_on_success() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");

    let recorded = run_step(&path, &bootstrap(), async |state: &mut SharedState| {
        state.set(keys::PAYMENT_ID, "pay_1");
        Ok(state.get_all().len())
    })
    .await
    .unwrap();

    assert_eq!(recorded, 3);
    let reloaded = SharedState::load(&path).unwrap();
    assert_eq!(reloaded.get_str(keys::PAYMENT_ID), Some("pay_1"));
    assert_eq!(reloaded.get_str(keys::CONNECTOR_ID), Some("stripe"));
}

#[tokio::test]
async fn test_run_step_persists_before_returning_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");

    let result: Result<()> = run_step(&path, &bootstrap(), async |state: &mut SharedState| {
        state.set(keys::PAYMENT_ID, "pay_1");
        Err(E2eError::mismatch("expected status 200, got 422"))
    })
    .await;

    assert!(matches!(result, Err(E2eError::ResponseMismatch(_))));
    let reloaded = SharedState::load(&path).unwrap();
    assert_eq!(reloaded.get_str(keys::PAYMENT_ID), Some("pay_1"));
}

#[tokio::test]
async fn test_run_step_persists_before_propagating_panic() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    let bootstrap = bootstrap();

    let outcome = AssertUnwindSafe(run_step(&path, &bootstrap, async |state: &mut SharedState| {
        state.set(keys::PAYMENT_ID, "pay_456");
        failing_assertion()
    }))
    .catch_unwind()
    .await;

    assert!(outcome.is_err(), "the step's panic must still reach the test");
    let reloaded = SharedState::load(&path).unwrap();
    assert_eq!(reloaded.get_str(keys::PAYMENT_ID), Some("pay_456"));
}

#[tokio::test]
async fn test_run_step_reports_persist_failure_over_panic() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    let bootstrap = bootstrap();

    let outcome = AssertUnwindSafe(run_step(&path, &bootstrap, async |state: &mut SharedState| {
        state.set(keys::PAYMENT_ID, "pay_789");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();
        failing_assertion()
    }))
    .catch_unwind()
    .await;

    let result = outcome.expect("a failed persist replaces the step's panic");
    let err = result.unwrap_err();
    assert!(matches!(err, E2eError::StateWrite { .. }));
    assert!(err.is_fatal());
    assert!(!dir.path().join("state.json.tmp").exists());
}

#[tokio::test]
async fn test_run_step_refuses_corrupt_snapshot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, "not json").unwrap();

    let result = run_step(&path, &bootstrap(), async |_state: &mut SharedState| Ok(())).await;

    assert!(result.unwrap_err().is_fatal());
    assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
}

fn state_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z0-9_]{1,24}".prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        Just(Value::Null),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_snapshot_round_trips_any_values(
        entries in prop::collection::btree_map("[a-z_]{1,16}", state_value(), 0..12)
    ) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut state = SharedState::empty(&path);
        for (key, value) in &entries {
            state.set(key.as_str(), value.clone());
        }
        state.persist().unwrap();

        let reloaded = SharedState::load(&path).unwrap();
        prop_assert_eq!(reloaded.get_all().len(), entries.len());
        for (key, value) in &entries {
            prop_assert_eq!(reloaded.get(key), Some(value));
        }
    }
}
