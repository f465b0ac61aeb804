use super::*;
use crate::error::{ActionError, LifecycleError};
use crate::form::{FormField, MockFormBinding, ValidationErrors};
use crate::table::{MockRecordResolver, RecordResolver, StaticRecords};
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tabula_core::Record;

type Log = Arc<Mutex<Vec<&'static str>>>;

struct Fixture {
    lifecycle: BulkActionLifecycle,
    /// Records the `delete` body ran against.
    deleted: Arc<Mutex<Vec<RecordId>>>,
    /// Hook order seen by `audited`.
    log: Log,
}

fn table_with(resolver: Arc<dyn RecordResolver>) -> Arc<TableContext> {
    Arc::new(TableContext::new("orders", "order", resolver))
}

fn table() -> Arc<TableContext> {
    table_with(Arc::new(StaticRecords::new(
        (1u64..=5).map(Record::new).collect(),
    )))
}

fn record(log: &Log, label: &'static str) -> impl Fn(&HookContext<'_>) + Send + Sync + 'static {
    let log = log.clone();
    move |_| log.lock().push(label)
}

fn audited(log: &Log) -> BulkAction {
    let body_log = log.clone();
    let after_log = log.clone();
    BulkAction::new("audited")
        .form(vec![FormField::new("note")])
        .before_form_filled(record(log, "before_form_filled"))
        .mount_using(record(log, "mount"))
        .after_form_filled(record(log, "after_form_filled"))
        .before_form_validated(record(log, "before_form_validated"))
        .after_form_validated(record(log, "after_form_validated"))
        .before(record(log, "before_call"))
        .action(move |_| {
            body_log.lock().push("body");
            Ok(Value::Null)
        })
        .after(move |_| {
            after_log.lock().push("after_call");
            Ok(None)
        })
}

fn registry(deleted: Arc<Mutex<Vec<RecordId>>>, log: Log) -> ActionRegistry {
    ActionRegistry::new(move |_| {
        let deleted = deleted.clone();
        vec![
            BulkAction::new("delete").action(move |inv| {
                *deleted.lock() = inv.records.iter().map(|r| r.id.clone()).collect();
                Ok(json!({ "deleted": inv.records.len() }))
            }),
            BulkAction::new("export")
                .form(vec![FormField::new("format").required()])
                .action(|inv| Ok(inv.data.get("format").cloned().unwrap_or(Value::Null))),
            BulkAction::new("archive")
                .form(vec![FormField::new("reason")])
                .disabled(true),
            BulkAction::new("confirm")
                .requires_confirmation()
                .action(|inv| Ok(json!(inv.records.len()))),
            BulkAction::new("hold")
                .form(vec![FormField::new("note")])
                .action(|_| Err(Halt::Hold)),
            BulkAction::new("explode")
                .requires_confirmation()
                .action(|inv| Err(ActionError::failed(inv.action.name(), "boom").into())),
            BulkAction::new("after_fail")
                .action(|_| Ok(json!(1)))
                .after(|ctx| Err(ActionError::failed(ctx.action.name(), "after boom"))),
            BulkAction::new("after_override")
                .action(|_| Ok(json!(1)))
                .after(|_| Ok(Some(json!("override")))),
            BulkAction::new("echo")
                .requires_confirmation()
                .action(|inv| Ok(Value::Object(inv.arguments.clone()))),
            BulkAction::new("panics")
                .requires_confirmation()
                .action(|_| panic!("body panicked")),
            audited(&log),
        ]
    })
}

fn fixture() -> Fixture {
    let deleted = Arc::new(Mutex::new(Vec::new()));
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let lifecycle = BulkActionLifecycle::new(
        table(),
        registry(deleted.clone(), log.clone()),
        ActionsConfig::default(),
    )
    .unwrap();
    Fixture {
        lifecycle,
        deleted,
        log,
    }
}

fn close_signal() -> UiSignal {
    UiSignal::CloseConfirmation {
        id: "orders-table-bulk-action".to_string(),
    }
}

// =============================================================================
// Mount
// =============================================================================

#[test]
fn test_mount_unknown_action_is_ignored() {
    let f = fixture();

    let outcome = f.lifecycle.mount("missing", [1u64]).unwrap();

    assert_eq!(outcome, MountOutcome::Ignored);
    assert_eq!(f.lifecycle.mounted_action_name(), None);
    assert_eq!(f.lifecycle.phase(), Phase::Idle);
    assert!(f.lifecycle.drain_signals().is_empty());
}

#[test]
fn test_ignored_mount_discards_existing_mount() {
    let f = fixture();
    f.lifecycle.mount("confirm", [1u64]).unwrap();
    f.lifecycle.drain_signals();

    let outcome = f.lifecycle.mount("archive", [2u64, 3, 4]).unwrap();

    assert_eq!(outcome, MountOutcome::Ignored);
    assert_eq!(f.lifecycle.mounted_action_name(), None);
    assert_eq!(f.lifecycle.phase(), Phase::Idle);
    assert!(f.lifecycle.selection().is_empty());
    assert_eq!(f.lifecycle.drain_signals(), vec![close_signal()]);

    // Confirming the stale surface must not run "confirm" on 2, 3, 4.
    assert_eq!(f.lifecycle.call(None).unwrap(), CallOutcome::Skipped);
}

#[test]
fn test_unknown_mount_discards_existing_mount() {
    let f = fixture();
    f.lifecycle.mount("export", [1u64]).unwrap();
    f.lifecycle.set_form_value("format", json!("csv"));

    let outcome = f.lifecycle.mount("missing", [2u64]).unwrap();

    assert_eq!(outcome, MountOutcome::Ignored);
    assert!(!f.lifecycle.is_mounted());
    assert!(f.lifecycle.form_data().is_empty());
    assert_eq!(f.lifecycle.call(None).unwrap(), CallOutcome::Skipped);
}

#[test]
fn test_mount_disabled_action_is_ignored() {
    let f = fixture();

    let outcome = f.lifecycle.mount("archive", [1u64, 2]).unwrap();

    assert_eq!(outcome, MountOutcome::Ignored);
    assert!(!f.lifecycle.is_mounted());
    assert!(f.lifecycle.drain_signals().is_empty());
}

#[test]
fn test_mount_disabled_action_without_form_never_runs() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let registry = ActionRegistry::new(move |_| {
        let counter = counter.clone();
        vec![BulkAction::new("purge").disabled(true).action(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Null)
        })]
    });
    let lifecycle =
        BulkActionLifecycle::new(table(), registry, ActionsConfig::default()).unwrap();

    let outcome = lifecycle.mount("purge", [1u64, 2]).unwrap();

    assert_eq!(outcome, MountOutcome::Ignored);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!lifecycle.is_mounted());
    assert!(lifecycle.drain_signals().is_empty());
}

#[test]
fn test_call_skips_action_disabled_after_mount() {
    let locked = Arc::new(AtomicBool::new(false));
    let flag = locked.clone();
    let registry = ActionRegistry::new(move |_| {
        let flag = flag.clone();
        vec![BulkAction::new("approve")
            .requires_confirmation()
            .disabled_when(move |_| flag.load(Ordering::SeqCst))
            .action(|inv| Ok(json!(inv.records.len())))]
    });
    let lifecycle =
        BulkActionLifecycle::new(table(), registry, ActionsConfig::default()).unwrap();
    lifecycle.mount("approve", [1u64, 2]).unwrap();

    locked.store(true, Ordering::SeqCst);
    assert_eq!(lifecycle.call(None).unwrap(), CallOutcome::Skipped);
    assert_eq!(lifecycle.mounted_action_name().as_deref(), Some("approve"));
    assert_eq!(lifecycle.phase(), Phase::AwaitingConfirmation);
    assert_eq!(lifecycle.selection().len(), 2);

    locked.store(false, Ordering::SeqCst);
    assert_eq!(
        lifecycle.call(None).unwrap(),
        CallOutcome::Completed(json!(2))
    );
}

#[test]
fn test_panicking_mount_hook_resets() {
    let registry = ActionRegistry::new(|_| {
        vec![BulkAction::new("broken")
            .form(vec![FormField::new("note")])
            .mount_using(|_| panic!("mount hook panicked"))]
    });
    let lifecycle =
        BulkActionLifecycle::new(table(), registry, ActionsConfig::default()).unwrap();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _ = lifecycle.mount("broken", [1u64]);
    }));

    assert!(result.is_err());
    assert_eq!(lifecycle.mounted_action_name(), None);
    assert_eq!(lifecycle.phase(), Phase::Idle);
    assert!(lifecycle.selection().is_empty());
    assert_eq!(lifecycle.subscribe().borrow().phase, Phase::Idle);
}

#[test]
fn test_mount_disabled_by_selection_predicate() {
    let registry = ActionRegistry::new(|_| {
        vec![BulkAction::new("merge")
            .requires_confirmation()
            .disabled_when(|a| a.selected_ids().len() < 2)]
    });
    let lifecycle =
        BulkActionLifecycle::new(table(), registry, ActionsConfig::default()).unwrap();

    assert_eq!(
        lifecycle.mount("merge", [1u64]).unwrap(),
        MountOutcome::Ignored
    );
    assert_eq!(
        lifecycle.mount("merge", [1u64, 2]).unwrap(),
        MountOutcome::AwaitingConfirmation
    );
}

#[test]
fn test_mount_hidden_action_is_ignored() {
    let registry = ActionRegistry::new(|_| vec![BulkAction::new("purge").hidden(true)]);
    let lifecycle =
        BulkActionLifecycle::new(table(), registry, ActionsConfig::default()).unwrap();

    assert_eq!(
        lifecycle.mount("purge", [1u64]).unwrap(),
        MountOutcome::Ignored
    );
}

#[test]
fn test_mount_without_form_calls_inline() {
    let f = fixture();

    let outcome = f.lifecycle.mount("delete", [1u64, 2, 3]).unwrap();

    assert_eq!(
        outcome,
        MountOutcome::Called(CallOutcome::Completed(json!({ "deleted": 3 })))
    );
    assert_eq!(
        *f.deleted.lock(),
        vec![
            RecordId::from(1u64),
            RecordId::from(2u64),
            RecordId::from(3u64)
        ]
    );
    assert_eq!(f.lifecycle.mounted_action_name(), None);
    assert!(f.lifecycle.selection().is_empty());
    assert_eq!(f.lifecycle.phase(), Phase::Idle);
    assert_eq!(f.lifecycle.drain_signals(), vec![close_signal()]);
}

#[test]
fn test_mount_with_form_opens_confirmation() {
    let f = fixture();

    let outcome = f.lifecycle.mount("export", [4u64, 5]).unwrap();

    assert_eq!(outcome, MountOutcome::AwaitingConfirmation);
    assert_eq!(f.lifecycle.mounted_action_name().as_deref(), Some("export"));
    assert_eq!(f.lifecycle.phase(), Phase::AwaitingConfirmation);
    assert_eq!(f.lifecycle.selection().len(), 2);
    assert_eq!(
        f.lifecycle.drain_signals(),
        vec![
            UiSignal::ResetErrors,
            UiSignal::OpenConfirmation {
                id: "orders-table-bulk-action".to_string()
            }
        ]
    );
    // Default mount hook filled the form.
    assert_eq!(f.lifecycle.form_data().get("format"), Some(&Value::Null));
}

#[test]
fn test_mount_replaces_previous_mount() {
    let f = fixture();
    f.lifecycle.mount("export", [1u64]).unwrap();
    f.lifecycle.set_form_value("format", json!("csv"));

    f.lifecycle.mount("hold", [2u64]).unwrap();

    assert_eq!(f.lifecycle.mounted_action_name().as_deref(), Some("hold"));
    assert_eq!(
        f.lifecycle.selection().snapshot(),
        vec![RecordId::from(2u64)]
    );
    assert!(f.lifecycle.form_data().get("format").is_none());
}

#[test]
fn test_hook_order() {
    let f = fixture();

    f.lifecycle.mount("audited", [1u64]).unwrap();
    f.lifecycle.call(None).unwrap();

    assert_eq!(
        *f.log.lock(),
        vec![
            "before_form_filled",
            "mount",
            "after_form_filled",
            "before_form_validated",
            "after_form_validated",
            "before_call",
            "body",
            "after_call",
        ]
    );
}

#[test]
fn test_form_hooks_skipped_without_form() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let hook_log = log.clone();
    let registry = ActionRegistry::new(move |_| {
        vec![BulkAction::new("plain")
            .requires_confirmation()
            .before_form_filled(record(&hook_log, "before_form_filled"))
            .before_form_validated(record(&hook_log, "before_form_validated"))
            .before(record(&hook_log, "before_call"))]
    });
    let lifecycle =
        BulkActionLifecycle::new(table(), registry, ActionsConfig::default()).unwrap();

    lifecycle.mount("plain", [1u64]).unwrap();
    lifecycle.call(None).unwrap();

    assert_eq!(*log.lock(), vec!["before_call"]);
}

// =============================================================================
// Call
// =============================================================================

#[test]
fn test_call_without_mount_is_skipped() {
    let f = fixture();
    assert_eq!(f.lifecycle.call(None).unwrap(), CallOutcome::Skipped);
    assert!(f.lifecycle.drain_signals().is_empty());
}

#[test]
fn test_export_validation_failure_keeps_mount() {
    let f = fixture();
    f.lifecycle.mount("export", [1u64, 2]).unwrap();
    f.lifecycle.drain_signals();
    f.lifecycle.set_form_value("format", Value::Null);

    let result = f.lifecycle.call(None);

    match result {
        Err(LifecycleError::Validation(errors)) => {
            assert_eq!(errors.get("format"), ["The format field is required."]);
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(f.lifecycle.mounted_action_name().as_deref(), Some("export"));
    assert_eq!(f.lifecycle.phase(), Phase::AwaitingConfirmation);
    assert_eq!(f.lifecycle.selection().len(), 2);
    assert!(f.lifecycle.drain_signals().is_empty());
}

#[test]
fn test_export_valid_input_completes_and_resets() {
    let f = fixture();
    f.lifecycle.mount("export", [1u64, 2]).unwrap();
    f.lifecycle.set_form_value("format", Value::Null);
    assert!(f.lifecycle.call(None).is_err());

    f.lifecycle.set_form_value("format", json!("csv"));
    let outcome = f.lifecycle.call(None).unwrap();

    assert_eq!(outcome, CallOutcome::Completed(json!("csv")));
    assert_eq!(f.lifecycle.mounted_action_name(), None);
    assert!(f.lifecycle.selection().is_empty());
    assert!(f.lifecycle.form_data().is_empty());
    assert!(f
        .lifecycle
        .registry()
        .find("export")
        .unwrap()
        .form_data()
        .is_empty());
}

#[test]
fn test_hold_preserves_mount() {
    let f = fixture();
    f.lifecycle.mount("hold", [1u64, 2]).unwrap();
    f.lifecycle.set_form_value("note", json!("wait"));
    f.lifecycle.drain_signals();

    let outcome = f.lifecycle.call(None).unwrap();

    assert_eq!(outcome, CallOutcome::Held);
    assert_eq!(f.lifecycle.mounted_action_name().as_deref(), Some("hold"));
    assert_eq!(f.lifecycle.phase(), Phase::AwaitingConfirmation);
    assert_eq!(f.lifecycle.selection().len(), 2);
    assert_eq!(f.lifecycle.form_data().get("note"), Some(&json!("wait")));
    assert!(f.lifecycle.drain_signals().is_empty());
}

#[test]
fn test_body_failure_resets_before_returning() {
    let f = fixture();
    f.lifecycle.mount("explode", [1u64, 2, 3]).unwrap();
    f.lifecycle.drain_signals();

    let result = f.lifecycle.call(None);

    match result {
        Err(LifecycleError::Action(error)) => {
            assert_eq!(error.action(), "explode");
            assert_eq!(error.to_string(), "Action 'explode' failed: boom");
        }
        other => panic!("expected action error, got {:?}", other),
    }
    assert_eq!(f.lifecycle.mounted_action_name(), None);
    assert!(f.lifecycle.selection().is_empty());
    assert_eq!(f.lifecycle.phase(), Phase::Idle);
    assert_eq!(f.lifecycle.drain_signals(), vec![close_signal()]);
}

#[test]
fn test_after_call_failure_resets() {
    let f = fixture();

    let result = f.lifecycle.mount("after_fail", [1u64]);

    assert!(matches!(result, Err(LifecycleError::Action(_))));
    assert_eq!(f.lifecycle.mounted_action_name(), None);
    assert!(f.lifecycle.selection().is_empty());
    assert_eq!(f.lifecycle.drain_signals(), vec![close_signal()]);
}

#[test]
fn test_after_call_value_overrides_result() {
    let f = fixture();

    let outcome = f.lifecycle.mount("after_override", [1u64]).unwrap();

    assert_eq!(
        outcome,
        MountOutcome::Called(CallOutcome::Completed(json!("override")))
    );
}

#[test]
fn test_panicking_body_still_resets() {
    let f = fixture();
    f.lifecycle.mount("panics", [1u64]).unwrap();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _ = f.lifecycle.call(None);
    }));

    assert!(result.is_err());
    assert_eq!(f.lifecycle.mounted_action_name(), None);
    assert!(f.lifecycle.selection().is_empty());
}

#[test]
fn test_arguments_are_parsed() {
    let f = fixture();

    f.lifecycle.mount("echo", [1u64]).unwrap();
    let outcome = f.lifecycle.call(Some(r#"{"force": true}"#)).unwrap();
    assert_eq!(outcome, CallOutcome::Completed(json!({ "force": true })));

    f.lifecycle.mount("echo", [1u64]).unwrap();
    let outcome = f.lifecycle.call(Some("not json")).unwrap();
    assert_eq!(outcome, CallOutcome::Completed(json!({})));

    f.lifecycle.mount("echo", [1u64]).unwrap();
    let outcome = f.lifecycle.call(Some("[1, 2]")).unwrap();
    assert_eq!(outcome, CallOutcome::Completed(json!({})));
}

#[test]
fn test_body_sees_selection_changed_after_mount() {
    let f = fixture();
    f.lifecycle.mount("confirm", [1u64]).unwrap();

    f.lifecycle.selection().select_all([2u64, 3]);
    let outcome = f.lifecycle.call(None).unwrap();

    assert_eq!(outcome, CallOutcome::Completed(json!(3)));
}

// =============================================================================
// Cancel
// =============================================================================

#[test]
fn test_cancel_clears_mount() {
    let f = fixture();
    f.lifecycle.mount("export", [1u64]).unwrap();
    f.lifecycle.set_form_value("format", json!("csv"));
    f.lifecycle.drain_signals();

    assert!(f.lifecycle.cancel());

    assert_eq!(f.lifecycle.mounted_action_name(), None);
    assert!(f.lifecycle.selection().is_empty());
    assert!(f.lifecycle.form_data().is_empty());
    assert_eq!(f.lifecycle.drain_signals(), vec![close_signal()]);

    assert!(!f.lifecycle.cancel());
    assert_eq!(f.lifecycle.call(None).unwrap(), CallOutcome::Skipped);
}

#[test]
fn test_abandoned_mount_persists_until_next_mount() {
    let f = fixture();
    f.lifecycle.mount("export", [1u64]).unwrap();

    // The user closed the surface without confirming or cancelling.
    assert_eq!(f.lifecycle.mounted_action_name().as_deref(), Some("export"));

    f.lifecycle.mount("delete", [2u64]).unwrap();
    assert_eq!(f.lifecycle.mounted_action_name(), None);
    assert_eq!(*f.deleted.lock(), vec![RecordId::from(2u64)]);
}

// =============================================================================
// Forms
// =============================================================================

struct CountingProvider {
    builds: Arc<AtomicUsize>,
}

impl FormProvider for CountingProvider {
    fn build(
        &self,
        schema: &[FormField],
        model: &str,
        state: FormState,
    ) -> Arc<dyn FormBinding> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        SchemaFormProvider.build(schema, model, state)
    }
}

#[test]
fn test_form_is_cached_per_mount() {
    let f = fixture();
    let builds = Arc::new(AtomicUsize::new(0));
    let lifecycle = f.lifecycle.with_form_provider(Arc::new(CountingProvider {
        builds: builds.clone(),
    }));

    lifecycle.mount("export", [1u64]).unwrap();
    assert!(lifecycle.call(None).is_err());
    assert!(lifecycle.call(None).is_err());
    assert_eq!(builds.load(Ordering::SeqCst), 1);

    lifecycle.set_form_value("format", json!("pdf"));
    lifecycle.call(None).unwrap();

    lifecycle.mount("export", [1u64]).unwrap();
    assert_eq!(builds.load(Ordering::SeqCst), 2);
}

struct FixedProvider(Arc<MockFormBinding>);

impl FormProvider for FixedProvider {
    fn build(&self, _: &[FormField], _: &str, _: FormState) -> Arc<dyn FormBinding> {
        self.0.clone()
    }
}

#[test]
fn test_validation_errors_come_from_form_binding() {
    let mut form = MockFormBinding::new();
    form.expect_fill().times(1).return_const(());
    form.expect_state().times(1).returning(|| {
        let mut errors = ValidationErrors::new();
        errors.add("format", "Pick a format.");
        Err(errors)
    });

    let f = fixture();
    let lifecycle = f
        .lifecycle
        .with_form_provider(Arc::new(FixedProvider(Arc::new(form))));

    lifecycle.mount("export", [1u64]).unwrap();
    let result = lifecycle.call(None);

    assert!(matches!(
        result,
        Err(LifecycleError::Validation(errors)) if errors.get("format") == ["Pick a format."]
    ));
    assert!(lifecycle.is_mounted());
}

// =============================================================================
// Records, Observation, Configuration
// =============================================================================

#[test]
fn test_records_come_from_table_resolver() {
    let mut resolver = MockRecordResolver::new();
    resolver
        .expect_resolve()
        .withf(|ids| ids.len() == 3)
        .returning(|ids| ids.iter().cloned().map(Record::new).collect());

    let deleted = Arc::new(Mutex::new(Vec::new()));
    let lifecycle = BulkActionLifecycle::new(
        table_with(Arc::new(resolver)),
        registry(deleted.clone(), Arc::new(Mutex::new(Vec::new()))),
        ActionsConfig::default(),
    )
    .unwrap();

    lifecycle.mount("delete", ["a", "b", "c"]).unwrap();

    assert_eq!(deleted.lock().len(), 3);
}

#[test]
fn test_subscribers_see_phases() {
    let f = fixture();
    let rx = f.lifecycle.subscribe();

    f.lifecycle.mount("export", [1u64]).unwrap();
    assert_eq!(rx.borrow().phase, Phase::AwaitingConfirmation);
    assert_eq!(rx.borrow().action.as_deref(), Some("export"));

    f.lifecycle.set_form_value("format", json!("csv"));
    f.lifecycle.call(None).unwrap();
    assert_eq!(*rx.borrow(), MountSnapshot::default());
}

#[test]
fn test_confirmation_id_uses_config_suffix() {
    let config = ActionsConfig {
        confirmation_suffix: "-bulk".to_string(),
        ..ActionsConfig::default()
    };
    let lifecycle = BulkActionLifecycle::new(
        table(),
        ActionRegistry::new(|_| Vec::new()),
        config,
    )
    .unwrap();

    assert_eq!(lifecycle.confirmation_id(), "orders-bulk");
    assert_eq!(lifecycle.form_state().path(), "mountedTableBulkActionData");
}

#[test]
fn test_strict_names_from_config() {
    let config = ActionsConfig {
        strict_names: true,
        ..ActionsConfig::default()
    };
    let registry =
        ActionRegistry::new(|_| vec![BulkAction::new("delete"), BulkAction::new("delete")]);

    let result = BulkActionLifecycle::new(table(), registry, config);

    assert!(matches!(result, Err(LifecycleError::Registry(_))));
}

#[test]
fn test_reload_rebuilds_actions() {
    let builds = Arc::new(AtomicUsize::new(0));
    let counter = builds.clone();
    let registry = ActionRegistry::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        vec![BulkAction::new("delete")]
    });
    let lifecycle =
        BulkActionLifecycle::new(table(), registry, ActionsConfig::default()).unwrap();

    let actions = lifecycle.reload().unwrap();

    assert_eq!(builds.load(Ordering::SeqCst), 2);
    assert_eq!(actions.names(), ["delete"]);
    assert_eq!(lifecycle.actions().names(), ["delete"]);
}
