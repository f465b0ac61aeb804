//! tabula demo - main entry point.
//!
//! Loads the user's configuration, builds an "orders" table with a few
//! bulk actions and a trashed filter, and walks through them, logging each
//! step.

use std::sync::Arc;

use serde_json::{json, Value};
use tabula_actions::{
    ActionError, ActionRegistry, BulkAction, BulkActionLifecycle, FormField, Halt, HookPoint,
    LifecycleResult, StaticRecords, TableContext,
};
use tabula_core::{Record, TableConfig};
use tabula_filters::{MemoryQuery, TrashedFilter};

// =============================================================================
// Fixtures
// =============================================================================

fn orders() -> Vec<Record> {
    vec![
        Record::new(1u64).with("total", json!(120)),
        Record::new(2u64).with("total", json!(80)),
        Record::new(3u64).with("total", json!(45)),
        Record::new(4u64)
            .with("total", json!(300))
            .with("deleted_at", json!("2024-03-01 09:00:00")),
        Record::new(5u64)
            .with("total", json!(15))
            .with("deleted_at", json!("2024-03-02 17:30:00")),
    ]
}

fn order_actions() -> ActionRegistry {
    ActionRegistry::new(|table| {
        tracing::debug!("Building bulk actions for '{}'", table.model);
        vec![
            BulkAction::new("delete")
                .label("Delete selected")
                .action(|inv| Ok(json!({ "deleted": inv.records.len() }))),
            BulkAction::new("export")
                .label("Export")
                .form(vec![FormField::new("format").label("file format").required()])
                .action(|inv| {
                    let format = inv.data.get("format").cloned().unwrap_or(Value::Null);
                    Ok(json!({ "format": format, "rows": inv.records.len() }))
                }),
            BulkAction::new("refund")
                .label("Refund")
                .requires_confirmation()
                .disabled_when(|action| action.selected_ids().is_empty())
                .action(|inv| {
                    let total: i64 = inv
                        .records
                        .iter()
                        .filter_map(|r| r.get("total").and_then(Value::as_i64))
                        .sum();
                    if total > 500 {
                        let error = ActionError::failed(inv.action.name(), "refund limit exceeded");
                        return Err(error.into());
                    }
                    if inv.arguments.get("confirmed") != Some(&Value::Bool(true)) {
                        return Err(Halt::Hold);
                    }
                    Ok(json!({ "refunded": total }))
                }),
        ]
    })
    .configure_using(|action| {
        action.hooks().add(HookPoint::BeforeCall, |ctx| {
            tracing::info!(
                "Running '{}' on {} record(s)",
                ctx.action.get_label(),
                ctx.records.len()
            );
        });
    })
}

// =============================================================================
// Walkthroughs
// =============================================================================

fn bulk_actions(config: &TableConfig) -> LifecycleResult<()> {
    let table = Arc::new(TableContext::new(
        "orders",
        "order",
        Arc::new(StaticRecords::new(orders())),
    ));
    let lifecycle = BulkActionLifecycle::new(table, order_actions(), config.actions.clone())?;
    let mut watcher = lifecycle.subscribe();

    let names: Vec<_> = lifecycle
        .actions()
        .iter()
        .map(|a| a.get_label().to_string())
        .collect();
    tracing::info!("Available bulk actions: {:?}", names);

    // No form: runs straight away.
    let outcome = lifecycle.mount("delete", [1u64, 2, 3])?;
    tracing::info!("delete -> {:?}", outcome);

    // Form: waits for input, rejects a missing value, then completes.
    let outcome = lifecycle.mount("export", [1u64, 2])?;
    tracing::info!("export -> {:?}", outcome);
    if watcher.has_changed().unwrap_or(false) {
        tracing::info!("Mount state: {:?}", *watcher.borrow_and_update());
    }
    match lifecycle.call(None) {
        Err(e) => tracing::info!("export rejected: {}", e),
        Ok(outcome) => tracing::warn!("export unexpectedly accepted: {:?}", outcome),
    }
    lifecycle.set_form_value("format", json!("csv"));
    tracing::info!("export -> {:?}", lifecycle.call(None)?);

    // Hold until confirmed, then complete.
    lifecycle.mount("refund", [2u64, 3])?;
    tracing::info!("refund -> {:?}", lifecycle.call(None)?);
    tracing::info!(
        "refund -> {:?}",
        lifecycle.call(Some(r#"{"confirmed": true}"#))?
    );

    // Abandon a confirmation.
    lifecycle.mount("export", [3u64])?;
    lifecycle.cancel();

    for signal in lifecycle.drain_signals() {
        tracing::info!("UI signal: {:?}", signal);
    }
    Ok(())
}

fn trashed_filter(config: &TableConfig) {
    let filter = TrashedFilter::trashed(&config.filters.trashed);

    for (value, label) in filter.options() {
        let rows: Vec<_> = filter
            .filter(MemoryQuery::new(orders()), value)
            .get()
            .into_iter()
            .map(|r| r.id.to_string())
            .collect();
        tracing::info!("{} / {}: {:?}", filter.get_label(), label, rows);
    }
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match TableConfig::load_user() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            TableConfig::default()
        }
    };

    if let Err(e) = bulk_actions(&config) {
        tracing::error!("Bulk action walkthrough failed: {}", e);
        std::process::exit(1);
    }
    trashed_filter(&config);
}
