//! Action Registry
//!
//! Builds the bulk actions for a table and keeps them until the table's
//! configuration changes. The registry is owned by whoever owns the table;
//! call [`ActionRegistry::cache`] again (or [`ActionRegistry::invalidate`])
//! whenever that configuration is recomputed.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::action::BulkAction;
use crate::error::RegistryError;
use crate::selection::SelectionContext;
use crate::table::TableContext;

/// Produces the table's actions, in display order.
pub type ActionFactory = Arc<dyn Fn(&TableContext) -> Vec<BulkAction> + Send + Sync>;

/// Applied to every action before it is cached.
pub type ConfigureFn = Arc<dyn Fn(&mut BulkAction) + Send + Sync>;

// =============================================================================
// Action Map
// =============================================================================

/// Actions indexed by name, keeping first-registration order.
#[derive(Clone, Default)]
pub struct ActionMap {
    actions: Vec<Arc<BulkAction>>,
}

impl ActionMap {
    /// Insert an action. A same-named action is replaced in place and returned.
    fn insert(&mut self, action: Arc<BulkAction>) -> Option<Arc<BulkAction>> {
        match self.actions.iter().position(|a| a.name() == action.name()) {
            Some(pos) => Some(std::mem::replace(&mut self.actions[pos], action)),
            None => {
                self.actions.push(action);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<BulkAction>> {
        self.actions.iter().find(|a| a.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<BulkAction>> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Actions whose hidden predicate is currently false.
    fn visible(&self) -> ActionMap {
        ActionMap {
            actions: self
                .actions
                .iter()
                .filter(|a| !a.is_hidden())
                .cloned()
                .collect(),
        }
    }
}

impl std::fmt::Debug for ActionMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Builds, caches and looks up a table's bulk actions.
pub struct ActionRegistry {
    factory: ActionFactory,
    configure: Option<ConfigureFn>,
    strict_names: bool,
    cached: RwLock<Option<ActionMap>>,
}

impl ActionRegistry {
    /// Create a registry around an action factory. Nothing is built until
    /// [`cache`](Self::cache) is called.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&TableContext) -> Vec<BulkAction> + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(factory),
            configure: None,
            strict_names: false,
            cached: RwLock::new(None),
        }
    }

    /// Set the hook applied to every action for cross-cutting defaults.
    pub fn configure_using<F>(mut self, configure: F) -> Self
    where
        F: Fn(&mut BulkAction) + Send + Sync + 'static,
    {
        self.configure = Some(Arc::new(configure));
        self
    }

    /// Reject duplicate action names instead of letting the later one win.
    pub fn strict_names(mut self, strict: bool) -> Self {
        self.strict_names = strict;
        self
    }

    /// Build the actions for `table` and replace the cache.
    ///
    /// Returns the freshly built map, hidden actions included. On a name
    /// collision the later action replaces the earlier one at the earlier
    /// one's position, unless strict naming is on.
    pub fn cache(&self, table: &Arc<TableContext>) -> Result<ActionMap, RegistryError> {
        let mut map = ActionMap::default();

        for mut action in (self.factory)(table) {
            if let Some(configure) = &self.configure {
                configure(&mut action);
            }
            action.bind_table(table.clone());

            let name = action.name().to_string();
            if map.insert(Arc::new(action)).is_some() {
                if self.strict_names {
                    return Err(RegistryError::DuplicateAction(name));
                }
                tracing::warn!(
                    "Bulk action '{}' registered more than once; the later definition wins",
                    name
                );
            }
        }

        tracing::info!(
            "Cached {} bulk action(s) for table '{}'",
            map.len(),
            table.id
        );
        *self.cached.write() = Some(map.clone());
        Ok(map)
    }

    /// Drop the cache. Lookups return nothing until the next `cache`.
    pub fn invalidate(&self) {
        self.cached.write().take();
        tracing::debug!("Bulk action cache invalidated");
    }

    pub fn is_cached(&self) -> bool {
        self.cached.read().is_some()
    }

    /// Every cached action, hidden ones included.
    pub fn all(&self) -> ActionMap {
        self.cached.read().clone().unwrap_or_default()
    }

    /// The visible actions. Hidden predicates are evaluated on every call.
    pub fn list(&self) -> ActionMap {
        // Clone out first so predicates run without the lock held.
        self.all().visible()
    }

    /// Look up a cached action by name, hidden or not.
    pub fn find(&self, name: &str) -> Option<Arc<BulkAction>> {
        self.cached.read().as_ref()?.get(name).cloned()
    }

    /// Look up a visible action and bind the current selection onto it.
    pub fn get(&self, name: &str, selection: &SelectionContext) -> Option<Arc<BulkAction>> {
        let action = self.list().get(name).cloned()?;
        action.bind_records(selection.snapshot());
        Some(action)
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("has_configure", &self.configure.is_some())
            .field("strict_names", &self.strict_names)
            .field("cached", &*self.cached.read())
            .finish()
    }
}
