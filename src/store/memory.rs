//! In-process stand-in for the persistence layer.
//!
//! `MemoryStore` keeps environments in memory, assigns uuid ids, records every
//! outbound event it accepts and queues a `CollectionChanged` notice for the
//! affected environment after each accepted request.

use super::events::{
    CollectionChanged, CreateVariableRequest, DeleteVariableRequest, OutboundEvent,
    VariableStateChange,
};
use super::VariablesPort;
use crate::error::{StoreError, StoreResult, VarsError};
use crate::variables_model::{DEFAULT_ENVIRONMENT, NewVariable, Variable, VariableId};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Seed file layout: environment name to its variables.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct SeedFile(BTreeMap<String, Vec<NewVariable>>);

pub struct MemoryStore {
    environments: BTreeMap<String, Vec<Variable>>,
    events: Vec<OutboundEvent>,
    pending: Vec<CollectionChanged>,
    offline: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        let mut environments = BTreeMap::new();
        environments.insert(DEFAULT_ENVIRONMENT.to_string(), Vec::new());
        Self {
            environments,
            events: Vec::new(),
            pending: Vec::new(),
            offline: false,
        }
    }

    /// Loads a JSON seed of the form `{"default": [{"name": .., "value": ..}], ..}`.
    pub fn from_seed_file(path: &Path) -> Result<Self, VarsError> {
        let content = fs::read_to_string(path)?;
        let seed: SeedFile = serde_json::from_str(&content).map_err(|source| VarsError::Seed {
            path: path.to_path_buf(),
            source,
        })?;

        let mut store = Self::new();
        for (environment, variables) in seed.0 {
            for variable in variables {
                store.insert(&environment, variable);
            }
        }
        info!(
            seed = %path.display(),
            environments = store.environments.len(),
            "Loaded variables seed"
        );
        Ok(store)
    }

    /// Adds a variable directly, without recording an outbound event.
    pub fn insert(&mut self, environment: &str, variable: NewVariable) -> VariableId {
        let id = Self::next_id();
        self.environments
            .entry(environment.to_string())
            .or_default()
            .push(variable.into_variable(id.clone()));
        id
    }

    /// Every accepted event so far, oldest first. Requests rejected as
    /// offline, for an unknown target or with a mismatched value are not recorded.
    pub fn events(&self) -> &[OutboundEvent] {
        &self.events
    }

    /// While offline every request is rejected and nothing is recorded.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    fn next_id() -> VariableId {
        VariableId::new(Uuid::new_v4().to_string())
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline {
            warn!("Store is offline, request rejected");
            return Err(StoreError::Rejected("store is offline".to_string()));
        }
        Ok(())
    }

    fn record(&mut self, event: OutboundEvent) {
        match serde_json::to_string(&event) {
            Ok(payload) => info!(event = event.name(), %payload, "Outbound event"),
            Err(e) => warn!(event = event.name(), error = %e, "Could not serialize event"),
        }
        self.events.push(event);
    }

    fn locate(&self, id: &VariableId) -> Option<(String, usize)> {
        self.environments.iter().find_map(|(name, vars)| {
            vars.iter()
                .position(|v| &v.id == id)
                .map(|index| (name.clone(), index))
        })
    }

    fn notify(&mut self, environment: &str) {
        let variables = self.environments.get(environment).cloned().unwrap_or_default();
        debug!(environment, count = variables.len(), "Collection changed");
        self.pending.push(CollectionChanged {
            environment: environment.to_string(),
            variables,
        });
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VariablesPort for MemoryStore {
    fn create_variable(&mut self, request: &CreateVariableRequest) -> StoreResult<Option<VariableId>> {
        self.check_online()?;
        if request.environment.is_empty() {
            return Err(StoreError::UnknownEnvironment(String::new()));
        }
        self.record(OutboundEvent::CreateVariableRequest(request.clone()));
        let id = self.insert(&request.environment, NewVariable::default());
        self.notify(&request.environment);
        Ok(Some(id))
    }

    fn update_variable_state(&mut self, change: &VariableStateChange) -> StoreResult<()> {
        self.check_online()?;
        let (environment, index) = self
            .locate(&change.id)
            .ok_or_else(|| StoreError::UnknownVariable(change.id.clone()))?;
        if let Some(variable) = self
            .environments
            .get_mut(&environment)
            .and_then(|vars| vars.get_mut(index))
        {
            if !variable.apply(change.field, &change.new_value) {
                return Err(StoreError::Rejected(format!(
                    "value does not match field {:?}",
                    change.field
                )));
            }
        }
        self.record(OutboundEvent::UpdateVariableState(change.clone()));
        self.notify(&environment);
        Ok(())
    }

    fn delete_variable(&mut self, request: &DeleteVariableRequest) -> StoreResult<()> {
        self.check_online()?;
        let (environment, index) = self
            .locate(&request.id)
            .ok_or_else(|| StoreError::UnknownVariable(request.id.clone()))?;
        self.record(OutboundEvent::DeleteVariableRequest(request.clone()));
        if let Some(vars) = self.environments.get_mut(&environment) {
            vars.remove(index);
        }
        self.notify(&environment);
        Ok(())
    }

    fn poll_changes(&mut self) -> Vec<CollectionChanged> {
        std::mem::take(&mut self.pending)
    }

    fn environments(&self) -> Vec<String> {
        self.environments.keys().cloned().collect()
    }

    fn variables(&self, environment: &str) -> StoreResult<Vec<Variable>> {
        self.environments
            .get(environment)
            .cloned()
            .ok_or_else(|| StoreError::UnknownEnvironment(environment.to_string()))
    }
}
