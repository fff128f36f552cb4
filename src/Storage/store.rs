use crate::Storage::json_store::JsonFileStore;
use crate::Storage::memory_store::MemoryStore;
use crate::Storage::records::{
    ComponentId, ComponentRecord, CompositionRow, ElectrolyteAttributes, ElectrolyteId,
    ElectrolyteRecord, NewComponent,
};
use crate::settings::DbConfig;
use enum_dispatch::enum_dispatch;
use thiserror::Error;

/// error types of the persistence layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown store backend '{0}', expected 'memory' or 'json'")]
    UnknownBackend(String),
    #[error("component {component_id} appears more than once in one electrolyte")]
    DuplicateRow { component_id: ComponentId },
    #[error("component {component_id} is not registered")]
    MissingComponent { component_id: ComponentId },
}

/// outcome of an insert-if-absent on the components table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentInsert {
    Inserted(ComponentId),
    AlreadyPresent(ComponentId),
}

/// Persistence contract used by the registry.
///
/// Components are keyed by canonical formula. An electrolyte is written with all of its
/// composition rows in one call: either everything is stored or nothing is.
#[enum_dispatch]
pub trait CompositionStore {
    fn component_by_formula(&self, formula: &str) -> Result<Option<ComponentRecord>, StoreError>;
    fn component_by_id(&self, id: ComponentId) -> Result<Option<ComponentRecord>, StoreError>;
    /// all components in ascending id order
    fn components(&self) -> Result<Vec<ComponentRecord>, StoreError>;
    fn insert_component_if_absent(
        &mut self,
        component: NewComponent,
    ) -> Result<ComponentInsert, StoreError>;
    /// Removes a component. Electrolytes referencing it are left untouched.
    fn remove_component(&mut self, formula: &str) -> Result<Option<ComponentRecord>, StoreError>;
    /// all electrolytes in ascending id order
    fn electrolytes(&self) -> Result<Vec<ElectrolyteRecord>, StoreError>;
    fn electrolyte(&self, id: ElectrolyteId) -> Result<Option<ElectrolyteRecord>, StoreError>;
    /// Allocates the next electrolyte id and stores the record together with its rows.
    fn insert_electrolyte(
        &mut self,
        attributes: ElectrolyteAttributes,
        rows: Vec<CompositionRow>,
    ) -> Result<ElectrolyteId, StoreError>;
}

#[derive(Debug)]
#[enum_dispatch(CompositionStore)]
pub enum StoreEnum {
    Memory(MemoryStore),
    JsonFile(JsonFileStore),
}

/// builds the backend named in the configuration
pub fn create_store(config: &DbConfig) -> Result<StoreEnum, StoreError> {
    match config.store.as_str() {
        "memory" => Ok(StoreEnum::Memory(MemoryStore::new())),
        "json" => Ok(StoreEnum::JsonFile(JsonFileStore::open(
            &config.database_file,
        )?)),
        other => Err(StoreError::UnknownBackend(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_store_by_name() {
        let dir = tempdir().unwrap();
        let mut config = DbConfig::default();
        config.database_file = dir.path().join("db.json").to_str().unwrap().to_string();

        let store = create_store(&config).unwrap();
        assert!(matches!(store, StoreEnum::JsonFile(_)));

        config.store = "memory".to_string();
        let store = create_store(&config).unwrap();
        assert!(matches!(store, StoreEnum::Memory(_)));

        config.store = "sqlite".to_string();
        let err = create_store(&config).unwrap_err();
        assert!(matches!(err, StoreError::UnknownBackend(name) if name == "sqlite"));
    }

    #[test]
    fn test_dispatch_through_enum() {
        let mut store = StoreEnum::Memory(MemoryStore::new());
        let outcome = store
            .insert_component_if_absent(NewComponent {
                formula: "NaCl".to_string(),
                notes: String::new(),
                molar_mass: 58.44,
                price: 0.0,
            })
            .unwrap();
        assert_eq!(outcome, ComponentInsert::Inserted(1));
        assert_eq!(store.components().unwrap().len(), 1);
    }
}
