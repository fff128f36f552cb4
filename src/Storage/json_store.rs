//! # JSON file store
//!
//! Keeps the tables in memory and writes a full snapshot after every change. The snapshot is
//! written to `<file>.tmp` and renamed over the database file, so a reader never sees a half
//! written database. If writing fails the in-memory change is rolled back and the error is
//! returned: a failed insertion is never visible to later lookups.
use crate::Storage::memory_store::Tables;
use crate::Storage::records::{
    ComponentId, ComponentRecord, CompositionRow, ElectrolyteAttributes, ElectrolyteId,
    ElectrolyteRecord, NewComponent,
};
use crate::Storage::store::{ComponentInsert, CompositionStore, StoreError};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    tables: Tables,
}

impl JsonFileStore {
    /// Opens the database file; a missing file is an empty database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let tables = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut tables: Tables = serde_json::from_str(&content)?;
            tables.restore_after_load();
            info!("loaded database from '{}'", path.display());
            tables
        } else {
            info!(
                "database file '{}' does not exist, starting empty",
                path.display()
            );
            Tables::default()
        };
        Ok(JsonFileStore { path, tables })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), StoreError> {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        let content = serde_json::to_string_pretty(&self.tables)?;
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// applies a change and persists it, restoring the previous tables on failure
    fn commit<T, F>(&mut self, change: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Tables) -> Result<T, StoreError>,
    {
        let snapshot = self.tables.clone();
        let outcome = change(&mut self.tables).and_then(|value| {
            self.save()?;
            Ok(value)
        });
        if outcome.is_err() {
            self.tables = snapshot;
        }
        outcome
    }
}

impl CompositionStore for JsonFileStore {
    fn component_by_formula(&self, formula: &str) -> Result<Option<ComponentRecord>, StoreError> {
        Ok(self.tables.component_by_formula(formula).cloned())
    }

    fn component_by_id(&self, id: ComponentId) -> Result<Option<ComponentRecord>, StoreError> {
        Ok(self.tables.component_by_id(id).cloned())
    }

    fn components(&self) -> Result<Vec<ComponentRecord>, StoreError> {
        Ok(self.tables.components().cloned().collect())
    }

    fn insert_component_if_absent(
        &mut self,
        component: NewComponent,
    ) -> Result<ComponentInsert, StoreError> {
        if let Some(existing) = self.tables.component_by_formula(&component.formula) {
            return Ok(ComponentInsert::AlreadyPresent(existing.id));
        }
        self.commit(|tables| Ok(tables.insert_component_if_absent(component)))
    }

    fn remove_component(&mut self, formula: &str) -> Result<Option<ComponentRecord>, StoreError> {
        if self.tables.component_by_formula(formula).is_none() {
            return Ok(None);
        }
        self.commit(|tables| Ok(tables.remove_component(formula)))
    }

    fn electrolytes(&self) -> Result<Vec<ElectrolyteRecord>, StoreError> {
        Ok(self.tables.electrolytes().cloned().collect())
    }

    fn electrolyte(&self, id: ElectrolyteId) -> Result<Option<ElectrolyteRecord>, StoreError> {
        Ok(self.tables.electrolyte(id).cloned())
    }

    fn insert_electrolyte(
        &mut self,
        attributes: ElectrolyteAttributes,
        rows: Vec<CompositionRow>,
    ) -> Result<ElectrolyteId, StoreError> {
        self.commit(|tables| tables.insert_electrolyte(attributes, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn component(formula: &str) -> NewComponent {
        NewComponent {
            formula: formula.to_string(),
            notes: "test".to_string(),
            molar_mass: 10.0,
            price: 1.5,
        }
    }

    #[test]
    fn test_missing_file_is_empty_database() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("db.json")).unwrap();
        assert!(store.components().unwrap().is_empty());
        assert!(store.electrolytes().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_reopen_keeps_tables() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.insert_component_if_absent(component("NaCl")).unwrap();
            store.insert_component_if_absent(component("H2O")).unwrap();
            let rows = vec![
                CompositionRow {
                    component_id: 1,
                    amount: 0.5,
                },
                CompositionRow {
                    component_id: 2,
                    amount: 55.5,
                },
            ];
            let mut attributes = ElectrolyteAttributes::new(10.2, 0.1, 0.01);
            attributes.temperature = Some(298.15);
            store.insert_electrolyte(attributes, rows).unwrap();
        }
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.components().unwrap().len(), 2);
        let record = store.electrolyte(1).unwrap().unwrap();
        assert_eq!(record.attributes.temperature, Some(298.15));
        assert_eq!(record.attributes.density, None);
        assert_eq!(record.amount_of(2), Some(55.5));

        // ids continue after reopening
        let mut store = store;
        assert_eq!(
            store.insert_component_if_absent(component("KCl")).unwrap(),
            ComponentInsert::Inserted(3)
        );
    }

    #[test]
    fn test_failed_write_is_rolled_back() {
        let dir = tempdir().unwrap();
        // parent directory does not exist, so every save fails
        let path = dir.path().join("missing").join("db.json");
        let mut store = JsonFileStore::open(&path).unwrap();
        let err = store.insert_component_if_absent(component("NaCl")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(store.components().unwrap().is_empty());
        assert!(store.component_by_formula("NaCl").unwrap().is_none());
    }

    #[test]
    fn test_lagging_counter_does_not_overwrite_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        fs::write(
            &path,
            r#"{
                "components": {
                    "3": { "id": 3, "formula": "NaCl", "notes": "", "molar_mass": 58.44, "price": 0.0 }
                },
                "electrolytes": {},
                "last_component_id": 2,
                "last_electrolyte_id": 0
            }"#,
        )
        .unwrap();
        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            store.insert_component_if_absent(component("NaCl")).unwrap(),
            ComponentInsert::AlreadyPresent(3)
        );
        assert_eq!(
            store.insert_component_if_absent(component("KCl")).unwrap(),
            ComponentInsert::Inserted(4)
        );
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.component_by_id(3).unwrap().unwrap().formula, "NaCl");
        assert_eq!(store.component_by_formula("KCl").unwrap().unwrap().id, 4);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, "{ not json").unwrap();
        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }
}
