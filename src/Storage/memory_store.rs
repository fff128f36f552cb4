use crate::Storage::records::{
    ComponentId, ComponentRecord, CompositionRow, ElectrolyteAttributes, ElectrolyteId,
    ElectrolyteRecord, NewComponent,
};
use crate::Storage::store::{ComponentInsert, CompositionStore, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// The three tables of the database. Ids start at 1 and are never reused.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tables {
    components: BTreeMap<ComponentId, ComponentRecord>,
    electrolytes: BTreeMap<ElectrolyteId, ElectrolyteRecord>,
    last_component_id: ComponentId,
    last_electrolyte_id: ElectrolyteId,
    /// canonical formula -> component id; derived from `components`, not persisted
    #[serde(skip)]
    by_formula: BTreeMap<String, ComponentId>,
}

impl Tables {
    /// Makes deserialized tables consistent: rebuilds the formula index and moves the id
    /// counters past every stored id, so new rows never land on existing ones.
    pub fn restore_after_load(&mut self) {
        self.by_formula = self
            .components
            .values()
            .map(|c| (c.formula.clone(), c.id))
            .collect();
        if let Some(&max) = self.components.keys().next_back() {
            self.last_component_id = self.last_component_id.max(max);
        }
        if let Some(&max) = self.electrolytes.keys().next_back() {
            self.last_electrolyte_id = self.last_electrolyte_id.max(max);
        }
    }

    pub fn component_by_formula(&self, formula: &str) -> Option<&ComponentRecord> {
        self.by_formula
            .get(formula)
            .and_then(|id| self.components.get(id))
    }

    pub fn component_by_id(&self, id: ComponentId) -> Option<&ComponentRecord> {
        self.components.get(&id)
    }

    pub fn components(&self) -> impl Iterator<Item = &ComponentRecord> {
        self.components.values()
    }

    pub fn electrolytes(&self) -> impl Iterator<Item = &ElectrolyteRecord> {
        self.electrolytes.values()
    }

    pub fn electrolyte(&self, id: ElectrolyteId) -> Option<&ElectrolyteRecord> {
        self.electrolytes.get(&id)
    }

    pub fn insert_component_if_absent(&mut self, component: NewComponent) -> ComponentInsert {
        if let Some(existing) = self.component_by_formula(&component.formula) {
            return ComponentInsert::AlreadyPresent(existing.id);
        }
        self.last_component_id += 1;
        let id = self.last_component_id;
        self.by_formula.insert(component.formula.clone(), id);
        self.components.insert(
            id,
            ComponentRecord {
                id,
                formula: component.formula,
                notes: component.notes,
                molar_mass: component.molar_mass,
                price: component.price,
            },
        );
        ComponentInsert::Inserted(id)
    }

    pub fn remove_component(&mut self, formula: &str) -> Option<ComponentRecord> {
        let id = self.by_formula.remove(formula)?;
        self.components.remove(&id)
    }

    /// rows are validated before anything is written
    pub fn insert_electrolyte(
        &mut self,
        attributes: ElectrolyteAttributes,
        rows: Vec<CompositionRow>,
    ) -> Result<ElectrolyteId, StoreError> {
        let mut seen = HashSet::new();
        for row in &rows {
            if !self.components.contains_key(&row.component_id) {
                return Err(StoreError::MissingComponent {
                    component_id: row.component_id,
                });
            }
            if !seen.insert(row.component_id) {
                return Err(StoreError::DuplicateRow {
                    component_id: row.component_id,
                });
            }
        }
        self.last_electrolyte_id += 1;
        let id = self.last_electrolyte_id;
        self.electrolytes.insert(
            id,
            ElectrolyteRecord {
                id,
                attributes,
                rows,
            },
        );
        Ok(id)
    }
}

/// In-process store; contents live as long as the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Tables,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }
}

impl CompositionStore for MemoryStore {
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
        Ok(self.tables.insert_component_if_absent(component))
    }

    fn remove_component(&mut self, formula: &str) -> Result<Option<ComponentRecord>, StoreError> {
        Ok(self.tables.remove_component(formula))
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
        self.tables.insert_electrolyte(attributes, rows)
    }
}
