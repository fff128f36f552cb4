//! # Electrolyte registry
//!
//! ## Aim
//! Keeps the lookup table of component types and the recorded electrolytes consistent:
//! components are unique by canonical formula and no two electrolytes share a composition.
//!
//! ## Main Data Structures and Logic
//! - `ElectrolyteRegistry<S>`: owns a `CompositionStore` behind a `Mutex`. Every public
//!   operation is one lock scope, so the duplicate check and the insertion done by
//!   `register_electrolyte` happen as one unit even when callers race on the same composition.
//! - `Composition`: raw formula -> amount as typed by the user. Formulas are canonicalized
//!   before anything is compared, so `{"ClNa": 1.0}` and `{"NaCl": 1.0}` are the same request.
//!
//! ## Key Methods
//! - `register_component()`: insert-if-absent by canonical formula
//! - `find_electrolyte_by_composition()`: exact-set lookup, see `matcher`
//! - `register_electrolyte()`: duplicate check, component resolution, insertion
//! - `get_components_by_id()`: formula -> amount of one electrolyte
//!
//! ## Usage
//! ```
//! use ElectroBase::Chemistry::chemical::Chemical;
//! use ElectroBase::Electrolytes::matcher::MatchResult;
//! use ElectroBase::Electrolytes::registry::{Composition, ElectrolyteRegistry};
//! use ElectroBase::Storage::memory_store::MemoryStore;
//! use ElectroBase::Storage::records::ElectrolyteAttributes;
//!
//! let registry = ElectrolyteRegistry::new(MemoryStore::new());
//! registry.register_component(&Chemical::new("LiPF6").unwrap()).unwrap();
//! registry.register_component(&Chemical::new("C3H4O3").unwrap()).unwrap();
//!
//! let composition = Composition::from([("LiPF6".to_string(), 1.0), ("C3H4O3".to_string(), 10.0)]);
//! let id = registry
//!     .register_electrolyte(&composition, ElectrolyteAttributes::new(10.7, 0.2, 0.01))
//!     .unwrap();
//! assert_eq!(registry.find_electrolyte_by_composition(&composition).unwrap(), MatchResult::Found(id));
//! assert!(registry.register_electrolyte(&composition, ElectrolyteAttributes::default()).is_err());
//! ```
use crate::Chemistry::chemical::Chemical;
use crate::Chemistry::formula::{MalformedFormula, canonicalize};
use crate::Electrolytes::matcher::{MatchResult, find_match};
use crate::Storage::records::{
    ComponentId, ComponentRecord, CompositionRow, ElectrolyteAttributes, ElectrolyteId,
    ElectrolyteRecord, NewComponent,
};
use crate::Storage::store::{ComponentInsert, CompositionStore, StoreError};
use log::{debug, error, info, warn};
use prettytable::{Cell, Row, Table, row};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

/// raw formula -> amount
pub type Composition = HashMap<String, f64>;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Malformed(#[from] MalformedFormula),
    #[error("no component registered for formula '{formula}'")]
    UnknownComponent { formula: String },
    #[error("an electrolyte with the same composition already exists (id(s) {ids:?})")]
    DuplicateComposition { ids: Vec<ElectrolyteId> },
    #[error("component '{formula}' is listed more than once")]
    RepeatedComponent { formula: String },
    #[error("composition is empty")]
    EmptyComposition,
    #[error("amount {amount} of '{formula}' is not a finite number")]
    InvalidAmount { formula: String, amount: f64 },
    #[error("{name} = {value} is not a finite number")]
    InvalidAttribute { name: &'static str, value: f64 },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("registry lock poisoned by a panicked thread")]
    Poisoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentRegistration {
    Registered(ComponentId),
    /// the canonical formula was already known; nothing was written
    AlreadyRegistered(ComponentId),
}

impl ComponentRegistration {
    pub fn id(&self) -> ComponentId {
        match self {
            ComponentRegistration::Registered(id) | ComponentRegistration::AlreadyRegistered(id) => {
                *id
            }
        }
    }
}

/// composition lines after canonicalization, sorted by canonical formula
struct CanonicalEntry {
    formula: String,
    amount: f64,
}

enum Resolved {
    Rows(Vec<CompositionRow>),
    /// first formula without a registered component
    Missing(String),
}

pub struct ElectrolyteRegistry<S: CompositionStore> {
    store: Mutex<S>,
}

impl<S: CompositionStore> ElectrolyteRegistry<S> {
    pub fn new(store: S) -> Self {
        ElectrolyteRegistry {
            store: Mutex::new(store),
        }
    }

    pub fn into_store(self) -> Result<S, RegistryError> {
        self.store.into_inner().map_err(|_| RegistryError::Poisoned)
    }

    fn lock(&self) -> Result<MutexGuard<'_, S>, RegistryError> {
        self.store.lock().map_err(|_| RegistryError::Poisoned)
    }

    ////////////////////////////////COMPONENTS//////////////////////////////////////
    /// Adds a component type. Re-registering a known canonical formula changes nothing and
    /// reports the id already holding it.
    pub fn register_component(
        &self,
        chemical: &Chemical,
    ) -> Result<ComponentRegistration, RegistryError> {
        let component = NewComponent::from(chemical);
        if let Some((name, value)) = component.first_non_finite() {
            return Err(RegistryError::InvalidAttribute { name, value });
        }
        let mut store = self.lock()?;
        match store.insert_component_if_absent(component)? {
            ComponentInsert::Inserted(id) => {
                info!("component {} registered with id {}", chemical, id);
                Ok(ComponentRegistration::Registered(id))
            }
            ComponentInsert::AlreadyPresent(id) => {
                warn!(
                    "component with formula {} already in database (id {})",
                    chemical, id
                );
                Ok(ComponentRegistration::AlreadyRegistered(id))
            }
        }
    }

    /// component record for any spelling of its formula
    pub fn get_component(&self, formula: &str) -> Result<Option<ComponentRecord>, RegistryError> {
        let canonical = canonicalize(formula)?;
        let store = self.lock()?;
        let found = store.component_by_formula(&canonical)?;
        if found.is_none() {
            info!("no components found for formula {}", formula);
        }
        Ok(found)
    }

    /// Deletes a component type. Electrolytes that use it keep their rows.
    pub fn remove_component(
        &self,
        formula: &str,
    ) -> Result<Option<ComponentRecord>, RegistryError> {
        let canonical = canonicalize(formula)?;
        let mut store = self.lock()?;
        let removed = store.remove_component(&canonical)?;
        match &removed {
            Some(record) => info!("deleted component {} (id {})", record.formula, record.id),
            None => info!("no components found for formula {}", formula),
        }
        Ok(removed)
    }

    pub fn components(&self) -> Result<Vec<ComponentRecord>, RegistryError> {
        Ok(self.lock()?.components()?)
    }

    ////////////////////////////////ELECTROLYTES//////////////////////////////////////
    pub fn electrolytes(&self) -> Result<Vec<ElectrolyteRecord>, RegistryError> {
        Ok(self.lock()?.electrolytes()?)
    }

    pub fn electrolyte(&self, id: ElectrolyteId) -> Result<Option<ElectrolyteRecord>, RegistryError> {
        Ok(self.lock()?.electrolyte(id)?)
    }

    /// Looks up the electrolyte with exactly this composition.
    /// A formula that is not a registered component cannot be part of any record, so the
    /// answer is `NotFound` rather than an error.
    pub fn find_electrolyte_by_composition(
        &self,
        composition: &Composition,
    ) -> Result<MatchResult, RegistryError> {
        let entries = canonical_entries(composition)?;
        let store = self.lock()?;
        let rows = match resolve(&*store, &entries)? {
            Resolved::Rows(rows) => rows,
            Resolved::Missing(formula) => {
                debug!("component {} is not registered, no electrolyte can match", formula);
                return Ok(MatchResult::NotFound);
            }
        };
        let result = find_match(&rows_to_map(&rows), &store.electrolytes()?);
        if let MatchResult::Ambiguous(ids) = &result {
            warn!(
                "{} electrolytes (ids {:?}) share the composition {:?}",
                ids.len(),
                ids,
                composition
            );
        }
        Ok(result)
    }

    /// true when at least one electrolyte has exactly this composition
    pub fn electrolyte_exists(&self, composition: &Composition) -> Result<bool, RegistryError> {
        Ok(self.find_electrolyte_by_composition(composition)?.exists())
    }

    /// Records a new electrolyte.
    ///
    /// Fails with `DuplicateComposition` when the composition is already recorded (once or,
    /// for inconsistent data, several times) and with `UnknownComponent` when a formula has
    /// no registered component. Nothing is written in either case.
    pub fn register_electrolyte(
        &self,
        composition: &Composition,
        attributes: ElectrolyteAttributes,
    ) -> Result<ElectrolyteId, RegistryError> {
        let entries = canonical_entries(composition)?;
        if let Some((name, value)) = attributes.first_non_finite() {
            return Err(RegistryError::InvalidAttribute { name, value });
        }
        let mut store = self.lock()?;
        let existing = store.electrolytes()?;
        let rows = match resolve(&*store, &entries)? {
            Resolved::Rows(rows) => rows,
            Resolved::Missing(formula) => {
                return Err(RegistryError::UnknownComponent { formula });
            }
        };
        match find_match(&rows_to_map(&rows), &existing) {
            MatchResult::NotFound => {}
            MatchResult::Found(id) => {
                return Err(RegistryError::DuplicateComposition { ids: vec![id] });
            }
            MatchResult::Ambiguous(ids) => {
                error!(
                    "{} total duplicate electrolytes found with composition {:?}",
                    ids.len(),
                    composition
                );
                return Err(RegistryError::DuplicateComposition { ids });
            }
        }

        let twins: Vec<ElectrolyteId> = existing
            .iter()
            .filter(|record| record.attributes == attributes)
            .map(|record| record.id)
            .collect();
        if !twins.is_empty() {
            warn!(
                "electrolytes with id(s) {:?} have exactly identical attributes",
                twins
            );
        }

        let id = store.insert_electrolyte(attributes, rows)?;
        info!("electrolyte {} registered with {} components", id, entries.len());
        Ok(id)
    }

    /// canonical formula -> amount for one electrolyte, `None` if the id is unknown
    pub fn get_components_by_id(
        &self,
        id: ElectrolyteId,
    ) -> Result<Option<BTreeMap<String, f64>>, RegistryError> {
        let store = self.lock()?;
        let Some(record) = store.electrolyte(id)? else {
            return Ok(None);
        };
        let mut components = BTreeMap::new();
        for row in &record.rows {
            match store.component_by_id(row.component_id)? {
                Some(component) => {
                    components.insert(component.formula, row.amount);
                }
                None => warn!(
                    "electrolyte {} references removed component {}",
                    id, row.component_id
                ),
            }
        }
        Ok(Some(components))
    }

    ////////////////////////////////TABLES//////////////////////////////////////
    pub fn components_table(&self) -> Result<Table, RegistryError> {
        let mut table = Table::new();
        table.add_row(row!["id", "formula", "notes", "molar mass", "price"]);
        for component in self.components()? {
            table.add_row(Row::new(vec![
                Cell::new(&component.id.to_string()),
                Cell::new(&component.formula),
                Cell::new(&component.notes),
                Cell::new(&format!("{:.4}", component.molar_mass)),
                Cell::new(&component.price.to_string()),
            ]));
        }
        Ok(table)
    }

    pub fn electrolytes_table(&self) -> Result<Table, RegistryError> {
        let store = self.lock()?;
        let mut table = Table::new();
        table.add_row(row![
            "id",
            "composition",
            "conductivity",
            "conduct. uncert.",
            "concent. uncert.",
            "density",
            "T",
            "viscosity",
            "V window",
            "surface tension"
        ]);
        for record in store.electrolytes()? {
            let mut parts = Vec::new();
            for row in &record.rows {
                let formula = store
                    .component_by_id(row.component_id)?
                    .map(|c| c.formula)
                    .unwrap_or_else(|| format!("#{}", row.component_id));
                parts.push(format!("{} {}", formula, row.amount));
            }
            let a = &record.attributes;
            table.add_row(Row::new(vec![
                Cell::new(&record.id.to_string()),
                Cell::new(&parts.join(", ")),
                Cell::new(&a.conductivity.to_string()),
                Cell::new(&a.conduct_uncert_bound.to_string()),
                Cell::new(&a.concent_uncert_bound.to_string()),
                Cell::new(&optional(a.density)),
                Cell::new(&optional(a.temperature)),
                Cell::new(&optional(a.viscosity)),
                Cell::new(&format!(
                    "{} .. {}",
                    optional(a.v_window_low_bound),
                    optional(a.v_window_high_bound)
                )),
                Cell::new(&optional(a.surface_tension)),
            ]));
        }
        Ok(table)
    }

    pub fn print_components_table(&self) -> Result<(), RegistryError> {
        println!("____________________COMPONENTS_________________________");
        self.components_table()?.printstd();
        Ok(())
    }

    pub fn print_electrolytes_table(&self) -> Result<(), RegistryError> {
        println!("____________________ELECTROLYTES_________________________");
        self.electrolytes_table()?.printstd();
        Ok(())
    }
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// canonicalizes every formula and checks amounts; the result is sorted by formula
fn canonical_entries(composition: &Composition) -> Result<Vec<CanonicalEntry>, RegistryError> {
    if composition.is_empty() {
        return Err(RegistryError::EmptyComposition);
    }
    let mut raw: Vec<(&String, &f64)> = composition.iter().collect();
    raw.sort_by(|a, b| a.0.cmp(b.0));

    let mut by_formula: BTreeMap<String, f64> = BTreeMap::new();
    for (formula, &amount) in raw {
        if !amount.is_finite() {
            return Err(RegistryError::InvalidAmount {
                formula: formula.clone(),
                amount,
            });
        }
        let canonical = canonicalize(formula)?;
        if by_formula.insert(canonical.clone(), amount).is_some() {
            return Err(RegistryError::RepeatedComponent { formula: canonical });
        }
    }
    Ok(by_formula
        .into_iter()
        .map(|(formula, amount)| CanonicalEntry { formula, amount })
        .collect())
}

fn resolve<S: CompositionStore>(
    store: &S,
    entries: &[CanonicalEntry],
) -> Result<Resolved, StoreError> {
    let mut rows = Vec::with_capacity(entries.len());
    for entry in entries {
        match store.component_by_formula(&entry.formula)? {
            Some(component) => rows.push(CompositionRow {
                component_id: component.id,
                amount: entry.amount,
            }),
            None => return Ok(Resolved::Missing(entry.formula.clone())),
        }
    }
    Ok(Resolved::Rows(rows))
}

fn rows_to_map(rows: &[CompositionRow]) -> HashMap<ComponentId, f64> {
    rows.iter().map(|row| (row.component_id, row.amount)).collect()
}
