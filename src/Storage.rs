/// Row types of the components, electrolytes and composition tables
pub mod records;
/// The persistence contract (`CompositionStore`) and backend selection.
///
///  # Examples
/// ```
/// use ElectroBase::Storage::memory_store::MemoryStore;
/// use ElectroBase::Storage::records::NewComponent;
/// use ElectroBase::Storage::store::{ComponentInsert, CompositionStore};
/// let mut store = MemoryStore::new();
/// let salt = NewComponent {
///     formula: "NaCl".to_string(),
///     notes: String::new(),
///     molar_mass: 58.44,
///     price: 0.0,
/// };
/// assert_eq!(store.insert_component_if_absent(salt.clone()).unwrap(), ComponentInsert::Inserted(1));
/// assert_eq!(store.insert_component_if_absent(salt).unwrap(), ComponentInsert::AlreadyPresent(1));
/// ```
pub mod store;
/// in-process tables
pub mod memory_store;
/// tables persisted to a JSON file
pub mod json_store;
