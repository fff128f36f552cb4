//! Row types of the three tables: components, electrolytes and the composition rows
//! linking them.
use crate::Chemistry::chemical::Chemical;
use crate::Chemistry::formula::MalformedFormula;
use serde::{Deserialize, Serialize};

pub type ComponentId = u64;
pub type ElectrolyteId = u64;

/// A registered component type, keyed by its canonical formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: ComponentId,
    pub formula: String,
    pub notes: String,
    pub molar_mass: f64,
    pub price: f64,
}

impl ComponentRecord {
    /// rebuilds the component type from the stored canonical formula
    pub fn to_chemical(&self) -> Result<Chemical, MalformedFormula> {
        Ok(Chemical::new(&self.formula)?
            .with_notes(&self.notes)
            .with_molar_mass(self.molar_mass)
            .with_price(self.price))
    }
}

/// Component row before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComponent {
    /// canonical formula
    pub formula: String,
    pub notes: String,
    pub molar_mass: f64,
    pub price: f64,
}

impl NewComponent {
    pub fn first_non_finite(&self) -> Option<(&'static str, f64)> {
        [("molar_mass", self.molar_mass), ("price", self.price)]
            .into_iter()
            .find(|(_, value)| !value.is_finite())
    }
}

impl From<&Chemical> for NewComponent {
    fn from(chemical: &Chemical) -> Self {
        NewComponent {
            formula: chemical.formula(),
            notes: chemical.notes.clone(),
            molar_mass: chemical.effective_molar_mass(),
            price: chemical.price.unwrap_or(0.0),
        }
    }
}

/// Measured physical properties of an electrolyte.
/// The first three are mandatory measurements, the rest are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElectrolyteAttributes {
    pub conductivity: f64,
    pub conduct_uncert_bound: f64,
    pub concent_uncert_bound: f64,
    pub density: Option<f64>,
    pub temperature: Option<f64>,
    pub viscosity: Option<f64>,
    pub v_window_low_bound: Option<f64>,
    pub v_window_high_bound: Option<f64>,
    pub surface_tension: Option<f64>,
}

impl ElectrolyteAttributes {
    pub fn new(conductivity: f64, conduct_uncert_bound: f64, concent_uncert_bound: f64) -> Self {
        ElectrolyteAttributes {
            conductivity,
            conduct_uncert_bound,
            concent_uncert_bound,
            ..Default::default()
        }
    }

    /// first value that is NaN or infinite; JSON cannot represent those
    pub fn first_non_finite(&self) -> Option<(&'static str, f64)> {
        let optional = [
            ("density", self.density),
            ("temperature", self.temperature),
            ("viscosity", self.viscosity),
            ("v_window_low_bound", self.v_window_low_bound),
            ("v_window_high_bound", self.v_window_high_bound),
            ("surface_tension", self.surface_tension),
        ];
        [
            ("conductivity", self.conductivity),
            ("conduct_uncert_bound", self.conduct_uncert_bound),
            ("concent_uncert_bound", self.concent_uncert_bound),
        ]
        .into_iter()
        .chain(
            optional
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| (name, v))),
        )
        .find(|(_, value)| !value.is_finite())
    }
}

/// One (component, amount) pair of an electrolyte
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositionRow {
    pub component_id: ComponentId,
    pub amount: f64,
}

/// A recorded electrolyte: its attributes and exactly the rows attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectrolyteRecord {
    pub id: ElectrolyteId,
    pub attributes: ElectrolyteAttributes,
    pub rows: Vec<CompositionRow>,
}

impl ElectrolyteRecord {
    pub fn amount_of(&self, component_id: ComponentId) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.component_id == component_id)
            .map(|row| row.amount)
    }
}
