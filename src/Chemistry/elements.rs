/// Ordered whitelist of chemical elements.
///
/// The position of an element in [`ELEMENTS`] is its rank: canonical formulas are written
/// in ascending rank, which is the same as ascending atomic number.
use std::fmt;

/// Static data of one element of the periodic table
pub struct ElementData {
    symbol: &'static str,
    atomic_mass: f64,
}

impl ElementData {
    const fn new(symbol: &'static str, atomic_mass: f64) -> Self {
        ElementData {
            symbol,
            atomic_mass,
        }
    }
}

// standard atomic weights; for elements without stable isotopes the mass number
// of the longest-lived isotope is used
pub const ELEMENTS: &[ElementData] = &[
    ElementData::new("H", 1.008),
    ElementData::new("He", 4.0026),
    ElementData::new("Li", 6.94),
    ElementData::new("Be", 9.0122),
    ElementData::new("B", 10.81),
    ElementData::new("C", 12.011),
    ElementData::new("N", 14.007),
    ElementData::new("O", 15.999),
    ElementData::new("F", 18.998),
    ElementData::new("Ne", 20.18),
    ElementData::new("Na", 22.99),
    ElementData::new("Mg", 24.305),
    ElementData::new("Al", 26.982),
    ElementData::new("Si", 28.085),
    ElementData::new("P", 30.974),
    ElementData::new("S", 32.06),
    ElementData::new("Cl", 35.45),
    ElementData::new("Ar", 39.948),
    ElementData::new("K", 39.098),
    ElementData::new("Ca", 40.078),
    ElementData::new("Sc", 44.956),
    ElementData::new("Ti", 47.867),
    ElementData::new("V", 50.942),
    ElementData::new("Cr", 51.996),
    ElementData::new("Mn", 54.938),
    ElementData::new("Fe", 55.845),
    ElementData::new("Co", 58.933),
    ElementData::new("Ni", 58.693),
    ElementData::new("Cu", 63.546),
    ElementData::new("Zn", 65.38),
    ElementData::new("Ga", 69.723),
    ElementData::new("Ge", 72.63),
    ElementData::new("As", 74.922),
    ElementData::new("Se", 78.971),
    ElementData::new("Br", 79.904),
    ElementData::new("Kr", 83.798),
    ElementData::new("Rb", 85.468),
    ElementData::new("Sr", 87.62),
    ElementData::new("Y", 88.906),
    ElementData::new("Zr", 91.224),
    ElementData::new("Nb", 92.906),
    ElementData::new("Mo", 95.95),
    ElementData::new("Tc", 98.0),
    ElementData::new("Ru", 101.07),
    ElementData::new("Rh", 102.91),
    ElementData::new("Pd", 106.42),
    ElementData::new("Ag", 107.87),
    ElementData::new("Cd", 112.41),
    ElementData::new("In", 114.82),
    ElementData::new("Sn", 118.71),
    ElementData::new("Sb", 121.76),
    ElementData::new("Te", 127.6),
    ElementData::new("I", 126.9),
    ElementData::new("Xe", 131.29),
    ElementData::new("Cs", 132.91),
    ElementData::new("Ba", 137.33),
    ElementData::new("La", 138.91),
    ElementData::new("Ce", 140.12),
    ElementData::new("Pr", 140.91),
    ElementData::new("Nd", 144.24),
    ElementData::new("Pm", 145.0),
    ElementData::new("Sm", 150.36),
    ElementData::new("Eu", 151.96),
    ElementData::new("Gd", 157.25),
    ElementData::new("Tb", 158.93),
    ElementData::new("Dy", 162.5),
    ElementData::new("Ho", 164.93),
    ElementData::new("Er", 167.26),
    ElementData::new("Tm", 168.93),
    ElementData::new("Yb", 173.05),
    ElementData::new("Lu", 174.97),
    ElementData::new("Hf", 178.49),
    ElementData::new("Ta", 180.95),
    ElementData::new("W", 183.84),
    ElementData::new("Re", 186.21),
    ElementData::new("Os", 190.23),
    ElementData::new("Ir", 192.22),
    ElementData::new("Pt", 195.08),
    ElementData::new("Au", 196.97),
    ElementData::new("Hg", 200.59),
    ElementData::new("Tl", 204.38),
    ElementData::new("Pb", 207.2),
    ElementData::new("Bi", 208.98),
    ElementData::new("Po", 209.0),
    ElementData::new("At", 210.0),
    ElementData::new("Rn", 222.0),
    ElementData::new("Fr", 223.0),
    ElementData::new("Ra", 226.0),
    ElementData::new("Ac", 227.0),
    ElementData::new("Th", 232.04),
    ElementData::new("Pa", 231.04),
    ElementData::new("U", 238.03),
    ElementData::new("Np", 237.0),
    ElementData::new("Pu", 244.0),
    ElementData::new("Am", 243.0),
    ElementData::new("Cm", 247.0),
    ElementData::new("Bk", 247.0),
    ElementData::new("Cf", 251.0),
    ElementData::new("Es", 252.0),
    ElementData::new("Fm", 257.0),
    ElementData::new("Md", 258.0),
    ElementData::new("No", 259.0),
    ElementData::new("Lr", 266.0),
    ElementData::new("Rf", 267.0),
    ElementData::new("Db", 268.0),
    ElementData::new("Sg", 269.0),
    ElementData::new("Bh", 270.0),
    ElementData::new("Hs", 277.0),
    ElementData::new("Mt", 278.0),
    ElementData::new("Ds", 281.0),
    ElementData::new("Rg", 282.0),
    ElementData::new("Cn", 285.0),
    ElementData::new("Nh", 286.0),
    ElementData::new("Fl", 289.0),
    ElementData::new("Mc", 290.0),
    ElementData::new("Lv", 293.0),
    ElementData::new("Ts", 294.0),
    ElementData::new("Og", 294.0),
];

/// A whitelisted element, represented by its rank in [`ELEMENTS`].
///
/// Ordering of `Element` values is rank order, so any ordered collection keyed by
/// `Element` iterates in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Element(u8);

impl Element {
    /// Looks up a symbol in the whitelist. Symbols are case-sensitive: "Na" is sodium,
    /// "NA" and "na" are not elements.
    pub fn from_symbol(symbol: &str) -> Option<Element> {
        ELEMENTS
            .iter()
            .position(|e| e.symbol == symbol)
            .map(|rank| Element(rank as u8))
    }

    pub fn rank(&self) -> usize {
        self.0 as usize
    }

    pub fn atomic_number(&self) -> usize {
        self.rank() + 1
    }

    pub fn symbol(&self) -> &'static str {
        ELEMENTS[self.rank()].symbol
    }

    pub fn atomic_mass(&self) -> f64 {
        ELEMENTS[self.rank()].atomic_mass
    }

    /// all elements in rank order
    pub fn all() -> impl Iterator<Item = Element> {
        (0..ELEMENTS.len()).map(|rank| Element(rank as u8))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_whitelist_is_complete_and_unique() {
        assert_eq!(ELEMENTS.len(), 118);
        let symbols: HashSet<&str> = ELEMENTS.iter().map(|e| e.symbol).collect();
        assert_eq!(symbols.len(), 118);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let sodium = Element::from_symbol("Na").unwrap();
        assert_eq!(sodium.atomic_number(), 11);
        assert_eq!(sodium.symbol(), "Na");
        assert!(Element::from_symbol("NA").is_none());
        assert!(Element::from_symbol("na").is_none());
        assert!(Element::from_symbol("Xx").is_none());
    }

    #[test]
    fn test_rank_follows_atomic_number() {
        let nitrogen = Element::from_symbol("N").unwrap();
        let sodium = Element::from_symbol("Na").unwrap();
        let oganesson = Element::from_symbol("Og").unwrap();
        assert!(nitrogen < sodium);
        assert!(sodium < oganesson);
        assert_eq!(oganesson.atomic_number(), 118);
        assert_eq!(Element::from_symbol("Po").unwrap().atomic_number(), 84);
        assert_eq!(Element::from_symbol("Th").unwrap().atomic_number(), 90);
        assert_eq!(Element::all().count(), 118);
    }
}
