//! Exact-set matching of a composition against recorded electrolytes.
//!
//! A record matches when it has a row with exactly the requested amount for every requested
//! component and no other rows. Amounts are compared with `==`, without tolerance: `1.0`
//! and `1.0000001` are different compositions.
use crate::Storage::records::{ComponentId, ElectrolyteId, ElectrolyteRecord};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Found(ElectrolyteId),
    NotFound,
    /// More than one record has the composition. The data is inconsistent and the
    /// caller has to decide; no candidate is picked.
    Ambiguous(Vec<ElectrolyteId>),
}

impl MatchResult {
    /// true for `Found` and `Ambiguous`
    pub fn exists(&self) -> bool {
        !matches!(self, MatchResult::NotFound)
    }

    /// every matching id
    pub fn ids(&self) -> Vec<ElectrolyteId> {
        match self {
            MatchResult::Found(id) => vec![*id],
            MatchResult::NotFound => Vec::new(),
            MatchResult::Ambiguous(ids) => ids.clone(),
        }
    }
}

/// true when `record` holds exactly `composition`
pub fn is_exact_match(composition: &HashMap<ComponentId, f64>, record: &ElectrolyteRecord) -> bool {
    record.rows.len() == composition.len()
        && composition
            .iter()
            .all(|(component_id, amount)| record.amount_of(*component_id) == Some(*amount))
}

/// Searches `existing` for records holding exactly `composition`.
pub fn find_match<'a, I>(composition: &HashMap<ComponentId, f64>, existing: I) -> MatchResult
where
    I: IntoIterator<Item = &'a ElectrolyteRecord>,
{
    let mut ids: Vec<ElectrolyteId> = existing
        .into_iter()
        .filter(|record| is_exact_match(composition, record))
        .map(|record| record.id)
        .collect();
    ids.sort_unstable();
    match ids.len() {
        0 => MatchResult::NotFound,
        1 => MatchResult::Found(ids[0]),
        _ => MatchResult::Ambiguous(ids),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Storage::records::{CompositionRow, ElectrolyteAttributes};

    const A: ComponentId = 1;
    const B: ComponentId = 2;
    const C: ComponentId = 3;

    fn record(id: ElectrolyteId, rows: &[(ComponentId, f64)]) -> ElectrolyteRecord {
        ElectrolyteRecord {
            id,
            attributes: ElectrolyteAttributes::default(),
            rows: rows
                .iter()
                .map(|&(component_id, amount)| CompositionRow {
                    component_id,
                    amount,
                })
                .collect(),
        }
    }

    fn composition(pairs: &[(ComponentId, f64)]) -> HashMap<ComponentId, f64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_exact_set_matching() {
        let existing = vec![record(7, &[(A, 1.0), (B, 2.0)])];

        assert_eq!(
            find_match(&composition(&[(A, 1.0), (B, 2.0)]), &existing),
            MatchResult::Found(7)
        );
        // subset
        assert_eq!(
            find_match(&composition(&[(A, 1.0)]), &existing),
            MatchResult::NotFound
        );
        // superset
        assert_eq!(
            find_match(&composition(&[(A, 1.0), (B, 2.0), (C, 3.0)]), &existing),
            MatchResult::NotFound
        );
        // amount mismatch
        assert_eq!(
            find_match(&composition(&[(A, 1.0), (B, 2.5)]), &existing),
            MatchResult::NotFound
        );
    }

    #[test]
    fn test_row_order_is_irrelevant() {
        let existing = vec![record(1, &[(B, 2.0), (A, 1.0)])];
        assert_eq!(
            find_match(&composition(&[(A, 1.0), (B, 2.0)]), &existing),
            MatchResult::Found(1)
        );
    }

    #[test]
    fn test_superset_record_is_excluded_among_candidates() {
        let existing = vec![
            record(1, &[(A, 1.0), (B, 2.0), (C, 0.5)]),
            record(2, &[(A, 1.0), (B, 2.0)]),
            record(3, &[(A, 1.0)]),
        ];
        assert_eq!(
            find_match(&composition(&[(A, 1.0), (B, 2.0)]), &existing),
            MatchResult::Found(2)
        );
        assert_eq!(
            find_match(&composition(&[(A, 1.0)]), &existing),
            MatchResult::Found(3)
        );
    }

    #[test]
    fn test_no_tolerance_on_amounts() {
        let existing = vec![record(1, &[(A, 0.1 + 0.2)])];
        assert_eq!(
            find_match(&composition(&[(A, 0.3)]), &existing),
            MatchResult::NotFound
        );
        assert_eq!(
            find_match(&composition(&[(A, 0.1 + 0.2)]), &existing),
            MatchResult::Found(1)
        );
    }

    #[test]
    fn test_duplicates_are_reported_as_ambiguous() {
        let existing = vec![
            record(4, &[(A, 1.0), (B, 2.0)]),
            record(2, &[(B, 2.0), (A, 1.0)]),
            record(3, &[(A, 1.0), (B, 3.0)]),
        ];
        let result = find_match(&composition(&[(A, 1.0), (B, 2.0)]), &existing);
        assert_eq!(result, MatchResult::Ambiguous(vec![2, 4]));
        assert!(result.exists());
        assert_eq!(result.ids(), vec![2, 4]);
        assert!(!MatchResult::NotFound.exists());
    }

    #[test]
    fn test_empty_collection() {
        let existing: Vec<ElectrolyteRecord> = Vec::new();
        assert_eq!(
            find_match(&composition(&[(A, 1.0)]), &existing),
            MatchResult::NotFound
        );
    }
}
