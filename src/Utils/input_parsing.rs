//! Turns what the user typed into the terminal into registry input.
use crate::Electrolytes::registry::Composition;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{formulas} formulas but {amounts} amounts")]
    LengthMismatch { formulas: usize, amounts: usize },
    #[error("'{0}' is not a number")]
    InvalidAmount(String),
}

/// Pairs a column of formulas with a column of amounts, both whitespace separated:
/// `("LiPF6 C3H4O3", "1.0 10")` -> `{LiPF6: 1.0, C3H4O3: 10.0}`.
/// A formula given twice keeps the last amount; the registry canonicalizes the formulas
/// and rejects spellings of one component given twice.
pub fn composition_from_columns(formulas: &str, amounts: &str) -> Result<Composition, InputError> {
    let formulas: Vec<&str> = formulas.split_whitespace().collect();
    let amounts = amounts
        .split_whitespace()
        .map(parse_amount)
        .collect::<Result<Vec<f64>, InputError>>()?;
    if formulas.len() != amounts.len() {
        return Err(InputError::LengthMismatch {
            formulas: formulas.len(),
            amounts: amounts.len(),
        });
    }
    Ok(formulas
        .into_iter()
        .map(str::to_string)
        .zip(amounts)
        .collect())
}

/// finite numbers only: "nan" and "inf" parse as `f64` but cannot be stored
pub fn parse_amount(token: &str) -> Result<f64, InputError> {
    let token = token.trim();
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InputError::InvalidAmount(token.to_string())),
    }
}

/// empty input means "not measured"
pub fn parse_optional_amount(token: &str) -> Result<Option<f64>, InputError> {
    if token.trim().is_empty() {
        Ok(None)
    } else {
        parse_amount(token).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns() {
        let composition = composition_from_columns("LiPF6  C3H4O3\n", " 1.0 10").unwrap();
        assert_eq!(composition.len(), 2);
        assert_eq!(composition["LiPF6"], 1.0);
        assert_eq!(composition["C3H4O3"], 10.0);
    }

    #[test]
    fn test_empty_columns_give_empty_composition() {
        assert!(composition_from_columns("", "  ").unwrap().is_empty());
    }

    #[test]
    fn test_column_errors() {
        assert_eq!(
            composition_from_columns("LiPF6 C3H4O3", "1.0"),
            Err(InputError::LengthMismatch {
                formulas: 2,
                amounts: 1
            })
        );
        assert_eq!(
            composition_from_columns("LiPF6", "one"),
            Err(InputError::InvalidAmount("one".to_string()))
        );
    }

    #[test]
    fn test_optional_amount() {
        assert_eq!(parse_optional_amount("  ").unwrap(), None);
        assert_eq!(parse_optional_amount("1.5\n").unwrap(), Some(1.5));
        assert!(parse_optional_amount("n/a").is_err());
    }

    #[test]
    fn test_non_finite_numbers_are_rejected() {
        for token in ["nan", "NaN", "inf", "-inf", "infinity", "1e400"] {
            assert_eq!(
                parse_amount(token),
                Err(InputError::InvalidAmount(token.to_string()))
            );
        }
        assert_eq!(
            composition_from_columns("LiPF6", "nan"),
            Err(InputError::InvalidAmount("nan".to_string()))
        );
        assert!(parse_optional_amount("inf").is_err());
    }
}
