//! Parsing of comma-separated numeric lists typed into the form.
//!
//! Each token is trimmed and parsed as `f64`. Empty tokens, non-numeric text
//! and non-finite values are rejected with the zero-based token index.

use crate::formulas::FormulaError;

/// Parse error with the index of the offending token
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error at item {}: {}", self.position + 1, self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for FormulaError {
    fn from(err: ParseError) -> Self {
        FormulaError::InvalidArgument(err.to_string())
    }
}

/// Parse `"1.35, 1.9, 2.1"` into `[1.35, 1.9, 2.1]`
pub fn parse_number_list(input: &str) -> Result<Vec<f64>, ParseError> {
    input
        .split(',')
        .enumerate()
        .map(|(position, raw)| parse_token(raw.trim(), position))
        .collect()
}

fn parse_token(token: &str, position: usize) -> Result<f64, ParseError> {
    if token.is_empty() {
        return Err(ParseError {
            message: "empty value".to_string(),
            position,
        });
    }

    let value: f64 = token.parse().map_err(|_| ParseError {
        message: format!("'{}' is not a number", token),
        position,
    })?;

    if !value.is_finite() {
        return Err(ParseError {
            message: format!("'{}' is not a finite number", token),
            position,
        });
    }

    Ok(value)
}

/// Parse two lists that must pair up element by element
pub fn parse_paired_lists(left: &str, right: &str) -> Result<(Vec<f64>, Vec<f64>), FormulaError> {
    let left_values = parse_number_list(left)?;
    let right_values = parse_number_list(right)?;

    if left_values.len() != right_values.len() {
        return Err(FormulaError::InvalidArgument(format!(
            "lists have different lengths: {} and {}",
            left_values.len(),
            right_values.len()
        )));
    }

    Ok((left_values, right_values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_speedups() {
        let values = parse_number_list("1.35, 1.9, 2.1").unwrap();
        assert_eq!(values, vec![1.35, 1.9, 2.1]);
    }

    #[test]
    fn test_parse_without_spaces_and_with_padding() {
        assert_eq!(parse_number_list("2,8,16").unwrap(), vec![2.0, 8.0, 16.0]);
        assert_eq!(parse_number_list("  4 ,\t5  ").unwrap(), vec![4.0, 5.0]);
    }

    #[test]
    fn test_parse_single_value() {
        assert_eq!(parse_number_list("3").unwrap(), vec![3.0]);
    }

    #[test]
    fn test_parse_scientific_notation() {
        assert_eq!(parse_number_list("1e2, -2.5E-1").unwrap(), vec![100.0, -0.25]);
    }

    #[test]
    fn test_non_numeric_token_reports_position() {
        let err = parse_number_list("1.0, abc, 3").unwrap_err();
        assert_eq!(err.position, 1);
        assert!(err.message.contains("abc"));
    }

    #[test]
    fn test_empty_input_and_trailing_comma() {
        assert_eq!(parse_number_list("").unwrap_err().position, 0);
        assert_eq!(parse_number_list("1, 2,").unwrap_err().position, 2);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(parse_number_list("1, inf").is_err());
        assert!(parse_number_list("NaN").is_err());
    }

    #[test]
    fn test_paired_lists_mismatch_is_invalid_argument() {
        let result = parse_paired_lists("1, 2, 3", "2, 8");
        assert!(matches!(result, Err(FormulaError::InvalidArgument(_))));
    }

    #[test]
    fn test_paired_lists_malformed_is_invalid_argument() {
        let result = parse_paired_lists("1, x", "2, 8");
        match result {
            Err(FormulaError::InvalidArgument(msg)) => assert!(msg.contains("item 2")),
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }
}
