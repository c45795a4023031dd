//! Tally Core - Fundamental types
//!
//! This crate provides the error types shared by the Grocery Tallies crates:
//! - `UnitError`: typed failures of unit lookup, conversion and arithmetic
//! - `TallyError`: structured errors reported at the program boundary

mod unit_error;
mod error;

pub use unit_error::UnitError;
pub use error::{TallyError, ErrorContext, Severity, codes};

#[cfg(test)]
mod tests {
    use super::*;

    mod unit_error_tests {
        use super::*;

        #[test]
        fn test_incompatible_names_both_units() {
            let err = UnitError::incompatible("count", "count", "cup", "volume");
            let display = format!("{}", err);
            assert!(display.contains("count"));
            assert!(display.contains("cup"));
            assert!(err.is_incompatible());
        }

        #[test]
        fn test_unknown_unit_display() {
            let err = UnitError::UnknownUnit("pinch".to_string());
            assert_eq!(format!("{}", err), "unknown unit: pinch");
            assert!(!err.is_incompatible());
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_error_construction() {
            let err = TallyError::not_found("product", "Milk");
            assert_eq!(err.code, codes::NOT_FOUND);
            assert_eq!(err.severity, Severity::Error);
        }

        #[test]
        fn test_from_unit_error() {
            let err: TallyError = UnitError::incompatible("tsp", "volume", "count", "count").into();
            assert_eq!(err.code, codes::INCOMPATIBLE_UNITS);
            assert!(err.suggestion.is_some());

            let err: TallyError = UnitError::UnknownUnit("pinch".to_string()).into();
            assert_eq!(err.code, codes::UNKNOWN_UNIT);

            let err: TallyError = UnitError::InvalidNumber("2 3".to_string()).into();
            assert_eq!(err.code, codes::INVALID_MAGNITUDE);
            assert!(err.message.contains("2 3"));
        }

        #[test]
        fn test_error_context_builders() {
            let err = TallyError::invalid_input("quantity is required")
                .for_product("Onion")
                .in_recipe("Salsa")
                .with_note("line 3");
            let ctx = err.context.unwrap();
            assert_eq!(ctx.product, Some("Onion".to_string()));
            assert_eq!(ctx.recipe, Some("Salsa".to_string()));
            assert_eq!(ctx.notes, vec!["line 3".to_string()]);
        }

        #[test]
        fn test_fatal_errors() {
            assert_eq!(TallyError::io("catalog.json", "missing").severity, Severity::Fatal);
            assert_eq!(TallyError::internal("boom").severity, Severity::Fatal);
            assert_eq!(TallyError::duplicate("store", "Corner").severity, Severity::Error);
        }

        #[test]
        fn test_error_display() {
            let err = TallyError::io("catalog.json", "permission denied");
            let display = format!("{}", err);
            assert!(display.contains("IO_ERROR"));
            assert!(display.contains("catalog.json"));
        }

        #[test]
        fn test_error_serializes_without_empty_fields() {
            let err = TallyError::new(codes::INTERNAL, "boom");
            let json = serde_json::to_value(&err).unwrap();
            assert_eq!(json["code"], "INTERNAL");
            assert_eq!(json["severity"], "error");
            assert!(json.get("suggestion").is_none());
            assert!(json.get("context").is_none());
        }
    }
}
