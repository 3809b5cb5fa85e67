#![deny(unsafe_code)]

//! Reference tables consulted by the CF convention checker.

pub mod error;
pub mod formulas;
pub mod names;
pub mod paths;
pub mod schema;
pub mod units_list;

pub use crate::error::StandardsError;
pub use crate::formulas::FormulaRegistry;
pub use crate::names::{CanonicalNameTable, normalize_whitespace};
pub use crate::paths::{DEFAULT_STANDARD_NAMES, STANDARD_NAMES_ENV_VAR, standard_names_path};
pub use crate::schema::{Attachment, AttributeSchema, AttributeSpec, TIME_ATTRIBUTES};
pub use crate::units_list::{load_extra_units, parse_extra_units};
