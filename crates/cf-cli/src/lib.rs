//! Library side of the `cfcheck` command: reference table loading, dataset
//! checking and logging setup.

pub mod check;
pub mod logging;
