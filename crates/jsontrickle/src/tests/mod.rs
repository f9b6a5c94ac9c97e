mod arbitrary;
mod edge_cases;
mod scenarios;
pub(crate) mod utils;
