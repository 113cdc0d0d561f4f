pub mod query;

pub use query::{QueryMap, assemble_query, encode_query_component, join_route};
