pub mod introspect;
pub mod query;
