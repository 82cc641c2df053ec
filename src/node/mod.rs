//! Host-facing translator node

pub mod schema;
pub mod translator;
