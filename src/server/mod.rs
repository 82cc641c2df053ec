//! HTTP bridge for host applications

pub mod api;
