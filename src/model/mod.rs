//! Data model for the directory.
//!
//! This module contains the materialized company record, the filter/sort
//! criteria accepted by the query engine, and the location types (reference
//! table kinds, location groups, scoped listing pages).

pub mod company;
pub mod filter;
pub mod location;
