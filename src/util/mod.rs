//! Shared utility functions.
//!
//! This module contains pure helpers with no remote dependencies, most notably
//! the location name normalizer that every other component uses for location
//! equality and URL construction.

pub mod slug;
