//! Services implementing the directory's data access and normalization
//! behavior on top of the remote source client.

pub mod cache;
pub mod company;
pub mod group;
pub mod location;
pub mod query;
pub mod retry;
pub mod summary;
pub mod transform;

#[cfg(test)]
mod tests;
