pub mod admin;
pub mod cache;
pub mod error;
pub mod evaluator;
pub mod groups;
pub mod local_client;
pub mod repo;
pub mod service;

#[cfg(test)]
mod admin_tests;
#[cfg(test)]
pub(crate) mod test_support;
