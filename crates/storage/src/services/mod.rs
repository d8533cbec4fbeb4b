pub mod eligibility;
pub mod ranking;
pub mod registration;

#[cfg(test)]
pub(crate) mod fixtures;
