//! Eligibility domain: which catalog cards may join a commander's deck.

pub mod filter;

pub use filter::{CandidatePool, EligibilityFilter, EligibilityRules};
