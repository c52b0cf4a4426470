//! `AddRngEntropy` (spec.md §4.7, §5: "RNG entropy additions are append-only
//! and commute").

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRngEntropyRequest {
    pub data: Vec<u8>,
}
