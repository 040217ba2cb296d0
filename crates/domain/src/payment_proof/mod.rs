//! Payment proofs uploaded against school fees.

mod entity;

pub use entity::{PaymentProof, PaymentProofInput};

/// Field keys a payment type rule may name.
pub const RULE_BANK_NAME: &str = "nama_bank";
pub const RULE_ACCOUNT_NUMBER: &str = "nomor_rekening";
pub const RULE_ACCOUNT_HOLDER: &str = "nama_pemilik_rekening";
pub const RULE_REFERENCE_NUMBER: &str = "nomor_referensi";

/// Splits a payment type rule into its field keys.
pub fn parse_rule(rule: &str) -> impl Iterator<Item = &str> {
    rule.split(',').map(str::trim).filter(|key| !key.is_empty())
}
