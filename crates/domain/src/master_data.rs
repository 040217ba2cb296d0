//! Reference values owned by the master-data module.

use serde::{Deserialize, Serialize};

/// The kind of reference value being looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MasterDataType {
    /// Activity a fund usage is booked against.
    #[serde(rename = "Aktivitas")]
    Activity,

    /// Sub-activity within an activity.
    #[serde(rename = "Sub Aktivitas")]
    SubActivity,

    /// Payment type of a payment proof.
    #[serde(rename = "Jenis Pembayaran")]
    PaymentType,
}

impl MasterDataType {
    /// Returns the type name as used by the master-data module.
    pub fn as_str(&self) -> &'static str {
        match self {
            MasterDataType::Activity => "Aktivitas",
            MasterDataType::SubActivity => "Sub Aktivitas",
            MasterDataType::PaymentType => "Jenis Pembayaran",
        }
    }
}

impl std::fmt::Display for MasterDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One reference value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterDataRecord {
    pub id: i64,

    #[serde(rename = "tipe")]
    pub kind: MasterDataType,

    #[serde(rename = "nilai")]
    pub value: String,

    #[serde(rename = "deskripsi", default)]
    pub description: String,

    /// Comma-separated names of the fields a payment proof of this type must
    /// fill in (payment types only).
    #[serde(rename = "aturan", default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
}

impl MasterDataRecord {
    /// Creates a record without a rule.
    pub fn new(
        id: i64,
        kind: MasterDataType,
        value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            value: value.into(),
            description: description.into(),
            rule: None,
        }
    }

    /// Sets the rule string.
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }
}

/// Finds the record of the given kind whose value equals `value`.
pub fn find_master_data<'a>(
    records: &'a [MasterDataRecord],
    kind: MasterDataType,
    value: &str,
) -> Option<&'a MasterDataRecord> {
    records
        .iter()
        .find(|record| record.kind == kind && record.value == value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape() {
        let record = MasterDataRecord::new(7, MasterDataType::SubActivity, "HR Test", "Honor uji");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"id": 7, "tipe": "Sub Aktivitas", "nilai": "HR Test", "deskripsi": "Honor uji"})
        );

        let parsed: MasterDataRecord = serde_json::from_value(json!({
            "id": 3,
            "tipe": "Jenis Pembayaran",
            "nilai": "Transfer Bank",
            "aturan": "nama_bank,nomor_rekening"
        }))
        .unwrap();
        assert_eq!(parsed.kind, MasterDataType::PaymentType);
        assert_eq!(parsed.description, "");
        assert_eq!(parsed.rule.as_deref(), Some("nama_bank,nomor_rekening"));
    }

    #[test]
    fn test_find_matches_kind_and_value() {
        let records = vec![
            MasterDataRecord::new(1, MasterDataType::Activity, "Honorarium", ""),
            MasterDataRecord::new(2, MasterDataType::SubActivity, "Honorarium", ""),
        ];

        let found = find_master_data(&records, MasterDataType::SubActivity, "Honorarium").unwrap();
        assert_eq!(found.id, 2);
        assert!(find_master_data(&records, MasterDataType::Activity, "honorarium").is_none());
        assert!(find_master_data(&records, MasterDataType::PaymentType, "Honorarium").is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(MasterDataType::Activity.to_string(), "Aktivitas");
        assert_eq!(MasterDataType::SubActivity.to_string(), "Sub Aktivitas");
        assert_eq!(MasterDataType::PaymentType.to_string(), "Jenis Pembayaran");
    }
}
