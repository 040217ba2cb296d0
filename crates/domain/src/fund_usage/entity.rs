use chrono::NaiveDate;
use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::master_data::{MasterDataRecord, MasterDataType, find_master_data};
use crate::money::Rupiah;

use super::{Period, is_honorarium_activity, is_honorarium_sub_activity};

/// Raw input of a fund usage report, as submitted by the school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundUsageInput {
    #[serde(rename = "aktivitas")]
    pub activity: String,

    #[serde(rename = "sub_aktivitas")]
    pub sub_activity: String,

    #[serde(rename = "penerima")]
    pub recipient: String,

    #[serde(rename = "tanggal")]
    pub date: NaiveDate,

    #[serde(rename = "jumlah")]
    pub amount: i64,

    #[serde(rename = "deskripsi", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The key under which an honorarium may be reported only once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HonorariumKey {
    pub sub_activity: String,
    pub recipient: String,
    pub period: Period,
}

/// A report of money spent on an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundUsage {
    id: EntityId,

    #[serde(rename = "aktivitas")]
    activity: String,

    #[serde(rename = "sub_aktivitas")]
    sub_activity: String,

    #[serde(rename = "penerima")]
    recipient: String,

    #[serde(rename = "tanggal")]
    date: NaiveDate,

    #[serde(rename = "jumlah")]
    amount: Rupiah,

    #[serde(rename = "deskripsi", default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl FundUsage {
    /// Builds a new report with a fresh id.
    pub fn report(input: FundUsageInput) -> Result<Self, DomainError> {
        Self::with_id(EntityId::new(), input)
    }

    /// Builds a report with a known id.
    ///
    /// Text fields are trimmed; blank fields and non-positive amounts are
    /// rejected.
    pub fn with_id(id: EntityId, input: FundUsageInput) -> Result<Self, DomainError> {
        let activity = required("aktivitas", &input.activity)?;
        let sub_activity = required("sub_aktivitas", &input.sub_activity)?;
        let recipient = required("penerima", &input.recipient)?;
        let amount = Rupiah::try_new(input.amount)?;

        Ok(Self {
            id,
            activity,
            sub_activity,
            recipient,
            date: input.date,
            amount,
            description: input
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        })
    }

    /// Builds the revised version of this report, keeping its id.
    pub fn revise(&self, input: FundUsageInput) -> Result<Self, DomainError> {
        Self::with_id(self.id, input)
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn activity(&self) -> &str {
        &self.activity
    }

    pub fn sub_activity(&self) -> &str {
        &self.sub_activity
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> Rupiah {
        self.amount
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the month this report falls in.
    pub fn period(&self) -> Period {
        Period::of(self.date)
    }

    /// Returns true if the activity is the honorarium activity.
    pub fn is_honorarium(&self) -> bool {
        is_honorarium_activity(&self.activity)
    }

    /// Returns the uniqueness key of this report.
    pub fn honorarium_key(&self) -> HonorariumKey {
        HonorariumKey {
            sub_activity: self.sub_activity.clone(),
            recipient: self.recipient.clone(),
            period: self.period(),
        }
    }

    /// Checks that activity and sub-activity agree on being honorarium.
    pub fn ensure_consistent_honorarium_pairing(&self) -> Result<(), DomainError> {
        if self.is_honorarium() == is_honorarium_sub_activity(&self.sub_activity) {
            Ok(())
        } else {
            Err(DomainError::ActivityMismatch {
                activity: self.activity.clone(),
                sub_activity: self.sub_activity.clone(),
            })
        }
    }

    /// Checks that the activity is registered in master data and returns its
    /// record.
    pub fn verify_activity_master_data(
        &self,
        records: &[MasterDataRecord],
    ) -> Result<MasterDataRecord, DomainError> {
        verify(records, MasterDataType::Activity, &self.activity)
    }

    /// Checks that the sub-activity is registered in master data and returns
    /// its record.
    pub fn verify_sub_activity_master_data(
        &self,
        records: &[MasterDataRecord],
    ) -> Result<MasterDataRecord, DomainError> {
        verify(records, MasterDataType::SubActivity, &self.sub_activity)
    }
}

fn required(field: &'static str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        Err(DomainError::MissingField { field })
    } else {
        Ok(value.to_string())
    }
}

fn verify(
    records: &[MasterDataRecord],
    kind: MasterDataType,
    value: &str,
) -> Result<MasterDataRecord, DomainError> {
    find_master_data(records, kind, value)
        .cloned()
        .ok_or_else(|| DomainError::UnknownMasterData {
            kind,
            value: value.to_string(),
        })
}
