use chrono::NaiveDate;
use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::master_data::{MasterDataRecord, MasterDataType, find_master_data};
use crate::money::Rupiah;
use crate::storage::StoredFile;

use super::{
    RULE_ACCOUNT_HOLDER, RULE_ACCOUNT_NUMBER, RULE_BANK_NAME, RULE_REFERENCE_NUMBER, parse_rule,
};

/// Raw input of a payment proof update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentProofInput {
    #[serde(rename = "nama_pembayar")]
    pub payer: String,

    #[serde(rename = "jenis_pembayaran")]
    pub payment_type: String,

    #[serde(rename = "jumlah")]
    pub amount: i64,

    #[serde(rename = "tanggal")]
    pub date: NaiveDate,

    #[serde(rename = "nama_bank", default)]
    pub bank_name: Option<String>,

    #[serde(rename = "nomor_rekening", default)]
    pub account_number: Option<String>,

    #[serde(rename = "nama_pemilik_rekening", default)]
    pub account_holder: Option<String>,

    #[serde(rename = "nomor_referensi", default)]
    pub reference_number: Option<String>,
}

/// Proof that a payment was made, with an optional scanned document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentProof {
    id: EntityId,

    #[serde(rename = "nama_pembayar")]
    payer: String,

    #[serde(rename = "jenis_pembayaran")]
    payment_type: String,

    #[serde(rename = "jumlah")]
    amount: Rupiah,

    #[serde(rename = "tanggal")]
    date: NaiveDate,

    #[serde(rename = "nama_bank", skip_serializing_if = "Option::is_none", default)]
    bank_name: Option<String>,

    #[serde(rename = "nomor_rekening", skip_serializing_if = "Option::is_none", default)]
    account_number: Option<String>,

    #[serde(
        rename = "nama_pemilik_rekening",
        skip_serializing_if = "Option::is_none",
        default
    )]
    account_holder: Option<String>,

    #[serde(rename = "nomor_referensi", skip_serializing_if = "Option::is_none", default)]
    reference_number: Option<String>,

    #[serde(rename = "bukti", skip_serializing_if = "Option::is_none", default)]
    file: Option<StoredFile>,
}

impl PaymentProof {
    /// Builds a payment proof with a known id and no file.
    pub fn with_id(id: EntityId, input: PaymentProofInput) -> Result<Self, DomainError> {
        let payer = required("nama_pembayar", &input.payer)?;
        let payment_type = required("jenis_pembayaran", &input.payment_type)?;
        let amount = Rupiah::try_new(input.amount)?;

        Ok(Self {
            id,
            payer,
            payment_type,
            amount,
            date: input.date,
            bank_name: optional(input.bank_name),
            account_number: optional(input.account_number),
            account_holder: optional(input.account_holder),
            reference_number: optional(input.reference_number),
            file: None,
        })
    }

    /// Builds the revised version of this proof, keeping its id and file.
    pub fn revise(&self, input: PaymentProofInput) -> Result<Self, DomainError> {
        let mut revised = Self::with_id(self.id, input)?;
        revised.file = self.file.clone();
        Ok(revised)
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn payer(&self) -> &str {
        &self.payer
    }

    pub fn payment_type(&self) -> &str {
        &self.payment_type
    }

    pub fn amount(&self) -> Rupiah {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn bank_name(&self) -> Option<&str> {
        self.bank_name.as_deref()
    }

    pub fn account_number(&self) -> Option<&str> {
        self.account_number.as_deref()
    }

    pub fn account_holder(&self) -> Option<&str> {
        self.account_holder.as_deref()
    }

    pub fn reference_number(&self) -> Option<&str> {
        self.reference_number.as_deref()
    }

    pub fn file(&self) -> Option<&StoredFile> {
        self.file.as_ref()
    }

    /// Replaces the attached document, returning the previous one.
    pub fn attach_file(&mut self, file: StoredFile) -> Option<StoredFile> {
        self.file.replace(file)
    }

    /// Checks that the payment type is registered in master data and returns
    /// its record.
    pub fn verify_payment_type_master_data(
        &self,
        records: &[MasterDataRecord],
    ) -> Result<MasterDataRecord, DomainError> {
        find_master_data(records, MasterDataType::PaymentType, &self.payment_type)
            .cloned()
            .ok_or_else(|| DomainError::UnknownMasterData {
                kind: MasterDataType::PaymentType,
                value: self.payment_type.clone(),
            })
    }

    /// Checks that every field named by the payment type's rule is filled in.
    pub fn validate_payment_type_input(
        &self,
        payment_type: &MasterDataRecord,
    ) -> Result<(), DomainError> {
        let Some(rule) = payment_type.rule.as_deref() else {
            return Ok(());
        };

        let mut missing = Vec::new();
        for key in parse_rule(rule) {
            let value = match key {
                RULE_BANK_NAME => &self.bank_name,
                RULE_ACCOUNT_NUMBER => &self.account_number,
                RULE_ACCOUNT_HOLDER => &self.account_holder,
                RULE_REFERENCE_NUMBER => &self.reference_number,
                unknown => {
                    tracing::warn!(
                        payment_type = %payment_type.value,
                        key = unknown,
                        "unknown field in payment type rule"
                    );
                    continue;
                }
            };
            if value.is_none() {
                missing.push(key);
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::MissingRequiredFields {
                payment_type: self.payment_type.clone(),
                fields: missing.join(", "),
            })
        }
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

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
