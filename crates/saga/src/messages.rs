//! Request payloads sent to the responders.

use common::EntityId;
use domain::{FundUsage, MasterDataType, Rupiah};
use serde::{Deserialize, Serialize};

/// Payload of [`MASTER_DATA_REQUESTED`](crate::topics::MASTER_DATA_REQUESTED).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterDataRequested {
    pub tipe: MasterDataType,
}

/// Honorarium line sent to payroll when paying or updating a salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryPayment {
    #[serde(rename = "id_penggunaan_dana")]
    pub fund_usage_id: EntityId,

    #[serde(rename = "sub_aktivitas")]
    pub sub_activity: String,

    #[serde(rename = "penerima")]
    pub recipient: String,

    #[serde(rename = "jumlah")]
    pub amount: Rupiah,

    #[serde(rename = "bulan")]
    pub month: u32,

    #[serde(rename = "tahun")]
    pub year: i32,
}

impl SalaryPayment {
    pub fn for_fund_usage(fund_usage: &FundUsage) -> Self {
        let period = fund_usage.period();
        Self {
            fund_usage_id: fund_usage.id(),
            sub_activity: fund_usage.sub_activity().to_string(),
            recipient: fund_usage.recipient().to_string(),
            amount: fund_usage.amount(),
            month: period.month(),
            year: period.year(),
        }
    }
}

/// Identifies the honorarium line payroll should withdraw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryCancellation {
    #[serde(rename = "id_penggunaan_dana")]
    pub fund_usage_id: EntityId,

    #[serde(rename = "sub_aktivitas")]
    pub sub_activity: String,

    #[serde(rename = "penerima")]
    pub recipient: String,

    #[serde(rename = "bulan")]
    pub month: u32,

    #[serde(rename = "tahun")]
    pub year: i32,
}

impl SalaryCancellation {
    pub fn for_fund_usage(fund_usage: &FundUsage) -> Self {
        let period = fund_usage.period();
        Self {
            fund_usage_id: fund_usage.id(),
            sub_activity: fund_usage.sub_activity().to_string(),
            recipient: fund_usage.recipient().to_string(),
            month: period.month(),
            year: period.year(),
        }
    }
}
