use domain::{DomainError, MasterDataRecord, MasterDataType};
use event_bus::{EventChannel, Requester};

use crate::error::SagaError;
use crate::messages::MasterDataRequested;
use crate::step::SagaStep;
use crate::topics::{MASTER_DATA_REQUESTED, MASTER_DATA_RETRIEVED};

/// Fetches the master-data records of `kind` and runs `verify` against them.
///
/// The step is named after the master-data type ("Aktivitas", ...).
pub async fn master_data_step<C, T, F>(
    requester: &Requester<C>,
    kind: MasterDataType,
    verify: F,
) -> Result<T, SagaError>
where
    C: EventChannel,
    F: FnOnce(&[MasterDataRecord]) -> Result<T, DomainError>,
{
    let step = kind.as_str();
    SagaStep::new(
        step,
        MASTER_DATA_REQUESTED,
        MASTER_DATA_RETRIEVED,
        MasterDataRequested { tipe: kind },
    )
    .run(requester, |value| {
        let records: Vec<MasterDataRecord> =
            serde_json::from_value(value).map_err(|err| SagaError::UnexpectedReply {
                step,
                reason: err.to_string(),
            })?;
        Ok(verify(&records)?)
    })
    .await
}
