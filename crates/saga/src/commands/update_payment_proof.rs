use std::sync::Arc;

use common::EntityId;
use domain::{
    FileStorage, FileUpload, MasterDataType, PaymentProof, PaymentProofInput,
    PaymentProofRepository,
};
use event_bus::{EventChannel, Requester};

use super::persist;
use crate::error::SagaError;
use crate::state::SagaRun;
use crate::steps::master_data_step;
use crate::topics::{SAGA_UPDATE_PAYMENT_PROOF, STEP_DELETE_OLD_FILE, STEP_UPLOAD_FILE};

/// Revises a stored payment proof, optionally replacing its document.
///
/// Steps:
/// 1. "Jenis Pembayaran" must exist in master data
/// 2. The fields its rule names must be filled in
/// 3. The new document, if any, is uploaded
/// 4. The proof is stored
/// 5. The replaced document is deleted
///
/// The old document is only touched once the new record is stored.
pub struct UpdatePaymentProof<C, R, S>
where
    C: EventChannel,
    R: PaymentProofRepository,
    S: FileStorage,
{
    requester: Requester<C>,
    repository: Arc<R>,
    storage: Arc<S>,
}

impl<C, R, S> UpdatePaymentProof<C, R, S>
where
    C: EventChannel,
    R: PaymentProofRepository,
    S: FileStorage,
{
    pub fn new(requester: Requester<C>, repository: Arc<R>, storage: Arc<S>) -> Self {
        Self {
            requester,
            repository,
            storage,
        }
    }

    /// Runs the saga and returns the stored revision.
    #[tracing::instrument(
        skip(self, input, file),
        fields(
            saga_type = SAGA_UPDATE_PAYMENT_PROOF,
            payment_proof_id = %id,
            with_file = file.is_some(),
        )
    )]
    pub async fn execute(
        &self,
        id: EntityId,
        input: PaymentProofInput,
        file: Option<FileUpload>,
    ) -> Result<PaymentProof, SagaError> {
        let mut run = SagaRun::start(SAGA_UPDATE_PAYMENT_PROOF);
        let result = self.run(id, input, file, &mut run).await;
        run.finish(&result);
        result
    }

    async fn run(
        &self,
        id: EntityId,
        input: PaymentProofInput,
        file: Option<FileUpload>,
        run: &mut SagaRun,
    ) -> Result<PaymentProof, SagaError> {
        let stored = self
            .repository
            .is_payment_proof_id_exist(id)
            .await?
            .ok_or(SagaError::NotFound {
                entity: "Bukti pembayaran",
                id,
            })?;

        let mut revised = stored.revise(input)?;

        let payment_type = master_data_step(&self.requester, MasterDataType::PaymentType, |records| {
            revised.verify_payment_type_master_data(records)
        })
        .await?;
        run.step_completed(MasterDataType::PaymentType.as_str());

        revised.validate_payment_type_input(&payment_type)?;

        let replaced = match file {
            Some(upload) => {
                let uploaded = self.storage.upload_file(&upload).await?;
                tracing::info!(file_id = %uploaded.id, "payment proof document uploaded");
                run.side_effect_completed(STEP_UPLOAD_FILE);
                revised.attach_file(uploaded)
            }
            None => None,
        };

        let old_file_id = stored.file().map(|file| file.id.clone());
        persist(
            run,
            self.repository
                .update_payment_proof(&revised, old_file_id.as_ref()),
        )
        .await?;

        if let Some(old) = replaced {
            self.storage.delete_file(&old.id).await?;
            tracing::info!(file_id = %old.id, "replaced document deleted");
            run.step_completed(STEP_DELETE_OLD_FILE);
        }

        Ok(revised)
    }
}
