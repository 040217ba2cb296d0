use std::sync::Arc;

use crate::error::DomainError;
use crate::repository::FundUsageRepository;

use super::FundUsage;

/// Fund usage rules that need the repository.
pub struct FundUsageService<R: FundUsageRepository> {
    repository: Arc<R>,
}

impl<R: FundUsageRepository> FundUsageService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Fails if an honorarium with the same sub-activity, recipient and month
    /// has already been reported.
    #[tracing::instrument(
        skip(self, fund_usage),
        fields(
            sub_activity = %fund_usage.sub_activity(),
            recipient = %fund_usage.recipient(),
            period = %fund_usage.period(),
        )
    )]
    pub async fn ensure_honorarium_not_reported(
        &self,
        fund_usage: &FundUsage,
    ) -> Result<(), DomainError> {
        let key = fund_usage.honorarium_key();
        let exists = self
            .repository
            .is_fund_usage_same_hr_exist(
                &key.sub_activity,
                key.period.month(),
                key.period.year(),
                &key.recipient,
            )
            .await?;

        if exists {
            tracing::warn!("honorarium already reported");
            return Err(DomainError::AlreadyReported {
                sub_activity: key.sub_activity,
                recipient: key.recipient,
                period: key.period,
            });
        }
        Ok(())
    }
}

impl<R: FundUsageRepository> Clone for FundUsageService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::fund_usage::FundUsageInput;
    use crate::memory::InMemoryFundUsageRepository;

    fn honorarium(day: u32, month: u32) -> FundUsage {
        FundUsage::report(FundUsageInput {
            activity: "Honorarium".to_string(),
            sub_activity: "HR Test".to_string(),
            recipient: "Test User".to_string(),
            date: NaiveDate::from_ymd_opt(2023, month, day).unwrap(),
            amount: 1_500_000,
            description: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_unique_honorarium_passes() {
        let repository = Arc::new(InMemoryFundUsageRepository::new());
        repository.insert(honorarium(12, 9));
        let service = FundUsageService::new(Arc::clone(&repository));

        service
            .ensure_honorarium_not_reported(&honorarium(1, 10))
            .await
            .unwrap();
        assert_eq!(repository.hr_check_count(), 1);
    }

    #[tokio::test]
    async fn test_same_month_is_rejected() {
        let repository = Arc::new(InMemoryFundUsageRepository::new());
        repository.insert(honorarium(3, 10));
        let service = FundUsageService::new(repository);

        let err = service
            .ensure_honorarium_not_reported(&honorarium(12, 10))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Data penggunaan dana untuk sub aktivitas HR Test kepada Test User pada Oktober 2023 telah dilaporkan"
        );
    }

    #[tokio::test]
    async fn test_repository_failure_propagates() {
        let repository = Arc::new(InMemoryFundUsageRepository::new());
        repository.set_fail_on_read(true);
        let service = FundUsageService::new(repository);

        let err = service
            .ensure_honorarium_not_reported(&honorarium(12, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Repository(_)));
    }
}
