//! Integration tests for fund usage rules against the in-memory repository.

use std::sync::Arc;

use chrono::NaiveDate;
use common::ErrorCode;
use domain::{
    DomainError, FundUsage, FundUsageInput, FundUsageRepository, FundUsageService,
    InMemoryFundUsageRepository, MasterDataRecord, MasterDataType,
};

fn input(activity: &str, sub_activity: &str, date: NaiveDate) -> FundUsageInput {
    FundUsageInput {
        activity: activity.to_string(),
        sub_activity: sub_activity.to_string(),
        recipient: "Test User".to_string(),
        date,
        amount: 1_500_000,
        description: Some("Honor bulanan".to_string()),
    }
}

fn october() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 10, 12).unwrap()
}

fn master_data() -> Vec<MasterDataRecord> {
    vec![
        MasterDataRecord::new(1, MasterDataType::Activity, "Honorarium", "Honor"),
        MasterDataRecord::new(2, MasterDataType::SubActivity, "HR Test", "Honor uji"),
    ]
}

mod honorarium_reporting {
    use super::*;

    #[tokio::test]
    async fn report_validate_and_store() {
        let repository = Arc::new(InMemoryFundUsageRepository::new());
        let service = FundUsageService::new(Arc::clone(&repository));

        let fund_usage = FundUsage::report(input("Honorarium", "HR Test", october())).unwrap();
        fund_usage.ensure_consistent_honorarium_pairing().unwrap();
        fund_usage.verify_activity_master_data(&master_data()).unwrap();
        fund_usage
            .verify_sub_activity_master_data(&master_data())
            .unwrap();
        service
            .ensure_honorarium_not_reported(&fund_usage)
            .await
            .unwrap();
        repository.add_fund_usage(&fund_usage).await.unwrap();

        let stored = repository
            .is_fund_usage_id_exist(fund_usage.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, fund_usage);
        assert_eq!(stored.description(), Some("Honor bulanan"));
    }

    #[tokio::test]
    async fn second_report_in_same_month_is_rejected() {
        let repository = Arc::new(InMemoryFundUsageRepository::new());
        let service = FundUsageService::new(Arc::clone(&repository));

        let first = FundUsage::report(input("Honorarium", "HR Test", october())).unwrap();
        repository.add_fund_usage(&first).await.unwrap();

        let later = NaiveDate::from_ymd_opt(2023, 10, 28).unwrap();
        let second = FundUsage::report(input("Honorarium", "HR Test", later)).unwrap();
        let err = service
            .ensure_honorarium_not_reported(&second)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::AlreadyReported { .. }));
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert_eq!(
            err.to_string(),
            "Data penggunaan dana untuk sub aktivitas HR Test kepada Test User pada Oktober 2023 telah dilaporkan"
        );
    }

    #[tokio::test]
    async fn next_month_is_allowed() {
        let repository = Arc::new(InMemoryFundUsageRepository::new());
        let service = FundUsageService::new(Arc::clone(&repository));

        let first = FundUsage::report(input("Honorarium", "HR Test", october())).unwrap();
        repository.add_fund_usage(&first).await.unwrap();

        let november = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
        let second = FundUsage::report(input("Honorarium", "HR Test", november)).unwrap();
        assert!(service.ensure_honorarium_not_reported(&second).await.is_ok());
    }
}

mod revisions {
    use super::*;

    #[tokio::test]
    async fn revision_replaces_the_stored_record() {
        let repository = InMemoryFundUsageRepository::new();
        let original = FundUsage::report(input("Honorarium", "HR Test", october())).unwrap();
        repository.add_fund_usage(&original).await.unwrap();

        let revised = original
            .revise(input("Operasional", "Listrik", october()))
            .unwrap();
        revised.ensure_consistent_honorarium_pairing().unwrap();
        repository.update_fund_usage(&revised).await.unwrap();

        let stored = repository.get(original.id()).unwrap();
        assert!(!stored.is_honorarium());
        assert_eq!(stored.sub_activity(), "Listrik");
    }

    #[tokio::test]
    async fn mismatched_revision_is_rejected() {
        let original = FundUsage::report(input("Honorarium", "HR Test", october())).unwrap();
        let revised = original
            .revise(input("Honorarium", "Listrik", october()))
            .unwrap();

        let err = revised.ensure_consistent_honorarium_pairing().unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadRequest);
    }
}
