use std::sync::Arc;

use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{
    FundUsage, FundUsageInput, FundUsageService, InMemoryFundUsageRepository, MasterDataRecord,
    MasterDataType,
};

fn input(recipient: String, month: u32) -> FundUsageInput {
    FundUsageInput {
        activity: "Honorarium".to_string(),
        sub_activity: "HR Test".to_string(),
        recipient,
        date: NaiveDate::from_ymd_opt(2023, month, 12).unwrap(),
        amount: 1_500_000,
        description: None,
    }
}

fn master_data() -> Vec<MasterDataRecord> {
    let mut records: Vec<MasterDataRecord> = (0..200)
        .map(|i| MasterDataRecord::new(i, MasterDataType::SubActivity, format!("Sub {i}"), ""))
        .collect();
    records.push(MasterDataRecord::new(900, MasterDataType::Activity, "Honorarium", ""));
    records.push(MasterDataRecord::new(901, MasterDataType::SubActivity, "HR Test", ""));
    records
}

fn bench_report_and_validate(c: &mut Criterion) {
    let records = master_data();

    c.bench_function("domain/report_and_validate", |b| {
        b.iter(|| {
            let fund_usage = FundUsage::report(input("Test User".to_string(), 10)).unwrap();
            fund_usage.ensure_consistent_honorarium_pairing().unwrap();
            fund_usage.verify_activity_master_data(&records).unwrap();
            fund_usage.verify_sub_activity_master_data(&records).unwrap();
        });
    });
}

fn bench_honorarium_uniqueness(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let repository = Arc::new(InMemoryFundUsageRepository::new());
    for i in 0..1_000 {
        repository.insert(FundUsage::report(input(format!("Guru {i}"), 9)).unwrap());
    }
    let service = FundUsageService::new(Arc::clone(&repository));
    let candidate = FundUsage::report(input("Test User".to_string(), 10)).unwrap();

    c.bench_function("domain/honorarium_uniqueness_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                service
                    .ensure_honorarium_not_reported(&candidate)
                    .await
                    .unwrap();
            });
        });
    });
}

criterion_group!(benches, bench_report_and_validate, bench_honorarium_uniqueness);
criterion_main!(benches);
