//! Fund usage reports and the honorarium rules around them.

mod entity;
mod period;
mod service;

pub use entity::{FundUsage, FundUsageInput, HonorariumKey};
pub use period::Period;
pub use service::FundUsageService;

/// The activity whose fund usages are paid out through payroll.
pub const HONORARIUM_ACTIVITY: &str = "Honorarium";

/// Prefix shared by every honorarium sub-activity (e.g., "HR Guru").
pub const HR_SUB_ACTIVITY_PREFIX: &str = "HR";

/// Returns true if `activity` is the honorarium activity.
pub fn is_honorarium_activity(activity: &str) -> bool {
    activity == HONORARIUM_ACTIVITY
}

/// Returns true if `sub_activity` is an honorarium sub-activity.
///
/// The prefix must stand alone: "HR Test" and "HR-Guru" qualify, "HRD Rapat"
/// does not.
pub fn is_honorarium_sub_activity(sub_activity: &str) -> bool {
    sub_activity
        .strip_prefix(HR_SUB_ACTIVITY_PREFIX)
        .is_some_and(|rest| rest.chars().next().is_none_or(|c| !c.is_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_honorarium_activity() {
        assert!(is_honorarium_activity("Honorarium"));
        assert!(!is_honorarium_activity("honorarium"));
        assert!(!is_honorarium_activity("Operasional"));
    }

    #[test]
    fn test_honorarium_sub_activity() {
        assert!(is_honorarium_sub_activity("HR Test"));
        assert!(is_honorarium_sub_activity("HR-Guru"));
        assert!(is_honorarium_sub_activity("HR"));
        assert!(!is_honorarium_sub_activity("HRD Rapat"));
        assert!(!is_honorarium_sub_activity("Listrik"));
        assert!(!is_honorarium_sub_activity("hr Test"));
    }
}
