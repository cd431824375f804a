use super::common::*;
use crate::roster::domain::{AthleteId, AthleteStatus, Gender, Tier, TierAssignment};
use crate::roster::impact::MultiplierBasis;
use crate::roster::repository::{AthleteRepository, RepositoryError};
use crate::roster::service::{NewAthlete, RosterService, RosterServiceError};
use chrono::NaiveDate;
use std::sync::Arc;

#[test]
fn enroll_auto_classifies_from_personal_best() {
    let (service, _, alerts) = build_service();

    let athlete = service.enroll(sprinter()).expect("enrolls");

    assert_eq!(athlete.id, AthleteId("ath-0001".to_string()));
    assert_eq!(athlete.tier, TierAssignment::Auto(Tier::Elite));
    assert!(alerts.events().is_empty());
}

#[test]
fn enroll_respects_tier_override() {
    let (service, _, _) = build_service();
    let intake = NewAthlete {
        tier_override: Some(Tier::Developing),
        ..sprinter()
    };

    let athlete = service.enroll(intake).expect("enrolls");

    assert_eq!(athlete.tier, TierAssignment::ManualOverride(Tier::Developing));
}

#[test]
fn enroll_rejects_duplicate_ids() {
    let (service, _, _) = build_service();
    service.enroll(jumper()).expect("first enrollment");

    match service.enroll(jumper()) {
        Err(RosterServiceError::Repository(RepositoryError::Conflict)) => {}
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn enroll_rejects_negative_scholarships() {
    let (service, _, _) = build_service();
    let intake = NewAthlete {
        scholarship_amount: -1.0,
        ..sprinter()
    };

    assert!(matches!(
        service.enroll(intake),
        Err(RosterServiceError::InvalidAmount(_))
    ));
}

#[test]
fn new_result_moves_auto_tier() {
    let (service, _, _) = build_service();
    let athlete = service.enroll(jumper()).expect("enrolls");
    assert_eq!(athlete.tier, TierAssignment::Auto(Tier::Prospect));

    let updated = service
        .update_result(&athlete.id, "7.25m".to_string(), None)
        .expect("updates");

    assert_eq!(updated.tier, TierAssignment::Auto(Tier::Competitive));
    assert_eq!(updated.personal_best, "7.25m");
}

#[test]
fn new_result_leaves_manual_override_alone() {
    let (service, repository, _) = build_service();
    let athlete = service.enroll(jumper()).expect("enrolls");
    service
        .override_tier(&athlete.id, Tier::Elite)
        .expect("override applied");

    let updated = service
        .update_result(&athlete.id, "6.00m".to_string(), None)
        .expect("updates");

    assert_eq!(updated.tier, TierAssignment::ManualOverride(Tier::Elite));
    let stored = repository
        .fetch(&athlete.id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.tier, TierAssignment::ManualOverride(Tier::Elite));
}

#[test]
fn reset_tier_reclassifies_immediately() {
    let (service, _, _) = build_service();
    let athlete = service.enroll(jumper()).expect("enrolls");
    service
        .override_tier(&athlete.id, Tier::Elite)
        .expect("override applied");

    let reset = service.reset_tier(&athlete.id).expect("reset");

    assert_eq!(reset.tier, TierAssignment::Auto(Tier::Prospect));
}

#[test]
fn event_change_is_reclassified_with_new_family() {
    let (service, _, _) = build_service();
    let athlete = service.enroll(jumper()).expect("enrolls");

    let updated = service
        .update_result(&athlete.id, "16.80m".to_string(), Some("Shot Put".to_string()))
        .expect("updates");

    assert_eq!(updated.event, "Shot Put");
    assert_eq!(updated.tier, TierAssignment::Auto(Tier::Competitive));
}

#[test]
fn evaluation_produces_scorecard_with_recommendation() {
    let (service, _, _) = build_service();
    let athlete = service.enroll(sprinter()).expect("enrolls");

    let scorecard = service
        .record_evaluation(&athlete.id, strong_evaluation(None))
        .expect("evaluation recorded");

    // (46.67 + 46.67 + 16) * 1.3
    assert_eq!(scorecard.impact.total, 142);
    assert_eq!(scorecard.impact.basis, MultiplierBasis::CurrentTier(Tier::Elite));
    assert_eq!(scorecard.recommended_amount, 14_200.0);
    assert_eq!(scorecard.current_amount, 6_000.0);
    assert!(!scorecard.manual_tier);

    let again = service.scorecard(&athlete.id).expect("scorecard");
    assert_eq!(again, scorecard);
}

#[test]
fn scorecard_without_evaluation_is_zero() {
    let (service, _, _) = build_service();
    let athlete = service.enroll(sprinter()).expect("enrolls");

    let scorecard = service.scorecard(&athlete.id).expect("scorecard");

    assert_eq!(scorecard.impact.total, 0);
    assert_eq!(scorecard.recommended_amount, 0.0);
}

#[test]
fn archive_removes_award_from_budget_but_keeps_record() {
    let (service, repository, _) = build_service();
    service.enroll(sprinter()).expect("sprinter");
    let jumper = service.enroll(jumper()).expect("jumper");
    assert_eq!(service.budget(Gender::Men).expect("budget").allocated, 10_000.0);

    service.archive(&jumper.id).expect("archived");

    let budget = service.budget(Gender::Men).expect("budget");
    assert_eq!(budget.allocated, 6_000.0);
    assert_eq!(budget.remaining, 14_000.0);
    let stored = repository
        .fetch(&jumper.id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.status, AthleteStatus::Archived);
    assert_eq!(stored.scholarship_amount, 4_000.0);
}

#[test]
fn over_allocation_is_reported_not_rejected() {
    let (service, _, alerts) = build_service();
    service.enroll(sprinter()).expect("sprinter");
    let jumper = service.enroll(jumper()).expect("jumper");

    let budget = service
        .set_scholarship(&jumper.id, 15_000.0)
        .expect("allocation accepted");

    assert_eq!(budget.allocated, 21_000.0);
    assert_eq!(budget.remaining, -1_000.0);
    assert!(budget.is_over_allocated());

    let events = alerts.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].template, "scholarship_over_allocated");
    assert_eq!(events[0].gender, Gender::Men);
    assert_eq!(events[0].athlete_id, jumper.id);
    assert_eq!(
        events[0].details.get("remaining").map(String::as_str),
        Some("-1000.00")
    );
}

#[test]
fn missing_athlete_is_not_found() {
    let (service, _, _) = build_service();

    match service.get(&AthleteId("ath-missing".to_string())) {
        Err(RosterServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn report_reflects_service_state() {
    let (service, _, _) = build_service();
    let sprinter = service.enroll(sprinter()).expect("sprinter");
    service.enroll(jumper()).expect("jumper");
    service
        .record_evaluation(&sprinter.id, strong_evaluation(Some(Tier::Elite)))
        .expect("evaluated");

    let report = service
        .report(NaiveDate::from_ymd_opt(2026, 4, 1).expect("valid date"))
        .expect("report");

    assert_eq!(report.active_athletes, 2);
    assert_eq!(report.leaderboard.len(), 1);
    assert_eq!(report.leaderboard[0].athlete_id, sprinter.id);
    assert_eq!(report.budgets[0].allocated, 10_000.0);
}

#[test]
fn concurrent_edits_to_one_athlete_are_both_kept() {
    let repository = Arc::new(SlowRepository::default());
    let service = RosterService::new(
        repository.clone(),
        Arc::new(MemoryAlerts::default()),
        scoring_config(),
    );
    let athlete = service.enroll(jumper()).expect("enrolls");

    std::thread::scope(|scope| {
        let award = scope.spawn(|| service.set_scholarship(&athlete.id, 9_000.0));
        let result = scope.spawn(|| service.update_result(&athlete.id, "7.70m".to_string(), None));
        award.join().expect("award thread").expect("award stored");
        result.join().expect("result thread").expect("result stored");
    });

    let stored = repository
        .fetch(&athlete.id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.scholarship_amount, 9_000.0);
    assert_eq!(stored.personal_best, "7.70m");
    assert_eq!(stored.tier, TierAssignment::Auto(Tier::Elite));
    assert_eq!(service.budget(Gender::Men).expect("budget").allocated, 9_000.0);
}
