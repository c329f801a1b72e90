use std::sync::Arc;

use super::common::*;
use crate::board::applications::{
    ApplicationService, ApplicationServiceError, ApplicationStatus, StatusDecision,
};
use crate::board::ids::{ApplicationId, JobId};
use crate::board::store::{ApplicationRepository, JobRepository};

#[test]
fn submit_creates_applied_application_and_counts_applicants() {
    let board = Board::new();
    let service = board.service();
    let first = board.student("Ada Student");
    let second = board.student("Grace Student");

    let submitted = service.submit(&first, &board.job.id).expect("first applies");
    assert_eq!(submitted.application.status, ApplicationStatus::Applied);
    assert_eq!(submitted.application.job, board.job.id);
    assert_eq!(submitted.total_applicants, 1);

    let submitted = service.submit(&second, &board.job.id).expect("second applies");
    assert_eq!(submitted.total_applicants, 2);
}

#[test]
fn duplicate_submission_yields_single_application() {
    let board = Board::new();
    let service = board.service();
    let student = board.student("Ada Student");

    service.submit(&student, &board.job.id).expect("first submission");
    let err = service
        .submit(&student, &board.job.id)
        .expect_err("second submission rejected");
    assert!(matches!(err, ApplicationServiceError::AlreadyApplied));
    assert_eq!(err.to_string(), "You have already applied for this job.");

    let stored = board
        .store
        .applications_for_job(&board.job.id)
        .expect("listed");
    assert_eq!(stored.len(), 1);
}

#[test]
fn concurrent_submissions_store_one_application() {
    const SUBMITTERS: usize = 8;

    let board = Board::new();
    let service = board.service();
    let student = board.student("Ada Student");

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..SUBMITTERS)
            .map(|_| scope.spawn(|| service.submit(&student, &board.job.id)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("submitter thread"))
            .collect()
    });

    let accepted = results.iter().filter(|result| result.is_ok()).count();
    assert_eq!(accepted, 1);
    assert!(results.iter().all(|result| matches!(
        result,
        Ok(_) | Err(ApplicationServiceError::AlreadyApplied)
    )));

    let stored = board
        .store
        .applications_for_job(&board.job.id)
        .expect("listed");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].applicant, student.id);
}

#[test]
fn store_conflict_is_reported_as_already_applied() {
    let board = Board::new();
    let service = ApplicationService::new(Arc::new(StaleListingStore(board.store.clone())));
    let student = board.student("Ada Student");

    service.submit(&student, &board.job.id).expect("first submission");
    let err = service
        .submit(&student, &board.job.id)
        .expect_err("index rejects the duplicate");
    assert!(matches!(err, ApplicationServiceError::AlreadyApplied));

    let stored = board
        .store
        .applications_for_job(&board.job.id)
        .expect("listed");
    assert_eq!(stored.len(), 1);
}

#[test]
fn submission_to_missing_job_is_not_found() {
    let board = Board::new();
    let student = board.student("Ada Student");

    assert!(matches!(
        board.service().submit(&student, &JobId::generate()),
        Err(ApplicationServiceError::JobNotFound)
    ));
}

#[test]
fn recruiters_cannot_apply() {
    let board = Board::new();
    let recruiter = board.recruiter("Other Recruiter");

    assert!(matches!(
        board.service().submit(&recruiter, &board.job.id),
        Err(ApplicationServiceError::StudentsOnly)
    ));
}

#[test]
fn applied_jobs_are_newest_first_with_company_summary() {
    let board = Board::new();
    let service = board.service();
    let student = board.student("Ada Student");
    let second_job = job(&board.store, &board.company, &board.recruiter, "Data Engineer");

    service.submit(&student, &board.job.id).expect("applied");
    service.submit(&student, &second_job.id).expect("applied");

    let applied = service.applied_jobs(&student).expect("listed");
    let titles: Vec<&str> = applied
        .iter()
        .map(|entry| entry.job.details.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Data Engineer", "Backend Engineer"]);
    assert_eq!(applied[0].job.company.name, "Acme");
    assert_eq!(applied[0].job.applicants.len(), 1);
}

#[test]
fn applied_jobs_empty_is_not_found() {
    let board = Board::new();
    let student = board.student("Ada Student");

    let err = board
        .service()
        .applied_jobs(&student)
        .expect_err("nothing applied");
    assert_eq!(err.to_string(), "No applications found");
}

#[test]
fn applicants_match_job_index_in_application_order() {
    let board = Board::new();
    let service = board.service();
    let names = ["Ada Student", "Grace Student", "Linus Student"];
    for name in names {
        let student = board.student(name);
        service.submit(&student, &board.job.id).expect("applied");
    }

    let applicants = service
        .applicants(&board.recruiter, &board.job.id)
        .expect("listed");
    let index = board
        .store
        .applications_for_job(&board.job.id)
        .expect("index");
    assert_eq!(applicants.len(), index.len());

    let listed: Vec<&str> = applicants
        .iter()
        .map(|entry| entry.applicant.fullname.as_str())
        .collect();
    assert_eq!(listed, names.to_vec());
}

#[test]
fn applicants_require_job_ownership() {
    let board = Board::new();
    let service = board.service();
    let student = board.student("Ada Student");
    service.submit(&student, &board.job.id).expect("applied");

    let outsider = board.recruiter("Other Recruiter");
    assert!(matches!(
        service.applicants(&outsider, &board.job.id),
        Err(ApplicationServiceError::NotJobOwner)
    ));
    assert!(matches!(
        service.applicants(&student, &board.job.id),
        Err(ApplicationServiceError::NotJobOwner)
    ));
}

#[test]
fn company_owner_may_review_jobs_posted_by_others() {
    let board = Board::new();
    let service = board.service();
    let poster = board.recruiter("Posting Recruiter");
    let posted = job(&board.store, &board.company, &poster, "Designer");
    let student = board.student("Ada Student");
    let submitted = service.submit(&student, &posted.id).expect("applied");

    assert_eq!(
        service
            .applicants(&board.recruiter, &posted.id)
            .expect("company owner lists")
            .len(),
        1
    );
    let updated = service
        .update_status(&poster, &submitted.application.id, StatusDecision::Reject)
        .expect("job creator updates");
    assert_eq!(updated.status, ApplicationStatus::Rejected);
}

#[test]
fn applicants_for_job_without_applications_is_not_found() {
    let board = Board::new();

    let err = board
        .service()
        .applicants(&board.recruiter, &board.job.id)
        .expect_err("no applicants");
    assert_eq!(err.to_string(), "No applicants found for this job");
}

#[test]
fn status_updates_follow_decisions_and_may_revert() {
    let board = Board::new();
    let service = board.service();
    let student = board.student("Ada Student");
    let id = service
        .submit(&student, &board.job.id)
        .expect("applied")
        .application
        .id;

    let accepted = service
        .update_status(&board.recruiter, &id, StatusDecision::Accept)
        .expect("accepted");
    assert_eq!(accepted.status, ApplicationStatus::Accepted);

    let pending = service
        .update_status(&board.recruiter, &id, StatusDecision::Pending)
        .expect("reverted");
    assert_eq!(pending.status, ApplicationStatus::Pending);
    assert_eq!(pending.created_at, accepted.created_at);

    let stored = board.store.application(&id).expect("read").expect("exists");
    assert_eq!(stored.status, ApplicationStatus::Pending);
}

#[test]
fn status_update_for_missing_application_is_not_found() {
    let board = Board::new();

    assert!(matches!(
        board
            .service()
            .update_status(&board.recruiter, &ApplicationId::generate(), StatusDecision::Accept),
        Err(ApplicationServiceError::ApplicationNotFound)
    ));
}

#[test]
fn status_update_requires_job_ownership() {
    let board = Board::new();
    let service = board.service();
    let student = board.student("Ada Student");
    let id = service
        .submit(&student, &board.job.id)
        .expect("applied")
        .application
        .id;

    let outsider = board.recruiter("Other Recruiter");
    assert!(matches!(
        service.update_status(&outsider, &id, StatusDecision::Accept),
        Err(ApplicationServiceError::NotJobOwner)
    ));
    let unchanged = board.store.application(&id).expect("read").expect("exists");
    assert_eq!(unchanged.status, ApplicationStatus::Applied);
}

#[test]
fn repository_failures_surface_as_repository_errors() {
    let board = Board::new();
    let student = board.student("Ada Student");
    let service = ApplicationService::new(Arc::new(UnavailableStore));

    assert!(matches!(
        service.submit(&student, &board.job.id),
        Err(ApplicationServiceError::Repository(_))
    ));
    assert!(board.store.job(&board.job.id).expect("read").is_some());
}
