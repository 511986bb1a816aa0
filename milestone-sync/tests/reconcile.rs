mod common;

use common::{client_for, issue, milestone, milestone_json, not_found, repo_path};
use milestone_sync::{
    apply_milestones, create_milestones, ErrorPolicy, MilestoneState, RequestError,
    UnresolvedMilestone,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn number_mode_creates_each_milestone_at_most_once() {
    let server = MockServer::start().await;
    for number in [1, 2] {
        let milestone_path = repo_path(&format!("milestones/{number}"));
        // Absent on the first lookup, present afterwards.
        Mock::given(method("GET"))
            .and(path(milestone_path.as_str()))
            .respond_with(ResponseTemplate::new(404).set_body_json(not_found()))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(milestone_path.as_str()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(milestone_json(number, "x", "open")),
            )
            .mount(&server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path(repo_path("milestones").as_str()))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(milestone_json(1, "Sprint 1", "open")),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let snapshot = vec![
        milestone(1, "Sprint 1", MilestoneState::Open),
        milestone(2, "Sprint 2", MilestoneState::Closed),
    ];

    let first = create_milestones(&client, &snapshot, true, ErrorPolicy::Log)
        .await
        .unwrap();
    let second = create_milestones(&client, &snapshot, true, ErrorPolicy::Log)
        .await
        .unwrap();

    assert_eq!((first.created, first.skipped), (2, 0));
    assert_eq!((second.created, second.skipped), (0, 2));
}

#[tokio::test]
async fn create_sends_optional_fields_only_when_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(repo_path("milestones").as_str()))
        .and(body_json(json!({
            "title": "Sprint 1",
            "state": "closed",
            "due_on": "2024-05-01T07:00:00Z",
            "description": "First sprint"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(milestone_json(1, "Sprint 1", "closed")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(repo_path("milestones").as_str()))
        .and(body_json(json!({ "title": "Sprint 2", "state": "open" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(milestone_json(2, "Sprint 2", "open")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut dated = milestone(1, "Sprint 1", MilestoneState::Closed);
    dated.due_on = "2024-05-01T07:00:00Z".to_string();
    dated.description = "First sprint".to_string();
    let snapshot = vec![dated, milestone(2, "Sprint 2", MilestoneState::Open)];

    let client = client_for(&server);
    let report = create_milestones(&client, &snapshot, false, ErrorPolicy::Fatal)
        .await
        .unwrap();

    assert_eq!(report.created, 2);
}

#[tokio::test]
async fn duplicate_title_is_logged_and_the_batch_continues() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(repo_path("milestones").as_str()))
        .and(body_partial_json(json!({ "title": "Sprint 1" })))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "errors": [{ "resource": "Milestone", "code": "already_exists", "field": "title" }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(repo_path("milestones").as_str()))
        .and(body_partial_json(json!({ "title": "Sprint 2" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(milestone_json(5, "Sprint 2", "open")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let snapshot = vec![
        milestone(1, "Sprint 1", MilestoneState::Open),
        milestone(2, "Sprint 2", MilestoneState::Open),
    ];
    let report = create_milestones(&client, &snapshot, false, ErrorPolicy::Log)
        .await
        .unwrap();

    assert_eq!(report.created, 1);
    assert_eq!(report.failed, 1);
}

#[tokio::test]
async fn applied_count_only_includes_successful_updates() {
    let server = MockServer::start().await;
    for number in 1..=5u64 {
        let response = if number == 2 || number == 4 {
            ResponseTemplate::new(500).set_body_json(json!({ "message": "Server Error" }))
        } else {
            ResponseTemplate::new(200).set_body_json(json!({ "number": number }))
        };
        Mock::given(method("PATCH"))
            .and(path(repo_path(&format!("issues/{number}")).as_str()))
            .and(body_json(json!({ "milestone": 7 })))
            .respond_with(response)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    let issues: Vec<_> = (1..=5).map(|number| issue(number, 7)).collect();
    let report = apply_milestones(
        &client,
        &issues,
        &[],
        true,
        UnresolvedMilestone::Skip,
        ErrorPolicy::Log,
    )
    .await
    .unwrap();

    assert_eq!(report.applied, 3);
    assert_eq!(report.failed, 2);
}

async fn mount_live_milestones(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(repo_path("milestones").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            milestone_json(10, "v2", "open"),
            milestone_json(11, "v1", "open")
        ])))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn title_mode_translates_numbers_and_skips_unresolved() {
    let server = MockServer::start().await;
    mount_live_milestones(&server).await;
    Mock::given(method("PATCH"))
        .and(path(repo_path("issues/100").as_str()))
        .and(body_json(json!({ "milestone": 10 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "number": 100 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(repo_path("issues/101").as_str()))
        .and(body_json(json!({ "milestone": 11 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "number": 101 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(repo_path("issues/102").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "number": 102 })))
        .expect(0)
        .mount(&server)
        .await;

    let source = vec![
        milestone(1, "v1", MilestoneState::Open),
        milestone(2, "v2", MilestoneState::Open),
    ];
    let issues = vec![issue(100, 2), issue(101, 1), issue(102, 3)];

    let client = client_for(&server);
    let report = apply_milestones(
        &client,
        &issues,
        &source,
        false,
        UnresolvedMilestone::Skip,
        ErrorPolicy::Fatal,
    )
    .await
    .unwrap();

    assert_eq!(report.applied, 2);
    assert_eq!(report.unresolved, 1);
    assert_eq!(report.failed, 0);
}

#[tokio::test]
async fn clear_policy_sends_null_for_unresolved_milestones() {
    let server = MockServer::start().await;
    mount_live_milestones(&server).await;
    Mock::given(method("PATCH"))
        .and(path(repo_path("issues/102").as_str()))
        .and(body_json(json!({ "milestone": null })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "number": 102 })))
        .expect(1)
        .mount(&server)
        .await;

    let source = vec![milestone(1, "v1", MilestoneState::Open)];
    let client = client_for(&server);
    let report = apply_milestones(
        &client,
        &[issue(102, 3)],
        &source,
        false,
        UnresolvedMilestone::Clear,
        ErrorPolicy::Fatal,
    )
    .await
    .unwrap();

    assert_eq!(report.applied, 1);
    assert_eq!(report.unresolved, 0);
}

#[tokio::test]
async fn fatal_policy_stops_at_the_first_failed_update() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(repo_path("issues/1").as_str()))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "Server Error" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(repo_path("issues/2").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "number": 2 })))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = apply_milestones(
        &client,
        &[issue(1, 4), issue(2, 4)],
        &[],
        true,
        UnresolvedMilestone::Skip,
        ErrorPolicy::Fatal,
    )
    .await;

    assert!(matches!(
        result,
        Err(RequestError::Status { status: 500, .. })
    ));
}
