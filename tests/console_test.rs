//! Console view-model tests against an in-memory backend

mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use common::{content, hospital, report, FakeAdmin, HOSPITAL_ID};
use reputation::api::ApiError;
use reputation::console::{
    Activation, ActionOutcome, AutoConfirm, ContentBoard, DomainPanel, DomainSection,
    HospitalList, NewHospitalForm, Phase, ProfileEditor, ReportBoard, ScheduleForm, TagField,
    TextField,
};
use reputation::console::reports;
use reputation::error::Error;
use reputation::models::{ContentAction, ContentStatus, Plan, Weekday};

fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Content board
// ============================================================================

fn board_fixture() -> FakeAdmin {
    FakeAdmin::with_contents(vec![
        content(1, "DRAFT", Some("하지정맥류 초기 증상")),
        content(2, "DRAFT", None),
        content(3, "READY", Some("탈장 수술 후 관리")),
        content(4, "PUBLISHED", Some("허리 디스크 Q&A")),
        content(5, "REJECTED", Some("반려된 글")),
    ])
}

/// Controls appear only on a generated draft
#[tokio::test]
async fn test_actions_only_on_generated_draft() {
    let api = board_fixture();
    let mut board = ContentBoard::new(&api, HOSPITAL_ID, "AE");
    board.load().await;

    let rows = board.rows();
    assert_eq!(rows.len(), 5);
    assert_eq!(
        rows[0].actions,
        &[ContentAction::Publish, ContentAction::Reject]
    );
    for row in &rows[1..] {
        assert!(row.actions.is_empty(), "{} should have no controls", row.position);
    }
    assert!(rows[1].title.is_none());
    assert_eq!(rows[0].position, "1/16");
}

/// Publishing sends no confirmation and reloads the list
#[tokio::test]
async fn test_publish_reloads_without_confirmation() {
    let api = board_fixture();
    let mut board = ContentBoard::new(&api, HOSPITAL_ID, "AE");
    board.load().await;

    let id = common::content_id(1);
    let outcome = board.publish(id).await;
    assert!(matches!(outcome, ActionOutcome::Done(Some(_))));

    let calls = api.calls();
    assert_eq!(
        calls,
        vec![
            "list_content".to_string(),
            format!("publish:{id}:AE"),
            "list_content".to_string(),
        ]
    );

    let items = board.items().data().unwrap();
    assert_eq!(items[0].status, ContentStatus::Published);
    assert!(board.rows()[0].actions.is_empty());
    assert!(!board.is_busy());
}

/// Reject asks first; declining sends nothing
#[tokio::test]
async fn test_reject_requires_confirmation() {
    let api = board_fixture();
    let mut board = ContentBoard::new(&api, HOSPITAL_ID, "AE");
    board.load().await;
    let id = common::content_id(1);

    let mut no = AutoConfirm::no();
    assert_eq!(board.reject(id, &mut no).await, ActionOutcome::Cancelled);
    assert_eq!(no.asked().len(), 1);
    assert_eq!(api.calls(), vec!["list_content".to_string()]);

    let mut yes = AutoConfirm::yes();
    assert_eq!(board.reject(id, &mut yes).await, ActionOutcome::Done(None));
    assert!(api.calls().contains(&format!("reject:{id}")));
    assert_eq!(
        board.items().data().unwrap()[0].status,
        ContentStatus::Rejected
    );
}

/// Items without controls never reach the backend
#[tokio::test]
async fn test_transition_on_non_draft_unavailable() {
    let api = board_fixture();
    let mut board = ContentBoard::new(&api, HOSPITAL_ID, "AE");
    board.load().await;

    for n in [2, 3, 4, 5] {
        let outcome = board.publish(common::content_id(n)).await;
        assert_eq!(outcome, ActionOutcome::Unavailable);
    }
    let outcome = board.publish(uuid::Uuid::nil()).await;
    assert_eq!(outcome, ActionOutcome::Unavailable);
    assert_eq!(api.calls(), vec!["list_content".to_string()]);
}

/// A refused transition keeps the list and shows the server text
#[tokio::test]
async fn test_failed_publish_keeps_state() {
    let mut api = board_fixture();
    api.fail_mutations = Some(ApiError::http(400, "Content already published"));
    let mut board = ContentBoard::new(&api, HOSPITAL_ID, "AE");
    board.load().await;

    let outcome = board.publish(common::content_id(1)).await;
    assert_eq!(
        outcome,
        ActionOutcome::Failed("Content already published".to_string())
    );
    assert_eq!(board.items().data().unwrap()[0].status, ContentStatus::Draft);
    assert!(!board.is_busy());
    // No reload after a failure
    assert_eq!(api.calls().len(), 2);
}

/// A request abandoned mid-flight releases the controls
#[tokio::test]
async fn test_abandoned_transition_releases_controls() {
    let api = board_fixture();
    api.hang_next_transition.store(true, Ordering::SeqCst);
    let mut board = ContentBoard::new(&api, HOSPITAL_ID, "AE");
    board.load().await;
    let id = common::content_id(1);

    let timed_out = tokio::time::timeout(Duration::from_millis(50), board.publish(id)).await;
    assert!(timed_out.is_err());

    assert!(!board.is_busy());
    assert!(board.rows()[0].enabled);
    assert!(board.render().contains("[발행] [반려]"));

    let mut yes = AutoConfirm::yes();
    assert_eq!(board.reject(id, &mut yes).await, ActionOutcome::Done(None));
    assert_eq!(
        board.items().data().unwrap()[0].status,
        ContentStatus::Rejected
    );
}

/// The detail view falls back to the list row when the detail call fails
#[tokio::test]
async fn test_detail_falls_back_to_row() {
    let mut api = board_fixture();
    api.fail_details = true;
    let mut board = ContentBoard::new(&api, HOSPITAL_ID, "AE");
    board.load().await;

    let id = common::content_id(1);
    let item = board.open_detail(id).await.unwrap();
    assert_eq!(item.title(), Some("하지정맥류 초기 증상"));
    assert!(item.body.is_none());

    assert!(board.open_detail(uuid::Uuid::nil()).await.is_none());
}

/// A successful detail call brings the body and closes after a transition
#[tokio::test]
async fn test_detail_then_publish_closes() {
    let api = board_fixture();
    let mut board = ContentBoard::new(&api, HOSPITAL_ID, "AE");
    board.load().await;

    let id = common::content_id(1);
    let item = board.open_detail(id).await.unwrap();
    assert_eq!(item.body.as_deref(), Some("## 본문"));

    board.publish(id).await;
    assert!(board.selected().is_none());
}

// ============================================================================
// Hospitals and schedule
// ============================================================================

#[tokio::test]
async fn test_hospital_list_rows() {
    let api = FakeAdmin::default();
    let mut list = HospitalList::new(&api);
    assert!(list.hospitals().is_loading());
    list.load().await;

    let rows = list.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].plan_label, "-");
    assert_eq!(rows[0].profile_mark, "⬜");
}

/// A blank name is rejected before any request
#[tokio::test]
async fn test_new_hospital_requires_name() {
    let api = FakeAdmin::default();
    let err = NewHospitalForm::new("   ", Plan::Plan16)
        .submit(&api)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(api.calls().is_empty());

    let created = NewHospitalForm::new(" 새병원 ", Plan::Plan12)
        .submit(&api)
        .await
        .unwrap();
    assert_eq!(created.name, "새병원");
    assert_eq!(api.calls(), vec!["create_hospital:새병원:PLAN_12".to_string()]);
}

/// No publish day means no network call
#[tokio::test]
async fn test_schedule_without_days_sends_nothing() {
    let api = FakeAdmin::default();
    let form = ScheduleForm::new(Plan::Plan8, Vec::<Weekday>::new(), date(2024, 3, 1));

    let err = form.submit(&api, HOSPITAL_ID).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_schedule_submit_orders_days() {
    let api = FakeAdmin::default();
    let mut form = ScheduleForm::new(Plan::Plan16, [Weekday::Fri], date(2024, 3, 1));
    assert!(form.toggle_day(Weekday::Tue));

    let summary = form.submit(&api, HOSPITAL_ID).await.unwrap();
    assert_eq!(summary.slots_created, 16);
    assert_eq!(api.calls(), vec!["set_schedule:PLAN_16:1,4".to_string()]);
}

// ============================================================================
// Profile and domain
// ============================================================================

/// Duplicate tags are dropped before saving
#[tokio::test]
async fn test_profile_tags_dedupe_and_save() {
    let api = FakeAdmin::with_hospital(hospital(false, false, None));
    let mut editor = ProfileEditor::new(&hospital(false, false, None));

    assert_eq!(editor.add_tags(TagField::Region, "서울, 서울,강남구"), 0);
    assert_eq!(editor.add_tags(TagField::Region, "서초구"), 1);
    assert_eq!(editor.tags(TagField::Region), ["서울", "강남구", "서초구"]);

    editor.add_tags(TagField::Keywords, "탈장\n하지정맥류");
    editor.set_text(TextField::Phone, "02-555-0000");
    editor.set_profile_complete(true);

    let saved = editor.save(&api).await.unwrap();
    assert_eq!(saved.region, ["서울", "강남구", "서초구"]);
    assert_eq!(saved.keywords, ["탈장", "하지정맥류"]);
    assert!(saved.profile_complete);
    assert_eq!(editor.text(TextField::Phone), "02-555-0000");
}

/// A failed save leaves the draft untouched
#[tokio::test]
async fn test_profile_save_failure_keeps_draft() {
    let mut api = FakeAdmin::with_hospital(hospital(false, false, None));
    api.fail_mutations = Some(ApiError::http(422, "phone is invalid"));
    let mut editor = ProfileEditor::new(&hospital(false, false, None));
    editor.set_text(TextField::Phone, "???");

    let err = editor.save(&api).await.unwrap_err();
    assert_eq!(err.to_string(), "phone is invalid");
    assert_eq!(editor.text(TextField::Phone), "???");
}

#[test]
fn test_domain_panel_states() {
    assert_eq!(
        DomainPanel::for_hospital(&hospital(false, false, Some("info.a.kr"))),
        DomainPanel::Hidden
    );
    assert_eq!(
        DomainPanel::for_hospital(&hospital(true, false, None)),
        DomainPanel::Editable {
            domain: None,
            can_activate: false
        }
    );
    assert!(DomainPanel::for_hospital(&hospital(true, false, Some("info.a.kr"))).can_activate());
    assert_eq!(
        DomainPanel::for_hospital(&hospital(true, true, Some("info.a.kr"))),
        DomainPanel::Live {
            domain: Some("info.a.kr".to_string())
        }
    );
}

/// Connect then activate, with the blank-domain and no-domain guards
#[tokio::test]
async fn test_domain_connect_and_activate() {
    let h = hospital(true, false, None);
    let api = FakeAdmin::with_hospital(h.clone());
    let mut section = DomainSection::new(&api, &h);

    let mut yes = AutoConfirm::yes();
    assert_eq!(section.activate(&mut yes).await.unwrap(), Activation::Unavailable);
    assert!(yes.asked().is_empty());

    assert!(!section.connect("   ").await.unwrap());
    assert!(api.calls().is_empty());

    assert!(section.connect(" info.jangpyeonhan.kr ").await.unwrap());
    assert!(section.panel().can_activate());

    let mut no = AutoConfirm::no();
    assert_eq!(section.activate(&mut no).await.unwrap(), Activation::Cancelled);

    assert_eq!(section.activate(&mut yes).await.unwrap(), Activation::Activated);
    assert!(matches!(section.panel(), DomainPanel::Live { .. }));
    assert_eq!(
        api.calls(),
        vec![
            "set_domain:info.jangpyeonhan.kr".to_string(),
            "activate".to_string()
        ]
    );
}

// ============================================================================
// Reports
// ============================================================================

#[tokio::test]
async fn test_report_rows_and_detail_fallback() {
    let api = FakeAdmin {
        reports: vec![report(1, Some("/r/1.pdf")), report(2, None)],
        fail_details: true,
        ..Default::default()
    };
    let mut board = ReportBoard::new(&api, HOSPITAL_ID);
    board.load().await;

    let rows = board.rows();
    assert_eq!(rows[0].period, "2024년 3월");
    assert!(rows[1].pdf.is_none(), "report without PDF is still generating");

    let id = common::report_id(2);
    let detail = board.open_detail(id).await.unwrap();
    assert_eq!(detail.id, id);
    assert!(matches!(board.reports(), Phase::Ready(_)));
}

/// "생성 중" belongs to the list; the detail view just omits the PDF line
#[tokio::test]
async fn test_generating_label_only_in_list() {
    let api = FakeAdmin {
        reports: vec![report(2, None)],
        ..Default::default()
    };
    let mut board = ReportBoard::new(&api, HOSPITAL_ID);
    board.load().await;
    assert!(board.render().contains("생성 중"));

    let detail = board.open_detail(common::report_id(2)).await.unwrap();
    let text = reports::render_detail(detail);
    assert!(!text.contains("생성 중"));
    assert!(!text.contains("PDF"));
}
