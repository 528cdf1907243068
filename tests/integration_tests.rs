//! Integration tests for the site controller
//!
//! These tests drive the whole controller against a headless surface and a
//! mocked form endpoint, the way the browser binding does.

use protana_site::form::{ContactFields, FormClient, FormError};
use protana_site::i18n::{ContentTable, Language, ENGLISH_STRINGS, THAI_STRINGS};
use protana_site::preferences::MemoryStore;
use protana_site::{logging, HeadlessSurface, Severity, SiteConfig, SiteController};
use wiremock::{
    matchers::{body_string_contains, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

type Controller = SiteController<HeadlessSurface, MemoryStore>;

// ==================== Test Helpers ====================

fn content() -> ContentTable {
    let mut table = ContentTable::new();
    for (id, th, en) in [
        ("nav-home", "หน้าแรก", "Home"),
        ("nav-courses", "คอร์สเรียน", "Courses"),
        ("nav-contact", "ติดต่อ", "Contact"),
        ("hero-title", "เรียนกอล์ฟกับโปรธนา", "Learn golf with Pro Tana"),
    ] {
        table.register(id.into(), Some(th.to_string()), Some(en.to_string()));
    }
    table
}

fn create_controller(address: &str, store: MemoryStore) -> Controller {
    logging::init();

    let mut controller = SiteController::new(
        SiteConfig::default(),
        HeadlessSurface::with_address(address),
        store,
        content(),
    );
    controller.start(address, 0.0);
    controller
}

fn create_default_controller() -> Controller {
    create_controller("https://protana.example/", MemoryStore::new())
}

fn filled_form() -> ContactFields {
    ContactFields {
        name: "Somchai Jaidee".to_string(),
        phone: "081-234-5678".to_string(),
        email: "somchai@example.com".to_string(),
        course: "private".to_string(),
        message: "Can I book a lesson on Saturday?".to_string(),
        extra: Vec::new(),
    }
}

async fn mock_endpoint(status: u16) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/f/contact"))
        .and(header("Accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(status).set_body_json(serde_json::json!({"ok": status == 200})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    mock_server
}

fn client_for(mock_server: &MockServer) -> FormClient {
    FormClient::new(format!("{}/f/contact", mock_server.uri()))
}

// ==================== Submission Flow Tests ====================

#[tokio::test]
async fn test_successful_submission_clears_form() {
    let mock_server = mock_endpoint(200).await;
    let client = client_for(&mock_server);

    let mut controller = create_default_controller();
    controller.surface_mut().form = filled_form();

    let result = controller.submit_contact(&client).await;

    assert_eq!(result, Some(Ok(())));
    let surface = controller.surface();
    assert_eq!(surface.form, ContactFields::default());
    assert!(!surface.submit.busy);
    assert_eq!(surface.submit.label, "Send");

    let notification = surface.visible_notification().expect("Should notify");
    assert_eq!(notification.severity, Severity::Success);
    assert_eq!(notification.message, THAI_STRINGS.submit_success);
}

#[tokio::test]
async fn test_rejected_submission_keeps_form() {
    let mock_server = mock_endpoint(400).await;
    let client = client_for(&mock_server);

    let mut controller = create_default_controller();
    controller.surface_mut().form = filled_form();

    let result = controller.submit_contact(&client).await;

    assert!(matches!(result, Some(Err(FormError::Network(_)))));
    let surface = controller.surface();
    assert_eq!(surface.form, filled_form());
    assert!(!surface.submit.busy);
    assert_eq!(surface.submit.label, "Send");
    assert_eq!(
        surface.visible_notification().map(|n| n.message.as_str()),
        Some(THAI_STRINGS.submit_failed)
    );
}

#[tokio::test]
async fn test_transport_failure_same_message_as_rejection() {
    let client = FormClient::new("http://127.0.0.1:9/f/contact");

    let mut controller = create_default_controller();
    controller.surface_mut().form = filled_form();

    let result = controller.submit_contact(&client).await;

    assert!(matches!(result, Some(Err(FormError::Network(_)))));
    let surface = controller.surface();
    assert_eq!(surface.form, filled_form());
    assert_eq!(
        surface.visible_notification().map(|n| n.message.as_str()),
        Some(THAI_STRINGS.submit_failed)
    );
}

#[tokio::test]
async fn test_missing_message_never_reaches_endpoint() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    let client = client_for(&mock_server);

    let mut controller = create_default_controller();
    controller.surface_mut().form = ContactFields {
        message: String::new(),
        ..filled_form()
    };

    let result = controller.submit_contact(&client).await;

    assert_eq!(result, Some(Err(FormError::MissingFields)));
    assert_eq!(
        controller.surface().visible_notification().map(|n| n.message.as_str()),
        Some(THAI_STRINGS.missing_fields)
    );
}

#[test]
fn test_phone_formats_through_full_flow() {
    let cases = [
        ("0812345678", true),
        ("081-234-5678", true),
        ("0812345", false),
    ];

    for (phone, accepted) in cases {
        let mut controller = create_default_controller();
        controller.surface_mut().form = ContactFields {
            phone: phone.to_string(),
            ..filled_form()
        };

        let begun = controller.begin_submit().expect("Not in flight");
        if accepted {
            assert!(begun.is_ok(), "{} should be accepted", phone);
            controller.finish_submit(Ok(()));
        } else {
            assert_eq!(begun, Err(FormError::InvalidPhone), "{} should be rejected", phone);
        }
    }
}

#[tokio::test]
async fn test_submission_posts_every_field() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("name=Somchai+Jaidee"))
        .and(body_string_contains("course=private"))
        .and(body_string_contains("email=somchai%40example.com"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = FormClient::new(mock_server.uri());

    let mut controller = create_default_controller();
    controller.surface_mut().form = filled_form();

    assert_eq!(controller.submit_contact(&client).await, Some(Ok(())));
}

#[tokio::test]
async fn test_hidden_form_fields_reach_endpoint() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("_subject=Lesson+enquiry"))
        .and(body_string_contains("_gotcha="))
        .and(body_string_contains("message=Can+I+book"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = FormClient::new(mock_server.uri());

    let mut controller = create_default_controller();
    controller.surface_mut().form = ContactFields::from_entries(vec![
        ("name".to_string(), "Somchai Jaidee".to_string()),
        ("phone".to_string(), "081-234-5678".to_string()),
        ("message".to_string(), "Can I book a lesson on Saturday?".to_string()),
        ("_subject".to_string(), "Lesson enquiry".to_string()),
        ("_gotcha".to_string(), String::new()),
    ]);

    assert_eq!(controller.submit_contact(&client).await, Some(Ok(())));
}

#[tokio::test]
async fn test_english_visitor_gets_english_messages() {
    let mock_server = mock_endpoint(200).await;
    let client = client_for(&mock_server);

    let mut controller =
        create_controller("https://protana.example/", MemoryStore::with_value("language", "en"));
    controller.surface_mut().form = filled_form();

    controller.submit_contact(&client).await;

    assert_eq!(
        controller.surface().visible_notification().map(|n| n.message.as_str()),
        Some(ENGLISH_STRINGS.submit_success)
    );
}

// ==================== Language Tests ====================

#[test]
fn test_toggle_language_twice_round_trips() {
    let mut controller = create_default_controller();
    let original_texts = controller.surface().texts.clone();

    assert_eq!(controller.toggle_language(), Language::ENGLISH);
    assert_eq!(controller.surface().text("hero-title"), Some("Learn golf with Pro Tana"));
    assert_eq!(controller.store().get("language"), Some("en"));

    assert_eq!(controller.toggle_language(), Language::THAI);
    assert_eq!(controller.surface().texts, original_texts);
    assert_eq!(controller.store().get("language"), Some("th"));
}

#[test]
fn test_language_persists_across_page_loads() {
    let mut first_visit = create_default_controller();
    first_visit.toggle_language();
    let store = first_visit.store().clone();

    let second_visit = create_controller("https://protana.example/", store);

    assert_eq!(second_visit.language(), Language::ENGLISH);
    assert_eq!(second_visit.surface().text("nav-home"), Some("Home"));
    assert_eq!(second_visit.surface().language_indicator, "TH");
}

// ==================== Redirect Tests ====================

#[test]
fn test_success_redirect_notifies_once() {
    let mut controller = create_controller(
        "https://protana.example/index.html?success=1",
        MemoryStore::new(),
    );

    let surface = controller.surface();
    assert_eq!(surface.notifications.len(), 1);
    assert_eq!(surface.notifications[0].severity, Severity::Success);
    assert_eq!(surface.address, "/index.html");
    assert!(!surface.address.contains("success"));

    // Later events do not bring it back
    controller.on_scroll(10.0);
    controller.surface_mut().advance_clock(5300.0);
    controller.on_timer();
    assert!(controller.surface().notifications.is_empty());
}

// ==================== Menu Tests ====================

#[test]
fn test_every_close_trigger_closes_menu() {
    let mut controller = create_default_controller();

    controller.toggle_menu();
    controller.on_nav_link_click();
    assert!(!controller.menu_open());

    controller.toggle_menu();
    controller.on_document_click(false, false);
    assert!(!controller.menu_open());

    controller.toggle_menu();
    controller.on_resize(1280.0);
    assert!(!controller.menu_open());

    controller.toggle_menu();
    controller.on_anchor_click("#contact", Some(900.0));
    assert!(!controller.menu_open());

    let renders = controller.surface().menu_renders;
    controller.close_menu();
    assert_eq!(controller.surface().menu_renders, renders);
}

// ==================== Notification Tests ====================

#[test]
fn test_new_notification_replaces_visible_one() {
    let mut controller = create_default_controller();

    let first = controller.notify("first", Severity::Info);
    controller.surface_mut().advance_clock(1000.0);
    let second = controller.notify("second", Severity::Error);

    let surface = controller.surface();
    assert_eq!(surface.notifications.len(), 1);
    assert_eq!(surface.notifications[0].id, second);
    assert!(surface.removed.contains(&first));

    // Only the second notification's lifetime is pending
    assert_eq!(controller.next_timer_deadline(), Some(6000.0));
}
