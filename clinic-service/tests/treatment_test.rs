mod common;

use common::TestApp;
use serde_json::{json, Value};

async fn create_plan(app: &TestApp, body: Value) -> String {
    let plan = app.post_ok("/treatments", &body, 201).await;
    plan["_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn progress_blends_sessions_and_status() {
    let app = TestApp::spawn().await;

    let id = create_plan(
        &app,
        json!({
            "patientId": "patient-1",
            "dentistId": "dentist-1",
            "title": "Root canal and crown",
            "status": "in-progress",
            "plannedSessions": 4,
            "estimatedCost": 900,
            "actualCost": 1000,
            "paidAmount": 150,
            "advancePaid": 100
        }),
    )
    .await;

    for day in ["2024-03-04", "2024-03-11"] {
        app.post_ok(
            &format!("/treatments/{}/sessions", id),
            &json!({ "date": day, "durationMinutes": 60 }),
            201,
        )
        .await;
    }

    let response = app.get(&format!("/treatments/{}/progress", id)).await;
    assert_eq!(response.status().as_u16(), 200);
    let progress: Value = response.json().await.unwrap();

    assert_eq!(progress["sessionsPercent"], 50);
    assert_eq!(progress["paymentPercent"], 25);
    assert_eq!(progress["statusPercent"], 55);
    assert_eq!(progress["overallPercent"], 52);
    assert_eq!(progress["manualOverride"], false);

    app.cleanup().await;
}

#[tokio::test]
async fn first_session_starts_a_planned_treatment() {
    let app = TestApp::spawn().await;

    let id = create_plan(
        &app,
        json!({
            "patientId": "patient-2",
            "dentistId": "dentist-1",
            "title": "Orthodontic review",
            "plannedSessions": 2,
            "estimatedCost": 200
        }),
    )
    .await;

    let plan = app
        .post_ok(
            &format!("/treatments/{}/sessions", id),
            &json!({ "durationMinutes": 30, "notes": "Initial impressions" }),
            201,
        )
        .await;

    assert_eq!(plan["status"], "in-progress");
    assert_eq!(plan["sessions"].as_array().unwrap().len(), 1);

    app.cleanup().await;
}

#[tokio::test]
async fn payment_status_tracks_paid_and_advance() {
    let app = TestApp::spawn().await;

    let plan = app
        .post_ok(
            "/treatments",
            &json!({
                "patientId": "patient-3",
                "dentistId": "dentist-2",
                "title": "Implant",
                "plannedSessions": 3,
                "estimatedCost": "1500",
                "advancePaid": "500"
            }),
            201,
        )
        .await;
    assert_eq!(plan["paymentStatus"], "partial");

    let id = plan["_id"].as_str().unwrap();
    let response = app
        .put(&format!("/treatments/{}", id), &json!({ "paidAmount": "1000" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["paymentStatus"], "paid");

    app.cleanup().await;
}

#[tokio::test]
async fn manual_progress_override_is_reported() {
    let app = TestApp::spawn().await;

    let id = create_plan(
        &app,
        json!({
            "patientId": "patient-4",
            "dentistId": "dentist-2",
            "title": "Whitening course",
            "plannedSessions": 5,
            "estimatedCost": 300,
            "progressPercent": 80
        }),
    )
    .await;

    let progress: Value = app
        .get(&format!("/treatments/{}/progress", id))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(progress["overallPercent"], 80);
    assert_eq!(progress["sessionsPercent"], 0);
    assert_eq!(progress["manualOverride"], true);

    app.cleanup().await;
}

#[tokio::test]
async fn cancelled_treatment_rejects_sessions() {
    let app = TestApp::spawn().await;

    let id = create_plan(
        &app,
        json!({
            "patientId": "patient-5",
            "dentistId": "dentist-3",
            "title": "Bridge",
            "status": "cancelled",
            "plannedSessions": 2,
            "estimatedCost": 800
        }),
    )
    .await;

    let response = app
        .post(
            &format!("/treatments/{}/sessions", id),
            &json!({ "durationMinutes": 45 }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 409);

    app.cleanup().await;
}

#[tokio::test]
async fn payments_beyond_decimal_range_report_fully_paid() {
    let app = TestApp::spawn().await;

    let id = create_plan(
        &app,
        json!({
            "patientId": "patient-6",
            "dentistId": "dentist-3",
            "title": "Full mouth rehabilitation",
            "plannedSessions": 4,
            "estimatedCost": "0.01",
            "paidAmount": "79228162514264337593543950335",
            "advancePaid": "79228162514264337593543950335"
        }),
    )
    .await;

    let response = app.get(&format!("/treatments/{}/progress", id)).await;
    assert_eq!(response.status().as_u16(), 200);
    let progress: Value = response.json().await.unwrap();
    assert_eq!(progress["paymentPercent"], 100);

    let plan: Value = app
        .get(&format!("/treatments/{}", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(plan["paymentStatus"], "paid");

    app.cleanup().await;
}

#[tokio::test]
async fn status_filter_accepts_underscore_spelling() {
    let app = TestApp::spawn().await;

    create_plan(
        &app,
        json!({
            "patientId": "patient-7",
            "dentistId": "dentist-1",
            "title": "Periodontal therapy",
            "status": "in_progress",
            "plannedSessions": 3,
            "estimatedCost": 450
        }),
    )
    .await;
    create_plan(
        &app,
        json!({
            "patientId": "patient-8",
            "dentistId": "dentist-1",
            "title": "Sealants",
            "plannedSessions": 1,
            "estimatedCost": 90
        }),
    )
    .await;

    for spelling in ["in_progress", "in-progress"] {
        let listing: Value = app
            .get(&format!("/treatments?status={}", spelling))
            .await
            .json()
            .await
            .unwrap();
        assert_eq!(listing["total"], 1);
        assert_eq!(listing["data"][0]["status"], "in-progress");
    }

    app.cleanup().await;
}

