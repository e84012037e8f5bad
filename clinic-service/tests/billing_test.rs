mod common;

use common::{dated_prefix, TestApp, TEST_STAFF_ID};
use serde_json::{json, Value};

fn new_invoice() -> Value {
    json!({
        "patientId": "patient-001",
        "items": [
            { "description": "Root canal", "quantity": 1, "unitPrice": 450 },
            { "description": "Temporary crown", "quantity": 2, "unitPrice": "75" }
        ],
        "tax": 60,
        "discount": 100,
        "paidAmount": 200
    })
}

#[tokio::test]
async fn create_billing_computes_totals_and_assigns_code() {
    let app = TestApp::spawn().await;

    let body = app.post_ok("/billings", &new_invoice(), 201).await;

    assert_eq!(body["items"][0]["total"], "450");
    assert_eq!(body["items"][1]["total"], "150");
    assert_eq!(body["subtotal"], "600");
    assert_eq!(body["total"], "560");
    assert_eq!(body["paidAmount"], "200");
    assert_eq!(body["balanceDue"], "360");
    assert_eq!(body["status"], "partial");
    assert_eq!(body["createdBy"], TEST_STAFF_ID);
    assert_eq!(
        body["invoiceNumber"],
        format!("{}0001", dated_prefix("INV"))
    );

    let id = body["_id"].as_str().unwrap();
    let fetched: Value = app
        .get(&format!("/billings/{}", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["invoiceNumber"], body["invoiceNumber"]);
    assert_eq!(fetched["total"], "560");

    app.cleanup().await;
}

#[tokio::test]
async fn sequential_invoices_get_consecutive_codes() {
    let app = TestApp::spawn().await;
    let prefix = dated_prefix("INV");

    let first = app.post_ok("/billings", &new_invoice(), 201).await;
    let second = app.post_ok("/billings", &new_invoice(), 201).await;

    assert_eq!(first["invoiceNumber"], format!("{}0001", prefix));
    assert_eq!(second["invoiceNumber"], format!("{}0002", prefix));

    app.cleanup().await;
}

#[tokio::test]
async fn oversized_discount_floors_total_at_zero() {
    let app = TestApp::spawn().await;

    let body = app
        .post_ok(
            "/billings",
            &json!({
                "patientId": "patient-002",
                "items": [{ "description": "Consultation", "quantity": 1, "unitPrice": 100 }],
                "tax": 10,
                "discount": 150
            }),
            201,
        )
        .await;

    assert_eq!(body["total"], "0");
    assert_eq!(body["status"], "pending");

    app.cleanup().await;
}

#[tokio::test]
async fn payments_accumulate_and_overpayment_is_clamped() {
    let app = TestApp::spawn().await;

    let invoice = app
        .post_ok(
            "/billings",
            &json!({
                "patientId": "patient-003",
                "items": [{ "description": "Scaling", "quantity": 1, "unitPrice": 100 }]
            }),
            201,
        )
        .await;
    let id = invoice["_id"].as_str().unwrap();
    assert_eq!(invoice["status"], "pending");

    let partial = app
        .post_ok(
            &format!("/billings/{}/payments", id),
            &json!({ "amount": "40", "paymentMethod": "cash" }),
            200,
        )
        .await;
    assert_eq!(partial["paidAmount"], "40");
    assert_eq!(partial["status"], "partial");
    assert_eq!(partial["paymentMethod"], "cash");

    let paid = app
        .post_ok(
            &format!("/billings/{}/payments", id),
            &json!({ "amount": 110 }),
            200,
        )
        .await;
    assert_eq!(paid["paidAmount"], "100");
    assert_eq!(paid["status"], "paid");
    assert_eq!(paid["balanceDue"], "0");

    app.cleanup().await;
}

#[tokio::test]
async fn editing_items_recomputes_totals() {
    let app = TestApp::spawn().await;

    let invoice = app.post_ok("/billings", &new_invoice(), 201).await;
    let id = invoice["_id"].as_str().unwrap();

    let response = app
        .put(
            &format!("/billings/{}", id),
            &json!({
                "items": [{ "description": "Extraction", "quantity": 3, "unitPrice": "50.25" }],
                "discount": 0,
                "tax": 0
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let updated: Value = response.json().await.unwrap();

    assert_eq!(updated["subtotal"], "150.75");
    assert_eq!(updated["total"], "150.75");
    assert_eq!(updated["invoiceNumber"], invoice["invoiceNumber"]);
    // The earlier 200 now exceeds the new total.
    assert_eq!(updated["paidAmount"], "150.75");
    assert_eq!(updated["status"], "paid");

    app.cleanup().await;
}

#[tokio::test]
async fn cancelled_invoice_rejects_edits_and_payments() {
    let app = TestApp::spawn().await;

    let invoice = app.post_ok("/billings", &new_invoice(), 201).await;
    let id = invoice["_id"].as_str().unwrap();

    let cancelled = app
        .post_ok(
            &format!("/billings/{}/status", id),
            &json!({ "status": "cancelled" }),
            200,
        )
        .await;
    assert_eq!(cancelled["status"], "cancelled");

    let edit = app
        .put(&format!("/billings/{}", id), &json!({ "notes": "late" }))
        .await;
    assert_eq!(edit.status().as_u16(), 409);

    let payment = app
        .post(&format!("/billings/{}/payments", id), &json!({ "amount": 10 }))
        .await;
    assert_eq!(payment.status().as_u16(), 409);

    let overdue = app
        .post(&format!("/billings/{}/status", id), &json!({ "status": "overdue" }))
        .await;
    assert_eq!(overdue.status().as_u16(), 409);

    app.cleanup().await;
}

#[tokio::test]
async fn overdue_holds_until_fully_paid() {
    let app = TestApp::spawn().await;

    let invoice = app.post_ok("/billings", &new_invoice(), 201).await;
    let id = invoice["_id"].as_str().unwrap();

    let overdue = app
        .post_ok(
            &format!("/billings/{}/status", id),
            &json!({ "status": "overdue" }),
            200,
        )
        .await;
    assert_eq!(overdue["status"], "overdue");

    let still_overdue = app
        .post_ok(
            &format!("/billings/{}/payments", id),
            &json!({ "amount": 10 }),
            200,
        )
        .await;
    assert_eq!(still_overdue["status"], "overdue");

    let settled = app
        .post_ok(
            &format!("/billings/{}/payments", id),
            &json!({ "amount": 1000 }),
            200,
        )
        .await;
    assert_eq!(settled["status"], "paid");
    assert_eq!(settled["paidAmount"], "560");

    let again = app
        .post(&format!("/billings/{}/status", id), &json!({ "status": "overdue" }))
        .await;
    assert_eq!(again.status().as_u16(), 409);

    app.cleanup().await;
}

#[tokio::test]
async fn list_filters_by_status_including_legacy_spelling() {
    let app = TestApp::spawn().await;

    app.post_ok("/billings", &new_invoice(), 201).await;
    app.post_ok(
        "/billings",
        &json!({
            "patientId": "patient-004",
            "items": [{ "description": "Check-up", "quantity": 1, "unitPrice": 40 }]
        }),
        201,
    )
    .await;

    let all: Value = app.get("/billings").await.json().await.unwrap();
    assert_eq!(all["total"], 2);
    assert_eq!(all["totalPages"], 1);

    let partial: Value = app
        .get("/billings?status=partially-paid")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(partial["total"], 1);
    assert_eq!(partial["data"][0]["patientId"], "patient-001");

    app.cleanup().await;
}

#[tokio::test]
async fn payment_at_decimal_limit_settles_the_invoice() {
    let app = TestApp::spawn().await;

    let invoice = app
        .post_ok(
            "/billings",
            &json!({
                "patientId": "patient-006",
                "items": [{ "description": "Crown", "quantity": 1, "unitPrice": 600 }]
            }),
            201,
        )
        .await;
    let id = invoice["_id"].as_str().unwrap();

    app.post_ok(
        &format!("/billings/{}/payments", id),
        &json!({ "amount": 250 }),
        200,
    )
    .await;
    let paid = app
        .post_ok(
            &format!("/billings/{}/payments", id),
            &json!({ "amount": "79228162514264337593543950335" }),
            200,
        )
        .await;

    assert_eq!(paid["paidAmount"], "600");
    assert_eq!(paid["status"], "paid");
    assert_eq!(paid["balanceDue"], "0");

    app.cleanup().await;
}

#[tokio::test]
async fn oversized_line_is_rejected_without_using_a_code() {
    let app = TestApp::spawn().await;

    let response = app
        .post(
            "/billings",
            &json!({
                "patientId": "patient-007",
                "items": [{
                    "description": "Bulk supplies",
                    "quantity": 4000000000u32,
                    "unitPrice": "70000000000000000000000"
                }]
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Validation error");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("exceeds the largest supported amount"));

    let invoice = app
        .post_ok(
            "/billings",
            &json!({
                "patientId": "patient-007",
                "items": [{ "description": "Check-up", "quantity": 1, "unitPrice": 50 }]
            }),
            201,
        )
        .await;
    assert_eq!(invoice["invoiceNumber"], format!("{}0001", dated_prefix("INV")));

    app.cleanup().await;
}

#[tokio::test]
async fn unknown_invoice_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app.get("/billings/does-not-exist").await;
    assert_eq!(response.status().as_u16(), 404);

    app.cleanup().await;
}
