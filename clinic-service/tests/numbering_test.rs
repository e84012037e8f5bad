mod common;

use clinic_service::models::{Billing, Expense};
use common::{dated_prefix, TestApp};
use mongodb::bson::doc;
use serde_json::json;

fn expense_body(description: &str) -> serde_json::Value {
    json!({
        "category": "supplies",
        "description": description,
        "amount": "120.50",
        "tax": "9.64"
    })
}

#[tokio::test]
async fn first_code_continues_from_existing_documents() {
    let app = TestApp::spawn().await;

    // Three invoices written before the counter existed.
    let legacy: Vec<Billing> = (1..=3)
        .map(|n| {
            let mut billing = Billing::new(format!("patient-{}", n), "importer".to_string());
            billing.invoice_number = Some(format!("LEGACY-{}", n));
            billing
        })
        .collect();
    app.db
        .collection::<Billing>()
        .insert_many(&legacy, None)
        .await
        .expect("Failed to seed legacy invoices");

    let body = app
        .post_ok(
            "/billings",
            &json!({
                "patientId": "patient-9",
                "items": [{ "description": "Crown", "quantity": 1, "unitPrice": 700 }]
            }),
            201,
        )
        .await;

    assert_eq!(body["invoiceNumber"], format!("{}0004", dated_prefix("INV")));

    app.cleanup().await;
}

#[tokio::test]
async fn expense_codes_are_padded_to_six_digits() {
    let app = TestApp::spawn().await;

    let first = app.post_ok("/expenses", &expense_body("Gloves"), 201).await;
    assert_eq!(first["expenseId"], "EXP-000001");
    assert_eq!(first["subtotal"], "120.50");
    assert_eq!(first["total"], "130.14");
    assert_eq!(first["status"], "pending");

    app.cleanup().await;
}

#[tokio::test]
async fn deleted_documents_do_not_free_their_number() {
    let app = TestApp::spawn().await;

    let first = app.post_ok("/expenses", &expense_body("Masks"), 201).await;
    app.post_ok("/expenses", &expense_body("Bibs"), 201).await;

    app.db
        .collection::<Expense>()
        .delete_one(doc! { "_id": first["_id"].as_str().unwrap() }, None)
        .await
        .expect("Failed to delete expense");

    let third = app.post_ok("/expenses", &expense_body("Floss"), 201).await;
    assert_eq!(third["expenseId"], "EXP-000003");

    app.cleanup().await;
}

#[tokio::test]
async fn concurrent_creation_never_repeats_a_code() {
    let app = TestApp::spawn().await;

    let requests = (0..10).map(|n| {
        let app = &app;
        async move {
            app.post_ok("/expenses", &expense_body(&format!("Batch {}", n)), 201)
                .await
        }
    });
    let created = futures::future::join_all(requests).await;

    let mut codes: Vec<String> = created
        .iter()
        .map(|body| body["expenseId"].as_str().unwrap().to_string())
        .collect();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), 10);
    assert_eq!(codes.first().unwrap(), "EXP-000001");
    assert_eq!(codes.last().unwrap(), "EXP-000010");

    app.cleanup().await;
}

#[tokio::test]
async fn each_kind_keeps_its_own_sequence() {
    let app = TestApp::spawn().await;

    app.post_ok("/expenses", &expense_body("Gauze"), 201).await;
    let payment = app
        .post_ok(
            "/payments",
            &json!({ "patientId": "patient-1", "amount": 50, "method": "card" }),
            201,
        )
        .await;
    let employee = app
        .post_ok(
            "/employees",
            &json!({
                "firstName": "Asha",
                "lastName": "Rao",
                "role": "hygienist",
                "email": "Asha.Rao@example.com"
            }),
            201,
        )
        .await;

    assert_eq!(payment["paymentId"], "PAY-000001");
    assert_eq!(payment["status"], "completed");
    assert_eq!(employee["employeeId"], "EMP00001");
    assert_eq!(employee["fullName"], "Asha Rao");
    assert_eq!(employee["email"], "asha.rao@example.com");

    app.cleanup().await;
}
