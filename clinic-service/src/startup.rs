use crate::config::ClinicConfig;
use crate::handlers::{
    billings, employees, expenses, health, insurance_claims, inventory_items, inventory_orders,
    lab_works, payments, prescriptions, treatments,
};
use crate::services::{ClinicDb, Repository};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{make_request_span, metrics_middleware, request_id_middleware};
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: ClinicConfig,
    pub db: ClinicDb,
    pub repo: Repository,
}

impl AppState {
    pub fn new(config: ClinicConfig, db: ClinicDb) -> Self {
        let repo = Repository::new(db.clone());
        Self { config, db, repo }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/billings",
            post(billings::create_billing).get(billings::list_billings),
        )
        .route(
            "/billings/:id",
            get(billings::get_billing).put(billings::update_billing),
        )
        .route("/billings/:id/payments", post(billings::record_payment))
        .route("/billings/:id/status", post(billings::set_billing_status))
        .route(
            "/expenses",
            post(expenses::create_expense).get(expenses::list_expenses),
        )
        .route(
            "/expenses/:id",
            get(expenses::get_expense).put(expenses::update_expense),
        )
        .route("/expenses/:id/status", post(expenses::set_expense_status))
        .route(
            "/inventory-orders",
            post(inventory_orders::create_order).get(inventory_orders::list_orders),
        )
        .route(
            "/inventory-orders/:id",
            get(inventory_orders::get_order).put(inventory_orders::update_order),
        )
        .route(
            "/inventory-orders/:id/status",
            post(inventory_orders::set_order_payment_status),
        )
        .route(
            "/prescriptions",
            post(prescriptions::create_prescription).get(prescriptions::list_prescriptions),
        )
        .route(
            "/prescriptions/:id",
            get(prescriptions::get_prescription).put(prescriptions::update_prescription),
        )
        .route(
            "/insurance-claims",
            post(insurance_claims::create_claim).get(insurance_claims::list_claims),
        )
        .route(
            "/insurance-claims/:id",
            get(insurance_claims::get_claim).put(insurance_claims::update_claim),
        )
        .route(
            "/lab-works",
            post(lab_works::create_lab_work).get(lab_works::list_lab_works),
        )
        .route(
            "/lab-works/:id",
            get(lab_works::get_lab_work).put(lab_works::update_lab_work),
        )
        .route(
            "/payments",
            post(payments::create_payment).get(payments::list_payments),
        )
        .route("/payments/:id", get(payments::get_payment))
        .route(
            "/treatments",
            post(treatments::create_treatment).get(treatments::list_treatments),
        )
        .route(
            "/treatments/:id",
            get(treatments::get_treatment).put(treatments::update_treatment),
        )
        .route("/treatments/:id/sessions", post(treatments::add_session))
        .route("/treatments/:id/progress", get(treatments::get_progress))
        .route(
            "/employees",
            post(employees::create_employee).get(employees::list_employees),
        )
        .route(
            "/employees/:id",
            get(employees::get_employee).put(employees::update_employee),
        )
        .route(
            "/inventory-items",
            post(inventory_items::create_item).get(inventory_items::list_items),
        )
        .route(
            "/inventory-items/:id",
            get(inventory_items::get_item).put(inventory_items::update_item),
        )
        // Needs MatchedPath, so it must wrap routes rather than the router.
        .route_layer(from_fn(metrics_middleware));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::metrics_endpoint))
        .merge(api)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub struct Application {
    port: u16,
    server: Box<dyn Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    pub async fn build(config: ClinicConfig) -> Result<Self, AppError> {
        let db = ClinicDb::connect(&config.mongodb.uri, &config.mongodb.database)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                e
            })?;
        db.initialize_indexes().await.map_err(|e| {
            tracing::error!("Failed to initialize database indexes: {}", e);
            e
        })?;

        let state = AppState::new(config.clone(), db);
        let app = build_router(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .into_future();

        Ok(Self {
            port,
            server: Box::new(Box::pin(server)),
            state,
        })
    }

    pub fn db(&self) -> &ClinicDb {
        &self.state.db
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
