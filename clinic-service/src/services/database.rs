use crate::models::{
    Billing, Employee, Expense, InsuranceClaim, InventoryItem, InventoryOrder, LabWork, Payment,
    Prescription, Record, Treatment,
};
use crate::numbering::Coded;
use mongodb::{
    bson::doc, options::IndexOptions, Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct ClinicDb {
    client: MongoClient,
    db: Database,
}

impl ClinicDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for clinic-service");

        self.unique_code_index::<Billing>().await?;
        self.unique_code_index::<InventoryOrder>().await?;
        self.unique_code_index::<Expense>().await?;
        self.unique_code_index::<Payment>().await?;
        self.unique_code_index::<InsuranceClaim>().await?;
        self.unique_code_index::<Prescription>().await?;
        self.unique_code_index::<LabWork>().await?;
        self.unique_code_index::<Employee>().await?;
        self.unique_code_index::<InventoryItem>().await?;

        for collection in [
            Billing::COLLECTION,
            Payment::COLLECTION,
            InsuranceClaim::COLLECTION,
            Prescription::COLLECTION,
            LabWork::COLLECTION,
            Treatment::COLLECTION,
        ] {
            self.lookup_index(collection, "patientId").await?;
        }

        for collection in [
            Billing::COLLECTION,
            Expense::COLLECTION,
            InventoryOrder::COLLECTION,
            InsuranceClaim::COLLECTION,
            LabWork::COLLECTION,
            Treatment::COLLECTION,
        ] {
            self.lookup_index(collection, "status").await?;
        }

        Ok(())
    }

    async fn unique_code_index<T: Record + Coded>(&self) -> Result<(), AppError> {
        let field = T::KIND.code_field();
        let index = IndexModel::builder()
            .keys(doc! { field: 1 })
            .options(
                IndexOptions::builder()
                    .name(format!("{}_unique", field))
                    .unique(true)
                    .build(),
            )
            .build();

        self.db
            .collection::<mongodb::bson::Document>(T::COLLECTION)
            .create_index(index, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create unique {} index on {}: {}",
                    field,
                    T::COLLECTION,
                    e
                );
                AppError::from(e)
            })?;
        tracing::info!("Created unique index on {}.{}", T::COLLECTION, field);
        Ok(())
    }

    async fn lookup_index(&self, collection: &str, field: &str) -> Result<(), AppError> {
        let index = IndexModel::builder()
            .keys(doc! { field: 1, "createdAt": -1 })
            .options(
                IndexOptions::builder()
                    .name(format!("{}_lookup", field))
                    .build(),
            )
            .build();

        self.db
            .collection::<mongodb::bson::Document>(collection)
            .create_index(index, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create {} index on {}: {}",
                    field,
                    collection,
                    e
                );
                AppError::from(e)
            })?;
        tracing::info!("Created index on {}.{}", collection, field);
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn collection<T: Record>(&self) -> Collection<T> {
        self.db.collection(T::COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

