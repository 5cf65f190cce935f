//! Endpoints of the remote pharmacy API
//!
//! [`PharmacyApi`] is the seam the entry layer depends on; [`HttpClient`]
//! is the production implementation.

use async_trait::async_trait;
use shared::client::{LoginRequest, LoginResponse};
use shared::models::{
    Customer, CustomerCreate, CustomerUpdate, Distributor, DistributorCreate, DistributorUpdate,
    InvoiceCheck, Medicine, MedicineBatch, PurchaseOrder, PurchaseOrderCreate, SellOrder,
    SellOrderCreate, StockItem,
};

use crate::{ClientResult, HttpClient};

#[async_trait]
pub trait PharmacyApi: Send + Sync {
    // ========== Auth ==========
    async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse>;

    // ========== Distributors ==========
    async fn list_distributors(&self) -> ClientResult<Vec<Distributor>>;
    async fn get_distributor(&self, id: i64) -> ClientResult<Distributor>;
    async fn create_distributor(&self, data: &DistributorCreate) -> ClientResult<Distributor>;
    async fn update_distributor(&self, id: i64, data: &DistributorUpdate) -> ClientResult<Distributor>;
    async fn delete_distributor(&self, id: i64) -> ClientResult<()>;

    // ========== Customers ==========
    async fn list_customers(&self) -> ClientResult<Vec<Customer>>;
    async fn create_customer(&self, data: &CustomerCreate) -> ClientResult<Customer>;
    async fn update_customer(&self, id: i64, data: &CustomerUpdate) -> ClientResult<Customer>;
    async fn delete_customer(&self, id: i64) -> ClientResult<()>;

    // ========== Medicines / Stock ==========
    async fn search_medicines(&self, term: &str) -> ClientResult<Vec<Medicine>>;
    async fn search_batches(&self, medicine_id: i64, term: &str) -> ClientResult<Vec<MedicineBatch>>;
    async fn list_stock(&self) -> ClientResult<Vec<StockItem>>;

    // ========== Purchase orders ==========
    async fn list_purchase_orders(&self) -> ClientResult<Vec<PurchaseOrder>>;
    async fn get_purchase_order(&self, id: i64) -> ClientResult<PurchaseOrder>;
    async fn create_purchase_order(&self, order: &PurchaseOrderCreate) -> ClientResult<PurchaseOrder>;
    async fn update_purchase_order(&self, id: i64, order: &PurchaseOrderCreate) -> ClientResult<PurchaseOrder>;
    async fn delete_purchase_order(&self, id: i64) -> ClientResult<()>;
    /// Whether `invoice_number` is already recorded for the distributor
    async fn check_duplicate_invoice(&self, invoice_number: &str, distributor_id: i64) -> ClientResult<bool>;

    // ========== Sell orders ==========
    async fn create_sell_order(&self, order: &SellOrderCreate) -> ClientResult<SellOrder>;
}

#[async_trait]
impl PharmacyApi for HttpClient {
    async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post("auth/login", &request).await
    }

    async fn list_distributors(&self) -> ClientResult<Vec<Distributor>> {
        self.get("distributors").await
    }

    async fn get_distributor(&self, id: i64) -> ClientResult<Distributor> {
        self.get(&format!("distributors/{id}")).await
    }

    async fn create_distributor(&self, data: &DistributorCreate) -> ClientResult<Distributor> {
        self.post("distributors", data).await
    }

    async fn update_distributor(&self, id: i64, data: &DistributorUpdate) -> ClientResult<Distributor> {
        self.put(&format!("distributors/{id}"), data).await
    }

    async fn delete_distributor(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("distributors/{id}")).await
    }

    async fn list_customers(&self) -> ClientResult<Vec<Customer>> {
        self.get("customers").await
    }

    async fn create_customer(&self, data: &CustomerCreate) -> ClientResult<Customer> {
        self.post("customers", data).await
    }

    async fn update_customer(&self, id: i64, data: &CustomerUpdate) -> ClientResult<Customer> {
        self.put(&format!("customers/{id}"), data).await
    }

    async fn delete_customer(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("customers/{id}")).await
    }

    async fn search_medicines(&self, term: &str) -> ClientResult<Vec<Medicine>> {
        self.get_with_query("medicines/search", &[("q", term)]).await
    }

    async fn search_batches(&self, medicine_id: i64, term: &str) -> ClientResult<Vec<MedicineBatch>> {
        self.get_with_query(&format!("medicines/{medicine_id}/batches"), &[("q", term)])
            .await
    }

    async fn list_stock(&self) -> ClientResult<Vec<StockItem>> {
        self.get("stock").await
    }

    async fn list_purchase_orders(&self) -> ClientResult<Vec<PurchaseOrder>> {
        self.get("purchase-orders").await
    }

    async fn get_purchase_order(&self, id: i64) -> ClientResult<PurchaseOrder> {
        self.get(&format!("purchase-orders/{id}")).await
    }

    async fn create_purchase_order(&self, order: &PurchaseOrderCreate) -> ClientResult<PurchaseOrder> {
        self.post("purchase-orders", order).await
    }

    async fn update_purchase_order(&self, id: i64, order: &PurchaseOrderCreate) -> ClientResult<PurchaseOrder> {
        self.put(&format!("purchase-orders/{id}"), order).await
    }

    async fn delete_purchase_order(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("purchase-orders/{id}")).await
    }

    async fn check_duplicate_invoice(&self, invoice_number: &str, distributor_id: i64) -> ClientResult<bool> {
        let distributor = distributor_id.to_string();
        let check: InvoiceCheck = self
            .get_with_query(
                "purchase-orders/check-invoice",
                &[
                    ("invoice_number", invoice_number),
                    ("distributor_id", distributor.as_str()),
                ],
            )
            .await?;
        Ok(check.exists)
    }

    async fn create_sell_order(&self, order: &SellOrderCreate) -> ClientResult<SellOrder> {
        self.post("sell-orders", order).await
    }
}
