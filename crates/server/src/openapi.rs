use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RevenueDoc { pub month: String, pub revenue: i32 }

#[derive(ToSchema)]
pub struct LatestInvoiceDoc {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    /// Formatted, e.g. `$1,234.56`.
    pub amount: String,
}

#[derive(ToSchema)]
pub struct CardDataDoc {
    pub number_of_customers: u64,
    pub number_of_invoices: u64,
    pub total_paid_invoices: String,
    pub total_pending_invoices: String,
}

#[derive(ToSchema)]
pub struct InvoiceRowDoc {
    pub id: Uuid,
    pub customer_id: Uuid,
    /// Cents.
    pub amount: i64,
    pub status: String,
    /// RFC 3339 timestamp.
    pub date: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

#[derive(ToSchema)]
pub struct PageCountDoc { pub total_pages: u64 }

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct InvoiceFormDoc {
    pub customerId: Uuid,
    /// Major units, e.g. `12.50`.
    pub amount: String,
    /// `pending` or `paid`.
    pub status: String,
}

#[derive(ToSchema)]
pub struct CustomerDoc { pub id: Uuid, pub name: String, pub email: String, pub image_url: String }

#[derive(ToSchema)]
pub struct CustomerTableRowDoc {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: String,
    pub total_paid: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::dashboard::revenue,
        crate::routes::dashboard::latest_invoices,
        crate::routes::dashboard::cards,
        crate::routes::invoices::list,
        crate::routes::invoices::pages,
        crate::routes::invoices::create,
        crate::routes::invoices::get,
        crate::routes::invoices::update,
        crate::routes::customers::list,
        crate::routes::customers::table,
    ),
    components(
        schemas(
            HealthResponse,
            RevenueDoc,
            LatestInvoiceDoc,
            CardDataDoc,
            InvoiceRowDoc,
            PageCountDoc,
            InvoiceFormDoc,
            CustomerDoc,
            CustomerTableRowDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "dashboard"),
        (name = "invoices"),
        (name = "customers")
    )
)]
pub struct ApiDoc;
