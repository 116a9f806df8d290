use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::transaction::create_transaction,
        handlers::transaction::list_transactions,
        handlers::transaction::get_stats,
        handlers::health::health,
    ),
    components(
        schemas(
            AmountInput,
            CreateTransactionRequest,
            TransactionResponse,
            TransactionStatsResponse,
            HealthResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "transactions", description = "Record and aggregate monetary transactions"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
