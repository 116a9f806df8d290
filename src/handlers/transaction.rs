use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::TransactionService;

#[utoipa::path(
    post,
    path = "/transactions",
    tag = "transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction recorded", body = TransactionResponse),
        (status = 400, description = "Amount is not a parseable number", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_transaction(
    transaction_service: web::Data<TransactionService>,
    request: web::Json<CreateTransactionRequest>,
) -> Result<HttpResponse> {
    match transaction_service
        .create_transaction(request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Created().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/transactions",
    tag = "transactions",
    responses(
        (status = 200, description = "All transactions, newest first", body = [TransactionResponse]),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_transactions(
    transaction_service: web::Data<TransactionService>,
) -> Result<HttpResponse> {
    match transaction_service.list_transactions().await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/transactions/stats",
    tag = "transactions",
    responses(
        (status = 200, description = "Count, sum and average over all transactions", body = TransactionStatsResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_stats(
    transaction_service: web::Data<TransactionService>,
) -> Result<HttpResponse> {
    match transaction_service.get_stats().await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn transaction_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/transactions")
            .route("", web::post().to(create_transaction))
            .route("", web::get().to(list_transactions))
            .route("/stats", web::get().to(get_stats)),
    );
}
