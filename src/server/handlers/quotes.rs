use axum::extract::{Extension, Json};

use crate::api::DynAPI;
use crate::entities::{FareQuote, QuoteRequest, SmartQuote, SmartQuoteRequest};
use crate::error::Error;

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<FareQuote>, Error> {
    let quote = api.create_quote(request).await?;

    Ok(quote.into())
}

pub async fn create_smart(
    Extension(api): Extension<DynAPI>,
    Json(request): Json<SmartQuoteRequest>,
) -> Result<Json<SmartQuote>, Error> {
    let quote = api.create_smart_quote(request).await?;

    Ok(quote.into())
}
