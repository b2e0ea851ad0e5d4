use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sixcities_core::{CreateOffer, OfferService, UpdateOffer};
use std::sync::Arc;

use crate::controller::{Controller, HttpMethod, RouteTable};
use crate::error::AppError;
use crate::extract::{PathParams, QueryParams, ValidatedJson};
use crate::rdo::{to_full, to_previews, OfferPreviewRdo, OfferRdo};

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumOffersQuery {
    pub city_id: Option<String>,
}

// ============================================================================
// Controller
// ============================================================================

pub struct OfferController {
    offer_service: Arc<dyn OfferService>,
    routes: RouteTable<Arc<OfferController>>,
}

impl OfferController {
    pub fn new(offer_service: Arc<dyn OfferService>) -> Self {
        tracing::info!("Register routes for OfferController...");

        let mut routes: RouteTable<Arc<Self>> = RouteTable::new();
        routes.add_route(HttpMethod::Get, "/", Self::index);
        routes.add_route(HttpMethod::Post, "/", Self::create);
        routes.add_route(HttpMethod::Get, "/premium", Self::get_premium_offers);
        routes.add_route(HttpMethod::Get, "/{offerId}", Self::get_offer);
        routes.add_route(HttpMethod::Patch, "/{offerId}", Self::update);
        routes.add_route(HttpMethod::Delete, "/{offerId}", Self::delete);

        Self { offer_service, routes }
    }

    /// GET /offers
    async fn index(
        State(controller): State<Arc<Self>>,
    ) -> Result<Json<Vec<OfferPreviewRdo>>, AppError> {
        let offers = controller.offer_service.find_all().await?;
        Ok(Json(to_previews(&offers)))
    }

    /// POST /offers
    async fn create(
        State(controller): State<Arc<Self>>,
        ValidatedJson(body): ValidatedJson<CreateOffer>,
    ) -> Result<(StatusCode, Json<OfferRdo>), AppError> {
        let offer = controller.offer_service.create(body).await?;
        Ok((StatusCode::CREATED, Json(to_full(&offer))))
    }

    /// GET /offers/premium?cityId=<city>
    async fn get_premium_offers(
        State(controller): State<Arc<Self>>,
        QueryParams(query): QueryParams<PremiumOffersQuery>,
    ) -> Result<Json<Vec<OfferPreviewRdo>>, AppError> {
        let city_id = query
            .city_id
            .ok_or_else(|| AppError::ValidationError("cityId query parameter is required".to_string()))?;

        let offers = controller.offer_service.find_premium_offers(&city_id).await?;
        Ok(Json(to_previews(&offers)))
    }

    /// GET /offers/{offerId}
    async fn get_offer(
        State(controller): State<Arc<Self>>,
        PathParams(offer_id): PathParams<String>,
    ) -> Result<Json<OfferRdo>, AppError> {
        let offer = controller
            .offer_service
            .find_by_id(&offer_id)
            .await?
            .ok_or_else(|| AppError::offer_not_found(&offer_id))?;

        Ok(Json(to_full(&offer)))
    }

    /// PATCH /offers/{offerId}
    async fn update(
        State(controller): State<Arc<Self>>,
        PathParams(offer_id): PathParams<String>,
        ValidatedJson(body): ValidatedJson<UpdateOffer>,
    ) -> Result<Json<OfferRdo>, AppError> {
        let offer = controller
            .offer_service
            .update_by_id(&offer_id, body)
            .await?
            .ok_or_else(|| AppError::offer_not_found(&offer_id))?;

        Ok(Json(to_full(&offer)))
    }

    /// DELETE /offers/{offerId}
    async fn delete(
        State(controller): State<Arc<Self>>,
        PathParams(offer_id): PathParams<String>,
    ) -> Result<StatusCode, AppError> {
        // Existence check and removal are one store call
        controller
            .offer_service
            .delete_by_id(&offer_id)
            .await?
            .ok_or_else(|| AppError::offer_not_found(&offer_id))?;

        Ok(StatusCode::NO_CONTENT)
    }
}

impl Controller for OfferController {
    fn routes(&self) -> &RouteTable<Arc<Self>> {
        &self.routes
    }
}
