use axum::{extract::State, Json};

use crate::{
    gate::Member,
    store::{Resource, ResourceStore},
    AppResult,
};

pub(crate) async fn listing<R: Resource>(
    _: Member,
    State(store): State<ResourceStore<R>>,
) -> AppResult<Json<Vec<R::Listing>>> {
    Ok(Json(store.listing().await?))
}
