use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use models::drink::{DrinkLong, DrinkShort, RecipeInput};
use service::{auth::Claims, drinks};

use crate::{errors::JsonApiError, state::CoffeeState};

#[derive(Debug, Serialize)]
pub struct DrinksResponse<T> {
    pub success: bool,
    pub drinks: Vec<T>,
}

impl<T> DrinksResponse<T> {
    fn ok(drinks: Vec<T>) -> Json<Self> { Json(Self { success: true, drinks }) }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub delete: i32,
}

#[derive(Debug, Deserialize)]
pub struct NewDrink {
    pub title: String,
    pub recipe: RecipeInput,
}

/// Fields left out stay as they are.
#[derive(Debug, Default, Deserialize)]
pub struct DrinkPatch {
    pub title: Option<String>,
    pub recipe: Option<RecipeInput>,
}

#[utoipa::path(
    get, path = "/drinks", tag = "drinks",
    responses(
        (status = 200, description = "Menu without ingredient names"),
        (status = 404, description = "No drinks")
    )
)]
pub async fn list_drinks(State(state): State<CoffeeState>) -> Result<Json<DrinksResponse<DrinkShort>>, JsonApiError> {
    Ok(DrinksResponse::ok(drinks::menu(&state.db).await?))
}

#[utoipa::path(
    get, path = "/drinks-detail", tag = "drinks",
    responses(
        (status = 200, description = "Full recipes"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No drinks")
    ),
    security(("bearer" = ["get:drinks-detail"]))
)]
pub async fn drinks_detail(State(state): State<CoffeeState>) -> Result<Json<DrinksResponse<DrinkLong>>, JsonApiError> {
    Ok(DrinksResponse::ok(drinks::detailed_menu(&state.db).await?))
}

#[utoipa::path(
    post, path = "/drinks", tag = "drinks",
    request_body = crate::openapi::DrinkDoc,
    responses(
        (status = 200, description = "Created drink"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Unprocessable")
    ),
    security(("bearer" = ["post:drinks"]))
)]
pub async fn create_drink(
    State(state): State<CoffeeState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<NewDrink>, JsonRejection>,
) -> Result<Json<DrinksResponse<DrinkLong>>, JsonApiError> {
    let Json(input) = payload?;
    let recipe = input.recipe.into_parts();
    let created = drinks::create_drink(&state.db, &input.title, &recipe)
        .await
        .map_err(JsonApiError::mutation)?;
    info!(id = created.id, by = ?claims.sub, "drink added to menu");
    Ok(DrinksResponse::ok(vec![created]))
}

#[utoipa::path(
    patch, path = "/drinks/{id}", tag = "drinks",
    params(("id" = i32, Path, description = "Drink id")),
    request_body = crate::openapi::DrinkPatchDoc,
    responses(
        (status = 200, description = "Updated drink"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No such drink"),
        (status = 422, description = "Unprocessable")
    ),
    security(("bearer" = ["patch:drinks"]))
)]
pub async fn update_drink(
    State(state): State<CoffeeState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<DrinkPatch>, JsonRejection>,
) -> Result<Json<DrinksResponse<DrinkLong>>, JsonApiError> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    let recipe = patch.recipe.map(RecipeInput::into_parts);
    let updated = drinks::update_drink(&state.db, id, patch.title.as_deref(), recipe.as_deref())
        .await
        .map_err(JsonApiError::mutation)?;
    Ok(DrinksResponse::ok(vec![updated]))
}

#[utoipa::path(
    delete, path = "/drinks/{id}", tag = "drinks",
    params(("id" = i32, Path, description = "Drink id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No such drink")
    ),
    security(("bearer" = ["delete:drinks"]))
)]
pub async fn delete_drink(
    State(state): State<CoffeeState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<DeleteResponse>, JsonApiError> {
    let Path(id) = id?;
    let delete = drinks::delete_drink(&state.db, id).await.map_err(JsonApiError::mutation)?;
    Ok(Json(DeleteResponse { success: true, delete }))
}
