//! Meal ledger and metrics API handlers.
//!
//! ```text
//! POST   /api/v1/meals {"name":"Oats","description":"","date":"2024-05-01","time":"07:30","isOnDiet":true}
//! GET    /api/v1/meals
//! GET    /api/v1/meals/metrics
//! GET    /api/v1/meals/{id}
//! PUT    /api/v1/meals/{id} {"isOnDiet":false}
//! DELETE /api/v1/meals/{id}
//! ```
//!
//! Every handler takes the resolved [`CurrentUser`]; meals of other users
//! answer exactly like missing ones.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, MEAL_DATE_FORMAT, Meal, MealDraft, MealId, MealMetrics, MealName, MealPatch,
    TimeOfDay, parse_meal_date,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CurrentUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, meal_validation_error, require};

const NAME: FieldName = FieldName::new("name");
const DATE: FieldName = FieldName::new("date");
const TIME: FieldName = FieldName::new("time");
const ON_DIET: FieldName = FieldName::new("isOnDiet");

/// Request body for `POST /api/v1/meals`.
///
/// `hour` and `isOnADiet` are accepted as aliases of `time` and `isOnDiet`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    #[schema(example = "Porridge")]
    pub name: Option<String>,
    /// Defaults to empty.
    #[schema(example = "Oats with berries")]
    pub description: Option<String>,
    #[schema(example = "2024-05-01")]
    pub date: Option<String>,
    #[serde(alias = "hour")]
    #[schema(example = "07:30")]
    pub time: Option<String>,
    #[serde(alias = "isOnADiet")]
    pub is_on_diet: Option<bool>,
}

impl TryFrom<CreateMealRequest> for MealDraft {
    type Error = Error;

    fn try_from(value: CreateMealRequest) -> Result<Self, Self::Error> {
        let CreateMealRequest {
            name,
            description,
            date,
            time,
            is_on_diet,
        } = value;
        Ok(MealDraft {
            name: MealName::new(require(name, NAME)?).map_err(meal_validation_error)?,
            description: description.unwrap_or_default(),
            date: parse_meal_date(&require(date, DATE)?).map_err(meal_validation_error)?,
            time: require(time, TIME)?
                .parse::<TimeOfDay>()
                .map_err(meal_validation_error)?,
            on_diet: require(is_on_diet, ON_DIET)?,
        })
    }
}

/// Request body for `PUT /api/v1/meals/{id}`; absent fields keep their value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMealRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    #[serde(alias = "hour")]
    pub time: Option<String>,
    #[serde(alias = "isOnADiet")]
    pub is_on_diet: Option<bool>,
}

impl TryFrom<UpdateMealRequest> for MealPatch {
    type Error = Error;

    fn try_from(value: UpdateMealRequest) -> Result<Self, Self::Error> {
        let UpdateMealRequest {
            name,
            description,
            date,
            time,
            is_on_diet,
        } = value;
        Ok(MealPatch {
            name: name
                .map(MealName::new)
                .transpose()
                .map_err(meal_validation_error)?,
            description,
            date: date
                .as_deref()
                .map(parse_meal_date)
                .transpose()
                .map_err(meal_validation_error)?,
            time: time
                .as_deref()
                .map(str::parse::<TimeOfDay>)
                .transpose()
                .map_err(meal_validation_error)?,
            on_diet: is_on_diet,
        })
    }
}

/// A logged meal as returned to its owner.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealResponse {
    #[schema(example = "9b2f4c1e-7d3a-4e8b-a1c5-0f6d2e8b9a47")]
    pub id: String,
    #[schema(example = "Porridge")]
    pub name: String,
    pub description: String,
    #[schema(example = "2024-05-01")]
    pub date: String,
    /// Zero-padded `HH:MM`.
    #[schema(example = "07:30")]
    pub time: String,
    /// Minutes since midnight, `0..=1439`.
    #[schema(example = 450)]
    pub minute_of_day: u16,
    pub is_on_diet: bool,
    pub user_id: String,
}

impl From<Meal> for MealResponse {
    fn from(meal: Meal) -> Self {
        Self {
            id: meal.id().to_string(),
            name: meal.name().as_ref().to_owned(),
            description: meal.description().to_owned(),
            date: meal.date().format(MEAL_DATE_FORMAT).to_string(),
            time: meal.time().to_string(),
            minute_of_day: meal.time().minutes(),
            is_on_diet: meal.is_on_diet(),
            user_id: meal.owner().to_string(),
        }
    }
}

/// `{ "meal": ... }` envelope.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MealEnvelope {
    pub meal: MealResponse,
}

/// `{ "meals": [...] }` envelope.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MealsEnvelope {
    pub meals: Vec<MealResponse>,
}

/// Adherence metrics for the caller.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    pub total_meals: u64,
    pub total_on_diet_meals: u64,
    pub total_off_diet_meals: u64,
    /// Longest run of consecutive on-diet meals by date, then time.
    pub best_sequence: u64,
}

impl From<MealMetrics> for MetricsResponse {
    fn from(metrics: MealMetrics) -> Self {
        Self {
            total_meals: metrics.total,
            total_on_diet_meals: metrics.on_diet,
            total_off_diet_meals: metrics.off_diet,
            best_sequence: metrics.best_sequence,
        }
    }
}

fn parse_meal_id(raw: &str) -> Result<MealId, Error> {
    raw.parse().map_err(meal_validation_error)
}

/// Log a meal for the caller.
#[utoipa::path(
    post,
    path = "/api/v1/meals",
    request_body = CreateMealRequest,
    responses(
        (status = 201, description = "Meal logged", body = MealEnvelope,
            headers(("Location" = String, description = "URL of the new meal"))),
        (status = 400, description = "Invalid request or session", body = Error),
        (status = 401, description = "No session cookie", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["meals"],
    operation_id = "createMeal"
)]
#[post("/meals")]
pub async fn create_meal(
    state: web::Data<HttpState>,
    user: CurrentUser,
    payload: web::Json<CreateMealRequest>,
) -> ApiResult<HttpResponse> {
    let draft = MealDraft::try_from(payload.into_inner())?;
    let meal = state.meals.create_meal(user.id(), draft).await?;
    let location = format!("/api/v1/meals/{}", meal.id());
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(MealEnvelope { meal: meal.into() }))
}

/// List the caller's meals in storage order.
#[utoipa::path(
    get,
    path = "/api/v1/meals",
    responses(
        (status = 200, description = "Meals", body = MealsEnvelope),
        (status = 400, description = "Session matches no user", body = Error),
        (status = 401, description = "No session cookie", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["meals"],
    operation_id = "listMeals"
)]
#[get("/meals")]
pub async fn list_meals(
    state: web::Data<HttpState>,
    user: CurrentUser,
) -> ApiResult<web::Json<MealsEnvelope>> {
    let meals = state.meals_query.list_meals(user.id()).await?;
    Ok(web::Json(MealsEnvelope {
        meals: meals.into_iter().map(MealResponse::from).collect(),
    }))
}

/// Totals and best on-diet streak for the caller.
#[utoipa::path(
    get,
    path = "/api/v1/meals/metrics",
    responses(
        (status = 200, description = "Metrics", body = MetricsResponse),
        (status = 400, description = "Session matches no user", body = Error),
        (status = 401, description = "No session cookie", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["meals"],
    operation_id = "mealMetrics"
)]
#[get("/meals/metrics")]
pub async fn meal_metrics(
    state: web::Data<HttpState>,
    user: CurrentUser,
) -> ApiResult<web::Json<MetricsResponse>> {
    let metrics = state.metrics.meal_metrics(user.id()).await?;
    Ok(web::Json(metrics.into()))
}

/// Fetch one of the caller's meals.
#[utoipa::path(
    get,
    path = "/api/v1/meals/{id}",
    params(("id" = String, Path, description = "Meal identifier")),
    responses(
        (status = 200, description = "Meal", body = MealEnvelope),
        (status = 400, description = "Invalid id or session", body = Error),
        (status = 401, description = "No session cookie", body = Error),
        (status = 404, description = "Meal not found", body = Error)
    ),
    tags = ["meals"],
    operation_id = "getMeal"
)]
#[get("/meals/{id}")]
pub async fn get_meal(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<MealEnvelope>> {
    let id = parse_meal_id(&path)?;
    let meal = state.meals_query.get_meal(user.id(), &id).await?;
    Ok(web::Json(MealEnvelope { meal: meal.into() }))
}

/// Change any subset of a meal's fields.
#[utoipa::path(
    put,
    path = "/api/v1/meals/{id}",
    params(("id" = String, Path, description = "Meal identifier")),
    request_body = UpdateMealRequest,
    responses(
        (status = 204, description = "Meal updated"),
        (status = 400, description = "Invalid request or session", body = Error),
        (status = 401, description = "No session cookie", body = Error),
        (status = 404, description = "Meal not found", body = Error)
    ),
    tags = ["meals"],
    operation_id = "updateMeal"
)]
#[put("/meals/{id}")]
pub async fn update_meal(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
    payload: web::Json<UpdateMealRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_meal_id(&path)?;
    let patch = MealPatch::try_from(payload.into_inner())?;
    state.meals.update_meal(user.id(), &id, patch).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Remove one of the caller's meals.
#[utoipa::path(
    delete,
    path = "/api/v1/meals/{id}",
    params(("id" = String, Path, description = "Meal identifier")),
    responses(
        (status = 204, description = "Meal deleted"),
        (status = 400, description = "Invalid id or session", body = Error),
        (status = 401, description = "No session cookie", body = Error),
        (status = 404, description = "Meal not found", body = Error)
    ),
    tags = ["meals"],
    operation_id = "deleteMeal"
)]
#[delete("/meals/{id}")]
pub async fn delete_meal(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_meal_id(&path)?;
    state.meals.delete_meal(user.id(), &id).await?;
    Ok(HttpResponse::NoContent().finish())
}
