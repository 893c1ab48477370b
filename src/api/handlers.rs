use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::logic::records::{self, LocationLookup};
use crate::model::{Location, Pokemon, RecordId};
use crate::store::error::StoreError;
use crate::store::traits::RecordStore;

pub type AppState<S> = Arc<S>;

const POKEMONS_URL: &str = "/api/pokemons";
const ONE_POKEMON_URL: &str = "/api/onepokemon";
const PAGE_OFFSET_URL: &str = "/api/pageoffset/pokemons";

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Error envelope shared by every endpoint: `success` is false and the
/// reason is a human-readable `message`.
#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub url: &'static str,
    pub method: &'static str,
    pub message: String,
}

type Failure = (StatusCode, Json<FailureResponse>);

fn failure(
    status: StatusCode,
    url: &'static str,
    method: &'static str,
    message: impl Into<String>,
) -> Failure {
    (
        status,
        Json(FailureResponse {
            success: false,
            url,
            method,
            message: message.into(),
        }),
    )
}

fn storage_failure(url: &'static str, method: &'static str, err: StoreError) -> Failure {
    log::error!("{} {}: storage failure: {}", method, url, err);
    failure(StatusCode::INTERNAL_SERVER_ERROR, url, method, err.to_string())
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn parse_id_value(value: &serde_json::Value) -> Option<RecordId> {
    match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_index(field: &Option<String>) -> Option<usize> {
    field.as_deref().and_then(|s| s.trim().parse().ok())
}

// ---- GET /api/pokemons ----

#[derive(Debug, Serialize)]
pub struct ListPokemonsResponse {
    pub success: bool,
    pub url: &'static str,
    pub method: &'static str,
    pub pokemons: Vec<Pokemon>,
}

pub async fn list_pokemons<S: RecordStore>(
    State(store): State<AppState<S>>,
) -> Result<Json<ListPokemonsResponse>, Failure> {
    let pokemons = store
        .load()
        .await
        .map_err(|e| storage_failure(POKEMONS_URL, "GET", e))?;
    Ok(Json(ListPokemonsResponse {
        success: true,
        url: POKEMONS_URL,
        method: "GET",
        pokemons,
    }))
}

// ---- POST /api/pokemons ----

#[derive(Debug, Deserialize)]
pub struct NewPokemonRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedPokemonResponse {
    pub success: bool,
    pub url: &'static str,
    pub method: &'static str,
    pub message: String,
    #[serde(rename = "newPokemon")]
    pub new_pokemon: Pokemon,
}

pub async fn create_pokemon<S: RecordStore>(
    State(store): State<AppState<S>>,
    RequestJson(body): RequestJson<NewPokemonRequest>,
) -> Result<(StatusCode, Json<CreatedPokemonResponse>), Failure> {
    let (name, kind) = match (non_empty(&body.name), non_empty(&body.kind)) {
        (Some(name), Some(kind)) => (name.to_string(), kind.to_string()),
        _ => {
            return Err(failure(
                StatusCode::BAD_REQUEST,
                POKEMONS_URL,
                "POST",
                "name and type is required",
            ))
        }
    };

    let new_pokemon = store
        .mutate(move |pokemons| {
            let record = Pokemon::new(records::next_id(pokemons), name, kind);
            pokemons.push(record.clone());
            record
        })
        .await
        .map_err(|e| storage_failure(POKEMONS_URL, "POST", e))?;

    log::info!("created pokemon {} ({})", new_pokemon.id, new_pokemon.name);
    Ok((
        StatusCode::CREATED,
        Json(CreatedPokemonResponse {
            success: true,
            url: POKEMONS_URL,
            method: "POST",
            message: "pokemon added successfully".to_string(),
            new_pokemon,
        }),
    ))
}

// ---- DELETE /api/pokemons ----

#[derive(Debug, Deserialize)]
pub struct DeletePokemonRequest {
    pub id: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct DeletedRecord {
    pub id: RecordId,
}

#[derive(Debug, Serialize)]
pub struct DeletedPokemonResponse {
    pub success: bool,
    pub url: &'static str,
    pub method: &'static str,
    pub message: String,
    #[serde(rename = "deletePokemon")]
    pub deleted: DeletedRecord,
}

pub async fn delete_pokemon<S: RecordStore>(
    State(store): State<AppState<S>>,
    RequestJson(body): RequestJson<DeletePokemonRequest>,
) -> Result<Json<DeletedPokemonResponse>, Failure> {
    let id = match &body.id {
        None => {
            return Err(failure(
                StatusCode::BAD_REQUEST,
                POKEMONS_URL,
                "DELETE",
                "id is required",
            ))
        }
        Some(value) => parse_id_value(value).ok_or_else(|| {
            failure(
                StatusCode::BAD_REQUEST,
                POKEMONS_URL,
                "DELETE",
                "id must be an integer",
            )
        })?,
    };

    // Saves even when nothing matched; deleting an unknown id reports
    // success rather than not-found.
    let removed = store
        .mutate(move |pokemons| records::remove_by_id(pokemons, id))
        .await
        .map_err(|e| storage_failure(POKEMONS_URL, "DELETE", e))?;

    log::info!("deleted {} record(s) with id {}", removed, id);
    Ok(Json(DeletedPokemonResponse {
        success: true,
        url: POKEMONS_URL,
        method: "DELETE",
        message: "pokemon deleted successfully".to_string(),
        deleted: DeletedRecord { id },
    }))
}

// ---- GET /api/onepokemon?id= and GET /api/pokemons/:id ----

#[derive(Debug, Deserialize)]
pub struct OnePokemonQuery {
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PokemonResponse {
    pub success: bool,
    pub url: &'static str,
    pub method: &'static str,
    pub message: String,
    pub pokemon: Pokemon,
}

fn found_pokemon(url: &'static str, pokemon: Pokemon) -> Json<PokemonResponse> {
    Json(PokemonResponse {
        success: true,
        url,
        method: "GET",
        message: "pokemon found successfully".to_string(),
        pokemon,
    })
}

pub async fn find_pokemon_by_query<S: RecordStore>(
    State(store): State<AppState<S>>,
    Query(query): Query<OnePokemonQuery>,
) -> Result<Json<PokemonResponse>, Failure> {
    let raw = query.id.ok_or_else(|| {
        failure(
            StatusCode::BAD_REQUEST,
            ONE_POKEMON_URL,
            "GET",
            "id is required",
        )
    })?;
    let id: RecordId = raw.trim().parse().map_err(|_| {
        failure(
            StatusCode::BAD_REQUEST,
            ONE_POKEMON_URL,
            "GET",
            "id must be an integer",
        )
    })?;

    let pokemons = store
        .load()
        .await
        .map_err(|e| storage_failure(ONE_POKEMON_URL, "GET", e))?;
    match records::find_by_id(&pokemons, id) {
        Some(pokemon) => Ok(found_pokemon(ONE_POKEMON_URL, pokemon.clone())),
        None => Err(failure(
            StatusCode::NOT_FOUND,
            ONE_POKEMON_URL,
            "GET",
            format!("pokemon {} not found", id),
        )),
    }
}

pub async fn find_pokemon_by_path<S: RecordStore>(
    State(store): State<AppState<S>>,
    Path(id): Path<RecordId>,
) -> Result<Json<PokemonResponse>, Failure> {
    let pokemons = store
        .load()
        .await
        .map_err(|e| storage_failure(POKEMONS_URL, "GET", e))?;
    match records::find_by_id(&pokemons, id) {
        Some(pokemon) => Ok(found_pokemon(POKEMONS_URL, pokemon.clone())),
        None => Err(failure(
            StatusCode::NOT_FOUND,
            POKEMONS_URL,
            "GET",
            format!("pokemon {} not found", id),
        )),
    }
}

// ---- PUT /api/pokemons/:id ----

#[derive(Debug, Deserialize)]
pub struct UpdatePokemonRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdatedPokemonResponse {
    pub success: bool,
    pub url: &'static str,
    pub method: &'static str,
    pub message: String,
    pub pokemon: RecordId,
}

pub async fn update_pokemon<S: RecordStore>(
    State(store): State<AppState<S>>,
    Path(id): Path<RecordId>,
    RequestJson(body): RequestJson<UpdatePokemonRequest>,
) -> Result<Json<UpdatedPokemonResponse>, Failure> {
    let name = body.name;
    let kind = body.kind;
    let updated = store
        .try_mutate(move |pokemons| {
            let record = pokemons.iter_mut().find(|p| p.id == id)?;
            records::apply_update(record, name.as_deref(), kind.as_deref());
            Some(record.id)
        })
        .await
        .map_err(|e| storage_failure(POKEMONS_URL, "PUT", e))?;

    match updated {
        Some(id) => Ok(Json(UpdatedPokemonResponse {
            success: true,
            url: POKEMONS_URL,
            method: "PUT",
            message: "pokemon updated successfully".to_string(),
            pokemon: id,
        })),
        None => Err(failure(
            StatusCode::NOT_FOUND,
            POKEMONS_URL,
            "PUT",
            format!("pokemon {} not found", id),
        )),
    }
}

// ---- GET /api/pokemons/page/:page ----

#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub success: bool,
    pub url: &'static str,
    pub method: &'static str,
    pub message: String,
    pub page: usize,
    #[serde(rename = "numPages")]
    pub num_pages: usize,
    pub pokemons: Vec<Pokemon>,
}

pub async fn paginate_pokemons<S: RecordStore>(
    State(store): State<AppState<S>>,
    Path(page): Path<usize>,
) -> Result<Json<PageResponse>, Failure> {
    let pokemons = store
        .load()
        .await
        .map_err(|e| storage_failure(POKEMONS_URL, "GET", e))?;

    let slice = records::page_slice(&pokemons, page).to_vec();
    Ok(Json(PageResponse {
        success: true,
        url: POKEMONS_URL,
        method: "GET",
        message: "paginated pokedex".to_string(),
        page,
        num_pages: records::page_count(pokemons.len()),
        pokemons: slice,
    }))
}

// ---- GET /api/pageoffset/pokemons?offset=&limit= ----

#[derive(Debug, Deserialize)]
pub struct PageOffsetQuery {
    pub offset: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OffsetPageResponse {
    pub success: bool,
    pub url: &'static str,
    pub method: &'static str,
    pub message: String,
    pub pokemons: Vec<Pokemon>,
}

pub async fn paginate_by_offset<S: RecordStore>(
    State(store): State<AppState<S>>,
    Query(query): Query<PageOffsetQuery>,
) -> Result<Json<OffsetPageResponse>, Failure> {
    let (offset, limit) = match (parse_index(&query.offset), parse_index(&query.limit)) {
        (Some(offset), Some(limit)) => (offset, limit),
        _ => {
            return Err(failure(
                StatusCode::BAD_REQUEST,
                PAGE_OFFSET_URL,
                "GET",
                "offset and limit are required",
            ))
        }
    };

    let pokemons = store
        .load()
        .await
        .map_err(|e| storage_failure(PAGE_OFFSET_URL, "GET", e))?;

    let slice = records::offset_slice(&pokemons, offset, limit).to_vec();
    Ok(Json(OffsetPageResponse {
        success: true,
        url: PAGE_OFFSET_URL,
        method: "GET",
        message: "offset pokedex".to_string(),
        pokemons: slice,
    }))
}

// ---- GET /api/pokemons/:id/locations/:location_id ----

#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub success: bool,
    pub url: &'static str,
    pub method: &'static str,
    pub message: String,
    pub pokemon: RecordId,
    pub location: Location,
}

pub async fn find_pokemon_location<S: RecordStore>(
    State(store): State<AppState<S>>,
    Path((pokemon_id, location_id)): Path<(RecordId, RecordId)>,
) -> Result<Json<LocationResponse>, Failure> {
    let pokemons = store
        .load()
        .await
        .map_err(|e| storage_failure(POKEMONS_URL, "GET", e))?;

    match records::find_location(&pokemons, pokemon_id, location_id) {
        LocationLookup::Found {
            pokemon_id,
            location,
        } => Ok(Json(LocationResponse {
            success: true,
            url: POKEMONS_URL,
            method: "GET",
            message: "pokemon location found".to_string(),
            pokemon: pokemon_id,
            location: location.clone(),
        })),
        LocationLookup::PokemonMissing => Err(failure(
            StatusCode::NOT_FOUND,
            POKEMONS_URL,
            "GET",
            format!("pokemon {} not found", pokemon_id),
        )),
        LocationLookup::LocationMissing => Err(failure(
            StatusCode::NOT_FOUND,
            POKEMONS_URL,
            "GET",
            format!(
                "location {} not found for pokemon {}",
                location_id, pokemon_id
            ),
        )),
    }
}
