use crate::model::{Location, Pokemon, RecordId};

/// Fixed page size of the page-numbered listing.
pub const PAGE_SIZE: usize = 5;

/// Identity for a new record: one past the highest id in use. Stays unique
/// after deletions, unlike a plain length count, and agrees with the length
/// count on a dense collection.
pub fn next_id(records: &[Pokemon]) -> RecordId {
    records.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
}

pub fn find_by_id(records: &[Pokemon], id: RecordId) -> Option<&Pokemon> {
    records.iter().find(|p| p.id == id)
}

/// Remove every record with the given id. Returns how many were removed;
/// zero is not an error, callers decide whether that matters.
pub fn remove_by_id(records: &mut Vec<Pokemon>, id: RecordId) -> usize {
    let before = records.len();
    records.retain(|p| p.id != id);
    before - records.len()
}

/// Overwrite `name` and `type` only when the request supplied a non-empty
/// value; absent or empty fields keep their prior values.
pub fn apply_update(record: &mut Pokemon, name: Option<&str>, kind: Option<&str>) {
    if let Some(name) = name.filter(|n| !n.is_empty()) {
        record.name = name.to_string();
    }
    if let Some(kind) = kind.filter(|k| !k.is_empty()) {
        record.kind = kind.to_string();
    }
}

/// The slice for a 1-based page number, empty when out of range.
pub fn page_slice(records: &[Pokemon], page: usize) -> &[Pokemon] {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    let end = page.saturating_mul(PAGE_SIZE).min(records.len());
    if start >= end {
        &[]
    } else {
        &records[start..end]
    }
}

/// Reported page count rounds instead of ceiling: 12 records at page size 5
/// report 2 pages. The trailing partial page is under-counted when its
/// remainder is less than half a page.
pub fn page_count(total: usize) -> usize {
    (total as f64 / PAGE_SIZE as f64).round() as usize
}

/// `records[offset..offset + limit]` with clamped bounds; out-of-range
/// values yield empty or truncated slices.
pub fn offset_slice(records: &[Pokemon], offset: usize, limit: usize) -> &[Pokemon] {
    let start = offset.min(records.len());
    let end = offset.saturating_add(limit).min(records.len());
    &records[start..end]
}

/// Outcome of a nested location lookup. The two absent cases are distinct
/// so callers can report which level of the lookup failed.
#[derive(Debug)]
pub enum LocationLookup<'a> {
    Found {
        pokemon_id: RecordId,
        location: &'a Location,
    },
    PokemonMissing,
    LocationMissing,
}

pub fn find_location(
    records: &[Pokemon],
    pokemon_id: RecordId,
    location_id: RecordId,
) -> LocationLookup<'_> {
    let Some(pokemon) = find_by_id(records, pokemon_id) else {
        return LocationLookup::PokemonMissing;
    };
    pokemon
        .locations
        .as_deref()
        .unwrap_or_default()
        .iter()
        .find(|l| l.id == location_id)
        .map_or(LocationLookup::LocationMissing, |location| {
            LocationLookup::Found {
                pokemon_id: pokemon.id,
                location,
            }
        })
}
