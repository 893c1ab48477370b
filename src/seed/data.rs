use crate::model::{Location, Pokemon};
use crate::store::error::StoreError;
use crate::store::traits::RecordStore;
use anyhow::Result;

/// Starter pokedex written on first run, matching the collection file that
/// ships in the repo.
pub fn starter_pokedex() -> Vec<Pokemon> {
    vec![
        Pokemon::new(1, "bulbasaur", "grass").with_locations(vec![
            Location::new(1, "Pallet Meadow"),
            Location::new(2, "Viridian Forest"),
        ]),
        Pokemon::new(2, "charmander", "fire")
            .with_locations(vec![Location::new(1, "Mt. Ember")]),
        Pokemon::new(3, "squirtle", "water"),
        Pokemon::new(4, "pikachu", "electric").with_locations(vec![
            Location::new(1, "Viridian Forest"),
            Location::new(2, "Power Plant"),
        ]),
        Pokemon::new(5, "meowth", "normal"),
        Pokemon::new(6, "onix", "rock"),
    ]
}

/// Seed the collection file with starter data. A non-empty existing
/// collection is left alone; a malformed file is an error rather than
/// something to silently overwrite.
pub async fn load_seed_data<S: RecordStore>(store: &S) -> Result<()> {
    match store.load().await {
        Ok(existing) if !existing.is_empty() => {
            log::info!(
                "seed skipped, collection already holds {} records",
                existing.len()
            );
            return Ok(());
        }
        Ok(_) => {}
        // no collection file yet, the common first-run case
        Err(StoreError::Read { .. }) => {}
        Err(e) => return Err(e.into()),
    }

    store.save(&starter_pokedex()).await?;
    log::info!("seeded collection with {} records", starter_pokedex().len());
    Ok(())
}
