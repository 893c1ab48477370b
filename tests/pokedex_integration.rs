use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;

use pokedex_api::api::routes::create_router;
use pokedex_api::store::JsonFileStore;

// Test client wrapper for making API calls
struct TestClient {
    client: Client,
    base_url: String,
}

impl TestClient {
    fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn post(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(&format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }

    async fn put(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .put(&format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }

    async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .get(&format!("{}{}", self.base_url, path))
            .send()
            .await
    }

    async fn delete(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .delete(&format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }
}

// Spawn the API server on an ephemeral port over a fresh collection file.
// The TempDir handle must stay alive for the duration of the test.
async fn spawn_server(records: Value) -> (TestClient, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pokedex.json");
    std::fs::write(&path, serde_json::to_vec(&records).unwrap()).unwrap();

    let store = Arc::new(JsonFileStore::new(&path));
    let app = create_router().with_state(store);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (TestClient::new(format!("http://{}", addr)), dir)
}

fn dense_pokedex(n: usize) -> Value {
    Value::Array(
        (1..=n)
            .map(|i| json!({"id": i, "name": format!("pokemon-{}", i), "type": "normal"}))
            .collect(),
    )
}

async fn collection_len(client: &TestClient) -> usize {
    let body: Value = client
        .get("/api/pokemons")
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["pokemons"].as_array().unwrap().len()
}

#[tokio::test]
async fn test_pokedex_complete_workflow() {
    let (client, dir) = spawn_server(dense_pokedex(4)).await;

    // 1. List the starting collection
    let resp = client.get("/api/pokemons").await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["method"], "GET");
    assert_eq!(body["url"], "/api/pokemons");
    assert_eq!(body["pokemons"].as_array().unwrap().len(), 4);

    // 2. Create a record; a dense collection of 4 hands out id 5
    let resp = client
        .post("/api/pokemons", json!({"name": "Pikachu", "type": "electric"}))
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["newPokemon"]["id"], 5);
    assert_eq!(body["newPokemon"]["name"], "Pikachu");
    assert_eq!(collection_len(&client).await, 5);

    // 3. Round-trip through both find variants
    let resp = client.get("/api/pokemons/5").await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["pokemon"]["name"], "Pikachu");
    assert_eq!(body["pokemon"]["type"], "electric");

    let resp = client.get("/api/onepokemon?id=5").await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["pokemon"]["id"], 5);

    // 4. Update only the type; the name must survive
    let resp = client
        .put("/api/pokemons/5", json!({"type": "water"}))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["pokemon"], 5);

    let resp = client.get("/api/pokemons/5").await.unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["pokemon"]["name"], "Pikachu");
    assert_eq!(body["pokemon"]["type"], "water");

    // 5. Delete and confirm both the response echo and the persisted file
    let resp = client.delete("/api/pokemons", json!({"id": 5})).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["deletePokemon"]["id"], 5);
    assert_eq!(collection_len(&client).await, 4);

    let raw = std::fs::read(dir.path().join("pokedex.json")).unwrap();
    let persisted: Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(persisted.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_create_requires_name_and_type() {
    let (client, _dir) = spawn_server(dense_pokedex(2)).await;

    for body in [
        json!({"type": "electric"}),
        json!({"name": "Pikachu"}),
        json!({"name": "", "type": "electric"}),
        json!({}),
    ] {
        let resp = client.post("/api/pokemons", body).await.unwrap();
        assert_eq!(resp.status(), 400);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "name and type is required");
    }

    // the rejected requests never touched the collection
    assert_eq!(collection_len(&client).await, 2);
}

#[tokio::test]
async fn test_delete_validation_and_silent_missing_id() {
    let (client, _dir) = spawn_server(dense_pokedex(3)).await;

    let resp = client.delete("/api/pokemons", json!({})).await.unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "id is required");

    let resp = client
        .delete("/api/pokemons", json!({"id": "abc"}))
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // a string id is accepted like the numeric form
    let resp = client
        .delete("/api/pokemons", json!({"id": "2"}))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(collection_len(&client).await, 2);

    // deleting an id that no longer exists still reports success
    let resp = client
        .delete("/api/pokemons", json!({"id": 99}))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["deletePokemon"]["id"], 99);
    assert_eq!(collection_len(&client).await, 2);
}

#[tokio::test]
async fn test_create_after_delete_does_not_reuse_ids() {
    let (client, _dir) = spawn_server(dense_pokedex(5)).await;

    client
        .delete("/api/pokemons", json!({"id": 3}))
        .await
        .unwrap();

    let resp = client
        .post("/api/pokemons", json!({"name": "eevee", "type": "normal"}))
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    // length count would reassign 5, colliding with the surviving record
    assert_eq!(body["newPokemon"]["id"], 6);

    let resp = client.get("/api/pokemons/5").await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["pokemon"]["name"], "pokemon-5");
}

#[tokio::test]
async fn test_find_missing_record_is_not_found() {
    let (client, _dir) = spawn_server(dense_pokedex(2)).await;

    let resp = client.get("/api/pokemons/42").await.unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);

    let resp = client.get("/api/onepokemon?id=42").await.unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client.get("/api/onepokemon").await.unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "id is required");

    let resp = client
        .put("/api/pokemons/42", json!({"type": "water"}))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_pagination() {
    let (client, _dir) = spawn_server(dense_pokedex(12)).await;

    let resp = client.get("/api/pokemons/page/1").await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["page"], 1);
    // 12 / 5 = 2.4: the rounding policy under-counts the partial page
    assert_eq!(body["numPages"], 2);
    let ids: Vec<u64> = body["pokemons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    let resp = client.get("/api/pokemons/page/3").await.unwrap();
    let body: Value = resp.json().await.unwrap();
    let ids: Vec<u64> = body["pokemons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![11, 12]);

    let resp = client.get("/api/pokemons/page/9").await.unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["pokemons"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_offset_pagination() {
    let (client, _dir) = spawn_server(dense_pokedex(12)).await;

    let resp = client
        .get("/api/pageoffset/pokemons?offset=2&limit=3")
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let ids: Vec<u64> = body["pokemons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 4, 5]);

    let resp = client
        .get("/api/pageoffset/pokemons?offset=100&limit=3")
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["pokemons"].as_array().unwrap().is_empty());

    let resp = client
        .get("/api/pageoffset/pokemons?offset=2")
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "offset and limit are required");
}

#[tokio::test]
async fn test_location_lookup_outcomes() {
    let records = json!([
        {
            "id": 1,
            "name": "pikachu",
            "type": "electric",
            "locations": [
                {"id": 1, "name": "Viridian Forest"},
                {"id": 2, "name": "Power Plant", "region": "Kanto"}
            ]
        },
        {"id": 2, "name": "meowth", "type": "normal"}
    ]);
    let (client, _dir) = spawn_server(records).await;

    let resp = client.get("/api/pokemons/1/locations/2").await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["pokemon"], 1);
    assert_eq!(body["location"]["name"], "Power Plant");
    assert_eq!(body["location"]["region"], "Kanto");

    // the two absent cases report distinct outcomes
    let resp = client.get("/api/pokemons/1/locations/9").await.unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    let location_missing = body["message"].as_str().unwrap().to_string();

    let resp = client.get("/api/pokemons/9/locations/1").await.unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    let pokemon_missing = body["message"].as_str().unwrap().to_string();

    assert_ne!(location_missing, pokemon_missing);
    assert!(location_missing.contains("location"));

    // a record with no locations list behaves like an empty one
    let resp = client.get("/api/pokemons/2/locations/1").await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_health_check() {
    let (client, _dir) = spawn_server(json!([])).await;

    let resp = client.get("/health").await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}
