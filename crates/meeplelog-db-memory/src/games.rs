//! In-memory game catalog storage.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use meeplelog_core::Game;
use meeplelog_storage::{GameStorage, GameUpdate, StorageError};

/// HashMap-backed [`GameStorage`], keyed by lowercase game name.
#[derive(Default)]
pub struct InMemoryGameStorage {
    games: RwLock<HashMap<String, Game>>,
}

impl InMemoryGameStorage {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameStorage for InMemoryGameStorage {
    async fn create(&self, game: &Game) -> Result<(), StorageError> {
        let mut games = self.games.write().await;
        if games.contains_key(&game.name) {
            return Err(StorageError::already_exists(format!(
                "Game [{}]",
                game.name
            )));
        }
        games.insert(game.name.clone(), game.clone());
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Game>, StorageError> {
        Ok(self.games.read().await.get(name).cloned())
    }

    async fn list(&self) -> Result<Vec<Game>, StorageError> {
        let mut all: Vec<Game> = self.games.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn update(&self, name: &str, update: &GameUpdate) -> Result<Game, StorageError> {
        let mut games = self.games.write().await;

        if let Some(new_name) = &update.name
            && new_name.as_str() != name
            && games.contains_key(new_name)
        {
            return Err(StorageError::already_exists(format!("Game [{new_name}]")));
        }

        let mut game = games
            .remove(name)
            .ok_or_else(|| StorageError::not_found(format!("Game [{name}]")))?;

        if let Some(new_name) = &update.name {
            game.name = new_name.clone();
        }
        if let Some(weight) = update.weight {
            game.weight = weight;
        }
        if let Some(min) = update.min_players {
            game.min_players = min;
        }
        if let Some(max) = update.max_players {
            game.max_players = max;
        }

        games.insert(game.name.clone(), game.clone());
        Ok(game)
    }

    async fn delete(&self, name: &str) -> Result<(), StorageError> {
        self.games
            .write()
            .await
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found(format!("Game [{name}]")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catan() -> Game {
        Game {
            name: "catan".to_string(),
            weight: 2.3,
            min_players: 3,
            max_players: 4,
        }
    }

    #[tokio::test]
    async fn create_and_lookup() {
        let storage = InMemoryGameStorage::new();
        storage.create(&catan()).await.unwrap();

        assert!(storage.find_by_name("catan").await.unwrap().is_some());
        assert!(storage.find_by_name("azul").await.unwrap().is_none());
        assert!(matches!(
            storage.create(&catan()).await,
            Err(StorageError::AlreadyExists { .. })
        ));
    }

    #[tokio::test]
    async fn rename_moves_the_key_and_checks_collisions() {
        let storage = InMemoryGameStorage::new();
        storage.create(&catan()).await.unwrap();
        storage
            .create(&Game {
                name: "azul".to_string(),
                weight: 1.8,
                min_players: 2,
                max_players: 4,
            })
            .await
            .unwrap();

        let update = GameUpdate {
            name: Some("settlers".to_string()),
            ..GameUpdate::default()
        };
        let renamed = storage.update("catan", &update).await.unwrap();
        assert_eq!(renamed.name, "settlers");
        assert!(storage.find_by_name("catan").await.unwrap().is_none());

        let collide = GameUpdate {
            name: Some("azul".to_string()),
            ..GameUpdate::default()
        };
        assert!(matches!(
            storage.update("settlers", &collide).await,
            Err(StorageError::AlreadyExists { .. })
        ));
    }

    #[tokio::test]
    async fn delete_missing_game_not_found() {
        let storage = InMemoryGameStorage::new();
        assert!(matches!(
            storage.delete("catan").await,
            Err(StorageError::NotFound { .. })
        ));
    }
}
