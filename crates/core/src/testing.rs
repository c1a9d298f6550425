//! In-memory [`GameServerApi`] for tests.
//!
//! Counts every remote call so tests can assert that private addresses are
//! never contacted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::gameserver::{GameInfo, GameServerApi, PlayerList, RemoteError};

#[derive(Debug)]
pub struct FakeGameServer {
    info: Option<GameInfo>,
    games: Mutex<HashMap<Uuid, Vec<Uuid>>>,
    tls: bool,
    players_unavailable: bool,
    calls: AtomicUsize,
}

impl Default for FakeGameServer {
    fn default() -> Self {
        Self::new(GameInfo {
            name: "fake-game".into(),
            cg_version: "0.7".into(),
            display_name: Some("Fake Game".into()),
            description: "A game that only exists in tests".into(),
            version: "1.2.3".into(),
            repository_url: "https://example.com/fake-game".into(),
        })
    }
}

impl FakeGameServer {
    pub fn new(info: GameInfo) -> Self {
        Self {
            info: Some(info),
            games: Mutex::new(HashMap::new()),
            tls: false,
            players_unavailable: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// A server that fails every request.
    pub fn unreachable() -> Self {
        Self {
            info: None,
            ..Self::default()
        }
    }

    pub fn with_game(self, game_id: Uuid, players: &[Uuid]) -> Self {
        self.lock_games().insert(game_id, players.to_vec());
        self
    }

    pub fn with_tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    /// Make the player listing fail while existence checks keep working.
    pub fn with_players_unavailable(mut self) -> Self {
        self.players_unavailable = true;
        self
    }

    pub fn remove_game(&self, game_id: Uuid) {
        self.lock_games().remove(&game_id);
    }

    pub fn remove_player(&self, game_id: Uuid, player_id: Uuid) {
        if let Some(players) = self.lock_games().get_mut(&game_id) {
            players.retain(|p| *p != player_id);
        }
    }

    /// Number of remote calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn lock_games(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Vec<Uuid>>> {
        self.games.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl GameServerApi for FakeGameServer {
    async fn fetch_game_info(&self, game_url: &str) -> Result<GameInfo, RemoteError> {
        self.record_call();
        self.info
            .clone()
            .ok_or_else(|| RemoteError(format!("{game_url} is unreachable")))
    }

    async fn game_exists(&self, _game_url: &str, game_id: Uuid) -> bool {
        self.record_call();
        self.info.is_some() && self.lock_games().contains_key(&game_id)
    }

    async fn player_exists(&self, _game_url: &str, game_id: Uuid, player_id: Uuid) -> bool {
        self.record_call();
        self.info.is_some()
            && self
                .lock_games()
                .get(&game_id)
                .is_some_and(|players| players.contains(&player_id))
    }

    async fn get_players(&self, game_url: &str, game_id: Uuid) -> Result<PlayerList, RemoteError> {
        self.record_call();
        if self.info.is_none() || self.players_unavailable {
            return Err(RemoteError(format!("{game_url} did not list players")));
        }
        let games = self.lock_games();
        let players = games
            .get(&game_id)
            .ok_or_else(|| RemoteError(format!("game {game_id} not found")))?;
        Ok(players
            .iter()
            .enumerate()
            .map(|(i, id)| (id.to_string(), format!("player-{i}")))
            .collect())
    }

    async fn is_tls(&self, _game_url: &str) -> bool {
        self.record_call();
        self.info.is_some() && self.tls
    }
}
