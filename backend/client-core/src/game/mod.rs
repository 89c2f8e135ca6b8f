//! Convenience wrappers over the generic RPC surface.
//!
//! Everything here is a thin pass-through: the decoded JSON comes back
//! verbatim and every error surfaces untouched. Each method needs a ready
//! session, enforced by the channel itself.

use crate::error::rpc::RpcError;
use crate::rpc::{CallMode, GAMEPLAY_RPC_PREFIX, PLAYER_RPC_PREFIX};
use crate::session::GameClient;

use serde_json::{Value, json};

impl GameClient {
    /// Send a named gameplay call.
    pub async fn send_gameplay(
        &self,
        action: &str,
        params: &Value,
        use_gzip: bool,
    ) -> Result<Value, RpcError> {
        self.send_rpc(&format!("{GAMEPLAY_RPC_PREFIX}{action}"), params, use_gzip)
            .await
    }

    /// Send a named player call.
    pub async fn send_player(
        &self,
        action: &str,
        params: &Value,
        use_gzip: bool,
    ) -> Result<Value, RpcError> {
        self.send_rpc(&format!("{PLAYER_RPC_PREFIX}{action}"), params, use_gzip)
            .await
    }

    /// Send a call against an explicit RPC path.
    pub async fn send_rpc(
        &self,
        path: &str,
        params: &Value,
        use_gzip: bool,
    ) -> Result<Value, RpcError> {
        self.channel()
            .call(self.session(), path, params, use_gzip, CallMode::Normal)
            .await
    }

    /// Current global faction scores.
    pub async fn get_game_score(&self) -> Result<Value, RpcError> {
        self.send_player("getGameScore", &json!([]), true).await
    }

    /// Daily news feed entry.
    pub async fn get_news_of_the_day(&self) -> Result<Value, RpcError> {
        self.send_player("getNewsOfTheDay", &json!([]), true).await
    }

    /// Remaining invites and related counters.
    pub async fn get_invite_info(&self) -> Result<Value, RpcError> {
        self.send_player("getInviteInfo", &json!([]), true).await
    }

    /// Inventory delta since `last_query_timestamp` (milliseconds; 0 for a
    /// full snapshot).
    pub async fn get_inventory(&self, last_query_timestamp: i64) -> Result<Value, RpcError> {
        self.send_gameplay(
            "getInventory",
            &json!({ "lastQueryTimestamp": last_query_timestamp }),
            true,
        )
        .await
    }

    /// Update account profile settings.
    pub async fn set_profile_settings(&self, settings: &Value) -> Result<Value, RpcError> {
        self.send_player("setProfileSettings", settings, true).await
    }

    /// Write opaque key/value blobs to server-side player storage.
    pub async fn put_bulk_player_storage(&self, storage: &Value) -> Result<Value, RpcError> {
        self.send_player("putBulkPlayerStorage", storage, true).await
    }
}
