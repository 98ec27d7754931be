//! Session log
//!
//! When a game finishes, the outer app records `{ playerName, score }`.
//! The write is fire-and-forget: failures are logged and never reach the
//! player.

use serde::{Deserialize, Serialize};

/// Endpoint that creates a session record
pub const SESSION_ENDPOINT: &str = "/api/sessions";

/// Name used when the player left the field blank
pub const DEFAULT_PLAYER: &str = "Player";

/// A finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub player_name: String,
    pub score: u32,
}

impl SessionRecord {
    pub fn new(player_name: &str, score: u32) -> Self {
        let name = player_name.trim();
        Self {
            player_name: if name.is_empty() {
                DEFAULT_PLAYER.to_string()
            } else {
                name.to_string()
            },
            score,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// POST the record in the background (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn submit(self) {
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = self.post().await {
                log::warn!("Failed to save game session: {:?}", e);
            } else {
                log::info!("Session saved for {} ({})", self.player_name, self.score);
            }
        });
    }

    #[cfg(target_arch = "wasm32")]
    async fn post(&self) -> Result<(), wasm_bindgen::JsValue> {
        use wasm_bindgen::{JsCast, JsValue};
        use web_sys::{Headers, RequestInit, Response};

        let body = self
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let headers = Headers::new()?;
        headers.set("Content-Type", "application/json")?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&body));

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let promise = window.fetch_with_str_and_init(SESSION_ENDPOINT, &init);
        let response: Response = wasm_bindgen_futures::JsFuture::from(promise)
            .await?
            .dyn_into()?;

        if !response.ok() {
            return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
        }
        Ok(())
    }

    /// Native: nowhere to send it, just log
    #[cfg(not(target_arch = "wasm32"))]
    pub fn submit(self) {
        match self.to_json() {
            Ok(json) => log::info!("Session finished: {}", json),
            Err(e) => log::warn!("Failed to encode game session: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let record = SessionRecord::new("Ana", 25);
        assert_eq!(record.to_json().unwrap(), r#"{"playerName":"Ana","score":25}"#);
    }

    #[test]
    fn test_name_is_trimmed_with_fallback() {
        assert_eq!(SessionRecord::new("  Sam ", 3).player_name, "Sam");
        assert_eq!(SessionRecord::new("   ", 3).player_name, DEFAULT_PLAYER);
    }

    #[test]
    fn test_round_trip_from_server_shape() {
        let record: SessionRecord =
            serde_json::from_str(r#"{"playerName":"Lee","score":25}"#).unwrap();
        assert_eq!(record, SessionRecord::new("Lee", 25));
    }
}
