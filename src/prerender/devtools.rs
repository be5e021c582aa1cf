//! Minimal Chrome DevTools protocol connection over a websocket.
//!
//! Commands are answered in order by `id`; events that arrive while waiting for
//! a response are queued until [`DevTools::wait_for_event`] asks for them.

use std::collections::VecDeque;

use anyhow::{bail, Context, Result};
use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct DevTools {
    socket: Socket,
    next_id: u64,
    events: VecDeque<Value>,
}

impl DevTools {
    pub async fn connect(endpoint: &str) -> Result<Self> {
        let (socket, _) = tokio_tungstenite::connect_async(endpoint)
            .await
            .with_context(|| format!("Failed to connect to DevTools at {}", endpoint))?;

        Ok(Self {
            socket,
            next_id: 0,
            events: VecDeque::new(),
        })
    }

    /// Send a command and wait for its result. `session` targets an attached page.
    pub async fn call(&mut self, method: &str, params: Value, session: Option<&str>) -> Result<Value> {
        self.next_id += 1;
        let id = self.next_id;

        let mut command = json!({ "id": id, "method": method, "params": params });
        if let Some(session) = session {
            command["sessionId"] = json!(session);
        }

        self.socket
            .send(Message::Text(command.to_string().into()))
            .await
            .with_context(|| format!("Failed to send {}", method))?;

        loop {
            let message = self.next_message().await?;
            if message.get("id").and_then(Value::as_u64) == Some(id) {
                if let Some(error) = message.get("error") {
                    bail!("{} failed: {}", method, error);
                }
                return Ok(message.get("result").cloned().unwrap_or(Value::Null));
            }
            // Late responses to abandoned commands carry no method and are dropped
            if message.get("method").is_some() {
                self.events.push_back(message);
            }
        }
    }

    /// Wait for the first event matching `matches`, queued or incoming.
    pub async fn wait_for_event(&mut self, matches: impl Fn(&Value) -> bool) -> Result<Value> {
        let queued = self.events.iter().position(&matches);
        if let Some(event) = queued.and_then(|index| self.events.remove(index)) {
            return Ok(event);
        }

        loop {
            let message = self.next_message().await?;
            if message.get("method").is_some() && matches(&message) {
                return Ok(message);
            }
        }
    }

    /// Forget queued events from earlier navigations.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    async fn next_message(&mut self) -> Result<Value> {
        loop {
            match self.socket.next().await {
                Some(Ok(Message::Text(text))) => {
                    return serde_json::from_str(text.as_str())
                        .context("Malformed DevTools message");
                }
                Some(Ok(Message::Close(_))) | None => bail!("DevTools connection closed"),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e).context("DevTools connection failed"),
            }
        }
    }
}

/// Extract the browser websocket endpoint from a Chromium stderr line.
pub fn endpoint_from_log_line(line: &str) -> Option<&str> {
    line.trim()
        .strip_prefix("DevTools listening on ")
        .map(str::trim)
        .filter(|endpoint| endpoint.starts_with("ws://"))
}

/// `Page.lifecycleEvent` reporting network idle for the given navigation.
pub fn is_network_idle(event: &Value, loader_id: &str) -> bool {
    event.get("method").and_then(Value::as_str) == Some("Page.lifecycleEvent")
        && event.pointer("/params/name").and_then(Value::as_str) == Some("networkIdle")
        && (loader_id.is_empty()
            || event.pointer("/params/loaderId").and_then(Value::as_str) == Some(loader_id))
}
