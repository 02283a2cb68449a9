//! MQTT remote keyboard
//!
//! Subscribes to a topic and turns each message into key events that are
//! appended to the next frame's event queue. Accepted payloads:
//!
//! - `"<key> down"` / `"<key> up"`
//! - `"<key>"` (press and release in the same frame)
//! - JSON: `{"key": "w", "action": "down"}` (`action` optional)

use rumqttc::{Client, Event as MqttEvent, MqttOptions, Packet, QoS};
use serde::Deserialize;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crate::game::{Event, Key};

const DEFAULT_PORT: u16 = 1883;
const CLIENT_ID: &str = "trifill";

#[derive(Deserialize)]
struct JsonKey {
    key: String,
    #[serde(default)]
    action: Option<String>,
}

fn events_for(key: Key, action: Option<&str>) -> Option<Vec<Event>> {
    match action.map(str::to_lowercase).as_deref() {
        None | Some("press" | "tap") => Some(vec![Event::KeyDown(key), Event::KeyUp(key)]),
        Some("down") => Some(vec![Event::KeyDown(key)]),
        Some("up") => Some(vec![Event::KeyUp(key)]),
        Some(_) => None,
    }
}

/// Translate one message payload into key events
///
/// Unknown keys or actions yield `None`.
pub fn parse_payload(payload: &str) -> Option<Vec<Event>> {
    let text = payload.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(json) = serde_json::from_str::<JsonKey>(text) {
        let key = Key::from_name(&json.key)?;
        return events_for(key, json.action.as_deref());
    }

    let mut words = text.split_whitespace();
    let key = Key::from_name(words.next()?)?;
    let action = words.next();
    if words.next().is_some() {
        return None;
    }
    events_for(key, action)
}

/// MQTT subscription that delivers key events from a background thread
pub struct RemoteKeys {
    receiver: Receiver<Vec<Event>>,
    _thread: thread::JoinHandle<()>,
}

impl RemoteKeys {
    /// Connect to the broker and subscribe to `topic`
    ///
    /// Fails immediately if the broker can't be reached.
    pub fn connect(host: &str, topic: &str) -> Result<Self, String> {
        let mut options = MqttOptions::new(CLIENT_ID, host, DEFAULT_PORT);
        options.set_keep_alive(Duration::from_secs(30));

        let (client, mut connection) = Client::new(options, 10);

        client
            .subscribe(topic, QoS::AtMostOnce)
            .map_err(|e| format!("failed to subscribe to topic '{}': {}", topic, e))?;

        // Poll once so an unreachable broker fails here
        match connection.iter().next() {
            Some(Ok(_)) => {},
            Some(Err(e)) => {
                return Err(format!(
                    "failed to connect to MQTT broker at {}:{}: {}",
                    host, DEFAULT_PORT, e
                ));
            },
            None => {
                return Err(format!(
                    "failed to connect to MQTT broker at {}:{}: connection closed",
                    host, DEFAULT_PORT
                ));
            },
        }

        let (sender, receiver) = mpsc::channel();
        let topic_owned = topic.to_string();

        let handle = thread::spawn(move || {
            Self::message_loop(connection, sender, &topic_owned);
        });

        log::info!("remote keys: connected to {}:{}, subscribed to '{}'", host, DEFAULT_PORT, topic);

        Ok(Self {
            receiver,
            _thread: handle,
        })
    }

    fn message_loop(mut connection: rumqttc::Connection, sender: Sender<Vec<Event>>, topic: &str) {
        for event in connection.iter() {
            match event {
                Ok(MqttEvent::Incoming(Packet::Publish(publish))) if publish.topic == topic => {
                    let Ok(text) = std::str::from_utf8(&publish.payload) else {
                        log::warn!("remote keys: ignoring non-UTF-8 payload");
                        continue;
                    };
                    match parse_payload(text) {
                        Some(events) => {
                            if sender.send(events).is_err() {
                                // Host is gone
                                break;
                            }
                        },
                        None => log::warn!("remote keys: unrecognised payload '{}'", text.trim()),
                    }
                },
                Ok(_) => {},
                Err(e) => {
                    // rumqttc reconnects on the next poll
                    log::error!("remote keys: {}", e);
                    thread::sleep(Duration::from_secs(1));
                },
            }
        }
    }

    /// Drain everything received since the last call, in arrival order
    pub fn drain_into(&self, events: &mut Vec<Event>) {
        while let Ok(batch) = self.receiver.try_recv() {
            events.extend(batch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_payloads() {
        assert_eq!(parse_payload("w down"), Some(vec![Event::KeyDown(Key::W)]));
        assert_eq!(parse_payload("  D UP\n"), Some(vec![Event::KeyUp(Key::D)]));
        assert_eq!(
            parse_payload("1"),
            Some(vec![Event::KeyDown(Key::Num1), Event::KeyUp(Key::Num1)])
        );
        assert_eq!(parse_payload("escape up"), Some(vec![Event::KeyUp(Key::Escape)]));
    }

    #[test]
    fn test_json_payloads() {
        assert_eq!(
            parse_payload(r#"{"key": "a", "action": "down"}"#),
            Some(vec![Event::KeyDown(Key::A)])
        );
        assert_eq!(
            parse_payload(r#"{"key": "3"}"#),
            Some(vec![Event::KeyDown(Key::Num3), Event::KeyUp(Key::Num3)])
        );
        assert_eq!(parse_payload(r#"{"key": "q"}"#), None);
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_payload(""), None);
        assert_eq!(parse_payload("   "), None);
        assert_eq!(parse_payload("x down"), None);
        assert_eq!(parse_payload("w sideways"), None);
        assert_eq!(parse_payload("w down now"), None);
    }
}
