//! Topic-based event bus implementation.

use std::sync::Arc;

use game_core::{EventCategory, GameEvent};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Damage, statuses, deaths, rewards
    Combat,
    /// Room phases, keys, doors, level completion
    Progression,
    /// Scene changes, skill picks, purchases
    Scene,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Combat, Topic::Progression, Topic::Scene];
}

impl From<EventCategory> for Topic {
    fn from(category: EventCategory) -> Self {
        match category {
            EventCategory::Combat => Topic::Combat,
            EventCategory::Progression => Topic::Progression,
            EventCategory::Scene => Topic::Scene,
        }
    }
}

/// A game event stamped with the session frame it was raised on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub frame: u64,
    pub event: GameEvent,
}

impl Event {
    pub fn topic(&self) -> Topic {
        self.event.category().into()
    }
}

struct Channels {
    combat: broadcast::Sender<Event>,
    progression: broadcast::Sender<Event>,
    scene: broadcast::Sender<Event>,
}

/// Topic-based event bus
///
/// Allows consumers (renderer, audio, persistence) to subscribe to specific
/// topics and only receive events they care about. Publishing never blocks;
/// slow subscribers observe `RecvError::Lagged`.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                combat: broadcast::channel(capacity).0,
                progression: broadcast::channel(capacity).0,
                scene: broadcast::channel(capacity).0,
            }),
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Combat => &self.channels.combat,
            Topic::Progression => &self.channels.progression,
            Topic::Scene => &self.channels.scene,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        topics.iter().map(|&topic| (topic, self.subscribe(topic))).collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{RoomId, Scene};

    #[tokio::test]
    async fn events_reach_only_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut scene_rx = bus.subscribe(Topic::Scene);
        let mut progression_rx = bus.subscribe(Topic::Progression);

        bus.publish(Event {
            frame: 3,
            event: GameEvent::SceneChanged {
                from: Scene::Start,
                to: Scene::HeroSelect,
            },
        });
        bus.publish(Event {
            frame: 4,
            event: GameEvent::RoomCleared { room: RoomId(1) },
        });

        assert_eq!(scene_rx.recv().await.unwrap().frame, 3);
        assert!(scene_rx.try_recv().is_err());
        assert_eq!(progression_rx.recv().await.unwrap().frame, 4);
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(Event {
            frame: 0,
            event: GameEvent::UltimateReady,
        });
    }
}
