//! Typed game events and the subscriber hub
//!
//! Simulation code publishes events while it runs; subscribers (sound,
//! particles, screen shake, HUD) observe them synchronously. Subscribers
//! cannot touch simulation state and nothing in the core reads back from them.

use glam::Vec2;
use serde::Serialize;

use super::boss::BossPhase;
use super::powerup::PowerUpKind;
use super::state::MatchState;

/// Which singleton an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityRef {
    Player,
    Boss,
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// Player weapon fired or boss fired a burst shot
    Attack { source: EntityRef },
    /// Damage applied (after shield absorption for the player)
    Damage { target: EntityRef, amount: f32 },
    /// Player moved, or boss bounced off an arena edge
    Move { entity: EntityRef, pos: Vec2 },
    Death { entity: EntityRef },
    PhaseChange { phase: BossPhase },
    BossRespawn { life: u32, lives: u32 },
    /// A projectile struck its target (position = projectile centre)
    ProjectileHit { pos: Vec2, from_player: bool },
    PowerUpCollected { kind: PowerUpKind, pos: Vec2 },
    PowerUpSpawned { kind: PowerUpKind, pos: Vec2 },
    PowerUpExpired { kind: PowerUpKind },
    MatchEnded { state: MatchState },
}

/// Event topic, used to filter subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    Attack,
    Damage,
    Move,
    Death,
    PhaseChange,
    BossRespawn,
    ProjectileHit,
    PowerUpCollected,
    PowerUpSpawned,
    PowerUpExpired,
    MatchEnded,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Attack => "onAttack",
            EventKind::Damage => "onDamage",
            EventKind::Move => "onMove",
            EventKind::Death => "onDeath",
            EventKind::PhaseChange => "onPhaseChange",
            EventKind::BossRespawn => "onBossRespawn",
            EventKind::ProjectileHit => "onProjectileHit",
            EventKind::PowerUpCollected => "onPowerUpCollected",
            EventKind::PowerUpSpawned => "onPowerUpSpawned",
            EventKind::PowerUpExpired => "onPowerUpExpired",
            EventKind::MatchEnded => "onMatchEnded",
        }
    }
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::Attack { .. } => EventKind::Attack,
            GameEvent::Damage { .. } => EventKind::Damage,
            GameEvent::Move { .. } => EventKind::Move,
            GameEvent::Death { .. } => EventKind::Death,
            GameEvent::PhaseChange { .. } => EventKind::PhaseChange,
            GameEvent::BossRespawn { .. } => EventKind::BossRespawn,
            GameEvent::ProjectileHit { .. } => EventKind::ProjectileHit,
            GameEvent::PowerUpCollected { .. } => EventKind::PowerUpCollected,
            GameEvent::PowerUpSpawned { .. } => EventKind::PowerUpSpawned,
            GameEvent::PowerUpExpired { .. } => EventKind::PowerUpExpired,
            GameEvent::MatchEnded { .. } => EventKind::MatchEnded,
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&GameEvent)>;

struct Subscriber {
    id: SubscriptionId,
    /// None = every event
    topic: Option<EventKind>,
    callback: Callback,
}

/// Publish/subscribe registry, dispatched in registration order
#[derive(Default)]
pub struct EventHub {
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for one topic
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&GameEvent) + 'static,
    ) -> SubscriptionId {
        self.register(Some(kind), Box::new(callback))
    }

    /// Register a callback for every event
    pub fn subscribe_all(&mut self, callback: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.register(None, Box::new(callback))
    }

    fn register(&mut self, topic: Option<EventKind>, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            topic,
            callback,
        });
        id
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Deliver an event to every matching subscriber, immediately
    pub fn publish(&mut self, event: GameEvent) {
        let kind = event.kind();
        for sub in self.subscribers.iter_mut() {
            if sub.topic.is_none_or(|t| t == kind) {
                (sub.callback)(&event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
