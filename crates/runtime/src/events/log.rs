//! Structured logging of simulation events.

use game_core::GameEvent;

/// Emits one tracing record for `event`, at a level matching its weight.
pub fn log_event(frame: u64, event: &GameEvent) {
    use GameEvent::*;
    match event {
        SceneChanged { from, to } => {
            tracing::info!(target: "runtime::scene", frame, %from, %to, "scene changed");
        }
        LevelComplete { level_index } => {
            tracing::info!(target: "runtime::progress", frame, level_index, "level complete");
        }
        RoomEntered { room } => {
            tracing::info!(target: "runtime::progress", frame, %room, "room entered");
        }
        RoomCleared { room } => {
            tracing::info!(target: "runtime::progress", frame, %room, "room cleared");
        }
        DoorUnlocked { door } => {
            tracing::info!(target: "runtime::progress", frame, %door, "door unlocked");
        }
        KeyDropped { grant, position } => {
            tracing::info!(target: "runtime::progress", frame, ?grant, x = position.x, y = position.y, "key dropped");
        }
        KeyCollected { grant } => {
            tracing::info!(target: "runtime::progress", frame, ?grant, "key collected");
        }
        RoomPhaseChanged { room, phase } => {
            tracing::debug!(target: "runtime::progress", frame, %room, %phase, "room phase");
        }
        BossPhaseChanged { boss, phase } => {
            tracing::info!(target: "runtime::combat", frame, %boss, phase, "boss phase changed");
        }
        BossDefeated { boss } => {
            tracing::info!(target: "runtime::combat", frame, %boss, "boss defeated");
        }
        PlayerDied => {
            tracing::info!(target: "runtime::combat", frame, "hero died");
        }
        Died { entity, kind } => {
            tracing::debug!(target: "runtime::combat", frame, %entity, ?kind, "died");
        }
        EntitySpawned { entity, template, .. } => {
            tracing::debug!(target: "runtime::combat", frame, %entity, %template, "spawned");
        }
        RewardEarned { gold, score } => {
            tracing::debug!(target: "runtime::combat", frame, gold, score, "reward");
        }
        SkillChosen { skill } => {
            tracing::info!(target: "runtime::scene", frame, %skill, "skill chosen");
        }
        ItemPurchased { item, price } => {
            tracing::info!(target: "runtime::scene", frame, %item, price, "item purchased");
        }
        UltimateReady => {
            tracing::debug!(target: "runtime::combat", frame, "ultimate ready");
        }
        Damaged { source, target, amount, remaining } => {
            tracing::trace!(target: "runtime::combat", frame, ?source, %target, amount, remaining, "damaged");
        }
        other => {
            tracing::trace!(target: "runtime::combat", frame, event = ?other);
        }
    }
}
