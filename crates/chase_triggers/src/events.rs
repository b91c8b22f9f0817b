//! Trigger events

/// Type of trigger event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEventType {
    /// Tracked entity entered the volume
    Enter,
    /// Tracked entity left the volume
    Exit,
}

/// A trigger event
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerEvent {
    /// Trigger that fired
    pub trigger: u64,
    /// Entity that caused it
    pub other: u64,
    /// Event type
    pub event_type: TriggerEventType,
    /// Where the entity was when the event fired
    pub position: [f32; 3],
}

impl TriggerEvent {
    pub fn enter(trigger: u64, other: u64, position: [f32; 3]) -> Self {
        Self {
            trigger,
            other,
            event_type: TriggerEventType::Enter,
            position,
        }
    }

    pub fn exit(trigger: u64, other: u64, position: [f32; 3]) -> Self {
        Self {
            trigger,
            other,
            event_type: TriggerEventType::Exit,
            position,
        }
    }

    pub fn is_enter(&self) -> bool {
        self.event_type == TriggerEventType::Enter
    }
}
