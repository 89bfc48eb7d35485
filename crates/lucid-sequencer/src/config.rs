//! Configuration for a scene sequencer

/// Configuration for a [`SceneSequencer`](crate::SceneSequencer)
#[derive(Debug, Clone)]
pub struct SequencerConfig {
    /// Capacity of the command channel between handles and the actor
    pub command_capacity: usize,
    /// Capacity of the event broadcast channel
    pub event_channel_capacity: usize,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            command_capacity: 32,
            event_channel_capacity: 256,
        }
    }
}
