use crate::api::types::ConfigEvent;

/// Pending configuration changes.
/// The host pushes events whenever a control changes; the frame driver drains
/// them at the start of the next frame so the field only mutates between frames.
pub struct ConfigQueue {
    events: Vec<ConfigEvent>,
}

impl ConfigQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    /// Push a configuration event (called from the host bridge).
    pub fn push(&mut self, event: ConfigEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&mut self) -> Vec<ConfigEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &ConfigEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for ConfigQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_keeps_order() {
        let mut q = ConfigQueue::new();
        q.push(ConfigEvent::Pause);
        q.push(ConfigEvent::Speed(2.0));
        q.push(ConfigEvent::Resume);
        assert_eq!(q.len(), 3);
        let events = q.drain();
        assert_eq!(
            events,
            vec![ConfigEvent::Pause, ConfigEvent::Speed(2.0), ConfigEvent::Resume]
        );
        assert!(q.is_empty());
    }

    #[test]
    fn iter_does_not_consume() {
        let mut q = ConfigQueue::new();
        q.push(ConfigEvent::Reset);
        assert_eq!(q.iter().count(), 1);
        assert_eq!(q.len(), 1);
    }
}
