use glam::Vec2;

/// A recorded past position with its opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub position: Vec2,
    pub alpha: f32,
}

/// Bounded position history, oldest first.
///
/// Backed by a ring buffer allocated once at the trail's capacity: recording a
/// point never allocates, and a full trail overwrites its oldest slot.
#[derive(Debug, Clone)]
pub struct Trail {
    points: Vec<TrailPoint>,
    capacity: usize,
    /// Index of the oldest point once the buffer has wrapped.
    head: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Record a position with placeholder alpha 1.0, evicting the oldest point
    /// if the trail is full, then recompute every alpha as `(i + 1) / len`.
    pub fn record(&mut self, position: Vec2) {
        if self.capacity == 0 {
            return;
        }

        let point = TrailPoint { position, alpha: 1.0 };
        if self.points.len() < self.capacity {
            self.points.push(point);
        } else {
            self.points[self.head] = point;
            self.head = (self.head + 1) % self.capacity;
        }

        let len = self.points.len();
        for i in 0..len {
            let slot = (self.head + i) % len;
            self.points[slot].alpha = (i + 1) as f32 / len as f32;
        }
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> + '_ {
        let (newer, older) = self.points.split_at(self.head);
        older.iter().chain(newer.iter())
    }

    /// The most recently recorded point.
    pub fn newest(&self) -> Option<&TrailPoint> {
        if self.points.is_empty() {
            return None;
        }
        let len = self.points.len();
        Some(&self.points[(self.head + len - 1) % len])
    }
}
