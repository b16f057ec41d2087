//! Input state
//!
//! The shell feeds asynchronous key and touch events in as they arrive;
//! the tick loop samples the coalesced held-state once per tick and never
//! blocks. Two keyboard schemes (arrows and WASD) and the touch-swipe
//! axes are unioned: either source moves the player.

use crate::sim::TickInput;

/// Which keyboard scheme a direction update belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Arrows,
    Wasd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Left,
    Right,
    Up,
    Down,
}

/// Held-state for one directional input source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl AxisState {
    fn set(&mut self, dir: Dir, held: bool) {
        match dir {
            Dir::Left => self.left = held,
            Dir::Right => self.right = held,
            Dir::Up => self.up = held,
            Dir::Down => self.down = held,
        }
    }

    fn union(self, other: AxisState) -> AxisState {
        AxisState {
            left: self.left || other.left,
            right: self.right || other.right,
            up: self.up || other.up,
            down: self.down || other.down,
        }
    }
}

/// Continuously-updated input state, sampled at the start of each tick
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    arrows: AxisState,
    wasd: AxisState,
    touch: AxisState,
    shoot: bool,
    pause_queued: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keyboard key transition, already mapped to a scheme + direction
    pub fn set_direction(&mut self, scheme: Scheme, dir: Dir, held: bool) {
        match scheme {
            Scheme::Arrows => self.arrows.set(dir, held),
            Scheme::Wasd => self.wasd.set(dir, held),
        }
    }

    /// Replace the swipe-derived touch axes wholesale
    pub fn set_touch_axes(&mut self, axes: AxisState) {
        self.touch = axes;
    }

    pub fn set_shoot(&mut self, held: bool) {
        self.shoot = held;
    }

    /// Queue a pause toggle; consumed by the next sample
    pub fn queue_pause(&mut self) {
        self.pause_queued = true;
    }

    /// Release everything (window blur, quit to menu)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Coalesce into this tick's input. Pause is edge-triggered and
    /// drains; held directions persist across samples.
    pub fn sample(&mut self) -> TickInput {
        let axes = self.arrows.union(self.wasd).union(self.touch);
        let pause = self.pause_queued;
        self.pause_queued = false;
        TickInput {
            left: axes.left,
            right: axes.right,
            up: axes.up,
            down: axes.down,
            shoot: self.shoot,
            pause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemes_union_into_one_axis_set() {
        let mut input = InputState::new();
        input.set_direction(Scheme::Arrows, Dir::Left, true);
        input.set_direction(Scheme::Wasd, Dir::Up, true);
        input.set_touch_axes(AxisState {
            right: true,
            ..Default::default()
        });

        let sampled = input.sample();
        assert!(sampled.left);
        assert!(sampled.up);
        assert!(sampled.right);
        assert!(!sampled.down);
    }

    #[test]
    fn either_scheme_can_release_only_its_own_key() {
        let mut input = InputState::new();
        input.set_direction(Scheme::Arrows, Dir::Left, true);
        input.set_direction(Scheme::Wasd, Dir::Left, true);

        // Releasing the arrow key leaves the WASD hold in place
        input.set_direction(Scheme::Arrows, Dir::Left, false);
        assert!(input.sample().left);

        input.set_direction(Scheme::Wasd, Dir::Left, false);
        assert!(!input.sample().left);
    }

    #[test]
    fn pause_is_edge_triggered_and_drains() {
        let mut input = InputState::new();
        input.queue_pause();

        assert!(input.sample().pause);
        assert!(!input.sample().pause);
    }

    #[test]
    fn held_keys_persist_across_samples() {
        let mut input = InputState::new();
        input.set_direction(Scheme::Arrows, Dir::Down, true);
        input.set_shoot(true);

        assert!(input.sample().down);
        let again = input.sample();
        assert!(again.down);
        assert!(again.shoot);
    }
}
