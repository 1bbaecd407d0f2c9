//! Input arbitration: four producers, one ordered command stream.
//!
//! Drag gestures, scroll wheels, keyboard paging, and page-indicator taps are
//! each interpreted by their own channel logic into the narrow [`NavCommand`]
//! type. All commands go through one FIFO queue and a single consumer applies
//! them to the [`Pager`] in arrival order.
//!
//! # Channels
//!
//! - **Drag**: a press becomes a drag once it has moved 20 units in any direction;
//!   only the gesture end is evaluated, and a net horizontal translation of at
//!   most `-40` pages forward, at least `+40` pages backward
//! - **Wheel**: precise (trackpad) deltas accumulate and fire one command per
//!   10-unit step; coarse (wheel click) deltas fire one command each
//! - **Keyboard**: arrows and page keys map one-to-one, with arrows gated while
//!   the search field has focus so text editing is never hijacked
//! - **Indicator**: a tap jumps straight to the tapped page
//!
//! Coalescing only happens inside the wheel accumulator. Commands from
//! different channels are never reordered or merged.
//!
//! External event sources running on other threads can enqueue already
//! interpreted commands through a cloned [`CommandSender`].

use crate::app::pager::Pager;
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Net horizontal drag translation needed to commit a page change.
pub const DRAG_COMMIT_DISTANCE: f64 = 40.0;

/// Minimum straight-line movement before a press is recognized as a drag at all.
pub const DRAG_RECOGNITION_DISTANCE: f64 = 20.0;

/// Accumulated precise-scroll delta that equals one page step.
pub const WHEEL_STEP: f64 = 10.0;

/// A page navigation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Forward,
    Backward,
    JumpTo(usize),
}

/// Keys that can page the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
}

/// Where keyboard focus was when a key went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFocus {
    /// Focus is on the grid (or nowhere in particular).
    Grid,
    /// Focus is inside a text field.
    ///
    /// `text_len` and `caret` are counted in characters.
    TextField { text_len: usize, caret: usize },
}

/// Maps a key press to a command, honoring text-field focus.
///
/// Outside a text field every paging key fires. Inside one:
///
/// - `PageUp`/`PageDown` always fire
/// - `Up`/`Down` never fire (they belong to the text field)
/// - `Left` fires only if the field is empty or the caret is at position 0
/// - `Right` fires only if the field is empty or the caret is at the end
///
/// # Examples
///
/// ```
/// use gridlaunch::app::{key_command, KeyFocus, NavCommand, NavKey};
///
/// let editing = KeyFocus::TextField { text_len: 4, caret: 2 };
/// assert_eq!(key_command(NavKey::Left, editing), None);
/// assert_eq!(key_command(NavKey::PageDown, editing), Some(NavCommand::Forward));
/// ```
#[must_use]
pub fn key_command(key: NavKey, focus: KeyFocus) -> Option<NavCommand> {
    let command = match key {
        NavKey::Right | NavKey::Up | NavKey::PageDown => NavCommand::Forward,
        NavKey::Left | NavKey::Down | NavKey::PageUp => NavCommand::Backward,
    };

    let KeyFocus::TextField { text_len, caret } = focus else {
        return Some(command);
    };

    let allowed = match key {
        NavKey::PageUp | NavKey::PageDown => true,
        NavKey::Up | NavKey::Down => false,
        NavKey::Left => text_len == 0 || caret == 0,
        NavKey::Right => text_len == 0 || caret >= text_len,
    };

    allowed.then_some(command)
}

/// Evaluates a finished drag by its net horizontal translation.
#[must_use]
pub fn drag_command(translation_x: f64) -> Option<NavCommand> {
    if translation_x <= -DRAG_COMMIT_DISTANCE {
        Some(NavCommand::Forward)
    } else if translation_x >= DRAG_COMMIT_DISTANCE {
        Some(NavCommand::Backward)
    } else {
        None
    }
}

/// Tracks one drag gesture from press to release.
///
/// Intermediate positions only decide whether the press became a drag, measured
/// as straight-line distance from the press point. The committed command depends
/// solely on the horizontal translation at release.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragTracker {
    start: Option<(f64, f64)>,
    recognized: bool,
}

impl DragTracker {
    pub fn begin(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
        self.recognized = false;
    }

    pub fn update(&mut self, x: f64, y: f64) {
        if let Some((start_x, start_y)) = self.start {
            if (x - start_x).hypot(y - start_y) >= DRAG_RECOGNITION_DISTANCE {
                self.recognized = true;
            }
        }
    }

    /// Ends the gesture and returns the command it commits, if any.
    pub fn end(&mut self, x: f64, y: f64) -> Option<NavCommand> {
        self.update(x, y);
        let (start_x, _) = self.start.take()?;
        let recognized = std::mem::take(&mut self.recognized);
        if !recognized {
            return None;
        }
        drag_command(x - start_x)
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.start.is_some()
    }

    /// Whether the current press has moved far enough to count as a drag.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        self.recognized
    }
}

/// One scroll event as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollDelta {
    pub dx: f64,
    pub dy: f64,
    /// High-resolution (trackpad) deltas rather than discrete wheel clicks.
    pub precise: bool,
    /// The device reports natural (inverted) scrolling.
    pub inverted: bool,
}

impl ScrollDelta {
    /// Signed delta along the paging axis.
    ///
    /// Vertical is preferred; a purely horizontal scroll counts with its sign
    /// flipped so that swiping left pages forward. Inverted devices flip the result.
    #[must_use]
    pub fn paging_delta(&self) -> f64 {
        let delta = if self.dy != 0.0 { self.dy } else { -self.dx };
        if self.inverted {
            -delta
        } else {
            delta
        }
    }
}

/// Scroll accumulator with step hysteresis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelAccumulator {
    accumulated: f64,
    step: f64,
}

impl Default for WheelAccumulator {
    fn default() -> Self {
        Self::new(WHEEL_STEP)
    }
}

impl WheelAccumulator {
    #[must_use]
    pub const fn new(step: f64) -> Self {
        Self {
            accumulated: 0.0,
            step,
        }
    }

    /// Residual delta not yet converted into a command.
    #[must_use]
    pub const fn residual(&self) -> f64 {
        self.accumulated
    }

    /// Feeds one scroll event and returns the commands it produces.
    ///
    /// Coarse events bypass the accumulator entirely.
    pub fn feed(&mut self, delta: ScrollDelta) -> Vec<NavCommand> {
        let value = delta.paging_delta();

        if !delta.precise {
            return direction(value).into_iter().collect();
        }

        self.accumulated += value;
        let mut commands = Vec::new();
        while self.accumulated.abs() >= self.step {
            if self.accumulated > 0.0 {
                commands.push(NavCommand::Forward);
                self.accumulated -= self.step;
            } else {
                commands.push(NavCommand::Backward);
                self.accumulated += self.step;
            }
        }
        commands
    }
}

fn direction(value: f64) -> Option<NavCommand> {
    if value > 0.0 {
        Some(NavCommand::Forward)
    } else if value < 0.0 {
        Some(NavCommand::Backward)
    } else {
        None
    }
}

/// Raw input observed by the launcher, before interpretation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    DragBegan { x: f64, y: f64 },
    DragMoved { x: f64, y: f64 },
    DragEnded { x: f64, y: f64 },
    Scroll(ScrollDelta),
    Key { key: NavKey, focus: KeyFocus },
    IndicatorTapped(usize),
}

/// Cloneable producer handle onto the arbitrator's queue.
#[derive(Debug, Clone)]
pub struct CommandSender {
    sender: Sender<NavCommand>,
}

impl CommandSender {
    /// Enqueues an already-interpreted command.
    ///
    /// Returns `false` if the arbitrator has been dropped.
    pub fn send(&self, command: NavCommand) -> bool {
        self.sender.send(command).is_ok()
    }
}

/// Serializes every input channel into one ordered command queue.
#[derive(Debug)]
pub struct InputArbitrator {
    sender: Sender<NavCommand>,
    receiver: Receiver<NavCommand>,
    drag: DragTracker,
    wheel: WheelAccumulator,
}

impl Default for InputArbitrator {
    fn default() -> Self {
        Self::new()
    }
}

impl InputArbitrator {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            drag: DragTracker::default(),
            wheel: WheelAccumulator::default(),
        }
    }

    /// Returns a producer handle for external event sources.
    #[must_use]
    pub fn command_sender(&self) -> CommandSender {
        CommandSender {
            sender: self.sender.clone(),
        }
    }

    /// Interprets one raw event and enqueues whatever commands it yields.
    ///
    /// Returns how many commands were enqueued.
    pub fn observe(&mut self, event: InputEvent) -> usize {
        let commands: Vec<NavCommand> = match event {
            InputEvent::DragBegan { x, y } => {
                self.drag.begin(x, y);
                vec![]
            }
            InputEvent::DragMoved { x, y } => {
                self.drag.update(x, y);
                vec![]
            }
            InputEvent::DragEnded { x, y } => self.drag.end(x, y).into_iter().collect(),
            InputEvent::Scroll(delta) => self.wheel.feed(delta),
            InputEvent::Key { key, focus } => key_command(key, focus).into_iter().collect(),
            InputEvent::IndicatorTapped(page) => vec![NavCommand::JumpTo(page)],
        };

        for command in &commands {
            tracing::trace!(command = ?command, "command enqueued");
            // The receiver lives in `self`, so the channel cannot be disconnected here.
            let _ = self.sender.send(*command);
        }
        commands.len()
    }

    /// Number of commands waiting to be applied.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Applies every queued command to `pager`, oldest first.
    ///
    /// Out-of-range jumps are logged and dropped. Returns the number of commands
    /// consumed.
    pub fn drain_into(&self, pager: &mut Pager) -> usize {
        let mut applied = 0;
        for command in self.receiver.try_iter() {
            if let Err(e) = pager.apply(command) {
                tracing::debug!(command = ?command, error = %e, "navigation command rejected");
            }
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pager::Geometry;

    fn precise(dy: f64) -> ScrollDelta {
        ScrollDelta {
            dx: 0.0,
            dy,
            precise: true,
            inverted: false,
        }
    }

    fn coarse(dy: f64) -> ScrollDelta {
        ScrollDelta {
            precise: false,
            ..precise(dy)
        }
    }

    fn paged(items: usize, capacity: i64) -> Pager {
        let mut pager = Pager::new(Geometry::new(capacity, 1));
        pager.set_item_count(items);
        pager
    }

    #[test]
    fn precise_deltas_summing_to_23_fire_twice_with_residual_3() {
        let mut wheel = WheelAccumulator::default();
        let mut commands = Vec::new();
        for dy in [4.0, 4.0, 4.0, 4.0, 4.0, 3.0] {
            commands.extend(wheel.feed(precise(dy)));
        }
        assert_eq!(commands, vec![NavCommand::Forward, NavCommand::Forward]);
        assert!((wheel.residual() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn one_large_precise_delta_fires_repeatedly() {
        let mut wheel = WheelAccumulator::default();
        let commands = wheel.feed(precise(-31.0));
        assert_eq!(commands, vec![NavCommand::Backward; 3]);
        assert!((wheel.residual() + 1.0).abs() < 1e-9);
    }

    #[test]
    fn opposite_precise_deltas_cancel() {
        let mut wheel = WheelAccumulator::default();
        assert!(wheel.feed(precise(7.0)).is_empty());
        assert!(wheel.feed(precise(-7.0)).is_empty());
        assert!(wheel.residual().abs() < 1e-9);
    }

    #[test]
    fn coarse_deltas_fire_once_each_and_skip_accumulator() {
        let mut wheel = WheelAccumulator::default();
        assert_eq!(wheel.feed(coarse(0.1)), vec![NavCommand::Forward]);
        assert_eq!(wheel.feed(coarse(-50.0)), vec![NavCommand::Backward]);
        assert!(wheel.feed(coarse(0.0)).is_empty());
        assert_eq!(wheel.residual(), 0.0);
    }

    #[test]
    fn horizontal_fallback_and_inversion() {
        let sideways = ScrollDelta {
            dx: -12.0,
            dy: 0.0,
            precise: true,
            inverted: false,
        };
        assert_eq!(sideways.paging_delta(), 12.0);

        let natural = ScrollDelta {
            inverted: true,
            ..precise(5.0)
        };
        assert_eq!(natural.paging_delta(), -5.0);
    }

    #[test]
    fn drag_deadband() {
        assert_eq!(drag_command(-40.0), Some(NavCommand::Forward));
        assert_eq!(drag_command(40.0), Some(NavCommand::Backward));
        assert_eq!(drag_command(-39.9), None);
        assert_eq!(drag_command(25.0), None);
    }

    #[test]
    fn only_the_drag_end_position_counts() {
        let mut drag = DragTracker::default();
        drag.begin(100.0, 0.0);
        drag.update(20.0, 0.0);
        drag.update(180.0, 0.0);
        assert_eq!(drag.end(90.0, 0.0), None);
        assert!(!drag.is_active());

        drag.begin(100.0, 0.0);
        drag.update(150.0, 0.0);
        assert_eq!(drag.end(30.0, 0.0), Some(NavCommand::Forward));
    }

    #[test]
    fn recognition_uses_straight_line_distance() {
        let mut drag = DragTracker::default();
        drag.begin(0.0, 0.0);
        drag.update(12.0, 0.0);
        assert!(!drag.is_recognized());
        drag.update(12.0, 16.0);
        assert!(drag.is_recognized());

        drag.begin(0.0, 0.0);
        drag.update(0.0, 19.0);
        assert!(!drag.is_recognized());
        drag.update(0.0, -25.0);
        assert!(drag.is_recognized());
        // Vertical travel alone never commits a page change.
        assert_eq!(drag.end(-5.0, -25.0), None);
    }

    #[test]
    fn drag_end_without_begin_is_ignored() {
        let mut drag = DragTracker::default();
        assert_eq!(drag.end(-500.0, 0.0), None);
    }

    #[test]
    fn keys_outside_text_fields_always_page() {
        for (key, expected) in [
            (NavKey::Right, NavCommand::Forward),
            (NavKey::Up, NavCommand::Forward),
            (NavKey::PageDown, NavCommand::Forward),
            (NavKey::Left, NavCommand::Backward),
            (NavKey::Down, NavCommand::Backward),
            (NavKey::PageUp, NavCommand::Backward),
        ] {
            assert_eq!(key_command(key, KeyFocus::Grid), Some(expected));
        }
    }

    #[test]
    fn arrows_in_text_field_respect_caret_boundaries() {
        let middle = KeyFocus::TextField { text_len: 5, caret: 2 };
        let start = KeyFocus::TextField { text_len: 5, caret: 0 };
        let end = KeyFocus::TextField { text_len: 5, caret: 5 };
        let empty = KeyFocus::TextField { text_len: 0, caret: 0 };

        assert_eq!(key_command(NavKey::Left, middle), None);
        assert_eq!(key_command(NavKey::Right, middle), None);
        assert_eq!(key_command(NavKey::Left, start), Some(NavCommand::Backward));
        assert_eq!(key_command(NavKey::Right, start), None);
        assert_eq!(key_command(NavKey::Right, end), Some(NavCommand::Forward));
        assert_eq!(key_command(NavKey::Left, end), None);
        assert_eq!(key_command(NavKey::Left, empty), Some(NavCommand::Backward));
        assert_eq!(key_command(NavKey::Right, empty), Some(NavCommand::Forward));
    }

    #[test]
    fn vertical_arrows_never_page_inside_text_fields() {
        let empty = KeyFocus::TextField { text_len: 0, caret: 0 };
        let middle = KeyFocus::TextField { text_len: 3, caret: 1 };
        for focus in [empty, middle] {
            assert_eq!(key_command(NavKey::Up, focus), None);
            assert_eq!(key_command(NavKey::Down, focus), None);
            assert_eq!(key_command(NavKey::PageDown, focus), Some(NavCommand::Forward));
            assert_eq!(key_command(NavKey::PageUp, focus), Some(NavCommand::Backward));
        }
    }

    #[test]
    fn commands_apply_in_arrival_order_across_channels() {
        let mut arbitrator = InputArbitrator::new();
        let mut pager = paged(50, 10);

        arbitrator.observe(InputEvent::IndicatorTapped(3));
        arbitrator.observe(InputEvent::Key {
            key: NavKey::PageDown,
            focus: KeyFocus::Grid,
        });
        arbitrator.observe(InputEvent::Scroll(precise(25.0)));
        arbitrator.observe(InputEvent::DragBegan { x: 0.0, y: 0.0 });
        arbitrator.observe(InputEvent::DragEnded { x: 60.0, y: 4.0 });
        assert_eq!(arbitrator.pending(), 5);

        assert_eq!(arbitrator.drain_into(&mut pager), 5);
        // 3 → 4 → 0 → 1 → 0
        assert_eq!(pager.current_page(), 0);
        assert_eq!(arbitrator.pending(), 0);
    }

    #[test]
    fn jump_then_forward_is_not_reordered() {
        let mut arbitrator = InputArbitrator::new();
        let mut pager = paged(30, 10);

        arbitrator.observe(InputEvent::Key {
            key: NavKey::Right,
            focus: KeyFocus::Grid,
        });
        arbitrator.observe(InputEvent::IndicatorTapped(0));
        arbitrator.drain_into(&mut pager);
        assert_eq!(pager.current_page(), 0);

        arbitrator.observe(InputEvent::IndicatorTapped(0));
        arbitrator.observe(InputEvent::Key {
            key: NavKey::Right,
            focus: KeyFocus::Grid,
        });
        arbitrator.drain_into(&mut pager);
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn rejected_jump_does_not_block_later_commands() {
        let mut arbitrator = InputArbitrator::new();
        let mut pager = paged(30, 10);

        arbitrator.observe(InputEvent::IndicatorTapped(9));
        arbitrator.observe(InputEvent::Key {
            key: NavKey::PageDown,
            focus: KeyFocus::Grid,
        });
        assert_eq!(arbitrator.drain_into(&mut pager), 2);
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn empty_pager_absorbs_all_channels() {
        let mut arbitrator = InputArbitrator::new();
        let mut pager = paged(0, 10);

        arbitrator.observe(InputEvent::IndicatorTapped(2));
        arbitrator.observe(InputEvent::Scroll(coarse(1.0)));
        assert_eq!(arbitrator.drain_into(&mut pager), 2);
        assert_eq!(pager.current_page(), 0);
    }

    #[test]
    fn external_producers_share_the_queue() {
        let mut arbitrator = InputArbitrator::new();
        let mut pager = paged(40, 10);
        let sender = arbitrator.command_sender();

        let handle = std::thread::spawn(move || sender.send(NavCommand::JumpTo(2)));
        assert!(handle.join().unwrap());
        arbitrator.observe(InputEvent::Key {
            key: NavKey::PageUp,
            focus: KeyFocus::Grid,
        });

        arbitrator.drain_into(&mut pager);
        assert_eq!(pager.current_page(), 1);
    }
}
