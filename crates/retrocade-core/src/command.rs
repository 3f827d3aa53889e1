use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Number of recent raw commands the debouncer votes over.
pub const DEBOUNCE_WINDOW: usize = 5;

/// Normalized per-frame command from the host's input layer. `None` is a
/// real observation (nothing recognized this frame), not an absence of data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Command {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
    Shoot,
}

impl Command {
    /// The movement direction this command encodes, if any.
    pub fn direction(self) -> Option<Dir> {
        match self {
            Command::Up => Some(Dir::Up),
            Command::Down => Some(Dir::Down),
            Command::Left => Some(Dir::Left),
            Command::Right => Some(Dir::Right),
            Command::None | Command::Shoot => None,
        }
    }
}

/// Cardinal movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    /// One-cell step as (column delta, row delta); rows grow downward.
    pub fn grid_step(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }

    /// Unit displacement in field coordinates.
    pub fn unit(self) -> (f32, f32) {
        match self {
            Dir::Up => (0.0, -1.0),
            Dir::Down => (0.0, 1.0),
            Dir::Left => (-1.0, 0.0),
            Dir::Right => (1.0, 0.0),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// Sliding-window majority vote over raw per-frame commands.
///
/// A per-frame classifier misfires on single frames; voting over the last
/// `DEBOUNCE_WINDOW` observations suppresses those flickers. Until the window
/// has filled once, the output is `Command::None`. Ties go to the candidate
/// whose latest occurrence is most recent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDebouncer {
    window: VecDeque<Command>,
}

impl CommandDebouncer {
    pub fn new() -> Self {
        Self {
            window: VecDeque::with_capacity(DEBOUNCE_WINDOW),
        }
    }

    /// Record this frame's raw command and return the stabilized command.
    pub fn push(&mut self, raw: Command) -> Command {
        if self.window.len() == DEBOUNCE_WINDOW {
            self.window.pop_front();
        }
        self.window.push_back(raw);
        if self.window.len() < DEBOUNCE_WINDOW {
            return Command::None;
        }
        self.majority()
    }

    /// Majority winner of the current window. Scanning newest-first and
    /// keeping only strict improvements means the first candidate to reach
    /// the maximum count is the one seen most recently.
    fn majority(&self) -> Command {
        let mut best = Command::None;
        let mut best_count = 0;
        for &candidate in self.window.iter().rev() {
            let count = self.window.iter().filter(|&&c| c == candidate).count();
            if count > best_count {
                best = candidate;
                best_count = count;
            }
        }
        best
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }
}

impl Default for CommandDebouncer {
    fn default() -> Self {
        Self::new()
    }
}
