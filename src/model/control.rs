/// Resolved movement intent for a single frame.
///
/// Every input source ends up writing into one of these records; physics only
/// ever sees the merged result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
}

impl ControlState {
    pub const fn new(move_left: bool, move_right: bool, jump: bool) -> Self {
        Self { move_left, move_right, jump }
    }

    /// Flag-wise OR of two records.
    pub const fn merge(self, other: Self) -> Self {
        Self {
            move_left: self.move_left || other.move_left,
            move_right: self.move_right || other.move_right,
            jump: self.jump || other.jump,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub const fn is_idle(&self) -> bool {
        !self.move_left && !self.move_right && !self.jump
    }

    /// Net horizontal direction: -1, 0 or 1. Both flags held cancels out.
    pub const fn horizontal(&self) -> i8 {
        match (self.move_left, self.move_right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_flagwise_or() {
        let a = ControlState::new(true, false, false);
        let b = ControlState::new(false, false, true);
        assert_eq!(a.merge(b), ControlState::new(true, false, true));
        assert_eq!(ControlState::default().merge(ControlState::default()), ControlState::default());
    }

    #[test]
    fn horizontal_axis() {
        assert_eq!(ControlState::new(true, false, false).horizontal(), -1);
        assert_eq!(ControlState::new(false, true, false).horizontal(), 1);
        assert_eq!(ControlState::new(true, true, false).horizontal(), 0);
        assert_eq!(ControlState::default().horizontal(), 0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut c = ControlState::new(true, true, true);
        assert!(!c.is_idle());
        c.clear();
        assert!(c.is_idle());
    }
}
