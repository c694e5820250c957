use super::{Domain, Observation, Transition};

const REWARD_STEP: f64 = 0.0;
const REWARD_EXIT: f64 = 1.0;

/// Bounded corridor with a rewarded exit at the right end.
///
/// The agent starts at cell 0 and walks a chain of `length` cells. Action 0
/// advances toward the exit, action 1 retreats; retreating from cell 0 bumps
/// into the wall and leaves the agent in place. Stepping past the last cell
/// ends the episode with a unit reward; every other step is unrewarded.
pub struct Corridor {
    length: usize,
    loc: usize,
}

impl Corridor {
    pub fn new(length: usize) -> Corridor {
        Corridor {
            length: length.max(1),
            loc: 0,
        }
    }

    fn update_state(&mut self, a: usize) {
        match a {
            0 => self.loc += 1,
            _ => self.loc = self.loc.saturating_sub(1),
        }
    }
}

impl Default for Corridor {
    fn default() -> Corridor { Corridor::new(8) }
}

impl Domain for Corridor {
    type State = usize;

    fn emit(&self) -> Observation<usize> {
        if self.is_terminal() {
            Observation::Terminal(self.loc)
        } else {
            Observation::Full(self.loc)
        }
    }

    fn step(&mut self, action: usize) -> Transition<usize, usize> {
        let from = self.emit();

        self.update_state(action);
        let to = self.emit();

        let reward = match to {
            Observation::Terminal(_) => REWARD_EXIT,
            _ => REWARD_STEP,
        };

        Transition {
            from,
            action,
            reward,
            to,
        }
    }

    fn is_terminal(&self) -> bool { self.loc >= self.length }

    fn n_actions(&self) -> usize { 2 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_observation() {
        let c = Corridor::new(2);

        assert_eq!(c.emit(), Observation::Full(0));
        assert!(!c.is_terminal());
    }

    #[test]
    fn test_wall_bounce() {
        let mut c = Corridor::new(2);
        let t = c.step(1);

        assert_eq!(t.to, Observation::Full(0));
        assert_eq!(t.reward, REWARD_STEP);
    }

    #[test]
    fn test_walk_to_exit() {
        let mut c = Corridor::new(2);

        let t = c.step(0);
        assert_eq!(t.to, Observation::Full(1));
        assert_eq!(t.reward, REWARD_STEP);

        let t = c.step(0);
        assert_eq!(t.to, Observation::Terminal(2));
        assert_eq!(t.reward, REWARD_EXIT);
        assert!(t.terminated());
        assert!(c.is_terminal());
    }
}
