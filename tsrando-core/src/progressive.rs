use crate::requirement::Requirement;

/// Ordered upgrade stages of a progressive item plus a cursor to the stage the
/// next pickup grants.
///
/// Advancing past the last stage holds on the last stage, so counting more
/// pickups than there are stages never panics and never wraps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressiveChain {
    stages: Vec<Requirement>,
    cursor: usize,
}

impl ProgressiveChain {
    pub fn new(stages: Vec<Requirement>) -> ProgressiveChain {
        ProgressiveChain { stages, cursor: 0 }
    }

    pub fn stages(&self) -> &[Requirement] {
        &self.stages
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn current_grant(&self) -> Requirement {
        self.stages
            .get(self.cursor)
            .copied()
            .unwrap_or(Requirement::NONE)
    }

    pub fn advance(&mut self) {
        if self.cursor + 1 < self.stages.len() {
            self.cursor += 1;
        }
    }

    pub fn is_at_final_stage(&self) -> bool {
        self.cursor + 1 >= self.stages.len()
    }

    /// Independent copy with the cursor back at the first stage.
    pub fn restarted(&self) -> ProgressiveChain {
        ProgressiveChain::new(self.stages.clone())
    }

    /// Everything granted by `pickups` further pickups, starting from the
    /// current cursor. Works on a copy; `self` is left untouched.
    pub fn unlocked_by(&self, pickups: usize) -> Requirement {
        let mut chain = self.clone();
        let mut unlocked = Requirement::NONE;

        for _ in 0..pickups {
            unlocked |= chain.current_grant();
            chain.advance();
        }

        unlocked
    }
}
