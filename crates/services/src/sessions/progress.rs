/// Read-only view of session progress, useful for rendering mid-session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// Answered share of the session, 0..=100.
    #[must_use]
    pub fn percent_answered(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = self.answered * 100 / self.total;
        u8::try_from(pct).unwrap_or(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_answered_is_a_floor_share() {
        let progress = SessionProgress {
            total: 3,
            answered: 1,
            remaining: 2,
            is_complete: false,
        };
        assert_eq!(progress.percent_answered(), 33);
    }
}
