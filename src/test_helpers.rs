#[cfg(test)]
pub mod helpers {
    use time::OffsetDateTime;

    use crate::clock::Clock;
    use crate::roster::{Member, Roster};

    pub fn make_member(id: &str, name: &str) -> Member {
        Member::new(id, name)
    }

    /// Roster whose member names are the upper-cased ids.
    pub fn make_roster(ids: &[&str]) -> Roster {
        let members = ids
            .iter()
            .map(|id| make_member(id, &id.to_uppercase()))
            .collect();
        Roster::new("test", members).unwrap()
    }

    /// A clock stuck at one instant.
    #[derive(Debug, Clone, Copy)]
    pub struct FixedClock(pub OffsetDateTime);

    impl Clock for FixedClock {
        fn now(&self) -> OffsetDateTime {
            self.0
        }
    }
}
