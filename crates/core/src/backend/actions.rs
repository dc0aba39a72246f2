use crate::calendar::flags::flag_set;

flag_set! {
    /// Operations a backend may implement beyond plain reads.
    BackendActions(u16): 0b1111_1111_1111;
    CREATE_CALENDAR = 1;
    UPDATE_CALENDAR = 2;
    DELETE_CALENDAR = 4;
    MERGE_CALENDAR = 8;
    CREATE_OBJECT = 16;
    UPDATE_OBJECT = 32;
    DELETE_OBJECT = 64;
    FIND_IN_PERIOD = 128;
    FIND_OBJECTS_BY_TYPE = 256;
    FIND_IN_PERIOD_BY_TYPE = 512;
    SEARCH_BY_PROPERTIES = 1024;
    PROVIDES_CRON = 2048;
}

/// Answer to a capability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Every requested action is implemented; carries the requested set.
    Supported(BackendActions),
    Unsupported,
}

impl Capability {
    /// Checks `requested` against the actions a backend `implemented`.
    pub fn negotiate(implemented: BackendActions, requested: BackendActions) -> Self {
        if implemented.contains(requested) {
            Capability::Supported(requested)
        } else {
            Capability::Unsupported
        }
    }

    pub fn is_supported(self) -> bool {
        matches!(self, Capability::Supported(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negotiate_supported() {
        let implemented = BackendActions::CREATE_CALENDAR | BackendActions::DELETE_CALENDAR;
        assert_eq!(
            Capability::negotiate(implemented, BackendActions::CREATE_CALENDAR),
            Capability::Supported(BackendActions::CREATE_CALENDAR)
        );
    }

    #[test]
    fn test_negotiate_requires_every_requested_action() {
        let implemented = BackendActions::CREATE_CALENDAR;
        let requested = BackendActions::CREATE_CALENDAR | BackendActions::UPDATE_CALENDAR;
        assert_eq!(
            Capability::negotiate(implemented, requested),
            Capability::Unsupported
        );
        assert!(!Capability::negotiate(implemented, requested).is_supported());
    }

    #[test]
    fn test_all_actions() {
        assert_eq!(BackendActions::ALL.bits(), 4095);
        assert!(BackendActions::ALL.contains(BackendActions::PROVIDES_CRON));
    }
}
