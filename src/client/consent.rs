use std::time::Duration;

use tracing::{debug, warn};

use super::storage::{Storage, CONSENT_KEY};

/// Time after page load before the banner is shown.
pub const BANNER_DELAY: Duration = Duration::from_secs(1);

/// A visitor's answer on the consent banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentDecision {
    Accepted,
    Declined,
}

impl ConsentDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentDecision::Accepted => "accepted",
            ConsentDecision::Declined => "declined",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentState {
    Unset,
    Decided(ConsentDecision),
}

impl ConsentState {
    fn from_stored(value: Option<&str>) -> Self {
        match value {
            None => ConsentState::Unset,
            Some("accepted") => ConsentState::Decided(ConsentDecision::Accepted),
            Some("declined") => ConsentState::Decided(ConsentDecision::Declined),
            Some(other) => {
                warn!("Ignoring unknown consent value '{}'", other);
                ConsentState::Unset
            }
        }
    }
}

/// Cookie consent state, persisted under [`CONSENT_KEY`].
///
/// `Unset` moves to a decision exactly once; decisions never expire and are
/// never revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsentController {
    state: ConsentState,
}

impl ConsentController {
    pub fn load(storage: &dyn Storage) -> Self {
        Self {
            state: ConsentState::from_stored(storage.get(CONSENT_KEY).as_deref()),
        }
    }

    pub fn state(&self) -> ConsentState {
        self.state
    }

    /// Record the visitor's decision. Returns `false` if one was already made.
    pub fn decide(&mut self, decision: ConsentDecision, storage: &mut dyn Storage) -> bool {
        if let ConsentState::Decided(existing) = self.state {
            debug!(
                "Consent already {}, ignoring {}",
                existing.as_str(),
                decision.as_str()
            );
            return false;
        }

        self.state = ConsentState::Decided(decision);
        storage.set(CONSENT_KEY, decision.as_str());
        true
    }

    /// Whether the banner is displayed `elapsed` after page load.
    pub fn banner_visible(&self, elapsed: Duration) -> bool {
        self.state == ConsentState::Unset && elapsed >= BANNER_DELAY
    }
}
