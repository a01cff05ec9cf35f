//! Current-insight slot with generation tokens.
//!
//! Each profession selection bumps the generation. A fetch started for an older
//! generation may still complete, but its result is dropped instead of overwriting
//! the newer selection.

use serde::Serialize;
use tracing::debug;

use crate::models::insight::ProfessionInsightBundle;

/// Proof that a fetch was started for a particular selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightTicket {
    generation: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InsightSlot {
    generation: u64,
    /// Profession the current bundle (or in-flight fetch) belongs to.
    pub profession: String,
    pub loading: bool,
    pub bundle: ProfessionInsightBundle,
}

impl InsightSlot {
    /// Starts a new selection and invalidates every outstanding ticket.
    /// The previous bundle is dropped so it is never shown under the new profession.
    pub fn begin(&mut self, profession: &str) -> InsightTicket {
        self.generation += 1;
        self.profession = profession.to_string();
        self.loading = true;
        self.bundle = ProfessionInsightBundle::empty();
        InsightTicket {
            generation: self.generation,
        }
    }

    /// Applies `bundle` if `ticket` is still the newest selection.
    /// Returns false when the result was superseded.
    pub fn complete(&mut self, ticket: InsightTicket, bundle: ProfessionInsightBundle) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "Dropping superseded insight result"
            );
            return false;
        }
        self.bundle = bundle;
        self.loading = false;
        true
    }

    /// Clears the slot (blank profession) and invalidates outstanding tickets.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.profession.clear();
        self.loading = false;
        self.bundle = ProfessionInsightBundle::empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle_with_summary(summary: &str) -> ProfessionInsightBundle {
        ProfessionInsightBundle {
            summary: summary.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_latest_ticket_applies() {
        let mut slot = InsightSlot::default();
        let ticket = slot.begin("Designer");
        assert!(slot.loading);
        assert!(slot.complete(ticket, bundle_with_summary("design")));
        assert!(!slot.loading);
        assert_eq!(slot.bundle.summary, "design");
    }

    #[test]
    fn test_stale_ticket_never_overwrites_newer_selection() {
        let mut slot = InsightSlot::default();
        let first = slot.begin("Designer");
        let second = slot.begin("Teacher");

        // Newer request finishes first, older one lands afterwards.
        assert!(slot.complete(second, bundle_with_summary("teach")));
        assert!(!slot.complete(first, bundle_with_summary("design")));

        assert_eq!(slot.profession, "Teacher");
        assert_eq!(slot.bundle.summary, "teach");
    }

    #[test]
    fn test_stale_ticket_while_newer_in_flight_keeps_loading() {
        let mut slot = InsightSlot::default();
        let first = slot.begin("Designer");
        let _second = slot.begin("Teacher");
        assert!(!slot.complete(first, bundle_with_summary("design")));
        assert!(slot.loading);
        assert!(slot.bundle.is_empty());
    }

    #[test]
    fn test_new_selection_clears_previous_bundle() {
        let mut slot = InsightSlot::default();
        let ticket = slot.begin("Designer");
        slot.complete(ticket, bundle_with_summary("design"));
        slot.begin("Teacher");
        assert_eq!(slot.profession, "Teacher");
        assert!(slot.loading);
        assert!(slot.bundle.is_empty());
    }

    #[test]
    fn test_reset_invalidates_outstanding_ticket() {
        let mut slot = InsightSlot::default();
        let ticket = slot.begin("Designer");
        slot.reset();
        assert!(!slot.complete(ticket, bundle_with_summary("design")));
        assert!(slot.bundle.is_empty());
        assert!(slot.profession.is_empty());
    }
}
