use serde::{Deserialize, Serialize};

/// Wizard screens, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    /// Step 1: pick the professional role.
    #[default]
    UseCase,
    /// Step 2: pick a product (and deployment type).
    Products,
    /// Step 3: configure license type, seats and billing cycle.
    Configure,
}

impl WizardStep {
    pub fn all() -> &'static [WizardStep] {
        &[WizardStep::UseCase, WizardStep::Products, WizardStep::Configure]
    }

    /// 1-based position shown in the progress indicator.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::UseCase => 1,
            WizardStep::Products => 2,
            WizardStep::Configure => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::UseCase => "Use Case",
            WizardStep::Products => "Products",
            WizardStep::Configure => "Details",
        }
    }

    /// Screen heading.
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::UseCase => "Select your use case",
            WizardStep::Products => "Select your products",
            WizardStep::Configure => "Configure your products",
        }
    }

    /// Target of the back button; `None` on the first screen.
    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::UseCase => None,
            WizardStep::Products => Some(WizardStep::UseCase),
            WizardStep::Configure => Some(WizardStep::Products),
        }
    }

    /// Progress indicator state for every step, seen from `self`.
    pub fn progress(&self) -> Vec<ProgressMarker> {
        Self::all()
            .iter()
            .map(|&step| ProgressMarker {
                step,
                state: match step.cmp(self) {
                    core::cmp::Ordering::Less => StepState::Complete,
                    core::cmp::Ordering::Equal => StepState::Current,
                    core::cmp::Ordering::Greater => StepState::Upcoming,
                },
            })
            .collect()
    }

    /// Whether the connector drawn after `step` is filled.
    ///
    /// A connector fills only once the step after it is also complete.
    pub fn connector_filled_after(&self, step: WizardStep) -> bool {
        self.number() > step.number() + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Complete,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressMarker {
    pub step: WizardStep,
    pub state: StepState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_and_labels() {
        let numbers: Vec<u8> = WizardStep::all().iter().map(WizardStep::number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(WizardStep::Configure.label(), "Details");
        assert_eq!(WizardStep::default(), WizardStep::UseCase);
    }

    #[test]
    fn previous_walks_backwards_and_stops_at_first() {
        assert_eq!(WizardStep::Configure.previous(), Some(WizardStep::Products));
        assert_eq!(WizardStep::Products.previous(), Some(WizardStep::UseCase));
        assert_eq!(WizardStep::UseCase.previous(), None);
    }

    #[test]
    fn progress_marks_complete_current_upcoming() {
        let states: Vec<StepState> = WizardStep::Products
            .progress()
            .into_iter()
            .map(|m| m.state)
            .collect();
        assert_eq!(
            states,
            vec![StepState::Complete, StepState::Current, StepState::Upcoming]
        );
    }

    #[test]
    fn connectors_fill_one_step_late() {
        assert!(!WizardStep::Products.connector_filled_after(WizardStep::UseCase));
        assert!(WizardStep::Configure.connector_filled_after(WizardStep::UseCase));
        assert!(!WizardStep::Configure.connector_filled_after(WizardStep::Products));
    }
}
