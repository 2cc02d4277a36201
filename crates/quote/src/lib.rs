//! Quote session domain module (event-sourced).
//!
//! Selection state, the three-step wizard that drives it, and the estimate
//! derived from it. Pure domain logic: no IO, no rendering.

pub mod estimate;
pub mod selections;
pub mod session;
pub mod step;

pub use estimate::{Estimate, EstimateLine};
pub use selections::{
    DEFAULT_LICENSE_TYPE, DEFAULT_SEAT_COUNT, DeploymentType, LicenseType, ParseSelectionError,
    ProductUpdate, SelectedProduct, SelectionMode, Selections, UserType,
};
pub use session::{
    BillingCycleChanged, DeploymentTypeChanged, ProductRemoved, ProductSelected, ProductUpdated,
    QuoteCommand, QuoteEvent, QuoteSession, RemoveProduct, RoleSelected, SelectDeploymentType,
    SelectProduct, SelectRole, SetBillingCycle, StepChanged, UpdateLicenseType, UpdateUserCount,
};
pub use step::{ProgressMarker, StepState, WizardStep};
