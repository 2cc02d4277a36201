use std::sync::Arc;

use serde::{Deserialize, Serialize};

use quotekit_catalog::{Catalog, ProductDescriptor, ProductId};
use quotekit_core::{Aggregate, AggregateRoot, DomainError, SessionId};
use quotekit_events::{Command, Event};
use quotekit_pricing::{BillingCycle, SeatCount, parse_seat_count};

use crate::selections::{
    DeploymentType, LicenseType, ProductUpdate, SelectionMode, Selections, UserType,
};
use crate::step::WizardStep;

/// Aggregate root: one run of the quote wizard.
///
/// Owns the current step and the selections. The catalog is shared and
/// read-only; the selection mode is fixed for the session's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteSession {
    id: SessionId,
    catalog: Arc<Catalog>,
    mode: SelectionMode,
    step: WizardStep,
    selections: Selections,
    version: u64,
}

impl QuoteSession {
    /// Fresh session on the first step with default selections.
    pub fn new(id: SessionId, catalog: Arc<Catalog>, mode: SelectionMode) -> Self {
        Self {
            id,
            catalog,
            mode,
            step: WizardStep::UseCase,
            selections: Selections::new(),
            version: 0,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }
}

impl AggregateRoot for QuoteSession {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: SelectRole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectRole {
    pub user_type: UserType,
}

/// Command: SelectDeploymentType.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectDeploymentType {
    pub deployment_type: DeploymentType,
}

/// Command: SelectProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectProduct {
    pub product_id: ProductId,
}

/// Command: RemoveProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveProduct {
    pub index: usize,
}

/// Command: UpdateLicenseType.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLicenseType {
    pub index: usize,
    pub license_type: LicenseType,
}

/// Command: UpdateUserCount.
///
/// Carries the raw text typed by the user; coercion happens in `handle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserCount {
    pub index: usize,
    pub raw: String,
}

/// Command: SetBillingCycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetBillingCycle {
    pub cycle: BillingCycle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteCommand {
    SelectRole(SelectRole),
    SelectDeploymentType(SelectDeploymentType),
    SelectProduct(SelectProduct),
    RemoveProduct(RemoveProduct),
    UpdateLicenseType(UpdateLicenseType),
    UpdateUserCount(UpdateUserCount),
    SetBillingCycle(SetBillingCycle),
    GoBack,
    AddAnotherProduct,
}

impl Command for QuoteCommand {
    fn command_type(&self) -> &'static str {
        match self {
            QuoteCommand::SelectRole(_) => "quote.select_role",
            QuoteCommand::SelectDeploymentType(_) => "quote.select_deployment_type",
            QuoteCommand::SelectProduct(_) => "quote.select_product",
            QuoteCommand::RemoveProduct(_) => "quote.remove_product",
            QuoteCommand::UpdateLicenseType(_) => "quote.update_license_type",
            QuoteCommand::UpdateUserCount(_) => "quote.update_user_count",
            QuoteCommand::SetBillingCycle(_) => "quote.set_billing_cycle",
            QuoteCommand::GoBack => "quote.go_back",
            QuoteCommand::AddAnotherProduct => "quote.add_another_product",
        }
    }
}

/// Event: RoleSelected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSelected {
    pub user_type: UserType,
}

/// Event: DeploymentTypeChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentTypeChanged {
    pub deployment_type: DeploymentType,
}

/// Event: ProductSelected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSelected {
    pub product: ProductDescriptor,
    pub mode: SelectionMode,
}

/// Event: ProductUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdated {
    pub index: usize,
    pub update: ProductUpdate,
}

/// Event: ProductRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRemoved {
    pub index: usize,
    pub product_id: ProductId,
}

/// Event: BillingCycleChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingCycleChanged {
    pub cycle: BillingCycle,
}

/// Event: StepChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepChanged {
    pub from: WizardStep,
    pub to: WizardStep,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteEvent {
    RoleSelected(RoleSelected),
    DeploymentTypeChanged(DeploymentTypeChanged),
    ProductSelected(ProductSelected),
    ProductUpdated(ProductUpdated),
    ProductRemoved(ProductRemoved),
    BillingCycleChanged(BillingCycleChanged),
    StepChanged(StepChanged),
}

impl Event for QuoteEvent {
    fn event_type(&self) -> &'static str {
        match self {
            QuoteEvent::RoleSelected(_) => "quote.role.selected",
            QuoteEvent::DeploymentTypeChanged(_) => "quote.deployment_type.changed",
            QuoteEvent::ProductSelected(_) => "quote.product.selected",
            QuoteEvent::ProductUpdated(_) => "quote.product.updated",
            QuoteEvent::ProductRemoved(_) => "quote.product.removed",
            QuoteEvent::BillingCycleChanged(_) => "quote.billing_cycle.changed",
            QuoteEvent::StepChanged(_) => "quote.step.changed",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}

impl Aggregate for QuoteSession {
    type Command = QuoteCommand;
    type Event = QuoteEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            QuoteEvent::RoleSelected(e) => {
                self.selections.set_user_type(e.user_type);
            }
            QuoteEvent::DeploymentTypeChanged(e) => {
                self.selections.set_deployment_type(e.deployment_type);
            }
            QuoteEvent::ProductSelected(e) => {
                self.selections.select_product(e.product.clone(), e.mode);
            }
            QuoteEvent::ProductUpdated(e) => {
                if let Err(err) = self.selections.update_product(e.index, e.update) {
                    tracing::warn!(
                        session_id = %self.id,
                        error = %err,
                        "update for missing line ignored"
                    );
                }
            }
            QuoteEvent::ProductRemoved(e) => {
                if let Err(err) = self.selections.remove_product(e.index) {
                    tracing::warn!(
                        session_id = %self.id,
                        error = %err,
                        "removal of missing line ignored"
                    );
                }
            }
            QuoteEvent::BillingCycleChanged(e) => {
                self.selections.set_billing_cycle(e.cycle);
            }
            QuoteEvent::StepChanged(e) => {
                self.step = e.to;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let events = match command {
            QuoteCommand::SelectRole(cmd) => self.handle_select_role(cmd),
            QuoteCommand::SelectDeploymentType(cmd) => self.handle_select_deployment_type(cmd),
            QuoteCommand::SelectProduct(cmd) => self.handle_select_product(cmd)?,
            QuoteCommand::RemoveProduct(cmd) => self.handle_remove_product(cmd)?,
            QuoteCommand::UpdateLicenseType(cmd) => self.handle_update_license_type(cmd)?,
            QuoteCommand::UpdateUserCount(cmd) => self.handle_update_user_count(cmd)?,
            QuoteCommand::SetBillingCycle(cmd) => self.handle_set_billing_cycle(cmd),
            QuoteCommand::GoBack => self.handle_go_back(),
            QuoteCommand::AddAnotherProduct => {
                self.move_to(WizardStep::Products).into_iter().collect()
            }
        };

        tracing::debug!(
            session_id = %self.id,
            command = command.command_type(),
            events = events.len(),
            "command decided"
        );

        Ok(events)
    }
}

impl QuoteSession {
    /// Step transition event, or nothing if already there.
    fn move_to(&self, to: WizardStep) -> Option<QuoteEvent> {
        (self.step != to).then_some(QuoteEvent::StepChanged(StepChanged {
            from: self.step,
            to,
        }))
    }

    fn handle_select_role(&self, cmd: &SelectRole) -> Vec<QuoteEvent> {
        let mut events = vec![QuoteEvent::RoleSelected(RoleSelected {
            user_type: cmd.user_type,
        })];
        events.extend(self.move_to(WizardStep::Products));
        events
    }

    fn handle_select_deployment_type(&self, cmd: &SelectDeploymentType) -> Vec<QuoteEvent> {
        if self.selections.deployment_type == cmd.deployment_type {
            return Vec::new();
        }
        vec![QuoteEvent::DeploymentTypeChanged(DeploymentTypeChanged {
            deployment_type: cmd.deployment_type,
        })]
    }

    fn handle_select_product(&self, cmd: &SelectProduct) -> Result<Vec<QuoteEvent>, DomainError> {
        let product = self.catalog.find(&cmd.product_id).ok_or_else(|| {
            DomainError::validation(format!("unknown product '{}'", cmd.product_id))
        })?;

        let mut events = Vec::with_capacity(2);
        let already_listed =
            self.mode == SelectionMode::Accumulate && self.selections.is_selected(&cmd.product_id);
        if !already_listed {
            events.push(QuoteEvent::ProductSelected(ProductSelected {
                product: product.clone(),
                mode: self.mode,
            }));
        }
        events.extend(self.move_to(WizardStep::Configure));
        Ok(events)
    }

    fn handle_remove_product(&self, cmd: &RemoveProduct) -> Result<Vec<QuoteEvent>, DomainError> {
        let line = self.selections.product(cmd.index)?;
        Ok(vec![QuoteEvent::ProductRemoved(ProductRemoved {
            index: cmd.index,
            product_id: line.product().id_typed().clone(),
        })])
    }

    fn handle_update_license_type(
        &self,
        cmd: &UpdateLicenseType,
    ) -> Result<Vec<QuoteEvent>, DomainError> {
        self.selections.product(cmd.index)?;
        Ok(vec![QuoteEvent::ProductUpdated(ProductUpdated {
            index: cmd.index,
            update: ProductUpdate::license_type(cmd.license_type),
        })])
    }

    fn handle_update_user_count(
        &self,
        cmd: &UpdateUserCount,
    ) -> Result<Vec<QuoteEvent>, DomainError> {
        self.selections.product(cmd.index)?;
        let seats: SeatCount = parse_seat_count(&cmd.raw);
        Ok(vec![QuoteEvent::ProductUpdated(ProductUpdated {
            index: cmd.index,
            update: ProductUpdate::user_count(seats),
        })])
    }

    fn handle_set_billing_cycle(&self, cmd: &SetBillingCycle) -> Vec<QuoteEvent> {
        if self.selections.billing_cycle == cmd.cycle {
            return Vec::new();
        }
        vec![QuoteEvent::BillingCycleChanged(BillingCycleChanged { cycle: cmd.cycle })]
    }

    fn handle_go_back(&self) -> Vec<QuoteEvent> {
        self.step
            .previous()
            .and_then(|to| self.move_to(to))
            .into_iter()
            .collect()
    }
}
