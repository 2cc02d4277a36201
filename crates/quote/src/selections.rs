use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use quotekit_catalog::{ProductDescriptor, ProductId};
use quotekit_core::{DomainError, DomainResult, Entity};
use quotekit_pricing::{BillingCycle, SeatCount};

/// License type given to a freshly selected product.
pub const DEFAULT_LICENSE_TYPE: LicenseType = LicenseType::FullTime;

/// Seat count given to a freshly selected product.
pub const DEFAULT_SEAT_COUNT: u32 = 14;

/// Failure to parse one of the selection enums from user text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseSelectionError {
    kind: &'static str,
    value: String,
}

impl ParseSelectionError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// The professional role a quote is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserType {
    #[serde(rename = "General Practitioner")]
    GeneralPractitioner,
    #[serde(rename = "Specialist")]
    Specialist,
    #[serde(rename = "Allied Health Professional")]
    AlliedHealthProfessional,
}

impl UserType {
    pub fn all() -> &'static [UserType] {
        &[
            UserType::GeneralPractitioner,
            UserType::Specialist,
            UserType::AlliedHealthProfessional,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserType::GeneralPractitioner => "General Practitioner",
            UserType::Specialist => "Specialist",
            UserType::AlliedHealthProfessional => "Allied Health Professional",
        }
    }
}

/// Where the customer runs the software.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeploymentType {
    #[default]
    #[serde(rename = "cloud")]
    Cloud,
    #[serde(rename = "selfHost")]
    SelfHost,
}

impl DeploymentType {
    pub fn all() -> &'static [DeploymentType] {
        &[DeploymentType::Cloud, DeploymentType::SelfHost]
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeploymentType::Cloud => "Cloud",
            DeploymentType::SelfHost => "Self Host",
        }
    }
}

impl FromStr for DeploymentType {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "cloud" => Ok(DeploymentType::Cloud),
            "selfhost" | "selfhosted" => Ok(DeploymentType::SelfHost),
            _ => Err(ParseSelectionError::new("deployment type", s)),
        }
    }
}

/// License classification carried on each selected product.
///
/// Not an input to the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseType {
    #[serde(rename = "Full Time")]
    FullTime,
    #[serde(rename = "Part Time")]
    PartTime,
    #[serde(rename = "AHP")]
    Ahp,
}

impl LicenseType {
    pub fn all() -> &'static [LicenseType] {
        &[LicenseType::FullTime, LicenseType::PartTime, LicenseType::Ahp]
    }

    pub fn label(&self) -> &'static str {
        match self {
            LicenseType::FullTime => "Full Time",
            LicenseType::PartTime => "Part Time",
            LicenseType::Ahp => "AHP",
        }
    }
}

impl FromStr for LicenseType {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "full" | "fulltime" => Ok(LicenseType::FullTime),
            "part" | "parttime" => Ok(LicenseType::PartTime),
            "ahp" => Ok(LicenseType::Ahp),
            _ => Err(ParseSelectionError::new("license type", s)),
        }
    }
}

/// What picking a product does to an existing selection list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// The list is replaced by the newly picked product (one product per quote).
    #[default]
    Replace,
    /// The product is appended, unless it is already in the list.
    Accumulate,
}

impl FromStr for SelectionMode {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" | "single" => Ok(SelectionMode::Replace),
            "accumulate" | "multi" => Ok(SelectionMode::Accumulate),
            _ => Err(ParseSelectionError::new("selection mode", s)),
        }
    }
}

/// A catalog product being configured in the quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedProduct {
    #[serde(flatten)]
    product: ProductDescriptor,
    pub license_type: LicenseType,
    pub user_count: SeatCount,
}

impl SelectedProduct {
    /// Seed a selection with the default license type and seat count.
    pub fn seeded(product: ProductDescriptor) -> Self {
        Self {
            product,
            license_type: DEFAULT_LICENSE_TYPE,
            user_count: SeatCount::new(DEFAULT_SEAT_COUNT),
        }
    }

    pub fn product(&self) -> &ProductDescriptor {
        &self.product
    }

    pub fn name(&self) -> &str {
        self.product.name()
    }
}

impl Entity for SelectedProduct {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        self.product.id()
    }
}

/// Partial edit of one selected product; `None` fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub license_type: Option<LicenseType>,
    pub user_count: Option<SeatCount>,
}

impl ProductUpdate {
    pub fn license_type(license_type: LicenseType) -> Self {
        Self {
            license_type: Some(license_type),
            user_count: None,
        }
    }

    pub fn user_count(user_count: SeatCount) -> Self {
        Self {
            license_type: None,
            user_count: Some(user_count),
        }
    }
}

/// Everything the user has chosen so far in one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selections {
    pub user_type: Option<UserType>,
    pub deployment_type: DeploymentType,
    pub selected_products: Vec<SelectedProduct>,
    pub billing_cycle: BillingCycle,
}

impl Selections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_user_type(&mut self, user_type: UserType) {
        self.user_type = Some(user_type);
    }

    pub fn set_deployment_type(&mut self, deployment_type: DeploymentType) {
        self.deployment_type = deployment_type;
    }

    pub fn set_billing_cycle(&mut self, cycle: BillingCycle) {
        self.billing_cycle = cycle;
    }

    pub fn is_selected(&self, id: &ProductId) -> bool {
        self.selected_products.iter().any(|p| p.id() == id)
    }

    pub fn product(&self, index: usize) -> DomainResult<&SelectedProduct> {
        self.selected_products
            .get(index)
            .ok_or_else(|| missing_line(index, self.selected_products.len()))
    }

    /// Add `product` with seeded defaults according to `mode`.
    ///
    /// Returns `false` when nothing changed (accumulating a product that is
    /// already in the list).
    pub fn select_product(&mut self, product: ProductDescriptor, mode: SelectionMode) -> bool {
        match mode {
            SelectionMode::Replace => {
                self.selected_products = vec![SelectedProduct::seeded(product)];
                true
            }
            SelectionMode::Accumulate => {
                if self.selected_products.iter().any(|p| p.same_identity_as(&product)) {
                    return false;
                }
                self.selected_products.push(SelectedProduct::seeded(product));
                true
            }
        }
    }

    /// Merge `update` into the line at `index`.
    pub fn update_product(
        &mut self,
        index: usize,
        update: ProductUpdate,
    ) -> DomainResult<&SelectedProduct> {
        let len = self.selected_products.len();
        let line = self
            .selected_products
            .get_mut(index)
            .ok_or_else(|| missing_line(index, len))?;
        if let Some(license_type) = update.license_type {
            line.license_type = license_type;
        }
        if let Some(user_count) = update.user_count {
            line.user_count = user_count;
        }
        Ok(line)
    }

    /// Remove the line at `index`; later lines shift down by one.
    pub fn remove_product(&mut self, index: usize) -> DomainResult<SelectedProduct> {
        if index >= self.selected_products.len() {
            return Err(missing_line(index, self.selected_products.len()));
        }
        Ok(self.selected_products.remove(index))
    }
}

fn missing_line(index: usize, len: usize) -> DomainError {
    // Reported 1-based, as lines are numbered on screen.
    DomainError::not_found(format!("no product on line {} ({len} selected)", index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotekit_catalog::Catalog;

    fn product(id: &str) -> ProductDescriptor {
        Catalog::standard()
            .find(&ProductId::new(id).unwrap())
            .cloned()
            .unwrap()
    }

    #[test]
    fn new_selections_use_session_defaults() {
        let s = Selections::new();
        assert_eq!(s.user_type, None);
        assert_eq!(s.deployment_type, DeploymentType::Cloud);
        assert!(s.selected_products.is_empty());
        assert_eq!(s.billing_cycle, BillingCycle::Monthly);
    }

    #[test]
    fn replace_mode_keeps_only_latest_product() {
        let mut s = Selections::new();
        assert!(s.select_product(product("gp-premier"), SelectionMode::Replace));
        assert!(s.select_product(product("sms"), SelectionMode::Replace));

        assert_eq!(s.selected_products.len(), 1);
        let line = &s.selected_products[0];
        assert_eq!(line.id().as_str(), "sms");
        assert_eq!(line.license_type, LicenseType::FullTime);
        assert_eq!(line.user_count, SeatCount::new(14));
    }

    #[test]
    fn accumulate_mode_appends_without_duplicates() {
        let mut s = Selections::new();
        assert!(s.select_product(product("gp-premier"), SelectionMode::Accumulate));
        assert!(s.select_product(product("sms"), SelectionMode::Accumulate));
        assert!(!s.select_product(product("gp-premier"), SelectionMode::Accumulate));

        let ids: Vec<&str> = s.selected_products.iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, vec!["gp-premier", "sms"]);
    }

    #[test]
    fn update_merges_only_given_fields() {
        let mut s = Selections::new();
        s.select_product(product("mobile"), SelectionMode::Replace);

        s.update_product(0, ProductUpdate::license_type(LicenseType::Ahp))
            .unwrap();
        assert_eq!(s.selected_products[0].license_type, LicenseType::Ahp);
        assert_eq!(s.selected_products[0].user_count, SeatCount::new(14));

        s.update_product(0, ProductUpdate::user_count(SeatCount::ZERO))
            .unwrap();
        assert_eq!(s.selected_products[0].license_type, LicenseType::Ahp);
        assert_eq!(s.selected_products[0].user_count, SeatCount::ZERO);
    }

    #[test]
    fn index_errors_leave_list_untouched() {
        let mut s = Selections::new();
        s.select_product(product("comms"), SelectionMode::Replace);
        let before = s.clone();

        assert!(matches!(
            s.update_product(1, ProductUpdate::license_type(LicenseType::PartTime)),
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(s.remove_product(5), Err(DomainError::NotFound(_))));
        assert_eq!(s, before);
    }

    #[test]
    fn remove_preserves_order_of_remaining_lines() {
        let mut s = Selections::new();
        for id in ["gp-premier", "mobile", "sms"] {
            s.select_product(product(id), SelectionMode::Accumulate);
        }
        let removed = s.remove_product(1).unwrap();
        assert_eq!(removed.id().as_str(), "mobile");

        let ids: Vec<&str> = s.selected_products.iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, vec!["gp-premier", "sms"]);

        s.remove_product(0).unwrap();
        s.remove_product(0).unwrap();
        assert!(s.selected_products.is_empty());
    }

    #[test]
    fn enums_parse_from_user_text() {
        assert_eq!("Self Host".parse::<DeploymentType>().unwrap(), DeploymentType::SelfHost);
        assert_eq!("self-host".parse::<DeploymentType>().unwrap(), DeploymentType::SelfHost);
        assert_eq!("part".parse::<LicenseType>().unwrap(), LicenseType::PartTime);
        assert_eq!("Full Time".parse::<LicenseType>().unwrap(), LicenseType::FullTime);
        assert_eq!("AHP".parse::<LicenseType>().unwrap(), LicenseType::Ahp);
        assert_eq!("multi".parse::<SelectionMode>().unwrap(), SelectionMode::Accumulate);

        let err = "contractor".parse::<LicenseType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown license type 'contractor'");
    }

    #[test]
    fn missing_line_errors_use_one_based_line_numbers() {
        let mut s = Selections::new();
        s.select_product(
            Catalog::standard().nth(0).cloned().unwrap(),
            SelectionMode::Replace,
        );
        let err = s.remove_product(2).unwrap_err();
        assert_eq!(err.to_string(), "not found: no product on line 3 (1 selected)");
        assert_eq!(s.selected_products.len(), 1);
    }

    #[test]
    fn snapshot_uses_camel_case_field_names() {
        let mut s = Selections::new();
        s.set_user_type(UserType::Specialist);
        s.set_deployment_type(DeploymentType::SelfHost);
        s.select_product(product("specialist"), SelectionMode::Replace);
        s.set_billing_cycle(BillingCycle::Annual);

        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "userType": "Specialist",
                "deploymentType": "selfHost",
                "selectedProducts": [{
                    "id": "specialist",
                    "name": "Specialist - Bp VIPnet",
                    "licenseType": "Full Time",
                    "userCount": 14
                }],
                "billingCycle": "annual"
            })
        );
    }
}
