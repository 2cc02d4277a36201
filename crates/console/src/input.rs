//! Parsing of typed user input into wizard intents.
//!
//! Numbers shown on screen are 1-based; everything handed to the session is
//! 0-based. Keywords are case-insensitive. What a line means depends on the
//! screen it was typed on.

use thiserror::Error;

use quotekit_catalog::Catalog;
use quotekit_pricing::BillingCycle;
use quotekit_quote::{
    DeploymentType, LicenseType, QuoteCommand, RemoveProduct, SelectDeploymentType, SelectProduct,
    SelectRole, SetBillingCycle, UpdateLicenseType, UpdateUserCount, UserType, WizardStep,
};

/// Buttons that exist on the configure screen but have no behaviour yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubAction {
    ContactSales,
    DownloadPdf,
    AddFeature,
}

impl StubAction {
    pub fn label(&self) -> &'static str {
        match self {
            StubAction::ContactSales => "Contact sales",
            StubAction::DownloadPdf => "Download PDF",
            StubAction::AddFeature => "Add a Feature",
        }
    }
}

/// What one line of input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Command(QuoteCommand),
    Stub(StubAction),
    ShowSnapshot,
    ShowHistory,
    Help,
    Redraw,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unrecognised input '{0}' (type 'help' for options)")]
    Unrecognised(String),

    #[error("'{keyword}' is not available on the {screen} screen")]
    Unavailable {
        keyword: String,
        screen: &'static str,
    },

    #[error("expected a number from 1 to {max}, got '{got}'")]
    OutOfRange { got: String, max: usize },

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    BadValue(String),
}

/// Interpret `line` as typed on `step`.
pub fn parse_line(line: &str, step: WizardStep, catalog: &Catalog) -> Result<Intent, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Intent::Redraw);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };
    let keyword_lower = keyword.to_ascii_lowercase();

    match keyword_lower.as_str() {
        "quit" | "exit" | "q" => return Ok(Intent::Quit),
        "help" | "?" => return Ok(Intent::Help),
        "json" | "snapshot" => return Ok(Intent::ShowSnapshot),
        "history" => return Ok(Intent::ShowHistory),
        "back" | "b" => return Ok(Intent::Command(QuoteCommand::GoBack)),
        _ => {}
    }

    match step {
        WizardStep::UseCase => parse_use_case(line),
        WizardStep::Products => parse_products(line, catalog),
        WizardStep::Configure => parse_configure(&keyword_lower, rest, line),
    }
}

fn parse_use_case(line: &str) -> Result<Intent, InputError> {
    let roles = UserType::all();
    let user_type = match pick_number(line, roles.len()) {
        Ok(index) => roles[index],
        Err(err) => roles
            .iter()
            .copied()
            .find(|role| role.label().eq_ignore_ascii_case(line))
            .ok_or(err)?,
    };
    Ok(Intent::Command(QuoteCommand::SelectRole(SelectRole { user_type })))
}

fn parse_products(line: &str, catalog: &Catalog) -> Result<Intent, InputError> {
    if let Ok(deployment_type) = line.parse::<DeploymentType>() {
        return Ok(Intent::Command(QuoteCommand::SelectDeploymentType(
            SelectDeploymentType { deployment_type },
        )));
    }

    let index = pick_number(line, catalog.len())?;
    let product = catalog
        .nth(index)
        .ok_or_else(|| InputError::Unrecognised(line.to_string()))?;
    Ok(Intent::Command(QuoteCommand::SelectProduct(SelectProduct {
        product_id: product.id_typed().clone(),
    })))
}

fn parse_configure(keyword: &str, rest: &str, line: &str) -> Result<Intent, InputError> {
    let command = match keyword {
        "add" => QuoteCommand::AddAnotherProduct,
        "contact" => return Ok(Intent::Stub(StubAction::ContactSales)),
        "pdf" | "download" => return Ok(Intent::Stub(StubAction::DownloadPdf)),
        "feature" => return Ok(Intent::Stub(StubAction::AddFeature)),
        "monthly" | "annual" | "annually" => {
            let cycle = keyword
                .parse::<BillingCycle>()
                .map_err(|e| InputError::BadValue(e.to_string()))?;
            QuoteCommand::SetBillingCycle(SetBillingCycle { cycle })
        }
        "remove" | "rm" => {
            let index = line_index(rest, "remove <line>")?;
            QuoteCommand::RemoveProduct(RemoveProduct { index })
        }
        "license" => {
            const USAGE: &str = "license <line> <full|part|ahp>";
            let (line_no, value) = rest
                .split_once(char::is_whitespace)
                .ok_or(InputError::Usage(USAGE))?;
            let index = line_index(line_no, USAGE)?;
            let license_type = value
                .parse::<LicenseType>()
                .map_err(|e| InputError::BadValue(e.to_string()))?;
            QuoteCommand::UpdateLicenseType(UpdateLicenseType {
                index,
                license_type,
            })
        }
        "users" | "seats" => {
            const USAGE: &str = "users <line> <count>";
            if rest.is_empty() {
                return Err(InputError::Usage(USAGE));
            }
            // The count is passed through raw; anything non-numeric becomes 0.
            let (line_no, raw) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let index = line_index(line_no, USAGE)?;
            QuoteCommand::UpdateUserCount(UpdateUserCount {
                index,
                raw: raw.trim().to_string(),
            })
        }
        "cloud" | "self-host" | "selfhost" => {
            return Err(InputError::Unavailable {
                keyword: keyword.to_string(),
                screen: WizardStep::Products.label(),
            });
        }
        _ => return Err(InputError::Unrecognised(line.to_string())),
    };
    Ok(Intent::Command(command))
}

/// 1-based menu number in `1..=max`, returned 0-based.
fn pick_number(raw: &str, max: usize) -> Result<usize, InputError> {
    let out_of_range = || InputError::OutOfRange {
        got: raw.to_string(),
        max,
    };
    let n: usize = raw.trim().parse().map_err(|_| out_of_range())?;
    if n == 0 || n > max {
        return Err(out_of_range());
    }
    Ok(n - 1)
}

/// 1-based line number of a configured product, returned 0-based.
///
/// No upper bound here: the session reports lines that do not exist.
fn line_index(raw: &str, usage: &'static str) -> Result<usize, InputError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(InputError::Usage(usage)),
    }
}

/// Input reference for the given screen.
pub fn help_text(step: WizardStep) -> String {
    let mut text = String::from("Commands:\n");
    match step {
        WizardStep::UseCase => {
            text.push_str("  <n>                  pick a use case\n");
        }
        WizardStep::Products => {
            text.push_str("  <n>                  pick a product\n");
            text.push_str("  cloud | self-host    choose deployment\n");
        }
        WizardStep::Configure => {
            text.push_str("  license <line> <full|part|ahp>\n");
            text.push_str("  users <line> <count>\n");
            text.push_str("  remove <line>\n");
            text.push_str("  add                  add another product\n");
            text.push_str("  monthly | annual     billing cycle\n");
            text.push_str("  contact | pdf | feature\n");
        }
    }
    text.push_str("  back  json  history  help  quit\n");
    text
}
