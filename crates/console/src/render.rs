//! Text rendering of the wizard screens.
//!
//! Every function here is a pure projection of session state into a string;
//! nothing is cached between frames.

use std::fmt::Write as _;

use quotekit_catalog::Catalog;
use quotekit_pricing::BillingCycle;
use quotekit_quote::{
    DeploymentType, Estimate, QuoteSession, Selections, StepState, UserType, WizardStep,
};

const RULE: &str = "----------------------------------------";

fn radio(selected: bool) -> &'static str {
    if selected { "(•)" } else { "( )" }
}

/// `✓ Use Case ━━ (2) Products ── (3) Details`
pub fn progress(current: WizardStep) -> String {
    let mut out = String::new();
    for marker in current.progress() {
        let badge = match marker.state {
            StepState::Complete => "✓".to_string(),
            StepState::Current => format!("[{}]", marker.step.number()),
            StepState::Upcoming => format!("({})", marker.step.number()),
        };
        let _ = write!(out, "{badge} {}", marker.step.label());
        if marker.step != WizardStep::Configure {
            let connector = if current.connector_filled_after(marker.step) {
                "━━"
            } else {
                "──"
            };
            let _ = write!(out, " {connector} ");
        }
    }
    out
}

/// Full frame for the session's current step.
pub fn screen(session: &QuoteSession) -> String {
    let step = session.step();
    let mut out = String::new();
    let _ = writeln!(out, "{}", progress(step));
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}", step.title());
    let _ = writeln!(out);

    let body = match step {
        WizardStep::UseCase => use_case(session.selections()),
        WizardStep::Products => products(session.catalog(), session.selections()),
        WizardStep::Configure => configure(session.selections()),
    };
    out.push_str(&body);
    out
}

fn use_case(selections: &Selections) -> String {
    let mut out = String::new();
    for (n, role) in UserType::all().iter().enumerate() {
        let picked = selections.user_type == Some(*role);
        let _ = writeln!(out, "  {} {}. {}", radio(picked), n + 1, role.label());
    }
    out
}

fn products(catalog: &Catalog, selections: &Selections) -> String {
    let mut out = String::new();
    out.push_str("Deployment: ");
    for (i, deployment) in DeploymentType::all().iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        let picked = selections.deployment_type == *deployment;
        let _ = write!(out, "{} {}", radio(picked), deployment.label());
    }
    out.push_str("\n\n");

    let mut n = 0;
    for category in catalog.categories() {
        let _ = writeln!(out, "{}", category.name());
        for product in category.products() {
            n += 1;
            let picked = selections.is_selected(product.id_typed());
            let _ = writeln!(out, "  {} {n}. {}", radio(picked), product.name());
        }
    }
    out
}

fn configure(selections: &Selections) -> String {
    let estimate = Estimate::from_selections(selections);
    let mut out = String::new();

    if estimate.is_empty() {
        out.push_str("No products selected. Type 'add' to choose one.\n");
    }
    for (n, (line, priced)) in selections
        .selected_products
        .iter()
        .zip(&estimate.lines)
        .enumerate()
    {
        let _ = writeln!(out, "{}. {}", n + 1, line.name());
        let _ = writeln!(out, "   License type: {}", line.license_type.label());
        let _ = writeln!(out, "   Users:        {}", line.user_count);
        let _ = writeln!(out, "   {}", estimate.format_amount(priced.amount));
        let _ = writeln!(out, "   {}", estimate.per_user_caption());
    }

    out.push('\n');
    out.push_str(&estimate_panel(&estimate));
    out.push_str("\n[add] Add another product   [feature] Add a Feature\n");
    out.push_str("[contact] Contact sales      [pdf] Download PDF\n");
    out
}

/// Billing toggle plus the total and its caption.
pub fn estimate_panel(estimate: &Estimate) -> String {
    let mut out = String::new();
    out.push_str("Billing: ");
    for (i, cycle) in BillingCycle::all().iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        let _ = write!(out, "{} {}", radio(estimate.cycle == *cycle), cycle.label());
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Total: {}", estimate.format_total());
    let _ = writeln!(out, "{}", estimate.total_caption());
    out
}

/// Numbered product list for `quotekit catalog`.
pub fn catalog_listing(catalog: &Catalog) -> String {
    let mut out = String::new();
    for category in catalog.categories() {
        let _ = writeln!(out, "{}", category.name());
        for product in category.products() {
            let _ = writeln!(out, "  {:<16} {}", product.id_typed().as_str(), product.name());
        }
    }
    out
}
