//! Interactive session loop.
//!
//! One line of input is turned into at most one command, which runs through
//! the same pipeline every time:
//!
//! ```text
//! line
//!   ↓
//! 1. Parse against the current step (input::parse_line)
//!   ↓
//! 2. Decide events (QuoteSession::handle, pure)
//!   ↓
//! 3. Apply events to the session (execute)
//!   ↓
//! 4. Append events to the session journal
//!   ↓
//! 5. Re-render the current screen from scratch
//! ```
//!
//! Rejected commands leave the session and journal untouched and are shown
//! as a one-line notice.

use std::io::{BufRead, Write};
use std::sync::Arc;

use serde::Serialize;

use quotekit_catalog::Catalog;
use quotekit_core::{DomainResult, SessionId};
use quotekit_events::{Command, SessionJournal, execute};
use quotekit_quote::{
    Estimate, QuoteCommand, QuoteEvent, QuoteSession, SelectionMode, Selections, WizardStep,
};

use crate::input::{self, Intent, StubAction};
use crate::render;

const PROMPT: &str = "> ";

/// Exported view of the session: step, selections and the derived estimate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    pub session_id: SessionId,
    pub step: WizardStep,
    pub selections: &'a Selections,
    pub estimate: Estimate,
}

/// Owns the quote session and its journal for one console run.
#[derive(Debug)]
pub struct ConsoleApp {
    session: QuoteSession,
    journal: SessionJournal<QuoteEvent>,
}

impl ConsoleApp {
    pub fn new(id: SessionId, catalog: Arc<Catalog>, mode: SelectionMode) -> Self {
        Self {
            session: QuoteSession::new(id, catalog, mode),
            journal: SessionJournal::new(id),
        }
    }

    pub fn session(&self) -> &QuoteSession {
        &self.session
    }

    pub fn journal(&self) -> &SessionJournal<QuoteEvent> {
        &self.journal
    }

    /// Execute one command and journal what it decided.
    ///
    /// Returns the number of events recorded.
    pub fn dispatch(&mut self, command: &QuoteCommand) -> DomainResult<usize> {
        match execute(&mut self.session, command) {
            Ok(events) => Ok(self.journal.append(events).len()),
            Err(err) => {
                tracing::warn!(
                    session_id = %self.journal.session_id(),
                    command = command.command_type(),
                    error = %err,
                    "command rejected"
                );
                Err(err)
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let selections = self.session.selections();
        Snapshot {
            session_id: self.journal.session_id(),
            step: self.session.step(),
            selections,
            estimate: Estimate::from_selections(selections),
        }
    }

    /// Pretty-printed JSON of [`ConsoleApp::snapshot`].
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
    }

    /// One line per journaled event, payload as compact JSON.
    pub fn history(&self) -> serde_json::Result<String> {
        if self.journal.is_empty() {
            return Ok("No events recorded yet.\n".to_string());
        }
        let mut out = String::new();
        for entry in self.journal.entries() {
            let payload = serde_json::to_string(entry.payload())?;
            out.push_str(&format!(
                "#{:<3} {:<30} {payload}\n",
                entry.sequence_number(),
                entry.event_type()
            ));
        }
        Ok(out)
    }

    fn acknowledge(&self, action: StubAction) -> String {
        tracing::info!(
            session_id = %self.journal.session_id(),
            action = action.label(),
            "stub action requested"
        );
        format!("{} is not available yet; your quote is unchanged.\n", action.label())
    }

    /// Drive the wizard until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, reader: R, mut output: W) -> anyhow::Result<()> {
        write!(output, "{}", render::screen(&self.session))?;
        write!(output, "{PROMPT}")?;
        output.flush()?;

        for line in reader.lines() {
            let line = line?;
            let parsed = input::parse_line(&line, self.session.step(), self.session.catalog());

            let redraw = match parsed {
                Ok(Intent::Quit) => {
                    writeln!(output, "Goodbye.")?;
                    return Ok(());
                }
                Ok(Intent::Command(command)) => match self.dispatch(&command) {
                    Ok(_) => true,
                    Err(err) => {
                        writeln!(output, "! {err}")?;
                        false
                    }
                },
                Ok(Intent::Stub(action)) => {
                    write!(output, "{}", self.acknowledge(action))?;
                    false
                }
                Ok(Intent::ShowSnapshot) => {
                    writeln!(output, "{}", self.snapshot_json()?)?;
                    false
                }
                Ok(Intent::ShowHistory) => {
                    write!(output, "{}", self.history()?)?;
                    false
                }
                Ok(Intent::Help) => {
                    write!(output, "{}", input::help_text(self.session.step()))?;
                    false
                }
                Ok(Intent::Redraw) => true,
                Err(err) => {
                    writeln!(output, "! {err}")?;
                    false
                }
            };

            if redraw {
                writeln!(output)?;
                write!(output, "{}", render::screen(&self.session))?;
            }
            write!(output, "{PROMPT}")?;
            output.flush()?;
        }

        writeln!(output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotekit_catalog::ProductId;
    use quotekit_core::{AggregateRoot, DomainError};
    use quotekit_quote::{RemoveProduct, SelectProduct, SelectRole, UserType};
    use uuid::Uuid;

    fn app() -> ConsoleApp {
        ConsoleApp::new(
            SessionId::from_uuid(Uuid::nil()),
            Arc::new(Catalog::standard()),
            SelectionMode::Replace,
        )
    }

    #[test]
    fn dispatch_journals_every_decided_event() {
        let mut app = app();
        let recorded = app
            .dispatch(&QuoteCommand::SelectRole(SelectRole {
                user_type: UserType::GeneralPractitioner,
            }))
            .unwrap();

        assert_eq!(recorded, 2);
        assert_eq!(app.journal().len(), 2);
        assert_eq!(app.journal().current_sequence(), app.session().version());
        assert_eq!(app.journal().entries()[0].event_type(), "quote.role.selected");
    }

    #[test]
    fn rejected_command_records_nothing() {
        let mut app = app();
        let err = app
            .dispatch(&QuoteCommand::RemoveProduct(RemoveProduct { index: 0 }))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert!(app.journal().is_empty());
        assert_eq!(app.session().version(), 0);
    }

    #[test]
    fn snapshot_exports_selections_and_estimate() {
        let mut app = app();
        app.dispatch(&QuoteCommand::SelectRole(SelectRole {
            user_type: UserType::Specialist,
        }))
        .unwrap();
        app.dispatch(&QuoteCommand::SelectProduct(SelectProduct {
            product_id: ProductId::new("specialist").unwrap(),
        }))
        .unwrap();

        let json: serde_json::Value = serde_json::from_str(&app.snapshot_json().unwrap()).unwrap();
        assert_eq!(json["step"], "configure");
        assert_eq!(json["selections"]["userType"], "Specialist");
        assert_eq!(json["selections"]["selectedProducts"][0]["id"], "specialist");
        assert_eq!(json["selections"]["selectedProducts"][0]["userCount"], 14);
        // Money is exported in cents.
        assert_eq!(json["estimate"]["total"], 126_000);
    }

    #[test]
    fn history_lists_events_in_order() {
        let mut app = app();
        assert!(app.history().unwrap().starts_with("No events"));

        app.dispatch(&QuoteCommand::SelectRole(SelectRole {
            user_type: UserType::AlliedHealthProfessional,
        }))
        .unwrap();
        let history = app.history().unwrap();
        let lines: Vec<&str> = history.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("#1"));
        assert!(lines[0].contains("AlliedHealthProfessional"));
        assert!(lines[1].contains("quote.step.changed"));
        // Every line ends in a well-formed JSON payload.
        for line in lines {
            let start = line.find('{').unwrap();
            serde_json::from_str::<serde_json::Value>(&line[start..]).unwrap();
        }
    }

    #[test]
    fn stub_actions_leave_state_alone() {
        let app = app();
        let ack = app.acknowledge(StubAction::DownloadPdf);
        assert!(ack.starts_with("Download PDF"));
        assert_eq!(app.session().version(), 0);
    }
}
