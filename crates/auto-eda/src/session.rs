//! Per-user dashboard session.
//!
//! A session owns the uploaded table and the user's control state. Every
//! interaction mutates that state and the next [`Session::render`] rebuilds
//! the plan from it; nothing derived is cached between passes.

use crate::config::EdaConfig;
use crate::error::{EdaError, Result};
use crate::ingest::{is_csv_name, read_csv};
use crate::render::{RenderPlan, render};
use crate::types::{CleaningOp, Picker, SelectionState, Table, ToggleState};
use tracing::{info, warn};

/// State of one user's dashboard.
#[derive(Debug, Clone, Default)]
pub struct Session {
    table: Option<Table>,
    toggles: ToggleState,
    selection: SelectionState,
    config: EdaConfig,
}

static_assertions::assert_impl_all!(Session: Send);

impl Session {
    /// Start a session with a validated config.
    ///
    /// # Errors
    ///
    /// [`EdaError::InvalidConfig`] when `config` fails validation.
    pub fn new(config: EdaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Ingest an uploaded CSV and render the dashboard for it.
    ///
    /// Only `.csv` names are accepted. A successful upload replaces the
    /// current table and resets the column pickers. A failed upload leaves
    /// the session awaiting upload and returns the failure plan; it is not
    /// an error.
    pub fn upload(&mut self, bytes: &[u8], source_name: &str) -> Result<RenderPlan> {
        let loaded = if is_csv_name(source_name) {
            read_csv(bytes, source_name, &self.config)
        } else {
            Err(EdaError::UnsupportedFile(source_name.to_string()))
        };

        match loaded {
            Ok(table) => {
                info!("Session table replaced by '{}'", source_name);
                self.table = Some(table);
                self.selection = SelectionState::new();
                self.render()
            }
            Err(err) if err.is_ingestion_failure() => {
                warn!("Upload of '{}' rejected: {}", source_name, err);
                self.table = None;
                self.selection = SelectionState::new();
                Ok(RenderPlan::ingestion_failed(&err))
            }
            Err(err) => Err(err),
        }
    }

    /// Enable or disable a cleaning operation.
    pub fn set_toggle(&mut self, op: CleaningOp, enabled: bool) {
        self.toggles.set(op, enabled);
    }

    /// Set or clear the column shown by a picker.
    ///
    /// Unknown or ineligible columns are accepted here; the render pass
    /// falls back to the picker's first option for them.
    pub fn select(&mut self, picker: Picker, column: Option<String>) {
        self.selection.select(picker, column);
    }

    /// Drop the uploaded table and every control back to its default.
    pub fn clear(&mut self) {
        self.table = None;
        self.toggles = ToggleState::new();
        self.selection = SelectionState::new();
    }

    /// Build the dashboard for the current state.
    pub fn render(&self) -> Result<RenderPlan> {
        match &self.table {
            Some(table) => render(table, &self.toggles, &self.selection, &self.config),
            None => Ok(RenderPlan::awaiting_upload()),
        }
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    /// The uploaded table, or [`EdaError::NoDataLoaded`].
    pub fn require_table(&self) -> Result<&Table> {
        self.table.as_ref().ok_or(EdaError::NoDataLoaded)
    }

    pub fn toggles(&self) -> &ToggleState {
        &self.toggles
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn config(&self) -> &EdaConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{AWAITING_UPLOAD, SectionBody, titles};

    const CSV: &[u8] = b"a,b,c\n1,2,x\n,4,y\n3,6,\n";

    #[test]
    fn test_new_session_awaits_upload() {
        let session = Session::default();
        let plan = session.render().unwrap();
        assert!(!plan.has_table());
        assert!(matches!(session.require_table(), Err(EdaError::NoDataLoaded)));
    }

    #[test]
    fn test_upload_renders_dashboard() {
        let mut session = Session::default();
        let plan = session.upload(CSV, "data.csv").unwrap();
        assert!(plan.has_table());
        assert_eq!(session.require_table().unwrap().height(), 3);
    }

    #[test]
    fn test_failed_upload_keeps_awaiting() {
        let mut session = Session::default();
        session.upload(CSV, "data.csv").unwrap();
        session.select(Picker::Distribution, Some("b".to_string()));

        let plan = session.upload(b"   ", "empty.csv").unwrap();
        assert!(!plan.has_table());
        assert!(session.table().is_none());
        assert_eq!(session.selection(), &SelectionState::new());
        assert!(matches!(
            &plan.sections[1].body,
            SectionBody::Message { text, .. } if text == AWAITING_UPLOAD
        ));
    }

    #[test]
    fn test_upload_rejects_non_csv_name() {
        let mut session = Session::default();
        session.upload(CSV, "data.csv").unwrap();

        let plan = session.upload(CSV, "report.xlsx").unwrap();
        assert!(!plan.has_table());
        assert!(session.table().is_none());
        assert!(matches!(
            &plan.sections[0].body,
            SectionBody::Message { text, .. } if text.contains("only .csv files are accepted")
        ));

        // extension check ignores case
        assert!(session.upload(CSV, "DATA.CSV").unwrap().has_table());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = EdaConfig {
            pairplot_sample_cap: 1,
            ..EdaConfig::default()
        };
        let err = Session::new(config).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");

        assert!(Session::new(EdaConfig::default()).is_ok());
    }

    #[test]
    fn test_upload_resets_selection() {
        let mut session = Session::default();
        session.upload(CSV, "data.csv").unwrap();
        session.select(Picker::Outlier, Some("b".to_string()));
        session.upload(CSV, "again.csv").unwrap();
        assert_eq!(session.selection().get(Picker::Outlier), None);
    }

    #[test]
    fn test_toggles_follow_enable_order() {
        let mut session = Session::default();
        session.upload(CSV, "data.csv").unwrap();
        session.set_toggle(CleaningOp::ImputeMean, true);
        session.set_toggle(CleaningOp::DropMissing, true);

        let plan = session.render().unwrap();
        let Some(SectionBody::Cleaning(applied)) =
            plan.section(titles::CLEANING).map(|s| &s.body)
        else {
            panic!("missing cleaning section");
        };
        assert_eq!(applied[0].op, CleaningOp::ImputeMean);
        assert_eq!(applied[1].op, CleaningOp::DropMissing);
    }

    #[test]
    fn test_selection_is_used_by_render() {
        let mut session = Session::default();
        session.upload(CSV, "data.csv").unwrap();
        session.select(Picker::Distribution, Some("b".to_string()));

        let plan = session.render().unwrap();
        let Some(SectionBody::Distribution(outcome)) =
            plan.section(titles::DISTRIBUTION).map(|s| &s.body)
        else {
            panic!("missing distribution section");
        };
        assert_eq!(outcome.chart().unwrap().column, "b");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut session = Session::default();
        session.upload(CSV, "data.csv").unwrap();
        session.set_toggle(CleaningOp::DropMissing, true);
        session.clear();

        assert!(session.table().is_none());
        assert!(session.toggles().ops().is_empty());
    }
}
