//! Contracts for the services the screens will eventually talk to.

mod models;
mod simulated;

pub use models::{
    AccountRole, Credentials, ExtractedUnit, FacultyInsights, Session, Severity, SignupForm,
    StudyContext,
};
pub use simulated::{
    SimulatedAnalytics, SimulatedAssistant, SimulatedAuth, SimulatedIngestion,
};

use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::Unit;
use crate::config::Config;
use crate::error::AppError;
use crate::state::upload::FileHandle;

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<Session, AppError>;
    async fn signup(&self, form: &SignupForm) -> Result<Session, AppError>;
}

#[async_trait]
pub trait IngestionService: Send + Sync {
    async fn extract_units(&self, file: &FileHandle) -> Result<Vec<ExtractedUnit>, AppError>;
}

#[async_trait]
pub trait AssistantService: Send + Sync {
    async fn answer(&self, question: &str, context: &StudyContext) -> Result<String, AppError>;
    async fn generate_questions(&self, unit: Option<&Unit>) -> Result<String, AppError>;
    async fn regenerate_questions(&self, unit_id: Option<&str>) -> Result<(), AppError>;
}

#[async_trait]
pub trait AnalyticsService: Send + Sync {
    async fn insights(&self) -> Result<FacultyInsights, AppError>;
}

/// Which implementation backs the services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Simulated,
}

/// One handle per collaborator, cheap to clone into tasks
#[derive(Clone)]
pub struct Backend {
    pub auth: Arc<dyn AuthService>,
    pub ingestion: Arc<dyn IngestionService>,
    pub assistant: Arc<dyn AssistantService>,
    pub analytics: Arc<dyn AnalyticsService>,
}

pub fn create_backend(kind: BackendKind, config: &Config) -> Backend {
    match kind {
        BackendKind::Simulated => {
            let delays = config.scaled_delays();
            Backend {
                auth: Arc::new(SimulatedAuth::new(delays.login)),
                ingestion: Arc::new(SimulatedIngestion::new(delays.processing)),
                assistant: Arc::new(SimulatedAssistant::new(delays.chat, delays.regenerate)),
                analytics: Arc::new(SimulatedAnalytics::new(delays.insights)),
            }
        }
    }
}
