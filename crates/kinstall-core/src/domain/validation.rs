use crate::domain::{entities::Application, error::DomainError};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_application(app: &Application) -> Result<(), DomainError> {
        app.validate()
    }
}
