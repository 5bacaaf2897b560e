//! Application status and the rules gating "apply"

use crate::error::{PlacementError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn is_decided(self) -> bool {
        self != ApplicationStatus::Pending
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationStatus::Pending => write!(f, "pending"),
            ApplicationStatus::Accepted => write!(f, "accepted"),
            ApplicationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A student's application to one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub company_id: String,
    pub status: ApplicationStatus,
}

/// Whether the apply action is offered for a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyAvailability {
    Available,
    ProfileNotSubmitted,
    AlreadyApplied(ApplicationStatus),
}

impl ApplyAvailability {
    pub fn is_enabled(self) -> bool {
        self == ApplyAvailability::Available
    }
}

pub fn apply_availability(profile_submitted: bool, existing: Option<ApplicationStatus>) -> ApplyAvailability {
    match existing {
        Some(status) => ApplyAvailability::AlreadyApplied(status),
        None if !profile_submitted => ApplyAvailability::ProfileNotSubmitted,
        None => ApplyAvailability::Available,
    }
}

/// Validate an apply request, returning the new pending application.
pub fn check_can_apply(
    company_id: &str,
    profile_submitted: bool,
    existing: Option<ApplicationStatus>,
) -> Result<Application> {
    match apply_availability(profile_submitted, existing) {
        ApplyAvailability::Available => Ok(Application {
            company_id: company_id.to_string(),
            status: ApplicationStatus::Pending,
        }),
        ApplyAvailability::ProfileNotSubmitted => Err(PlacementError::Application(
            "Please submit your profile before applying".to_string(),
        )),
        ApplyAvailability::AlreadyApplied(status) => Err(PlacementError::Application(format!(
            "You have already applied to this company (status: {})",
            status
        ))),
    }
}

impl Application {
    /// Record the company's decision. Only pending applications can be reviewed.
    pub fn review(&mut self, decision: ApplicationStatus) -> Result<()> {
        if decision == ApplicationStatus::Pending {
            return Err(PlacementError::Application(
                "A review must accept or reject the application".to_string(),
            ));
        }
        if self.status.is_decided() {
            return Err(PlacementError::Application(format!(
                "Application to {} was already {}",
                self.company_id, self.status
            )));
        }
        self.status = decision;
        Ok(())
    }
}
