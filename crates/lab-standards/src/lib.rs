#![deny(unsafe_code)]

pub mod doctor;
pub mod error;
pub mod loaders;
pub mod manifest;
pub mod registry;
pub mod templates;

pub use crate::doctor::{DoctorReport, run_doctor};
pub use crate::error::StandardsError;
pub use crate::loaders::{
    DemographicRule, default_standards_root, load_default_demographic_rules, load_default_panels,
    load_demographic_rules, load_panels,
};
pub use crate::registry::{StandardsRegistry, VerifySummary};
pub use crate::templates::{TemplateIssue, TemplateIssueSeverity, TestTemplate};
