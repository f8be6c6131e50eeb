//! Input validation for a staffing run.
//!
//! Checks structural integrity of municipalities, sites and workers
//! before any reservation happens. Detects:
//! - Duplicate municipality names, site identifiers and worker emails
//! - Municipality zones outside the distance matrix
//! - Sites and workers naming an unknown municipality
//! - Requested shift numbers outside the shift table
//!
//! All problems are collected and returned together.

use std::collections::HashSet;

use crate::config::Configuration;
use crate::models::{Municipality, Site, Worker};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same key.
    DuplicateId,
    /// A municipality zone is not in the distance matrix.
    ZoneOutOfRange,
    /// A site or worker references a municipality that doesn't exist.
    UnknownMunicipality,
    /// A worker requests a shift number that isn't configured.
    ShiftOutOfRange,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a staffing run.
///
/// Checks:
/// 1. No duplicate municipality names
/// 2. Every municipality zone indexes the distance matrix
/// 3. No duplicate site identifiers
/// 4. Every site's municipality is registered
/// 5. No duplicate worker emails
/// 6. Every worker's municipality is registered
/// 7. Every requested shift number is configured
///
/// Home sites are not checked. A home-site-only worker whose home site is
/// missing simply matches no site and ends up unassigned.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    config: &Configuration,
    municipalities: &[Municipality],
    sites: &[Site],
    workers: &[Worker],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut municipality_names = HashSet::new();
    for m in municipalities {
        if !municipality_names.insert(m.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate municipality name: {}", m.name),
            ));
        }
        if m.zone >= config.zone_count() {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZoneOutOfRange,
                format!(
                    "Municipality '{}' is in zone {}, but only {} zones are configured",
                    m.name,
                    m.zone,
                    config.zone_count()
                ),
            ));
        }
    }

    let mut site_ids = HashSet::new();
    for site in sites {
        if !site_ids.insert(site.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate site ID: {}", site.id),
            ));
        }
        if !municipality_names.contains(site.municipality.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownMunicipality,
                format!(
                    "Site '{}' references unknown municipality '{}'",
                    site.id, site.municipality.name
                ),
            ));
        }
    }

    let mut emails = HashSet::new();
    for worker in workers {
        if !emails.insert(worker.email.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate worker email: {}", worker.email),
            ));
        }
        if !municipality_names.contains(worker.municipality.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownMunicipality,
                format!(
                    "Worker '{}' references unknown municipality '{}'",
                    worker.email, worker.municipality.name
                ),
            ));
        }
        for &shift in worker.shifts() {
            if shift >= config.shift_count() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ShiftOutOfRange,
                    format!(
                        "Worker '{}' requests shift {}, but only {} shifts are configured",
                        worker.email,
                        shift,
                        config.shift_count()
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ShiftTable, ZoneMatrix};
    use crate::models::TravelFlexibility;

    fn config() -> Configuration {
        Configuration::new(
            ZoneMatrix::new(vec![vec![0, 1], vec![1, 0]], 1).unwrap(),
            ShiftTable::from_weights(&[1.0, 0.5]).unwrap(),
        )
    }

    fn sample_municipalities() -> Vec<Municipality> {
        vec![
            Municipality::new("Media", 10, 0),
            Municipality::new("Upland", 5, 1),
        ]
    }

    fn sample_sites() -> Vec<Site> {
        let c = config();
        vec![
            Site::new("P1", Municipality::new("Media", 10, 0), 4, 10, &c).unwrap(),
            Site::new("P2", Municipality::new("Upland", 5, 1), 2, 5, &c).unwrap(),
        ]
    }

    fn worker(email: &str, muni: &str) -> Worker {
        Worker::new(
            email,
            Municipality::new(muni, 5, 1),
            TravelFlexibility::AnywhereInCounty,
        )
        .with_shifts(vec![0, 1])
    }

    #[test]
    fn test_valid_input() {
        let workers = vec![
            worker("a@x.org", "Media"),
            Worker::new(
                "b@x.org",
                Municipality::new("Upland", 5, 1),
                TravelFlexibility::MyPollOnly,
            )
            .with_home_site("P2"),
        ];
        assert!(validate_input(&config(), &sample_municipalities(), &sample_sites(), &workers).is_ok());
    }

    #[test]
    fn test_my_poll_only_without_home_site_is_valid() {
        let workers = vec![Worker::new(
            "a@x.org",
            Municipality::new("Media", 10, 0),
            TravelFlexibility::MyPollOnly,
        )];
        assert!(validate_input(&config(), &sample_municipalities(), &sample_sites(), &workers).is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let mut municipalities = sample_municipalities();
        municipalities.push(Municipality::new("Media", 1, 0));
        let mut sites = sample_sites();
        sites.push(sites[0].clone());
        let workers = vec![worker("a@x.org", "Media"), worker("a@x.org", "Upland")];

        let errors = validate_input(&config(), &municipalities, &sites, &workers).unwrap_err();
        let duplicates: Vec<_> = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::DuplicateId)
            .collect();
        assert_eq!(duplicates.len(), 3);
        assert!(duplicates.iter().any(|e| e.message.contains("municipality")));
        assert!(duplicates.iter().any(|e| e.message.contains("site")));
        assert!(duplicates.iter().any(|e| e.message.contains("email")));
    }

    #[test]
    fn test_zone_out_of_range() {
        let municipalities = vec![Municipality::new("Far", 1, 7)];
        let errors = validate_input(&config(), &municipalities, &[], &[]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::ZoneOutOfRange);
    }

    #[test]
    fn test_unknown_references() {
        let workers = vec![
            worker("a@x.org", "Chester"),
            worker("b@x.org", "Media").with_home_site("P99"),
        ];
        let errors =
            validate_input(&config(), &sample_municipalities(), &sample_sites(), &workers).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::UnknownMunicipality);
    }

    #[test]
    fn test_stale_home_site_is_not_an_error() {
        let workers = vec![
            worker("a@x.org", "Media").with_home_site("Media-OLD"),
            Worker::new(
                "b@x.org",
                Municipality::new("Media", 10, 0),
                TravelFlexibility::MyPollOnly,
            )
            .with_home_site("P99"),
        ];
        assert!(validate_input(&config(), &sample_municipalities(), &sample_sites(), &workers).is_ok());
    }

    #[test]
    fn test_shift_out_of_range() {
        let workers = vec![worker("a@x.org", "Media").with_shifts(vec![0, 2])];
        let errors =
            validate_input(&config(), &sample_municipalities(), &sample_sites(), &workers).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::ShiftOutOfRange);
    }

    #[test]
    fn test_multiple_errors() {
        let sites = vec![Site::new("P1", Municipality::new("Ghost", 1, 0), 1, 1, &config()).unwrap()];
        let workers = vec![worker("a@x.org", "Ghost").with_shifts(vec![5])];
        let errors = validate_input(&config(), &sample_municipalities(), &sites, &workers).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
