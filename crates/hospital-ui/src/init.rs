//! Load-time setup of all page behaviors.

use std::rc::Rc;

use crate::config::PageConfig;
use crate::page::Page;
use crate::regions::RegionMap;
use crate::{autofill, cascade, delete_guard, filters, stats};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Behavior {
    RegionCascade,
    VisitSearch,
    PatientSearch,
    StatusFilter,
    OwnVisitsFilter,
    LastTreatmentAutofill,
    EmergencyStats,
    DoctorSearch,
    DeleteConfirmation,
}

impl Behavior {
    /// Every behavior, in setup order.
    pub const ALL: [Behavior; 9] = [
        Self::RegionCascade,
        Self::VisitSearch,
        Self::PatientSearch,
        Self::StatusFilter,
        Self::OwnVisitsFilter,
        Self::LastTreatmentAutofill,
        Self::EmergencyStats,
        Self::DoctorSearch,
        Self::DeleteConfirmation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::RegionCascade => "region cascade",
            Self::VisitSearch => "visit search",
            Self::PatientSearch => "patient search",
            Self::StatusFilter => "status filter",
            Self::OwnVisitsFilter => "own visits filter",
            Self::LastTreatmentAutofill => "last treatment autofill",
            Self::EmergencyStats => "emergency stats",
            Self::DoctorSearch => "doctor search",
            Self::DeleteConfirmation => "delete confirmation",
        }
    }
}

/// Which behaviors found their elements on the page, in setup order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitReport {
    pub installed: Vec<Behavior>,
    pub guarded_delete_forms: usize,
}

impl InitReport {
    pub fn is_installed(&self, behavior: Behavior) -> bool {
        self.installed.contains(&behavior)
    }

    fn record(&mut self, behavior: Behavior, installed: bool) {
        if installed {
            log::debug!("Installed {}", behavior.name());
            self.installed.push(behavior);
        }
    }
}

/// Install every behavior whose elements exist on `page`.
///
/// Behaviors are independent. A missing element only disables the behavior
/// that needs it.
pub fn initialize_page<P: Page>(page: &Rc<P>, config: &PageConfig) -> InitReport {
    let mut report = InitReport::default();

    report.record(
        Behavior::RegionCascade,
        cascade::install(page, RegionMap::builtin(), config.regions_url.as_deref()),
    );
    report.record(
        Behavior::VisitSearch,
        filters::install_search(page, &filters::VISIT_SEARCH),
    );
    report.record(
        Behavior::PatientSearch,
        filters::install_search(page, &filters::PATIENT_SEARCH),
    );
    report.record(Behavior::StatusFilter, filters::install_status_filter(page));
    report.record(
        Behavior::OwnVisitsFilter,
        filters::install_own_visits_filter(page),
    );
    report.record(Behavior::LastTreatmentAutofill, autofill::install(page));
    report.record(
        Behavior::EmergencyStats,
        stats::install(page, &config.ambulance_stats_url),
    );
    report.record(
        Behavior::DoctorSearch,
        filters::install_search(page, &filters::DOCTOR_SEARCH),
    );

    report.guarded_delete_forms = delete_guard::install(page);
    report.record(Behavior::DeleteConfirmation, report.guarded_delete_forms > 0);

    log::info!(
        "Page behaviors ready: {} of {} installed",
        report.installed.len(),
        Behavior::ALL.len()
    );
    report
}
