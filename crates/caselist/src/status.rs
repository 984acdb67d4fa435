use serde::{Deserialize, Serialize};

/// Lifecycle status of a compartment, derived from the workflow stage id.
///
/// The workflow tracks seven setup stages (basic product info, financial
/// structure, key dates, parties, document archive, fees and costs, product
/// setup) before a compartment opens for subscription; the list view only
/// distinguishes the coarse phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompartmentStatus {
    Setup,
    Subscription,
    Issued,
    Frozen,
}

impl CompartmentStatus {
    /// Maps a workflow stage id to its coarse phase. Ids 1 through 7 are the
    /// setup stages, 8 is subscription, 9 issued, 10 frozen. Unknown ids
    /// yield `None`.
    pub fn from_stage_id(stage_id: u32) -> Option<Self> {
        match stage_id {
            1..=7 => Some(CompartmentStatus::Setup),
            8 => Some(CompartmentStatus::Subscription),
            9 => Some(CompartmentStatus::Issued),
            10 => Some(CompartmentStatus::Frozen),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompartmentStatus::Setup => "Setup",
            CompartmentStatus::Subscription => "Subscription",
            CompartmentStatus::Issued => "Issued",
            CompartmentStatus::Frozen => "Frozen",
        }
    }
}
