//! Staffing domain models.
//!
//! | u-staff | Election day | Events | Field service |
//! |---------|--------------|--------|---------------|
//! | Municipality | Township/Borough | Venue district | Region |
//! | Site | Polling location | Booth | Depot |
//! | SiteShift | Poll shift | Booth rotation | Crew window |
//! | Worker | Poll volunteer | Event volunteer | Technician |

mod municipality;
mod site;
mod worker;

pub use municipality::Municipality;
pub use site::{Site, SiteShift};
pub use worker::{Role, TravelFlexibility, Worker};
