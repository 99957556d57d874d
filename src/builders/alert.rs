//! Alert message content.
//!
//! Callers pass raw type/status codes; values outside the enum ranges fall
//! back to INFORMATION / ACTIVE so a bad code still produces a well-formed
//! alert.

use crate::identity::ulid;
use crate::proto::alert::{AlertStatus, AlertType};
use crate::proto::Alert;

pub(crate) fn build(description: &str, alert_type: i32, status: i32) -> Alert {
    let alert_type = match AlertType::try_from(alert_type) {
        Ok(t) if t != AlertType::Unspecified => t,
        _ => AlertType::Information,
    };
    let status = match AlertStatus::try_from(status) {
        Ok(s) if s != AlertStatus::Unspecified => s,
        _ => AlertStatus::Active,
    };
    let description = if description.is_empty() {
        "system alert"
    } else {
        description
    };

    Alert {
        alert_id: ulid::generate(),
        alert_type: Some(alert_type as i32),
        status: Some(status as i32),
        description: Some(description.to_string()),
    }
}
