//! TaskAck message content.

use crate::proto::task_ack::TaskStatus;
use crate::proto::TaskAck;

pub(crate) fn build(task_id: Option<&str>, accepted: bool, reason: &str) -> TaskAck {
    let status = if accepted {
        TaskStatus::Accepted
    } else {
        TaskStatus::Rejected
    };

    TaskAck {
        task_id: task_id.filter(|id| !id.is_empty()).map(str::to_string),
        task_status: status as i32,
        reason: if reason.is_empty() {
            Vec::new()
        } else {
            vec![reason.to_string()]
        },
    }
}
