//! Task handling.
//!
//! The DMM tasks the node through `Task` messages. The handler inspects
//! `command.request`, decides the follow-up action, records the task id as
//! active, and the caller answers with a TaskAck. One-shot actions
//! (Registration / Status) clear the active task id once performed, so it is
//! only ever attached to reports produced while the task is in flight.

use crate::proto::{task, Task};
use parking_lot::Mutex;

/// Follow-up the receive worker must perform after acknowledging a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    None,
    SendRegistration,
    SendStatus,
}

/// Outcome of evaluating one task.
#[derive(Debug, Clone)]
pub struct TaskDecision {
    pub accepted: bool,
    pub reason: String,
    pub action: TaskAction,
}

/// Evaluate a parsed Task.
///
/// All tasks are currently accepted; the decision struct carries the
/// rejection plumbing so validation can be added without changing callers.
pub fn evaluate(task: &Task) -> TaskDecision {
    let task_id = task.task_id.as_deref().unwrap_or("(no task_id)");
    log::info!("Received Task: task_id={}", task_id);

    if let Some(control) = task.control {
        let control_str = match task::Control::try_from(control) {
            Ok(task::Control::Start) => "START",
            Ok(task::Control::Stop) => "STOP",
            Ok(task::Control::Pause) => "PAUSE",
            _ => "UNKNOWN",
        };
        log::info!("  Task control={}", control_str);
    }
    if !task.region.is_empty() {
        log::info!("  Task region count={}", task.region.len());
    }

    let request = task
        .command
        .as_ref()
        .and_then(|c| c.request.as_deref())
        .unwrap_or("");

    if request.is_empty() {
        return TaskDecision {
            accepted: true,
            reason: "Task accepted for processing".to_string(),
            action: TaskAction::None,
        };
    }

    log::info!("  Task command.request={}", request);

    if eq_ignore_case(request, "Registration") || eq_ignore_case(request, "Request Registration") {
        TaskDecision {
            accepted: true,
            reason: "Task accepted, will send Registration report".to_string(),
            action: TaskAction::SendRegistration,
        }
    } else if eq_ignore_case(request, "Status") || eq_ignore_case(request, "Request Status") {
        TaskDecision {
            accepted: true,
            reason: "Task accepted, will send Status report".to_string(),
            action: TaskAction::SendStatus,
        }
    } else {
        TaskDecision {
            accepted: true,
            reason: format!("Task accepted, unknown request type: {request}"),
            action: TaskAction::None,
        }
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Active task id, attached to status and detection reports while a task is
/// in flight.
#[derive(Default)]
pub struct ActiveTaskId {
    current: Mutex<Option<String>>,
}

impl ActiveTaskId {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a task as active. Empty or `"0"` clears instead.
    pub fn set(&self, task_id: &str) {
        let mut current = self.current.lock();
        if task_id.is_empty() || task_id == "0" {
            *current = None;
        } else {
            *current = Some(task_id.to_string());
        }
    }

    pub fn clear(&self) {
        *self.current.lock() = None;
    }

    pub fn get(&self) -> Option<String> {
        self.current.lock().clone()
    }
}
