//! Tasks assigned to members and their submission/review loop
//!
//! Assignment bumps each assignee's `total_tasks`; an accepted review
//! bumps `tasks_completed`. A task completes when every assignee's
//! submission has been reviewed.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::authz::{Action, ActionContext, DenyReason, authorize};
use crate::domain::DomainId;
use crate::error::WorkflowError;
use crate::flags::FlagStore;
use crate::session::Identity;
use crate::store::ClubStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskPriority::Low => f.write_str("low"),
            TaskPriority::Medium => f.write_str("medium"),
            TaskPriority::High => f.write_str("high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Submitted,
    Reviewed,
}

/// One assignee's submission on a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSubmission {
    pub member_id: String,
    pub date: NaiveDate,
    pub status: SubmissionStatus,
    pub feedback: Option<String>,
}

/// Work handed to one or more members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub domain: DomainId,
    /// Member ids this task was handed to
    pub assigned_to: Vec<String>,
    /// Email of the assigning identity
    pub assigned_by: String,
    pub deadline: NaiveDate,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    #[serde(default)]
    pub submissions: Vec<TaskSubmission>,
}

impl Task {
    fn submission_mut(&mut self, member_id: &str) -> Option<&mut TaskSubmission> {
        self.submissions.iter_mut().find(|s| s.member_id == member_id)
    }

    /// Every assignee reviewed?
    fn all_reviewed(&self) -> bool {
        self.assigned_to.iter().all(|member_id| {
            self.submissions
                .iter()
                .any(|s| &s.member_id == member_id && s.status == SubmissionStatus::Reviewed)
        })
    }
}

/// Input for assigning a task
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub domain: DomainId,
    pub assigned_to: Vec<String>,
    pub deadline: NaiveDate,
    pub priority: TaskPriority,
}

impl NewTask {
    pub fn new(title: impl Into<String>, domain: impl Into<String>, deadline: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            domain: domain.into(),
            assigned_to: Vec::new(),
            deadline,
            priority: TaskPriority::Medium,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn assign_to(mut self, member_id: impl Into<String>) -> Self {
        self.assigned_to.push(member_id.into());
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }
}

pub struct TaskWorkflow {
    store: Arc<ClubStore>,
    flags: Arc<FlagStore>,
}

impl TaskWorkflow {
    pub fn new(store: Arc<ClubStore>, flags: Arc<FlagStore>) -> Self {
        Self { store, flags }
    }

    /// Hand a task to members, bumping each assignee's `total_tasks`
    pub fn assign(&self, actor: &Identity, new: NewTask) -> Result<Task, WorkflowError> {
        let flags = self.flags.snapshot();
        authorize(actor, Action::AssignTask, &ActionContext::global(), &flags).require()?;
        self.store.require_domain(&new.domain)?;

        let mut seen = std::collections::HashSet::new();
        let mut assignees = new.assigned_to;
        assignees.retain(|id| seen.insert(id.clone()));
        for member_id in &assignees {
            if self.store.member(member_id).is_none() {
                return Err(WorkflowError::MemberNotFound(member_id.clone()));
            }
        }

        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            description: new.description,
            domain: new.domain,
            assigned_to: assignees.clone(),
            assigned_by: actor.email.clone(),
            deadline: new.deadline,
            priority: new.priority,
            status: TaskStatus::InProgress,
            submissions: Vec::new(),
        };
        let task = self.store.insert_task(task);

        for member_id in &assignees {
            self.store.update_member(member_id, |member| {
                member.total_tasks += 1;
                Ok(())
            })?;
        }

        tracing::info!(task = %task.id, assignees = assignees.len(), "task assigned");
        Ok(task)
    }

    /// Record the actor's submission. Resubmitting refreshes a Submitted
    /// entry; a Reviewed entry is final.
    pub fn submit(&self, actor: &Identity, task_id: &str) -> Result<Task, WorkflowError> {
        let flags = self.flags.snapshot();
        authorize(actor, Action::SubmitTask, &ActionContext::global(), &flags).require()?;

        let member = self.store.member_by_email(&actor.email).ok_or_else(|| {
            WorkflowError::NotAssigned {
                task: task_id.to_string(),
                member: actor.email.clone(),
            }
        })?;

        let task = self.store.update_task(task_id, |task| {
            if !task.assigned_to.contains(&member.id) {
                return Err(WorkflowError::NotAssigned {
                    task: task.id.clone(),
                    member: member.id.clone(),
                });
            }
            match task.submission_mut(&member.id) {
                Some(submission) if submission.status == SubmissionStatus::Reviewed => {
                    return Err(DenyReason::InvalidTransition.into());
                }
                Some(submission) => {
                    submission.date = Utc::now().date_naive();
                }
                None => {
                    task.submissions.push(TaskSubmission {
                        member_id: member.id.clone(),
                        date: Utc::now().date_naive(),
                        status: SubmissionStatus::Submitted,
                        feedback: None,
                    });
                }
            }
            Ok(task.clone())
        })?;

        tracing::info!(task = %task.id, member = %member.id, "task submitted");
        Ok(task)
    }

    /// Review one assignee's submission, bumping their `tasks_completed`
    /// and completing the task when every assignee is reviewed.
    pub fn review(
        &self,
        actor: &Identity,
        task_id: &str,
        member_id: &str,
        feedback: impl Into<String>,
    ) -> Result<Task, WorkflowError> {
        let flags = self.flags.snapshot();
        authorize(actor, Action::ReviewSubmission, &ActionContext::global(), &flags).require()?;

        let feedback = feedback.into();
        let task = self.store.update_task(task_id, |task| {
            if !task.assigned_to.iter().any(|id| id == member_id) {
                return Err(WorkflowError::NotAssigned {
                    task: task.id.clone(),
                    member: member_id.to_string(),
                });
            }
            let Some(submission) = task.submission_mut(member_id) else {
                // nothing to review yet
                return Err(DenyReason::InvalidTransition.into());
            };
            if submission.status == SubmissionStatus::Reviewed {
                return Err(DenyReason::InvalidTransition.into());
            }
            submission.status = SubmissionStatus::Reviewed;
            submission.feedback = Some(feedback.clone());
            if task.all_reviewed() {
                task.status = TaskStatus::Completed;
            }
            Ok(task.clone())
        })?;

        self.store.update_member(member_id, |member| {
            member.tasks_completed += 1;
            Ok(())
        })?;

        tracing::info!(task = %task.id, member = %member_id, status = ?task.status, "submission reviewed");
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;
    use crate::flags::Flag;
    use crate::membership::{MembershipWorkflow, NewMember};
    use crate::role::Role;

    fn dev() -> Identity {
        Identity::new("acct-dev", "Root", "dev@club.org", Role::Dev, None)
    }

    fn mentor(domain: &str) -> Identity {
        Identity::new(
            "acct-mentor",
            "Luis Ortega",
            "mentor@club.org",
            Role::Mentor,
            Some(domain.to_string()),
        )
    }

    fn member_identity(email: &str) -> Identity {
        Identity::new("acct-m", "Sam Okafor", email, Role::Member, Some("ai-ml".to_string()))
    }

    fn deadline() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 15).unwrap()
    }

    struct Fixture {
        tasks: TaskWorkflow,
        members: MembershipWorkflow,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(ClubStore::new(vec![Domain::new(
            "ai-ml",
            "AI / Machine Learning",
            "AI/ML",
            "ML track",
            "Asha Iyer",
        )]));
        let flags = Arc::new(FlagStore::new());
        Fixture {
            tasks: TaskWorkflow::new(store.clone(), flags.clone()),
            members: MembershipWorkflow::new(store, flags),
        }
    }

    fn seeded_member(f: &Fixture, email: &str) -> String {
        f.members
            .add_member(&dev(), NewMember::new("Sam Okafor", email, "ai-ml"))
            .unwrap()
            .id
    }

    #[test]
    fn assignment_bumps_total_tasks() {
        let f = fixture();
        let member_id = seeded_member(&f, "sam@uni.edu");

        let task = f
            .tasks
            .assign(
                &mentor("ai-ml"),
                NewTask::new("Label the dataset", "ai-ml", deadline())
                    .assign_to(&member_id)
                    .with_priority(TaskPriority::High),
            )
            .unwrap();

        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.assigned_by, "mentor@club.org");
        assert_eq!(f.tasks.store.member(&member_id).unwrap().total_tasks, 1);
    }

    #[test]
    fn assignment_validates_domain_and_members() {
        let f = fixture();
        let err = f
            .tasks
            .assign(&mentor("ai-ml"), NewTask::new("x", "robotics", deadline()))
            .unwrap_err();
        assert_eq!(err, WorkflowError::UnknownDomain("robotics".to_string()));

        let err = f
            .tasks
            .assign(
                &mentor("ai-ml"),
                NewTask::new("x", "ai-ml", deadline()).assign_to("ghost"),
            )
            .unwrap_err();
        assert_eq!(err, WorkflowError::MemberNotFound("ghost".to_string()));
    }

    #[test]
    fn members_cannot_assign_and_mentors_cannot_submit() {
        let f = fixture();
        let member_id = seeded_member(&f, "sam@uni.edu");

        let err = f
            .tasks
            .assign(
                &member_identity("sam@uni.edu"),
                NewTask::new("x", "ai-ml", deadline()).assign_to(&member_id),
            )
            .unwrap_err();
        assert_eq!(err.deny_reason(), Some(DenyReason::RoleNotPermitted));

        let task = f
            .tasks
            .assign(&mentor("ai-ml"), NewTask::new("x", "ai-ml", deadline()).assign_to(&member_id))
            .unwrap();
        let err = f.tasks.submit(&mentor("ai-ml"), &task.id).unwrap_err();
        assert_eq!(err.deny_reason(), Some(DenyReason::RoleNotPermitted));
    }

    #[test]
    fn submit_requires_being_an_assignee() {
        let f = fixture();
        let member_id = seeded_member(&f, "sam@uni.edu");
        seeded_member(&f, "other@uni.edu");

        let task = f
            .tasks
            .assign(&mentor("ai-ml"), NewTask::new("x", "ai-ml", deadline()).assign_to(&member_id))
            .unwrap();

        let err = f
            .tasks
            .submit(&member_identity("other@uni.edu"), &task.id)
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NotAssigned { .. }));
    }

    #[test]
    fn submission_gate_applies() {
        let f = fixture();
        let member_id = seeded_member(&f, "sam@uni.edu");
        let task = f
            .tasks
            .assign(&mentor("ai-ml"), NewTask::new("x", "ai-ml", deadline()).assign_to(&member_id))
            .unwrap();

        f.tasks.flags.set(&dev(), Flag::TaskSubmissions, false).unwrap();
        let err = f
            .tasks
            .submit(&member_identity("sam@uni.edu"), &task.id)
            .unwrap_err();
        assert_eq!(err.deny_reason(), Some(DenyReason::FeatureDisabled));
    }

    #[test]
    fn resubmission_refreshes_until_reviewed() {
        let f = fixture();
        let member_id = seeded_member(&f, "sam@uni.edu");
        let task = f
            .tasks
            .assign(&mentor("ai-ml"), NewTask::new("x", "ai-ml", deadline()).assign_to(&member_id))
            .unwrap();

        let sam = member_identity("sam@uni.edu");
        f.tasks.submit(&sam, &task.id).unwrap();
        let task_after = f.tasks.submit(&sam, &task.id).unwrap();
        assert_eq!(task_after.submissions.len(), 1);
        assert_eq!(task_after.submissions[0].status, SubmissionStatus::Submitted);

        f.tasks
            .review(&mentor("ai-ml"), &task.id, &member_id, "solid work")
            .unwrap();
        let err = f.tasks.submit(&sam, &task.id).unwrap_err();
        assert_eq!(err.deny_reason(), Some(DenyReason::InvalidTransition));
    }

    #[test]
    fn review_bumps_counters_and_completes_when_everyone_is_reviewed() {
        let f = fixture();
        let sam_id = seeded_member(&f, "sam@uni.edu");
        let ada_id = seeded_member(&f, "ada@uni.edu");

        let task = f
            .tasks
            .assign(
                &mentor("ai-ml"),
                NewTask::new("Ship the demo", "ai-ml", deadline())
                    .assign_to(&sam_id)
                    .assign_to(&ada_id),
            )
            .unwrap();

        f.tasks.submit(&member_identity("sam@uni.edu"), &task.id).unwrap();
        f.tasks.submit(&member_identity("ada@uni.edu"), &task.id).unwrap();

        let after_one = f
            .tasks
            .review(&mentor("ai-ml"), &task.id, &sam_id, "solid work")
            .unwrap();
        assert_eq!(after_one.status, TaskStatus::InProgress);
        assert_eq!(f.tasks.store.member(&sam_id).unwrap().tasks_completed, 1);

        let after_two = f
            .tasks
            .review(&mentor("ai-ml"), &task.id, &ada_id, "nice touches")
            .unwrap();
        assert_eq!(after_two.status, TaskStatus::Completed);
        assert_eq!(
            after_two.submissions.iter().filter(|s| s.feedback.is_some()).count(),
            2
        );
    }

    #[test]
    fn review_needs_a_submission_and_happens_once() {
        let f = fixture();
        let member_id = seeded_member(&f, "sam@uni.edu");
        let task = f
            .tasks
            .assign(&mentor("ai-ml"), NewTask::new("x", "ai-ml", deadline()).assign_to(&member_id))
            .unwrap();

        let err = f
            .tasks
            .review(&mentor("ai-ml"), &task.id, &member_id, "?")
            .unwrap_err();
        assert_eq!(err.deny_reason(), Some(DenyReason::InvalidTransition));

        f.tasks.submit(&member_identity("sam@uni.edu"), &task.id).unwrap();
        f.tasks.review(&mentor("ai-ml"), &task.id, &member_id, "ok").unwrap();

        let err = f
            .tasks
            .review(&mentor("ai-ml"), &task.id, &member_id, "again")
            .unwrap_err();
        assert_eq!(err.deny_reason(), Some(DenyReason::InvalidTransition));
        assert_eq!(f.tasks.store.member(&member_id).unwrap().tasks_completed, 1);
    }
}
