//! Bulk Actions
//!
//! "Mark all" and "delete completed". One request per affected todo, all in
//! flight at once; the batch is not atomic, so the outcome lists which ids
//! went through and which did not.

use futures::future::join_all;
use uuid::Uuid;

use crate::api::{ApiError, TodoRepository};
use crate::domain::{Session, Todo, TodoPatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    CompleteAll,
    ReopenAll,
    DeleteCompleted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulkPlan {
    pub action: BulkAction,
    pub targets: Vec<Uuid>,
}

impl BulkPlan {
    /// Complete everything if anything is still active, otherwise reopen all
    pub fn toggle_all(todos: &[Todo]) -> Option<Self> {
        if todos.is_empty() {
            return None;
        }
        let action = if todos.iter().any(Todo::is_active) {
            BulkAction::CompleteAll
        } else {
            BulkAction::ReopenAll
        };
        Some(Self {
            action,
            targets: todos.iter().map(|t| t.id).collect(),
        })
    }

    pub fn delete_completed(todos: &[Todo]) -> Option<Self> {
        let targets: Vec<Uuid> = todos.iter().filter(|t| t.completed).map(|t| t.id).collect();
        if targets.is_empty() {
            return None;
        }
        Some(Self {
            action: BulkAction::DeleteCompleted,
            targets,
        })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Issue every request and wait for all of them to settle
    pub async fn run<R: TodoRepository + ?Sized>(&self, repo: &R, session: &Session) -> BulkOutcome {
        let requests = self.targets.iter().map(|&id| async move {
            let result = match self.action {
                BulkAction::CompleteAll => repo.update(session, id, &TodoPatch::completed(true)).await.map(|_| ()),
                BulkAction::ReopenAll => repo.update(session, id, &TodoPatch::completed(false)).await.map(|_| ()),
                BulkAction::DeleteCompleted => repo.delete(session, id).await,
            };
            (id, result)
        });

        let mut outcome = BulkOutcome {
            action: self.action,
            succeeded: Vec::new(),
            failed: Vec::new(),
        };
        for (id, result) in join_all(requests).await {
            match result {
                Ok(()) => outcome.succeeded.push(id),
                Err(err) => {
                    log::error!("bulk {:?} failed for {}: {}", self.action, id, err);
                    outcome.failed.push((id, err));
                }
            }
        }
        outcome
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulkOutcome {
    pub action: BulkAction,
    pub succeeded: Vec<Uuid>,
    pub failed: Vec<(Uuid, ApiError)>,
}

impl BulkOutcome {
    /// Nothing was attempted because the batch could not be authorized
    pub fn all_failed(plan: &BulkPlan, err: ApiError) -> Self {
        Self {
            action: plan.action,
            succeeded: Vec::new(),
            failed: plan.targets.iter().map(|&id| (id, err.clone())).collect(),
        }
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Toast text for the batch
    pub fn summary(&self) -> String {
        let verb = match self.action {
            BulkAction::CompleteAll => "completed",
            BulkAction::ReopenAll => "marked incomplete",
            BulkAction::DeleteCompleted => "deleted",
        };
        let done = self.succeeded.len();
        if self.failed.is_empty() {
            format!("{} {} {}", done, plural(done), verb)
        } else {
            format!(
                "{} {} {}, {} failed. Please try again.",
                done,
                plural(done),
                verb,
                self.failed.len()
            )
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        "todo"
    } else {
        "todos"
    }
}

/// Confirmation question for deleting the completed todos in `todos`
pub fn delete_completed_prompt(todos: &[Todo]) -> String {
    let n = todos.iter().filter(|t| t.completed).count();
    format!("Delete {} completed {}?", n, plural(n))
}

/// Label of the toggle-all button
pub fn toggle_all_label(todos: &[Todo]) -> String {
    let active = todos.iter().filter(|t| t.is_active()).count();
    if active > 0 {
        format!("Mark All Complete ({})", active)
    } else {
        format!("Mark All Incomplete ({})", todos.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::MemoryBackend;
    use crate::domain::{NewTodo, Priority};
    use crate::filter::tests::make_todo;

    #[test]
    fn test_toggle_all_plan() {
        assert!(BulkPlan::toggle_all(&[]).is_none());

        let mixed = vec![
            make_todo(1, true, Priority::Low, None),
            make_todo(2, false, Priority::Low, None),
        ];
        let plan = BulkPlan::toggle_all(&mixed).unwrap();
        assert_eq!(plan.action, BulkAction::CompleteAll);
        assert_eq!(plan.len(), 2);
        assert_eq!(toggle_all_label(&mixed), "Mark All Complete (1)");

        let done = vec![make_todo(1, true, Priority::Low, None), make_todo(2, true, Priority::Low, None)];
        assert_eq!(BulkPlan::toggle_all(&done).unwrap().action, BulkAction::ReopenAll);
        assert_eq!(toggle_all_label(&done), "Mark All Incomplete (2)");
    }

    #[test]
    fn test_delete_completed_plan() {
        let todos = vec![
            make_todo(1, true, Priority::Low, None),
            make_todo(2, false, Priority::Low, None),
            make_todo(3, true, Priority::High, None),
        ];
        let plan = BulkPlan::delete_completed(&todos).unwrap();
        assert_eq!(plan.targets, vec![Uuid::from_u128(1), Uuid::from_u128(3)]);
        assert!(BulkPlan::delete_completed(&todos[1..2]).is_none());
    }

    #[test]
    fn test_delete_prompt_follows_the_list() {
        let mut todos = vec![
            make_todo(1, true, Priority::Low, None),
            make_todo(2, false, Priority::Low, None),
        ];
        assert_eq!(delete_completed_prompt(&todos), "Delete 1 completed todo?");

        todos[1].completed = true;
        todos.push(make_todo(3, true, Priority::High, None));
        assert_eq!(delete_completed_prompt(&todos), "Delete 3 completed todos?");
        assert_eq!(BulkPlan::delete_completed(&todos).unwrap().len(), 3);
    }

    async fn seeded(backend: &MemoryBackend, session: &Session, n: usize) -> Vec<Todo> {
        for i in 0..n {
            backend
                .insert(session, &NewTodo::new(format!("task {}", i), Priority::Medium))
                .await
                .unwrap();
        }
        backend.list(session).await.unwrap()
    }

    #[tokio::test]
    async fn test_run_completes_everything() {
        let backend = MemoryBackend::new();
        let session = backend.register("ada@example.com", "Secret1");
        let todos = seeded(&backend, &session, 3).await;

        let outcome = BulkPlan::toggle_all(&todos).unwrap().run(&backend, &session).await;
        assert!(outcome.is_complete_success());
        assert_eq!(outcome.summary(), "3 todos completed");
        assert!(backend.stored().iter().all(|t| t.completed));
    }

    #[tokio::test]
    async fn test_partial_failure_is_reported_not_rolled_back() {
        let backend = MemoryBackend::new();
        let session = backend.register("ada@example.com", "Secret1");
        let todos = seeded(&backend, &session, 3).await;
        backend.fail_on(todos[1].id);

        let outcome = BulkPlan::toggle_all(&todos).unwrap().run(&backend, &session).await;
        assert_eq!(outcome.succeeded.len(), 2);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].0, todos[1].id);
        assert_eq!(outcome.summary(), "2 todos completed, 1 failed. Please try again.");

        let stored = backend.stored();
        assert_eq!(stored.iter().filter(|t| t.completed).count(), 2);
    }

    #[tokio::test]
    async fn test_delete_completed_removes_only_completed() {
        let backend = MemoryBackend::new();
        let session = backend.register("ada@example.com", "Secret1");
        let todos = seeded(&backend, &session, 3).await;
        backend
            .update(&session, todos[0].id, &TodoPatch::completed(true))
            .await
            .unwrap();

        let todos = backend.list(&session).await.unwrap();
        let outcome = BulkPlan::delete_completed(&todos).unwrap().run(&backend, &session).await;
        assert_eq!(outcome.summary(), "1 todo deleted");
        assert_eq!(backend.list(&session).await.unwrap().len(), 2);
    }
}
