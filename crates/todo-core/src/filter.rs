//! Todo Filters
//!
//! Derived views over the loaded list. The list is one user's todos, so
//! everything here is a single linear pass that keeps the service order.

use chrono::NaiveDate;

use crate::domain::{Priority, Todo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TodoFilter {
    #[default]
    All,
    Active,
    Completed,
    DueToday,
    HighPriority,
}

impl TodoFilter {
    pub const ALL: [TodoFilter; 5] = [
        TodoFilter::All,
        TodoFilter::Active,
        TodoFilter::Completed,
        TodoFilter::DueToday,
        TodoFilter::HighPriority,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TodoFilter::All => "All",
            TodoFilter::Active => "Active",
            TodoFilter::Completed => "Completed",
            TodoFilter::DueToday => "Due Today",
            TodoFilter::HighPriority => "High Priority",
        }
    }

    pub fn matches(&self, todo: &Todo, today: NaiveDate) -> bool {
        match self {
            TodoFilter::All => true,
            TodoFilter::Active => !todo.completed,
            TodoFilter::Completed => todo.completed,
            TodoFilter::DueToday => todo.is_due_on(today),
            TodoFilter::HighPriority => todo.priority == Priority::High,
        }
    }

    pub fn apply(&self, todos: &[Todo], today: NaiveDate) -> Vec<Todo> {
        todos.iter().filter(|t| self.matches(t, today)).cloned().collect()
    }
}

/// Badge numbers for the filter bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoCounts {
    pub all: usize,
    pub active: usize,
    pub completed: usize,
    pub due_today: usize,
    pub high_priority: usize,
}

impl TodoCounts {
    pub fn from_todos(todos: &[Todo], today: NaiveDate) -> Self {
        todos.iter().fold(Self::default(), |mut counts, todo| {
            counts.all += 1;
            if todo.completed {
                counts.completed += 1;
            } else {
                counts.active += 1;
            }
            if todo.is_due_on(today) {
                counts.due_today += 1;
            }
            if todo.priority == Priority::High {
                counts.high_priority += 1;
            }
            counts
        })
    }

    pub fn for_filter(&self, filter: TodoFilter) -> usize {
        match filter {
            TodoFilter::All => self.all,
            TodoFilter::Active => self.active,
            TodoFilter::Completed => self.completed,
            TodoFilter::DueToday => self.due_today,
            TodoFilter::HighPriority => self.high_priority,
        }
    }
}
