//! Form State
//!
//! Per-field value/touched/error tracking for the sign-in, sign-up and todo
//! forms. A field is only revalidated on change once it has been touched
//! (blurred), so users are not shouted at while typing the first time.

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use crate::domain::{NewTodo, Priority, Todo, TodoPatch};
use crate::validation::{self, FieldResult};

pub type FormValues<F> = HashMap<F, String>;
pub type FieldErrors<F> = HashMap<F, String>;

/// A set of fields plus the rules that turn their raw text into `Output`
pub trait Schema {
    type Field: Copy + Eq + Hash + Debug + 'static;
    type Output;

    fn fields(&self) -> &'static [Self::Field];

    /// Check a single field in isolation
    fn validate_field(&self, field: Self::Field, value: &str) -> Result<(), String>;

    /// Check every field and build the typed output
    fn parse(&self, values: &FormValues<Self::Field>) -> Result<Self::Output, FieldErrors<Self::Field>>;
}

fn value_of<F: Eq + Hash>(values: &FormValues<F>, field: F) -> &str {
    values.get(&field).map(String::as_str).unwrap_or("")
}

/// Collects the first error of each field while parsing
struct ErrorSink<F> {
    errors: FieldErrors<F>,
}

impl<F: Eq + Hash> ErrorSink<F> {
    fn new() -> Self {
        Self { errors: HashMap::new() }
    }

    fn check<T>(&mut self, field: F, result: FieldResult<T>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(msg) => {
                self.errors.entry(field).or_insert(msg);
                None
            }
        }
    }
}

// ========================
// Auth forms
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthField {
    Email,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// The sign-in and sign-up forms share fields but not rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthSchema {
    #[default]
    SignIn,
    SignUp,
}

const AUTH_FIELDS: &[AuthField] = &[AuthField::Email, AuthField::Password];

impl AuthSchema {
    fn check(&self, field: AuthField, value: &str) -> FieldResult<String> {
        match (self, field) {
            (AuthSchema::SignIn, AuthField::Email) => validation::validate_sign_in_email(value),
            (AuthSchema::SignIn, AuthField::Password) => validation::validate_existing_password(value),
            (AuthSchema::SignUp, AuthField::Email) => validation::validate_sign_up_email(value),
            (AuthSchema::SignUp, AuthField::Password) => validation::validate_new_password(value),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AuthSchema::SignIn => "Sign In",
            AuthSchema::SignUp => "Sign Up",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            AuthSchema::SignIn => AuthSchema::SignUp,
            AuthSchema::SignUp => AuthSchema::SignIn,
        }
    }
}

impl Schema for AuthSchema {
    type Field = AuthField;
    type Output = Credentials;

    fn fields(&self) -> &'static [AuthField] {
        AUTH_FIELDS
    }

    fn validate_field(&self, field: AuthField, value: &str) -> Result<(), String> {
        self.check(field, value).map(|_| ())
    }

    fn parse(&self, values: &FormValues<AuthField>) -> Result<Credentials, FieldErrors<AuthField>> {
        let mut sink = ErrorSink::new();
        let email = sink.check(AuthField::Email, self.check(AuthField::Email, value_of(values, AuthField::Email)));
        let password = sink.check(
            AuthField::Password,
            self.check(AuthField::Password, value_of(values, AuthField::Password)),
        );
        match (email, password) {
            (Some(email), Some(password)) => Ok(Credentials { email, password }),
            _ => Err(sink.errors),
        }
    }
}

/// Initial values of the auth form
pub fn blank_auth_values() -> FormValues<AuthField> {
    HashMap::from([(AuthField::Email, String::new()), (AuthField::Password, String::new())])
}

// ========================
// Todo forms
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TodoField {
    Title,
    Description,
    DueDate,
    Priority,
}

const TODO_FIELDS: &[TodoField] = &[
    TodoField::Title,
    TodoField::Description,
    TodoField::DueDate,
    TodoField::Priority,
];

/// Validated and sanitized todo fields
#[derive(Debug, Clone, PartialEq)]
pub struct TodoInput {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

impl TodoInput {
    pub fn into_new_todo(self) -> NewTodo {
        NewTodo {
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            priority: self.priority,
            completed: false,
        }
    }

    /// Full replacement of the editable columns; cleared optionals become null
    pub fn into_patch(self) -> TodoPatch {
        TodoPatch {
            title: Some(self.title),
            description: Some(self.description),
            due_date: Some(self.due_date),
            priority: Some(self.priority),
            completed: None,
        }
    }
}

/// Title must survive sanitization with something left
fn sanitized_title(value: &str) -> FieldResult<String> {
    let title = validation::sanitize_string(&validation::validate_title(value)?);
    if title.is_empty() {
        return Err("Title is required".into());
    }
    Ok(title)
}

fn sanitized_description(value: &str) -> FieldResult<Option<String>> {
    Ok(validation::validate_description(value)?
        .map(|d| validation::sanitize_string(&d))
        .filter(|d| !d.is_empty()))
}

fn parse_todo(
    values: &FormValues<TodoField>,
    today: NaiveDate,
    allow_past: bool,
) -> Result<TodoInput, FieldErrors<TodoField>> {
    let mut sink = ErrorSink::new();
    let title = sink.check(TodoField::Title, sanitized_title(value_of(values, TodoField::Title)));
    let description = sink.check(
        TodoField::Description,
        sanitized_description(value_of(values, TodoField::Description)),
    );
    let due_date = sink.check(
        TodoField::DueDate,
        validation::validate_due_date(value_of(values, TodoField::DueDate), today, allow_past),
    );
    let priority = sink.check(
        TodoField::Priority,
        validation::validate_priority(value_of(values, TodoField::Priority)),
    );
    match (title, description, due_date, priority) {
        (Some(title), Some(description), Some(due_date), Some(priority)) => Ok(TodoInput {
            title,
            description,
            due_date,
            priority,
        }),
        _ => Err(sink.errors),
    }
}

fn validate_todo_field(field: TodoField, value: &str, today: NaiveDate, allow_past: bool) -> Result<(), String> {
    match field {
        TodoField::Title => sanitized_title(value).map(|_| ()),
        TodoField::Description => sanitized_description(value).map(|_| ()),
        TodoField::DueDate => validation::validate_due_date(value, today, allow_past).map(|_| ()),
        TodoField::Priority => validation::validate_priority(value).map(|_| ()),
    }
}

/// New todos: due date may not be in the past
#[derive(Debug, Clone, Copy)]
pub struct CreateTodoSchema {
    pub today: NaiveDate,
}

/// Editing: an overdue todo keeps its date
#[derive(Debug, Clone, Copy)]
pub struct EditTodoSchema {
    pub today: NaiveDate,
}

impl Schema for CreateTodoSchema {
    type Field = TodoField;
    type Output = TodoInput;

    fn fields(&self) -> &'static [TodoField] {
        TODO_FIELDS
    }

    fn validate_field(&self, field: TodoField, value: &str) -> Result<(), String> {
        validate_todo_field(field, value, self.today, false)
    }

    fn parse(&self, values: &FormValues<TodoField>) -> Result<TodoInput, FieldErrors<TodoField>> {
        parse_todo(values, self.today, false)
    }
}

impl Schema for EditTodoSchema {
    type Field = TodoField;
    type Output = TodoInput;

    fn fields(&self) -> &'static [TodoField] {
        TODO_FIELDS
    }

    fn validate_field(&self, field: TodoField, value: &str) -> Result<(), String> {
        validate_todo_field(field, value, self.today, true)
    }

    fn parse(&self, values: &FormValues<TodoField>) -> Result<TodoInput, FieldErrors<TodoField>> {
        parse_todo(values, self.today, true)
    }
}

/// Initial values of the "add todo" form
pub fn blank_todo_values() -> FormValues<TodoField> {
    HashMap::from([
        (TodoField::Title, String::new()),
        (TodoField::Description, String::new()),
        (TodoField::DueDate, String::new()),
        (TodoField::Priority, Priority::default().as_str().to_string()),
    ])
}

/// Edit form prefilled from an existing todo
pub fn todo_values(todo: &Todo) -> FormValues<TodoField> {
    HashMap::from([
        (TodoField::Title, todo.title.clone()),
        (TodoField::Description, todo.description.clone().unwrap_or_default()),
        (
            TodoField::DueDate,
            todo.due_date
                .map(|d| d.format(validation::DATE_FORMAT).to_string())
                .unwrap_or_default(),
        ),
        (TodoField::Priority, todo.priority.as_str().to_string()),
    ])
}

// ========================
// Form state
// ========================

/// Values, errors and touched flags of one form
#[derive(Debug, Clone)]
pub struct FormState<S: Schema> {
    schema: S,
    initial: FormValues<S::Field>,
    values: FormValues<S::Field>,
    errors: FieldErrors<S::Field>,
    touched: HashSet<S::Field>,
    submitting: bool,
}

impl<S: Schema> FormState<S> {
    pub fn new(schema: S, initial: FormValues<S::Field>) -> Self {
        Self {
            schema,
            values: initial.clone(),
            initial,
            errors: HashMap::new(),
            touched: HashSet::new(),
            submitting: false,
        }
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    /// Swap the rules (a new "today", sign-in vs sign-up) keeping the input;
    /// touched fields are rechecked under the new rules
    pub fn set_schema(&mut self, schema: S) {
        self.schema = schema;
        let touched: Vec<S::Field> = self.touched.iter().copied().collect();
        for field in touched {
            self.validate(field);
        }
    }

    pub fn value(&self, field: S::Field) -> &str {
        value_of(&self.values, field)
    }

    pub fn set_value(&mut self, field: S::Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
        if self.touched.contains(&field) {
            self.validate(field);
        }
    }

    /// Mark a field touched (on blur) and validate what it holds
    pub fn touch(&mut self, field: S::Field) {
        self.touched.insert(field);
        self.validate(field);
    }

    fn validate(&mut self, field: S::Field) {
        let result = self.schema.validate_field(field, value_of(&self.values, field));
        match result {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(msg) => {
                self.errors.insert(field, msg);
            }
        }
    }

    /// Validate everything. On success the form enters the submitting state
    /// and the parsed output is returned; `None` while a submit is in flight
    /// or when any field fails.
    pub fn begin_submit(&mut self) -> Option<S::Output> {
        if self.submitting {
            return None;
        }
        match self.schema.parse(&self.values) {
            Ok(output) => {
                self.errors.clear();
                self.submitting = true;
                Some(output)
            }
            Err(errors) => {
                log::debug!("form rejected: {:?}", errors.keys().collect::<Vec<_>>());
                self.touched.extend(self.schema.fields().iter().copied());
                self.errors = errors;
                None
            }
        }
    }

    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    /// Back to the initial values with no errors or touched fields
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
        self.touched.clear();
        self.submitting = false;
    }

    pub fn error(&self, field: S::Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_touched(&self, field: S::Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn todo_form() -> FormState<CreateTodoSchema> {
        FormState::new(CreateTodoSchema { today: today() }, blank_todo_values())
    }

    fn all_touched<S: Schema>(form: &FormState<S>) -> bool {
        form.schema().fields().iter().all(|&field| form.is_touched(field))
    }

    #[test]
    fn test_failed_submit_touches_every_field_of_any_schema() {
        let mut todo = todo_form();
        assert!(todo.begin_submit().is_none());
        assert!(all_touched(&todo));

        let mut auth = FormState::new(AuthSchema::SignUp, blank_auth_values());
        assert!(auth.begin_submit().is_none());
        assert!(all_touched(&auth));
        assert_eq!(auth.error(AuthField::Email), Some("Email is required"));
    }

    #[test]
    fn test_untouched_field_is_not_validated_on_change() {
        let mut form = todo_form();
        form.set_value(TodoField::Title, "");
        assert!(form.error(TodoField::Title).is_none());
        assert!(!form.has_errors());
    }

    #[test]
    fn test_touch_validates_and_later_changes_revalidate() {
        let mut form = todo_form();
        form.touch(TodoField::Title);
        assert_eq!(form.error(TodoField::Title), Some("Title is required"));
        assert!(form.is_touched(TodoField::Title));

        form.set_value(TodoField::Title, "Write report");
        assert!(form.error(TodoField::Title).is_none());
        assert!(!form.has_errors());
    }

    #[test]
    fn test_submit_collects_every_field_error() {
        let mut form = todo_form();
        form.set_value(TodoField::DueDate, "2026-10-01");
        form.set_value(TodoField::Priority, "urgent");

        assert!(form.begin_submit().is_none());
        assert!(!form.is_submitting());
        assert_eq!(form.error(TodoField::Title), Some("Title is required"));
        assert_eq!(form.error(TodoField::DueDate), Some("Due date cannot be in the past"));
        assert_eq!(form.error(TodoField::Priority), Some("Priority must be low, medium, or high"));
        assert!(form.error(TodoField::Description).is_none());
        assert!(form.is_touched(TodoField::Description));
    }

    #[test]
    fn test_submit_returns_sanitized_output() {
        let mut form = todo_form();
        form.set_value(TodoField::Title, "  <i>Call</i> mom ");
        form.set_value(TodoField::Description, "   ");
        form.set_value(TodoField::DueDate, "2026-10-19");

        let input = form.begin_submit().expect("valid form");
        assert_eq!(input.title, "iCall/i mom");
        assert_eq!(input.description, None);
        assert_eq!(input.due_date, Some(today()));
        assert_eq!(input.priority, Priority::Medium);
        assert!(form.is_submitting());

        // A second submit while in flight is ignored
        assert!(form.begin_submit().is_none());
        form.finish_submit();
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_title_of_only_brackets_is_rejected() {
        let mut form = todo_form();
        form.set_value(TodoField::Title, "<>");
        assert!(form.begin_submit().is_none());
        assert_eq!(form.error(TodoField::Title), Some("Title is required"));
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut form = todo_form();
        form.set_value(TodoField::Title, "Something");
        form.set_value(TodoField::Priority, "high");
        form.touch(TodoField::DueDate);
        form.reset();
        assert_eq!(form.value(TodoField::Title), "");
        assert_eq!(form.value(TodoField::Priority), "medium");
        assert!(!form.is_touched(TodoField::DueDate));
    }

    #[test]
    fn test_edit_schema_allows_past_due_date() {
        let mut values = blank_todo_values();
        values.insert(TodoField::Title, "Overdue thing".into());
        values.insert(TodoField::DueDate, "2026-09-01".into());
        let mut form = FormState::new(EditTodoSchema { today: today() }, values);
        let patch = form.begin_submit().expect("past date allowed").into_patch();
        assert_eq!(patch.due_date, Some(NaiveDate::from_ymd_opt(2026, 9, 1)));
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.completed, None);
    }

    #[test]
    fn test_sign_up_and_sign_in_differ_on_password() {
        let values = HashMap::from([
            (AuthField::Email, "ada@example.com".to_string()),
            (AuthField::Password, "weak".to_string()),
        ]);
        assert!(AuthSchema::SignIn.parse(&values).is_ok());
        let errors = AuthSchema::SignUp.parse(&values).unwrap_err();
        assert_eq!(
            errors.get(&AuthField::Password).map(String::as_str),
            Some("Password must be at least 6 characters")
        );
        assert!(!errors.contains_key(&AuthField::Email));
    }

    #[test]
    fn test_switching_schema_rechecks_touched_fields() {
        let mut form = FormState::new(AuthSchema::SignIn, blank_auth_values());
        form.set_value(AuthField::Password, "weak");
        form.touch(AuthField::Password);
        assert!(form.error(AuthField::Password).is_none());

        form.set_schema(AuthSchema::SignUp);
        assert_eq!(form.error(AuthField::Password), Some("Password must be at least 6 characters"));
        // Untouched fields stay quiet
        assert!(form.error(AuthField::Email).is_none());

        form.set_schema(AuthSchema::SignIn);
        assert!(!form.has_errors());
    }
}
