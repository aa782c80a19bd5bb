//! Named controller actions.
//!
//! The controllers (sessions, database access, views) live outside this
//! crate. This registry binds every action the route table names so the
//! table resolves in strict mode; each binding answers 501 with a JSON body
//! until a deployment replaces it with the real action.

use axum::http::StatusCode;

use crate::routing::{HandlerRegistry, HandlerResult, Output, Params};

/// Every `Controller@action` the route table refers to.
pub const ACTIONS: &[&str] = &[
    "AuthController@showLogin",
    "AuthController@login",
    "AuthController@logout",
    "AdminController@dashboard",
    "AdminController@logout",
    "AdminController@addUser",
    "AdminController@addStudent",
    "AdminController@editStudent",
    "AdminController@editUser",
    "AdminController@deleteStudent",
    "AdminController@addFaculty",
    "AdminController@editFaculty",
    "AdminController@deleteFaculty",
    "AdminController@deleteUser",
    "FacultyController@dashboard",
    "FacultyController@logout",
    "SubjectController@addSubject",
    "SubjectController@editSubject",
    "SubjectController@deleteSubject",
    "SubjectController@getSubject",
    "SubjectController@searchSubjects",
    "SubjectController@getSubjectsByYearLevel",
    "SubjectController@getSubjectsBySemester",
    "SubjectController@refreshSubjects",
    "AssignmentController@addAssignment",
    "AssignmentController@editAssignment",
    "AssignmentController@deleteAssignment",
    "AssignmentController@getAssignment",
    "AssignmentController@getAssignmentsByFilters",
    "AssignmentController@getFacultyWorkload",
    "AssignmentController@getUnassignedSubjects",
    "AssignmentController@refreshAssignments",
    "AssignmentController@getAssignmentStats",
];

fn unavailable(reference: &'static str) -> impl Fn(&Params, &mut Output) -> HandlerResult {
    move |params, out| {
        let body = serde_json::json!({
            "status": "error",
            "message": format!("{reference} is not available in this deployment."),
            "action": reference,
            "params": &**params,
        });
        out.set_status(StatusCode::NOT_IMPLEMENTED)
            .set_content_type("application/json")
            .write(&body.to_string());
        Ok(None)
    }
}

/// Registry with a placeholder bound to every action in [`ACTIONS`].
pub fn registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    for &reference in ACTIONS {
        if let Err(e) = registry.insert(reference, unavailable(reference)) {
            tracing::error!(error = %e, "Skipping controller action");
        }
    }
    registry
}
