//! The examination system's route table.
//!
//! Registration order matters for placeholder routes (first match wins), so
//! routes are listed in the order the application has always registered them.
//! Literal routes such as `/admin/subjects/search` still win over an earlier
//! `/admin/subjects/{id}` because exact lookup runs first.

use crate::routing::{Method, RouterBuilder};

/// Register every application route on `builder`.
///
/// `base_path` is the mount directory used to build absolute links ("" when
/// mounted at the root).
pub fn register_routes(builder: &mut RouterBuilder, base_path: &str) {
    use Method::{Get, Post};

    builder.get("/", |_, out| {
        out.redirect("/login")?;
        Ok(None)
    });

    builder
        .register(Get, "/login", "AuthController@showLogin")
        .register(Post, "/api/auth/login", "AuthController@login")
        .register(Post, "/api/auth/logout", "AuthController@logout")
        .register(Get, "/logout", "AuthController@logout");

    // Dashboards
    builder
        .register(Get, "/admin/dashboard", "AdminController@dashboard")
        .register(Get, "/admin/logout", "AdminController@logout")
        .register(Get, "/faculty/dashboard", "FacultyController@dashboard")
        .register(Get, "/faculty/logout", "FacultyController@logout");

    let login_link = format!("{base_path}/login");
    builder.get("/student-success", move |_, out| {
        out.write("<h1>Student Login Successful!</h1>")
            .write("<p>Welcome Student! You have successfully logged in.</p>")
            .write(&format!("<p><a href=\"{login_link}\">Back to Login</a></p>"));
        Ok(None)
    });

    // User management
    builder
        .register(Post, "/admin/users/add", "AdminController@addUser")
        .register(Post, "/admin/users/add-student", "AdminController@addStudent")
        .register(Post, "/admin/users/edit-student", "AdminController@editStudent")
        .register(Post, "/admin/users/edit/{id}", "AdminController@editUser")
        .register(Post, "/admin/users/delete-student", "AdminController@deleteStudent")
        .register(Post, "/admin/users/add-faculty", "AdminController@addFaculty")
        .register(Post, "/admin/users/edit-faculty", "AdminController@editFaculty")
        .register(Post, "/admin/users/delete-faculty", "AdminController@deleteFaculty")
        .register(Post, "/admin/users/delete/{id}", "AdminController@deleteUser");

    // Subjects (AJAX)
    builder
        .register(Post, "/admin/subjects/add", "SubjectController@addSubject")
        .register(Post, "/admin/subjects/edit", "SubjectController@editSubject")
        .register(Post, "/admin/subjects/delete", "SubjectController@deleteSubject")
        .register(Get, "/admin/subjects/{id}", "SubjectController@getSubject")
        .register(Get, "/admin/subjects/search", "SubjectController@searchSubjects")
        .register(
            Get,
            "/admin/subjects/filter/year-level",
            "SubjectController@getSubjectsByYearLevel",
        )
        .register(
            Get,
            "/admin/subjects/filter/semester",
            "SubjectController@getSubjectsBySemester",
        )
        .register(Get, "/admin/subjects/refresh", "SubjectController@refreshSubjects");

    // Faculty-subject assignments (AJAX)
    builder
        .register(Post, "/admin/assignments/add", "AssignmentController@addAssignment")
        .register(Post, "/admin/assignments/edit", "AssignmentController@editAssignment")
        .register(Post, "/admin/assignments/delete", "AssignmentController@deleteAssignment")
        .register(Get, "/admin/assignments/{id}", "AssignmentController@getAssignment")
        .register(
            Get,
            "/admin/assignments/filter",
            "AssignmentController@getAssignmentsByFilters",
        )
        .register(
            Get,
            "/admin/assignments/workload",
            "AssignmentController@getFacultyWorkload",
        )
        .register(
            Get,
            "/admin/assignments/unassigned",
            "AssignmentController@getUnassignedSubjects",
        )
        .register(
            Get,
            "/admin/assignments/refresh",
            "AssignmentController@refreshAssignments",
        )
        .register(Get, "/admin/assignments/stats", "AssignmentController@getAssignmentStats");
}
