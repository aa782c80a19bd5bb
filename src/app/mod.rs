//! Application bootstrap: the examination system's routes and actions.

pub mod controllers;
pub mod routes;

use crate::config::AppConfig;
use crate::routing::{RouteError, Router};

/// Build the application's route table for a configuration.
pub fn build_router(config: &AppConfig) -> Result<Router, RouteError> {
    let mut builder = Router::builder()
        .with_registry(controllers::registry())
        .strict(config.routing.strict_handlers);
    routes::register_routes(&mut builder, config.mount.base_path());
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{Method, RequestDescriptor};
    use axum::http::{header, StatusCode};

    fn router() -> Router {
        build_router(&AppConfig::default()).unwrap()
    }

    #[test]
    fn test_route_table_builds_strict() {
        let router = router();
        assert_eq!(router.len(), 36);
    }

    #[test]
    fn test_subject_search_is_not_shadowed_by_id() {
        let router = router();

        let search = router.resolve(Method::Get, "/admin/subjects/search").unwrap();
        assert_eq!(search.handler(), "SubjectController@searchSubjects");

        let by_id = router.resolve(Method::Get, "/admin/subjects/17").unwrap();
        assert_eq!(by_id.handler(), "SubjectController@getSubject");
        assert_eq!(&*by_id.params, ["17".to_string()]);
    }

    #[test]
    fn test_root_redirects_to_login() {
        let out = router()
            .dispatch(&RequestDescriptor::new(axum::http::Method::GET, "/"))
            .unwrap();
        assert_eq!(out.status(), StatusCode::FOUND);
        assert_eq!(out.headers().get(header::LOCATION).unwrap(), "/login");
    }

    #[test]
    fn test_student_success_links_under_mount() {
        let mut config = AppConfig::default();
        config.mount.script_name = "/exam/public/index.php".into();
        let router = build_router(&config).unwrap();

        let request = RequestDescriptor::new(axum::http::Method::GET, "/exam/public/student-success")
            .mounted_at(&config.mount.script_name);
        let out = router.dispatch(&request).unwrap();
        assert!(out.body().contains("href=\"/exam/public/login\""));
    }

    #[test]
    fn test_delete_user_takes_id() {
        let router = router();
        let matched = router.resolve(Method::Post, "/admin/users/delete/9").unwrap();
        assert_eq!(matched.handler(), "AdminController@deleteUser");
        assert_eq!(&*matched.params, ["9".to_string()]);
    }
}
