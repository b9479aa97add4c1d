//! Resource routes grouped by family. Collection paths also answer with a trailing slash.

use crate::handlers::{book, curriculum, lookup, people, study_time, subject};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, MethodRouter},
    Router,
};

/// Register `path` and `path/` with the same handlers.
fn both(router: Router<AppState>, path: &str, methods: MethodRouter<AppState>) -> Router<AppState> {
    router.route(path, methods.clone()).route(&format!("{}/", path), methods)
}

fn subject_routes(router: Router<AppState>) -> Router<AppState> {
    let router = both(
        router,
        "/subjects",
        get(subject::list_subjects).post(subject::create_subject),
    );
    let router = both(
        router,
        "/subjects/:id",
        get(subject::get_subject)
            .put(subject::update_subject)
            .delete(subject::delete_subject),
    );
    let router = both(
        router,
        "/subjects/:id/times",
        get(study_time::list_study_times).post(study_time::create_study_time),
    );
    router.route(
        "/subjects/:id/times/:time_id",
        get(study_time::get_study_time)
            .put(study_time::update_study_time)
            .delete(study_time::delete_study_time),
    )
}

fn people_routes(router: Router<AppState>) -> Router<AppState> {
    let router = both(
        router,
        "/students",
        get(people::list_students).post(people::create_student),
    );
    let router = router.route(
        "/students/:id",
        get(people::get_student)
            .put(people::update_student)
            .delete(people::delete_student),
    );
    let router = both(
        router,
        "/teachers",
        get(people::list_teachers).post(people::create_teacher),
    );
    router.route(
        "/teachers/:id",
        get(people::get_teacher)
            .put(people::update_teacher)
            .delete(people::delete_teacher),
    )
}

fn lookup_routes(router: Router<AppState>) -> Router<AppState> {
    let router = both(router, "/majors", get(lookup::list_majors).post(lookup::create_major));
    let router = both(router, "/faculties", get(lookup::list_faculties).post(lookup::create_faculty));
    let router = both(router, "/degrees", get(lookup::list_degrees).post(lookup::create_degree));
    let router = both(router, "/positions", get(lookup::list_positions).post(lookup::create_position));
    let router = both(router, "/statuses", get(lookup::list_statuses).post(lookup::create_status));
    let router = both(router, "/genders", get(lookup::list_genders));
    let router = both(
        router,
        "/curriculums",
        get(curriculum::list_curriculums).post(curriculum::create_curriculum),
    );
    router.route("/admin/:id", get(lookup::get_admin))
}

/// Uploads over the limit fail while the multipart body is read, so they surface as 400 like any malformed upload.
fn book_routes(max_upload_bytes: usize) -> Router<AppState> {
    let router = both(Router::new(), "/books", get(book::list_books).post(book::upload_book));
    router
        .route("/books/upload", post(book::upload_book))
        .route("/books/:filename", get(book::show_book_file))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

pub fn resource_routes(state: AppState) -> Router {
    let max_upload_bytes = state.book_files.max_upload_bytes();
    let router = subject_routes(Router::new());
    let router = people_routes(router);
    let router = lookup_routes(router);
    router.merge(book_routes(max_upload_bytes)).with_state(state)
}
