use axum::{http::StatusCode, response::Response};

#[track_caller]
pub(crate) fn assert_status_ok(response: &Response) {
    assert_eq!(response.status(), StatusCode::OK, "want 200 OK");
}

/// The value of `name`, panicking if the header is missing or not ASCII.
#[track_caller]
pub(crate) fn get_header(response: &Response, name: &str) -> String {
    let Some(value) = response.headers().get(name) else {
        panic!("want a {name} header, got {:?}", response.headers());
    };

    value.to_str().unwrap().to_owned()
}

#[track_caller]
pub(crate) fn assert_content_type(response: &Response, content_type: &str) {
    assert_eq!(get_header(response, "content-type"), content_type);
}

/// Assert that an htmx form submission was answered with a redirect to `url`.
#[track_caller]
pub(crate) fn assert_hx_redirect(response: &Response, url: &str) {
    assert_eq!(get_header(response, "hx-redirect"), url);
}
