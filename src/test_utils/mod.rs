#![allow(missing_docs)]

use rusqlite::Connection;

use crate::{AppState, transaction::GatewayConfig};

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use form::{
    assert_form_input, assert_form_input_with_value, assert_form_submit_button_with_text,
    assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::{assert_content_type, assert_hx_redirect, assert_status_ok, get_header};

/// An app in local mode over a fresh in-memory store, using UTC as the local time.
pub(crate) fn get_test_app_state() -> AppState {
    let conn = Connection::open_in_memory().unwrap();

    AppState::new(conn, "Etc/UTC", GatewayConfig::default()).unwrap()
}
