use axum::response::Response;
use scraper::Html;

/// The body of `response` as text.
pub(crate) async fn response_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    String::from_utf8_lossy(&bytes).into_owned()
}

/// Parse a full page such as the ledger or the settings page.
pub(crate) async fn parse_html_document(response: Response) -> Html {
    Html::parse_document(&response_text(response).await)
}

/// Parse an htmx partial such as an alert or the sub category picker.
pub(crate) async fn parse_html_fragment(response: Response) -> Html {
    Html::parse_fragment(&response_text(response).await)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(html.errors.is_empty(), "want valid HTML, got errors {:?}", html.errors);
}
