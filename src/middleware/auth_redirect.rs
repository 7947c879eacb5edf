use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

/// Send browsers without a valid session to the login page instead of a JSON 401,
/// remembering where they were headed for GET requests.
pub async fn redirect_unauthorized(req: Request, next: Next) -> Response {
    let return_to = (req.method() == axum::http::Method::GET)
        .then(|| req.uri().path_and_query().map(|pq| pq.as_str().to_string()))
        .flatten();

    let response = next.run(req).await;
    if response.status() != StatusCode::UNAUTHORIZED {
        return response;
    }

    match return_to {
        Some(path) => {
            let query: String = form_urlencoded::Serializer::new(String::new())
                .append_pair("return_to", &path)
                .finish();
            Redirect::to(&format!("/auth/login?{query}")).into_response()
        }
        None => Redirect::to("/auth/login").into_response(),
    }
}

/// Only same-site absolute paths are accepted as post-login destinations.
pub fn safe_return_path(candidate: Option<&str>) -> &str {
    match candidate {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path
        }
        _ => "/admin/reports",
    }
}
