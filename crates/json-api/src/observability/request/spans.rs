//! HTTP span helpers.

use uuid::Uuid;

/// Span name of the form `METHOD /path`, with UUID segments collapsed so
/// every wallet shares one name.
pub(super) fn request_span_name(method: &str, path: &str) -> String {
    format!("{method} {}", normalise_path_for_span_name(path))
}

fn normalise_path_for_span_name(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
