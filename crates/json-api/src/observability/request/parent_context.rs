//! Parent trace context extraction from HTTP headers.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{HeaderMap, HeaderName};

pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    let extractor = HeaderExtractor { headers };

    global::get_text_map_propagator(|propagator| {
        // Start from an empty context so requests without trace headers do not
        // attach to whatever span is active in-process.
        let context = propagator.extract_with_context(&Context::new(), &extractor);

        context
            .span()
            .span_context()
            .is_valid()
            .then(|| context.clone())
    })
}

#[derive(Debug)]
struct HeaderExtractor<'a> {
    headers: &'a HeaderMap,
}

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.headers.get(key)?.to_str().ok()
    }

    fn keys(&self) -> Vec<&str> {
        self.headers.keys().map(HeaderName::as_str).collect()
    }
}
