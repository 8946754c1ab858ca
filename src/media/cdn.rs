//! CDN delivery-URL rewrite.

use url::Url;

/// Host suffix of the image CDN that understands transformation directives.
const CDN_HOST: &str = "res.cloudinary.com";

/// Delivery segment the transformation directive is inserted after.
const DELIVERY_SEGMENT: &str = "/upload/";

/// Rewrite a media URL for responsive delivery at the given width.
///
/// Inserts `f_auto,q_auto,w_{width}` directly after the single `/upload/`
/// path segment of a CDN-hosted URL. Anything else — a different host, a
/// path without exactly one delivery segment, or a string that does not
/// parse as a URL — is returned unchanged.
pub fn rewrite_for_width(url: &str, width: u32) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    match parsed.host_str() {
        Some(host) if host.ends_with(CDN_HOST) => {}
        _ => return url.to_string(),
    }

    let path = parsed.path().to_string();
    let parts: Vec<&str> = path.split(DELIVERY_SEGMENT).collect();
    if parts.len() != 2 {
        return url.to_string();
    }

    let rewritten = format!(
        "{}{}f_auto,q_auto,w_{}/{}",
        parts[0], DELIVERY_SEGMENT, width, parts[1]
    );
    parsed.set_path(&rewritten);
    parsed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_inserts_transform_after_upload_segment() {
        let out = rewrite_for_width("https://res.cloudinary.com/demo/image/upload/v1/pic.jpg", 800);
        assert_eq!(
            out,
            "https://res.cloudinary.com/demo/image/upload/f_auto,q_auto,w_800/v1/pic.jpg"
        );
        assert_eq!(out.matches("f_auto").count(), 1);
    }

    #[test]
    fn test_rewrite_ignores_other_hosts() {
        let url = "https://cdn.example/upload/abc/pic.jpg";
        assert_eq!(rewrite_for_width(url, 800), url);
    }

    #[test]
    fn test_rewrite_requires_exactly_one_delivery_segment() {
        let url = "https://res.cloudinary.com/demo/image/raw/pic.jpg";
        assert_eq!(rewrite_for_width(url, 400), url);

        let doubled = "https://res.cloudinary.com/a/upload/b/upload/c.jpg";
        assert_eq!(rewrite_for_width(doubled, 400), doubled);
    }

    #[test]
    fn test_rewrite_returns_malformed_input_unchanged() {
        assert_eq!(rewrite_for_width("not a url", 800), "not a url");
        assert_eq!(rewrite_for_width("", 800), "");
    }
}
