use crate::config::Configuration;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except the RFC 3986 unreserved characters gets escaped,
/// including the `!*'()` that form encoders usually leave alone.
const NOT_UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Wrap an encoded request document into the form body the service reads:
/// `id=<account>&xml=<escaped document>&respond=XML`.
pub fn frame_request(xml: &str, config: &Configuration) -> String {
    format!(
        "id={}&xml={}&respond=XML",
        config.account_id,
        utf8_percent_encode(xml, NOT_UNRESERVED)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xml_param(body: &str) -> &str {
        let start = body.find("&xml=").unwrap() + "&xml=".len();
        let end = body.rfind("&respond=XML").unwrap();
        &body[start..end]
    }

    #[test]
    fn body_layout() {
        let cfg = Configuration::default().with_account_id("6666");
        assert_eq!(frame_request("<a/>", &cfg), "id=6666&xml=%3Ca%2F%3E&respond=XML");
    }

    #[test]
    fn reserved_marks_are_escaped() {
        let body = frame_request("!*'() ~-_.", &Configuration::default());
        assert_eq!(xml_param(&body), "%21%2A%27%28%29%20~-_.");
    }

    #[test]
    fn non_ascii_is_escaped_as_utf8() {
        let body = frame_request("é", &Configuration::default());
        assert_eq!(xml_param(&body), "%C3%A9");
    }

    #[test]
    fn no_reserved_character_survives_in_xml_value() {
        let xml = "<?xml version=\"1.0\"?>\n<A b='1'>x & y; 50% #tag +1 (555) [q] {r} @s $t ^u |v \\w `z` ,!*</A>";
        let body = frame_request(xml, &Configuration::default());
        let value = xml_param(&body);
        for c in value.chars() {
            assert!(
                c.is_ascii_alphanumeric() || "-_.~%".contains(c),
                "unescaped {c:?} in {value}"
            );
        }
    }
}
