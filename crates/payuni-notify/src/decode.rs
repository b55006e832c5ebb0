use std::collections::HashMap;

use url::form_urlencoded;

/// Decode a decrypted notify plaintext (`key=value&key=value`, standard
/// percent-encoding) into a field map.
///
/// Duplicate keys follow query-string semantics: the last occurrence wins.
/// Empty input decodes to an empty map, not an error.
pub fn decode_notify_fields(plaintext: &str) -> HashMap<String, String> {
    form_urlencoded::parse(plaintext.as_bytes())
        .into_owned()
        .collect()
}

/// Re-encode a field map into query-string form.
///
/// Used for building fixtures and outbound payloads; decode of an encoded
/// map yields the map back.
pub fn encode_notify_fields(fields: &HashMap<String, String>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in fields {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}
