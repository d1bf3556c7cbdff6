use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Result, WithingsError};
use crate::http::HttpResponse;

/// Raw JSON object returned by the API once the envelope is removed
pub type RawResponse = Map<String, Value>;

/// Results holds either one typed instance or an ordered list of them.
#[derive(Debug, Clone, PartialEq)]
pub enum Results<T> {
    /// Built from the whole response, no unwrap key was requested
    Single(T),
    /// One instance per element found under the unwrap key
    Many(Vec<T>),
}

impl<T> Results<T> {
    /// Number of instances held
    pub fn len(&self) -> usize {
        match self {
            Results::Single(_) => 1,
            Results::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Results::Single(_))
    }

    /// Flatten into a list; a single instance becomes a one-element list
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Results::Single(item) => vec![item],
            Results::Many(items) => items,
        }
    }

    /// Take the single instance, or the only element of a one-element list
    pub fn into_single(self) -> Result<T> {
        match self {
            Results::Single(item) => Ok(item),
            Results::Many(items) => {
                let mut items = items.into_iter();
                match (items.next(), items.next()) {
                    (Some(item), None) => Ok(item),
                    (None, _) => Err(WithingsError::UnexpectedResponse {
                        key: String::new(),
                        expected: "a single object",
                        found: "an empty list",
                    }),
                    (Some(_), Some(_)) => Err(WithingsError::UnexpectedResponse {
                        key: String::new(),
                        expected: "a single object",
                        found: "a list",
                    }),
                }
            }
        }
    }
}

impl<T> IntoIterator for Results<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

/// Map a raw response into typed results.
///
/// * no unwrap key: one instance from the whole response
/// * unwrap key present: one instance per array element, in order
/// * unwrap key missing from the response: the whole response as a one-element list
pub fn map_results<T>(raw: RawResponse, unwrap_key: Option<&str>) -> Result<Results<T>>
where
    T: DeserializeOwned,
{
    let key = match unwrap_key {
        None => return Ok(Results::Single(serde_json::from_value(Value::Object(raw))?)),
        Some(key) => key,
    };

    let mut raw = raw;
    match raw.remove(key) {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(_) => serde_json::from_value(item).map_err(WithingsError::from),
                other => Err(WithingsError::UnexpectedResponse {
                    key: key.to_string(),
                    expected: "an array of objects",
                    found: json_kind(&other),
                }),
            })
            .collect::<Result<Vec<T>>>()
            .map(Results::Many),
        Some(other) => Err(WithingsError::UnexpectedResponse {
            key: key.to_string(),
            expected: "an array of objects",
            found: json_kind(&other),
        }),
        None => Ok(Results::Many(vec![serde_json::from_value(Value::Object(raw))?])),
    }
}

/// Envelope wrapping every API answer: `{"status": 0, "body": {...}}`
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub status: i64,
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Parse an HTTP response and strip the API envelope
pub fn parse_envelope(response: &HttpResponse) -> Result<RawResponse> {
    let value: Value = match serde_json::from_slice(&response.body) {
        Ok(value) => value,
        Err(_) if !response.is_success() => {
            return Err(WithingsError::Http {
                status: response.status,
                body: response.text(),
            })
        }
        Err(e) => return Err(WithingsError::Json(e)),
    };

    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(WithingsError::UnexpectedResponse {
                key: "body".to_string(),
                expected: "a JSON object",
                found: json_kind(&other),
            })
        }
    };

    // Objects without a status field are not enveloped
    if !object.contains_key("status") {
        if !response.is_success() {
            return Err(WithingsError::Http {
                status: response.status,
                body: response.text(),
            });
        }
        return Ok(object);
    }

    let envelope: Envelope = serde_json::from_value(Value::Object(object.clone()))?;
    if envelope.status != 0 {
        return Err(match envelope.error {
            Some(message) => WithingsError::Api {
                status: envelope.status,
                message,
            },
            None => WithingsError::from_status(envelope.status),
        });
    }
    if !response.is_success() {
        return Err(WithingsError::Http {
            status: response.status,
            body: response.text(),
        });
    }

    match envelope.body {
        Some(Value::Object(body)) => Ok(body),
        // Acknowledgements carry no body; the envelope itself is the result
        None | Some(Value::Null) => Ok(object),
        Some(other) => Err(WithingsError::UnexpectedResponse {
            key: "body".to_string(),
            expected: "a JSON object",
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    fn raw(value: Value) -> RawResponse {
        match value {
            Value::Object(map) => map,
            _ => panic!("test fixture must be an object"),
        }
    }

    #[test]
    fn test_map_results_unwraps_in_order() {
        let results: Results<Item> = map_results(
            raw(json!({"activities": [{"id": 1}, {"id": 2}]})),
            Some("activities"),
        )
        .unwrap();

        assert_eq!(results, Results::Many(vec![Item { id: 1 }, Item { id: 2 }]));
    }

    #[test]
    fn test_map_results_missing_key_falls_back() {
        let results: Results<Item> = map_results(raw(json!({"id": 42})), Some("series")).unwrap();
        assert_eq!(results, Results::Many(vec![Item { id: 42 }]));
    }

    #[test]
    fn test_map_results_without_key_is_single() {
        let results: Results<Item> =
            map_results(raw(json!({"id": 7, "series": [{"id": 1}]})), None).unwrap();
        assert_eq!(results, Results::Single(Item { id: 7 }));
    }

    #[test]
    fn test_map_results_empty_list() {
        let results: Results<Item> = map_results(raw(json!({"series": []})), Some("series")).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_map_results_rejects_non_array() {
        let result: Result<Results<Item>> =
            map_results(raw(json!({"series": {"id": 1}})), Some("series"));
        match result {
            Err(WithingsError::UnexpectedResponse { key, found, .. }) => {
                assert_eq!(key, "series");
                assert_eq!(found, "an object");
            }
            other => panic!("expected UnexpectedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_into_single() {
        assert_eq!(Results::Single(1).into_single().unwrap(), 1);
        assert_eq!(Results::Many(vec![2]).into_single().unwrap(), 2);
        assert!(Results::Many(vec![1, 2]).into_single().is_err());
    }

    #[test]
    fn test_parse_envelope_body() {
        let response = HttpResponse {
            status: 200,
            body: br#"{"status": 0, "body": {"measuregrps": []}}"#.to_vec(),
        };
        let body = parse_envelope(&response).unwrap();
        assert!(body.contains_key("measuregrps"));
    }

    #[test]
    fn test_parse_envelope_without_body() {
        let response = HttpResponse {
            status: 200,
            body: br#"{"status": 0}"#.to_vec(),
        };
        let body = parse_envelope(&response).unwrap();
        assert_eq!(body.get("status"), Some(&json!(0)));
    }

    #[test]
    fn test_parse_envelope_error_status() {
        let response = HttpResponse {
            status: 200,
            body: br#"{"status": 342}"#.to_vec(),
        };
        let error = parse_envelope(&response).unwrap_err();
        assert_eq!(error.api_status(), Some(342));
    }

    #[test]
    fn test_parse_envelope_http_error() {
        let response = HttpResponse {
            status: 502,
            body: b"<html>bad gateway</html>".to_vec(),
        };
        match parse_envelope(&response) {
            Err(WithingsError::Http { status, body }) => {
                assert_eq!(status, 502);
                assert!(body.contains("bad gateway"));
            }
            other => panic!("expected WithingsError::Http, got {:?}", other),
        }
    }
}
