#[derive(serde::Serialize, Clone, Debug)]
pub struct Request<'a> {
    pub inputs: &'a str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub score: f64,
}

/// The response shapes the inference API is known to produce for text classification.
///
/// The shape is decided by the top-level value and, for lists, by the first element alone.
#[derive(Clone, Debug)]
pub enum Response {
    /// `[[{"label": ..., "score": ...}, ...], ...]`, holding only the first inner list.
    Nested(Vec<Prediction>),

    /// `[{"label": ..., "score": ...}, ...]`
    Flat(Vec<Prediction>),

    /// `{"joy": 0.8, "sadness": 0.01, ...}`
    Mapping(indexmap::IndexMap<String, f64>),
}

fn label_of(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        v => v.to_string(),
    }
}

fn score_of(v: &serde_json::Value) -> Option<f64> {
    match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// Items that are not objects, or whose score is not numeric, are skipped.
fn collect(items: Vec<serde_json::Value>) -> Vec<Prediction> {
    items
        .into_iter()
        .filter_map(|item| {
            let record = item.as_object()?;
            let score = match record.get("score") {
                Some(v) => score_of(v)?,
                None => 0.0,
            };
            Some(Prediction {
                label: record.get("label").map(label_of).unwrap_or_default(),
                score,
            })
        })
        .collect()
}

impl TryFrom<serde_json::Value> for Response {
    type Error = String;

    fn try_from(v: serde_json::Value) -> Result<Self, Self::Error> {
        match v {
            serde_json::Value::Array(mut items) => {
                // Only one input is ever sent, so only the first inner list matters.
                if let Some(serde_json::Value::Array(inner)) = items.first_mut() {
                    return Ok(Response::Nested(collect(std::mem::take(inner))));
                }
                Ok(Response::Flat(collect(items)))
            }
            serde_json::Value::Object(scores) => scores
                .into_iter()
                .map(|(label, v)| {
                    let score = score_of(&v).ok_or_else(|| format!("non-numeric score for {:?}: {}", label, v))?;
                    Ok((label, score))
                })
                .collect::<Result<_, _>>()
                .map(Response::Mapping),
            v => Err(format!("expected a list or an object, got {}", v)),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Response {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
        Response::try_from(v).map_err(serde::de::Error::custom)
    }
}

impl Response {
    /// Flattens any shape into the predictions for a single input, keeping the provider's order.
    pub fn into_predictions(self) -> Vec<Prediction> {
        match self {
            Response::Nested(predictions) | Response::Flat(predictions) => predictions,
            Response::Mapping(scores) => scores.into_iter().map(|(label, score)| Prediction { label, score }).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Vec<Prediction> {
        serde_json::from_str::<Response>(body).unwrap().into_predictions()
    }

    fn p(label: &str, score: f64) -> Prediction {
        Prediction {
            label: label.to_owned(),
            score,
        }
    }

    #[test]
    fn test_request_body() {
        let body = serde_json::to_value(Request { inputs: "I love this" }).unwrap();
        assert_eq!(body, serde_json::json!({"inputs": "I love this"}));
    }

    #[test]
    fn test_nested_takes_first_inner_list() {
        assert_eq!(parse(r#"[[{"label":"fear","score":1.0}]]"#), vec![p("fear", 1.0)]);
        assert_eq!(
            parse(r#"[[{"label":"fear","score":0.6}],[{"label":"joy","score":0.9}]]"#),
            vec![p("fear", 0.6)]
        );
    }

    #[test]
    fn test_flat() {
        assert_eq!(
            parse(r#"[{"label":"joy","score":0.7},{"label":"sadness","score":0.3}]"#),
            vec![p("joy", 0.7), p("sadness", 0.3)]
        );
    }

    #[test]
    fn test_mapping_matches_flat() {
        assert_eq!(
            parse(r#"{"joy":0.7,"sadness":0.3}"#),
            parse(r#"[{"label":"joy","score":0.7},{"label":"sadness","score":0.3}]"#)
        );
    }

    #[test]
    fn test_flat_skips_non_records_and_defaults_fields() {
        assert_eq!(
            parse(r#"[{"label":"joy"}, 3, "x", {"score":0.2}]"#),
            vec![p("joy", 0.0), p("", 0.2)]
        );
    }

    #[test]
    fn test_first_element_decides_nesting() {
        assert_eq!(
            parse(r#"[[{"label":"fear","score":1.0}], {"label":"joy","score":1.0}]"#),
            vec![p("fear", 1.0)]
        );
        // A list whose first element is a record is flat; inner lists are not records.
        assert_eq!(
            parse(r#"[{"label":"joy","score":0.4}, [{"label":"fear","score":1.0}]]"#),
            vec![p("joy", 0.4)]
        );
    }

    #[test]
    fn test_positional_arrays_are_not_records() {
        assert_eq!(parse(r#"[["joy", 0.9], 3]"#), vec![]);
        assert_eq!(parse(r#"[[["joy", 0.9]]]"#), vec![]);
    }

    #[test]
    fn test_non_string_labels_are_stringified() {
        assert_eq!(
            parse(r#"[{"label":5,"score":0.3},{"label":true,"score":0.1},{"label":null,"score":0.2}]"#),
            vec![p("5", 0.3), p("true", 0.1), p("", 0.2)]
        );
    }

    #[test]
    fn test_numeric_string_scores() {
        assert_eq!(parse(r#"[{"label":"joy","score":"0.5"},{"label":"fear","score":"lots"}]"#), vec![p("joy", 0.5)]);
        assert_eq!(parse(r#"{"joy":"0.7"}"#), vec![p("joy", 0.7)]);
    }

    #[test]
    fn test_mapping_keeps_provider_order() {
        assert_eq!(
            parse(r#"{"sadness":0.3,"anger":0.2,"joy":0.5}"#),
            vec![p("sadness", 0.3), p("anger", 0.2), p("joy", 0.5)]
        );
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(parse("[]"), vec![]);
        assert_eq!(parse("[[]]"), vec![]);
    }

    #[test]
    fn test_unrecognized_shapes() {
        assert!(serde_json::from_str::<Response>("42").is_err());
        assert!(serde_json::from_str::<Response>(r#""joy""#).is_err());
        assert!(serde_json::from_str::<Response>("null").is_err());
        assert!(serde_json::from_str::<Response>(r#"{"error":"Model is loading"}"#).is_err());
    }
}
