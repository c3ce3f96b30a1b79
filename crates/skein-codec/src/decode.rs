//! Decoding storylet records from relaxed JSON.
//!
//! Records arrive as `{ type, properties }` nodes for every prerequisite
//! and effect, with the discriminator string selecting the variant. The
//! decoder walks the parsed document by hand: object keys are matched
//! case-insensitively (exact matches win over case-folded ones), required
//! properties are checked explicitly, and any failure rejects the whole
//! record.

use serde_json::{Map, Value};

use skein_core::storylet::DEFAULT_PRIORITY;
use skein_core::{Attribute, CompoundLogic, Effect, Prerequisite, Storylet, StoryletOption};

use crate::error::{CodecResult, DecodeError};
use crate::relaxed;

/// Decode one storylet record from relaxed JSON source.
pub fn decode_storylet(source: &str) -> CodecResult<Storylet> {
    let cleaned = relaxed::strip(source);
    let value: Value = serde_json::from_str(&cleaned)?;
    storylet_from_value(&value)
}

fn storylet_from_value(value: &Value) -> CodecResult<Storylet> {
    let object = as_object(value, "storylet")?;
    Ok(Storylet {
        id: string_or_default(object, "storylet", "id")?,
        title: string_or_default(object, "storylet", "title")?,
        description: string_or_default(object, "storylet", "description")?,
        content: string_or_default(object, "storylet", "content")?,
        prerequisites: prerequisite_list(object, "storylet", "prerequisites")?,
        effects: effect_list(object, "storylet", "effects")?,
        priority: opt_i32(object, "storylet", "priority")?.unwrap_or(DEFAULT_PRIORITY),
        category: string_or_default(object, "storylet", "category")?,
        tags: string_list(object, "storylet", "tags")?,
        options: option_list(object)?,
    })
}

fn option_from_value(value: &Value) -> CodecResult<StoryletOption> {
    let object = as_object(value, "option")?;
    Ok(StoryletOption {
        id: string_or_default(object, "option", "id")?,
        text: string_or_default(object, "option", "text")?,
        description: string_or_default(object, "option", "description")?,
        result_text: string_or_default(object, "option", "resultText")?,
        prerequisites: prerequisite_list(object, "option", "prerequisites")?,
        effects: effect_list(object, "option", "effects")?,
        priority: opt_i32(object, "option", "priority")?.unwrap_or(DEFAULT_PRIORITY),
        tags: string_list(object, "option", "tags")?,
    })
}

fn prerequisite_from_value(value: &Value) -> CodecResult<Prerequisite> {
    let object = as_object(value, "prerequisite")?;
    let node_type = require_str(object, "prerequisite", "type")?;
    let empty = Map::new();
    let properties = node_properties(object, "prerequisite", &empty)?;

    match node_type.as_str() {
        "AttributeRequirement" => {
            let node = "AttributeRequirement";
            let name = require_str(properties, node, "attributeName")?;
            let attribute = Attribute::parse(&name)
                .map_err(|_| DecodeError::UnknownAttribute(name.clone()))?;
            Ok(Prerequisite::Attribute {
                attribute,
                min: opt_i32(properties, node, "minValue")?,
                max: opt_i32(properties, node, "maxValue")?,
            })
        }
        "QualityRequirement" => {
            let node = "QualityRequirement";
            Ok(Prerequisite::Quality {
                quality_id: require_str(properties, node, "qualityId")?,
                min: opt_i32(properties, node, "minValue")?,
                max: opt_i32(properties, node, "maxValue")?,
            })
        }
        "StoryletPlayedRequirement" => {
            let node = "StoryletPlayedRequirement";
            Ok(Prerequisite::StoryletPlayed {
                storylet_id: require_str(properties, node, "storyletId")?,
                must_have_played: require_bool(properties, node, "mustHavePlayed")?,
            })
        }
        "CompoundPrerequisite" => {
            let node = "CompoundPrerequisite";
            // Only the literal "or" (any case) selects OR; anything else,
            // including absence, falls back to AND.
            let logic = match opt_str(properties, node, "logic")? {
                Some(value) if value.eq_ignore_ascii_case("or") => CompoundLogic::Or,
                _ => CompoundLogic::And,
            };
            Ok(Prerequisite::Compound {
                logic,
                children: prerequisite_list(properties, node, "prerequisites")?,
            })
        }
        _ => Err(DecodeError::UnknownPrerequisiteType(node_type)),
    }
}

fn effect_from_value(value: &Value) -> CodecResult<Effect> {
    let object = as_object(value, "effect")?;
    let node_type = require_str(object, "effect", "type")?;
    let empty = Map::new();
    let properties = node_properties(object, "effect", &empty)?;

    match node_type.as_str() {
        "AttributeEffect" => {
            let node = "AttributeEffect";
            let name = require_str(properties, node, "attributeName")?;
            let attribute = Attribute::parse(&name)
                .map_err(|_| DecodeError::UnknownAttribute(name.clone()))?;
            Ok(Effect::Attribute {
                attribute,
                delta: require_i32(properties, node, "delta")?,
            })
        }
        "QualityEffect" => {
            let node = "QualityEffect";
            Ok(Effect::Quality {
                quality_id: require_str(properties, node, "qualityId")?,
                delta: require_i32(properties, node, "delta")?,
            })
        }
        "UnlockStoryletEffect" => {
            let node = "UnlockStoryletEffect";
            Ok(Effect::UnlockStorylet {
                storylet_id: require_str(properties, node, "storyletId")?,
            })
        }
        "CompoundEffect" => Ok(Effect::Compound {
            children: effect_list(properties, "CompoundEffect", "effects")?,
        }),
        _ => Err(DecodeError::UnknownEffectType(node_type)),
    }
}

/// Look up a key, preferring an exact match, falling back to the first
/// key that matches ignoring ASCII case.
fn field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(value) = object.get(key) {
        return Some(value);
    }
    object
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, value)| value)
}

fn as_object<'a>(value: &'a Value, node: &'static str) -> CodecResult<&'a Map<String, Value>> {
    value.as_object().ok_or(DecodeError::NotAnObject { node })
}

fn node_properties<'a>(
    object: &'a Map<String, Value>,
    node: &'static str,
    empty: &'a Map<String, Value>,
) -> CodecResult<&'a Map<String, Value>> {
    match field(object, "properties") {
        Some(value) => value.as_object().ok_or(DecodeError::InvalidProperty {
            node,
            property: "properties",
            expected: "an object",
        }),
        None => Ok(empty),
    }
}

fn opt_str(
    object: &Map<String, Value>,
    node: &'static str,
    key: &'static str,
) -> CodecResult<Option<String>> {
    match field(object, key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|text| Some(text.to_string()))
            .ok_or(DecodeError::InvalidProperty {
                node,
                property: key,
                expected: "a string",
            }),
    }
}

fn require_str(
    object: &Map<String, Value>,
    node: &'static str,
    key: &'static str,
) -> CodecResult<String> {
    opt_str(object, node, key)?.ok_or(DecodeError::MissingProperty {
        node,
        property: key,
    })
}

fn string_or_default(
    object: &Map<String, Value>,
    node: &'static str,
    key: &'static str,
) -> CodecResult<String> {
    Ok(opt_str(object, node, key)?.unwrap_or_default())
}

fn opt_i32(
    object: &Map<String, Value>,
    node: &'static str,
    key: &'static str,
) -> CodecResult<Option<i32>> {
    match field(object, key) {
        None => Ok(None),
        Some(value) => value
            .as_i64()
            .and_then(|number| i32::try_from(number).ok())
            .map(Some)
            .ok_or(DecodeError::InvalidProperty {
                node,
                property: key,
                expected: "an integer",
            }),
    }
}

fn require_i32(
    object: &Map<String, Value>,
    node: &'static str,
    key: &'static str,
) -> CodecResult<i32> {
    opt_i32(object, node, key)?.ok_or(DecodeError::MissingProperty {
        node,
        property: key,
    })
}

fn require_bool(
    object: &Map<String, Value>,
    node: &'static str,
    key: &'static str,
) -> CodecResult<bool> {
    match field(object, key) {
        None => Err(DecodeError::MissingProperty {
            node,
            property: key,
        }),
        Some(value) => value.as_bool().ok_or(DecodeError::InvalidProperty {
            node,
            property: key,
            expected: "a boolean",
        }),
    }
}

fn string_list(
    object: &Map<String, Value>,
    node: &'static str,
    key: &'static str,
) -> CodecResult<Vec<String>> {
    match field(object, key) {
        None => Ok(Vec::new()),
        Some(value) => {
            let items = value.as_array().ok_or(DecodeError::InvalidProperty {
                node,
                property: key,
                expected: "an array of strings",
            })?;
            items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or(DecodeError::InvalidProperty {
                            node,
                            property: key,
                            expected: "an array of strings",
                        })
                })
                .collect()
        }
    }
}

fn prerequisite_list(
    object: &Map<String, Value>,
    node: &'static str,
    key: &'static str,
) -> CodecResult<Vec<Prerequisite>> {
    match field(object, key) {
        None => Ok(Vec::new()),
        Some(value) => {
            let items = value.as_array().ok_or(DecodeError::InvalidProperty {
                node,
                property: key,
                expected: "an array",
            })?;
            items.iter().map(prerequisite_from_value).collect()
        }
    }
}

fn effect_list(
    object: &Map<String, Value>,
    node: &'static str,
    key: &'static str,
) -> CodecResult<Vec<Effect>> {
    match field(object, key) {
        None => Ok(Vec::new()),
        Some(value) => {
            let items = value.as_array().ok_or(DecodeError::InvalidProperty {
                node,
                property: key,
                expected: "an array",
            })?;
            items.iter().map(effect_from_value).collect()
        }
    }
}

fn option_list(object: &Map<String, Value>) -> CodecResult<Vec<StoryletOption>> {
    match field(object, "options") {
        None => Ok(Vec::new()),
        Some(value) => {
            let items = value.as_array().ok_or(DecodeError::InvalidProperty {
                node: "storylet",
                property: "options",
                expected: "an array",
            })?;
            items.iter().map(option_from_value).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_record_fills_defaults() {
        let storylet = decode_storylet(r#"{"id": "prologue", "title": "The Prologue"}"#).unwrap();
        assert_eq!(storylet.id, "prologue");
        assert_eq!(storylet.title, "The Prologue");
        assert_eq!(storylet.priority, DEFAULT_PRIORITY);
        assert!(storylet.description.is_empty());
        assert!(storylet.prerequisites.is_empty());
        assert!(storylet.effects.is_empty());
        assert!(storylet.options.is_empty());
        assert!(storylet.tags.is_empty());
    }

    #[test]
    fn full_record_with_comments_and_trailing_commas() {
        let source = r#"{
  // A hand-edited record, exercising the whole format.
  "id": "the_ledge",
  "title": "The Ledge",
  "description": "A narrow shelf of rock.",
  "content": "The wind pulls at your coat.",
  "priority": 20,
  "category": "exploration",
  "tags": ["outdoor", "risky",],
  "prerequisites": [
    {
      "type": "CompoundPrerequisite",
      "properties": {
        "logic": "Or",
        "prerequisites": [
          {
            "type": "AttributeRequirement",
            "properties": { "attributeName": "Bravery", "minValue": 60, },
          },
          {
            "type": "QualityRequirement",
            "properties": { "qualityId": "courage_training", "minValue": 1 },
          },
        ],
      },
    },
  ],
  "effects": [
    { "type": "QualityEffect", "properties": { "qualityId": "dread", "delta": 1 } },
  ],
  "options": [
    {
      "id": "jump",
      "text": "Jump across",
      "resultText": "Your heart hammers as you land.", /* outcome */
      "priority": 15,
      "effects": [
        { "type": "AttributeEffect", "properties": { "attributeName": "Bravery", "delta": 5 } },
        { "type": "UnlockStoryletEffect", "properties": { "storyletId": "the_far_side" } },
      ],
    },
  ],
}"#;
        let storylet = decode_storylet(source).unwrap();
        assert_eq!(storylet.id, "the_ledge");
        assert_eq!(storylet.priority, 20);
        assert_eq!(storylet.tags, vec!["outdoor", "risky"]);
        assert_eq!(
            storylet.prerequisites,
            vec![Prerequisite::Compound {
                logic: CompoundLogic::Or,
                children: vec![
                    Prerequisite::Attribute {
                        attribute: Attribute::Bravery,
                        min: Some(60),
                        max: None,
                    },
                    Prerequisite::Quality {
                        quality_id: "courage_training".to_string(),
                        min: Some(1),
                        max: None,
                    },
                ],
            }]
        );
        assert_eq!(storylet.options.len(), 1);
        let option = &storylet.options[0];
        assert_eq!(option.id, "jump");
        assert_eq!(option.result_text, "Your heart hammers as you land.");
        assert_eq!(option.priority, 15);
        assert_eq!(
            option.effects,
            vec![
                Effect::Attribute {
                    attribute: Attribute::Bravery,
                    delta: 5,
                },
                Effect::UnlockStorylet {
                    storylet_id: "the_far_side".to_string(),
                },
            ]
        );
    }

    #[test]
    fn keys_match_case_insensitively_at_every_level() {
        let source = r#"{
  "ID": "prologue",
  "Title": "The Prologue",
  "PRIORITY": 12,
  "Prerequisites": [
    {
      "TYPE": "AttributeRequirement",
      "Properties": { "ATTRIBUTENAME": "Bravery", "MinValue": 40 }
    }
  ]
}"#;
        let storylet = decode_storylet(source).unwrap();
        assert_eq!(storylet.id, "prologue");
        assert_eq!(storylet.priority, 12);
        assert_eq!(
            storylet.prerequisites,
            vec![Prerequisite::Attribute {
                attribute: Attribute::Bravery,
                min: Some(40),
                max: None,
            }]
        );
    }

    #[test]
    fn exact_key_match_wins_over_case_folded() {
        let source = r#"{
  "id": "exact",
  "ID": "folded",
  "title": "T"
}"#;
        let storylet = decode_storylet(source).unwrap();
        assert_eq!(storylet.id, "exact");
    }

    #[test]
    fn unknown_prerequisite_type_names_the_discriminator() {
        let source = r#"{
  "id": "x", "title": "X",
  "prerequisites": [{ "type": "BogusRequirement", "properties": {} }]
}"#;
        let err = decode_storylet(source).unwrap_err();
        assert!(
            matches!(&err, DecodeError::UnknownPrerequisiteType(t) if t == "BogusRequirement")
        );
        assert_eq!(
            err.to_string(),
            "unknown prerequisite type: BogusRequirement"
        );
    }

    #[test]
    fn unknown_effect_type_names_the_discriminator() {
        let source = r#"{
  "id": "x", "title": "X",
  "effects": [{ "type": "TeleportEffect", "properties": {} }]
}"#;
        let err = decode_storylet(source).unwrap_err();
        assert!(matches!(&err, DecodeError::UnknownEffectType(t) if t == "TeleportEffect"));
    }

    #[test]
    fn missing_required_property_is_named() {
        let source = r#"{
  "id": "x", "title": "X",
  "prerequisites": [{ "type": "AttributeRequirement", "properties": { "minValue": 10 } }]
}"#;
        let err = decode_storylet(source).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MissingProperty {
                node: "AttributeRequirement",
                property: "attributeName",
            }
        ));
    }

    #[test]
    fn missing_delta_and_must_have_played_are_decode_errors() {
        let no_delta = r#"{
  "id": "x", "title": "X",
  "effects": [{ "type": "QualityEffect", "properties": { "qualityId": "dread" } }]
}"#;
        assert!(matches!(
            decode_storylet(no_delta).unwrap_err(),
            DecodeError::MissingProperty {
                node: "QualityEffect",
                property: "delta",
            }
        ));

        let no_flag = r#"{
  "id": "x", "title": "X",
  "prerequisites": [{ "type": "StoryletPlayedRequirement", "properties": { "storyletId": "p" } }]
}"#;
        assert!(matches!(
            decode_storylet(no_flag).unwrap_err(),
            DecodeError::MissingProperty {
                node: "StoryletPlayedRequirement",
                property: "mustHavePlayed",
            }
        ));
    }

    #[test]
    fn mistyped_properties_are_rejected() {
        let delta_as_string = r#"{
  "id": "x", "title": "X",
  "effects": [{ "type": "QualityEffect", "properties": { "qualityId": "dread", "delta": "five" } }]
}"#;
        let err = decode_storylet(delta_as_string).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidProperty {
                node: "QualityEffect",
                property: "delta",
                expected: "an integer",
            }
        ));

        let name_as_number = r#"{
  "id": "x", "title": "X",
  "prerequisites": [{ "type": "AttributeRequirement", "properties": { "attributeName": 7 } }]
}"#;
        assert!(matches!(
            decode_storylet(name_as_number).unwrap_err(),
            DecodeError::InvalidProperty {
                node: "AttributeRequirement",
                property: "attributeName",
                expected: "a string",
            }
        ));
    }

    #[test]
    fn unknown_attribute_name_is_rejected() {
        let source = r#"{
  "id": "x", "title": "X",
  "prerequisites": [{ "type": "AttributeRequirement", "properties": { "attributeName": "Luck" } }]
}"#;
        let err = decode_storylet(source).unwrap_err();
        assert!(matches!(&err, DecodeError::UnknownAttribute(name) if name == "Luck"));
    }

    #[test]
    fn compound_logic_defaults_to_and() {
        let decode_logic = |logic_field: &str| {
            let source = format!(
                r#"{{
  "id": "x", "title": "X",
  "prerequisites": [{{ "type": "CompoundPrerequisite", "properties": {{ {logic_field} "prerequisites": [] }} }}]
}}"#
            );
            match &decode_storylet(&source).unwrap().prerequisites[0] {
                Prerequisite::Compound { logic, .. } => *logic,
                other => panic!("expected compound, got {other:?}"),
            }
        };

        assert_eq!(decode_logic(r#""logic": "or","#), CompoundLogic::Or);
        assert_eq!(decode_logic(r#""logic": "OR","#), CompoundLogic::Or);
        assert_eq!(decode_logic(r#""logic": "And","#), CompoundLogic::And);
        // A typo silently falls back to AND. Deliberate, if unkind.
        assert_eq!(decode_logic(r#""logic": "XOR","#), CompoundLogic::And);
        assert_eq!(decode_logic(""), CompoundLogic::And);
    }

    #[test]
    fn compound_without_properties_is_empty_and() {
        let source = r#"{
  "id": "x", "title": "X",
  "prerequisites": [{ "type": "CompoundPrerequisite" }]
}"#;
        let storylet = decode_storylet(source).unwrap();
        assert_eq!(
            storylet.prerequisites,
            vec![Prerequisite::Compound {
                logic: CompoundLogic::And,
                children: Vec::new(),
            }]
        );
    }

    #[test]
    fn deeply_nested_compounds_decode() {
        let source = r#"{
  "id": "x", "title": "X",
  "effects": [{
    "type": "CompoundEffect",
    "properties": { "effects": [{
      "type": "CompoundEffect",
      "properties": { "effects": [{
        "type": "AttributeEffect",
        "properties": { "attributeName": "Drive", "delta": 3 }
      }] }
    }] }
  }]
}"#;
        let storylet = decode_storylet(source).unwrap();
        let expected = Effect::Compound {
            children: vec![Effect::Compound {
                children: vec![Effect::Attribute {
                    attribute: Attribute::Drive,
                    delta: 3,
                }],
            }],
        };
        assert_eq!(storylet.effects, vec![expected]);
    }

    #[test]
    fn top_level_must_be_an_object() {
        let err = decode_storylet("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, DecodeError::NotAnObject { node: "storylet" }));
        assert_eq!(err.to_string(), "storylet must be a json object");
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = decode_storylet(r#"{"id": "x", "#).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn missing_node_type_is_a_decode_error() {
        let source = r#"{
  "id": "x", "title": "X",
  "prerequisites": [{ "properties": { "attributeName": "Bravery" } }]
}"#;
        assert!(matches!(
            decode_storylet(source).unwrap_err(),
            DecodeError::MissingProperty {
                node: "prerequisite",
                property: "type",
            }
        ));
    }

    #[test]
    fn legacy_sentinel_bounds_decode_as_written() {
        // Older files encoded absent bounds as 0/100 for attributes and
        // integer extremes for qualities. Those decode as literal bounds,
        // which behave identically to unbounded at evaluation time.
        let source = format!(
            r#"{{
  "id": "x", "title": "X",
  "prerequisites": [
    {{ "type": "AttributeRequirement",
       "properties": {{ "attributeName": "Bravery", "minValue": 0, "maxValue": 100 }} }},
    {{ "type": "QualityRequirement",
       "properties": {{ "qualityId": "dread", "minValue": {}, "maxValue": {} }} }}
  ]
}}"#,
            i32::MIN,
            i32::MAX
        );
        let storylet = decode_storylet(&source).unwrap();
        assert_eq!(
            storylet.prerequisites[0],
            Prerequisite::Attribute {
                attribute: Attribute::Bravery,
                min: Some(0),
                max: Some(100),
            }
        );
        assert_eq!(
            storylet.prerequisites[1],
            Prerequisite::Quality {
                quality_id: "dread".to_string(),
                min: Some(i32::MIN),
                max: Some(i32::MAX),
            }
        );

        let character = skein_core::CharacterState::new("Imogen");
        assert!(storylet.prerequisites_met(&character));
    }
}
