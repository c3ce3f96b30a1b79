//! Encoding storylets back to the on-disk record format.
//!
//! Encoding is canonical: every top-level field is emitted, compound
//! nodes always carry their logic and child list, and absent bounds are
//! simply omitted rather than written as sentinel extremes. Decoding
//! still accepts the old sentinel form, so existing files keep working.

use serde_json::{Map, Value};

use skein_core::{CompoundLogic, Effect, Prerequisite, Storylet, StoryletOption};

/// Encode a storylet as pretty-printed JSON.
pub fn encode_storylet(storylet: &Storylet) -> String {
    serde_json::to_string_pretty(&storylet_to_value(storylet)).unwrap_or_default()
}

fn storylet_to_value(storylet: &Storylet) -> Value {
    let mut object = Map::new();
    object.insert("id".to_string(), Value::from(storylet.id.as_str()));
    object.insert("title".to_string(), Value::from(storylet.title.as_str()));
    object.insert(
        "description".to_string(),
        Value::from(storylet.description.as_str()),
    );
    object.insert(
        "content".to_string(),
        Value::from(storylet.content.as_str()),
    );
    object.insert(
        "prerequisites".to_string(),
        Value::Array(
            storylet
                .prerequisites
                .iter()
                .map(prerequisite_to_value)
                .collect(),
        ),
    );
    object.insert(
        "effects".to_string(),
        Value::Array(storylet.effects.iter().map(effect_to_value).collect()),
    );
    object.insert(
        "options".to_string(),
        Value::Array(storylet.options.iter().map(option_to_value).collect()),
    );
    object.insert("priority".to_string(), Value::from(storylet.priority));
    object.insert(
        "category".to_string(),
        Value::from(storylet.category.as_str()),
    );
    object.insert("tags".to_string(), string_array(&storylet.tags));
    Value::Object(object)
}

fn option_to_value(option: &StoryletOption) -> Value {
    let mut object = Map::new();
    object.insert("id".to_string(), Value::from(option.id.as_str()));
    object.insert("text".to_string(), Value::from(option.text.as_str()));
    object.insert(
        "description".to_string(),
        Value::from(option.description.as_str()),
    );
    object.insert(
        "resultText".to_string(),
        Value::from(option.result_text.as_str()),
    );
    object.insert(
        "prerequisites".to_string(),
        Value::Array(
            option
                .prerequisites
                .iter()
                .map(prerequisite_to_value)
                .collect(),
        ),
    );
    object.insert(
        "effects".to_string(),
        Value::Array(option.effects.iter().map(effect_to_value).collect()),
    );
    object.insert("priority".to_string(), Value::from(option.priority));
    object.insert("tags".to_string(), string_array(&option.tags));
    Value::Object(object)
}

fn prerequisite_to_value(prerequisite: &Prerequisite) -> Value {
    match prerequisite {
        Prerequisite::Attribute {
            attribute,
            min,
            max,
        } => {
            let mut properties = Map::new();
            properties.insert(
                "attributeName".to_string(),
                Value::from(attribute.name()),
            );
            insert_bounds(&mut properties, *min, *max);
            node("AttributeRequirement", properties)
        }
        Prerequisite::Quality {
            quality_id,
            min,
            max,
        } => {
            let mut properties = Map::new();
            properties.insert("qualityId".to_string(), Value::from(quality_id.as_str()));
            insert_bounds(&mut properties, *min, *max);
            node("QualityRequirement", properties)
        }
        Prerequisite::StoryletPlayed {
            storylet_id,
            must_have_played,
        } => {
            let mut properties = Map::new();
            properties.insert(
                "storyletId".to_string(),
                Value::from(storylet_id.as_str()),
            );
            properties.insert(
                "mustHavePlayed".to_string(),
                Value::from(*must_have_played),
            );
            node("StoryletPlayedRequirement", properties)
        }
        Prerequisite::Compound { logic, children } => {
            let mut properties = Map::new();
            let logic = match logic {
                CompoundLogic::And => "And",
                CompoundLogic::Or => "Or",
            };
            properties.insert("logic".to_string(), Value::from(logic));
            properties.insert(
                "prerequisites".to_string(),
                Value::Array(children.iter().map(prerequisite_to_value).collect()),
            );
            node("CompoundPrerequisite", properties)
        }
    }
}

fn effect_to_value(effect: &Effect) -> Value {
    match effect {
        Effect::Attribute { attribute, delta } => {
            let mut properties = Map::new();
            properties.insert(
                "attributeName".to_string(),
                Value::from(attribute.name()),
            );
            properties.insert("delta".to_string(), Value::from(*delta));
            node("AttributeEffect", properties)
        }
        Effect::Quality { quality_id, delta } => {
            let mut properties = Map::new();
            properties.insert("qualityId".to_string(), Value::from(quality_id.as_str()));
            properties.insert("delta".to_string(), Value::from(*delta));
            node("QualityEffect", properties)
        }
        Effect::UnlockStorylet { storylet_id } => {
            let mut properties = Map::new();
            properties.insert(
                "storyletId".to_string(),
                Value::from(storylet_id.as_str()),
            );
            node("UnlockStoryletEffect", properties)
        }
        Effect::Compound { children } => {
            let mut properties = Map::new();
            properties.insert(
                "effects".to_string(),
                Value::Array(children.iter().map(effect_to_value).collect()),
            );
            node("CompoundEffect", properties)
        }
    }
}

fn node(node_type: &str, properties: Map<String, Value>) -> Value {
    let mut object = Map::new();
    object.insert("type".to_string(), Value::from(node_type));
    object.insert("properties".to_string(), Value::Object(properties));
    Value::Object(object)
}

fn insert_bounds(properties: &mut Map<String, Value>, min: Option<i32>, max: Option<i32>) {
    if let Some(min) = min {
        properties.insert("minValue".to_string(), Value::from(min));
    }
    if let Some(max) = max {
        properties.insert("maxValue".to_string(), Value::from(max));
    }
}

fn string_array(items: &[String]) -> Value {
    Value::Array(items.iter().map(|item| Value::from(item.as_str())).collect())
}
