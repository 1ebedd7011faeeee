//! JSON schema definitions for descriptor validation.

use aixverify_common::SchemaKind;

/// JSON Schema for source.json.
pub const SOURCE_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "Aidoku Source Descriptor",
  "type": "object",
  "required": ["info"],
  "properties": {
    "info": {
      "type": "object",
      "required": ["id", "lang", "name", "version"],
      "properties": {
        "id": { "type": "string", "pattern": "^[a-z0-9_-]+(\\.[A-Za-z0-9_-]+)+$" },
        "lang": { "type": "string", "minLength": 1 },
        "name": { "type": "string", "minLength": 1 },
        "version": { "type": "integer", "minimum": 1 },
        "url": { "type": "string" },
        "urls": { "type": "array", "items": { "type": "string" } },
        "nsfw": { "type": "integer", "enum": [0, 1, 2] },
        "minAppVersion": { "type": "string" },
        "maxAppVersion": { "type": "string" }
      }
    },
    "languages": {
      "type": "array",
      "items": {
        "oneOf": [
          { "type": "string" },
          {
            "type": "object",
            "required": ["code"],
            "properties": {
              "code": { "type": "string" },
              "value": { "type": "string" },
              "default": { "type": "boolean" }
            }
          }
        ]
      }
    },
    "listings": {
      "type": "array",
      "items": {
        "type": "object",
        "required": ["name"],
        "properties": {
          "name": { "type": "string", "minLength": 1 },
          "flags": { "type": "integer" }
        }
      }
    }
  }
}"#;

/// JSON Schema for filters.json.
pub const FILTERS_SCHEMA: &str = r##"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "Aidoku Filters Descriptor",
  "type": "array",
  "items": { "$ref": "#/definitions/filter" },
  "definitions": {
    "filter": {
      "type": "object",
      "required": ["type"],
      "properties": {
        "type": {
          "type": "string",
          "enum": ["title", "author", "select", "sort", "check", "group", "genre"]
        },
        "name": { "type": "string" },
        "id": { "type": "string" },
        "canExclude": { "type": "boolean" },
        "canAscend": { "type": "boolean" },
        "options": { "type": "array", "items": { "type": "string" } },
        "filters": { "type": "array", "items": { "$ref": "#/definitions/filter" } }
      },
      "allOf": [
        {
          "if": { "required": ["type"], "properties": { "type": { "enum": ["select", "sort"] } } },
          "then": { "required": ["name", "options"] }
        },
        {
          "if": { "required": ["type"], "properties": { "type": { "const": "select" } } },
          "then": { "properties": { "default": { "type": "integer", "minimum": 0 } } }
        },
        {
          "if": { "required": ["type"], "properties": { "type": { "const": "sort" } } },
          "then": {
            "properties": {
              "default": {
                "type": "object",
                "required": ["index"],
                "properties": {
                  "index": { "type": "integer", "minimum": 0 },
                  "ascending": { "type": "boolean" }
                }
              }
            }
          }
        },
        {
          "if": { "required": ["type"], "properties": { "type": { "enum": ["check", "genre"] } } },
          "then": {
            "required": ["name"],
            "properties": { "default": { "type": "boolean" } }
          }
        },
        {
          "if": { "required": ["type"], "properties": { "type": { "const": "group" } } },
          "then": { "required": ["name", "filters"] }
        }
      ]
    }
  }
}"##;

/// JSON Schema for settings.json.
pub const SETTINGS_SCHEMA: &str = r##"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "Aidoku Settings Descriptor",
  "type": "array",
  "items": { "$ref": "#/definitions/setting" },
  "definitions": {
    "setting": {
      "type": "object",
      "required": ["type"],
      "properties": {
        "type": {
          "type": "string",
          "enum": [
            "group", "select", "multi-select", "switch", "stepper",
            "segment", "text", "page", "button", "link", "login"
          ]
        },
        "key": { "type": "string", "minLength": 1 },
        "title": { "type": "string" },
        "footer": { "type": "string" },
        "placeholder": { "type": "string" },
        "url": { "type": "string" },
        "values": { "type": "array", "items": { "type": "string" } },
        "titles": { "type": "array", "items": { "type": "string" } },
        "items": { "type": "array", "items": { "$ref": "#/definitions/setting" } },
        "requires": { "type": "string" },
        "requiresFalse": { "type": "string" },
        "notification": { "type": "string" }
      },
      "allOf": [
        {
          "if": { "required": ["type"], "properties": { "type": { "enum": ["group", "page"] } } },
          "then": { "required": ["items"] }
        },
        {
          "if": { "required": ["type"], "properties": { "type": { "enum": ["select", "segment", "multi-select"] } } },
          "then": { "required": ["key", "title", "values"] }
        },
        {
          "if": { "required": ["type"], "properties": { "type": { "const": "switch" } } },
          "then": {
            "required": ["key", "title"],
            "properties": { "default": { "type": "boolean" } }
          }
        },
        {
          "if": { "required": ["type"], "properties": { "type": { "const": "stepper" } } },
          "then": {
            "required": ["key", "title", "minimumValue", "maximumValue"],
            "properties": {
              "minimumValue": { "type": "number" },
              "maximumValue": { "type": "number" },
              "stepValue": { "type": "number" },
              "default": { "type": "number" }
            }
          }
        },
        {
          "if": { "required": ["type"], "properties": { "type": { "const": "text" } } },
          "then": {
            "required": ["key"],
            "properties": { "default": { "type": "string" } }
          }
        },
        {
          "if": { "required": ["type"], "properties": { "type": { "enum": ["button", "login"] } } },
          "then": { "required": ["key", "title"] }
        },
        {
          "if": { "required": ["type"], "properties": { "type": { "const": "link" } } },
          "then": { "required": ["title", "url"] }
        }
      ]
    }
  }
}"##;

/// Raw schema text for a descriptor kind.
pub fn schema_text(kind: SchemaKind) -> &'static str {
    match kind {
        SchemaKind::Source => SOURCE_SCHEMA,
        SchemaKind::Filters => FILTERS_SCHEMA,
        SchemaKind::Settings => SETTINGS_SCHEMA,
    }
}

/// Get the schema for a descriptor kind as a parsed JSON value.
pub fn schema_value(kind: SchemaKind) -> serde_json::Value {
    serde_json::from_str(schema_text(kind)).expect("Invalid embedded descriptor schema")
}
