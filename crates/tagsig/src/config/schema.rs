use serde_json::{Value, json};

use crate::config::{
    SETTINGS_SECTION_KEY,
    display::{MAX_TOOLTIP_LINES, MAX_TRIM_SIZE, MIN_TOOLTIP_LINES, MIN_TRIM_SIZE},
    logging::LogLevel,
    paths::MAX_PATH_STYLE,
};

/// One entry in the generated configuration schema.
#[derive(Debug, Clone)]
pub struct SchemaField {
    pub key: String,
    pub description: String,
    pub schema_type: SchemaType,
    pub default: Value,
}

/// Subset of JSON Schema types we support.
#[derive(Debug, Clone)]
pub enum SchemaType {
    Bool,
    /// String that may be left unset (`null`).
    OptionalString,
    Integer {
        minimum: Option<i64>,
        maximum: Option<i64>,
    },
    StringEnum {
        values: Vec<&'static str>,
    },
    StringArray,
    /// Array of `[from, to]` string pairs.
    StringPairArray,
    /// Object whose values are string arrays.
    StringArrayMap,
}

impl SchemaField {
    pub fn to_schema_value(&self) -> Value {
        let mut obj = serde_json::Map::new();
        obj.insert("markdownDescription".into(), Value::String(self.description.clone()));
        obj.insert("default".into(), self.default.clone());

        match &self.schema_type {
            SchemaType::Bool => {
                obj.insert("type".into(), Value::String("boolean".into()));
            },
            SchemaType::OptionalString => {
                obj.insert("type".into(), json!(["string", "null"]));
            },
            SchemaType::Integer {
                minimum,
                maximum,
            } => {
                obj.insert("type".into(), Value::String("number".into()));
                if let Some(min) = minimum {
                    obj.insert("minimum".into(), Value::Number((*min).into()));
                }
                if let Some(max) = maximum {
                    obj.insert("maximum".into(), Value::Number((*max).into()));
                }
            },
            SchemaType::StringEnum {
                values,
            } => {
                obj.insert("type".into(), Value::String("string".into()));
                obj.insert("enum".into(), Value::Array(values.iter().map(|v| Value::String(v.to_string())).collect()));
            },
            SchemaType::StringArray => {
                obj.insert("type".into(), Value::String("array".into()));
                obj.insert("items".into(), string_items());
            },
            SchemaType::StringPairArray => {
                let mut pair = serde_json::Map::new();
                pair.insert("type".into(), Value::String("array".into()));
                pair.insert("items".into(), string_items());
                pair.insert("minItems".into(), Value::Number(2.into()));
                pair.insert("maxItems".into(), Value::Number(2.into()));
                obj.insert("type".into(), Value::String("array".into()));
                obj.insert("items".into(), Value::Object(pair));
            },
            SchemaType::StringArrayMap => {
                let mut values = serde_json::Map::new();
                values.insert("type".into(), Value::String("array".into()));
                values.insert("items".into(), string_items());
                obj.insert("type".into(), Value::String("object".into()));
                obj.insert("additionalProperties".into(), Value::Object(values));
            },
        }

        Value::Object(obj)
    }

    pub fn to_markdown(&self) -> String {
        format!("- `{SETTINGS_SECTION_KEY}.{}` - {}", self.key, self.description)
    }
}

fn string_items() -> Value {
    let mut items = serde_json::Map::new();
    items.insert("type".into(), Value::String("string".into()));
    Value::Object(items)
}

/// Return the full list of schema fields for every setting.
pub fn schema_fields() -> Vec<SchemaField> {
    vec![
        SchemaField {
            key: "languages.mapping".into(),
            description: "Extra editor-language to tag-language mappings, merged over the built-in table. A tag \
                          whose `language` field is not listed for the buffer's language is ignored. Entries are \
                          merged per key: a listed language replaces its built-in list (e.g. `\"c\": [\"C\"]` \
                          stops C buffers from showing C++ tags), and built-in languages that are not listed keep \
                          their defaults. No key can be removed."
                .into(),
            schema_type: SchemaType::StringArrayMap,
            default: Value::Object(serde_json::Map::new()),
        },
        SchemaField {
            key: "paths.mapping".into(),
            description: "Literal `[prefix, replacement]` pairs applied, in order, to file names shown next to \
                          a signature."
                .into(),
            schema_type: SchemaType::StringPairArray,
            default: Value::Array(vec![]),
        },
        SchemaField {
            key: "paths.style".into(),
            description: "Path shortening bitmask: 2 trims up to the last `include` directory (1 keeps its \
                          parent as `parent:`), 4 abbreviates directories to one character."
                .into(),
            schema_type: SchemaType::Integer {
                minimum: Some(0),
                maximum: Some(i64::from(MAX_PATH_STYLE)),
            },
            default: Value::Number(0.into()),
        },
        SchemaField {
            key: "display.maxTooltipLines".into(),
            description: "Maximum number of declarations listed in a hover tooltip.".into(),
            schema_type: SchemaType::Integer {
                minimum: Some(MIN_TOOLTIP_LINES as i64),
                maximum: Some(MAX_TOOLTIP_LINES as i64),
            },
            default: Value::Number(10.into()),
        },
        SchemaField {
            key: "display.tooltipOnly".into(),
            description: "Only show declarations in hover tooltips, never while typing a call.".into(),
            schema_type: SchemaType::Bool,
            default: Value::Bool(false),
        },
        SchemaField {
            key: "display.trimSize".into(),
            description: "Columns kept free at the right edge when an echoed signature is cut to fit.".into(),
            schema_type: SchemaType::Integer {
                minimum: Some(MIN_TRIM_SIZE as i64),
                maximum: Some(MAX_TRIM_SIZE as i64),
            },
            default: Value::Number(3.into()),
        },
        SchemaField {
            key: "tags.files".into(),
            description: "Tags files to search, in order. Relative paths resolve against the workspace root."
                .into(),
            schema_type: SchemaType::StringArray,
            default: Value::Array(vec![Value::String("tags".into())]),
        },
        SchemaField {
            key: "tags.binarySearch".into(),
            description: "Binary search tags files that declare themselves sorted.".into(),
            schema_type: SchemaType::Bool,
            default: Value::Bool(true),
        },
        SchemaField {
            key: "logging.level".into(),
            description: "Log verbosity.".into(),
            schema_type: SchemaType::StringEnum {
                values: LogLevel::ALL.iter().map(|level| level.as_str()).collect(),
            },
            default: Value::String(LogLevel::default().as_str().into()),
        },
        SchemaField {
            key: "logging.file".into(),
            description: "Log file used when `--log-file` is not passed. Defaults to `~/.tagsig/tagsig.log`; read \
                          only at startup."
                .into(),
            schema_type: SchemaType::OptionalString,
            default: Value::Null,
        },
    ]
}

/// JSON schema `properties` object keyed by the fully qualified setting name.
pub fn generate_json_schema() -> Value {
    let mut properties = serde_json::Map::new();
    for field in schema_fields() {
        properties.insert(format!("{SETTINGS_SECTION_KEY}.{}", field.key), field.to_schema_value());
    }
    Value::Object(properties)
}

pub fn generate_configuration_markdown() -> String {
    let mut out = String::new();
    let fields = schema_fields();

    let mut current_section = String::new();
    for field in &fields {
        let section = field.key.split('.').next().unwrap_or("");
        if section != current_section {
            current_section = section.to_string();
            let title = match section {
                "languages" => "Languages",
                "paths" => "Paths",
                "display" => "Display",
                "tags" => "Tags",
                "logging" => "Logging",
                other => other,
            };
            out.push_str(&format!("\n## {title}\n\n"));
        }
        out.push_str(&field.to_markdown());
        out.push('\n');
    }

    out
}
