use indexmap::IndexMap;
use serde_json::Value;

/// A synthesized type descriptor, shared through the [`super::TypeRegistry`].
#[derive(Debug, Clone, PartialEq)]
pub enum MetaType {
    Object(ObjectType),
    InputObject(InputObjectType),
    Enum(EnumType),
}

impl MetaType {
    pub fn name(&self) -> &str {
        match self {
            MetaType::Object(object) => &object.name,
            MetaType::InputObject(input) => &input.name,
            MetaType::Enum(enum_type) => &enum_type.name,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MetaType::Object(_) => "object",
            MetaType::InputObject(_) => "input object",
            MetaType::Enum(_) => "enum",
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            MetaType::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_input_object(&self) -> Option<&InputObjectType> {
        match self {
            MetaType::InputObject(input) => Some(input),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            MetaType::Enum(enum_type) => Some(enum_type),
            _ => None,
        }
    }
}

impl From<ObjectType> for MetaType {
    fn from(object: ObjectType) -> Self {
        MetaType::Object(object)
    }
}

impl From<InputObjectType> for MetaType {
    fn from(input: InputObjectType) -> Self {
        MetaType::InputObject(input)
    }
}

impl From<EnumType> for MetaType {
    fn from(enum_type: EnumType) -> Self {
        MetaType::Enum(enum_type)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, MetaField>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>, fields: impl IntoIterator<Item = MetaField>) -> Self {
        ObjectType {
            name: name.into(),
            description: None,
            fields: fields.into_iter().map(|field| (field.name.clone(), field)).collect(),
        }
    }

    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        ObjectType {
            description: Some(description.into()),
            ..self
        }
    }

    pub fn field(&self, name: &str) -> Option<&MetaField> {
        self.fields.get(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaField {
    pub name: String,
    /// The storage name, when it differs from `name`.
    pub mapped_name: Option<String>,
    pub description: Option<String>,
    pub ty: String,
}

impl MetaField {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> MetaField {
        MetaField {
            name: name.into(),
            ty: ty.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        MetaField {
            description: Some(description.into()),
            ..self
        }
    }

    pub fn target_field_name(&self) -> &str {
        self.mapped_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    pub input_fields: IndexMap<String, MetaInputValue>,
}

impl InputObjectType {
    pub fn new(name: impl Into<String>, input_fields: impl IntoIterator<Item = MetaInputValue>) -> Self {
        InputObjectType {
            name: name.into(),
            description: None,
            input_fields: input_fields
                .into_iter()
                .map(|field| (field.name.clone(), field))
                .collect(),
        }
    }

    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        InputObjectType {
            description: Some(description.into()),
            ..self
        }
    }

    pub fn field(&self, name: &str) -> Option<&MetaInputValue> {
        self.input_fields.get(name)
    }
}

/// An argument, or a field of an input object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaInputValue {
    pub name: String,
    pub description: Option<String>,
    pub ty: String,
    pub default_value: Option<Value>,
    /// The storage name, when it differs from `name`.
    pub rename: Option<String>,
}

impl MetaInputValue {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> MetaInputValue {
        MetaInputValue {
            name: name.into(),
            ty: ty.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        MetaInputValue {
            description: Some(description.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_default(self, default_value: impl Into<Value>) -> Self {
        MetaInputValue {
            default_value: Some(default_value.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_rename(self, rename: Option<String>) -> Self {
        MetaInputValue { rename, ..self }
    }

    pub fn is_required(&self) -> bool {
        self.ty.ends_with('!')
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumType {
    pub name: String,
    pub description: Option<String>,
    pub values: IndexMap<String, MetaEnumValue>,
}

impl EnumType {
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = MetaEnumValue>) -> Self {
        EnumType {
            name: name.into(),
            description: None,
            values: values.into_iter().map(|value| (value.name.clone(), value)).collect(),
        }
    }

    pub fn value(&self, name: &str) -> Option<&MetaEnumValue> {
        self.values.get(name)
    }
}

/// An enum value with the internal value it stands for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaEnumValue {
    pub name: String,
    pub description: Option<String>,
    pub value: Value,
}

impl MetaEnumValue {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        MetaEnumValue {
            name: name.into(),
            description: None,
            value,
        }
    }
}
