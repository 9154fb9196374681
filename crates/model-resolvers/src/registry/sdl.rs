use std::fmt::{self, Write};

use super::{EnumType, InputObjectType, MetaInputValue, MetaType, ObjectType};

impl fmt::Display for MetaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaType::Object(object) => fmt::Display::fmt(object, f),
            MetaType::InputObject(input) => fmt::Display::fmt(input, f),
            MetaType::Enum(enum_type) => fmt::Display::fmt(enum_type, f),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_description(f, self.description.as_deref(), "")?;
        writeln!(f, "type {} {{", self.name)?;

        for field in self.fields.values() {
            write_description(f, field.description.as_deref(), "  ")?;
            writeln!(f, "  {}: {}", field.name, field.ty)?;
        }

        f.write_char('}')
    }
}

impl fmt::Display for InputObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_description(f, self.description.as_deref(), "")?;
        writeln!(f, "input {} {{", self.name)?;

        for field in self.input_fields.values() {
            write_description(f, field.description.as_deref(), "  ")?;
            writeln!(f, "  {field}")?;
        }

        f.write_char('}')
    }
}

impl fmt::Display for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_description(f, self.description.as_deref(), "")?;
        writeln!(f, "enum {} {{", self.name)?;

        for value in self.values.values() {
            write_description(f, value.description.as_deref(), "  ")?;
            writeln!(f, "  {}", value.name)?;
        }

        f.write_char('}')
    }
}

/// `name: Type = default`, as in an argument list.
impl fmt::Display for MetaInputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)?;

        if let Some(default_value) = &self.default_value {
            write!(f, " = {default_value}")?;
        }

        Ok(())
    }
}

fn write_description(f: &mut fmt::Formatter<'_>, description: Option<&str>, indent: &str) -> fmt::Result {
    match description {
        Some(description) => writeln!(f, "{indent}\"{}\"", description.replace('"', "\\\"")),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::registry::{MetaEnumValue, MetaField};

    use super::*;

    #[test]
    fn object_sdl() {
        let object = ObjectType::new(
            "CreateOneUserPayload",
            [
                MetaField::new("recordId", "MongoID").with_description("Created document ID"),
                MetaField::new("record", "User"),
            ],
        );

        let expected = indoc! {r#"
            type CreateOneUserPayload {
              "Created document ID"
              recordId: MongoID
              record: User
            }"#};

        assert_eq!(MetaType::from(object).to_string(), expected);
    }

    #[test]
    fn input_and_enum_sdl() {
        let input = InputObjectType::new(
            "FilterUserInput",
            [
                MetaInputValue::new("name", "String"),
                MetaInputValue::new("AND", "[FilterUserInput!]"),
            ],
        )
        .with_description("Filter for User");

        let expected = indoc! {r#"
            "Filter for User"
            input FilterUserInput {
              name: String
              AND: [FilterUserInput!]
            }"#};

        assert_eq!(input.to_string(), expected);

        let sort = EnumType::new(
            "SortFindByIdsUserInput",
            [
                MetaEnumValue::new("_ID_ASC", json!({ "_id": 1 })),
                MetaEnumValue::new("_ID_DESC", json!({ "_id": -1 })),
            ],
        );

        let expected = indoc! {"
            enum SortFindByIdsUserInput {
              _ID_ASC
              _ID_DESC
            }"};

        assert_eq!(sort.to_string(), expected);
        assert_eq!(
            MetaInputValue::new("limit", "Int").with_default(100).to_string(),
            "limit: Int = 100"
        );
    }
}
