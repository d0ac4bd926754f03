use super::{FieldDescriptor, FieldKind, FieldValue};
use crate::error::{ValidationError, ValidationErrorKind};
use itertools::Itertools;

/// Checks `value` against `descriptor`, recursing into composite shapes.
///
/// `type_tag` names the definition being validated and `key` is the path of
/// the value within it; both end up in the error message. Conditional
/// wrappers must already be unwrapped.
pub fn validate_field(
    type_tag: &str,
    key: &str,
    value: &FieldValue,
    descriptor: &FieldDescriptor,
) -> Result<(), ValidationError> {
    if value.is_null() && (descriptor.is_nullable() || descriptor.is_optional()) {
        return Ok(());
    }
    if matches!(descriptor.kind(), FieldKind::Any) {
        return Ok(());
    }
    if descriptor.is_many() {
        return check_array(type_tag, key, value, descriptor);
    }

    match descriptor.kind() {
        FieldKind::Enum(values) => check_enum(type_tag, key, value, values),
        FieldKind::Record(value_type) => check_record(type_tag, key, value, value_type),
        FieldKind::Object(_) => check_object(type_tag, key, value, descriptor),
        FieldKind::Any => Ok(()),
        FieldKind::Scope => check_scope(type_tag, key, value),
        FieldKind::Union(branches) => check_union(type_tag, key, value, branches),
        FieldKind::Buildable => check_buildable(type_tag, key, value),
        FieldKind::String | FieldKind::Number | FieldKind::Boolean => {
            check_primitive(type_tag, key, value, descriptor)
        }
    }
}

fn invalid_type(type_tag: &str, key: &str, expected: &str, value: &FieldValue) -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::InvalidType,
        type_tag,
        key,
        format!("expected {}, got {}", expected, value.kind_name()),
    )
}

fn check_array(
    type_tag: &str,
    key: &str,
    value: &FieldValue,
    descriptor: &FieldDescriptor,
) -> Result<(), ValidationError> {
    let FieldValue::Array(items) = value else {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidArray,
            type_tag,
            key,
            format!("expected array, got {}", value.kind_name()),
        ));
    };
    let element = descriptor.single();
    items.iter().enumerate().try_for_each(|(i, item)| {
        validate_field(type_tag, &format!("{}[{}]", key, i), item, &element)
    })
}

fn check_enum(
    type_tag: &str,
    key: &str,
    value: &FieldValue,
    allowed: &[String],
) -> Result<(), ValidationError> {
    match value {
        FieldValue::String(s) if allowed.contains(s) => Ok(()),
        _ => Err(ValidationError::new(
            ValidationErrorKind::InvalidType,
            type_tag,
            key,
            format!(
                "expected one of {}, got \"{}\"",
                allowed.iter().map(|v| format!("\"{}\"", v)).join(", "),
                value
            ),
        )),
    }
}

fn check_record(
    type_tag: &str,
    key: &str,
    value: &FieldValue,
    value_type: &FieldDescriptor,
) -> Result<(), ValidationError> {
    let FieldValue::Object(entries) = value else {
        return Err(invalid_type(type_tag, key, "record", value));
    };
    entries.iter().try_for_each(|(entry_key, entry)| {
        validate_field(type_tag, &format!("{}.{}", key, entry_key), entry, value_type)
    })
}

fn check_object(
    type_tag: &str,
    key: &str,
    value: &FieldValue,
    descriptor: &FieldDescriptor,
) -> Result<(), ValidationError> {
    let FieldValue::Object(entries) = value else {
        return Err(invalid_type(type_tag, key, "object", value));
    };
    let Some(schema) = descriptor.object_schema() else {
        return Ok(());
    };
    for (field_key, field_descriptor) in schema.iter() {
        let path = format!("{}.{}", key, field_key);
        match entries.get(field_key) {
            Some(field_value) => validate_field(type_tag, &path, field_value, field_descriptor)?,
            None if field_descriptor.is_optional() => {}
            None => {
                return Err(ValidationError::new(
                    ValidationErrorKind::MissingField,
                    type_tag,
                    path,
                    "is required",
                ));
            }
        }
    }
    Ok(())
}

fn check_scope(type_tag: &str, key: &str, value: &FieldValue) -> Result<(), ValidationError> {
    match value {
        FieldValue::Scope(_) => Ok(()),
        _ => Err(invalid_type(type_tag, key, "Scope", value)),
    }
}

/// A value must satisfy at least one branch. Shape mismatches move on to the
/// next branch; a `missing_field` from a branch whose shape matched is
/// reported as-is when no branch accepts the value.
fn check_union(
    type_tag: &str,
    key: &str,
    value: &FieldValue,
    branches: &[FieldDescriptor],
) -> Result<(), ValidationError> {
    let mut mismatches = Vec::with_capacity(branches.len());
    let mut structural = None;

    for branch in branches {
        match validate_field(type_tag, key, value, branch) {
            Ok(()) => return Ok(()),
            Err(e) if e.kind == ValidationErrorKind::MissingField => {
                if structural.is_none() {
                    structural = Some(e);
                }
            }
            Err(e) => mismatches.push(e.to_string()),
        }
    }

    if let Some(e) = structural {
        return Err(e);
    }
    Err(ValidationError::new(
        ValidationErrorKind::InvalidUnion,
        type_tag,
        key,
        format!("does not match any union type:\n{}", mismatches.join("\n")),
    ))
}

fn check_buildable(type_tag: &str, key: &str, value: &FieldValue) -> Result<(), ValidationError> {
    match value {
        FieldValue::Node(_) => Ok(()),
        _ => Err(ValidationError::new(
            ValidationErrorKind::InvalidBuildable,
            type_tag,
            key,
            format!("expected buildable, got {}", value.kind_name()),
        )),
    }
}

fn check_primitive(
    type_tag: &str,
    key: &str,
    value: &FieldValue,
    descriptor: &FieldDescriptor,
) -> Result<(), ValidationError> {
    let matches = matches!(
        (descriptor.kind(), value),
        (FieldKind::String, FieldValue::String(_))
            | (FieldKind::Number, FieldValue::Number(_))
            | (FieldKind::Boolean, FieldValue::Bool(_))
    );
    if matches {
        Ok(())
    } else {
        Err(invalid_type(type_tag, key, descriptor.base_type(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Schema, s};
    use crate::scope::Scope;

    fn check(value: impl Into<FieldValue>, descriptor: &FieldDescriptor) -> Result<(), ValidationError> {
        validate_field("item", "value", &value.into(), descriptor)
    }

    #[test]
    fn primitives_match_exactly() {
        assert!(check("x", &s::string()).is_ok());
        assert!(check(1, &s::number()).is_ok());
        assert!(check(true, &s::boolean()).is_ok());

        let err = check(42, &s::string()).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidType);
        assert!(err.to_string().contains("expected string, got number"));
        assert!(err.to_string().contains("[item]"));
    }

    #[test]
    fn null_passes_only_when_allowed() {
        assert!(check(FieldValue::Null, &s::string().nullable()).is_ok());
        assert!(check(FieldValue::Null, &s::string().optional()).is_ok());
        let err = check(FieldValue::Null, &s::string()).unwrap_err();
        assert!(err.message.contains("got null"));
    }

    #[test]
    fn enum_lists_allowed_values() {
        let variant = s::enumeration(["a", "b"]);
        assert!(check("a", &variant).is_ok());
        let err = check("c", &variant).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidType);
        assert!(err.message.contains("\"a\", \"b\""));
        assert!(err.message.contains("got \"c\""));
    }

    #[test]
    fn many_reports_element_index() {
        let tags = s::string().many();
        assert!(check(vec!["a", "b"], &tags).is_ok());

        let err = check(vec![FieldValue::from("a"), FieldValue::from(2)], &tags).unwrap_err();
        assert_eq!(err.path, "value[1]");

        let err = check("a", &tags).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidArray);
    }

    #[test]
    fn enum_many_checks_each_element() {
        let variants = s::enumeration(["a", "b"]).many();
        assert!(check(vec!["a", "b", "a"], &variants).is_ok());
        assert!(check(vec!["a", "z"], &variants).is_err());
    }

    #[test]
    fn record_rejects_arrays_and_bad_values() {
        let meta = s::record(s::string());
        assert!(check(FieldValue::object([("foo", "bar")]), &meta).is_ok());
        assert!(check(FieldValue::object(Vec::<(String, FieldValue)>::new()), &meta).is_ok());

        let err = check(Vec::<FieldValue>::new(), &meta).unwrap_err();
        assert!(err.message.contains("expected record, got array"));

        let err = check(FieldValue::object([("foo", 42)]), &meta).unwrap_err();
        assert_eq!(err.path, "value.foo");
        assert!(err.message.contains("expected string, got number"));
    }

    #[test]
    fn object_requires_declared_fields() {
        let point = s::object(
            Schema::new()
                .field("x", s::number())
                .field("label", s::string().optional()),
        );
        assert!(check(FieldValue::object([("x", 1)]), &point).is_ok());

        let err = check(FieldValue::object([("label", "a")]), &point).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MissingField);
        assert_eq!(err.path, "value.x");

        let err = check("point", &point).unwrap_err();
        assert!(err.message.contains("expected object, got string"));
    }

    #[test]
    fn any_accepts_everything() {
        assert!(check(FieldValue::object([("x", 1)]), &s::any()).is_ok());
        assert!(check(3, &s::any()).is_ok());
    }

    #[test]
    fn any_many_accepts_scalars_and_arrays() {
        assert!(check(3, &s::any().many()).is_ok());
        assert!(check(vec![FieldValue::from(1), FieldValue::from("a")], &s::any().many()).is_ok());
    }

    #[test]
    fn scope_many_checks_each_element() {
        let scopes = s::scope().many();
        assert!(check(vec![Scope::new(), Scope::new()], &scopes).is_ok());

        let err = check(vec![FieldValue::from(Scope::new()), FieldValue::from("s_1")], &scopes)
            .unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidType);
        assert_eq!(err.path, "value[1]");

        let err = check(Scope::new(), &scopes).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidArray);
    }

    #[test]
    fn record_many_checks_each_entry() {
        let metas = s::record(s::number()).many();
        let items = vec![FieldValue::object([("a", 1)]), FieldValue::object([("b", 2)])];
        assert!(check(items, &metas).is_ok());

        let items = vec![FieldValue::object([("a", 1)]), FieldValue::object([("b", "x")])];
        let err = check(items, &metas).unwrap_err();
        assert_eq!(err.path, "value[1].b");

        let err = check(FieldValue::object([("a", 1)]), &metas).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidArray);
    }

    #[test]
    fn scope_requires_scope_instance() {
        assert!(check(Scope::new(), &s::scope()).is_ok());
        let err = check("s_1", &s::scope()).unwrap_err();
        assert!(err.message.contains("expected Scope, got string"));
        let err = check(FieldValue::object([("token", "s_1")]), &s::scope()).unwrap_err();
        assert!(err.message.contains("expected Scope, got object"));
    }

    #[test]
    fn union_collects_every_branch_reason() {
        let value = s::union(vec![s::string(), s::number()]).unwrap();
        assert!(check("hello", &value).is_ok());
        assert!(check(42, &value).is_ok());

        let err = check(true, &value).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidUnion);
        assert!(err.message.contains("does not match any union type"));
        assert!(err.message.contains("expected string, got boolean"));
        assert!(err.message.contains("expected number, got boolean"));
    }

    #[test]
    fn union_surfaces_missing_field_from_matching_shape() {
        let value = s::union(vec![
            s::string(),
            s::object(Schema::new().field("id", s::number())),
        ])
        .unwrap();
        let err = check(FieldValue::object([("name", "x")]), &value).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MissingField);
        assert_eq!(err.path, "value.id");
    }

    #[test]
    fn buildable_rejects_plain_values() {
        let err = check("raw", &s::buildable()).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidBuildable);
    }
}
