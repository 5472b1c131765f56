use crate::ir::Builtin;
use crate::parse::schema::SchemaType;

/// Maps a primitive `type` and `format` pair to a builtin.
///
/// Returns `None` for combinations outside the table; callers treat
/// that as a hard failure.
pub fn primitive(ty: SchemaType, format: Option<&str>) -> Option<Builtin> {
    Some(match (ty, format) {
        (SchemaType::Integer, None) => Builtin::Integer,
        (SchemaType::Integer, Some("int32")) => Builtin::Int32,
        (SchemaType::Integer, Some("int64")) => Builtin::Int64,
        (SchemaType::Number, None) => Builtin::Decimal,
        (SchemaType::Number, Some("float")) => Builtin::Float,
        (SchemaType::Number, Some("double")) => Builtin::Double,
        (SchemaType::String, None | Some("password")) => Builtin::Text,
        (SchemaType::String, Some("byte" | "binary")) => Builtin::Bytes,
        (SchemaType::String, Some("date")) => Builtin::Date,
        (SchemaType::String, Some("date-time")) => Builtin::Timestamp,
        (SchemaType::Boolean, None) => Builtin::Boolean,
        _ => return None,
    })
}
