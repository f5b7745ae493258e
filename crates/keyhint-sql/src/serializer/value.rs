use super::{Formatter, ToSql};

use crate::stmt::Value;

impl ToSql for &Value {
    fn to_sql(self, f: &mut Formatter<'_>) {
        use std::fmt::Write;

        // Writing to a `String` cannot fail
        let _ = match self {
            Value::Null => f.dst.write_str("NULL"),
            Value::Bool(true) => f.dst.write_str("TRUE"),
            Value::Bool(false) => f.dst.write_str("FALSE"),
            Value::I64(v) => write!(f.dst, "{v}"),
            Value::F64(v) if v.is_finite() => write!(f.dst, "{v}"),
            Value::F64(_) => f.dst.write_str("NULL"),
            Value::String(v) => {
                f.dst.push('\'');
                for c in v.chars() {
                    match c {
                        '\'' => f.dst.push_str("''"),
                        '\\' => f.dst.push_str("\\\\"),
                        c => f.dst.push(c),
                    }
                }
                f.dst.push('\'');
                Ok(())
            }
        };
    }
}
