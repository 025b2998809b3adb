use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 写入每条记录的来源标记
pub const SOURCE_TAG: &str = "qr-demo";

/// 一条访客签到记录（数据库中的行）
///
/// `id` 与 `timestamp` 由数据库在插入时生成；`id` 的具体类型取决于表结构，
/// 因此按原始 JSON 值保留。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Submission {
    #[schema(value_type = Value, example = 42)]
    #[serde(default)]
    pub id: Value,
    #[schema(example = "Ana")]
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub household: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kids: bool,
    /// 数据库生成的提交时间（原样透传）
    #[schema(example = "2025-09-20T04:10:44.123456+00:00")]
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[schema(example = "qr-demo")]
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
}

impl Submission {
    /// `id` 的文本形式（字符串去引号，null 为空串）
    pub fn id_text(&self) -> String {
        match &self.id {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// 待插入的记录（不含数据库生成字段；门禁码永不入库）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSubmission {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub household: Option<String>,
    pub kids: bool,
    pub source: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_postgrest_row_with_nulls() {
        let row = json!({
            "id": 7,
            "name": "Ana",
            "phone": null,
            "email": "ana@example.com",
            "household": null,
            "kids": null,
            "timestamp": "2025-09-20T04:10:44.123456+00:00",
            "source": "qr-demo"
        });
        let s: Submission = serde_json::from_value(row).expect("parse row");
        assert_eq!(s.id_text(), "7");
        assert!(!s.kids);
        assert_eq!(s.phone, None);
        assert_eq!(s.email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn id_text_handles_uuid_and_null() {
        let mut s: Submission = serde_json::from_value(json!({"name": "x"})).expect("parse");
        assert_eq!(s.id_text(), "");
        s.id = json!("8b8f2f8a-1a2b-4c3d-9e0f-112233445566");
        assert_eq!(s.id_text(), "8b8f2f8a-1a2b-4c3d-9e0f-112233445566");
    }
}
