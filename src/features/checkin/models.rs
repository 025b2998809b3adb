use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::{NewSubmission, SOURCE_TAG, Submission};

/// 签到表单
///
/// 表单字段按 JSON 原值接收：前端可能提交数字/布尔等非字符串值，
/// 这里按“真值/字符串化”规则统一归一，而不是直接拒绝。
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckinRequest {
    #[schema(value_type = String, example = "Ana")]
    pub name: Value,
    #[schema(value_type = Option<String>)]
    pub phone: Value,
    #[schema(value_type = Option<String>)]
    pub email: Value,
    #[schema(value_type = Option<String>)]
    pub household: Value,
    #[schema(value_type = Option<bool>)]
    pub kids: Value,
    /// 门禁码（不入库）
    #[schema(value_type = String, example = "1234")]
    pub door_code: Value,
}

impl CheckinRequest {
    /// 解析请求体；非 JSON 对象视为空表单
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice::<Value>(body)
            .ok()
            .filter(Value::is_object)
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    /// 姓名与门禁码是否都已填写（姓名去除首尾空白后不能为空）
    pub fn has_required_fields(&self) -> bool {
        text_value(&self.name).is_some() && is_truthy(&self.door_code)
    }

    /// 门禁码仅接受字符串，其他类型一律视为不匹配
    pub fn door_code(&self) -> Option<&str> {
        self.door_code.as_str()
    }

    /// 生成待入库记录；姓名去除首尾空白后为空时返回 `None`
    pub fn to_entry(&self) -> Option<NewSubmission> {
        let name = text_value(&self.name)?;
        Some(NewSubmission {
            name,
            phone: text_value(&self.phone),
            email: text_value(&self.email),
            household: text_value(&self.household),
            kids: is_truthy(&self.kids),
            source: SOURCE_TAG.to_string(),
        })
    }
}

/// 签到成功响应
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CheckinResponse {
    #[schema(example = true)]
    pub ok: bool,
    /// 数据库回显的记录
    pub entry: Submission,
}

/// 与表单提交语义一致的真值判断：false/0/""/null/缺省为假，其余为真
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// 可选文本字段：假值视为缺省；其余字符串化后去除首尾空白，空串视为缺省
fn text_value(v: &Value) -> Option<String> {
    if !is_truthy(v) {
        return None;
    }
    let raw = match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
