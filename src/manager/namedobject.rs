use serde::Deserialize;

/// 只讀出 JSON 物件中的 `name` 欄位，其餘欄位交給各自的解析函數。
#[derive(Clone, Deserialize)]
pub struct NamedJsonObject {
    name: String
}

impl NamedJsonObject {
    pub fn name(&self) -> &str {
        &self.name
    }
}
