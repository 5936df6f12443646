use std::collections::HashMap;

use tracing::debug;

use super::managererror::ManagerError;
use super::namedobject::NamedJsonObject;

/// 以名稱索引的物件表，物件由 JSON 建構。
pub struct Manager<V> {
    map: HashMap<String, V>,
    get_obj_from_json: fn(serde_json::Value) -> Result<V, ManagerError>
}

impl<V> Manager<V> where
    V: Clone {
    pub fn new(get_obj_from_json: fn(serde_json::Value) -> Result<V, ManagerError>) -> Manager<V> {
        Manager { map: HashMap::new(), get_obj_from_json }
    }

    pub fn get(&self, name: &str) -> Result<V, ManagerError> {
        self.map
            .get(name)
            .cloned()
            .ok_or_else(|| ManagerError::NameNotFoundError(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.map.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn insert_obj_from_json(&mut self, json_value: serde_json::Value) -> Result<(), ManagerError> {
        let named_object: NamedJsonObject = ManagerError::from_json_or_json_parse_error(json_value.clone())?;
        let name = named_object.name().to_owned();
        if self.map.contains_key(&name) {
            return Err(ManagerError::DuplicateNameError(name));
        }
        let v = (self.get_obj_from_json)(json_value)?;
        debug!(name = name.as_str(), "registered preset");
        self.map.insert(name, v);
        Ok(())
    }

    pub fn insert_obj_from_json_vec(&mut self, json_vec: &[serde_json::Value]) -> Result<(), ManagerError> {
        for j in json_vec {
            self.insert_obj_from_json(j.clone())?;
        }
        Ok(())
    }
}
