/*
 * Copyright (c) Huawei Technologies Co., Ltd. 2025. All rights reserved.
 * Wallet Pass Service is licensed under the Mulan PSL v2.
 * You can use this software according to the terms and conditions of the Mulan PSL v2.
 * You may obtain a copy of Mulan PSL v2 at:
 *     http://license.coscl.org.cn/MulanPSL2
 * THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR
 * PURPOSE.
 * See the Mulan PSL v2 for more details.
 */

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Lifecycle state of a pass object in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectState {
    Active,
    Inactive,
}

/// Layout template shared by all pass objects of one issuer
#[derive(Debug, Clone, PartialEq)]
pub struct WalletClassDescriptor {
    pub id: String,
    pub class_template_info: Value,
}

impl WalletClassDescriptor {
    pub fn to_registry_json(&self) -> Value {
        json!({
            "id": self.id,
            "classTemplateInfo": self.class_template_info,
        })
    }
}

/// One text row of a pass object; `id` is referenced by the class template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectAttribute {
    pub id: String,
    pub header: String,
    pub body: String,
}

/// One user's pass instance
#[derive(Debug, Clone, PartialEq)]
pub struct WalletObjectRecord {
    pub id: String,
    pub class_id: String,
    pub state: ObjectState,
    /// Ordered text rows
    pub attributes: Vec<ObjectAttribute>,
    pub barcode_value: Option<String>,
    /// Top level presentation members (card title, header, images, colour)
    pub presentation: Map<String, Value>,
}

impl WalletObjectRecord {
    pub fn to_registry_json(&self) -> Value {
        let mut body = Map::new();
        body.insert("id".to_string(), json!(self.id));
        body.insert("classId".to_string(), json!(self.class_id));
        body.insert("state".to_string(), json!(self.state));
        for (name, value) in &self.presentation {
            body.insert(name.clone(), value.clone());
        }
        if !self.attributes.is_empty() {
            let modules: Vec<Value> = self
                .attributes
                .iter()
                .map(|attr| json!({"id": attr.id, "header": attr.header, "body": attr.body}))
                .collect();
            body.insert("textModulesData".to_string(), Value::Array(modules));
        }
        if let Some(value) = &self.barcode_value {
            body.insert("barcode".to_string(), json!({"type": "QR_CODE", "value": value}));
        }
        Value::Object(body)
    }
}
