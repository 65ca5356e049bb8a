//! Directory entities as returned by the external service.
//!
//! Each entity is the directory's JSON object, kept as-is. Nothing is
//! defaulted, renamed or required; the accessors only read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

macro_rules! directory_object {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Map<String, Value>);

        impl $name {
            pub fn fields(&self) -> &Map<String, Value> {
                &self.0
            }

            pub fn get(&self, key: &str) -> Option<&Value> {
                self.0.get(key)
            }

            pub fn name(&self) -> Option<&str> {
                self.0.get("name").and_then(Value::as_str)
            }
        }

        impl From<Map<String, Value>> for $name {
            fn from(fields: Map<String, Value>) -> Self {
                Self(fields)
            }
        }
    };
}

directory_object!(
    /// A node of the organization's department tree.
    Department
);

directory_object!(
    /// A department member as listed by `user/simplelist`.
    UserSummary
);

directory_object!(
    /// Full profile of a single user.
    ///
    /// Fields the directory withholds by policy (mobile, email, ...) arrive
    /// empty or absent and are passed on as such.
    UserDetail
);

impl Department {
    pub fn id(&self) -> Option<u64> {
        self.0.get("id").and_then(Value::as_u64)
    }

    pub fn parent_id(&self) -> Option<u64> {
        self.0.get("parentid").and_then(Value::as_u64)
    }
}

impl UserSummary {
    pub fn userid(&self) -> Option<&str> {
        self.0.get("userid").and_then(Value::as_str)
    }

    pub fn department_ids(&self) -> Vec<u64> {
        self.0
            .get("department")
            .and_then(Value::as_array)
            .map(|ids| ids.iter().filter_map(Value::as_u64).collect())
            .unwrap_or_default()
    }
}

impl UserDetail {
    pub fn userid(&self) -> Option<&str> {
        self.0.get("userid").and_then(Value::as_str)
    }

    /// Drop the directory's `errcode`/`errmsg` status fields.
    pub(crate) fn without_status(mut self) -> Self {
        self.0.remove("errcode");
        self.0.remove("errmsg");
        self
    }
}
