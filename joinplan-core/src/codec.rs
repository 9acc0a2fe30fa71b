//! JSON wire format of [`JoinPlanDescriptor`], used to ship a join node from the planner to the
//! workers executing it.
//!
//! Every field is named. All of them are required on input; fields this build does not know are
//! skipped so that payloads from newer planners still decode.

use tracing::{debug, trace};

use crate::{
    descriptor::JoinPlanDescriptor,
    error::Result,
    rel_ref::{ColumnRef, TableRef},
};

impl<T: TableRef, C: ColumnRef> JoinPlanDescriptor<T, C> {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_json_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_json(payload: &str) -> Result<Self> {
        Self::from_json_slice(payload.as_bytes())
    }

    pub fn from_json_slice(payload: &[u8]) -> Result<Self> {
        trace!(event = "decode_descriptor", bytes = payload.len());
        serde_json::from_slice(payload).map_err(|err| {
            debug!(event = "decode_failed", error = %err);
            err.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::{
        descriptor::JoinInput,
        error::JoinPlanError,
        join::{BuildSide, JoinType},
    };

    use super::*;

    type Descriptor = JoinPlanDescriptor<String, String>;

    fn sample() -> Descriptor {
        JoinPlanDescriptor::new(
            JoinInput::new(
                "lineitem".to_string(),
                "l_orderkey".to_string(),
                vec!["l_orderkey".to_string(), "l_quantity".to_string()],
            ),
            JoinInput::new(
                "orders".to_string(),
                "o_orderkey".to_string(),
                vec!["o_orderkey".to_string(), "o_orderdate".to_string()],
            ),
            true,
            BuildSide::Left,
            JoinType::FullOuter,
        )
    }

    #[test]
    fn round_trip_keeps_every_field() {
        let descriptor = sample();
        let decoded = Descriptor::from_json(&descriptor.to_json().unwrap()).unwrap();
        assert!(decoded.same_plan_and_hints(&descriptor));

        let decoded = Descriptor::from_json_slice(&descriptor.to_json_vec().unwrap()).unwrap();
        assert!(decoded.same_plan_and_hints(&descriptor));

        let decoded = Descriptor::from_json(&descriptor.to_json_pretty().unwrap()).unwrap();
        assert!(decoded.same_plan_and_hints(&descriptor));
    }

    #[test]
    fn wire_uses_named_fields() {
        let value: Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "leftTable": "lineitem",
                "leftKeyColumn": "l_orderkey",
                "leftJoinedColumns": ["l_orderkey", "l_quantity"],
                "rightTable": "orders",
                "rightKeyColumn": "o_orderkey",
                "rightJoinedColumns": ["o_orderkey", "o_orderdate"],
                "includeKeyColumns": true,
                "joinEndian": "LEFT",
                "joinType": "FULL_OUTER",
            })
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["spillThreshold"] = json!(1024);
        let decoded = Descriptor::from_json(&value.to_string()).unwrap();
        assert!(decoded.same_plan_and_hints(&sample()));
    }

    #[test]
    fn missing_field_is_a_serialization_error() {
        for field in ["leftTable", "rightKeyColumn", "joinEndian", "includeKeyColumns"] {
            let mut value = serde_json::to_value(sample()).unwrap();
            value.as_object_mut().unwrap().remove(field);
            let err = Descriptor::from_json(&value.to_string()).unwrap_err();
            assert!(matches!(err, JoinPlanError::Serialization(_)), "{field}");
            assert!(err.to_string().contains(field), "{err}");
        }
    }

    #[test]
    fn null_reference_is_a_serialization_error() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["leftKeyColumn"] = Value::Null;
        let err = Descriptor::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, JoinPlanError::Serialization(_)));
    }

    #[test]
    fn type_mismatch_is_a_serialization_error() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["includeKeyColumns"] = json!("yes");
        let err = Descriptor::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, JoinPlanError::Serialization(_)));
    }

    #[test]
    fn not_json_at_all() {
        let err = Descriptor::from_json_slice(b"\x00join").unwrap_err();
        assert!(matches!(err, JoinPlanError::Serialization(_)));
    }
}
