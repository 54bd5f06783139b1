use bytes::Bytes;
use koda::Value;
use proptest::prelude::*;

/// Arbitrary raw string payloads; any byte value is fair game.
pub fn arb_bytes() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..24).prop_map(Bytes::from)
}

/// Finite floats keep equality-based round-trip assertions meaningful.
pub fn arb_float() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(-0.0), -1.0e9..1.0e9]
}

/// Arbitrary values for the binary codec.
pub fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        arb_float().prop_map(Value::Float),
        arb_bytes().prop_map(Value::Str),
    ];
    leaf.prop_recursive(6, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            // btree_map guarantees unique keys; reversing its sorted
            // iteration makes insertion order disagree with key order.
            prop::collection::btree_map(arb_bytes(), inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().rev().collect())),
        ]
    })
}

/// Identifier-shaped object keys; keywords cannot appear in key position.
pub fn arb_key() -> impl Strategy<Value = Bytes> {
    "[a-z_][a-z0-9_-]{0,8}"
        .prop_filter("keywords cannot be keys", |s| {
            s != "true" && s != "false" && s != "null"
        })
        .prop_map(Bytes::from)
}

/// String payloads free of control bytes, so the compact rendering
/// re-parses.
pub fn arb_text_bytes() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(0x20u8..=0xFF, 0..16).prop_map(Bytes::from)
}

/// Values whose compact text rendering re-parses to the same value.
pub fn arb_text_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        arb_float().prop_map(Value::Float),
        arb_text_bytes().prop_map(Value::Str),
    ];
    leaf.prop_recursive(5, 32, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::btree_map(arb_key(), inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}
