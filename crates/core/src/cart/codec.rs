//! Wire format for a persisted cart.
//!
//! A cart is stored as a JSON array of `{"id", "size", "qty"}` objects.
//! Decoding is strict: the whole payload is rejected if any entry is
//! malformed. Whether a rejected payload means "start with an empty cart" is
//! up to the caller (see [`CartEngine::restore`](super::CartEngine::restore)).

use thiserror::Error;

use super::{CartState, LineItem};

/// Reasons a stored cart value could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The value is not valid JSON.
    #[error("cart is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// The value is JSON but not an array.
    #[error("cart must be a JSON array, found {0}")]
    NotAnArray(&'static str),

    /// An array entry does not have the line item shape.
    #[error("cart entry {index} is malformed: {source}")]
    Entry {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// An entry has a zero quantity.
    #[error("cart entry {index} has zero quantity")]
    ZeroQuantity { index: usize },

    /// Two entries share the same product and size.
    #[error("cart entry {index} repeats product {product_id} size {size}")]
    DuplicateKey {
        index: usize,
        product_id: String,
        size: String,
    },
}

/// Serialize a cart to its stored JSON form.
#[must_use]
pub fn encode(state: &CartState) -> String {
    // Vec<LineItem> of strings and integers always serializes.
    serde_json::to_string(state.items()).unwrap_or_else(|_| String::from("[]"))
}

/// Decode a stored cart.
///
/// # Errors
///
/// Returns a [`DecodeError`] if the input is not a JSON array of line items,
/// if any entry has a zero quantity, or if two entries share a key.
pub fn try_decode(raw: &str) -> Result<CartState, DecodeError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(DecodeError::Json)?;
    let serde_json::Value::Array(entries) = value else {
        return Err(DecodeError::NotAnArray(json_kind(&value)));
    };

    let mut state = CartState::new();
    for (index, entry) in entries.into_iter().enumerate() {
        let item: LineItem =
            serde_json::from_value(entry).map_err(|source| DecodeError::Entry { index, source })?;

        if item.quantity == 0 {
            return Err(DecodeError::ZeroQuantity { index });
        }
        if state.get(&item.product_id, &item.size).is_some() {
            return Err(DecodeError::DuplicateKey {
                index,
                product_id: item.product_id.into_inner(),
                size: item.size.to_string(),
            });
        }
        state.items.push(item);
    }
    Ok(state)
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::types::{ProductId, Size};

    fn sample() -> CartState {
        let mut state = CartState::new();
        state.add_item(ProductId::new("crossblk"), Size::new("L"));
        state.add_item(ProductId::new("ps91"), Size::new("M"));
        state.add_item(ProductId::new("ps91"), Size::new("M"));
        state
    }

    #[test]
    fn test_encode_uses_short_field_names() {
        assert_eq!(
            encode(&sample()),
            r#"[{"id":"crossblk","size":"L","qty":1},{"id":"ps91","size":"M","qty":2}]"#
        );
        assert_eq!(encode(&CartState::new()), "[]");
    }

    #[test]
    fn test_decode_round_trip_preserves_order() {
        let state = sample();
        assert_eq!(try_decode(&encode(&state)).unwrap(), state);
    }

    #[test]
    fn test_decode_accepts_long_field_names() {
        let state = try_decode(r#"[{"productId":"ps91","size":"S","quantity":4}]"#).unwrap();
        let item = state.items().first().unwrap();
        assert_eq!(item.product_id, "ps91");
        assert_eq!(item.size, "S");
        assert_eq!(item.quantity, 4);
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let state = try_decode(r#"[{"id":"ps91","size":"S","qty":1,"note":"gift"}]"#).unwrap();
        assert_eq!(state.total_items(), 1);
    }

    #[test]
    fn test_decode_rejects_non_array() {
        assert!(matches!(
            try_decode(r#"{"id":"ps91"}"#),
            Err(DecodeError::NotAnArray("an object"))
        ));
        assert!(matches!(try_decode("null"), Err(DecodeError::NotAnArray("null"))));
        assert!(matches!(try_decode("not json"), Err(DecodeError::Json(_))));
        assert!(matches!(try_decode(""), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_decode_rejects_whole_payload_on_bad_entry() {
        let raw = r#"[{"id":"ps91","size":"M","qty":1},{"id":"flag","size":"M"}]"#;
        assert!(matches!(
            try_decode(raw),
            Err(DecodeError::Entry { index: 1, .. })
        ));

        let negative = r#"[{"id":"ps91","size":"M","qty":-2}]"#;
        assert!(matches!(
            try_decode(negative),
            Err(DecodeError::Entry { index: 0, .. })
        ));

        let fractional = r#"[{"id":"ps91","size":"M","qty":1.5}]"#;
        assert!(try_decode(fractional).is_err());
    }

    #[test]
    fn test_decode_rejects_zero_quantity() {
        let raw = r#"[{"id":"ps91","size":"M","qty":0}]"#;
        assert!(matches!(
            try_decode(raw),
            Err(DecodeError::ZeroQuantity { index: 0 })
        ));
    }

    #[test]
    fn test_decode_rejects_duplicate_keys() {
        let raw = r#"[{"id":"ps91","size":"M","qty":1},{"id":"ps91","size":"M","qty":3}]"#;
        assert!(matches!(
            try_decode(raw),
            Err(DecodeError::DuplicateKey { index: 1, .. })
        ));
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(try_decode("[]").unwrap().is_empty());
    }

    fn line_strategy() -> impl Strategy<Value = LineItem> {
        (
            "[a-z0-9]{1,8}",
            prop::sample::select(vec!["S", "M", "L", "XL", "XXL", ""]),
            1..=u32::MAX,
        )
            .prop_map(|(id, size, quantity)| LineItem {
                product_id: ProductId::new(id),
                size: Size::new(size),
                quantity,
            })
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(lines in prop::collection::vec(line_strategy(), 0..24)) {
            let mut state = CartState::new();
            for line in lines {
                if state.get(&line.product_id, &line.size).is_none() {
                    state.items.push(line);
                }
            }
            prop_assert_eq!(try_decode(&encode(&state)).unwrap(), state);
        }
    }
}
