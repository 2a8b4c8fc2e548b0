//! Checkout preview: prints the options the payment widget would receive.

use std::io::Write;

use faithwear_core::{
    CartEngine, CartStorage, Catalog, PaymentRequest, PaymentSettings, ShippingDetails,
    payable_total,
};
use faithwear_storefront::config::validate_razorpay_key_id;

use super::CliError;

/// Raw shopper details from the command line. Blank fields are omitted.
pub struct Shipping<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub address: &'a str,
}

/// Print the payment widget options for the cart as pretty JSON.
///
/// # Errors
///
/// Returns an error if the key id is rejected, the cart is empty or has
/// nothing payable, the email is malformed, or writing fails.
pub fn preview<S: CartStorage>(
    cart: &CartEngine<S>,
    catalog: &Catalog,
    key_id: &str,
    store_name: &str,
    shipping: &Shipping<'_>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    validate_razorpay_key_id(key_id, "--key-id")?;
    payable_total(cart.state(), catalog)?;
    let settings = PaymentSettings::new(key_id, store_name);
    let details = ShippingDetails::from_form(shipping.name, shipping.email, shipping.address)?;

    let request = PaymentRequest::for_cart(cart.state(), catalog, &settings, details.as_ref())?;
    serde_json::to_writer_pretty(&mut *out, &request)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use faithwear_core::{CheckoutError, MemoryStorage};

    use super::*;

    const KEY: &str = "rzp_test_1DP5mmOlF5G5ag";
    const BLANK: Shipping<'static> = Shipping {
        name: "",
        email: "",
        address: "",
    };

    fn cart_with(items: &[(&str, &str)]) -> CartEngine<MemoryStorage> {
        let mut cart = CartEngine::restore(MemoryStorage::new());
        for &(id, size) in items {
            cart.add_item(id, size);
        }
        cart
    }

    #[test]
    fn test_preview_amount_in_paise() {
        let cart = cart_with(&[("ps91", "M"), ("ps91", "M")]);
        let mut out = Vec::new();
        preview(&cart, &Catalog::default(), KEY, "FaithWear Co.", &BLANK, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["amount"], 799_800);
        assert_eq!(json["currency"], "INR");
        assert_eq!(json["key"], KEY);
    }

    #[test]
    fn test_preview_empty_cart() {
        let cart = cart_with(&[]);
        let err = preview(&cart, &Catalog::default(), KEY, "FaithWear Co.", &BLANK, &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, CliError::Checkout(CheckoutError::EmptyCart)));
    }

    #[test]
    fn test_preview_empty_cart_wins_over_bad_email() {
        let cart = cart_with(&[]);
        let shipping = Shipping {
            name: "",
            email: "not-an-email",
            address: "",
        };
        let err = preview(&cart, &Catalog::default(), KEY, "FaithWear Co.", &shipping, &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, CliError::Checkout(CheckoutError::EmptyCart)));
    }

    #[test]
    fn test_preview_rejects_placeholder_key() {
        let cart = cart_with(&[("ps91", "M")]);
        let err = preview(
            &cart,
            &Catalog::default(),
            "rzp_test_your_key_here",
            "FaithWear Co.",
            &BLANK,
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_preview_rejects_bad_email() {
        let cart = cart_with(&[("ps91", "M")]);
        let shipping = Shipping {
            name: "Asha",
            email: "not-an-email",
            address: "",
        };
        let err = preview(&cart, &Catalog::default(), KEY, "FaithWear Co.", &shipping, &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, CliError::Checkout(CheckoutError::InvalidEmail(_))));
    }
}
