//! Scalar conversion from decoded JSON values into typed fields.
//!
//! A field whose kind is `Scalar` is assigned only when the decoded value is
//! representationally compatible with the field's type. Incompatible values
//! are reported as `None` and left in the diff by the merger; conversion never
//! fails loudly.
//!
//! Numeric conversions follow Rust's integer semantics: integral numbers must
//! fit the target type, and floating-point numbers are truncated toward zero
//! before the same range check applies.
//!
//! ```
//! use json_residue::Convertible;
//! use serde_json::json;
//!
//! assert_eq!(u8::convert(&json!(30)), Some(30));
//! assert_eq!(i32::convert(&json!(-2.9)), Some(-2));
//! assert_eq!(u8::convert(&json!(300)), None);
//! assert_eq!(String::convert(&json!(30)), None);
//! assert_eq!(Option::<bool>::convert(&json!(null)), Some(None));
//! ```

use serde_json::{Map, Number, Value};

/// Types that can be built from a decoded JSON scalar or subtree.
pub trait Convertible: Sized {
    /// Convert `value`, returning `None` when the value's dynamic type is not
    /// compatible with `Self`.
    fn convert(value: &Value) -> Option<Self>;
}

impl Convertible for bool {
    fn convert(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl Convertible for String {
    fn convert(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl Convertible for f64 {
    fn convert(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl Convertible for f32 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "narrowing to f32 mirrors an `as` conversion"
    )]
    fn convert(value: &Value) -> Option<Self> {
        value.as_f64().map(|number| number as Self)
    }
}

/// Exclusive upper bound of `i128` as a float (2^127).
const I128_LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// Collapse a JSON number onto `i128`, truncating fractional parts.
///
/// Returns `None` for floats outside the `i128` range; those cannot fit any
/// supported integer field.
#[expect(
    clippy::cast_possible_truncation,
    reason = "truncation toward zero is the documented float conversion"
)]
fn integral(number: &Number) -> Option<i128> {
    if let Some(signed) = number.as_i64() {
        return Some(i128::from(signed));
    }
    if let Some(unsigned) = number.as_u64() {
        return Some(i128::from(unsigned));
    }
    let float = number.as_f64()?.trunc();
    (float.is_finite() && (-I128_LIMIT..I128_LIMIT).contains(&float)).then_some(float as i128)
}

macro_rules! impl_convertible_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Convertible for $ty {
                fn convert(value: &Value) -> Option<Self> {
                    let Value::Number(number) = value else {
                        return None;
                    };
                    integral(number).and_then(|wide| Self::try_from(wide).ok())
                }
            }
        )*
    };
}

impl_convertible_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<T: Convertible> Convertible for Option<T> {
    fn convert(value: &Value) -> Option<Self> {
        if value.is_null() {
            return Some(None);
        }
        T::convert(value).map(Some)
    }
}

impl<T: Convertible> Convertible for Vec<T> {
    fn convert(value: &Value) -> Option<Self> {
        value.as_array()?.iter().map(T::convert).collect()
    }
}

impl Convertible for Value {
    fn convert(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl Convertible for Map<String, Value> {
    fn convert(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}
