//! The record-side half of the query engine.

use crate::value::Value;

/// A record whose fields can be looked up by name.
///
/// The engine never interprets field meaning; it asks for a field and gets a
/// [`Value`] back, or [`Value::None`] when the record has no such field or
/// the field is null.
///
/// ```
/// use catalog_seeker::{Number, Query, Seekable, Value};
///
/// struct Product {
///     name: String,
///     price: f64,
/// }
///
/// impl Seekable for Product {
///     fn seeker_field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::String(&self.name),
///             "price" => Value::Number(Number::F64(self.price)),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let products = vec![
///     Product { name: "Tote".into(), price: 20.0 },
///     Product { name: "Belt".into(), price: 12.5 },
/// ];
/// let cheap = Query::new().and_lt("price", 15.0).build();
/// let hits = cheap.filter(&products, Product::accessor);
/// assert_eq!(hits[0].name, "Belt");
/// ```
pub trait Seekable {
    /// Returns the value of `field`, or [`Value::None`].
    fn seeker_field_value(&self, field: &str) -> Value<'_>;

    /// Free-function form of [`seeker_field_value`](Self::seeker_field_value),
    /// for passing to [`Query::filter`](crate::Query::filter) and friends.
    fn accessor<'a>(item: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.seeker_field_value(field)
    }
}
