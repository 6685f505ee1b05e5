//! Write path: project an [`Example`] onto column write events.

use crate::{error::EncodeError, example::Example, schema::Schema, value::PrimitiveValue};

/// Receiver of column write events for one record at a time.
///
/// Events arrive as `start_message`, then for every non-empty field
/// `start_field`, one or more `add_value`, `end_field`, and finally
/// `end_message`. Fields with no values produce no events.
pub trait RecordConsumer {
    fn start_message(&mut self) -> Result<(), EncodeError>;

    fn end_message(&mut self) -> Result<(), EncodeError>;

    fn start_field(&mut self, name: &str, index: usize) -> Result<(), EncodeError>;

    fn end_field(&mut self, name: &str, index: usize) -> Result<(), EncodeError>;

    fn add_value(&mut self, value: PrimitiveValue<'_>) -> Result<(), EncodeError>;
}

/// Emit `example` as one record, visiting fields in schema order.
///
/// On error the consumer may have seen a partial record; it is up to the
/// consumer to discard it.
pub fn write_example<C>(
    schema: &Schema,
    consumer: &mut C,
    example: &Example,
) -> Result<(), EncodeError>
where
    C: RecordConsumer + ?Sized,
{
    consumer.start_message()?;
    for (index, field) in schema.iter().enumerate() {
        field.write(index, consumer, example)?;
    }
    consumer.end_message()
}
