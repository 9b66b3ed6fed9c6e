// SPDX-License-Identifier: MIT OR Apache-2.0

/// Source of the externally-defined attribute fields classifiers can be
/// configured with.
pub trait AttributeProvider {
    /// Available custom attribute fields: field identifier and display
    /// name, in the host's preferred order.
    fn attribute_fields(&self) -> Vec<(String, String)>;
}
